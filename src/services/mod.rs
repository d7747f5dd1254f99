//! Business logic services

pub mod books;
pub mod borrowings;
pub mod members;

use crate::{config::BorrowingConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub members: members::MembersService,
    pub borrowings: borrowings::BorrowingsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, borrowing_config: BorrowingConfig) -> Self {
        Self {
            books: books::BooksService::new(repository.clone()),
            members: members::MembersService::new(repository.clone()),
            borrowings: borrowings::BorrowingsService::new(repository, borrowing_config),
        }
    }
}
