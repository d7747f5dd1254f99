//! Book catalog service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::Repository,
    validation::{self, isbn},
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get a book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// List all books
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Create a new book. The ISBN is check-digit verified and must be
    /// unique across the catalog.
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;

        let title = validation::required_text(&book.title, "Title").map_err(AppError::Validation)?;
        let author =
            validation::required_text(&book.author, "Author").map_err(AppError::Validation)?;
        let isbn = self.normalize_isbn(book.isbn.as_deref())?;

        if let Some(ref isbn) = isbn {
            if self.repository.books.find_by_isbn(isbn).await?.is_some() {
                return Err(AppError::Conflict(format!(
                    "Book with ISBN {} already exists",
                    isbn
                )));
            }
        }

        tracing::info!(title = %title, "Creating book");
        self.repository
            .books
            .create(&title, &author, isbn.as_deref())
            .await
    }

    /// Update a book, leaving omitted fields unchanged
    pub async fn update_book(&self, id: i32, update: UpdateBook) -> AppResult<Book> {
        update.validate()?;

        let title = update
            .title
            .as_deref()
            .map(|t| validation::required_text(t, "Title"))
            .transpose()
            .map_err(AppError::Validation)?;
        let author = update
            .author
            .as_deref()
            .map(|a| validation::required_text(a, "Author"))
            .transpose()
            .map_err(AppError::Validation)?;
        let isbn = self.normalize_isbn(update.isbn.as_deref())?;

        if let Some(ref isbn) = isbn {
            if let Some(existing) = self.repository.books.find_by_isbn(isbn).await? {
                if existing.id != id {
                    return Err(AppError::Conflict(format!(
                        "Book with ISBN {} already exists",
                        isbn
                    )));
                }
            }
        }

        self.repository
            .books
            .update(id, title.as_deref(), author.as_deref(), isbn.as_deref())
            .await
    }

    /// Delete a book. Refused while the book is out on loan.
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.get_by_id(id).await?;

        let active = self.repository.borrowings.count_active_by_book(id).await?;
        if active > 0 {
            return Err(AppError::OperationNotAllowed(format!(
                "Book {} has {} active borrowings",
                id, active
            )));
        }

        tracing::info!(book_id = id, "Deleting book");
        self.repository.books.delete(id).await
    }

    fn normalize_isbn(&self, isbn: Option<&str>) -> AppResult<Option<String>> {
        match isbn.map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => isbn::validate(raw)
                .map(Some)
                .map_err(AppError::Validation),
        }
    }
}
