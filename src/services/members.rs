//! Member management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member, UpdateMember},
    repository::Repository,
    validation::{self, phone},
};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get a member by ID
    pub async fn get_member(&self, id: i32) -> AppResult<Member> {
        self.repository.members.get_by_id(id).await
    }

    /// List all members
    pub async fn list_members(&self) -> AppResult<Vec<Member>> {
        self.repository.members.list().await
    }

    /// Create a new member. The email must be unique (case-insensitively).
    pub async fn create_member(&self, member: CreateMember) -> AppResult<Member> {
        member.validate()?;

        let name = validation::required_text(&member.name, "Name").map_err(AppError::Validation)?;
        let email = member.email.trim().to_string();
        let phone = self.normalize_phone(member.phone.as_deref())?;

        if self.repository.members.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Member with email {} already exists",
                email
            )));
        }

        tracing::info!(name = %name, "Creating member");
        self.repository
            .members
            .create(&name, &email, phone.as_deref())
            .await
    }

    /// Update a member, leaving omitted fields unchanged
    pub async fn update_member(&self, id: i32, update: UpdateMember) -> AppResult<Member> {
        update.validate()?;

        let name = update
            .name
            .as_deref()
            .map(|n| validation::required_text(n, "Name"))
            .transpose()
            .map_err(AppError::Validation)?;
        let email = update.email.as_deref().map(str::trim);
        let phone = self.normalize_phone(update.phone.as_deref())?;

        if let Some(email) = email {
            if let Some(existing) = self.repository.members.find_by_email(email).await? {
                if existing.id != id {
                    return Err(AppError::Conflict(format!(
                        "Member with email {} already exists",
                        email
                    )));
                }
            }
        }

        self.repository
            .members
            .update(id, name.as_deref(), email, phone.as_deref())
            .await
    }

    /// Delete a member. Refused while the member holds open borrowings.
    pub async fn delete_member(&self, id: i32) -> AppResult<()> {
        self.repository.members.get_by_id(id).await?;

        let active = self
            .repository
            .borrowings
            .count_active_by_member(id)
            .await?;
        if active > 0 {
            return Err(AppError::OperationNotAllowed(format!(
                "Member {} has {} active borrowings",
                id, active
            )));
        }

        tracing::info!(member_id = id, "Deleting member");
        self.repository.members.delete(id).await
    }

    fn normalize_phone(&self, phone: Option<&str>) -> AppResult<Option<String>> {
        match phone.map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => phone::validate(raw)
                .map(Some)
                .map_err(AppError::Validation),
        }
    }
}
