//! Identity bridge: mirrors the external identity provider's principal into
//! the local users table. The principal is always passed in explicitly.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{SyncUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct IdentityService {
    repository: Repository,
}

impl IdentityService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create-or-update the local row for an authenticated principal.
    /// Idempotent: repeat syncs only write when the display name changed.
    pub async fn sync_user(&self, principal: SyncUser) -> AppResult<User> {
        let (Some(firebase_uid), Some(email)) =
            (principal.firebase_uid.as_deref(), principal.email.as_deref())
        else {
            return Err(AppError::Validation("Missing required fields".to_string()));
        };
        if firebase_uid.is_empty() || email.is_empty() {
            return Err(AppError::Validation("Missing required fields".to_string()));
        }
        principal
            .validate()
            .map_err(|_| AppError::Validation("Invalid email format".to_string()))?;

        let existing = self.repository.users.find_by_firebase_uid(firebase_uid).await?;

        match existing {
            None => {
                tracing::info!("Creating local user for principal {}", firebase_uid);
                self.repository
                    .users
                    .create(firebase_uid, email, principal.name.as_deref())
                    .await
            }
            Some(user) => match principal.name.as_deref() {
                Some(name) if user.name.as_deref() != Some(name) => {
                    self.repository.users.update_name(firebase_uid, name).await
                }
                _ => Ok(user),
            },
        }
    }
}
