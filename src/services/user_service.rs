use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::{
    dto::users::CreateUserRequest,
    error::{AppError, AppResult, StoreError},
    models::User,
    repository::Store,
    response::MessageResponse,
};

pub const USERNAME_MAX_LEN: usize = 50;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.store.list_users().await?)
    }

    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.store
            .find_user(id)
            .await?
            .ok_or_else(AppError::user_not_found)
    }

    #[instrument(skip(self, payload))]
    pub async fn create_user(&self, payload: CreateUserRequest) -> AppResult<User> {
        let username = match payload.username {
            Some(username) if !username.is_empty() => username,
            _ => return Err(AppError::Validation("username is required".into())),
        };
        if username.chars().count() > USERNAME_MAX_LEN {
            return Err(AppError::Validation(format!(
                "username must be at most {USERNAME_MAX_LEN} characters"
            )));
        }

        if self.store.username_exists(&username).await? {
            return Err(username_taken());
        }

        // The unique index settles races the check above cannot see.
        let user = match self.store.insert_user(&username, Utc::now()).await {
            Ok(user) => user,
            Err(StoreError::UniqueViolation(detail)) => {
                warn!(%username, %detail, "concurrent insert claimed username");
                return Err(username_taken());
            }
            Err(err) => return Err(err.into()),
        };

        info!(user_id = user.id, username = %user.username, "user created");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: i32) -> AppResult<MessageResponse> {
        if self.store.delete_user(id).await? == 0 {
            return Err(AppError::user_not_found());
        }
        info!(user_id = id, "user deleted");
        Ok(MessageResponse::new("user deleted"))
    }
}

fn username_taken() -> AppError {
    AppError::Conflict("username already exists".into())
}
