use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::{
    dto::favorites::{ShareLink, ToggleFavoriteRequest},
    error::{AppError, AppResult, StoreError},
    models::{Favorite, FavoriteWithProperty, Property},
    repository::Store,
    response::MessageResponse,
};

/// What a toggle did to the `(user, property)` link.
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    Added(Favorite),
    Removed { user_id: i32, property_id: i32 },
}

#[derive(Clone)]
pub struct FavoriteService {
    store: Arc<dyn Store>,
}

impl FavoriteService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list_favorites(&self, user_id: Option<i32>) -> AppResult<Vec<FavoriteWithProperty>> {
        Ok(self.store.list_favorites(user_id).await?)
    }

    pub async fn list_user_favorite_properties(&self, user_id: i32) -> AppResult<Vec<Property>> {
        self.ensure_user(user_id).await?;
        Ok(self.store.list_favorite_properties(user_id).await?)
    }

    /// Adds the link when absent and removes it when present.
    #[instrument(skip(self))]
    pub async fn toggle_favorite(&self, payload: ToggleFavoriteRequest) -> AppResult<ToggleOutcome> {
        let (user_id, property_id) = match (payload.user_id, payload.property_id) {
            (Some(user_id), Some(property_id)) if user_id != 0 && property_id != 0 => {
                (user_id, property_id)
            }
            _ => {
                return Err(AppError::Validation(
                    "userId and propertyId are required".into(),
                ));
            }
        };

        self.ensure_user(user_id).await?;
        self.ensure_property(property_id).await?;

        if self.store.find_favorite(user_id, property_id).await?.is_some() {
            // A concurrent toggle may have removed it first; either way it is gone.
            let removed = self.store.delete_favorite(user_id, property_id).await?;
            info!(user_id, property_id, removed, "favorite removed");
            return Ok(ToggleOutcome::Removed {
                user_id,
                property_id,
            });
        }

        match self
            .store
            .insert_favorite(user_id, property_id, Utc::now())
            .await
        {
            Ok(favorite) => {
                info!(user_id, property_id, "favorite added");
                Ok(ToggleOutcome::Added(favorite))
            }
            Err(StoreError::UniqueViolation(detail)) => {
                warn!(user_id, property_id, %detail, "concurrent insert of favorite");
                Err(AppError::Conflict("favorite already exists".into()))
            }
            Err(StoreError::ForeignKeyViolation(detail)) => {
                warn!(user_id, property_id, %detail, "favorite parent deleted during insert");
                self.ensure_user(user_id).await?;
                Err(AppError::property_not_found())
            }
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_favorite(&self, user_id: i32, property_id: i32) -> AppResult<MessageResponse> {
        if self.store.delete_favorite(user_id, property_id).await? == 0 {
            return Err(AppError::favorite_not_found());
        }
        info!(user_id, property_id, "favorite removed");
        Ok(MessageResponse::new("favorite removed"))
    }

    /// `base_url` is the scheme and authority the caller reached us on.
    pub async fn get_share_url(&self, user_id: i32, base_url: &str) -> AppResult<ShareLink> {
        self.ensure_user(user_id).await?;
        Ok(ShareLink {
            user_id,
            share_url: format!(
                "{}/api/favorites/user/{user_id}/properties",
                base_url.trim_end_matches('/')
            ),
            message: "copy this URL to share your favorites".into(),
        })
    }

    async fn ensure_user(&self, user_id: i32) -> AppResult<()> {
        if !self.store.user_exists(user_id).await? {
            return Err(AppError::user_not_found());
        }
        Ok(())
    }

    async fn ensure_property(&self, property_id: i32) -> AppResult<()> {
        if !self.store.property_exists(property_id).await? {
            return Err(AppError::property_not_found());
        }
        Ok(())
    }
}
