use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    config::PropertyDefaults,
    dto::properties::PropertyPayload,
    error::{AppError, AppResult},
    models::Property,
    repository::Store,
    response::MessageResponse,
};

#[derive(Clone)]
pub struct PropertyService {
    store: Arc<dyn Store>,
    defaults: Arc<PropertyDefaults>,
}

impl PropertyService {
    pub fn new(store: Arc<dyn Store>, defaults: PropertyDefaults) -> Self {
        Self {
            store,
            defaults: Arc::new(defaults),
        }
    }

    pub async fn list_properties(&self) -> AppResult<Vec<Property>> {
        Ok(self.store.list_properties().await?)
    }

    pub async fn get_property(&self, id: i32) -> AppResult<Property> {
        self.store
            .find_property(id)
            .await?
            .ok_or_else(AppError::property_not_found)
    }

    /// Inserts whatever was sent; omitted fields take the configured defaults.
    #[instrument(skip(self, payload))]
    pub async fn create_property(&self, payload: PropertyPayload) -> AppResult<Property> {
        let property = self
            .store
            .insert_property(payload.resolve(&self.defaults))
            .await?;
        info!(property_id = property.id, "property created");
        Ok(property)
    }

    #[instrument(skip(self, payload))]
    pub async fn update_property(&self, id: i32, payload: PropertyPayload) -> AppResult<Property> {
        let property = self
            .store
            .update_property(id, payload.into_changes())
            .await?
            .ok_or_else(AppError::property_not_found)?;
        info!(property_id = id, "property updated");
        Ok(property)
    }

    #[instrument(skip(self))]
    pub async fn delete_property(&self, id: i32) -> AppResult<MessageResponse> {
        if self.store.delete_property(id).await? == 0 {
            return Err(AppError::property_not_found());
        }
        info!(property_id = id, "property deleted");
        Ok(MessageResponse::new("property deleted"))
    }
}
