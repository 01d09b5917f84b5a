use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tower::ServiceExt;

use property_favorites_api::{
    app,
    config::AppConfig,
    db::{create_pool, orm_from_pool, run_migrations},
    models::{Favorite, FavoriteWithProperty, NewProperty, Property, PropertyChanges, User},
    repository::{SeaOrmStore, Store, StoreResult},
    seed::seed,
    state::AppState,
};

/// Fresh in-memory store holding the fixed seed set.
#[allow(dead_code)]
pub async fn seeded_store() -> anyhow::Result<SeaOrmStore> {
    let config = AppConfig::in_memory();
    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;
    seed(&pool).await?;
    Ok(SeaOrmStore::new(orm_from_pool(pool)))
}

pub async fn seeded_state() -> anyhow::Result<AppState> {
    AppState::init(&AppConfig::in_memory()).await
}

pub async fn seeded_app() -> anyhow::Result<Router> {
    Ok(app(seeded_state().await?))
}

pub async fn send(app: &Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request")
}

#[allow(dead_code)]
pub fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).expect("request")
}

#[allow(dead_code)]
pub fn json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// Store whose advisory existence checks always miss, as if a concurrent
/// writer slipped in between the check and the insert.
#[allow(dead_code)]
pub struct BlindStore(pub SeaOrmStore);

#[async_trait]
impl Store for BlindStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.0.list_users().await
    }
    async fn find_user(&self, id: i32) -> StoreResult<Option<User>> {
        self.0.find_user(id).await
    }
    async fn user_exists(&self, id: i32) -> StoreResult<bool> {
        self.0.user_exists(id).await
    }
    async fn username_exists(&self, _username: &str) -> StoreResult<bool> {
        Ok(false)
    }
    async fn insert_user(&self, username: &str, created_at: DateTime<Utc>) -> StoreResult<User> {
        self.0.insert_user(username, created_at).await
    }
    async fn delete_user(&self, id: i32) -> StoreResult<u64> {
        self.0.delete_user(id).await
    }
    async fn list_properties(&self) -> StoreResult<Vec<Property>> {
        self.0.list_properties().await
    }
    async fn find_property(&self, id: i32) -> StoreResult<Option<Property>> {
        self.0.find_property(id).await
    }
    async fn property_exists(&self, id: i32) -> StoreResult<bool> {
        self.0.property_exists(id).await
    }
    async fn insert_property(&self, property: NewProperty) -> StoreResult<Property> {
        self.0.insert_property(property).await
    }
    async fn update_property(
        &self,
        id: i32,
        changes: PropertyChanges,
    ) -> StoreResult<Option<Property>> {
        self.0.update_property(id, changes).await
    }
    async fn delete_property(&self, id: i32) -> StoreResult<u64> {
        self.0.delete_property(id).await
    }
    async fn list_favorites(&self, user_id: Option<i32>) -> StoreResult<Vec<FavoriteWithProperty>> {
        self.0.list_favorites(user_id).await
    }
    async fn list_favorite_properties(&self, user_id: i32) -> StoreResult<Vec<Property>> {
        self.0.list_favorite_properties(user_id).await
    }
    async fn find_favorite(
        &self,
        _user_id: i32,
        _property_id: i32,
    ) -> StoreResult<Option<Favorite>> {
        Ok(None)
    }
    async fn insert_favorite(
        &self,
        user_id: i32,
        property_id: i32,
        created_at: DateTime<Utc>,
    ) -> StoreResult<Favorite> {
        self.0.insert_favorite(user_id, property_id, created_at).await
    }
    async fn delete_favorite(&self, user_id: i32, property_id: i32) -> StoreResult<u64> {
        self.0.delete_favorite(user_id, property_id).await
    }
}

#[allow(dead_code)]
pub async fn blind_state() -> anyhow::Result<AppState> {
    let store = BlindStore(seeded_store().await?);
    Ok(AppState::new(Arc::new(store), &AppConfig::in_memory()))
}
