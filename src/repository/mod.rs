use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    error::StoreError,
    models::{Favorite, FavoriteWithProperty, NewProperty, Property, PropertyChanges, User},
};

pub mod seaorm;

pub use seaorm::SeaOrmStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for users, properties and favorite links.
///
/// Uniqueness of usernames and of `(user_id, property_id)` pairs, as well as
/// cascading deletes of favorites, are properties of the store itself; callers
/// may check first but must handle the constraint errors regardless.
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_users(&self) -> StoreResult<Vec<User>>;
    async fn find_user(&self, id: i32) -> StoreResult<Option<User>>;
    async fn user_exists(&self, id: i32) -> StoreResult<bool>;
    async fn username_exists(&self, username: &str) -> StoreResult<bool>;
    async fn insert_user(&self, username: &str, created_at: DateTime<Utc>) -> StoreResult<User>;
    /// Returns the number of rows removed.
    async fn delete_user(&self, id: i32) -> StoreResult<u64>;

    async fn list_properties(&self) -> StoreResult<Vec<Property>>;
    async fn find_property(&self, id: i32) -> StoreResult<Option<Property>>;
    async fn property_exists(&self, id: i32) -> StoreResult<bool>;
    async fn insert_property(&self, property: NewProperty) -> StoreResult<Property>;
    /// `None` when no property has this id.
    async fn update_property(
        &self,
        id: i32,
        changes: PropertyChanges,
    ) -> StoreResult<Option<Property>>;
    async fn delete_property(&self, id: i32) -> StoreResult<u64>;

    async fn list_favorites(&self, user_id: Option<i32>) -> StoreResult<Vec<FavoriteWithProperty>>;
    async fn list_favorite_properties(&self, user_id: i32) -> StoreResult<Vec<Property>>;
    async fn find_favorite(&self, user_id: i32, property_id: i32)
    -> StoreResult<Option<Favorite>>;
    async fn insert_favorite(
        &self,
        user_id: i32,
        property_id: i32,
        created_at: DateTime<Utc>,
    ) -> StoreResult<Favorite>;
    async fn delete_favorite(&self, user_id: i32, property_id: i32) -> StoreResult<u64>;
}
