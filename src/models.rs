use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::{favorites, properties, users},
    price::Price,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i32,
    pub title: String,
    #[schema(value_type = f64, example = 3500000.00)]
    pub price: Price,
    pub location: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

/// Property as embedded in a favorite listing (no description).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    pub id: i32,
    pub title: String,
    #[schema(value_type = f64)]
    pub price: Price,
    pub location: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub user_id: i32,
    pub property_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteWithProperty {
    pub user_id: i32,
    pub property_id: i32,
    pub created_at: DateTime<Utc>,
    pub property: PropertySummary,
}

/// A property with every field resolved, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub title: String,
    pub price: Price,
    pub location: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyChanges {
    pub title: Option<String>,
    pub price: Option<Price>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            created_at: model.created_at,
        }
    }
}

impl From<properties::Model> for Property {
    fn from(model: properties::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            price: Price::from_stored(model.price),
            location: model.location,
            image_url: model.image_url,
            description: model.description,
        }
    }
}

impl From<properties::Model> for PropertySummary {
    fn from(model: properties::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            price: Price::from_stored(model.price),
            location: model.location,
            image_url: model.image_url,
        }
    }
}

impl From<favorites::Model> for Favorite {
    fn from(model: favorites::Model) -> Self {
        Self {
            user_id: model.user_id,
            property_id: model.property_id,
            created_at: model.created_at,
        }
    }
}
