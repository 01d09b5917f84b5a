use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ToggleFavoriteRequest {
    #[schema(example = 1)]
    pub user_id: Option<i32>,
    #[schema(example = 2)]
    pub property_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FavoriteQuery {
    /// Only return favorites of this user.
    pub user_id: Option<i32>,
}

/// Returned when a toggle inserted the link.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteAdded {
    pub user_id: i32,
    pub property_id: i32,
    pub created_at: DateTime<Utc>,
    pub message: String,
}

/// Returned when a toggle deleted the link.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRemoved {
    pub user_id: i32,
    pub property_id: i32,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    pub user_id: i32,
    #[schema(example = "http://localhost:3000/api/favorites/user/1/properties")]
    pub share_url: String,
    pub message: String,
}
