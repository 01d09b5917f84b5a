use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        favorites::{FavoriteAdded, FavoriteRemoved, ShareLink, ToggleFavoriteRequest},
        properties::PropertyPayload,
        users::CreateUserRequest,
    },
    models::{FavoriteWithProperty, Property, PropertySummary, User},
    response::{ErrorBody, MessageResponse},
    routes::{favorites, health, properties, users},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::list_users,
        users::get_user,
        users::create_user,
        users::delete_user,
        properties::list_properties,
        properties::get_property,
        properties::create_property,
        properties::update_property,
        properties::delete_property,
        favorites::list_favorites,
        favorites::list_user_favorite_properties,
        favorites::toggle_favorite,
        favorites::remove_favorite,
        favorites::get_share_url
    ),
    components(
        schemas(
            User,
            Property,
            PropertySummary,
            FavoriteWithProperty,
            CreateUserRequest,
            PropertyPayload,
            ToggleFavoriteRequest,
            FavoriteAdded,
            FavoriteRemoved,
            ShareLink,
            MessageResponse,
            ErrorBody,
            health::HealthData
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Users", description = "User endpoints"),
        (name = "Properties", description = "Property listing endpoints"),
        (name = "Favorites", description = "Favorite endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
