use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};

use crate::{
    dto::favorites::{
        FavoriteAdded, FavoriteQuery, FavoriteRemoved, ShareLink, ToggleFavoriteRequest,
    },
    error::AppResult,
    middleware::{
        origin::RequestOrigin,
        rejection::{AppJson, AppPath, AppQuery},
    },
    models::{FavoriteWithProperty, Property},
    response::{ErrorBody, MessageResponse},
    services::ToggleOutcome,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_favorites).post(toggle_favorite))
        .route("/user/{user_id}/properties", get(list_user_favorite_properties))
        .route(
            "/user/{user_id}/property/{property_id}",
            delete(remove_favorite),
        )
        .route("/share/{user_id}", get(get_share_url))
}

#[utoipa::path(
    get,
    path = "/api/favorites",
    params(FavoriteQuery),
    responses(
        (status = 200, description = "Favorites with their property", body = Vec<FavoriteWithProperty>),
        (status = 400, description = "Malformed query", body = ErrorBody)
    ),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<FavoriteQuery>,
) -> AppResult<Json<Vec<FavoriteWithProperty>>> {
    Ok(Json(state.favorites.list_favorites(query.user_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/favorites/user/{user_id}/properties",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Properties the user marked as favorite", body = Vec<Property>),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "Favorites"
)]
pub async fn list_user_favorite_properties(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i32>,
) -> AppResult<Json<Vec<Property>>> {
    Ok(Json(
        state
            .favorites
            .list_user_favorite_properties(user_id)
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/favorites",
    request_body = ToggleFavoriteRequest,
    responses(
        (status = 201, description = "Favorite was absent and has been added", body = FavoriteAdded),
        (status = 200, description = "Favorite was present and has been removed", body = FavoriteRemoved),
        (status = 400, description = "userId or propertyId missing", body = ErrorBody),
        (status = 404, description = "User or property not found", body = ErrorBody),
        (status = 409, description = "Lost a race against an identical add", body = ErrorBody)
    ),
    tag = "Favorites"
)]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ToggleFavoriteRequest>,
) -> AppResult<Response> {
    let response = match state.favorites.toggle_favorite(payload).await? {
        ToggleOutcome::Added(favorite) => (
            StatusCode::CREATED,
            Json(FavoriteAdded {
                user_id: favorite.user_id,
                property_id: favorite.property_id,
                created_at: favorite.created_at,
                message: "favorite added".into(),
            }),
        )
            .into_response(),
        ToggleOutcome::Removed {
            user_id,
            property_id,
        } => Json(FavoriteRemoved {
            user_id,
            property_id,
            message: "favorite removed".into(),
        })
        .into_response(),
    };
    Ok(response)
}

#[utoipa::path(
    delete,
    path = "/api/favorites/user/{user_id}/property/{property_id}",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ("property_id" = i32, Path, description = "Property ID")
    ),
    responses(
        (status = 200, description = "Removed from favorites", body = MessageResponse),
        (status = 404, description = "Favorite not found", body = ErrorBody)
    ),
    tag = "Favorites"
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    AppPath((user_id, property_id)): AppPath<(i32, i32)>,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(
        state
            .favorites
            .remove_favorite(user_id, property_id)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/favorites/share/{user_id}",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Shareable link to the user's favorite properties", body = ShareLink),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "Favorites"
)]
pub async fn get_share_url(
    State(state): State<AppState>,
    origin: RequestOrigin,
    AppPath(user_id): AppPath<i32>,
) -> AppResult<Json<ShareLink>> {
    Ok(Json(
        state
            .favorites
            .get_share_url(user_id, origin.as_str())
            .await?,
    ))
}
