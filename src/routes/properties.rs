use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::properties::PropertyPayload,
    error::AppResult,
    middleware::rejection::{AppJson, AppPath},
    models::Property,
    response::{ErrorBody, MessageResponse},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_properties).post(create_property))
        .route(
            "/{id}",
            get(get_property).put(update_property).delete(delete_property),
        )
}

#[utoipa::path(
    get,
    path = "/api/properties",
    responses(
        (status = 200, description = "List properties", body = Vec<Property>)
    ),
    tag = "Properties"
)]
pub async fn list_properties(State(state): State<AppState>) -> AppResult<Json<Vec<Property>>> {
    Ok(Json(state.properties.list_properties().await?))
}

#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    params(
        ("id" = i32, Path, description = "Property ID")
    ),
    responses(
        (status = 200, description = "Get property", body = Property),
        (status = 404, description = "Property not found", body = ErrorBody)
    ),
    tag = "Properties"
)]
pub async fn get_property(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<Property>> {
    Ok(Json(state.properties.get_property(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/properties",
    request_body = PropertyPayload,
    responses(
        (status = 201, description = "Property created; omitted fields take defaults", body = Property),
        (status = 400, description = "Malformed body", body = ErrorBody)
    ),
    tag = "Properties"
)]
pub async fn create_property(
    State(state): State<AppState>,
    AppJson(payload): AppJson<PropertyPayload>,
) -> AppResult<(StatusCode, Json<Property>)> {
    let property = state.properties.create_property(payload).await?;
    Ok((StatusCode::CREATED, Json(property)))
}

#[utoipa::path(
    put,
    path = "/api/properties/{id}",
    params(
        ("id" = i32, Path, description = "Property ID")
    ),
    request_body = PropertyPayload,
    responses(
        (status = 200, description = "Updated property; omitted fields unchanged", body = Property),
        (status = 404, description = "Property not found", body = ErrorBody)
    ),
    tag = "Properties"
)]
pub async fn update_property(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<PropertyPayload>,
) -> AppResult<Json<Property>> {
    Ok(Json(state.properties.update_property(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/properties/{id}",
    params(
        ("id" = i32, Path, description = "Property ID")
    ),
    responses(
        (status = 200, description = "Property and its favorites deleted", body = MessageResponse),
        (status = 404, description = "Property not found", body = ErrorBody)
    ),
    tag = "Properties"
)]
pub async fn delete_property(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(state.properties.delete_property(id).await?))
}
