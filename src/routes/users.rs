use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::users::CreateUserRequest,
    error::AppResult,
    middleware::rejection::{AppJson, AppPath},
    models::User,
    response::{ErrorBody, MessageResponse},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).delete(delete_user))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users in insertion order", body = Vec<User>)
    ),
    tag = "Users"
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.users.list_users().await?))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Get user", body = User),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<User>> {
    Ok(Json(state.users.get_user(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Username missing or too long", body = ErrorBody),
        (status = 409, description = "Username already exists", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.users.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User and their favorites deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    Ok(Json(state.users.delete_user(id).await?))
}
