use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{blog, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::user::{RegisterRequest, UserResponse, validate_register_request};
use crate::state::AppState;
use crate::utils::hash;

#[utoipa::path(
    post,
    path = "/",
    tag = "Users",
    operation_id = "createUser",
    summary = "Register a new user",
    description = "Creates a user. Username and password must each be at least 3 characters and the username must be unique. The password is stored only as a salted hash.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Too short or duplicate username, too short password (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_register_request(&payload)?;

    let hash = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let new_user = user::ActiveModel {
        id: Set(Uuid::now_v7()),
        username: Set(payload.username.trim().to_string()),
        name: Set(payload.display_name()),
        password: Set(hash),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let user = new_user.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Validation("username must be unique".into())
        }
        _ => AppError::from(e),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse::new(user, Vec::new())),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Users",
    operation_id = "listUsers",
    summary = "List all users",
    description = "Returns every user with the blogs they own, both in creation order.",
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>),
        (status = 500, description = "Unexpected failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let rows = user::Entity::find()
        .find_with_related(blog::Entity)
        .order_by_asc(user::Column::CreatedAt)
        .order_by_asc(user::Column::Id)
        .order_by_asc(blog::Column::CreatedAt)
        .order_by_asc(blog::Column::Id)
        .all(&state.db)
        .await?;

    let items = rows
        .into_iter()
        .map(|(user, blogs)| UserResponse::new(user, blogs))
        .collect();

    Ok(Json(items))
}
