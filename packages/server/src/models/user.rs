use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{blog, user};
use crate::error::AppError;

use super::blog::OwnedBlog;
use super::shared::{non_blank, validate_min_len};

/// Request body for user registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Unique username, at least 3 characters.
    #[schema(example = "mluukkai")]
    pub username: String,
    /// Display name.
    #[schema(example = "Matti Luukkainen")]
    pub name: Option<String>,
    /// Password, at least 3 characters.
    #[schema(example = "salainen")]
    pub password: String,
}

pub fn validate_register_request(payload: &RegisterRequest) -> Result<(), AppError> {
    validate_min_len(payload.username.trim(), "username")?;
    validate_min_len(&payload.password, "password")?;
    Ok(())
}

impl RegisterRequest {
    pub fn display_name(&self) -> Option<String> {
        non_blank(self.name.as_deref()).map(str::to_owned)
    }
}

/// Public view of a user. The password hash is never serialized.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    pub name: Option<String>,
    pub blogs: Vec<OwnedBlog>,
}

impl UserResponse {
    pub fn new(user: user::Model, blogs: Vec<blog::Model>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs: blogs.into_iter().map(OwnedBlog::from).collect(),
        }
    }
}

/// Request body for login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "salainen")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("username must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("password must not be empty".into()));
    }
    Ok(())
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    pub name: Option<String>,
}
