use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{blog, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::blog::*;
use crate::state::AppState;
use crate::utils::blog_stats::BlogStats;

#[utoipa::path(
    get,
    path = "/",
    tag = "Blogs",
    operation_id = "listBlogs",
    summary = "List all blogs",
    description = "Returns every blog in creation order, each with its owner expanded to `{id, username, name}`.",
    responses(
        (status = 200, description = "List of blogs", body = Vec<BlogResponse>),
        (status = 500, description = "Unexpected failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_blogs(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let rows = blog::Entity::find()
        .find_also_related(user::Entity)
        .order_by_asc(blog::Column::CreatedAt)
        .order_by_asc(blog::Column::Id)
        .all(&state.db)
        .await?;

    let items = rows
        .into_iter()
        .map(|(blog, owner)| BlogResponse::new(blog, owner))
        .collect();

    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Blogs",
    operation_id = "createBlog",
    summary = "Create a new blog",
    description = "Creates a blog owned by the authenticated user. `likes` defaults to 0.",
    request_body = CreateBlogRequest,
    responses(
        (status = 201, description = "Blog created", body = BlogResponse),
        (status = 400, description = "Title or url missing, or invalid likes (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id))]
pub async fn create_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBlogRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_blog = validate_create_blog(payload)?;

    // The token may outlive its user.
    let owner = user::Entity::find_by_id(auth_user.user_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::TokenInvalid)?;

    let model = blog::ActiveModel {
        id: Set(Uuid::now_v7()),
        title: Set(new_blog.title),
        author: Set(new_blog.author),
        url: Set(new_blog.url),
        likes: Set(new_blog.likes),
        user_id: Set(owner.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    tracing::info!(blog_id = %model.id, "Blog created");

    Ok((
        StatusCode::CREATED,
        Json(BlogResponse::new(model, Some(owner))),
    ))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "updateBlog",
    summary = "Update a blog's like count",
    description = "Sets `likes` on the blog. Any other fields in the body are ignored. No authentication is required.",
    params(("id" = Uuid, Path, description = "Blog ID")),
    request_body = UpdateLikesRequest,
    responses(
        (status = 200, description = "Blog updated", body = BlogResponse),
        (status = 400, description = "Invalid likes (VALIDATION_ERROR) or malformed id (MALFORMED_ID)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_blog(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateLikesRequest>,
) -> Result<Json<BlogResponse>, AppError> {
    validate_update_likes(&payload)?;

    let txn = state.db.begin().await?;

    let existing = find_blog_for_update(&txn, id).await?;
    let mut active: blog::ActiveModel = existing.into();
    active.likes = Set(payload.likes);
    let model = active.update(&txn).await?;

    let owner = user::Entity::find_by_id(model.user_id).one(&txn).await?;
    txn.commit().await?;

    Ok(Json(BlogResponse::new(model, owner)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Blogs",
    operation_id = "deleteBlog",
    summary = "Delete a blog",
    description = "Deletes the blog. Only the user who created it may delete it.",
    params(("id" = Uuid, Path, description = "Blog ID")),
    responses(
        (status = 204, description = "Blog deleted"),
        (status = 400, description = "Malformed id (MALFORMED_ID)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, NOT_OWNER)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn delete_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    let blog = find_blog_for_update(&txn, id).await?;
    auth_user.require_owner(blog.user_id)?;

    blog::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!("Blog deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Blogs",
    operation_id = "blogStats",
    summary = "Aggregate statistics over all blogs",
    description = "Total likes, the most-liked blog, the author with the most blogs and the author with the most likes. Ties go to whichever came first in creation order.",
    responses(
        (status = 200, description = "Blog statistics", body = BlogStats),
        (status = 500, description = "Unexpected failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn blog_stats(State(state): State<AppState>) -> Result<Json<BlogStats>, AppError> {
    let blogs = blog::Entity::find()
        .order_by_asc(blog::Column::CreatedAt)
        .order_by_asc(blog::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(BlogStats::from_blogs(&blogs)))
}

async fn find_blog_for_update<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<blog::Model, AppError> {
    blog::Entity::find_by_id(id)
        .lock_exclusive()
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".into()))
}
