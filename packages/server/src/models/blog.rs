use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{blog, user};
use crate::error::AppError;

use super::shared::{non_blank, validate_likes};

/// Request body for creating a blog.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateBlogRequest {
    #[schema(example = "Canonical string reduction")]
    pub title: Option<String>,
    #[schema(example = "Edsger W. Dijkstra")]
    pub author: Option<String>,
    #[schema(example = "http://www.cs.utexas.edu/~EWD/transcriptions/EWD08xx/EWD808.html")]
    pub url: Option<String>,
    /// Defaults to 0 when absent.
    #[schema(example = 12)]
    pub likes: Option<i64>,
}

/// A validated `CreateBlogRequest`.
#[derive(Debug, PartialEq)]
pub struct NewBlog {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
}

pub fn validate_create_blog(payload: CreateBlogRequest) -> Result<NewBlog, AppError> {
    let (Some(title), Some(url)) = (
        non_blank(payload.title.as_deref()),
        non_blank(payload.url.as_deref()),
    ) else {
        return Err(AppError::Validation("title or url missing".into()));
    };

    let likes = payload.likes.unwrap_or(0);
    validate_likes(likes)?;

    Ok(NewBlog {
        title: title.to_owned(),
        author: non_blank(payload.author.as_deref()).map(str::to_owned),
        url: url.to_owned(),
        likes,
    })
}

/// Request body for updating a blog's like count. Other fields are ignored.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateLikesRequest {
    #[schema(example = 13)]
    pub likes: i64,
}

pub fn validate_update_likes(payload: &UpdateLikesRequest) -> Result<(), AppError> {
    validate_likes(payload.likes)
}

/// Owner of a blog as embedded in blog responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogOwner {
    pub id: Uuid,
    #[schema(example = "mluukkai")]
    pub username: String,
    #[schema(example = "Matti Luukkainen")]
    pub name: Option<String>,
}

impl From<user::Model> for BlogOwner {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    /// `None` only if the owning user row is gone.
    pub user: Option<BlogOwner>,
    pub created_at: DateTime<Utc>,
}

impl BlogResponse {
    pub fn new(blog: blog::Model, owner: Option<user::Model>) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: owner.map(BlogOwner::from),
            created_at: blog.created_at,
        }
    }
}

/// Blog as embedded in user responses, without its owner.
#[derive(Serialize, utoipa::ToSchema)]
pub struct OwnedBlog {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
}

impl From<blog::Model> for OwnedBlog {
    fn from(blog: blog::Model) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
        }
    }
}
