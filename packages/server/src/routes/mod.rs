use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/blogs", blog_routes())
        .nest("/stats", stats_routes())
        .nest("/users", user_routes())
        .nest("/login", login_routes())
}

fn blog_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::blog::list_blogs,
            handlers::blog::create_blog
        ))
        .routes(routes!(
            handlers::blog::update_blog,
            handlers::blog::delete_blog
        ))
}

fn stats_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::blog::blog_stats))
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::user::list_users,
        handlers::user::create_user
    ))
}

fn login_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::auth::login))
}
