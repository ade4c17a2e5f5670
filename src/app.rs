use axum::{extract::Extension, routing::get, Router};
use std::sync::Arc;

use crate::controllers::{
    comment_controller::*, home_controller, method_not_allowed, movie_controller::*, not_found,
};
use crate::services::OrmService;

/// Routes of the API, not yet nested under the configured base path.
pub fn build_router(orm: Arc<OrmService>) -> Router {
    Router::new()
        .route("/", get(home_controller::index))
        .route(
            "/movies",
            get(load_movies)
                .post(add_movie)
                .fallback(method_not_allowed),
        )
        .route(
            "/movie/:id",
            get(load_movie)
                .put(update_movie)
                .delete(delete_movie)
                .fallback(method_not_allowed),
        )
        .route(
            "/movie/:id/comments",
            get(load_comments)
                .post(add_comment)
                .fallback(method_not_allowed),
        )
        .route(
            "/movie/:id/comment/:comment_id",
            get(load_comment)
                .put(update_comment)
                .delete(delete_comment)
                .fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(Extension(orm))
}
