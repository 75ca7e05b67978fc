use axum::{
    handler::HandlerWithoutStateExt,
    middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::api::{handlers, request_log};
use crate::store::traits::Store;

/// Build the application router. Paths no route matches are served from
/// `static_dir` when a file exists there, otherwise they get the 404 page.
pub fn create_router<S: Store + 'static>(static_dir: impl AsRef<Path>) -> Router<Arc<S>> {
    let static_files = ServeDir::new(static_dir.as_ref())
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(handlers::not_found.into_service());

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Pages
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        // Catalog
        .route("/lego/sets", get(handlers::list_sets::<S>))
        .route("/lego/sets/:set_num", get(handlers::get_set::<S>))
        .route(
            "/lego/addSet",
            get(handlers::add_set_form::<S>).post(handlers::add_set::<S>),
        )
        .route("/lego/editSet", post(handlers::edit_set::<S>))
        .route("/lego/editSet/:num", get(handlers::edit_set_form::<S>))
        .route("/lego/deleteSet/:num", get(handlers::delete_set::<S>))
        .fallback_service(static_files)
        .layer(middleware::from_fn(request_log::log_request))
}
