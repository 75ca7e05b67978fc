use axum::{
    extract::{rejection::QueryRejection, OriginalUri, Path, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Json, Redirect, Response},
    Form,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::forms::SetForm;
use crate::store::traits::Store;
use crate::store::StoreError;
use crate::views;

pub type AppState<S> = Arc<S>;

const SETS_PATH: &str = "/lego/sets";
const ADD_SET_PATH: &str = "/lego/addSet";

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Deserialize)]
pub struct SetsQuery {
    pub theme: Option<String>,
}

fn error_page(err: &impl std::fmt::Display, page: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        views::server_error(
            &format!("I'm sorry, but we have encountered the following error: {err}"),
            page,
        ),
    )
        .into_response()
}

fn not_found_page(status: StatusCode, message: &str, page: &str) -> Response {
    (status, views::not_found(message, page)).into_response()
}

pub async fn home() -> Html<String> {
    views::home()
}

pub async fn about() -> Html<String> {
    views::about()
}

pub async fn list_sets<S: Store>(
    State(store): State<AppState<S>>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<SetsQuery>, QueryRejection>,
) -> Response {
    let page = uri.to_string();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            log::warn!("Rejected query string for {page}: {rejection}");
            return not_found_page(
                StatusCode::BAD_REQUEST,
                &format!("Invalid query string: {}", rejection.body_text()),
                &page,
            );
        }
    };
    // Any non-empty value filters, whitespace included.
    let theme = query.theme.as_deref().filter(|theme| !theme.is_empty());

    let result = match theme {
        Some(theme) => store.get_sets_by_theme(theme).await,
        None => store.get_all_sets().await,
    };

    match result {
        Ok(sets) => views::sets(&sets, theme, &page).into_response(),
        Err(StoreError::NotFound(_)) => {
            let message = match theme {
                Some(theme) => format!("No LEGO sets found for theme: {theme}"),
                None => "No LEGO sets available".to_string(),
            };
            not_found_page(StatusCode::NOT_FOUND, &message, &page)
        }
        Err(err) => {
            log::error!("Error fetching LEGO sets: {err}");
            not_found_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unable to fetch LEGO sets. Please try again later.",
                &page,
            )
        }
    }
}

pub async fn get_set<S: Store>(
    State(store): State<AppState<S>>,
    OriginalUri(uri): OriginalUri,
    Path(set_num): Path<String>,
) -> Response {
    let page = uri.to_string();

    match store.get_set_by_num(&set_num).await {
        Ok(set) => views::set_detail(&set, &page).into_response(),
        Err(StoreError::NotFound(_)) => not_found_page(
            StatusCode::NOT_FOUND,
            &format!("No LEGO set found with number: {set_num}"),
            &page,
        ),
        Err(err) => {
            log::error!("Error fetching set #{set_num}: {err}");
            not_found_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unable to find the requested LEGO set. Please try again later.",
                &page,
            )
        }
    }
}

pub async fn add_set_form<S: Store>(State(store): State<AppState<S>>) -> Response {
    match store.get_all_themes().await {
        Ok(themes) => views::add_set(&themes, &SetForm::default(), None).into_response(),
        Err(err) => {
            log::error!("Unable to fetch themes: {err}");
            error_page(&err, ADD_SET_PATH)
        }
    }
}

pub async fn add_set<S: Store>(
    State(store): State<AppState<S>>,
    Form(form): Form<SetForm>,
) -> Response {
    let result = match form.validate() {
        Ok(data) => store.add_set(&data).await.map_err(|err| {
            let status = if err.is_validation() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                log::error!("Error adding set: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, err.message().to_string())
        }),
        Err(err) => Err((StatusCode::UNPROCESSABLE_ENTITY, err.to_string())),
    };

    let (status, message) = match result {
        Ok(()) => return Redirect::to(SETS_PATH).into_response(),
        Err(rejection) => rejection,
    };

    // Show the form again with what the caller typed.
    match store.get_all_themes().await {
        Ok(themes) => (status, views::add_set(&themes, &form, Some(&message))).into_response(),
        Err(err) => {
            log::error!("Unable to fetch themes after failed add: {err}");
            error_page(&message, ADD_SET_PATH)
        }
    }
}

pub async fn edit_set_form<S: Store>(
    State(store): State<AppState<S>>,
    OriginalUri(uri): OriginalUri,
    Path(set_num): Path<String>,
) -> Response {
    let page = uri.to_string();

    match tokio::try_join!(store.get_set_by_num(&set_num), store.get_all_themes()) {
        Ok((set, themes)) => views::edit_set(&set, &themes, &page).into_response(),
        Err(err) => {
            if !err.is_not_found() {
                log::error!("Error loading edit form for set #{set_num}: {err}");
            }
            not_found_page(StatusCode::NOT_FOUND, err.message(), &page)
        }
    }
}

pub async fn edit_set<S: Store>(
    State(store): State<AppState<S>>,
    Form(form): Form<SetForm>,
) -> Response {
    let data = match form.validate() {
        Ok(data) => data,
        Err(err) => return error_page(&err, "/lego/editSet"),
    };

    match store.edit_set(&data.set_num, &data).await {
        Ok(0) => {
            log::warn!("Edit of set #{} matched no rows", data.set_num);
            Redirect::to(SETS_PATH).into_response()
        }
        Ok(_) => Redirect::to(SETS_PATH).into_response(),
        Err(err) => {
            log::error!("Error editing set #{}: {err}", data.set_num);
            error_page(&err.message(), "/lego/editSet")
        }
    }
}

pub async fn delete_set<S: Store>(
    State(store): State<AppState<S>>,
    OriginalUri(uri): OriginalUri,
    Path(set_num): Path<String>,
) -> Response {
    match store.delete_set(&set_num).await {
        Ok(0) => {
            log::warn!("Delete of set #{set_num} matched no rows");
            Redirect::to(SETS_PATH).into_response()
        }
        Ok(_) => Redirect::to(SETS_PATH).into_response(),
        Err(err) => {
            log::error!("Error deleting set #{set_num}: {err}");
            error_page(&err.message(), &uri.to_string())
        }
    }
}

/// Fallback for any path no route or static file matched.
pub async fn not_found(uri: Uri) -> Response {
    let page = uri.to_string();
    not_found_page(
        StatusCode::NOT_FOUND,
        &format!("Page not found: {page}"),
        &page,
    )
}
