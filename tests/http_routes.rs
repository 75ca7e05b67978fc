use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use lego_catalog::model::{SetData, Theme};
use lego_catalog::routes::create_router;
use lego_catalog::store::traits::SetStore;
use lego_catalog::MemoryStore;
use tower::ServiceExt;

fn app_with(store: Arc<MemoryStore>) -> Router {
    create_router::<MemoryStore>("tests/no-static-files").with_state(store)
}

fn store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_themes([
        Theme::new(1, "Star Wars"),
        Theme::new(2, "City"),
    ]))
}

fn x_wing() -> SetData {
    SetData {
        set_num: "9493".to_string(),
        name: "X-Wing".to_string(),
        year: 2020,
        num_parts: 500,
        theme_id: 1,
        img_url: "http://x/y.png".to_string(),
    }
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_form(app: Router, uri: &str, body: &str) -> axum::response::Response {
    app.oneshot(
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn home_and_about_render() {
    let (status, html) = get(app_with(store()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("LEGO Collection"));

    let (status, html) = get(app_with(store()), "/about").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h1>About</h1>"));
}

#[tokio::test]
async fn added_set_is_listed_and_viewable() {
    let store = store();
    let response = post_form(
        app_with(store.clone()),
        "/lego/addSet",
        "name=X-Wing&year=2020&theme_id=1&num_parts=500&set_num=9493&img_url=http://x/y.png",
    )
    .await;

    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/lego/sets");

    let (status, html) = get(app_with(store.clone()), "/lego/sets/9493").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h1>X-Wing</h1>"));
    assert!(html.contains("Star Wars"));

    assert_eq!(store.get_set_by_num("9493").await.unwrap().data(), x_wing());
}

#[tokio::test]
async fn add_with_missing_field_keeps_submitted_values() {
    let store = store();
    let response = post_form(
        app_with(store.clone()),
        "/lego/addSet",
        "name=X-Wing&year=2020&theme_id=1&set_num=9493&img_url=http://x/y.png",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("num_parts is required"));
    assert!(html.contains(r#"name="name" value="X-Wing""#));
    assert!(html.contains(r#"<option value="1" selected>Star Wars</option>"#));
    assert!(store.get_set_by_num("9493").await.is_err());
}

#[tokio::test]
async fn add_with_non_numeric_year_is_rejected() {
    let response = post_form(
        app_with(store()),
        "/lego/addSet",
        "name=X-Wing&year=soon&theme_id=1&num_parts=500&set_num=9493&img_url=http://x/y.png",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("Invalid numeric value provided"));
    assert!(html.contains(r#"name="year" value="soon""#));
}

#[tokio::test]
async fn add_with_unknown_theme_reports_foreign_key_violation() {
    let store = store();
    let response = post_form(
        app_with(store.clone()),
        "/lego/addSet",
        "name=X-Wing&year=2020&theme_id=99&num_parts=500&set_num=9493&img_url=http://x/y.png",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("foreign key"));
    assert!(store.get_set_by_num("9493").await.is_err());
}

#[tokio::test]
async fn theme_filter_matches_case_insensitively() {
    let store = store();
    store.add_set(&x_wing()).await.unwrap();

    let (status, html) = get(app_with(store.clone()), "/lego/sets?theme=star%20WARS").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("X-Wing"));

    let (status, html) = get(app_with(store), "/lego/sets?theme=ninjago").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("No LEGO sets found for theme: ninjago"));
    assert!(html.contains("/lego/sets?theme=ninjago"));
}

#[tokio::test]
async fn whitespace_theme_filter_is_applied_verbatim() {
    let store = store();
    store
        .add_set(&SetData {
            set_num: "60215".to_string(),
            name: "Fire Station".to_string(),
            theme_id: 2,
            ..x_wing()
        })
        .await
        .unwrap();

    // "City" has no space in it, so nothing matches.
    let (status, html) = get(app_with(store.clone()), "/lego/sets?theme=%20").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("No LEGO sets found for theme:"));

    store.add_set(&x_wing()).await.unwrap();
    let (status, html) = get(app_with(store.clone()), "/lego/sets?theme=%20").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("X-Wing"));
    assert!(!html.contains("Fire Station"));

    let (status, html) = get(app_with(store), "/lego/sets?theme=").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Fire Station"));
}

#[tokio::test]
async fn malformed_query_renders_not_found_view() {
    let store = store();
    store.add_set(&x_wing()).await.unwrap();

    let (status, html) = get(app_with(store), "/lego/sets?theme=city&theme=star").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("<h1>404</h1>"));
    assert!(html.contains("Invalid query string"));
    assert!(!html.contains("X-Wing"));
}

#[tokio::test]
async fn empty_catalog_is_not_found() {
    let (status, html) = get(app_with(store()), "/lego/sets").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("No LEGO sets available"));
}

#[tokio::test]
async fn unknown_set_number_is_not_found() {
    let (status, html) = get(app_with(store()), "/lego/sets/0000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("No LEGO set found with number: 0000"));
}

#[tokio::test]
async fn add_form_lists_themes_by_name() {
    let (status, html) = get(app_with(store()), "/lego/addSet").await;
    assert_eq!(status, StatusCode::OK);

    let city = html.find(">City</option>").unwrap();
    let star_wars = html.find(">Star Wars</option>").unwrap();
    assert!(city < star_wars);
}

#[tokio::test]
async fn edit_form_is_prefilled() {
    let store = store();
    store.add_set(&x_wing()).await.unwrap();

    let (status, html) = get(app_with(store.clone()), "/lego/editSet/9493").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"name="num_parts" value="500""#));

    let (status, _) = get(app_with(store), "/lego/editSet/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edit_updates_name_only() {
    let store = store();
    store.add_set(&x_wing()).await.unwrap();

    let response = post_form(
        app_with(store.clone()),
        "/lego/editSet",
        "name=T-65+X-Wing&year=2020&theme_id=1&num_parts=500&set_num=9493&img_url=http://x/y.png",
    )
    .await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/lego/sets");

    let updated = store.get_set_by_num("9493").await.unwrap();
    assert_eq!(updated.name, "T-65 X-Wing");
    assert_eq!(
        updated.data(),
        SetData {
            name: "T-65 X-Wing".to_string(),
            ..x_wing()
        }
    );
}

#[tokio::test]
async fn edit_with_unknown_theme_renders_error_page() {
    let store = store();
    store.add_set(&x_wing()).await.unwrap();

    let response = post_form(
        app_with(store.clone()),
        "/lego/editSet",
        "name=X-Wing&year=2020&theme_id=42&num_parts=500&set_num=9493&img_url=http://x/y.png",
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(response).await.contains("foreign key"));
    assert_eq!(store.get_set_by_num("9493").await.unwrap().theme_id, 1);
}

#[tokio::test]
async fn delete_removes_set() {
    let store = store();
    store.add_set(&x_wing()).await.unwrap();

    let response = app_with(store.clone())
        .oneshot(Request::get("/lego/deleteSet/9493").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/lego/sets");

    let (status, _) = get(app_with(store), "/lego/sets/9493").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_missing_set_still_redirects() {
    let response = app_with(store())
        .oneshot(Request::get("/lego/deleteSet/ghost").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.status().is_redirection());
}

#[tokio::test]
async fn unmatched_route_renders_not_found_page() {
    let (status, html) = get(app_with(store()), "/no/such/page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Page not found: /no/such/page"));
}

#[tokio::test]
async fn health_check_reports_healthy() {
    let (status, body) = get(app_with(store()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}
