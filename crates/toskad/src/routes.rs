//! HTTP routes for toskad
//!
//! The chat page is the original surface: GET renders the greeting, POST
//! takes the `userInput` form field and re-renders the page with the reply.
//! The JSON endpoints expose the menu table directly.

use crate::assets;
use crate::server::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use toska_common::api::{HealthResponse, MenuItemBody, NewMenuItem};
use toska_common::chat::escape_html;
use toska_common::menu::MenuItem;
use tracing::{error, info};

type AppStateArc = Arc<AppState>;

// ============================================================================
// Chat Routes
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(rename = "userInput")]
    pub user_input: String,
}

pub fn chat_routes() -> Router<AppStateArc> {
    Router::new().route("/", get(chat_page).post(chat_submit))
}

async fn chat_page(State(state): State<AppStateArc>) -> Html<String> {
    let greeting = format!("<p>{}</p>", escape_html(&state.greeting));
    Html(assets::render_chat_page(&greeting))
}

async fn chat_submit(
    State(state): State<AppStateArc>,
    Form(form): Form<ChatForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    info!("[Q] {}", form.user_input);

    // Inference is CPU-bound; keep it off the async runtime.
    let state_for_reply = state.clone();
    let input = form.user_input.clone();
    let reply = tokio::task::spawn_blocking(move || state_for_reply.chat.reply(&input))
        .await
        .map_err(|e| {
            error!("Chat task panicked: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
        .map_err(|e| {
            error!("Chat reply failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    Ok(Html(assets::render_chat_page(&reply.html)))
}

// ============================================================================
// Menu API Routes
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

pub fn menu_api_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/menu", get(api_menu))
        .route("/api/search", get(api_search))
        .route("/v1/menu", post(api_add_menu_item))
}

async fn api_menu(
    State(state): State<AppStateArc>,
) -> Result<Json<Vec<MenuItemBody>>, (StatusCode, String)> {
    let items = state.store.list().map_err(|e| {
        error!("Menu listing failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(Json(items.into_iter().map(MenuItemBody::from).collect()))
}

async fn api_search(
    State(state): State<AppStateArc>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<MenuItemBody>>, (StatusCode, String)> {
    let items = state.store.search(&params.query).map_err(|e| {
        error!("Menu search failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(Json(items.into_iter().map(MenuItemBody::from).collect()))
}

async fn api_add_menu_item(
    State(state): State<AppStateArc>,
    Json(req): Json<NewMenuItem>,
) -> Result<(StatusCode, Json<MenuItem>), (StatusCode, String)> {
    if req.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "name must not be empty".to_string()));
    }
    if req.price < 0 {
        return Err((StatusCode::BAD_REQUEST, "price must not be negative".to_string()));
    }

    let id = state
        .store
        .insert(&req.name, req.price, &req.description)
        .map_err(|e| {
            error!("Menu insert failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    info!("Menu item #{} added: {}", id, req.name);

    // The stored row, id included, so callers can reference it later.
    Ok((
        StatusCode::CREATED,
        Json(MenuItem {
            id,
            name: req.name,
            price: req.price,
            description: req.description,
        }),
    ))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(
    State(state): State<AppStateArc>,
) -> Result<Json<HealthResponse>, (StatusCode, String)> {
    let menu_items = state
        .store
        .count()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        menu_items,
        model_loaded: state.chat.model_loaded(),
    }))
}

// ============================================================================
// Static Routes
// ============================================================================

pub fn static_routes() -> Router<AppStateArc> {
    Router::new().route("/static/style.css", get(assets::serve_css))
}

#[cfg(test)]
mod tests {
    use super::*;
    use toska_common::{ChatEngine, MenuStore, ToskaConfig};

    fn test_state() -> AppStateArc {
        let store = Arc::new(MenuStore::open_in_memory().unwrap());
        store.insert("Margherita Pizza", 180, "Classic").unwrap();
        let chat = ChatEngine::new(store.clone(), None, &ToskaConfig::default());
        Arc::new(AppState::new(store, chat, "hello".to_string()))
    }

    #[tokio::test]
    async fn menu_endpoint_returns_inserted_row() {
        let state = test_state();
        let Json(items) = api_menu(State(state)).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Margherita Pizza");
        assert_eq!(items[0].price, 180);
    }

    #[tokio::test]
    async fn search_endpoint_filters_by_substring() {
        let state = test_state();
        state.store.insert("Caesar Salad", 95, "Fresh").unwrap();

        let Json(items) = api_search(
            State(state),
            Query(SearchParams {
                query: "Pizza".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Margherita Pizza");
    }

    #[tokio::test]
    async fn add_endpoint_rejects_empty_name() {
        let state = test_state();
        let result = api_add_menu_item(
            State(state),
            Json(NewMenuItem {
                name: "  ".to_string(),
                price: 10,
                description: "x".to_string(),
            }),
        )
        .await;
        assert!(matches!(result, Err((StatusCode::BAD_REQUEST, _))));
    }

    #[tokio::test]
    async fn add_endpoint_returns_stored_row_with_id() {
        let state = test_state();
        let (status, Json(body)) = api_add_menu_item(
            State(state.clone()),
            Json(NewMenuItem {
                name: "Tiramisu".to_string(),
                price: 70,
                description: "House dessert".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.name, "Tiramisu");
        assert_eq!(state.store.count().unwrap(), 2);

        // The response carries the surrogate id of the row just inserted.
        let stored = state
            .store
            .list()
            .unwrap()
            .into_iter()
            .find(|item| item.name == "Tiramisu")
            .unwrap();
        assert_eq!(body.id, stored.id);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["id"], stored.id);
    }

    #[tokio::test]
    async fn health_reports_counts_and_model_state() {
        let state = test_state();
        let Json(health) = health_check(State(state)).await.unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.menu_items, 1);
        assert!(!health.model_loaded);
    }

    #[tokio::test]
    async fn chat_submit_with_trigger_keyword_lists_menu() {
        let state = test_state();
        let Html(page) = chat_submit(
            State(state),
            Form(ChatForm {
                user_input: "what is on the menu?".to_string(),
            }),
        )
        .await
        .unwrap();
        assert!(page.contains("Margherita Pizza"));
        assert!(page.contains("<ul>"));
    }

    #[tokio::test]
    async fn chat_page_shows_greeting() {
        let state = test_state();
        let Html(page) = chat_page(State(state)).await;
        assert!(page.contains("hello"));
    }
}
