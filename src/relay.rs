//! HTTP relay that keeps provider credentials on the server.
//!
//! Browsers `POST /api/hfRecipe` with `{"ingredients": [...]}` and get back
//! `{"recipe": "..."}`. Bad input is rejected before any upstream call.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use log::{error, info, warn};
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::error::RecipeError;
use crate::providers::{ProviderFactory, RecipeProvider};

pub const RELAY_PATH: &str = "/api/hfRecipe";

#[derive(Clone)]
struct RelayState {
    provider: Arc<dyn RecipeProvider>,
}

/// Build the relay router around a provider
pub fn router(provider: Arc<dyn RecipeProvider>) -> Router {
    Router::new()
        .route(
            RELAY_PATH,
            post(suggest_recipe).fallback(method_not_allowed),
        )
        .with_state(RelayState { provider })
}

/// Bind the configured address and serve the relay until the process exits
pub async fn serve(config: &AppConfig, provider_name: Option<&str>) -> Result<(), RecipeError> {
    let provider: Arc<dyn RecipeProvider> =
        ProviderFactory::from_config(config, provider_name)?.into();
    let addr: SocketAddr = format!("{}:{}", config.relay.host, config.relay.port)
        .parse()
        .map_err(|e| RecipeError::Provider(format!("Invalid relay address: {}", e)))?;

    info!(
        "Recipe relay listening on {} (provider: {})",
        addr,
        provider.provider_name()
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(provider)).await?;
    Ok(())
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

async fn method_not_allowed() -> Response {
    message(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

/// Pull a non-empty list of strings out of the request body
fn parse_ingredients(body: &[u8]) -> Option<Vec<String>> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let items = value.get("ingredients")?.as_array()?;
    let ingredients = items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()?;

    if ingredients.is_empty() {
        None
    } else {
        Some(ingredients)
    }
}

async fn suggest_recipe(State(state): State<RelayState>, body: Bytes) -> Response {
    let Some(ingredients) = parse_ingredients(&body) else {
        warn!("Rejected relay request with invalid ingredients data");
        return message(StatusCode::BAD_REQUEST, "Invalid ingredients data");
    };

    match state.provider.suggest_recipe(&ingredients).await {
        Ok(recipe) => (StatusCode::OK, Json(json!({ "recipe": recipe }))).into_response(),
        Err(e) => {
            error!("Error fetching recipe: {}", e);
            message(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}
