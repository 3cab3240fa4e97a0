//! HTTP surface: extraction trigger, save flow, chef reads.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;
use crate::model::{Chef, ExtractedRecipe, RecipeRow};
use crate::persist::save_recipe;
use crate::providers::GenerativeProvider;
use crate::store::RecipeStore;
use crate::transcript::CaptionClient;

/// Shared service handles, constructed once at startup and injected into
/// every handler. No global singletons.
#[derive(Clone)]
pub struct AppState {
    pub captions: CaptionClient,
    pub provider: Arc<dyn GenerativeProvider>,
    pub store: Arc<dyn RecipeStore>,
    pub locale: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ExtractError {
    fn status_code(&self) -> StatusCode {
        match self {
            ExtractError::UrlRequired
            | ExtractError::InvalidReference
            | ExtractError::NotARecipe { .. } => StatusCode::BAD_REQUEST,
            ExtractError::ChefNotFound(_) => StatusCode::NOT_FOUND,
            ExtractError::InvalidShape(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ExtractError::TranscriptUnavailable(_)
            | ExtractError::ExtractionService(_)
            | ExtractError::MalformedExtraction { .. }
            | ExtractError::Persistence { .. }
            | ExtractError::Store(_)
            | ExtractError::Http(_)
            | ExtractError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ExtractError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Raw upstream diagnostics are logged here, never returned: the
        // Display impls carry only short human-readable reasons.
        match &self {
            ExtractError::MalformedExtraction { raw } => {
                error!("Unparseable extraction output: {raw}");
            }
            other if status.is_server_error() => {
                error!("Request failed: {other}");
            }
            _ => {}
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct ExtractRequest {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SaveRequest {
    chef_id: String,
    recipe: ExtractedRecipe,
}

#[derive(Debug, Serialize)]
struct SaveResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ChefsQuery {
    #[serde(default = "default_chef_limit")]
    limit: u32,
}

fn default_chef_limit() -> u32 {
    50
}

/// `POST /api/extract` — run the full extraction pipeline for one URL.
async fn extract_handler(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractedRecipe>, ExtractError> {
    let url = request.url.as_deref().map(str::trim).unwrap_or("");
    if url.is_empty() {
        return Err(ExtractError::UrlRequired);
    }

    let recipe = crate::extract_recipe(
        url,
        &state.captions,
        state.provider.as_ref(),
        &state.locale,
    )
    .await?;
    info!("Extracted recipe \"{}\" from {}", recipe.title, url);
    Ok(Json(recipe))
}

/// `POST /api/recipes` — persist an extracted recipe for an explicitly
/// chosen chef.
async fn save_handler(
    State(state): State<AppState>,
    Json(request): Json<SaveRequest>,
) -> Result<(StatusCode, Json<SaveResponse>), ExtractError> {
    let id = save_recipe(state.store.as_ref(), &request.recipe, &request.chef_id).await?;
    Ok((StatusCode::CREATED, Json(SaveResponse { id })))
}

/// `GET /api/chefs` — chef list for the owner-selection step.
async fn list_chefs_handler(
    State(state): State<AppState>,
    Query(query): Query<ChefsQuery>,
) -> Result<Json<Vec<Chef>>, ExtractError> {
    let chefs = state.store.list_chefs(query.limit).await?;
    Ok(Json(chefs))
}

/// `GET /api/chefs/:id/recipes` — a chef's recipes, newest first.
async fn chef_recipes_handler(
    State(state): State<AppState>,
    Path(chef_id): Path<String>,
) -> Result<Json<Vec<RecipeRow>>, ExtractError> {
    let recipes = state.store.recipes_for_chef(&chef_id).await?;
    Ok(Json(recipes))
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/extract", post(extract_handler))
        .route("/api/recipes", post(save_handler))
        .route("/api/chefs", get(list_chefs_handler))
        .route("/api/chefs/:id/recipes", get(chef_recipes_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: AppState, bind_addr: &str) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on {bind_addr}");
    axum::serve(listener, router(state)).await
}
