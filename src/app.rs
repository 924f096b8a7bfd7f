use axum::{
    Json, Router,
    extract::{Path as AxumPath, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::charts;
use crate::columns::{ColumnMap, Field};
use crate::dataset::Dataset;
use crate::downloader;
use crate::filter::{evaluate_chain, SlotChoices, StepState};
use crate::images;
use crate::report::{assemble, ChartKind, ReportItem};
use crate::selection::{clamp_requests, SelectionSet};

/// Warning shown instead of the report when every slot came up empty.
const EMPTY_SELECTION_WARNING: &str =
    "Please make valid selections for all units to see a comparison.";

/// Server configuration, filled from command-line arguments.
#[derive(Clone, Debug)]
pub struct Config {
    pub data_path: PathBuf,
    pub images_dir: PathBuf,
    pub port: u16,
}

/// Shared state: the dataset is loaded once and never mutated, so it is
/// handed to every request without locking.
pub struct AppState {
    dataset: Dataset,
    map: ColumnMap,
    images_dir: PathBuf,
}

#[derive(Deserialize)]
struct CompareRequest {
    #[serde(default)]
    slots: Vec<SlotChoices>,
}

#[derive(Serialize)]
struct SlotChain {
    steps: Vec<StepState>,
    complete: bool,
}

#[derive(Serialize)]
struct ChainResponse {
    slots: Vec<SlotChain>,
}

#[derive(Serialize)]
struct ReportResponse {
    labels: Vec<String>,
    colors: Vec<&'static str>,
    logos: Vec<Option<String>>,
    photos: Vec<Option<String>>,
    items: Vec<ReportItem>,
}

#[derive(Deserialize)]
struct ImageQuery {
    file: String,
    width: Option<u32>,
}

/// Load the dataset and serve the dashboard until the process is stopped.
///
/// # Arguments
/// * `config` - Data file, images directory and port
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Runs until shutdown
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = Dataset::load(&config.data_path)?;
    log::info!(
        "loaded {} rows and {} columns from {}",
        dataset.row_count(),
        dataset.columns().len(),
        config.data_path.display()
    );
    let map = ColumnMap::resolve(&dataset);

    let images_dir = config.images_dir;
    let app_state = Arc::new(AppState {
        dataset,
        map,
        images_dir: images_dir.clone(),
    });

    let app = Router::new()
        .route("/", get(serve_dashboard))
        .route("/api/chain", post(chain_state))
        .route("/api/report", post(build_report))
        .route("/api/chart/:kind", post(render_chart))
        .route("/api/export", post(export_csv))
        .route("/api/image", get(serve_image))
        .nest_service("/images", ServeDir::new(images_dir))
        .with_state(app_state);

    let listener = TcpListener::bind(("127.0.0.1", config.port)).await?;
    log::info!("listening on http://127.0.0.1:{}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_dashboard() -> Html<&'static str> {
    Html(include_str!("./static/dashboard.html"))
}

/// Re-evaluate every slot's cascading dropdowns for the client.
async fn chain_state(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CompareRequest>,
) -> Json<ChainResponse> {
    let slots = clamp_requests(&payload.slots)
        .iter()
        .map(|choices| {
            let chain = evaluate_chain(&state.dataset, &state.map, choices);
            SlotChain {
                complete: chain.result_row().is_some(),
                steps: chain.steps,
            }
        })
        .collect();
    Json(ChainResponse { slots })
}

/// Assemble the full comparison report, or a warning when nothing matched.
async fn build_report(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CompareRequest>,
) -> Response {
    let selection = SelectionSet::build(&state.dataset, &state.map, &payload.slots);
    if selection.all_empty() {
        return Json(serde_json::json!({ "warning": EMPTY_SELECTION_WARNING })).into_response();
    }

    let n = selection.len();
    let logo_col = state.map.get(Field::BrandLogo);
    let photo_col = state.map.get(Field::UnitPhoto);
    let response = ReportResponse {
        labels: (0..n).map(|i| selection.label(i)).collect(),
        colors: (0..n).map(charts::slot_color).collect(),
        logos: (0..n)
            .map(|i| selection.cell_text(&state.dataset, i, logo_col))
            .collect(),
        photos: (0..n)
            .map(|i| selection.cell_text(&state.dataset, i, photo_col))
            .collect(),
        items: assemble(&state.dataset, &state.map, &selection),
    };
    Json(response).into_response()
}

/// Render one of the five derived charts as PNG.
async fn render_chart(
    AxumPath(kind): AxumPath<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CompareRequest>,
) -> Response {
    let Some(kind) = ChartKind::from_path(&kind) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let selection = SelectionSet::build(&state.dataset, &state.map, &payload.slots);

    match charts::render_chart(kind, &state.dataset, &state.map, &selection) {
        Ok(Some(png)) => png_response(png),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            log::warn!("chart {:?} failed to render: {}", kind, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Serve the comparison as a CSV download.
async fn export_csv(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CompareRequest>,
) -> Response {
    let selection = SelectionSet::build(&state.dataset, &state.map, &payload.slots);
    if selection.all_empty() {
        return (
            StatusCode::CONFLICT,
            Json(serde_json::json!({ "warning": EMPTY_SELECTION_WARNING })),
        )
            .into_response();
    }

    let csv = downloader::to_csv(&state.dataset, &state.map, &selection);
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", downloader::EXPORT_FILE_NAME),
        )
        .body(axum::body::Body::from(csv))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// Serve a resized brand logo or unit photo; a missing or corrupt asset
/// degrades to 404 and the client shows its placeholder text.
async fn serve_image(
    Query(params): Query<ImageQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let width = params.width.unwrap_or(150).clamp(16, 1200);
    match images::load_resized(&state.images_dir, &params.file, width) {
        Ok(png) => png_response(png),
        Err(e) => {
            log::warn!("image {:?} unavailable: {}", params.file, e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

fn png_response(png: Vec<u8>) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/png")
        .body(axum::body::Body::from(png))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
