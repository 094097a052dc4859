//! Web API module for ChromaEuclid.
//!
//! This module provides a REST API for the palette explorer and serves the
//! embedded single-page frontend.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/harmonies` - List harmony rules
//! - `GET /api/palette` - Palette for a base color (`?h&s&l` or `?hex`) and `?harmony`
//! - `GET /api/convert` - Convert `?hex` to HSL or `?h&s&l` to hex
//! - `GET /api/tiles` - Subdivide the canvas (`?colors&seed&depth`)
//! - `GET /api/canvas` - Palette and tiles together
//! - `GET /api/canvas.svg` - Rendered canvas
//! - `GET /api/explorer` - Current explorer state
//! - `PUT /api/explorer` - Update base color, harmony, or seed
//! - `POST /api/explorer/shuffle` - Redraw the canvas
//! - `POST /api/explorer/suggest` - Apply an AI suggestion for a mood

pub mod static_files;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::app::explorer::FAILURE_MESSAGE;
use crate::app::{ExplorerSnapshot, ExplorerState, SuggestionRejected};
use crate::config::Config;
use crate::constants::APP_NAME;
use crate::export::{render_svg, SvgOptions};
use crate::models::{HarmonyRule, HexColor, Hsl, Palette, RgbColor, Tile};
use crate::services::harmony::build_palette_by_name;
use crate::services::{SuggestionClient, SuggestionError, TileGenerator};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// The explorer; never locked across an await point
    explorer: Arc<Mutex<ExplorerState>>,
    /// AI suggestion client
    suggestions: Arc<SuggestionClient>,
}

impl AppState {
    /// Creates a new application state from configuration.
    ///
    /// The API key is resolved from the config file or the environment.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let suggestions = SuggestionClient::new(config.suggestion_config())?;
        let generator = TileGenerator::with_depth(config.explorer.depth)?;
        let explorer = ExplorerState::new(
            config.explorer.base(),
            config.explorer.harmony,
            generator,
            suggestions.is_enabled(),
        );

        Ok(Self {
            config: Arc::new(config),
            explorer: Arc::new(Mutex::new(explorer)),
            suggestions: Arc::new(suggestions),
        })
    }

    /// Locks the explorer state.
    ///
    /// A poisoned lock is recovered: the state holds plain values that stay
    /// consistent between method calls.
    pub fn explorer(&self) -> MutexGuard<'_, ExplorerState> {
        self.explorer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Harmony rule description.
#[derive(Debug, Serialize)]
pub struct HarmonyInfo {
    /// Rule id used in requests.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Number of colors the rule produces.
    pub colors: usize,
}

/// Base color and rule selection shared by the palette endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ColorQuery {
    /// Hue in degrees.
    pub h: Option<f64>,
    /// Saturation percentage.
    pub s: Option<f64>,
    /// Lightness percentage.
    pub l: Option<f64>,
    /// Hex color, as an alternative to `h`/`s`/`l`.
    pub hex: Option<String>,
    /// Harmony rule name.
    pub harmony: Option<String>,
}

/// Query parameters for tile generation.
#[derive(Debug, Default, Deserialize)]
pub struct TilesQuery {
    /// Palette size.
    pub colors: Option<usize>,
    /// Random seed.
    pub seed: Option<u64>,
    /// Subdivision depth.
    pub depth: Option<u32>,
}

/// Query parameters for canvas endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct CanvasQuery {
    /// Hue in degrees.
    pub h: Option<f64>,
    /// Saturation percentage.
    pub s: Option<f64>,
    /// Lightness percentage.
    pub l: Option<f64>,
    /// Hex color, as an alternative to `h`/`s`/`l`.
    pub hex: Option<String>,
    /// Harmony rule name.
    pub harmony: Option<String>,
    /// Random seed.
    pub seed: Option<u64>,
    /// Subdivision depth.
    pub depth: Option<u32>,
    /// Pixel width attribute for SVG output.
    pub width: Option<u32>,
    /// Pixel height attribute for SVG output.
    pub height: Option<u32>,
}

impl CanvasQuery {
    fn color_query(&self) -> ColorQuery {
        ColorQuery {
            h: self.h,
            s: self.s,
            l: self.l,
            hex: self.hex.clone(),
            harmony: self.harmony.clone(),
        }
    }
}

/// Conversion result.
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    /// Hex form.
    pub hex: HexColor,
    /// HSL form.
    pub hsl: Hsl,
    /// RGB channels.
    pub rgb: RgbColor,
}

/// Tile generation result.
#[derive(Debug, Serialize)]
pub struct TilesResponse {
    /// Seed used.
    pub seed: u64,
    /// Depth used.
    pub depth: u32,
    /// Palette size.
    pub colors: usize,
    /// Generated tiles.
    pub tiles: Vec<Tile>,
}

/// Palette and tiles for one canvas.
#[derive(Debug, Serialize)]
pub struct CanvasResponse {
    /// Palette the tiles index into.
    pub palette: Palette,
    /// Seed used.
    pub seed: u64,
    /// Depth used.
    pub depth: u32,
    /// Generated tiles.
    pub tiles: Vec<Tile>,
}

/// Explorer state with the one-time credential notice.
#[derive(Debug, Serialize)]
pub struct ExplorerResponse {
    /// Current state.
    #[serde(flatten)]
    pub state: ExplorerSnapshot,
    /// Notice shown once when AI suggestions are unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
}

/// HSL values in a request body.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HslInput {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation percentage.
    pub s: f64,
    /// Lightness percentage.
    pub l: f64,
}

/// Explorer update request; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerUpdateRequest {
    /// New base color as HSL.
    pub base: Option<HslInput>,
    /// New base color as hex.
    pub base_hex: Option<String>,
    /// New harmony rule.
    pub harmony: Option<String>,
    /// New canvas seed.
    pub seed: Option<u64>,
}

/// AI suggestion request.
#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    /// Free-text mood.
    pub mood: String,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn bad_request(error: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (StatusCode::BAD_REQUEST, Json(ApiError::new(error)))
}

// ============================================================================
// Input Helpers
// ============================================================================

/// Validates HSL components and builds the color.
fn hsl_from_parts(h: f64, s: f64, l: f64) -> Result<Hsl, ApiError> {
    if !(0.0..=360.0).contains(&h) {
        return Err(ApiError::new(format!("Hue {h} out of range (0-360)")));
    }
    if !(0.0..=100.0).contains(&s) {
        return Err(ApiError::new(format!("Saturation {s} out of range (0-100)")));
    }
    if !(0.0..=100.0).contains(&l) {
        return Err(ApiError::new(format!("Lightness {l} out of range (0-100)")));
    }
    Ok(Hsl::new(h, s, l))
}

/// Resolves the base color from a query, falling back to `default`.
fn resolve_base(query: &ColorQuery, default: Hsl) -> Result<Hsl, ApiError> {
    let has_hsl = query.h.is_some() || query.s.is_some() || query.l.is_some();

    match (&query.hex, has_hsl) {
        (Some(_), true) => Err(ApiError::new("Specify either hex or h/s/l, not both")),
        (Some(hex), false) => Hsl::parse_hex(hex)
            .map_err(|e| ApiError::with_details("Invalid hex color", format!("{e:#}"))),
        (None, true) => match (query.h, query.s, query.l) {
            (Some(h), Some(s), Some(l)) => hsl_from_parts(h, s, l),
            _ => Err(ApiError::new("h, s and l must be given together")),
        },
        (None, false) => Ok(default),
    }
}

fn tile_generator(depth: u32) -> Result<TileGenerator, ApiError> {
    TileGenerator::with_depth(depth).map_err(|e| ApiError::new(format!("{e:#}")))
}

/// Builds the palette and tiles for a canvas query.
fn build_canvas(state: &AppState, query: &CanvasQuery) -> ApiResult<CanvasResponse> {
    let defaults = &state.config.explorer;
    let color_query = query.color_query();
    let base = resolve_base(&color_query, defaults.base())
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?;
    let rule_name = color_query
        .harmony
        .unwrap_or_else(|| defaults.harmony.id().to_string());
    let palette = build_palette_by_name(base, &rule_name);

    let depth = query.depth.unwrap_or(defaults.depth);
    let generator = tile_generator(depth).map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?;
    let seed = query.seed.unwrap_or_else(rand::random);
    let tiles = generator.generate_seeded(palette.len(), seed);

    Ok(CanvasResponse {
        palette,
        seed,
        depth,
        tiles,
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/harmonies - List harmony rules.
async fn list_harmonies() -> Json<Vec<HarmonyInfo>> {
    Json(
        HarmonyRule::all()
            .iter()
            .map(|rule| HarmonyInfo {
                id: rule.id(),
                name: rule.display_name(),
                colors: rule.color_count(),
            })
            .collect(),
    )
}

/// GET /api/palette - Generate a palette.
///
/// An unknown harmony name degrades to the base color alone.
async fn get_palette(
    State(state): State<AppState>,
    Query(query): Query<ColorQuery>,
) -> ApiResult<Json<Palette>> {
    let defaults = &state.config.explorer;
    let base =
        resolve_base(&query, defaults.base()).map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?;
    let rule_name = query
        .harmony
        .unwrap_or_else(|| defaults.harmony.id().to_string());

    Ok(Json(build_palette_by_name(base, &rule_name)))
}

/// GET /api/convert - Convert between hex and HSL.
async fn convert_color(Query(query): Query<ColorQuery>) -> ApiResult<Json<ConvertResponse>> {
    let has_input = query.hex.is_some() || query.h.is_some() || query.s.is_some() || query.l.is_some();
    if !has_input {
        return Err(bad_request("Provide hex or h, s and l"));
    }

    let hsl = resolve_base(&query, Hsl::BLACK).map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?;
    let rgb = match &query.hex {
        // Report the exact channels rather than the HSL round trip
        Some(hex) => RgbColor::from_hex(hex).map_err(|e| bad_request(format!("{e:#}")))?,
        None => hsl.to_rgb(),
    };

    Ok(Json(ConvertResponse {
        hex: rgb.into(),
        hsl,
        rgb,
    }))
}

/// GET /api/tiles - Subdivide the canvas.
async fn get_tiles(
    State(state): State<AppState>,
    Query(query): Query<TilesQuery>,
) -> ApiResult<Json<TilesResponse>> {
    let colors = query.colors.unwrap_or(state.config.explorer.harmony.color_count());
    let depth = query.depth.unwrap_or(state.config.explorer.depth);
    let generator = tile_generator(depth).map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?;
    let seed = query.seed.unwrap_or_else(rand::random);

    Ok(Json(TilesResponse {
        seed,
        depth,
        colors,
        tiles: generator.generate_seeded(colors, seed),
    }))
}

/// GET /api/canvas - Palette plus tiles.
async fn get_canvas(
    State(state): State<AppState>,
    Query(query): Query<CanvasQuery>,
) -> ApiResult<Json<CanvasResponse>> {
    build_canvas(&state, &query).map(Json)
}

/// GET /api/canvas.svg - Rendered canvas.
async fn get_canvas_svg(
    State(state): State<AppState>,
    Query(query): Query<CanvasQuery>,
) -> ApiResult<Response> {
    let canvas = build_canvas(&state, &query)?;
    let options = SvgOptions {
        size: query.width.zip(query.height),
        ..SvgOptions::default()
    };
    let svg = render_svg(&canvas.palette.hex_colors(), &canvas.tiles, &options);

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

/// GET /api/explorer - Current explorer state.
async fn get_explorer(State(state): State<AppState>) -> Json<ExplorerResponse> {
    let mut explorer = state.explorer();
    let notice = explorer.take_credential_notice();
    Json(ExplorerResponse {
        state: explorer.snapshot(),
        notice,
    })
}

/// PUT /api/explorer - Update selections.
async fn update_explorer(
    State(state): State<AppState>,
    Json(request): Json<ExplorerUpdateRequest>,
) -> ApiResult<Json<ExplorerSnapshot>> {
    if request.base.is_some() && request.base_hex.is_some() {
        return Err(bad_request("Specify either base or baseHex, not both"));
    }

    // Validate everything before touching the state
    let base = match (&request.base, &request.base_hex) {
        (Some(hsl), _) => {
            Some(hsl_from_parts(hsl.h, hsl.s, hsl.l).map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?)
        }
        (None, Some(hex)) => Some(Hsl::parse_hex(hex).map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiError::with_details("Invalid hex color", format!("{e:#}"))),
            )
        })?),
        (None, None) => None,
    };
    let harmony = request
        .harmony
        .as_deref()
        .map(str::parse::<HarmonyRule>)
        .transpose()
        .map_err(|e| bad_request(format!("{e:#}")))?;

    let mut explorer = state.explorer();
    if let Some(base) = base {
        explorer.set_base(base);
    }
    if let Some(harmony) = harmony {
        explorer.set_harmony(harmony);
    }
    if let Some(seed) = request.seed {
        explorer.set_seed(seed);
    }

    Ok(Json(explorer.snapshot()))
}

/// POST /api/explorer/shuffle - Redraw the canvas with the next seed.
async fn shuffle_explorer(State(state): State<AppState>) -> Json<ExplorerSnapshot> {
    let mut explorer = state.explorer();
    explorer.shuffle();
    Json(explorer.snapshot())
}

/// Releases the explorer's in-flight flag if the suggest handler is dropped
/// mid-request (client disconnect, proxy timeout).
struct PendingSuggestion {
    state: Option<AppState>,
}

impl PendingSuggestion {
    fn new(state: AppState) -> Self {
        Self { state: Some(state) }
    }

    /// Marks the request as finished normally; the caller applies the outcome.
    fn complete(mut self) {
        self.state = None;
    }
}

impl Drop for PendingSuggestion {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            warn!("AI suggestion request dropped before completing");
            state.explorer().cancel_suggestion();
        }
    }
}

/// POST /api/explorer/suggest - Ask the AI and apply its suggestion.
///
/// Status codes: 400 empty mood, 409 request already running, 503 no API
/// key, 502 any failure of the request itself.
async fn suggest_palette(
    State(state): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> ApiResult<Json<ExplorerSnapshot>> {
    let mood = {
        let mut explorer = state.explorer();
        explorer.begin_suggestion(&request.mood).map_err(|rejected| {
            let status = match rejected {
                SuggestionRejected::EmptyPrompt => StatusCode::BAD_REQUEST,
                SuggestionRejected::Disabled => StatusCode::SERVICE_UNAVAILABLE,
                SuggestionRejected::InFlight => StatusCode::CONFLICT,
            };
            (status, Json(ApiError::new(rejected.to_string())))
        })?
    };

    info!("Requesting AI suggestion for '{}'", mood);
    let pending = PendingSuggestion::new(state.clone());
    let result = state.suggestions.suggest(&mood).await;
    pending.complete();
    let failure = result.as_ref().err().map(|e| {
        let status = if matches!(e, SuggestionError::MissingCredential) {
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            StatusCode::BAD_GATEWAY
        };
        (status, e.to_string())
    });

    let mut explorer = state.explorer();
    explorer.finish_suggestion(result);

    match failure {
        Some((status, details)) => {
            warn!("AI suggestion failed: {}", details);
            Err((status, Json(ApiError::with_details(FAILURE_MESSAGE, details))))
        }
        None => Ok(Json(explorer.snapshot())),
    }
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS: the server is meant to run locally next to the browser
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Stateless color endpoints
        .route("/api/harmonies", get(list_harmonies))
        .route("/api/palette", get(get_palette))
        .route("/api/convert", get(convert_color))
        .route("/api/tiles", get(get_tiles))
        .route("/api/canvas", get(get_canvas))
        .route("/api/canvas.svg", get(get_canvas_svg))
        // Explorer endpoints
        .route("/api/explorer", get(get_explorer).put(update_explorer))
        .route("/api/explorer/shuffle", post(shuffle_explorer))
        .route("/api/explorer/suggest", post(suggest_palette))
        // Embedded frontend
        .fallback(static_files::serve_static)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Arguments
///
/// * `config` - Application configuration
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(config)?;
    if !static_files::has_embedded_assets() {
        warn!("No embedded web UI found; only the API is available");
    }
    let app = create_router(state);

    info!("Starting {} web server on http://{}", APP_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_base_defaults() {
        let query = ColorQuery::default();
        assert_eq!(resolve_base(&query, Hsl::default()).unwrap(), Hsl::default());
    }

    #[test]
    fn test_resolve_base_hex_and_hsl() {
        let query = ColorQuery {
            hex: Some("#ff0000".to_string()),
            ..ColorQuery::default()
        };
        assert_eq!(
            resolve_base(&query, Hsl::default()).unwrap(),
            Hsl::new(0.0, 100.0, 50.0)
        );

        let query = ColorQuery {
            h: Some(120.0),
            s: Some(50.0),
            l: Some(40.0),
            ..ColorQuery::default()
        };
        assert_eq!(
            resolve_base(&query, Hsl::default()).unwrap(),
            Hsl::new(120.0, 50.0, 40.0)
        );
    }

    #[test]
    fn test_resolve_base_rejects_bad_input() {
        let partial = ColorQuery {
            h: Some(120.0),
            ..ColorQuery::default()
        };
        assert!(resolve_base(&partial, Hsl::default()).is_err());

        let both = ColorQuery {
            h: Some(1.0),
            s: Some(1.0),
            l: Some(1.0),
            hex: Some("#fff".to_string()),
            ..ColorQuery::default()
        };
        assert!(resolve_base(&both, Hsl::default()).is_err());

        let bad_hex = ColorQuery {
            hex: Some("#ff00".to_string()),
            ..ColorQuery::default()
        };
        assert!(resolve_base(&bad_hex, Hsl::default()).is_err());

        let out_of_range = ColorQuery {
            h: Some(10.0),
            s: Some(120.0),
            l: Some(50.0),
            ..ColorQuery::default()
        };
        assert!(resolve_base(&out_of_range, Hsl::default()).is_err());
    }
}
