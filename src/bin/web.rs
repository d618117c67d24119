//! Single binary web server: REST API over the bracket generator, brackets kept in memory.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, BRACKET_TTL_HOURS (idle brackets are dropped after this long).

use actix_web::{
    delete, get, post, put,
    web::{Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, ResponseError,
};
use dota_bracket_web::{
    create_bracket, generate_double_elimination, parse_teams_csv, regenerate_bracket,
    replace_matches, round_labels, submit_match_result, teams_from_names, Bracket, BracketError,
    BracketId, Match, MatchSlot,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-bracket entry: bracket data + last activity time (for auto-cleanup).
struct BracketEntry {
    bracket: Bracket,
    last_activity: Instant,
}

type Store = RwLock<HashMap<BracketId, BracketEntry>>;
type AppState = Data<Store>;

/// Server settings read from the environment.
#[derive(Clone, Debug)]
struct ServerConfig {
    host: String,
    port: u16,
    bracket_ttl: Duration,
}

impl ServerConfig {
    fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let ttl_hours: u64 = std::env::var("BRACKET_TTL_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(12);
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            bracket_ttl: ttl_from_hours(ttl_hours),
        }
    }
}

/// Idle time before a bracket is dropped. Huge values saturate instead of overflowing.
fn ttl_from_hours(hours: u64) -> Duration {
    Duration::from_secs(hours.saturating_mul(3600))
}

/// API error: domain errors are 400, unknown brackets 404.
#[derive(Debug)]
enum ApiError {
    Bracket(BracketError),
    NotFound,
    Lock,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Bracket(e) => write!(f, "{}", e),
            ApiError::NotFound => write!(f, "No bracket"),
            ApiError::Lock => write!(f, "lock error"),
        }
    }
}

impl From<BracketError> for ApiError {
    fn from(e: BracketError) -> Self {
        ApiError::Bracket(e)
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let body = serde_json::json!({ "error": self.to_string() });
        match self {
            ApiError::Bracket(_) => HttpResponse::BadRequest().json(body),
            ApiError::NotFound => HttpResponse::NotFound().json(body),
            ApiError::Lock => HttpResponse::InternalServerError().json(body),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct TeamBody {
    name: String,
}

#[derive(Deserialize)]
struct PreviewBody {
    teams: Vec<TeamBody>,
}

#[derive(Deserialize)]
struct CreateBracketBody {
    #[serde(default = "default_bracket_name")]
    name: String,
    teams: Vec<TeamBody>,
    #[serde(default)]
    shuffle: bool,
}

fn default_bracket_name() -> String {
    "Tournament".to_string()
}

#[derive(Deserialize, Default)]
struct RegenerateBody {
    #[serde(default)]
    shuffle: bool,
}

#[derive(Deserialize)]
struct ResultBody {
    winner: MatchSlot,
}

/// Path segment: bracket id (e.g. /api/brackets/{id})
#[derive(Deserialize)]
struct BracketPath {
    id: BracketId,
}

/// Path segments: bracket id and match id (e.g. /api/brackets/{id}/matches/{match_id}/result)
#[derive(Deserialize)]
struct BracketMatchPath {
    id: BracketId,
    match_id: String,
}

/// Run `f` against a stored bracket, refreshing its activity time, and respond with the bracket.
fn with_bracket<F>(state: &Store, id: BracketId, f: F) -> Result<HttpResponse, ApiError>
where
    F: FnOnce(&mut Bracket) -> Result<(), BracketError>,
{
    let mut g = state.write().map_err(|_| ApiError::Lock)?;
    let entry = g.get_mut(&id).ok_or(ApiError::NotFound)?;
    entry.last_activity = Instant::now();
    f(&mut entry.bracket)?;
    Ok(HttpResponse::Ok().json(&entry.bracket))
}

fn store_bracket(state: &Store, bracket: Bracket) -> Result<HttpResponse, ApiError> {
    let mut g = state.write().map_err(|_| ApiError::Lock)?;
    let response = HttpResponse::Created().json(&bracket);
    g.insert(
        bracket.id,
        BracketEntry {
            bracket,
            last_activity: Instant::now(),
        },
    );
    Ok(response)
}

#[get("/api/health")]
async fn api_health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "dota-bracket-web",
    })
}

/// Generate matches for a team list without storing anything.
#[post("/api/brackets/preview")]
async fn api_preview(body: Json<PreviewBody>) -> Result<HttpResponse, ApiError> {
    let teams = teams_from_names(body.teams.iter().map(|t| t.name.as_str()))?;
    let matches: Vec<Match> = generate_double_elimination(&teams)?;
    Ok(HttpResponse::Ok().json(matches))
}

/// Create and store a seeded bracket (returns it with id; client keeps the id).
#[post("/api/brackets")]
async fn api_create_bracket(state: AppState, body: Json<CreateBracketBody>) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let teams = teams_from_names(body.teams.iter().map(|t| t.name.as_str()))?;
    let bracket = create_bracket(body.name, teams, body.shuffle)?;
    store_bracket(&state, bracket)
}

/// Create a bracket from a CSV upload with a `name` column.
#[post("/api/brackets/import")]
async fn api_import_bracket(state: AppState, body: Bytes) -> Result<HttpResponse, ApiError> {
    let teams = parse_teams_csv(body.as_ref())?;
    let bracket = create_bracket(default_bracket_name(), teams, false)?;
    store_bracket(&state, bracket)
}

/// Get a bracket by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/brackets/{id}")]
async fn api_get_bracket(state: AppState, path: Path<BracketPath>) -> Result<HttpResponse, ApiError> {
    with_bracket(&state, path.id, |_| Ok(()))
}

#[delete("/api/brackets/{id}")]
async fn api_delete_bracket(state: AppState, path: Path<BracketPath>) -> Result<HttpResponse, ApiError> {
    let mut g = state.write().map_err(|_| ApiError::Lock)?;
    match g.remove(&path.id) {
        Some(_) => Ok(HttpResponse::NoContent().finish()),
        None => Err(ApiError::NotFound),
    }
}

/// Rebuild the match graph from the stored teams; all results are discarded.
#[post("/api/brackets/{id}/regenerate")]
async fn api_regenerate_bracket(
    state: AppState,
    path: Path<BracketPath>,
    body: Option<Json<RegenerateBody>>,
) -> Result<HttpResponse, ApiError> {
    let shuffle = body.map(|b| b.shuffle).unwrap_or_default();
    with_bracket(&state, path.id, |b| regenerate_bracket(b, shuffle))
}

/// Save an edited match list (validated, replaced in one write).
#[put("/api/brackets/{id}/matches")]
async fn api_replace_matches(
    state: AppState,
    path: Path<BracketPath>,
    body: Json<Vec<Match>>,
) -> Result<HttpResponse, ApiError> {
    let matches = body.into_inner();
    with_bracket(&state, path.id, move |b| replace_matches(b, matches))
}

/// Record the winner of one match and advance both teams.
#[post("/api/brackets/{id}/matches/{match_id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<BracketMatchPath>,
    body: Json<ResultBody>,
) -> Result<HttpResponse, ApiError> {
    with_bracket(&state, path.id, |b| submit_match_result(b, &path.match_id, body.winner))
}

/// Round headers for rendering.
#[get("/api/brackets/{id}/rounds")]
async fn api_round_labels(state: AppState, path: Path<BracketPath>) -> Result<HttpResponse, ApiError> {
    let mut g = state.write().map_err(|_| ApiError::Lock)?;
    let entry = g.get_mut(&path.id).ok_or(ApiError::NotFound)?;
    entry.last_activity = Instant::now();
    Ok(HttpResponse::Ok().json(round_labels(&entry.bracket.matches)))
}

fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_preview)
        .service(api_import_bracket)
        .service(api_create_bracket)
        .service(api_get_bracket)
        .service(api_delete_bracket)
        .service(api_regenerate_bracket)
        .service(api_replace_matches)
        .service(api_record_result)
        .service(api_round_labels);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state: AppState = Data::new(RwLock::new(HashMap::new()));

    // Background task: every 30 minutes, remove brackets idle for longer than the TTL
    let state_cleanup = state.clone();
    let ttl = config.bracket_ttl;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < ttl);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive bracket(s)", removed);
            }
        }
    });

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
