use anyhow::Result;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use talent_core::{
    rank_with_insights, Corpus, JsonChartSink, NullChartSink, Profile, Query, RankResponse,
    TalentError,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    corpus_path: PathBuf,
    /// Current corpus snapshot. Requests clone the inner `Arc` and compute
    /// against it; reload swaps in a freshly loaded corpus so no request
    /// ever observes a partial update.
    corpus: Arc<RwLock<Arc<Corpus>>>,
    chart_dir: Option<PathBuf>,
    admin_token: Option<String>,
}

impl AppState {
    fn snapshot(&self) -> Arc<Corpus> {
        self.corpus.read().clone()
    }
}

pub fn build_app(corpus_path: impl Into<PathBuf>, chart_dir: Option<PathBuf>) -> Result<Router> {
    // Load the corpus once at startup
    let corpus_path = corpus_path.into();
    let corpus = Arc::new(Corpus::load(&corpus_path)?);
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let state = AppState {
        corpus_path,
        corpus: Arc::new(RwLock::new(corpus)),
        chart_dir,
        admin_token,
    };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/insights/rank_with_insights", post(rank_handler))
        .route("/api/profiles", get(profiles_handler))
        .route("/api/profiles/filter", post(filter_handler))
        .route("/api/corpus/reload", post(reload_handler))
        .with_state(state)
        .layer(cors);
    Ok(app)
}

#[derive(Deserialize)]
pub struct RankRequest {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub skills: String,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn bad_request(reason: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": reason })))
}

pub async fn rank_handler(
    State(state): State<AppState>,
    Json(req): Json<RankRequest>,
) -> Result<Json<RankResponse>, ApiError> {
    let query =
        Query::new(&req.job_title, &req.skills).map_err(|e| bad_request(e.to_string()))?;
    let corpus = state.snapshot();
    let result = match &state.chart_dir {
        Some(dir) => rank_with_insights(&corpus, &query, &JsonChartSink::new(dir)),
        None => rank_with_insights(&corpus, &query, &NullChartSink),
    };
    match result {
        Ok(response) => Ok(Json(response)),
        Err(err) => match err.downcast_ref::<TalentError>() {
            Some(TalentError::InvalidQuery(_)) | Some(TalentError::UnsafeIdentifier(_)) => {
                Err(bad_request(err.to_string()))
            }
            None => {
                tracing::error!(error = %err, "ranking failed");
                Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal error" })),
                ))
            }
        },
    }
}

pub async fn profiles_handler(State(state): State<AppState>) -> Json<Vec<Profile>> {
    Json(state.snapshot().profiles().to_vec())
}

#[derive(Deserialize, Default)]
pub struct ProfileFilter {
    pub city: Option<String>,
    pub skills: Option<String>,
    pub professional_title: Option<String>,
}

fn matches(field: &str, criterion: Option<&str>) -> bool {
    match criterion {
        Some(needle) if !needle.trim().is_empty() => {
            field.to_lowercase().contains(&needle.trim().to_lowercase())
        }
        _ => true,
    }
}

pub async fn filter_handler(
    State(state): State<AppState>,
    Json(filter): Json<ProfileFilter>,
) -> Json<Vec<Profile>> {
    let corpus = state.snapshot();
    let filtered: Vec<Profile> = corpus
        .profiles()
        .iter()
        .filter(|p| {
            matches(&p.city, filter.city.as_deref())
                && matches(&p.skills, filter.skills.as_deref())
                && matches(&p.professional_title, filter.professional_title.as_deref())
        })
        .cloned()
        .collect();
    Json(filtered)
}

pub async fn reload_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let corpus = Corpus::load(&state.corpus_path)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let num_profiles = corpus.len();
    *state.corpus.write() = Arc::new(corpus);
    tracing::info!(num_profiles, "corpus reloaded");
    Ok(Json(json!({ "num_profiles": num_profiles })))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers
        .get("X-ADMIN-TOKEN")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
