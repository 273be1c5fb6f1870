use std::sync::Arc;

use axum::{
    extract::{Extension, Form, Json},
    http::{HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post, Router},
};
use regex::Regex;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::entities::error::HookError;
use crate::entities::hook::HookRequest;
use crate::hook_generator::{GenerationReport, HookGenerator};
use crate::pages;

/// `allow_origin` is a regex matched against the request `Origin`; `None`
/// allows any origin.
pub fn cors_layer(allow_origin: Option<&str>) -> Result<CorsLayer, HookError> {
    let cors = CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::POST])
        .allow_headers(Any);

    match allow_origin {
        None => Ok(cors.allow_origin(Any)),
        Some(pattern) => {
            let regex = Regex::new(pattern)
                .map_err(|e| HookError::config(format!("ALLOW_ORIGIN should be a valid regex: {e}")))?;
            Ok(cors.allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
                origin.to_str().map(|origin| regex.is_match(origin)).unwrap_or(false)
            })))
        }
    }
}

pub fn create_router(generator: Arc<HookGenerator>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(form_page_route).post(post_form_route))
        .route("/api/hooks", post(post_hooks_route))
        .route("/health", get(health_handler))
        .nest_service("/public", ServeDir::new("public"))
        .fallback(fallback_handler)
        .layer(Extension(generator))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn form_page_route(
    Extension(generator): Extension<Arc<HookGenerator>>,
) -> Result<Html<String>, HookError> {
    Ok(Html(pages::render_form(&HookRequest::default(), generator.model_name())?))
}

async fn post_form_route(
    Extension(generator): Extension<Arc<HookGenerator>>,
    Form(request): Form<HookRequest>,
) -> Result<Html<String>, HookError> {
    let report = generator.generate(&request).await?;
    Ok(Html(pages::render_report(&report)?))
}

async fn post_hooks_route(
    Extension(generator): Extension<Arc<HookGenerator>>,
    Json(request): Json<HookRequest>,
) -> Result<Json<GenerationReport>, HookError> {
    Ok(Json(generator.generate(&request).await?))
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "Ok")
}

async fn fallback_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 Not Found")
}
