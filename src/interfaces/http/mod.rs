use crate::application::use_cases::generate_tests::NormalizedResult;
use crate::application::GenerateTestsUseCase;
use crate::domain::category_selection::DEFAULT_SUITE_CATEGORIES;
use crate::domain::error::AppError;
use crate::domain::story::GenerateRequest;
use crate::infrastructure::config::ServerConfig;
use actix_cors::Cors;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{
    dev::Server, get, http::StatusCode, post, web, App, HttpRequest, HttpResponse, HttpServer,
    Responder,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

const INVALID_JSON_MESSAGE: &str = "LLM returned invalid JSON format";
const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to generate tests from LLM service";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

pub struct HttpState {
    pub generate_use_case: Arc<GenerateTestsUseCase>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            raw: None,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[post("/generate")]
async fn generate(data: web::Data<HttpState>, req: web::Json<GenerateRequest>) -> impl Responder {
    let request = req.into_inner();
    info!(
        story_title = %request.story_title,
        categories = request.categories.len(),
        "Generate request received"
    );

    // Run on its own task so a panic in the pipeline becomes a 500 instead of a dropped socket.
    let use_case = data.generate_use_case.clone();
    let outcome = actix_web::rt::spawn(async move { use_case.execute(&request).await }).await;

    match outcome {
        Ok(Ok(result)) => result_response(result),
        Ok(Err(err)) => error_response(err),
        Err(join_err) => {
            error!(error = %join_err, "Generate task aborted");
            HttpResponse::InternalServerError().json(ErrorBody::new(INTERNAL_ERROR_MESSAGE))
        }
    }
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

#[get("/categories")]
async fn categories() -> impl Responder {
    HttpResponse::Ok().json(DEFAULT_SUITE_CATEGORIES)
}

fn result_response(result: NormalizedResult) -> HttpResponse {
    match result {
        NormalizedResult::StructuredSuccess(output) => HttpResponse::Ok().json(output),
        NormalizedResult::SchemaMismatch(output) => HttpResponse::Ok().json(output),
        NormalizedResult::ParseFailure { raw, .. } => {
            HttpResponse::build(StatusCode::BAD_GATEWAY).json(ErrorBody {
                error: INVALID_JSON_MESSAGE.to_string(),
                raw: Some(raw),
            })
        }
    }
}

fn error_response(err: AppError) -> HttpResponse {
    match err {
        AppError::ValidationError(_) => {
            warn!(error = %err, "Rejected generate request");
            HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()))
        }
        AppError::LLMError(_) | AppError::ConfigError(_) => {
            error!(error = %err, "LLM call failed");
            HttpResponse::build(StatusCode::BAD_GATEWAY)
                .json(ErrorBody::new(UPSTREAM_FAILURE_MESSAGE))
        }
        AppError::Internal(_) | AppError::IoError(_) => {
            error!(error = %err, "Generate request failed");
            HttpResponse::InternalServerError().json(ErrorBody::new(INTERNAL_ERROR_MESSAGE))
        }
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ErrorBody::new(format!("Validation error: {}", err)));
    InternalError::from_response(err, response).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(generate)
            .service(health)
            .service(categories),
    );
}

fn cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::permissive();
    }
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}

pub fn start_server(config: &ServerConfig, state: HttpState) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let allowed_origins = config.allowed_origins.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&allowed_origins))
            .app_data(state.clone())
            .app_data(json_config())
            .configure(routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}
