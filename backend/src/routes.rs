use crate::gemini::GeminiClient;
use crate::gemini::errors::InferenceResult;
use crate::gemini::models::GenerateContentRequest;
use crate::tasks::{AnalysisTask, PrescriptionTranscription, RiskScoring, XrayTriage};
use actix_files::Files;
use actix_web::{HttpResponse, error, web};
use log::{error, info, warn};
use sehat_shared::{ErrorResponse, PRESCRIPTION_ENDPOINT, RISK_ENDPOINT, Validate, XRAY_ENDPOINT};
use serde_json::json;
use uuid::Uuid;

// Inline base64 images; the upload surface enforces no size limit of its own.
const MAX_JSON_BODY: usize = 64 * 1024 * 1024;

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    configure_api(cfg);
    cfg.service(Files::new("/", frontend_dir).index_file("index.html"));
}

pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource(XRAY_ENDPOINT).route(web::post().to(analyze::<XrayTriage>)))
        .service(
            web::resource(PRESCRIPTION_ENDPOINT)
                .route(web::post().to(analyze::<PrescriptionTranscription>)),
        )
        .service(web::resource(RISK_ENDPOINT).route(web::post().to(analyze::<RiskScoring>)));
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_JSON_BODY)
        .error_handler(|err, _req| {
            let message = format!("Invalid request body: {}", err);
            warn!("{}", message);
            error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(ErrorResponse::new(message)),
            )
            .into()
        })
}

async fn health(client: web::Data<GeminiClient>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "model": client.model(),
    }))
}

async fn run_inference<T: AnalysisTask>(
    client: &GeminiClient,
    request: &GenerateContentRequest,
) -> InferenceResult<T::Output> {
    let output: T::Output = client.generate(request).await?;
    output.validate()?;
    Ok(output)
}

async fn analyze<T: AnalysisTask>(
    client: web::Data<GeminiClient>,
    payload: web::Json<T::Input>,
) -> HttpResponse {
    let input = payload.into_inner();
    let request_id = Uuid::new_v4();

    let request = match T::check_input(input).and_then(|input| T::build_request(&input)) {
        Ok(request) => request,
        Err(e) => {
            warn!("[{}] Rejected {} input: {}", request_id, T::NAME, e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()));
        }
    };

    info!("[{}] Starting {} analysis", request_id, T::NAME);
    match run_inference::<T>(&client, &request).await {
        Ok(output) => {
            info!("[{}] {} analysis completed", request_id, T::NAME);
            HttpResponse::Ok().json(output)
        }
        Err(e) => {
            error!("[{}] Error running {} analysis: {}", request_id, T::NAME, e);
            HttpResponse::BadGateway().json(ErrorResponse::new(T::FAILURE_MESSAGE))
        }
    }
}
