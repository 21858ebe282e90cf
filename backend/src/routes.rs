use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use futures::{StreamExt, TryStreamExt};
use log::{error, info, warn};
use serde::Serialize;
use serde_json::json;
use shared::{
    CONTACT_CONFIRMATION, ContactForm, ContactResponse, ErrorResponse, InferenceResponse,
    SeverityClass, SeverityInfo,
};
use strum::IntoEnumIterator;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::InferenceError;
use crate::inference::{InferencePipeline, UploadedImage};

#[derive(Serialize)]
struct SeverityEntry {
    index: usize,
    class: SeverityClass,
    #[serde(flatten)]
    info: &'static SeverityInfo,
}

pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/inference").route(web::post().to(handle_inference)))
        .service(web::resource("/api/contact").route(web::post().to(handle_contact)))
        .service(web::resource("/api/severity-classes").route(web::get().to(severity_classes)))
        .service(web::resource("/api/health").route(web::get().to(health)));
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    configure_api(cfg);
    cfg.service(Files::new("/", frontend_dir).index_file("index.html"));
}

async fn handle_inference(
    pipeline: web::Data<InferencePipeline>,
    config: web::Data<AppConfig>,
    mut payload: Multipart,
) -> Result<HttpResponse, InferenceError> {
    let upload = read_upload(&mut payload, config.max_upload_bytes).await?;
    let request_id = Uuid::new_v4();
    let file_name = upload.file_name.clone();

    info!(
        "Analyzing {} for request {} ({:?}, {} bytes, sha256 {})",
        file_name,
        request_id,
        upload.format,
        upload.bytes.len(),
        upload.digest()
    );

    let pipeline = pipeline.get_ref().clone();
    let diagnosis = web::block(move || pipeline.run(&upload))
        .await
        .map_err(|e| InferenceError::Model(e.to_string()))?
        .map_err(|e| {
            if e.is_user_error() {
                warn!("Rejected {} for request {}: {}", file_name, request_id, e);
            } else {
                error!("Inference failed for request {}: {}", request_id, e);
            }
            e
        })?;

    info!(
        "Request {} classified as {} ({:?})",
        request_id,
        diagnosis.severity.name(),
        diagnosis.predictions
    );

    Ok(HttpResponse::Ok().json(InferenceResponse {
        request_id: request_id.to_string(),
        file_name,
        severity: diagnosis.severity,
        severity_index: diagnosis.severity.index(),
        predictions: diagnosis.predictions,
        class_labels: SeverityClass::labels(),
        analyzed_at: Utc::now().to_rfc3339(),
    }))
}

/// Takes the first file field; other fields are drained and ignored.
async fn read_upload(
    payload: &mut Multipart,
    max_bytes: usize,
) -> Result<UploadedImage, InferenceError> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| InferenceError::Upload(e.to_string()))?
    {
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let Some(file_name) = file_name else {
            while let Some(chunk) = field.next().await {
                chunk.map_err(|e| InferenceError::Upload(e.to_string()))?;
            }
            continue;
        };

        let mut image_data = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| InferenceError::Upload(e.to_string()))?;
            if image_data.len() + data.len() > max_bytes {
                return Err(InferenceError::TooLarge { limit: max_bytes });
            }
            image_data.extend_from_slice(&data);
        }

        return UploadedImage::new(file_name, image_data);
    }

    Err(InferenceError::EmptyUpload)
}

async fn handle_contact(form: web::Json<ContactForm>) -> HttpResponse {
    let form = form.into_inner();
    match form.validate() {
        Ok(()) => {
            // No delivery; the message is acknowledged and dropped.
            info!(
                "Contact message received (subject: {}, {} chars)",
                form.subject,
                form.message.chars().count()
            );
            HttpResponse::Ok().json(ContactResponse {
                message: CONTACT_CONFIRMATION.to_string(),
                received_at: Utc::now().to_rfc3339(),
            })
        }
        Err(e) => {
            warn!("Contact form rejected, missing fields: {:?}", e.missing);
            HttpResponse::UnprocessableEntity().json(ErrorResponse::from(&e))
        }
    }
}

async fn severity_classes() -> HttpResponse {
    let entries: Vec<SeverityEntry> = SeverityClass::iter()
        .map(|class| SeverityEntry {
            index: class.index(),
            class,
            info: class.info(),
        })
        .collect();
    HttpResponse::Ok().json(entries)
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
