//! Generation handlers - drafts and images from the AI provider.

use actix_web::{HttpResponse, web};

use postcraft_core::domain::{DraftRequest, Platform, Tone};
use postcraft_shared::dto::{GenerateDraftRequest, GenerateImageRequest, ImageResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::state::AppState;

fn busy() -> AppError {
    AppError::Conflict("A generation is already in progress".to_string())
}

/// POST /api/generate
pub async fn generate_draft(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<GenerateDraftRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let platform: Platform = req.platform.parse()?;
    let tone = match req.tone.as_deref() {
        Some(tone) => tone.parse()?,
        None => Tone::default(),
    };
    let request = DraftRequest::new(req.topic, platform, tone)
        .with_emoji(req.include_emoji.unwrap_or(true))
        .with_image(req.generate_image);

    let _permit = state.generation_gate.try_acquire().ok_or_else(busy)?;
    let content = state.generator.compose(&request).await?;

    tracing::info!(
        %request_id,
        %platform,
        hashtags = content.hashtags.len(),
        with_image = content.image_base64.is_some(),
        "Draft generated"
    );

    Ok(HttpResponse::Ok().json(content))
}

/// POST /api/generate/image
pub async fn generate_image(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<GenerateImageRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let _permit = state.generation_gate.try_acquire().ok_or_else(busy)?;
    let image_url = state.generator.generate_image(&req.prompt).await?;

    tracing::info!(%request_id, bytes = image_url.len(), "Image generated");

    Ok(HttpResponse::Ok().json(ImageResponse { image_url }))
}
