//! Settings handlers - API key management and configuration overview.

use actix_web::{HttpResponse, web};

use postcraft_core::domain::CredentialSource;
use postcraft_shared::ApiResponse;
use postcraft_shared::dto::{SetApiKeyRequest, SettingsResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

async fn settings_response(state: &AppState) -> SettingsResponse {
    let status = state.credentials.status().await;
    let config = state.generator.config();

    SettingsResponse {
        api_key_configured: status.configured,
        api_key_source: status.source.map(|source| {
            match source {
                CredentialSource::Local => "local",
                CredentialSource::Environment => "environment",
            }
            .to_string()
        }),
        storage_backend: state.storage_backend.to_string(),
        text_model: config.text_model.clone(),
        image_model: config.image_model.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// GET /api/settings
pub async fn get_settings(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(settings_response(&state).await)
}

/// PUT /api/settings/api-key - the stored key takes precedence over the environment.
pub async fn set_api_key(
    state: web::Data<AppState>,
    body: web::Json<SetApiKeyRequest>,
) -> AppResult<HttpResponse> {
    state.credentials.set_local_key(&body.api_key).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        settings_response(&state).await,
        "API key saved",
    )))
}

/// DELETE /api/settings/api-key
pub async fn clear_api_key(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    state.credentials.clear_local_key().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        settings_response(&state).await,
        "Stored API key removed",
    )))
}
