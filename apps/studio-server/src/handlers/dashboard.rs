//! Dashboard handlers - counters, recent drafts and trend advice.

use actix_web::{HttpResponse, web};

use postcraft_core::domain::{Post, PostStatus};
use postcraft_core::services::TrendAdvice;
use postcraft_shared::dto::{DashboardResponse, StatusCounts, TrendResponse};

use crate::state::AppState;

const RECENT_DRAFTS: usize = 3;
const TREND_EXCERPTS: usize = 5;
const EXCERPT_CHARS: usize = 50;

/// GET /api/dashboard
pub async fn dashboard(state: web::Data<AppState>) -> HttpResponse {
    let stats = state.posts.stats().await;
    let recent_drafts: Vec<Post> = state
        .posts
        .by_status(PostStatus::Draft)
        .await
        .into_iter()
        .take(RECENT_DRAFTS)
        .collect();

    HttpResponse::Ok().json(DashboardResponse {
        counts: StatusCounts {
            total: stats.total,
            drafts: stats.drafts,
            scheduled: stats.scheduled,
            published: stats.published,
        },
        recent_drafts,
    })
}

/// GET /api/trends - always 200; failures come back as fallback text.
pub async fn trends(state: web::Data<AppState>) -> HttpResponse {
    let excerpts = state
        .posts
        .recent_excerpts(TREND_EXCERPTS, EXCERPT_CHARS)
        .await;
    let advice = state.trends.summarize(&excerpts).await;

    let fallback = match &advice {
        TrendAdvice::Generated(_) => None,
        TrendAdvice::Fallback(reason) => {
            tracing::debug!(?reason, "Trend advice fell back to fixed message");
            Some(reason.code().to_string())
        }
    };

    HttpResponse::Ok().json(TrendResponse {
        text: advice.text().to_string(),
        generated: advice.is_generated(),
        fallback,
    })
}
