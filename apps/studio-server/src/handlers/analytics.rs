//! Analytics endpoint - static sample data for the charts.

use actix_web::HttpResponse;

use postcraft_shared::dto::{AnalyticsResponse, AudienceSegment, EngagementPoint};

const ENGAGEMENT: [(&str, u32, u32, u32); 7] = [
    ("Mon", 4000, 2400, 2400),
    ("Tue", 3000, 1398, 2210),
    ("Wed", 2000, 9800, 2290),
    ("Thu", 2780, 3908, 2000),
    ("Fri", 1890, 4800, 2181),
    ("Sat", 2390, 3800, 2500),
    ("Sun", 3490, 4300, 2100),
];

const AUDIENCE: [(&str, u32); 4] = [("18-24", 20), ("25-34", 45), ("35-44", 25), ("45+", 10)];

/// GET /api/analytics
pub async fn analytics() -> HttpResponse {
    let engagement = ENGAGEMENT
        .iter()
        .map(|&(name, instagram, linkedin, twitter)| EngagementPoint {
            name: name.to_string(),
            instagram,
            linkedin,
            twitter,
        })
        .collect();

    let audience = AUDIENCE
        .iter()
        .map(|&(name, value)| AudienceSegment {
            name: name.to_string(),
            value,
        })
        .collect();

    HttpResponse::Ok().json(AnalyticsResponse {
        sample: true,
        engagement,
        audience,
    })
}
