use actix_web::HttpResponse;

use crate::models::HealthResponse;
use crate::utils::responses::ResponseBuilder;

/// `GET /ping`
pub async fn health() -> HttpResponse {
    ResponseBuilder::ok_json(&HealthResponse {
        status: "ok".to_string(),
        message: "Classroom portal is running".to_string(),
    })
}
