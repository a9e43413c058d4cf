use actix_web::{get, HttpResponse, Responder};

use restful_security_core::http::security::AuthenticationContext;

/// Reads the principal off the request-scoped context instead of an
/// extractor, the way service-layer code would.
#[get("/api/users")]
pub async fn api_users() -> impl Responder {
    let actor = AuthenticationContext::current_user_details()
        .map(|u| u.id().to_string())
        .unwrap_or_else(|| "anonymous".to_string());
    HttpResponse::Ok().body(format!("Users listed by {}", actor))
}
