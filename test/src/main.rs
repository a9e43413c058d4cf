//! Demo application for the restful-security gate.
//!
//! Seeds an in-memory realm with a few tokens and protects a handful of
//! routes. Try it:
//!
//! ```text
//! curl http://127.0.0.1:8080/
//! curl http://127.0.0.1:8080/profile                               # 401
//! curl -H 'Authorization: Bearer user-token' :8080/profile         # 200
//! curl -H 'Authorization: Bearer user-token' :8080/admin/overview  # 403
//! curl -H 'Authorization: Bearer admin-token' :8080/admin/overview # 200
//! ```

use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer};

use restful_security_core::http::security::{
    AuthenticationStrategy, InMemoryCacheManager, InMemoryRealm, Logic,
    LoggingAuthenticationListener, RequirementRegistry, RestfulSecurity, RouteRequirements,
    UserDetails,
};


fn demo_realm() -> InMemoryRealm {
    InMemoryRealm::new()
        .with_user(
            "admin-token",
            UserDetails::new("admin")
                .roles(&["ADMIN", "USER"])
                .permissions(&["users:read", "users:write"]),
        )
        .with_user(
            "user-token",
            UserDetails::new("user")
                .roles(&["USER"])
                .permissions(&["users:read"]),
        )
}

fn demo_registry() -> RequirementRegistry {
    RequirementRegistry::new()
        .permit("/health")
        .route("/admin/.*", RouteRequirements::new().roles(Logic::All, &["ADMIN"]))
        .route("/profile", RouteRequirements::new().authenticated())
        .route("/signup", RouteRequirements::new().guest())
        .route(
            "/api/users",
            RouteRequirements::new().permissions(Logic::Any, &["users:read"]),
        )
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let realm = Arc::new(demo_realm());
    let cache = Arc::new(InMemoryCacheManager::new().ttl(Duration::from_secs(300)));

    log::info!("listening on 127.0.0.1:8080");

    HttpServer::new(move || {
        let security = RestfulSecurity::new(realm.clone())
            .cache_manager(cache.clone())
            .listener(Arc::new(LoggingAuthenticationListener))
            .strategy(AuthenticationStrategy::OnlyAnnotated)
            .requirements(demo_registry());

        App::new()
            .wrap(security)
            .service(handlers::index)
            .service(handlers::health)
            .service(handlers::signup)
            .service(handlers::profile)
            .service(handlers::whoami)
            .service(handlers::admin_overview)
            .service(handlers::api_users)
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
