//! Route requirement evaluation: roles, permissions, guest, ordering.


use actix_web::http::StatusCode;
use actix_web::{test, App};

use restful_security_core::http::security::AuthenticationStrategy;

use common::{bearer, secured_parts};

#[actix_web::test]
async fn any_logic_accepts_either_role() {
    let parts = secured_parts(AuthenticationStrategy::All);
    let app = test::init_service(
        App::new()
            .wrap(parts.security)
            .service(common::user_settings),
    )
    .await;

    for token in ["admin-token", "user-token"] {
        let req = test::TestRequest::get()
            .uri("/user/settings")
            .insert_header(bearer(token))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}

#[actix_web::test]
async fn any_logic_rejects_unlisted_role() {
    let parts = secured_parts(AuthenticationStrategy::All);
    let app = test::init_service(
        App::new()
            .wrap(parts.security)
            .service(common::user_settings),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/user/settings")
        .insert_header(bearer("guest-token"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn all_logic_requires_every_role() {
    use std::sync::Arc;

    use restful_security_core::http::security::{
        Logic, RequirementRegistry, RestfulSecurity, RouteRequirements,
    };

    let security = RestfulSecurity::new(Arc::new(common::test_realm())).requirements(
        RequirementRegistry::new().route(
            "/user/.*",
            RouteRequirements::new().roles(Logic::All, &["ADMIN", "USER"]),
        ),
    );
    let app = test::init_service(App::new().wrap(security).service(common::user_settings)).await;

    // admin holds both roles, user holds only one.
    let req = test::TestRequest::get()
        .uri("/user/settings")
        .insert_header(bearer("admin-token"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/user/settings")
        .insert_header(bearer("user-token"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn permission_requirement_is_checked() {
    let parts = secured_parts(AuthenticationStrategy::All);
    let app = test::init_service(App::new().wrap(parts.security).service(common::api_users)).await;

    // user has users:read.
    let req = test::TestRequest::get()
        .uri("/api/users")
        .insert_header(bearer("user-token"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // guest has no permissions.
    let req = test::TestRequest::get()
        .uri("/api/users")
        .insert_header(bearer("guest-token"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn guest_route_rejects_authenticated_principals() {
    let parts = secured_parts(AuthenticationStrategy::All);
    let app = test::init_service(App::new().wrap(parts.security).service(common::signup)).await;

    let req = test::TestRequest::get()
        .uri("/signup")
        .insert_header(bearer("user-token"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn guest_route_accepts_anonymous_requests() {
    let parts = secured_parts(AuthenticationStrategy::All);
    let app = test::init_service(App::new().wrap(parts.security).service(common::signup)).await;

    let req = test::TestRequest::get().uri("/signup").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn anonymous_role_requirement_is_unauthorized_not_forbidden() {
    let parts = secured_parts(AuthenticationStrategy::All);
    let app = test::init_service(App::new().wrap(parts.security).service(common::api_users)).await;

    // With no credential at all, the failure is a missing identity, not
    // a missing permission.
    let req = test::TestRequest::get().uri("/api/users").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn first_matching_pattern_wins() {
    use std::sync::Arc;

    use restful_security_core::http::security::{
        Logic, RequirementRegistry, RestfulSecurity, RouteRequirements,
    };

    // A broad ADMIN rule registered first shadows the later open rule.
    let security = RestfulSecurity::new(Arc::new(common::test_realm())).requirements(
        RequirementRegistry::new()
            .route(
                "/user/.*",
                RouteRequirements::new().roles(Logic::All, &["ADMIN"]),
            )
            .permit("/user/settings"),
    );
    let app = test::init_service(App::new().wrap(security).service(common::user_settings)).await;

    let req = test::TestRequest::get()
        .uri("/user/settings")
        .insert_header(bearer("user-token"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}
