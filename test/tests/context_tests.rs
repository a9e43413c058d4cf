//! Request-scoped authentication context behavior across requests.


use actix_web::http::StatusCode;
use actix_web::{test, App};

use restful_security_core::http::security::AuthenticationStrategy;

use common::{bearer, secured_parts};

#[actix_web::test]
async fn context_is_visible_inside_the_handler() {
    let parts = secured_parts(AuthenticationStrategy::All);
    let app =
        test::init_service(App::new().wrap(parts.security).service(common::context_probe)).await;

    let req = test::TestRequest::get()
        .uri("/ctx")
        .insert_header(bearer("user-token"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = test::read_body(res).await;
    assert_eq!(body, "token=user-token user=user");
}

#[actix_web::test]
async fn context_does_not_leak_between_requests() {
    let parts = secured_parts(AuthenticationStrategy::All);
    let app =
        test::init_service(App::new().wrap(parts.security).service(common::context_probe)).await;

    // Authenticated request first.
    let req = test::TestRequest::get()
        .uri("/ctx")
        .insert_header(bearer("admin-token"))
        .to_request();
    let res = test::call_service(&app, req).await;
    let body = test::read_body(res).await;
    assert_eq!(body, "token=admin-token user=admin");

    // A following anonymous request sees a clean slate.
    let req = test::TestRequest::get().uri("/ctx").to_request();
    let res = test::call_service(&app, req).await;
    let body = test::read_body(res).await;
    assert_eq!(body, "token=- user=-");
}

#[actix_web::test]
async fn token_without_principal_is_still_observable() {
    let parts = secured_parts(AuthenticationStrategy::All);
    let app =
        test::init_service(App::new().wrap(parts.security).service(common::context_probe)).await;

    let req = test::TestRequest::get()
        .uri("/ctx")
        .insert_header(bearer("no-such-token"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = test::read_body(res).await;
    assert_eq!(body, "token=no-such-token user=-");
}

#[actix_web::test]
async fn extensions_mirror_the_context() {
    use restful_security_core::http::security::{SecurityExt, Token};

    use actix_web::{get, HttpRequest, HttpResponse, Responder};

    #[get("/mirror")]
    async fn mirror(req: HttpRequest) -> impl Responder {
        let via_ext = req.token() == Some(Token::new("user-token")) && req.has_role("USER");
        HttpResponse::Ok().body(format!("ext={}", via_ext))
    }

    let parts = secured_parts(AuthenticationStrategy::All);
    let app = test::init_service(App::new().wrap(parts.security).service(mirror)).await;

    let req = test::TestRequest::get()
        .uri("/mirror")
        .insert_header(bearer("user-token"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = test::read_body(res).await;
    assert_eq!(body, "ext=true");
}
