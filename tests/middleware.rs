use actix_web::{
    App, HttpResponse,
    http::{StatusCode, header},
    test, web,
};

use pipeline_crm::middleware::RedirectUnauthorized;

#[actix_web::test]
async fn redirects_unauthorized_to_signin() {
    let app = test::init_service(
        App::new()
            .wrap(RedirectUnauthorized::new("/auth/signin"))
            .default_service(web::to(|| async { HttpResponse::Unauthorized().finish() })),
    )
    .await;

    let req = test::TestRequest::default().to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/auth/signin"
    );
}

#[actix_web::test]
async fn extractor_rejections_are_redirected_too() {
    let app = test::init_service(
        App::new()
            .wrap(RedirectUnauthorized::new("https://auth.example.test/signin"))
            .route(
                "/clients",
                web::get().to(|| async {
                    Err::<HttpResponse, _>(actix_web::error::ErrorUnauthorized("not signed in"))
                }),
            ),
    )
    .await;

    let req = test::TestRequest::get().uri("/clients").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "https://auth.example.test/signin"
    );
}

#[actix_web::test]
async fn other_responses_pass_through() {
    let app = test::init_service(
        App::new()
            .wrap(RedirectUnauthorized::new("/auth/signin"))
            .route("/", web::get().to(|| async { HttpResponse::Ok().finish() }))
            .route(
                "/missing",
                web::get().to(|| async { HttpResponse::NotFound().finish() }),
            ),
    )
    .await;

    let ok = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(ok.status(), StatusCode::OK);

    let missing =
        test::call_service(&app, test::TestRequest::get().uri("/missing").to_request()).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert!(missing.headers().get(header::LOCATION).is_none());
}
