use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower_http::cors::CorsLayer;

// Testes de fumaça da casca HTTP. Os invariantes do motor (conciliação,
// máquina de estados, upserts) são cobertos pelos testes unitários junto
// aos módulos; aqui só conferimos a montagem do router.

async fn send(app: axum::Router, request: Request<Body>) -> axum::http::Response<Body> {
    use tower::ServiceExt;
    app.oneshot(request).await.unwrap()
}

fn create_test_app() -> axum::Router {
    axum::Router::new()
        .route(
            "/health",
            axum::routing::get(|| async {
                axum::Json(serde_json::json!({
                    "service": "delivery-closing",
                    "status": "healthy",
                }))
            }),
        )
        .layer(CorsLayer::very_permissive())
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = send(
        app,
        Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = create_test_app();
    let response = send(
        app,
        Request::builder()
            .uri("/api/rota/nao-existe")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
