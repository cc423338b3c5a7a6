use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use produtos_api::app::produto::InMemoryProdutoRepository;
use produtos_api::{router, AppState, Produto, ProdutoService};
use bigdecimal::BigDecimal;
use serde_json::json;

fn create_test_server() -> TestServer {
    let service = ProdutoService::new(Arc::new(InMemoryProdutoRepository::new()));
    let app = router(AppState::new(service), Duration::from_secs(5));
    TestServer::new(app).unwrap()
}

async fn salvar(server: &TestServer, body: serde_json::Value) -> Produto {
    let response = server.post("/api/salvar").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_create_returns_created_with_assigned_id() {
    let server = create_test_server();

    let response = server
        .post("/api/salvar")
        .json(&json!({"nome": "Widget", "quantidade": 10, "valor": 19.99}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(
        body,
        json!({"id": 1, "nome": "Widget", "quantidade": 10, "valor": 19.99})
    );

    let produtos: Vec<Produto> = server.get("/api/produtos").await.json();
    assert_eq!(
        produtos,
        vec![Produto::new(
            1,
            "Widget",
            BigDecimal::from(10),
            "19.99".parse().unwrap()
        )]
    );
}

#[tokio::test]
async fn test_list_is_empty_initially() {
    let server = create_test_server();

    let response = server.get("/api/produtos").await;
    response.assert_status_ok();
    response.assert_json(&json!([]));
}

#[tokio::test]
async fn test_list_returns_every_created_record() {
    let server = create_test_server();

    let mut created = Vec::new();
    for (nome, quantidade, valor) in [("a", 1, "1.10"), ("b", 2, "2.20"), ("c", 3, "3.30")] {
        created.push(
            salvar(
                &server,
                json!({"nome": nome, "quantidade": quantidade, "valor": valor}),
            )
            .await,
        );
    }

    let mut listed: Vec<Produto> = server.get("/api/produtos").await.json();
    listed.sort_by_key(Produto::id);
    assert_eq!(listed, created);
}

#[tokio::test]
async fn test_list_is_idempotent() {
    let server = create_test_server();
    salvar(&server, json!({"nome": "Widget", "quantidade": 10, "valor": 19.99})).await;

    let first = server.get("/api/produtos").await.text();
    let second = server.get("/api/produtos").await.text();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_decimals_keep_full_precision() {
    let server = create_test_server();

    let saved = salvar(
        &server,
        json!({
            "nome": "Precise",
            "quantidade": "0.000000000000000001",
            "valor": "12345678901234567890.12"
        }),
    )
    .await;

    assert_eq!(saved.quantidade().to_string(), "0.000000000000000001");
    assert_eq!(
        saved.valor().to_string(),
        "12345678901234567890.12".to_string()
    );
}

#[tokio::test]
async fn test_decimals_longer_than_28_digits_round_trip() {
    let server = create_test_server();

    let body: serde_json::Value = serde_json::from_str(
        r#"{"nome":"x","quantidade":"0.123456789012345678901234567890123","valor":1234567890.12345678901234567890123}"#,
    )
    .unwrap();
    let response = server.post("/api/salvar").json(&body).await;
    response.assert_status(StatusCode::CREATED);

    let expected: serde_json::Value = serde_json::from_str(
        r#"{"id":1,"nome":"x","quantidade":0.123456789012345678901234567890123,"valor":1234567890.12345678901234567890123}"#,
    )
    .unwrap();
    assert_eq!(response.json::<serde_json::Value>(), expected);

    let listed = server.get("/api/produtos").await.text();
    assert_eq!(
        listed,
        r#"[{"id":1,"nome":"x","quantidade":0.123456789012345678901234567890123,"valor":1234567890.12345678901234567890123}]"#
    );
}

#[tokio::test]
async fn test_values_beyond_96_bits_are_accepted() {
    let server = create_test_server();

    let saved = salvar(
        &server,
        json!({"nome": "x", "quantidade": "100000000000000000000000000000", "valor": "1"}),
    )
    .await;
    assert_eq!(
        saved.quantidade().to_string(),
        "100000000000000000000000000000"
    );
}

#[tokio::test]
async fn test_missing_required_field_is_rejected() {
    let server = create_test_server();

    for body in [
        json!({"quantidade": 10, "valor": 19.99}),
        json!({"nome": "Widget", "valor": 19.99}),
        json!({"nome": "Widget", "quantidade": 10}),
        json!({"nome": null, "quantidade": 10, "valor": 19.99}),
    ] {
        let response = server.post("/api/salvar").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let error: serde_json::Value = response.json();
        assert_eq!(error["error"], "VALIDATION_ERROR");
        assert_eq!(error["code"], 400);
    }

    server.get("/api/produtos").await.assert_json(&json!([]));
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let server = create_test_server();

    let response = server
        .post("/api/salvar")
        .json(&json!({"nome": "Widget", "quantidade": "ten", "valor": 19.99}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let error: serde_json::Value = response.json();
    assert_eq!(error["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_save_with_existing_id_overwrites() {
    let server = create_test_server();
    let original = salvar(&server, json!({"nome": "Widget", "quantidade": 10, "valor": 19.99})).await;

    let updated = salvar(
        &server,
        json!({"id": original.id(), "nome": "Widget", "quantidade": 5, "valor": 17.5}),
    )
    .await;

    assert_eq!(updated.id(), original.id());
    assert_eq!(updated.quantidade(), &BigDecimal::from(5));

    let listed: Vec<Produto> = server.get("/api/produtos").await.json();
    assert_eq!(listed, vec![updated]);
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let server = create_test_server();

    let response = server
        .get("/api/produtos")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("abc-123"),
        )
        .await;
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "abc-123"
    );

    let response = server.get("/api/produtos").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
}
