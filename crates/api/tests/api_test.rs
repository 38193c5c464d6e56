//! End-to-end tests of the HTTP API against an in-memory database.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use financas_api::{AppState, create_router};
use financas_db::migration::{Migrator, MigratorTrait};
use financas_shared::types::UserId;
use http_body_util::BodyExt;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

async fn app() -> Router {
    let db = financas_db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    create_router(AppState {
        db: Arc::new(db),
        owner: UserId::from_uuid(Uuid::from_u128(1)),
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_reference(app: &Router, path: &str, name: &str) -> String {
    let (status, body) = send(app, Method::POST, path, Some(json!({"nome": name}))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn consolidate(app: &Router, competencia: &str) -> Value {
    let (status, body) = send(
        app,
        Method::GET,
        &format!("/consolidacoes/mensal?competencia={competencia}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn health_reports_version() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[rstest]
#[case("/categorias", "categoria_id", "categoria nao encontrada")]
#[case("/formas-pagamento", "forma_pagamento_id", "forma de pagamento nao encontrada")]
#[tokio::test]
async fn reference_crud(#[case] path: &str, #[case] param: &str, #[case] not_found: &str) {
    let app = app().await;

    let (status, created) = send(&app, Method::POST, path, Some(json!({"nome": "Mercado"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["nome"], "Mercado");
    assert_eq!(created["usuario_id"], "00000000-0000-0000-0000-000000000001");
    let id = created["id"].as_str().unwrap();
    let item = format!("{path}/{id}");

    let (status, listed) = send(&app, Method::GET, path, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created.clone()]));

    let (status, fetched) = send(&app, Method::GET, &item, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, renamed) = send(
        &app,
        Method::PUT,
        &item,
        Some(json!({"nome": "Supermercado"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["nome"], "Supermercado");

    let (status, body) = send(&app, Method::DELETE, &item, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, &item, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": not_found}));

    let (status, body) = send(&app, Method::GET, &format!("{path}/not-a-uuid"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["path", param]));
    assert_eq!(body["detail"][0]["msg"], "uuid invalido");
}

#[tokio::test]
async fn reference_names_are_unique() {
    let app = app().await;

    create_reference(&app, "/formas-pagamento", "Pix").await;
    let debit = create_reference(&app, "/formas-pagamento", "Debito").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/formas-pagamento",
        Some(json!({"nome": "Pix"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({"detail": "recurso ja existente"}));

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/formas-pagamento/{debit}"),
        Some(json!({"nome": "Pix"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({"detail": "recurso ja existente"}));
}

#[tokio::test]
async fn reference_name_is_validated() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/categorias",
        Some(json!({"nome": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "nome"]));
    assert_eq!(body["detail"][0]["msg"], "nao pode ser vazio");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/lancamentos")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_and_list_entries() {
    let app = app().await;
    let category = create_reference(&app, "/categorias", "Casa").await;
    let method = create_reference(&app, "/formas-pagamento", "Pix").await;

    let (status, income) = send(
        &app,
        Method::POST,
        "/lancamentos",
        Some(json!({
            "nome": "Salario",
            "data": "2026-01-05",
            "competencia": "2026-01",
            "tipo_lancamento": "ENTRADA",
            "valor": 5000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(income["tipo_lancamento"], "ENTRADA");
    assert_eq!(income["valor"], json!(5000.0));
    assert_eq!(income["usuario_id"], "00000000-0000-0000-0000-000000000001");
    assert!(income.get("categoria_id").is_none());

    let (status, rent) = send(
        &app,
        Method::POST,
        "/lancamentos",
        Some(json!({
            "nome": "Aluguel",
            "data": "2026-01-10",
            "competencia": "2026-01",
            "tipo_lancamento": "FIXO",
            "categoria_id": category,
            "forma_pagamento_id": method,
            "valor": 120.5,
            "pago": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(rent["categoria_id"], json!(category));
    assert_eq!(rent["pago"], json!(false));

    let (status, listed) = send(&app, Method::GET, "/lancamentos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([income, rent]));
}

#[tokio::test]
async fn entry_validation_collects_every_error() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/lancamentos",
        Some(json!({
            "data": "2026-02-30",
            "competencia": "2026-13",
            "tipo_lancamento": "ENTRADA",
            "valor": -1
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let locs: Vec<Value> = body["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["loc"].clone())
        .collect();
    assert!(locs.contains(&json!(["body", "nome"])));
    assert!(locs.contains(&json!(["body", "data"])));
    assert!(locs.contains(&json!(["body", "competencia"])));
}

#[tokio::test]
async fn entry_with_unknown_references_is_404() {
    let app = app().await;
    let method = create_reference(&app, "/formas-pagamento", "Pix").await;

    let payload = |category: String, method: String| {
        json!({
            "nome": "Mercado",
            "data": "2026-01-10",
            "competencia": "2026-01",
            "tipo_lancamento": "VARIAVEL",
            "categoria_id": category,
            "forma_pagamento_id": method,
            "valor": 10,
            "pago": true
        })
    };

    let (status, body) = send(
        &app,
        Method::POST,
        "/lancamentos",
        Some(payload(Uuid::now_v7().to_string(), method)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "categoria nao encontrada"}));

    let category = create_reference(&app, "/categorias", "Mercado").await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/lancamentos",
        Some(payload(category, Uuid::now_v7().to_string())),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "forma de pagamento nao encontrada"}));
}

#[tokio::test]
async fn consolidation_spreads_installments() {
    let app = app().await;
    let category = create_reference(&app, "/categorias", "Eletro").await;
    let method = create_reference(&app, "/formas-pagamento", "Cartao").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/lancamentos",
        Some(json!({
            "nome": "Geladeira",
            "data": "2026-01-15",
            "competencia": "2026-01",
            "tipo_lancamento": "PARCELADO",
            "categoria_id": category,
            "forma_pagamento_id": method,
            "valor_total": 240,
            "numero_parcelas": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    assert_eq!(
        consolidate(&app, "2026-01").await,
        json!({
            "competencia": "2026-01",
            "total_entradas": 0.0,
            "total_gastos": 120.0,
            "total_investimentos": 0.0,
            "saldo": -120.0
        })
    );
    assert_eq!(consolidate(&app, "2026-02").await["total_gastos"], json!(120.0));
    assert_eq!(consolidate(&app, "2026-03").await["total_gastos"], json!(0.0));
}

#[tokio::test]
async fn consolidation_of_empty_month() {
    let app = app().await;

    assert_eq!(
        consolidate(&app, "2030-07").await,
        json!({
            "competencia": "2030-07",
            "total_entradas": 0.0,
            "total_gastos": 0.0,
            "total_investimentos": 0.0,
            "saldo": 0.0
        })
    );
}

#[rstest]
#[case("/consolidacoes/mensal", "campo obrigatorio")]
#[case("/consolidacoes/mensal?competencia=2026-1", "formato invalido (YYYY-MM)")]
#[case("/consolidacoes/mensal?competencia=2026-13", "formato invalido (YYYY-MM)")]
#[case("/consolidacoes/mensal?competencia=0000-01", "formato invalido (YYYY-MM)")]
#[tokio::test]
async fn consolidation_rejects_bad_competencia(#[case] uri: &str, #[case] msg: &str) {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, uri, None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["query", "competencia"]));
    assert_eq!(body["detail"][0]["msg"], msg);
}

#[tokio::test]
async fn consolidation_rejects_repeated_query_key() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/consolidacoes/mensal?competencia=2026-01&competencia=2026-02",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["query"]));
    assert_eq!(body["detail"][0]["msg"], "query string invalida");
}

#[tokio::test]
async fn installment_count_beyond_storage_is_422() {
    let app = app().await;
    let category = create_reference(&app, "/categorias", "Eletro").await;
    let method = create_reference(&app, "/formas-pagamento", "Cartao").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/lancamentos",
        Some(json!({
            "nome": "Geladeira",
            "data": "2026-01-15",
            "competencia": "2026-01",
            "tipo_lancamento": "PARCELADO",
            "categoria_id": category,
            "forma_pagamento_id": method,
            "valor_total": 240,
            "numero_parcelas": 3_000_000_000_u64
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "numero_parcelas"]));
    assert_eq!(body["detail"][0]["msg"], "valor fora do intervalo suportado");
}
