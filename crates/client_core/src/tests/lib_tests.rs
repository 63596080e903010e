use std::sync::Arc;

use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::{Category, EventStatus};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    deleted: Arc<Mutex<Vec<String>>>,
    patched: Arc<Mutex<Vec<(String, Value)>>>,
    password_bodies: Arc<Mutex<Vec<Value>>>,
}

async fn list_events() -> Json<Value> {
    Json(json!([
        {
            "id": 1,
            "nombre": "Jazz Night",
            "descripcion": "Noche de jazz",
            "fecha": "2024-05-01",
            "categoria": "culturales",
            "cantidadCupos": 120,
            "estadoEvento": "abierto",
            "imagen": "https://img.example/jazz.png"
        },
        {
            "id": "abc",
            "nombre": "Soccer Cup",
            "fecha": "2024-04-01T15:00:00.000Z",
            "categoria": "deportes",
            "cantidadCupos": 22,
            "estadoEvento": "cerrado"
        },
        {
            "id": 3,
            "nombre": "Borrador",
            "cantidadCupos": null,
            "estadoEvento": null
        }
    ]))
}

async fn delete_event(State(state): State<ServerState>, Path(id): Path<String>) -> StatusCode {
    if id == "404" {
        return StatusCode::NOT_FOUND;
    }
    state.deleted.lock().await.push(id);
    StatusCode::OK
}

async fn list_orders() -> Json<Value> {
    Json(json!([
        {
            "id": 7,
            "fecha": "2024-05-01",
            "hora": "12:30",
            "tipoEntrega": "envio",
            "total": 32000,
            "cantidad": 2,
            "usuario": {
                "nombre": "Ana",
                "apellido": "Gómez",
                "numero_documento": "1032456789",
                "direccion": "Calle 10 # 4-21",
                "barrio": "Centro"
            },
            "carrito": [
                { "id": 1, "nombre": "Empanada", "precio": 16000, "cantidad": 2, "descripcion": "" }
            ]
        }
    ]))
}

async fn patch_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.patched.lock().await.push((id, body.clone()));
    Json(body)
}

async fn send_email(Json(body): Json<Value>) -> Json<Value> {
    if body["email"] == "admin@mila.co" {
        Json(json!({ "success": true, "message": "ok" }))
    } else {
        Json(json!({ "success": false, "message": "El correo no está registrado" }))
    }
}

async fn reset_password(State(state): State<ServerState>, Json(body): Json<Value>) -> Json<Value> {
    state.password_bodies.lock().await.push(body);
    Json(json!({ "success": true }))
}

async fn spawn_api_server() -> std::io::Result<(String, ServerState)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ServerState::default();
    let app = Router::new()
        .route("/eventos", get(list_events))
        .route("/eventos/:id", delete(delete_event))
        .route("/pedidos", get(list_orders))
        .route("/pedidos/:id", axum::routing::patch(patch_order))
        .route("/enviar-correo", post(send_email))
        .route("/restablecer-contrasena", post(reset_password))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

#[tokio::test]
async fn lists_events_with_numeric_and_string_ids() {
    let (server_url, _state) = spawn_api_server().await.expect("spawn server");
    let client = AdminClient::new(&server_url).expect("client");

    let events = client.list_events().await.expect("events");

    assert_eq!(events.len(), 3);
    assert_eq!(events[0].id, EventId::from(1));
    assert_eq!(events[0].capacity, 120);
    assert_eq!(events[1].id.as_str(), "abc");
    assert_eq!(events[1].description, "");
    assert_eq!(events[1].name, "Soccer Cup");
}

#[tokio::test]
async fn incomplete_event_rows_do_not_fail_the_whole_list() {
    let (server_url, _state) = spawn_api_server().await.expect("spawn server");
    let client = AdminClient::new(&server_url).expect("client");

    let events = client.list_events().await.expect("events");

    let draft = &events[2];
    assert_eq!(draft.name, "Borrador");
    assert_eq!(draft.status, EventStatus::Other(String::new()));
    assert_eq!(draft.category, Category::Other(String::new()));
    assert_eq!(draft.capacity, 0);
}

#[tokio::test]
async fn deletes_event_by_resource_path() {
    let (server_url, state) = spawn_api_server().await.expect("spawn server");
    let client = AdminClient::new(&server_url).expect("client");

    client
        .delete_event(&EventId::from(12))
        .await
        .expect("delete");

    assert_eq!(*state.deleted.lock().await, vec!["12".to_string()]);
}

#[tokio::test]
async fn delete_failure_is_reported_as_transport_kind() {
    let (server_url, state) = spawn_api_server().await.expect("spawn server");
    let client = AdminClient::new(&server_url).expect("client");

    let err = client
        .delete_event(&EventId::from(404))
        .await
        .expect_err("missing event");

    assert!(matches!(
        &err,
        ClientError::Api(api) if api.code == ErrorCode::NotFound
    ));
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(state.deleted.lock().await.is_empty());
}

#[tokio::test]
async fn lists_orders_and_marks_delivered_with_status_body() {
    let (server_url, state) = spawn_api_server().await.expect("spawn server");
    let client = AdminClient::new(&server_url).expect("client");

    let orders = client.list_orders().await.expect("orders");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, shared::domain::OrderStatus::Pending);
    assert_eq!(orders[0].cart[0].name, "Empanada");

    client
        .mark_order_delivered(&orders[0].id)
        .await
        .expect("patch");

    let patched = state.patched.lock().await;
    assert_eq!(patched.len(), 1);
    assert_eq!(patched[0].0, "7");
    assert_eq!(patched[0].1, json!({ "estado": "entregado" }));
}

#[tokio::test]
async fn reset_email_surfaces_application_rejection() {
    let (server_url, _state) = spawn_api_server().await.expect("spawn server");
    let client = AdminClient::new(&server_url).expect("client");

    client
        .send_reset_email("admin@mila.co")
        .await
        .expect("known address");

    let err = client
        .send_reset_email("nadie@mila.co")
        .await
        .expect_err("unknown address");
    assert_eq!(err.kind(), ErrorKind::Rejected);
    assert_eq!(err.user_message(), "El correo no está registrado");
}

#[tokio::test]
async fn password_reset_validates_before_sending() {
    let (server_url, state) = spawn_api_server().await.expect("spawn server");
    let client = AdminClient::new(&server_url).expect("client");

    let err = client.reset_password("corta").await.expect_err("too short");
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(state.password_bodies.lock().await.is_empty());

    client.reset_password("nueva123").await.expect("reset");
    assert_eq!(
        *state.password_bodies.lock().await,
        vec![json!({ "nuevaContrasena": "nueva123" })]
    );
}

#[tokio::test]
async fn unreachable_api_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = AdminClient::new(&format!("http://{addr}")).expect("client");
    let err = client.list_events().await.expect_err("nothing listening");

    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[test]
fn endpoints_extend_the_base_path() {
    let client = AdminClient::new("http://localhost:3000").expect("client");
    assert_eq!(
        client.endpoint(&["eventos", "7"]).as_str(),
        "http://localhost:3000/eventos/7"
    );

    let client = AdminClient::new("https://admin.example/api/").expect("client");
    assert_eq!(
        client.endpoint(&["pedidos", "a b"]).as_str(),
        "https://admin.example/api/pedidos/a%20b"
    );
}

#[test]
fn rejects_bases_that_cannot_hold_paths() {
    assert!(matches!(
        AdminClient::new("mailto:admin@mila.co"),
        Err(ClientError::Validation(_))
    ));
    assert!(matches!(
        AdminClient::new("not a url"),
        Err(ClientError::InvalidUrl(_))
    ));
}
