use axum::{
    body::Bytes,
    extract::Path,
    http::StatusCode,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// JSON payload served by `/json`, shaped to exercise typed decoding.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Payload {
    #[serde(rename = "SomeField")]
    pub some_field: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/text", get(plain_text))
        .route("/json", get(json_payload))
        .route("/echo", any(echo))
        .route("/status/{code}", get(with_status))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn plain_text() -> &'static str {
    "hello world"
}

async fn json_payload() -> Json<Payload> {
    Json(Payload {
        some_field: "x".to_string(),
    })
}

async fn echo(body: Bytes) -> Bytes {
    body
}

async fn with_status(Path(code): Path<u16>) -> (StatusCode, String) {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, format!("status {}", status.as_u16()))
}
