//! Stand-in for the monitored `handleMsg.do` endpoint.
//!
//! Echoes the HTTP method and the `name` query parameter so the simulated
//! target can be exercised by hand.

use axum::extract::Query;
use axum::http::Method;
use axum::Json;
use serde::{Deserialize, Serialize};

const GREETING: &str = "Halo dari handleMsg.do!";

#[derive(Debug, Deserialize)]
pub struct HandleMsgQuery {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandleMsgResponse {
    pub message: String,
    pub method_digunakan: String,
    pub input_nama: String,
    pub status: String,
}

/// GET|POST /data/handleMsg.do?name=
pub async fn handle_msg(
    method: Method,
    Query(query): Query<HandleMsgQuery>,
) -> Json<HandleMsgResponse> {
    let name = query
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Guest".to_string());

    Json(HandleMsgResponse {
        message: GREETING.to_string(),
        method_digunakan: method.to_string(),
        input_nama: name,
        status: "success".to_string(),
    })
}
