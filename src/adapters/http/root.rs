//! Service root - name, version and an endpoint map.

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, Serialize)]
pub struct Endpoints {
    pub rooms: &'static str,
    pub autocomplete: &'static str,
    pub websocket: &'static str,
}

/// GET / - Service info
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Codepair API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            rooms: "/rooms",
            autocomplete: "/autocomplete",
            websocket: "/ws/{room_id}",
        },
    })
}

pub fn root_routes() -> Router {
    Router::new().route("/", get(service_info))
}
