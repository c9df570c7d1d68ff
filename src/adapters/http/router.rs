//! Application router - every route plus the shared middleware stack.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, Router};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::adapters::websocket::{websocket_routes, Broadcaster, RealtimeState};
use crate::ports::RoomStore;

use super::autocomplete::{autocomplete_routes, AutocompleteHandlers};
use super::room::{room_routes, RoomHandlers};
use super::root::root_routes;

/// Everything the router needs from the process.
#[derive(Clone)]
pub struct RouterConfig {
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
    pub outbound_buffer: usize,
}

/// Assembles the REST and WebSocket routes over one store and broadcaster.
pub fn app_router(
    store: Arc<dyn RoomStore>,
    broadcaster: Broadcaster,
    config: &RouterConfig,
) -> Router {
    let realtime = RealtimeState::new(store.clone(), broadcaster, config.outbound_buffer);

    Router::new()
        .merge(root_routes())
        .merge(room_routes(RoomHandlers::from_store(store)))
        .merge(autocomplete_routes(AutocompleteHandlers::default()))
        .merge(websocket_routes(realtime))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRoomStore;
    use crate::adapters::websocket::ConnectionRegistry;

    #[test]
    fn app_router_builds_with_invalid_origin() {
        let config = RouterConfig {
            cors_origins: vec!["http://localhost:3000".into(), "bad\norigin".into()],
            request_timeout: Duration::from_secs(5),
            outbound_buffer: 8,
        };
        let _router = app_router(
            Arc::new(InMemoryRoomStore::new()),
            Broadcaster::new(Arc::new(ConnectionRegistry::new()), Duration::from_secs(1)),
            &config,
        );
    }
}
