//! Axum server exposing groups over HTTP, mirroring the reference
//! implementation's single handler mounted at `<base_path>/<group>/<key>`.

use std::net::SocketAddr;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tracing::{info, info_span, warn, Instrument};

use crate::error::GroupError;
use crate::group;

/// Binds and serves the HTTP peer transport on `addr` until the process is
/// killed or the returned future is dropped.
///
/// `self_addr` is carried as a tracing span field on every request so log
/// lines identify which peer served them, matching the reference
/// implementation's `[Server %s] %s` prefix.
pub async fn serve(
    addr: SocketAddr,
    self_addr: String,
    base_path: &str,
) -> std::io::Result<()> {
    let route = format!("{}:group/:key", base_path);
    let app = Router::new()
        .route(&route, get(handle_get))
        .layer(axum::Extension(self_addr.clone()));

    info!(self_addr = %self_addr, %addr, "peer transport listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn handle_get(
    axum::Extension(self_addr): axum::Extension<String>,
    Path((group_name, key)): Path<(String, String)>,
) -> Response {
    let span = info_span!("peer_request", peer = %self_addr, group = %group_name, key = %key);
    async move {
        let Some(group) = group::get_group(&group_name) else {
            warn!(group = %group_name, "unknown group requested");
            return (StatusCode::NOT_FOUND, format!("no such group: {group_name}")).into_response();
        };

        match group.get(&key).await {
            Ok(value) => (StatusCode::OK, value.to_vec()).into_response(),
            Err(err) => group_error_response(err),
        }
    }
    .instrument(span)
    .await
}

fn group_error_response(err: GroupError) -> Response {
    let status = match err {
        GroupError::EmptyKey => StatusCode::BAD_REQUEST,
        GroupError::UnknownGroup(_) => StatusCode::NOT_FOUND,
        GroupError::Loader(_) | GroupError::Peer(_) | GroupError::Join(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        GroupError::PeersAlreadyRegistered(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string()).into_response()
}
