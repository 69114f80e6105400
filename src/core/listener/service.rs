//! HTTP service bound for a running node

use super::ListenerSettings;
use crate::core::node::{Node, NodeAddress, NodeId};
use crate::utils::error::{Result, WardenError};
use actix_web::dev::Server;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::json;
use std::io;

#[derive(Debug, Clone)]
struct NodeBanner {
    node_id: NodeId,
    name: String,
    address: NodeAddress,
}

/// Bind the node's address and build its server; the server only accepts
/// connections once polled
pub(super) fn build_server(node: &Node, settings: &ListenerSettings) -> Result<Server> {
    let address = node.address;
    let banner = web::Data::new(NodeBanner {
        node_id: node.id,
        name: node.name.clone(),
        address,
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(banner.clone())
            .wrap(DefaultHeaders::new().add(("Server", "nodewarden")))
            .route("/health", web::get().to(node_health))
            .default_service(web::to(node_banner))
    })
    .workers(settings.workers.max(1))
    .shutdown_timeout(settings.shutdown_timeout.as_secs().max(1))
    .disable_signals()
    .bind(address.socket_addr())
    .map_err(|e| match e.kind() {
        io::ErrorKind::AddrInUse => WardenError::address_in_use(address.to_string()),
        _ => WardenError::bind(address.to_string(), e),
    })?
    .run();

    Ok(server)
}

async fn node_banner(banner: web::Data<NodeBanner>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(format!("Node {} is running at {}", banner.name, banner.address))
}

async fn node_health(banner: web::Data<NodeBanner>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "node_id": banner.node_id,
        "name": banner.name,
        "status": "ok",
    }))
}
