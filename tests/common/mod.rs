//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use named_routes::config::{build_tree, parse_config};
use named_routes::{HttpServer, Shutdown};

/// app ("/") ─ "m" → child ("/m/")
///           └ "orgs" → team ("/orgs/:org")
pub const ROUTES: &str = r#"
[[scopes]]
name = "app"
[scopes.routes]
home = "/"
p = "/p"
m = "/m/"
orgs = "/orgs/:org"
param = "/param-route/:param"
nested = { index = "/nested-route", show = "/nested-route/show" }

[[scopes]]
name = "child"
[scopes.routes]
r = "/r"
item = "/items/:id"
items = { index = "/items" }

[[scopes]]
name = "team"
[scopes.routes]
members = "/members"
member = "/members/:member"

[[mounts]]
parent = "app"
name = "m"
child = "child"

[[mounts]]
parent = "app"
name = "orgs"
child = "team"
"#;

/// Start a server for [`ROUTES`] on `addr`. Trigger the returned handle to stop it.
pub async fn start_server(addr: SocketAddr) -> Shutdown {
    let mut config = parse_config(ROUTES).unwrap();
    config.listener.bind_address = addr.to_string();
    let (tree, root) = build_tree(&config).unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Arc::new(tree), root);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    shutdown
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// GET `path` and return status and body.
#[allow(dead_code)]
pub async fn get(addr: SocketAddr, path: &str) -> (u16, String) {
    let res = client()
        .get(format!("http://{}{}", addr, path))
        .send()
        .await
        .expect("server unreachable");
    let status = res.status().as_u16();
    (status, res.text().await.unwrap())
}
