use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::files::FileServer;
use crate::http::connection::Connection;

/// Binds the listen address and serves connections until the task is
/// dropped. Each accepted connection runs in its own task with its own
/// buffers; a failing connection never takes the accept loop down.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let routes: Arc<Vec<FileServer>> = Arc::new(
        cfg.routes
            .iter()
            .map(|r| FileServer::new(r.prefix.clone(), r.root.clone()))
            .collect(),
    );

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", cfg.listen_addr);

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let routes = Arc::clone(&routes);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, routes);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
