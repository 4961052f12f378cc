//! Test doubles for the vector store and chat provider.
//!
//! `memory_store` runs in process; `fake_weaviate`, `fake_openai` and
//! `dataset_host` are HTTP servers on an ephemeral port that the real
//! clients can talk to.

pub mod fake_weaviate;

use axum::Router;
use tokio::net::TcpListener;

/// Serves `router` on 127.0.0.1 with an OS-assigned port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve test router");
    });
    format!("http://{addr}")
}
