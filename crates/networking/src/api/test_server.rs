//! Local axum server for exercising the client against real HTTP

use axum::Router;

/// Serve `router` on an ephemeral port and return its base URL
pub(crate) async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    format!("http://{}", addr)
}

pub(crate) fn client(base_url: &str) -> crate::AdminClient {
    crate::AdminClient::new(crate::ClientConfig::new(base_url).with_token("test-token"))
        .expect("client")
}
