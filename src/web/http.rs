use gloo_net::http::{Request, Response};

use crate::api::{Method, Outgoing, Reply, Transport};

/// `fetch` transport. Only network-level failures are errors; HTTP statuses are passed up.
pub(super) struct FetchTransport;

impl Transport for FetchTransport {
    async fn exchange(&self, request: Outgoing) -> Result<Reply, String> {
        let response = send(request).await.map_err(|e| e.to_string())?;
        let status = response.status();
        let body = response.text().await.map_err(|e| e.to_string())?;
        Ok(Reply { status, body })
    }
}

async fn send(request: Outgoing) -> Result<Response, gloo_net::Error> {
    match (request.method, request.body) {
        (Method::Get, _) => Request::get(&request.url).send().await,
        (Method::Post, body) => {
            Request::post(&request.url)
                .header("Content-Type", "application/json")
                .body(body.unwrap_or_else(|| "{}".to_string()))?
                .send()
                .await
        }
    }
}
