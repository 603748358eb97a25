use async_trait::async_trait;
use reqwest::header::REFERER;
use url::Url;

use crate::config::FetchSettings;
use crate::core::error::{AppError, FetchFailure};
use crate::core::http_client::build_http_client;
use crate::features::fetcher::dto::RawResponse;

/// One HTTP GET, no retries. Non-2xx statuses come back as `Ok`; only
/// failures below HTTP (connect, timeout, body read) are `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url, referer: Option<&str>) -> Result<RawResponse, FetchFailure>;
}

pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(settings: &FetchSettings) -> Result<Self, AppError> {
        let http_client = build_http_client(
            &settings.user_agent,
            settings.timeout(),
            settings.disable_proxy,
        )
        .map_err(|err| AppError::internal(format!("failed to build HTTP client: {err}")))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url, referer: Option<&str>) -> Result<RawResponse, FetchFailure> {
        let mut request = self.http_client.get(url.clone());
        if let Some(referer) = referer {
            request = request.header(REFERER, referer);
        }

        let response = request
            .send()
            .await
            .map_err(|err| FetchFailure::Network(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| FetchFailure::Network(format!("failed to read body: {err}")))?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_status_and_body_without_judging_them() {
        let mut server = mockito::Server::new_async().await;
        let ok = server
            .mock("GET", "/index.htm")
            .match_header("referer", "https://results.example.test")
            .with_status(200)
            .with_body("<html><title>Results</title></html>")
            .create_async()
            .await;
        let missing = server
            .mock("GET", "/missing.htm")
            .with_status(404)
            .with_body("not found")
            .create_async()
            .await;

        let settings = FetchSettings {
            disable_proxy: true,
            ..FetchSettings::default()
        };
        let transport = HttpTransport::new(&settings).expect("transport");
        let base = Url::parse(&server.url()).expect("server url");

        let response = transport
            .get(
                &base.join("/index.htm").expect("join"),
                Some("https://results.example.test"),
            )
            .await
            .expect("index response");
        assert_eq!(response.status, 200);
        assert!(response.body.contains("Results"));

        let response = transport
            .get(&base.join("/missing.htm").expect("join"), None)
            .await
            .expect("404 is still a response");
        assert_eq!(response.status, 404);

        ok.assert_async().await;
        missing.assert_async().await;
    }
}
