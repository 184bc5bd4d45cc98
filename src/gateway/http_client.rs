use crate::{
    config::GatewayConfig,
    error::{ProxyError, Result},
    gateway::Gateway,
    models::{GatewayReply, GenerationRequest},
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    url: String,
}

impl HttpGateway {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProxyError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let url = config
            .url
            .clone()
            .ok_or_else(ProxyError::missing_gateway_url)?;
        Self::new(url, config.timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn forward(&self, request: &GenerationRequest) -> Result<GatewayReply> {
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        log::debug!(
            "Gateway responded with status {} ({:?})",
            status,
            response.headers().get(reqwest::header::CONTENT_TYPE)
        );

        let body = response.text().await?;
        Ok(GatewayReply { status, body })
    }

    fn name(&self) -> &str {
        "http"
    }
}
