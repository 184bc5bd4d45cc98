use crate::{
    config::GatewayConfig,
    error::{ProxyError, Result},
    gateway::{Gateway, HttpGateway},
    logger,
    models::{GatewayResponse, GenerationRequest, GenerationResult, ImageStyle},
};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Forwards canvas submissions to the generation gateway.
///
/// Holds no per-request state: the same proxy serves every request and two
/// identical submissions produce two gateway round trips.
#[derive(Clone)]
pub struct GenerationProxy {
    gateway: Option<Arc<dyn Gateway>>,
}

impl GenerationProxy {
    /// Builds an HTTP-backed proxy. A config without a gateway URL still
    /// yields a proxy; each request through it fails with a configuration error.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let gateway: Option<Arc<dyn Gateway>> = match &config.url {
            Some(url) => Some(Arc::new(HttpGateway::new(url.clone(), config.timeout())?)),
            None => None,
        };
        Ok(Self { gateway })
    }

    pub fn with_gateway(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway: Some(gateway),
        }
    }

    pub fn unconfigured() -> Self {
        Self { gateway: None }
    }

    pub fn is_configured(&self) -> bool {
        self.gateway.is_some()
    }

    /// Runs the whole endpoint contract on a raw request body.
    pub async fn handle(&self, body: &[u8]) -> Result<GenerationResult> {
        let request_id = Uuid::new_v4().to_string();
        let _timer = logger::timer(format!("generate [req:{}]", request_id));

        let outcome = self.handle_inner(&request_id, body).await;
        match &outcome {
            Ok(_) => log::info!("[req:{}] Generation succeeded", request_id),
            Err(e) => log::error!(
                "[req:{}] Generation failed ({} error, status {}): {}",
                request_id,
                e.kind(),
                e.status_code(),
                e
            ),
        }
        outcome
    }

    async fn handle_inner(&self, request_id: &str, body: &[u8]) -> Result<GenerationResult> {
        let gateway = self
            .gateway
            .as_ref()
            .ok_or_else(ProxyError::missing_gateway_url)?;

        let value: Value = serde_json::from_slice(body)?;
        log::debug!(
            "[req:{}] Received body keys: {:?}",
            request_id,
            value
                .as_object()
                .map(|fields| fields.keys().cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        );

        let request = GenerationRequest::from_value(&value)?;
        self.forward(request_id, gateway.as_ref(), &request).await
    }

    /// Forwards an already validated request.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let gateway = self
            .gateway
            .as_ref()
            .ok_or_else(ProxyError::missing_gateway_url)?;
        if request.image_data.is_empty() {
            return Err(ProxyError::ValidationError(
                crate::error::NO_IMAGE_MESSAGE.to_string(),
            ));
        }

        let request_id = Uuid::new_v4().to_string();
        self.forward(&request_id, gateway.as_ref(), request).await
    }

    async fn forward(
        &self,
        request_id: &str,
        gateway: &dyn Gateway,
        request: &GenerationRequest,
    ) -> Result<GenerationResult> {
        let style = request.style_label();
        if request.style.as_str().and_then(ImageStyle::from_id).is_none() {
            log::warn!(
                "[req:{}] Unknown style '{}', forwarding unchanged",
                request_id,
                style
            );
        }

        log::info!(
            "[req:{}] Forwarding to {} gateway: imageData {} chars, style '{}'",
            request_id,
            gateway.name(),
            request.image_data.len(),
            style
        );

        let reply = gateway.forward(request).await?;
        log::info!(
            "[req:{}] Gateway status {}, body {} bytes",
            request_id,
            reply.status,
            reply.body.len()
        );

        if !reply.is_success() {
            log::warn!(
                "[req:{}] Gateway invocation failed ({} bytes): {}",
                request_id,
                reply.body.len(),
                log_excerpt(&reply.body)
            );
            return Err(ProxyError::upstream(reply.status, reply.body));
        }

        let response = GatewayResponse::parse(&reply.body)?;
        log::debug!("[req:{}] Gateway response shape: {}", request_id, response.shape());

        response.into_outcome()?.into_result()
    }
}

const LOG_EXCERPT_CHARS: usize = 200;

/// First [`LOG_EXCERPT_CHARS`] characters of an upstream body.
fn log_excerpt(body: &str) -> String {
    match body.char_indices().nth(LOG_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}…", &body[..cut]),
        None => body.to_string(),
    }
}
