//! Outbound side of the proxy: the API gateway in front of the generation function.

pub mod http_client;
pub mod mock;

pub use http_client::HttpGateway;
pub use mock::MockGateway;

use crate::{
    error::Result,
    models::{GatewayReply, GenerationRequest},
};
use async_trait::async_trait;

/// Sends one generation request and returns the raw status and body.
///
/// Implementations make a single attempt and never interpret the body;
/// shape detection happens in [`crate::models::GatewayResponse`].
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn forward(&self, request: &GenerationRequest) -> Result<GatewayReply>;

    fn name(&self) -> &str {
        "gateway"
    }
}
