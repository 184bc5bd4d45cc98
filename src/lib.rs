pub mod config;
pub mod error;
pub mod gateway;
pub mod logger;
pub mod models;
pub mod proxy;
#[cfg(feature = "server")]
pub mod server;

pub use config::{Config, GatewayConfig};
pub use error::{ErrorBody, ProxyError, Result};
pub use gateway::{Gateway, HttpGateway, MockGateway};
pub use models::*;
pub use proxy::GenerationProxy;
