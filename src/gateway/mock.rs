use crate::{
    error::{ProxyError, Result},
    gateway::Gateway,
    models::{GatewayReply, GenerationRequest},
};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

enum Canned {
    Reply(GatewayReply),
    Fail(String),
}

/// In-process gateway that answers every call with the same canned reply
/// and records what it was sent.
pub struct MockGateway {
    canned: Canned,
    calls: Mutex<Vec<GenerationRequest>>,
}

impl MockGateway {
    pub fn replying(status: u16, body: impl Into<String>) -> Self {
        Self {
            canned: Canned::Reply(GatewayReply::new(status, body)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::replying(status, body.to_string())
    }

    /// Fails at the transport level, like a refused connection.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            canned: Canned::Fail(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.lock_calls().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    fn lock_calls(&self) -> MutexGuard<'_, Vec<GenerationRequest>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn forward(&self, request: &GenerationRequest) -> Result<GatewayReply> {
        self.lock_calls().push(request.clone());
        match &self.canned {
            Canned::Reply(reply) => Ok(reply.clone()),
            Canned::Fail(message) => Err(ProxyError::InternalError(message.clone())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
