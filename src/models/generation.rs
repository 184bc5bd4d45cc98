use crate::error::{ProxyError, Result, NO_IMAGE_MESSAGE};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_STYLE: &str = "realistic";

/// Inbound body of `POST /api/generate`, also forwarded to the gateway as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub image_data: String, // Base64 encoded, no data-URI prefix
    /// Forwarded verbatim, whatever JSON the client sent.
    pub style: Value,
}

impl GenerationRequest {
    pub fn new(image_data: impl Into<String>, style: impl Into<Value>) -> Self {
        Self {
            image_data: image_data.into(),
            style: style.into(),
        }
    }

    /// Validates a decoded client body. A missing, non-string or empty
    /// `imageData` is rejected. Only an absent `style` falls back to
    /// [`DEFAULT_STYLE`]; any value that is present, `null` included, is
    /// passed through.
    pub fn from_value(body: &Value) -> Result<Self> {
        let fields = body.as_object();

        let image_data = match fields.and_then(|f| f.get("imageData")) {
            Some(Value::String(data)) if !data.is_empty() => data.clone(),
            _ => return Err(ProxyError::ValidationError(NO_IMAGE_MESSAGE.to_string())),
        };

        let style = fields
            .and_then(|f| f.get("style"))
            .cloned()
            .unwrap_or_else(|| Value::String(DEFAULT_STYLE.to_string()));

        Ok(Self { image_data, style })
    }

    /// Style as text for log lines: strings without quotes, anything else as JSON.
    pub fn style_label(&self) -> String {
        match &self.style {
            Value::String(style) => style.clone(),
            other => other.to_string(),
        }
    }
}

/// Normalized success payload relayed to the client. Values are relayed as
/// the gateway sent them; fields the gateway left out are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_url: Option<Value>,
}
