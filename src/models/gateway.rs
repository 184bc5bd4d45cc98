use crate::{
    error::{ProxyError, Result, PROCESSING_FALLBACK_MESSAGE},
    models::GenerationResult,
};
use serde::Deserialize;
use serde_json::Value;

/// Raw HTTP reply from the gateway, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReply {
    pub status: u16,
    pub body: String,
}

impl GatewayReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The two shapes a successful gateway reply can take.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayResponse {
    /// API-gateway proxy envelope: the real payload is JSON encoded in `body`.
    Envelope(String),
    Direct(GatewayOutcome),
}

/// Every field stays raw JSON so decoding an object never fails; types are
/// only looked at after `success` has been checked.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct GatewayOutcome {
    #[serde(default)]
    pub success: Value,
    #[serde(default)]
    pub error: Value,
    #[serde(default)]
    pub data: Value,
}

impl GatewayResponse {
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value.get("body") {
            Some(Value::String(body)) if !body.is_empty() => Ok(Self::Envelope(body.clone())),
            _ => Ok(Self::Direct(GatewayOutcome::from_value(value)?)),
        }
    }

    pub fn shape(&self) -> &'static str {
        match self {
            GatewayResponse::Envelope(_) => "envelope",
            GatewayResponse::Direct(_) => "direct",
        }
    }

    /// Unwraps one level of envelope. The inner body is not unwrapped again.
    pub fn into_outcome(self) -> Result<GatewayOutcome> {
        match self {
            GatewayResponse::Envelope(body) => {
                let inner: Value = serde_json::from_str(&body)?;
                GatewayOutcome::from_value(inner)
            }
            GatewayResponse::Direct(outcome) => Ok(outcome),
        }
    }
}

impl GatewayOutcome {
    /// Anything that is not a JSON object carries no `success` flag and
    /// therefore reads as a failed outcome.
    pub fn from_value(value: Value) -> Result<Self> {
        if value.is_object() {
            Ok(serde_json::from_value(value)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn is_success(&self) -> bool {
        is_truthy(&self.success)
    }

    pub fn error_message(&self) -> String {
        match &self.error {
            Value::String(msg) if !msg.is_empty() => msg.clone(),
            other if is_truthy(other) => other.to_string(),
            _ => PROCESSING_FALLBACK_MESSAGE.to_string(),
        }
    }

    pub fn into_result(self) -> Result<GenerationResult> {
        if !self.is_success() {
            return Err(ProxyError::ProcessingError(self.error_message()));
        }

        if self.data.is_null() {
            return Err(ProxyError::InternalError(
                "Gateway response is missing data".to_string(),
            ));
        }

        let field = |name: &str| self.data.get(name).cloned();
        Ok(GenerationResult {
            prompt: field("prompt"),
            image: field("imageBase64"),
            s3_url: field("s3Url"),
        })
    }
}

/// JSON truthiness: null, false, 0 and "" are falsy; arrays and objects
/// are truthy even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DIRECT: &str =
        r#"{"success":true,"data":{"prompt":"p","imageBase64":"img","s3Url":"url"}}"#;

    fn expected() -> GenerationResult {
        GenerationResult {
            prompt: Some("p".into()),
            image: Some("img".into()),
            s3_url: Some("url".into()),
        }
    }

    #[test]
    fn direct_shape_normalizes() {
        let response = GatewayResponse::parse(DIRECT).unwrap();
        assert_eq!(response.shape(), "direct");
        let result = response.into_outcome().unwrap().into_result().unwrap();
        assert_eq!(result, expected());
    }

    #[test]
    fn envelope_shape_unwraps_string_body() {
        let raw = json!({ "statusCode": 200, "body": DIRECT }).to_string();
        let response = GatewayResponse::parse(&raw).unwrap();
        assert_eq!(response.shape(), "envelope");
        let result = response.into_outcome().unwrap().into_result().unwrap();
        assert_eq!(result, expected());
    }

    #[test]
    fn non_string_body_is_not_an_envelope() {
        let raw = json!({ "success": true, "body": { "nested": true }, "data": {} }).to_string();
        let response = GatewayResponse::parse(&raw).unwrap();
        assert_eq!(response.shape(), "direct");
        assert!(response.into_outcome().unwrap().is_success());
    }

    #[test]
    fn empty_string_body_is_not_an_envelope() {
        let raw = json!({ "success": false, "body": "" }).to_string();
        assert_eq!(GatewayResponse::parse(&raw).unwrap().shape(), "direct");
    }

    #[test]
    fn malformed_envelope_body_is_internal() {
        let raw = json!({ "body": "{not json" }).to_string();
        let err = GatewayResponse::parse(&raw)
            .unwrap()
            .into_outcome()
            .unwrap_err();
        assert!(matches!(err, ProxyError::InternalError(_)));
    }

    #[test]
    fn logical_failure_uses_gateway_error() {
        let err = GatewayResponse::parse(r#"{"success":false,"error":"model timeout"}"#)
            .unwrap()
            .into_outcome()
            .unwrap()
            .into_result()
            .unwrap_err();
        assert!(matches!(err, ProxyError::ProcessingError(ref msg) if msg == "model timeout"));
    }

    #[test]
    fn logical_failure_without_error_uses_fallback() {
        for raw in [r#"{"success":false}"#, r#"{}"#, r#"{"success":0,"error":""}"#, "[]"] {
            let err = GatewayResponse::parse(raw)
                .unwrap()
                .into_outcome()
                .unwrap()
                .into_result()
                .unwrap_err();
            assert_eq!(err.to_string(), PROCESSING_FALLBACK_MESSAGE, "raw: {}", raw);
        }
    }

    #[test]
    fn missing_data_is_internal() {
        let err = GatewayResponse::parse(r#"{"success":true}"#)
            .unwrap()
            .into_outcome()
            .unwrap()
            .into_result()
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.kind(), "internal");
    }

    #[test]
    fn partial_data_omits_missing_fields() {
        let result = GatewayResponse::parse(r#"{"success":"yes","data":{"prompt":"a cat"}}"#)
            .unwrap()
            .into_outcome()
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "prompt": "a cat" })
        );
    }

    #[test]
    fn logical_failure_ignores_unexpected_data_shape() {
        let err = GatewayResponse::parse(r#"{"success":false,"error":"model timeout","data":"n/a"}"#)
            .unwrap()
            .into_outcome()
            .unwrap()
            .into_result()
            .unwrap_err();
        assert_eq!(err.kind(), "processing");
        assert_eq!(err.to_string(), "model timeout");
    }

    #[test]
    fn non_string_data_fields_pass_through() {
        let result = GatewayResponse::parse(
            r#"{"success":true,"data":{"prompt":7,"imageBase64":null,"s3Url":["a","b"]}}"#,
        )
        .unwrap()
        .into_outcome()
        .unwrap()
        .into_result()
        .unwrap();
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "prompt": 7, "image": null, "s3Url": ["a", "b"] })
        );
    }

    #[test]
    fn non_object_data_yields_empty_result() {
        let result = GatewayResponse::parse(r#"{"success":true,"data":"n/a"}"#)
            .unwrap()
            .into_outcome()
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(result, GenerationResult::default());
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("false")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn reply_success_range() {
        assert!(GatewayReply::new(200, "").is_success());
        assert!(GatewayReply::new(204, "").is_success());
        assert!(!GatewayReply::new(302, "").is_success());
        assert!(!GatewayReply::new(502, "bad gateway").is_success());
    }
}
