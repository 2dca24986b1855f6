//! Tool-result shaping
//!
//! The terminal step of every lookup: wrap a payload or an error into an MCP
//! `CallToolResult`. Infallible by construction.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

use crate::error::LookupError;

/// Wrap a successful payload
///
/// serde_json's default map is ordered, so the embedded serialization is
/// deterministic for a given payload.
pub fn success(payload: &Value) -> CallToolResult {
    CallToolResult::success(vec![Content::text(format!(
        "The related information is: {payload}"
    ))])
}

/// Wrap a lookup failure
pub fn error(err: &LookupError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Error fetching data: {err}"))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_of(result: &CallToolResult) -> String {
        let value = serde_json::to_value(result).unwrap();
        value["content"][0]["text"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_success_embeds_serialized_payload() {
        let payload = json!({"identity": {"identity": "vitalik.eth", "platform": "ens"}});
        let result = success(&payload);

        assert_ne!(result.is_error, Some(true));
        let text = text_of(&result);
        assert!(text.starts_with("The related information is: "));
        assert!(text.contains("vitalik.eth"));
    }

    #[test]
    fn test_error_is_flagged_and_readable() {
        let err = LookupError::InvalidPlatform("platform cannot be empty".to_string());
        let result = error(&err);

        assert_eq!(result.is_error, Some(true));
        let text = text_of(&result);
        assert_eq!(
            text,
            "Error fetching data: Invalid platform: platform cannot be empty"
        );
    }
}
