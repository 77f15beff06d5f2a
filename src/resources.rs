#![deny(warnings)]

// Read-only MCP resources

use crate::error::{McpError, Result};
use serde_json::{json, Value};

/// URI template of the greeting resource
pub const GREETING_TEMPLATE: &str = "greeting://{name}";

const GREETING_SCHEME: &str = "greeting://";
const TEXT_MIME_TYPE: &str = "text/plain";

/// Produce a personalized greeting
pub fn get_greeting(name: &str) -> String {
    format!("Hello, {}!", name)
}

/// Extract `{name}` from a `greeting://{name}` URI.
///
/// The name must be a single non-empty path segment.
fn match_greeting(uri: &str) -> Option<&str> {
    uri.strip_prefix(GREETING_SCHEME)
        .filter(|name| !name.is_empty() && !name.contains('/'))
}

/// Resource templates in MCP format
pub fn list_resource_templates() -> Value {
    json!([
        {
            "uriTemplate": GREETING_TEMPLATE,
            "name": "get_greeting",
            "description": "Get a personalized greeting",
            "mimeType": TEXT_MIME_TYPE
        }
    ])
}

/// Concrete (non-templated) resources. There are none.
pub fn list_resources() -> Value {
    json!([])
}

/// Resolve a resource URI and return its contents in MCP format
pub fn read_resource(uri: &str) -> Result<Value> {
    let name = match_greeting(uri).ok_or_else(|| McpError::ResourceNotFound(uri.to_string()))?;

    Ok(json!({
        "contents": [{
            "uri": uri,
            "mimeType": TEXT_MIME_TYPE,
            "text": get_greeting(name)
        }]
    }))
}
