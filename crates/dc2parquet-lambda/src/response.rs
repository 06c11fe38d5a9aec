// Response envelope returned to the invoker
//
// Both functions answer with `{ "statusCode": <int>, "body": <json> }`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: Value,
}

impl InvocationResponse {
    pub fn json(status_code: u16, body: Value) -> Self {
        Self { status_code, body }
    }

    pub fn text(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: Value::String(body.into()),
        }
    }
}
