//! Parameter model as returned by the parameter store's `GetParameter` call.

use serde::{Deserialize, Serialize};

/// Envelope returned by the parameter store endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct GetParameterResponse {
    pub parameter: Parameter,
}

/// A single named value from the parameter store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    /// Full parameter name, e.g. `/challenge/dynamic_string`
    pub name: String,

    /// Stored value (never decrypted)
    pub value: String,

    /// `String`, `StringList` or `SecureString`
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,

    #[serde(rename = "ARN", default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
}
