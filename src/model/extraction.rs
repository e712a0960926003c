use serde::{Deserialize, Serialize};

/// Response part an extraction rule reads from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExtractSource {
    #[default]
    Body,
    Header,
}

/// One instruction for pulling a named variable out of a step response.
///
/// An extraction with an empty `variable` is inert but structurally
/// valid; the editor allows it while the operator is still typing.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// where to read from
    #[serde(default)]
    pub source: ExtractSource,
    /// JSON key (dot notation) or header name
    #[serde(default)]
    pub key: String,
    /// capture regex applied to the raw body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    /// variable name the value is saved under
    #[serde(default)]
    pub variable: String,
}
