use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Result, model::HttpMethod};

/// Severity assigned to findings raised by a detection rule.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    #[default]
    Medium,
    Low,
    Info,
}

/// Which traffic a detection rule applies to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RuleRequest {
    /// path pattern (regex)
    pub path: String,
    pub method: HttpMethod,
}

impl Default for RuleRequest {
    fn default() -> Self {
        Self {
            path: "/api/.*".to_string(),
            method: HttpMethod::GET,
        }
    }
}

/// Response conditions checked by a detection rule.
///
/// All present conditions are ANDed. An empty expected header value
/// means "header present, any value".
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MatchCriteria {
    /// exact status code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// body substring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// body regex
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_regex: Option<String>,
    /// header name to expected value
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

/// A standalone request-matching detection rule, authored independently
/// of workflows and handed off whole on save.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RuleModel {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub request: RuleRequest,
    #[serde(default, rename = "match")]
    pub criteria: MatchCriteria,
    /// impact description shown with findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    /// remediation advice shown with findings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl Default for RuleModel {
    fn default() -> Self {
        Self {
            name: "My Custom Rule".to_string(),
            description: "Detects specific patterns in responses.".to_string(),
            severity: Severity::Medium,
            request: RuleRequest::default(),
            criteria: MatchCriteria {
                status: Some(200),
                ..Default::default()
            },
            impact: None,
            remediation: None,
        }
    }
}

impl RuleModel {
    /// JSON payload for the rule submission boundary.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule() {
        let rule = RuleModel::default();
        assert_eq!(rule.name, "My Custom Rule");
        assert_eq!(rule.severity, Severity::Medium);
        assert_eq!(rule.request.path, "/api/.*");
        assert_eq!(rule.request.method, HttpMethod::GET);
        assert_eq!(rule.criteria.status, Some(200));
        assert!(rule.criteria.headers.is_empty());
    }

    #[test]
    fn test_severity_wire_names() {
        let rule = RuleModel {
            severity: Severity::Critical,
            ..Default::default()
        };
        let json = rule.to_json().unwrap();
        assert!(json.contains("\"CRITICAL\""));
        assert_eq!(Severity::Info.as_ref(), "INFO");
    }

    #[test]
    fn test_match_key_in_payload() {
        let json = RuleModel::default().to_json().unwrap();
        assert!(json.contains("\"match\""));
        assert!(!json.contains("\"criteria\""));
    }

    #[test]
    fn test_absent_metadata_omitted() {
        let json = RuleModel::default().to_json().unwrap();
        assert!(!json.contains("\"impact\""));
        assert!(!json.contains("\"remediation\""));
    }
}
