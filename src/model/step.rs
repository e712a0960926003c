use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::model::Extraction;

/// default request path for a freshly added http step
const DEFAULT_STEP_PATH: &str = "/";

/// Action kinds a step can use.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionType {
    #[default]
    HttpRequest,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
    HEAD,
    OPTIONS,
}

impl HttpMethod {
    /// Whether requests with this method usually carry a body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::POST | HttpMethod::PUT | HttpMethod::PATCH)
    }
}

/// One step of a workflow definition.
///
/// The action variant is flattened into the step so the text form keeps
/// the flat `action: http_request` shape alongside the action's fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StepModel {
    /// step id, a generated label
    pub id: String,
    /// display name
    pub name: String,
    #[serde(flatten)]
    pub action: StepAction,
    /// extraction rules applied to this step's response
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extract: Vec<Extraction>,
}

impl StepModel {
    /// Build a defaulted step for `action_type` under the given id.
    pub fn new(
        id: impl Into<String>,
        action_type: ActionType,
    ) -> Self {
        let action = match action_type {
            ActionType::HttpRequest => StepAction::HttpRequest(HttpRequestStep::default()),
        };

        Self {
            id: id.into(),
            name: format!("New {} Step", action_type.as_ref()),
            action,
            extract: Vec::new(),
        }
    }

    /// action kind of this step
    pub fn action_type(&self) -> ActionType {
        match &self.action {
            StepAction::HttpRequest(_) => ActionType::HttpRequest,
        }
    }

    /// http request data, if this step is an `http_request`
    pub fn http_request(&self) -> Option<&HttpRequestStep> {
        match &self.action {
            StepAction::HttpRequest(http) => Some(http),
        }
    }

    /// mutable http request data, if this step is an `http_request`
    pub fn http_request_mut(&mut self) -> Option<&mut HttpRequestStep> {
        match &mut self.action {
            StepAction::HttpRequest(http) => Some(http),
        }
    }
}

/// Data for one step action, tagged by kind.
///
/// Keeping the per-kind fields inside the variant means a future action
/// kind cannot silently clobber fields belonging to another one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StepAction {
    HttpRequest(HttpRequestStep),
}

/// Fields of an `http_request` step.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HttpRequestStep {
    #[serde(default)]
    pub method: HttpMethod,
    /// request path, may contain `${var}` placeholders
    #[serde(default)]
    pub path: String,
    /// extra request headers
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// query parameters
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, JsonValue>,
    /// request body, a raw string or a structured value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonValue>,
    /// run enabled detection rules against this step's request
    #[serde(default = "default_scan", skip_serializing_if = "is_default_scan")]
    pub scan: bool,
}

impl Default for HttpRequestStep {
    fn default() -> Self {
        Self {
            method: HttpMethod::GET,
            path: DEFAULT_STEP_PATH.to_string(),
            headers: BTreeMap::new(),
            params: BTreeMap::new(),
            body: None,
            scan: true,
        }
    }
}

fn default_scan() -> bool {
    true
}

fn is_default_scan(scan: &bool) -> bool {
    *scan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_step_defaults() {
        let step = StepModel::new("step_1", ActionType::HttpRequest);
        assert_eq!(step.id, "step_1");
        assert_eq!(step.name, "New http_request Step");
        assert!(step.extract.is_empty());

        let http = step.http_request().unwrap();
        assert_eq!(http.method, HttpMethod::GET);
        assert_eq!(http.path, DEFAULT_STEP_PATH);
        assert!(http.body.is_none());
        assert!(http.scan);
    }

    #[test]
    fn test_step_wire_form_is_flat() {
        let step = StepModel::new("step_1", ActionType::HttpRequest);
        let value = serde_json::to_value(&step).unwrap();

        // the action tag sits alongside the action's own fields
        assert_eq!(value["action"], "http_request");
        assert_eq!(value["method"], "GET");
        assert_eq!(value["path"], "/");
        // defaults are omitted from the wire form
        assert!(value.get("body").is_none());
        assert!(value.get("scan").is_none());
        assert!(value.get("extract").is_none());
    }

    #[test]
    fn test_methods_with_body() {
        assert!(HttpMethod::POST.has_body());
        assert!(HttpMethod::PUT.has_body());
        assert!(HttpMethod::PATCH.has_body());
        assert!(!HttpMethod::GET.has_body());
        assert!(!HttpMethod::DELETE.has_body());
    }
}
