//! Conversion between the structural workflow model and its YAML text
//! form.
//!
//! The structural model is the source of truth and the text is a derived
//! view: serialization runs after every structural change, parsing only
//! at explicit load time. Text produced here is never fed back through
//! the parser, so the two directions cannot form a feedback loop.
//!
//! Parsing a workflow and serializing it again normalizes formatting
//! (key order, quoting, omitted defaults) but never changes meaning.

use std::{fs, path::Path};

use crate::{Result, ScanflowError, model::WorkflowModel};

/// Serialize a workflow definition into its YAML text form.
///
/// Total over any model the structural editor can produce; the error arm
/// exists to satisfy the serializer interface.
pub fn to_text(workflow: &WorkflowModel) -> Result<String> {
    match serde_yaml::to_string(workflow) {
        Ok(text) => Ok(text),
        Err(e) => Err(ScanflowError::Serialize(format!("{}", e))),
    }
}

/// Parse a YAML text form back into a workflow definition.
///
/// Malformed input is reported as [`ScanflowError::Parse`]; no partial
/// model is ever produced.
pub fn from_text(text: &str) -> Result<WorkflowModel> {
    let workflow = serde_yaml::from_str::<WorkflowModel>(text);
    match workflow {
        Ok(v) => Ok(v),
        Err(e) => Err(ScanflowError::Parse(format!("{}", e))),
    }
}

/// Load a workflow definition from a YAML file.
pub fn from_file<T: AsRef<Path>>(path: T) -> Result<WorkflowModel> {
    let data = fs::read_to_string(path.as_ref())?;
    from_text(data.as_str())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{ActionType, ExtractSource, Extraction, HttpMethod, StepModel};

    fn sample_workflow() -> WorkflowModel {
        let mut workflow = WorkflowModel {
            name: "Login and fetch".to_string(),
            ..Default::default()
        };

        let mut login = StepModel::new("step_1", ActionType::HttpRequest);
        if let Some(http) = login.http_request_mut() {
            http.method = HttpMethod::POST;
            http.path = "/api/login".to_string();
            http.body = Some(json!({"username": "admin", "password": "${password}"}));
        }
        login.extract.push(Extraction {
            source: ExtractSource::Body,
            key: "token".to_string(),
            regex: None,
            variable: "auth_token".to_string(),
        });
        workflow.steps.push(login);

        let mut fetch = StepModel::new("step_2", ActionType::HttpRequest);
        if let Some(http) = fetch.http_request_mut() {
            http.path = "/api/me".to_string();
            http.headers.insert("Authorization".to_string(), "Bearer ${auth_token}".to_string());
        }
        workflow.steps.push(fetch);

        workflow
    }

    // ==================== round trip tests ====================

    #[test]
    fn test_round_trip_preserves_model() {
        let workflow = sample_workflow();
        let text = to_text(&workflow).unwrap();
        let parsed = from_text(&text).unwrap();
        assert_eq!(parsed, workflow);
    }

    #[test]
    fn test_round_trip_empty_workflow() {
        let workflow = WorkflowModel::default();
        let parsed = from_text(&to_text(&workflow).unwrap()).unwrap();
        assert_eq!(parsed, workflow);
    }

    #[test]
    fn test_round_trip_keeps_empty_extraction_fields() {
        let mut workflow = WorkflowModel::default();
        let mut step = StepModel::new("step_1", ActionType::HttpRequest);
        // half-typed extraction: key present, variable still empty
        step.extract.push(Extraction {
            key: "token".to_string(),
            ..Default::default()
        });
        workflow.steps.push(step);

        let parsed = from_text(&to_text(&workflow).unwrap()).unwrap();
        assert_eq!(parsed.steps[0].extract.len(), 1);
        assert_eq!(parsed.steps[0].extract[0].key, "token");
        assert_eq!(parsed.steps[0].extract[0].variable, "");
    }

    #[test]
    fn test_reserialization_is_idempotent() {
        let workflow = sample_workflow();
        let text = to_text(&workflow).unwrap();
        let renormalized = to_text(&from_text(&text).unwrap()).unwrap();
        assert_eq!(renormalized, text);
    }

    // ==================== parsing tests ====================

    #[test]
    fn test_parse_hand_written_text() {
        let text = r#"
# login then probe the profile endpoint
name: Session probe
steps:
  - id: login
    name: Log in
    action: http_request
    method: POST
    path: /api/login
    body: '{"username": "admin"}'
    extract:
      - source: body
        key: access.token
        variable: auth_token
  - id: probe
    name: Fetch profile
    action: http_request
    method: GET
    path: /api/profile
    headers:
      Authorization: Bearer ${auth_token}
    scan: false
"#;
        let workflow = from_text(text).unwrap();
        assert_eq!(workflow.name, "Session probe");
        assert_eq!(workflow.steps.len(), 2);

        let login = workflow.steps[0].http_request().unwrap();
        assert_eq!(login.method, HttpMethod::POST);
        assert_eq!(workflow.steps[0].extract[0].key, "access.token");

        let probe = workflow.steps[1].http_request().unwrap();
        assert_eq!(probe.headers.get("Authorization").unwrap(), "Bearer ${auth_token}");
        assert!(!probe.scan);
    }

    #[test]
    fn test_supplementary_fields_survive_reload() {
        let text = r#"
name: Carried along
description: hand-maintained definition
steps:
  - id: step_1
    name: Search
    action: http_request
    method: GET
    path: /api/search
    params:
      q: admin
      limit: 10
    scan: false
    extract:
      - source: header
        key: X-Request-Id
        regex: 'req-([0-9a-f]+)'
        variable: request_id
"#;
        let loaded = from_text(text).unwrap();
        let reloaded = from_text(&to_text(&loaded).unwrap()).unwrap();
        assert_eq!(reloaded, loaded);

        assert_eq!(reloaded.description.as_deref(), Some("hand-maintained definition"));
        let http = reloaded.steps[0].http_request().unwrap();
        assert_eq!(http.params.get("q").unwrap(), &json!("admin"));
        assert_eq!(http.params.get("limit").unwrap(), &json!(10));
        assert!(!http.scan);
        assert_eq!(reloaded.steps[0].extract[0].source, ExtractSource::Header);
        assert_eq!(reloaded.steps[0].extract[0].regex.as_deref(), Some("req-([0-9a-f]+)"));
    }

    #[test]
    fn test_missing_name_gets_placeholder() {
        let workflow = from_text("steps: []\n").unwrap();
        assert_eq!(workflow.name, crate::model::DEFAULT_WORKFLOW_NAME);
    }

    #[test]
    fn test_parse_error_on_malformed_text() {
        let result = from_text("steps: [\n");
        assert!(matches!(result, Err(ScanflowError::Parse(_))));
    }

    #[test]
    fn test_parse_error_on_unknown_action() {
        let text = r#"
name: Bad step
steps:
  - id: step_1
    name: Mystery
    action: carrier_pigeon
    path: /api/birds
"#;
        let result = from_text(text);
        assert!(matches!(result, Err(ScanflowError::Parse(_))));
    }

    #[test]
    fn test_parse_error_on_missing_action_tag() {
        let text = r#"
name: Untagged
steps:
  - id: step_1
    name: No action
    path: /api/none
"#;
        assert!(from_text(text).is_err());
    }
}
