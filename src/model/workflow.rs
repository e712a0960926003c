use serde::{Deserialize, Serialize};

use crate::{model::StepModel, template};

/// Default display name for a freshly created workflow definition.
pub const DEFAULT_WORKFLOW_NAME: &str = "My Custom Workflow";

/// A named, ordered sequence of steps; the root aggregate of the editor.
///
/// Step order is execution order and is preserved exactly through every
/// structural edit and through the textual round trip.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkflowModel {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Vec<StepModel>,
}

impl Default for WorkflowModel {
    fn default() -> Self {
        Self {
            name: DEFAULT_WORKFLOW_NAME.to_string(),
            description: None,
            steps: Vec::new(),
        }
    }
}

fn default_name() -> String {
    DEFAULT_WORKFLOW_NAME.to_string()
}

impl WorkflowModel {
    /// Placeholders that no earlier step binds through an extraction.
    ///
    /// Walks the steps in execution order, accumulating the variables
    /// bound by each step's extractions, and reports `${name}` references
    /// in paths, headers, params and bodies that are still unbound at the
    /// point of use. A step's own extractions do not count for its own
    /// request, since they only run after the response arrives.
    pub fn unbound_variables(&self) -> Vec<String> {
        let mut bound: Vec<String> = Vec::new();
        let mut unbound: Vec<String> = Vec::new();

        for step in &self.steps {
            let mut referenced: Vec<String> = Vec::new();
            if let Some(http) = step.http_request() {
                referenced.extend(template::placeholders(&http.path));
                for value in http.headers.values() {
                    referenced.extend(template::placeholders(value));
                }
                for value in http.params.values() {
                    referenced.extend(template::placeholders_in_value(value));
                }
                if let Some(body) = &http.body {
                    referenced.extend(template::placeholders_in_value(body));
                }
            }

            for name in referenced {
                if !bound.contains(&name) && !unbound.contains(&name) {
                    unbound.push(name);
                }
            }

            for extraction in &step.extract {
                if !extraction.variable.is_empty() && !bound.contains(&extraction.variable) {
                    bound.push(extraction.variable.clone());
                }
            }
        }

        unbound
    }
}
