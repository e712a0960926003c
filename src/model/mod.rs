mod extraction;
mod rule;
mod step;
mod workflow;

pub use extraction::{ExtractSource, Extraction};
pub use rule::{MatchCriteria, RuleModel, RuleRequest, Severity};
pub use step::{ActionType, HttpMethod, HttpRequestStep, StepAction, StepModel};
pub use workflow::{DEFAULT_WORKFLOW_NAME, WorkflowModel};
