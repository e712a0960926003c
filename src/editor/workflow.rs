//! Structural editor for workflow definitions.
//!
//! All edits go through [`WorkflowEditor`], which holds the current
//! model, applies each operation to a fresh copy of the aggregate, and
//! swaps the copy in on commit. Readers handed a model value never see a
//! half-applied edit, and "did anything change" is a revision check.
//! Every committed change republishes the YAML text form to the host.
//!
//! Edits against stale indices happen routinely while an operator is
//! clicking fast; they are absorbed as no-ops, never errors.

use serde_json::Value as JsonValue;
use tracing::{debug, error};

use crate::{
    Result,
    model::{ActionType, ExtractSource, Extraction, HttpMethod, StepModel, WorkflowModel},
    sync,
};

/// Host callback receiving the serialized text after every change.
pub type ChangeHandler = Box<dyn FnMut(&str)>;

/// Single-field update for a step.
///
/// A typed patch keeps the merge shallow by construction: the named
/// field is replaced and every sibling field, `extract` included, stays
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum StepPatch {
    /// display name
    Name(String),
    /// http method
    Method(HttpMethod),
    /// request path, may contain `${var}` placeholders
    Path(String),
    /// request body; `None` clears it
    Body(Option<JsonValue>),
    /// whether detection rules run against this step
    Scan(bool),
}

/// Single-field update for an extraction rule.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionPatch {
    Source(ExtractSource),
    Key(String),
    Regex(Option<String>),
    Variable(String),
}

/// Structural editor over one workflow definition.
pub struct WorkflowEditor {
    workflow: WorkflowModel,
    /// monotonic step id counter; never reused within this editor
    next_step_seq: usize,
    revision: u64,
    on_change: Option<ChangeHandler>,
}

impl Default for WorkflowEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowEditor {
    /// Create an editor holding the default empty workflow.
    pub fn new() -> Self {
        Self {
            workflow: WorkflowModel::default(),
            next_step_seq: 0,
            revision: 0,
            on_change: None,
        }
    }

    /// current workflow definition
    pub fn workflow(&self) -> &WorkflowModel {
        &self.workflow
    }

    /// Commit counter, bumped once per committed change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// current YAML text form
    pub fn to_text(&self) -> Result<String> {
        sync::to_text(&self.workflow)
    }

    /// Register the host change handler.
    ///
    /// The current text is published immediately so the host starts out
    /// in sync.
    pub fn on_change(
        &mut self,
        handler: impl FnMut(&str) + 'static,
    ) {
        self.set_change_handler(Box::new(handler));
    }

    pub(crate) fn set_change_handler(
        &mut self,
        handler: ChangeHandler,
    ) {
        self.on_change = Some(handler);
        self.publish();
    }

    /// rename the workflow
    pub fn set_name(
        &mut self,
        name: impl Into<String>,
    ) {
        let mut next = self.workflow.clone();
        next.name = name.into();
        self.commit(next);
    }

    /// Append a new defaulted step for `action_type`.
    ///
    /// The generated id comes from a counter that only moves forward, so
    /// removing a step and adding another can never mint the same id
    /// twice.
    pub fn add_step(
        &mut self,
        action_type: ActionType,
    ) {
        self.next_step_seq += 1;
        let id = format!("step_{}", self.next_step_seq);

        let mut next = self.workflow.clone();
        next.steps.push(StepModel::new(id, action_type));
        self.commit(next);
    }

    /// Delete the step at `index`, keeping the relative order of the
    /// rest; out of range is a no-op.
    pub fn remove_step(
        &mut self,
        index: usize,
    ) {
        if index >= self.workflow.steps.len() {
            debug!("remove_step: index {} out of range, ignoring", index);
            return;
        }

        let mut next = self.workflow.clone();
        next.steps.remove(index);
        self.commit(next);
    }

    /// Replace one field of the step at `index`; out of range, or a
    /// patch that does not apply to the step's action kind, is a no-op.
    pub fn update_step(
        &mut self,
        index: usize,
        patch: StepPatch,
    ) {
        let Some(current) = self.workflow.steps.get(index) else {
            debug!("update_step: index {} out of range, ignoring", index);
            return;
        };

        let mut step = current.clone();
        let applied = match patch {
            StepPatch::Name(name) => {
                step.name = name;
                true
            }
            StepPatch::Method(method) => match step.http_request_mut() {
                Some(http) => {
                    http.method = method;
                    true
                }
                None => false,
            },
            StepPatch::Path(path) => match step.http_request_mut() {
                Some(http) => {
                    http.path = path;
                    true
                }
                None => false,
            },
            StepPatch::Body(body) => match step.http_request_mut() {
                Some(http) => {
                    http.body = body;
                    true
                }
                None => false,
            },
            StepPatch::Scan(scan) => match step.http_request_mut() {
                Some(http) => {
                    http.scan = scan;
                    true
                }
                None => false,
            },
        };

        if !applied {
            debug!("update_step: patch does not apply to step '{}', ignoring", step.id);
            return;
        }

        let mut next = self.workflow.clone();
        next.steps[index] = step;
        self.commit(next);
    }

    /// Append a default extraction rule to the step at `step_index`.
    pub fn add_extraction(
        &mut self,
        step_index: usize,
    ) {
        if step_index >= self.workflow.steps.len() {
            debug!("add_extraction: step index {} out of range, ignoring", step_index);
            return;
        }

        let mut next = self.workflow.clone();
        next.steps[step_index].extract.push(Extraction::default());
        self.commit(next);
    }

    /// Replace one field of an extraction rule; either index out of
    /// range is a no-op.
    pub fn update_extraction(
        &mut self,
        step_index: usize,
        extraction_index: usize,
        patch: ExtractionPatch,
    ) {
        let Some(extraction) = self.workflow.steps.get(step_index).and_then(|step| step.extract.get(extraction_index)) else {
            debug!("update_extraction: ({}, {}) out of range, ignoring", step_index, extraction_index);
            return;
        };

        let mut extraction = extraction.clone();
        match patch {
            ExtractionPatch::Source(source) => extraction.source = source,
            ExtractionPatch::Key(key) => extraction.key = key,
            ExtractionPatch::Regex(regex) => extraction.regex = regex,
            ExtractionPatch::Variable(variable) => extraction.variable = variable,
        }

        let mut next = self.workflow.clone();
        next.steps[step_index].extract[extraction_index] = extraction;
        self.commit(next);
    }

    /// Delete one extraction rule, keeping the relative order of the
    /// rest; either index out of range is a no-op.
    pub fn remove_extraction(
        &mut self,
        step_index: usize,
        extraction_index: usize,
    ) {
        let in_range = self.workflow.steps.get(step_index).map(|step| extraction_index < step.extract.len()).unwrap_or(false);
        if !in_range {
            debug!("remove_extraction: ({}, {}) out of range, ignoring", step_index, extraction_index);
            return;
        }

        let mut next = self.workflow.clone();
        next.steps[step_index].extract.remove(extraction_index);
        self.commit(next);
    }

    /// Replace the model wholesale from an edited text form.
    ///
    /// On parse error the held model is left untouched and the error is
    /// returned for the operator to correct. On success the id counter
    /// resumes past the highest `step_<n>` id in the loaded text, so
    /// steps added afterwards cannot collide with loaded ones.
    pub fn load_text(
        &mut self,
        text: &str,
    ) -> Result<()> {
        let workflow = sync::from_text(text)?;
        self.next_step_seq = self.next_step_seq.max(highest_step_seq(&workflow));
        self.commit(workflow);
        Ok(())
    }

    /// Swap in the next aggregate and republish the text form.
    fn commit(
        &mut self,
        next: WorkflowModel,
    ) {
        self.workflow = next;
        self.revision += 1;
        self.publish();
    }

    fn publish(&mut self) {
        let Some(handler) = self.on_change.as_mut() else {
            return;
        };

        match sync::to_text(&self.workflow) {
            Ok(text) => handler(text.as_str()),
            Err(e) => error!("failed to serialize workflow: {}", e),
        }
    }
}

/// Highest `step_<n>` suffix present in a workflow, `0` when none.
fn highest_step_seq(workflow: &WorkflowModel) -> usize {
    workflow
        .steps
        .iter()
        .filter_map(|step| step.id.strip_prefix("step_"))
        .filter_map(|suffix| suffix.parse::<usize>().ok())
        .max()
        .unwrap_or(0)
}
