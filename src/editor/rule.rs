//! Single-shot builder for detection rules.
//!
//! Unlike the workflow editor there is no textual form to keep in sync:
//! the rule is accumulated in memory and handed off whole on save.

use tracing::debug;

use crate::{
    Result, ScanflowError,
    model::{HttpMethod, RuleModel, Severity},
};

/// Host callback receiving the completed rule on save.
pub type SaveHandler = Box<dyn FnMut(&RuleModel)>;

/// In-memory accumulation of one detection rule.
pub struct RuleBuilder {
    rule: RuleModel,
    on_save: Option<SaveHandler>,
}

impl Default for RuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBuilder {
    /// Create a builder holding the default rule template.
    pub fn new() -> Self {
        Self {
            rule: RuleModel::default(),
            on_save: None,
        }
    }

    /// Register the host save handler.
    pub fn on_save(
        &mut self,
        handler: impl FnMut(&RuleModel) + 'static,
    ) {
        self.on_save = Some(Box::new(handler));
    }

    /// rule under construction
    pub fn rule(&self) -> &RuleModel {
        &self.rule
    }

    pub fn set_name(
        &mut self,
        name: impl Into<String>,
    ) {
        self.rule.name = name.into();
    }

    pub fn set_description(
        &mut self,
        description: impl Into<String>,
    ) {
        self.rule.description = description.into();
    }

    pub fn set_severity(
        &mut self,
        severity: Severity,
    ) {
        self.rule.severity = severity;
    }

    /// path pattern (regex) selecting the traffic the rule applies to
    pub fn set_request_path(
        &mut self,
        path: impl Into<String>,
    ) {
        self.rule.request.path = path.into();
    }

    pub fn set_request_method(
        &mut self,
        method: HttpMethod,
    ) {
        self.rule.request.method = method;
    }

    /// expected status code condition, `None` clears it
    pub fn set_status(
        &mut self,
        status: Option<u16>,
    ) {
        self.rule.criteria.status = status;
    }

    /// body substring condition, `None` clears it
    pub fn set_body_contains(
        &mut self,
        body: Option<String>,
    ) {
        self.rule.criteria.body = body;
    }

    /// body regex condition, `None` clears it
    pub fn set_body_regex(
        &mut self,
        body_regex: Option<String>,
    ) {
        self.rule.criteria.body_regex = body_regex;
    }

    pub fn set_impact(
        &mut self,
        impact: Option<String>,
    ) {
        self.rule.impact = impact;
    }

    pub fn set_remediation(
        &mut self,
        remediation: Option<String>,
    ) {
        self.rule.remediation = remediation;
    }

    /// Insert or overwrite a header condition; last write wins and the
    /// key is case-sensitive. An empty expected value means "header
    /// present, any value". An empty name is ignored.
    pub fn add_header_condition(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        let name = name.into();
        if name.is_empty() {
            debug!("add_header_condition: empty header name, ignoring");
            return;
        }
        self.rule.criteria.headers.insert(name, value.into());
    }

    /// Delete a header condition; an unknown name is a no-op.
    pub fn remove_header_condition(
        &mut self,
        name: &str,
    ) {
        self.rule.criteria.headers.remove(name);
    }

    /// Validate and hand the completed rule to the host.
    ///
    /// The only hard invariant is a non-empty name. On failure the rule
    /// is retained unchanged so the operator can correct and retry.
    pub fn save(&mut self) -> Result<()> {
        if self.rule.name.is_empty() {
            return Err(ScanflowError::Rule("rule name is required".to_string()));
        }

        if let Some(handler) = self.on_save.as_mut() {
            handler(&self.rule);
        }
        Ok(())
    }
}
