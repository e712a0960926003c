//! `${var}` placeholder helpers.
//!
//! Step paths, headers, params and bodies may reference variables
//! extracted by earlier steps using the `${name}` form. At authoring
//! time the editor only needs to find the references; the scan service
//! resolves them against live responses when the workflow runs.

use std::collections::BTreeMap;

use regex::Regex;
use serde_json::Value;

/// Regex pattern for step variable placeholders
/// Format: `${name}`
const PLACEHOLDER_PATTERN: &str = r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}";

/// Collect the `${name}` references in a string, first occurrence first,
/// without duplicates.
pub fn placeholders(text: &str) -> Vec<String> {
    let re = Regex::new(PLACEHOLDER_PATTERN).unwrap();

    let mut found: Vec<String> = Vec::new();
    for caps in re.captures_iter(text) {
        let name = caps[1].to_string();
        if !found.contains(&name) {
            found.push(name);
        }
    }
    found
}

/// Collect placeholders from every string nested in a JSON value.
pub fn placeholders_in_value(value: &Value) -> Vec<String> {
    let mut found = Vec::new();
    collect_value(value, &mut found);
    found
}

fn collect_value(
    value: &Value,
    found: &mut Vec<String>,
) {
    match value {
        Value::String(s) => {
            for name in placeholders(s) {
                if !found.contains(&name) {
                    found.push(name);
                }
            }
        }
        Value::Array(arr) => {
            for item in arr {
                collect_value(item, found);
            }
        }
        Value::Object(obj) => {
            for item in obj.values() {
                collect_value(item, found);
            }
        }
        _ => {}
    }
}

/// Replace known `${name}` placeholders with their values.
///
/// Unknown placeholders are left intact so later resolution stages can
/// still see them.
pub fn substitute(
    text: &str,
    vars: &BTreeMap<String, String>,
) -> String {
    let mut result = text.to_string();
    for (name, value) in vars {
        let placeholder = format!("${{{}}}", name);
        if result.contains(&placeholder) {
            result = result.replace(&placeholder, value);
        }
    }
    result
}
