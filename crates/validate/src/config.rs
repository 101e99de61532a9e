//! Structural validation for the project `config.yml`.
//!
//! The document is an open record: unknown keys are accepted at every level.
//! Only the recognized boolean and number fields of the `team_system` and
//! `market_validation` sections are type-checked.

use serde_yaml::{Mapping, Value};

use crate::common::ValidationReport;

const SPECIALISTS: [&str; 4] = [
    "backend_dev",
    "frontend_dev",
    "qa_specialist",
    "devops_specialist",
];

/// Validate a parsed config document.
pub fn validate_config(doc: &Value) -> ValidationReport {
    let Some(root) = doc.as_mapping() else {
        return ValidationReport::from_errors(vec!["Config must be an object".to_string()]);
    };

    let mut errors = Vec::new();

    if let Some(team) = section(root, "team_system", "team_system", &mut errors) {
        expect_bool(team, "enabled", "team_system.enabled", &mut errors);

        if let Some(routing) = section(team, "task_routing", "team_system.task_routing", &mut errors)
        {
            expect_bool(
                routing,
                "enabled",
                "team_system.task_routing.enabled",
                &mut errors,
            );
            expect_bool(
                routing,
                "auto_delegate",
                "team_system.task_routing.auto_delegate",
                &mut errors,
            );
        }

        if let Some(specialists) =
            section(team, "specialists", "team_system.specialists", &mut errors)
        {
            for name in SPECIALISTS {
                let path = format!("team_system.specialists.{name}");
                if let Some(specialist) = section(specialists, name, &path, &mut errors) {
                    expect_bool(specialist, "enabled", &format!("{path}.enabled"), &mut errors);
                }
            }
        }

        if let Some(gates) = section(team, "quality_gates", "team_system.quality_gates", &mut errors)
        {
            expect_number(
                gates,
                "coverage_minimum",
                "team_system.quality_gates.coverage_minimum",
                &mut errors,
            );
        }
    }

    if let Some(market) = section(root, "market_validation", "market_validation", &mut errors) {
        expect_bool(market, "enabled", "market_validation.enabled", &mut errors);
    }

    ValidationReport::from_errors(errors)
}

/// Returns the nested mapping at `key`; absent and `null` are skipped, any
/// other non-mapping value is reported.
fn section<'a>(
    parent: &'a Mapping,
    key: &str,
    path: &str,
    errors: &mut Vec<String>,
) -> Option<&'a Mapping> {
    match parent.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Mapping(map)) => Some(map),
        Some(_) => {
            errors.push(format!("{path} must be an object"));
            None
        }
    }
}

fn expect_bool(map: &Mapping, key: &str, path: &str, errors: &mut Vec<String>) {
    if let Some(value) = map.get(key) {
        if !value.is_bool() {
            errors.push(format!("{path} must be a boolean"));
        }
    }
}

fn expect_number(map: &Mapping, key: &str, path: &str, errors: &mut Vec<String>) {
    if let Some(value) = map.get(key) {
        if !value.is_number() {
            errors.push(format!("{path} must be a number"));
        }
    }
}
