//! Turning `validator` errors into a single client-facing message.
//!
//! Clients get one violation at a time. Field names are visited in sorted
//! order so the same payload always reports the same violation.

use std::fmt;

use validator::{ValidationErrors, ValidationErrorsKind};

/// Key `validator` uses for struct-level (schema) errors.
const STRUCT_LEVEL_KEY: &str = "__all__";

/// The first failed rule found in a set of validation errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Dotted path starting at the root type, e.g. `CreateContact.email`.
    pub path: String,
    /// Rule that failed (`length`, `email`, `range`, ...).
    pub code: String,
    pub message: Option<String>,
    /// Offending value when the rule recorded it.
    pub value: Option<serde_json::Value>,
}

impl Violation {
    /// Human readable message: the rule message, or one derived from the path.
    pub fn message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| format!("{} failed the `{}` rule", self.path, self.code))
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self
            .value
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "null".to_string());

        write!(
            f,
            "{}, rule: {}, value: {}, path: {}",
            self.message(),
            self.code,
            value,
            self.path
        )
    }
}

/// Finds the first violation under `root` (the name of the validated type).
pub fn first_violation(root: &str, errors: &ValidationErrors) -> Option<Violation> {
    walk(root.to_string(), errors)
}

/// Message for the first violation, falling back to the full error list.
pub fn describe_first(root: &str, errors: &ValidationErrors) -> String {
    first_violation(root, errors)
        .map(|v| v.to_string())
        .unwrap_or_else(|| errors.to_string())
}

fn walk(prefix: String, errors: &ValidationErrors) -> Option<Violation> {
    let mut fields: Vec<(String, &ValidationErrorsKind)> = errors
        .errors()
        .iter()
        .map(|(field, kind)| (field.to_string(), kind))
        .collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields.into_iter().find_map(|(field, kind)| {
        let path = if field == STRUCT_LEVEL_KEY {
            prefix.clone()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(errs) => errs.first().map(|e| Violation {
                path,
                code: e.code.to_string(),
                message: e.message.as_ref().map(|m| m.to_string()),
                value: e.params.get("value").cloned(),
            }),
            ValidationErrorsKind::Struct(inner) => walk(path, inner),
            ValidationErrorsKind::List(items) => items
                .iter()
                .find_map(|(index, inner)| walk(format!("{path}[{index}]"), inner)),
        }
    })
}

/// Short type name used as the root of violation paths.
pub fn type_root<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}
