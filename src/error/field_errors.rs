use std::collections::BTreeMap;

use serde::Serialize;

/// Per-field validation failures, serialized as
/// `{"<field>": {"<rule>": "<message>"}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, BTreeMap<String, String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.0
            .entry(field.into())
            .or_default()
            .insert(rule.into(), message.into());
    }

    pub fn add_required(&mut self, field: &str) {
        self.add(field, "required", required_message(field));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&BTreeMap<String, String>> {
        self.0.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, rules) in other.0 {
            self.0.entry(field).or_default().extend(rules);
        }
    }
}

pub(crate) fn required_message(field: &str) -> String {
    format!("The '{}' is required", field)
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut result = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None if error.code == "required" => required_message(&field),
                    None => format!("The '{}' is invalid", field),
                };
                result.add(field.to_string(), error.code.to_string(), message);
            }
        }
        result
    }
}
