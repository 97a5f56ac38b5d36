use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Field name → messages, rendered next to the offending inputs.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Flattens serde_valid's nested error tree into per-field messages.
    pub fn from_validation(errors: &serde_valid::validation::Errors) -> Self {
        let mut form_errors = Self::default();
        let tree = match serde_json::to_value(errors) {
            Ok(tree) => tree,
            Err(err) => {
                tracing::error!("Failed to read validation errors: {:?}", err);
                form_errors.add("form", "Invalid data received");
                return form_errors;
            }
        };

        for message in messages(&tree["errors"]) {
            form_errors.add("form", message);
        }

        if let Some(properties) = tree["properties"].as_object() {
            for (field, node) in properties {
                for message in messages(&node["errors"]) {
                    form_errors.add(field, message);
                }
            }
        }

        form_errors
    }
}

fn messages(node: &Value) -> Vec<String> {
    node.as_array()
        .map(|items| {
            items
                .iter()
                .map(|item| match item {
                    Value::String(message) => message.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_messages_per_field() {
        let mut errors = FormErrors::default();
        assert!(errors.is_empty());

        errors.add("name", "required");
        errors.add("name", "too short");
        errors.add("price", "must be a number");

        assert!(!errors.is_empty());
        assert_eq!(errors.get("name"), ["required", "too short"]);
        assert_eq!(errors.get("price").len(), 1);
        assert!(errors.get("brand").is_empty());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut errors = FormErrors::default();
        errors.add("image_file", "The image file is required");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["image_file"][0], "The image file is required");
    }
}
