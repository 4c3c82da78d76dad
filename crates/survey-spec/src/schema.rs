use schemars::schema_for;
use serde_json::Value;

use crate::spec::item::SurveyItem;

/// JSON schema of a finished [`SurveyItem`].
pub fn document_schema() -> Value {
    schema_for!(SurveyItem).to_value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_lists_item_fields() {
        let schema = document_schema();
        let props = schema["properties"].as_object().unwrap();
        for field in ["key", "version", "components", "validations", "condition"] {
            assert!(props.contains_key(field), "missing {field}");
        }
        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|value| value.as_str() == Some("components")));
    }
}
