use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::expr::Expression;
use crate::spec::component::ItemGroupComponent;

/// Severity of a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ValidationKind {
    Hard,
    Soft,
}

/// Named rule the survey engine evaluates against a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Validation {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: ValidationKind,
    pub rule: Expression,
}

impl Validation {
    pub fn hard(key: impl Into<String>, rule: Expression) -> Self {
        Self {
            key: key.into(),
            kind: ValidationKind::Hard,
            rule,
        }
    }

    pub fn soft(key: impl Into<String>, rule: Expression) -> Self {
        Self {
            key: key.into(),
            kind: ValidationKind::Soft,
            rule,
        }
    }
}

/// A finished survey question. `key` is the full dotted path
/// (`<parentKey>.<itemKey>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SurveyItem {
    pub key: String,
    pub version: u32,
    pub components: ItemGroupComponent,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<Validation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Expression>,
}

impl SurveyItem {
    pub fn parent_key(&self) -> &str {
        self.key
            .rsplit_once('.')
            .map(|(parent, _)| parent)
            .unwrap_or_default()
    }

    pub fn item_key(&self) -> &str {
        self.key
            .rsplit_once('.')
            .map(|(_, item)| item)
            .unwrap_or(&self.key)
    }
}
