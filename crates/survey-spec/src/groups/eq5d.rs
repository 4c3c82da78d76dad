use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::builder::{ComponentAttrs, GroupBuilder, LeafBuilder};
use crate::error::BuildError;
use crate::expr::Expression;
use crate::locale::LocaleMap;
use crate::spec::component::{ItemGroupComponent, Role};

/// Texts of the EQ-5D visual analogue health scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Eq5dHealthIndicator {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_condition: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<Expression>,
    pub instruction_text: LocaleMap,
    pub value_box_text: LocaleMap,
    pub max_health_text: LocaleMap,
    pub min_health_text: LocaleMap,
}

/// Always four children: instruction, value box, min and max labels.
pub fn init_eq5d_health_indicator(
    props: &Eq5dHealthIndicator,
) -> Result<ItemGroupComponent, BuildError> {
    let text = |role: Role, content: &LocaleMap| LeafBuilder::new(role).content(content).build();

    GroupBuilder::new(Role::Eq5dHealthIndicator)
        .key(props.key.as_str())
        .display_condition(props.display_condition.clone())
        .disabled(props.disabled.clone())
        .child(text(Role::Instruction, &props.instruction_text)?)
        .child(text(Role::ValueBox, &props.value_box_text)?)
        .child(text(Role::MinText, &props.min_health_text)?)
        .child(text(Role::MaxText, &props.max_health_text)?)
        .build()
}
