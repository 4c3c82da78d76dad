use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::builder::{ComponentAttrs, GroupBuilder, LeafBuilder, PropertiesInput};
use crate::error::BuildError;
use crate::expr::Expression;
use crate::locale::LocaleMap;
use crate::spec::component::{DataType, ItemComponent, ItemGroupComponent, Role, StyleEntry};

/// Role of a single response option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum OptionRole {
    #[default]
    Option,
    Input,
    MultilineTextInput,
    NumberInput,
    Date,
    Text,
}

impl OptionRole {
    pub fn role(self) -> Role {
        match self {
            OptionRole::Option => Role::Option,
            OptionRole::Input => Role::Input,
            OptionRole::MultilineTextInput => Role::MultilineTextInput,
            OptionRole::NumberInput => Role::NumberInput,
            OptionRole::Date => Role::Date,
            OptionRole::Text => Role::Text,
        }
    }

    /// Data type the engine should use for the option's value.
    pub fn data_type(self) -> Option<DataType> {
        match self {
            OptionRole::Date => Some(DataType::Date),
            OptionRole::NumberInput => Some(DataType::Number),
            OptionRole::Option
            | OptionRole::Input
            | OptionRole::MultilineTextInput
            | OptionRole::Text => None,
        }
    }
}

/// Declared response option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionDef {
    pub key: String,
    #[serde(default)]
    pub role: OptionRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<LocaleMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocaleMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_condition: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<Expression>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub style: Vec<StyleEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_props: Option<PropertiesInput>,
}

impl OptionDef {
    pub fn new(key: impl Into<String>, role: OptionRole) -> Self {
        Self {
            key: key.into(),
            role,
            content: None,
            description: None,
            display_condition: None,
            disabled: None,
            style: Vec::new(),
            option_props: None,
        }
    }

    /// Plain `option` with a label.
    pub fn option(key: impl Into<String>, content: LocaleMap) -> Self {
        Self {
            content: Some(content),
            ..Self::new(key, OptionRole::Option)
        }
    }
}

/// Kinds of option-list response groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseGroupKind {
    SingleChoice,
    MultipleChoice,
    DropDown,
    SliderCategorical,
}

impl ResponseGroupKind {
    pub fn role(self) -> Role {
        match self {
            ResponseGroupKind::SingleChoice => Role::SingleChoiceGroup,
            ResponseGroupKind::MultipleChoice => Role::MultipleChoiceGroup,
            ResponseGroupKind::DropDown => Role::DropDownGroup,
            ResponseGroupKind::SliderCategorical => Role::SliderCategorical,
        }
    }
}

/// Group-level settings for option groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupSettings {
    pub order: Option<Expression>,
    pub disabled: Option<Expression>,
    pub content: Option<LocaleMap>,
    pub description: Option<LocaleMap>,
    pub properties: Option<PropertiesInput>,
}

impl GroupSettings {
    pub fn ordered(order: Option<Expression>) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }
}

pub fn init_single_choice_group(
    key: &str,
    options: &[OptionDef],
    order: Option<Expression>,
) -> Result<ItemGroupComponent, BuildError> {
    init_response_group(
        ResponseGroupKind::SingleChoice,
        key,
        options,
        GroupSettings::ordered(order),
    )
}

pub fn init_multiple_choice_group(
    key: &str,
    options: &[OptionDef],
    order: Option<Expression>,
) -> Result<ItemGroupComponent, BuildError> {
    init_response_group(
        ResponseGroupKind::MultipleChoice,
        key,
        options,
        GroupSettings::ordered(order),
    )
}

pub fn init_dropdown_group(
    key: &str,
    options: &[OptionDef],
    settings: GroupSettings,
) -> Result<ItemGroupComponent, BuildError> {
    init_response_group(ResponseGroupKind::DropDown, key, options, settings)
}

/// Slider over categories. Group content and description are not used by
/// this kind and are ignored.
pub fn init_slider_categorical_group(
    key: &str,
    options: &[OptionDef],
    order: Option<Expression>,
    disabled: Option<Expression>,
) -> Result<ItemGroupComponent, BuildError> {
    init_response_group(
        ResponseGroupKind::SliderCategorical,
        key,
        options,
        GroupSettings {
            order,
            disabled,
            ..GroupSettings::default()
        },
    )
}

/// Shared assembly for option-list groups: one child per option, in the
/// given order.
pub fn init_response_group(
    kind: ResponseGroupKind,
    key: &str,
    options: &[OptionDef],
    settings: GroupSettings,
) -> Result<ItemGroupComponent, BuildError> {
    if options.is_empty() {
        return Err(BuildError::empty("response options"));
    }

    let mut group = GroupBuilder::new(kind.role())
        .key(key)
        .order(settings.order)
        .disabled(settings.disabled)
        .content(settings.content.as_ref())
        .description(settings.description.as_ref())
        .properties(settings.properties);

    for option in options {
        group = group.child(build_option(option)?);
    }

    let group = group.build()?;
    tracing::trace!(
        key,
        role = %kind.role(),
        options = group.items.len(),
        "assembled response group"
    );
    Ok(group)
}

pub(crate) fn build_option(option: &OptionDef) -> Result<ItemComponent, BuildError> {
    LeafBuilder::new(option.role.role())
        .key(option.key.as_str())
        .content(option.content.as_ref())
        .description(option.description.as_ref())
        .dtype(option.role.data_type())
        .display_condition(option.display_condition.clone())
        .disabled(option.disabled.clone())
        .style(option.style.clone())
        .properties(option.option_props.clone())
        .build()
}
