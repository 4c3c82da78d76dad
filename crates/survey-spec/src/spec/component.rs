use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::expr::{Expression, ExpressionArg};
use crate::locale::LocalizedString;

/// Component role. Determines how the survey engine renders the component
/// and whether it is a group that holds children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Root,
    Title,
    HelpGroup,
    Text,
    Markdown,
    Footnote,
    Error,
    Warning,
    ResponseGroup,
    SingleChoiceGroup,
    MultipleChoiceGroup,
    DropDownGroup,
    SliderCategorical,
    SliderNumeric,
    Option,
    Input,
    MultilineTextInput,
    NumberInput,
    DateInput,
    Date,
    Matrix,
    HeaderRow,
    RadioRow,
    ResponseRow,
    Label,
    Check,
    LikertGroup,
    Likert,
    #[serde(rename = "eq5d-health-indicator")]
    Eq5dHealthIndicator,
    Instruction,
    #[serde(rename = "valuebox")]
    ValueBox,
    #[serde(rename = "mintext")]
    MinText,
    #[serde(rename = "maxtext")]
    MaxText,
}

impl Role {
    /// Whether components with this role hold child components.
    pub fn is_group(self) -> bool {
        match self {
            Role::Root
            | Role::HelpGroup
            | Role::ResponseGroup
            | Role::SingleChoiceGroup
            | Role::MultipleChoiceGroup
            | Role::DropDownGroup
            | Role::SliderCategorical
            | Role::Matrix
            | Role::HeaderRow
            | Role::RadioRow
            | Role::ResponseRow
            | Role::LikertGroup
            | Role::Likert
            | Role::Eq5dHealthIndicator => true,
            Role::Title
            | Role::Text
            | Role::Markdown
            | Role::Footnote
            | Role::Error
            | Role::Warning
            | Role::SliderNumeric
            | Role::Option
            | Role::Input
            | Role::MultilineTextInput
            | Role::NumberInput
            | Role::DateInput
            | Role::Date
            | Role::Label
            | Role::Check
            | Role::Instruction
            | Role::ValueBox
            | Role::MinText
            | Role::MaxText => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Root => "root",
            Role::Title => "title",
            Role::HelpGroup => "helpGroup",
            Role::Text => "text",
            Role::Markdown => "markdown",
            Role::Footnote => "footnote",
            Role::Error => "error",
            Role::Warning => "warning",
            Role::ResponseGroup => "responseGroup",
            Role::SingleChoiceGroup => "singleChoiceGroup",
            Role::MultipleChoiceGroup => "multipleChoiceGroup",
            Role::DropDownGroup => "dropDownGroup",
            Role::SliderCategorical => "sliderCategorical",
            Role::SliderNumeric => "sliderNumeric",
            Role::Option => "option",
            Role::Input => "input",
            Role::MultilineTextInput => "multilineTextInput",
            Role::NumberInput => "numberInput",
            Role::DateInput => "dateInput",
            Role::Date => "date",
            Role::Matrix => "matrix",
            Role::HeaderRow => "headerRow",
            Role::RadioRow => "radioRow",
            Role::ResponseRow => "responseRow",
            Role::Label => "label",
            Role::Check => "check",
            Role::LikertGroup => "likertGroup",
            Role::Likert => "likert",
            Role::Eq5dHealthIndicator => "eq5d-health-indicator",
            Role::Instruction => "instruction",
            Role::ValueBox => "valuebox",
            Role::MinText => "mintext",
            Role::MaxText => "maxtext",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data type hint attached to response components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Date,
    Number,
}

/// One `key = value` style entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StyleEntry {
    pub key: String,
    pub value: String,
}

impl StyleEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn class_name(value: impl Into<String>) -> Self {
        Self::new("className", value)
    }
}

/// Component properties. Values are always wrapped literals or expressions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<ExpressionArg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<ExpressionArg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_size: Option<ExpressionArg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_input_mode: Option<ExpressionArg>,
}

impl ComponentProperties {
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
            && self.max.is_none()
            && self.step_size.is_none()
            && self.date_input_mode.is_none()
    }
}

/// Attributes shared by leaf and group components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentBase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<LocalizedString>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Vec<LocalizedString>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_condition: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Vec<StyleEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ComponentProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtype: Option<DataType>,
}

impl ComponentBase {
    pub fn new(role: Role) -> Self {
        Self {
            key: None,
            role,
            content: None,
            description: None,
            display_condition: None,
            disabled: None,
            style: None,
            properties: None,
            dtype: None,
        }
    }

    pub fn style_value(&self, key: &str) -> Option<&str> {
        self.style
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }
}

/// Leaf component; never holds children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ItemComponent {
    #[serde(flatten)]
    pub base: ComponentBase,
}

/// Group component with ordered children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ItemGroupComponent {
    #[serde(flatten)]
    pub base: ComponentBase,
    pub items: Vec<Component>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Expression>,
}

impl ItemGroupComponent {
    pub fn child_keys(&self) -> Vec<&str> {
        self.items.iter().filter_map(Component::key).collect()
    }

    pub fn find(&self, key: &str) -> Option<&Component> {
        self.items.iter().find(|item| item.key() == Some(key))
    }

    pub fn find_role(&self, role: Role) -> Option<&Component> {
        self.items.iter().find(|item| item.role() == role)
    }
}

/// A node of the question tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Component {
    Group(ItemGroupComponent),
    Item(ItemComponent),
}

impl Component {
    pub fn base(&self) -> &ComponentBase {
        match self {
            Component::Group(group) => &group.base,
            Component::Item(item) => &item.base,
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.base().key.as_deref()
    }

    pub fn role(&self) -> Role {
        self.base().role
    }

    /// Children in order; empty for leaves.
    pub fn items(&self) -> &[Component] {
        match self {
            Component::Group(group) => &group.items,
            Component::Item(_) => &[],
        }
    }

    pub fn as_group(&self) -> Option<&ItemGroupComponent> {
        match self {
            Component::Group(group) => Some(group),
            Component::Item(_) => None,
        }
    }
}

impl From<ItemComponent> for Component {
    fn from(item: ItemComponent) -> Self {
        Component::Item(item)
    }
}

impl From<ItemGroupComponent> for Component {
    fn from(group: ItemGroupComponent) -> Self {
        Component::Group(group)
    }
}
