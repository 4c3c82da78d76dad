//! Incremental construction of a single component.
//!
//! Setters take the builder by value and hand it back, so an in-progress
//! builder is never shared. Leaves and groups have separate builder types;
//! only [`GroupBuilder`] can take children. [`NodeBuilder`] picks the shape
//! from the role and rejects children on leaves with a [`UsageError`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{BuildError, UsageError};
use crate::expr::{Expression, ExpressionArg};
use crate::locale::{LocaleMap, localized};
use crate::spec::component::{
    Component, ComponentBase, ComponentProperties, DataType, ItemComponent, ItemGroupComponent,
    Role, StyleEntry,
};
use crate::validate::{check_key, check_siblings};

/// A property value as declared by the caller. Plain numbers are wrapped as
/// numeric literals when the component is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Arg(ExpressionArg),
    Expression(Expression),
}

impl PropertyValue {
    pub fn into_arg(self) -> ExpressionArg {
        match self {
            PropertyValue::Number(num) => ExpressionArg::Num { num },
            PropertyValue::Arg(arg) => arg,
            PropertyValue::Expression(exp) => ExpressionArg::Exp { exp },
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Number(value as f64)
    }
}

impl From<Expression> for PropertyValue {
    fn from(value: Expression) -> Self {
        PropertyValue::Expression(value)
    }
}

impl From<ExpressionArg> for PropertyValue {
    fn from(value: ExpressionArg) -> Self {
        PropertyValue::Arg(value)
    }
}

/// Caller-declared component properties.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertiesInput {
    #[serde(default)]
    pub min: Option<PropertyValue>,
    #[serde(default)]
    pub max: Option<PropertyValue>,
    #[serde(default)]
    pub step_size: Option<PropertyValue>,
    #[serde(default)]
    pub date_input_mode: Option<PropertyValue>,
}

impl PropertiesInput {
    pub fn range(
        min: Option<PropertyValue>,
        max: Option<PropertyValue>,
        step_size: Option<PropertyValue>,
    ) -> Self {
        Self {
            min,
            max,
            step_size,
            date_input_mode: None,
        }
    }

    pub fn normalize(self) -> ComponentProperties {
        ComponentProperties {
            min: self.min.map(PropertyValue::into_arg),
            max: self.max.map(PropertyValue::into_arg),
            step_size: self.step_size.map(PropertyValue::into_arg),
            date_input_mode: self.date_input_mode.map(PropertyValue::into_arg),
        }
    }
}

/// Setters shared by every builder.
pub trait ComponentAttrs: Sized {
    fn base_mut(&mut self) -> &mut ComponentBase;

    fn key(mut self, key: impl Into<String>) -> Self {
        self.base_mut().key = Some(key.into());
        self
    }

    fn content<'a>(mut self, content: impl Into<Option<&'a LocaleMap>>) -> Self {
        self.base_mut().content = content.into().map(localized);
        self
    }

    fn description<'a>(mut self, description: impl Into<Option<&'a LocaleMap>>) -> Self {
        self.base_mut().description = description.into().map(localized);
        self
    }

    fn display_condition(mut self, condition: impl Into<Option<Expression>>) -> Self {
        self.base_mut().display_condition = condition.into();
        self
    }

    fn disabled(mut self, disabled: impl Into<Option<Expression>>) -> Self {
        self.base_mut().disabled = disabled.into();
        self
    }

    /// Replaces the style list; an empty list clears it.
    fn style(mut self, style: Vec<StyleEntry>) -> Self {
        self.base_mut().style = (!style.is_empty()).then_some(style);
        self
    }

    /// Sets properties, wrapping plain numbers as numeric literals.
    fn properties(mut self, properties: impl Into<Option<PropertiesInput>>) -> Self {
        self.base_mut().properties = properties
            .into()
            .map(PropertiesInput::normalize)
            .filter(|props| !props.is_empty());
        self
    }

    fn dtype(mut self, dtype: impl Into<Option<DataType>>) -> Self {
        self.base_mut().dtype = dtype.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct LeafBuilder {
    base: ComponentBase,
}

impl LeafBuilder {
    pub fn new(role: Role) -> Self {
        Self {
            base: ComponentBase::new(role),
        }
    }

    pub fn build(self) -> Result<ItemComponent, BuildError> {
        if let Some(key) = &self.base.key {
            check_key(key)?;
        }
        Ok(ItemComponent { base: self.base })
    }
}

impl ComponentAttrs for LeafBuilder {
    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }
}

#[derive(Debug, Clone)]
pub struct GroupBuilder {
    base: ComponentBase,
    items: Vec<Component>,
    order: Expression,
}

impl GroupBuilder {
    /// New group with sequential order and no children.
    pub fn new(role: Role) -> Self {
        Self {
            base: ComponentBase::new(role),
            items: Vec::new(),
            order: Expression::sequential(),
        }
    }

    /// Overrides the sequential default, e.g. with a randomizing order.
    pub fn order(mut self, order: impl Into<Option<Expression>>) -> Self {
        if let Some(order) = order.into() {
            self.order = order;
        }
        self
    }

    pub fn child(mut self, child: impl Into<Component>) -> Self {
        self.items.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Component>,
    {
        self.items.extend(children.into_iter().map(Into::into));
        self
    }

    /// Validates keys and returns the finished group.
    pub fn build(self) -> Result<ItemGroupComponent, BuildError> {
        let parent = match &self.base.key {
            Some(key) => {
                check_key(key)?;
                key.clone()
            }
            None => self.base.role.to_string(),
        };
        check_siblings(&parent, &self.items)?;
        Ok(ItemGroupComponent {
            base: self.base,
            items: self.items,
            order: Some(self.order),
        })
    }

    /// Finished copy of the current state; the builder stays usable.
    pub fn snapshot(&self) -> Result<ItemGroupComponent, BuildError> {
        self.clone().build()
    }
}

impl ComponentAttrs for GroupBuilder {
    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }
}

/// Builder whose shape follows from the role.
#[derive(Debug, Clone)]
pub enum NodeBuilder {
    Leaf(LeafBuilder),
    Group(GroupBuilder),
}

impl NodeBuilder {
    pub fn for_role(role: Role) -> Self {
        if role.is_group() {
            NodeBuilder::Group(GroupBuilder::new(role))
        } else {
            NodeBuilder::Leaf(LeafBuilder::new(role))
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, NodeBuilder::Group(_))
    }

    /// Appends a child. Fails on leaf roles instead of dropping the child.
    pub fn add_child(self, child: impl Into<Component>) -> Result<Self, BuildError> {
        match self {
            NodeBuilder::Group(group) => Ok(NodeBuilder::Group(group.child(child))),
            NodeBuilder::Leaf(leaf) => Err(UsageError::ChildOnLeaf {
                role: leaf.base.role,
            }
            .into()),
        }
    }

    pub fn order(self, order: impl Into<Option<Expression>>) -> Self {
        match self {
            NodeBuilder::Group(group) => NodeBuilder::Group(group.order(order)),
            leaf => leaf,
        }
    }

    pub fn build(self) -> Result<Component, BuildError> {
        match self {
            NodeBuilder::Leaf(leaf) => leaf.build().map(Component::Item),
            NodeBuilder::Group(group) => group.build().map(Component::Group),
        }
    }

    pub fn snapshot(&self) -> Result<Component, BuildError> {
        self.clone().build()
    }
}

impl ComponentAttrs for NodeBuilder {
    fn base_mut(&mut self) -> &mut ComponentBase {
        match self {
            NodeBuilder::Leaf(leaf) => &mut leaf.base,
            NodeBuilder::Group(group) => &mut group.base,
        }
    }
}
