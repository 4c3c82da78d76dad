//! Wraps one response group plus title, help and decorations into a
//! finished [`SurveyItem`].

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::builder::{ComponentAttrs, GroupBuilder, LeafBuilder};
use crate::error::{BuildError, ConfigurationError};
use crate::expr::Expression;
use crate::keys::RESPONSE_GROUP_KEY;
use crate::locale::LocaleMap;
use crate::spec::component::{Component, Role, StyleEntry};
use crate::spec::item::{SurveyItem, Validation};
use crate::validate::{check_key, check_path};

pub const DEFAULT_VERSION: u32 = 1;
pub const HAS_RESPONSE_VALIDATION_KEY: &str = "r1";
pub const FOOTNOTE_CLASS: &str = "fs-small fst-italic text-center";

/// One paragraph of a help popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HelpEntry {
    pub content: LocaleMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub style: Vec<StyleEntry>,
}

/// Builds the help group shown behind the question's help button.
pub fn help_group(entries: &[HelpEntry]) -> Result<Component, BuildError> {
    if entries.is_empty() {
        return Err(BuildError::empty("help entries"));
    }
    let mut group = GroupBuilder::new(Role::HelpGroup);
    for entry in entries {
        group = group.child(
            LeafBuilder::new(Role::Text)
                .content(&entry.content)
                .style(entry.style.clone())
                .build()?,
        );
    }
    group.build().map(Component::Group)
}

/// Footnote leaf with the fixed small italic styling.
pub fn footnote(text: &LocaleMap) -> Result<Component, BuildError> {
    LeafBuilder::new(Role::Footnote)
        .content(text)
        .style(vec![StyleEntry::class_name(FOOTNOTE_CLASS)])
        .build()
        .map(Component::Item)
}

/// Composer for a single survey item. Children of the root are laid out
/// in call order, which is the order the engine renders them in.
#[derive(Debug, Clone)]
pub struct QuestionBuilder {
    parent_key: String,
    item_key: String,
    version: u32,
    items: Vec<Component>,
    has_title: bool,
    help_index: Option<usize>,
    response_index: Option<usize>,
    validations: Vec<Validation>,
    condition: Option<Expression>,
}

impl QuestionBuilder {
    pub fn new(parent_key: impl Into<String>, item_key: impl Into<String>) -> Self {
        Self {
            parent_key: parent_key.into(),
            item_key: item_key.into(),
            version: DEFAULT_VERSION,
            items: Vec::new(),
            has_title: false,
            help_index: None,
            response_index: None,
            validations: Vec::new(),
            condition: None,
        }
    }

    pub fn full_key(&self) -> String {
        format!("{}.{}", self.parent_key, self.item_key)
    }

    /// Item version. Absent or 0 falls back to [`DEFAULT_VERSION`].
    pub fn version(mut self, version: impl Into<Option<u32>>) -> Self {
        self.version = version
            .into()
            .filter(|version| *version > 0)
            .unwrap_or(DEFAULT_VERSION);
        self
    }

    /// Title leaf, always the first child. Replaces an existing title.
    pub fn title(
        mut self,
        text: &LocaleMap,
        subtitle: Option<&LocaleMap>,
    ) -> Result<Self, BuildError> {
        let title = LeafBuilder::new(Role::Title)
            .content(text)
            .description(subtitle)
            .build()?;
        if self.has_title {
            self.items[0] = title.into();
        } else {
            self.items.insert(0, title.into());
            self.has_title = true;
            for index in [&mut self.help_index, &mut self.response_index]
                .into_iter()
                .flatten()
            {
                *index += 1;
            }
        }
        Ok(self)
    }

    pub fn condition(mut self, condition: impl Into<Option<Expression>>) -> Self {
        self.condition = condition.into();
        self
    }

    /// A second call replaces the previous help group in place.
    pub fn help_group(mut self, entries: &[HelpEntry]) -> Result<Self, BuildError> {
        let group = help_group(entries)?;
        replace_or_push(&mut self.items, &mut self.help_index, group);
        Ok(self)
    }

    pub fn display_component(mut self, component: Component) -> Self {
        self.items.push(component);
        self
    }

    /// Wraps `inner` in the response group. A second call replaces the
    /// previous response group in place.
    pub fn response_group(mut self, inner: impl Into<Component>) -> Result<Self, BuildError> {
        let group = GroupBuilder::new(Role::ResponseGroup)
            .key(RESPONSE_GROUP_KEY)
            .child(inner)
            .build()?;
        replace_or_push(&mut self.items, &mut self.response_index, group.into());
        Ok(self)
    }

    /// Hard `hasResponse` check on this item's response group.
    pub fn has_response_validation(self) -> Self {
        let rule = Expression::has_response(&self.full_key(), RESPONSE_GROUP_KEY);
        self.validation(Validation::hard(HAS_RESPONSE_VALIDATION_KEY, rule))
    }

    pub fn validation(mut self, validation: Validation) -> Self {
        self.validations.push(validation);
        self
    }

    pub fn footnote(mut self, text: &LocaleMap) -> Result<Self, BuildError> {
        self.items.push(footnote(text)?);
        Ok(self)
    }

    pub fn build(self) -> Result<SurveyItem, BuildError> {
        check_path(&self.parent_key)?;
        check_key(&self.item_key)?;
        let key = self.full_key();

        let mut seen = HashSet::new();
        for validation in &self.validations {
            if !seen.insert(validation.key.as_str()) {
                return Err(ConfigurationError::DuplicateKey {
                    parent: format!("{}#validations", key),
                    key: validation.key.clone(),
                }
                .into());
            }
        }

        let components = GroupBuilder::new(Role::Root)
            .children(self.items)
            .build()?;

        tracing::debug!(
            item = %key,
            version = self.version,
            components = components.items.len(),
            validations = self.validations.len(),
            "composed survey item"
        );

        Ok(SurveyItem {
            key,
            version: self.version,
            components,
            validations: self.validations,
            condition: self.condition,
        })
    }
}

/// Puts `component` in the slot this builder placed earlier, or appends it
/// and records the slot.
fn replace_or_push(
    items: &mut Vec<Component>,
    slot: &mut Option<usize>,
    component: Component,
) {
    match *slot {
        Some(index) => items[index] = component,
        None => {
            *slot = Some(items.len());
            items.push(component);
        }
    }
}

/// Props shared by every question kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionProps {
    pub parent_key: String,
    pub item_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    pub question_text: LocaleMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_sub_text: Option<LocaleMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_group_content: Option<Vec<HelpEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Expression>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_display_components: Vec<Component>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bottom_display_components: Vec<Component>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footnote_text: Option<LocaleMap>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_validations: Vec<Validation>,
}

impl QuestionProps {
    pub fn new(
        parent_key: impl Into<String>,
        item_key: impl Into<String>,
        question_text: LocaleMap,
    ) -> Self {
        Self {
            parent_key: parent_key.into(),
            item_key: item_key.into(),
            question_text,
            ..Self::default()
        }
    }

    pub fn full_key(&self) -> String {
        format!("{}.{}", self.parent_key, self.item_key)
    }
}

/// Validation added when a question is marked required.
#[derive(Debug, Clone, PartialEq)]
pub enum RequiredRule {
    /// Generic `hasResponse` on the response group.
    HasResponse,
    /// Question-specific rule replacing the generic one.
    Custom(Validation),
}

/// Assembles a question in the fixed order: title, condition, help, top
/// decorations, response group, bottom decorations, required check, custom
/// validations, footnote.
pub fn compose(
    props: &QuestionProps,
    response: Option<Component>,
    required: RequiredRule,
) -> Result<SurveyItem, BuildError> {
    if props.question_text.is_empty() {
        return Err(ConfigurationError::MissingField {
            field: "questionText",
        }
        .into());
    }

    let mut question = QuestionBuilder::new(props.parent_key.as_str(), props.item_key.as_str())
        .version(props.version)
        .title(&props.question_text, props.question_sub_text.as_ref())?
        .condition(props.condition.clone());

    if let Some(help) = &props.help_group_content {
        question = question.help_group(help)?;
    }

    for component in &props.top_display_components {
        question = question.display_component(component.clone());
    }

    if let Some(response) = response {
        question = question.response_group(response)?;
    }

    for component in &props.bottom_display_components {
        question = question.display_component(component.clone());
    }

    if props.is_required {
        question = match required {
            RequiredRule::HasResponse => question.has_response_validation(),
            RequiredRule::Custom(validation) => question.validation(validation),
        };
    }

    for validation in &props.custom_validations {
        question = question.validation(validation.clone());
    }

    if let Some(text) = &props.footnote_text {
        question = question.footnote(text)?;
    }

    question.build()
}
