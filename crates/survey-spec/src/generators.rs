//! One generator per question kind. Each builds the kind's response
//! component and hands it to [`compose`] with the shared props.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::builder::{ComponentAttrs, LeafBuilder, PropertiesInput, PropertyValue};
use crate::error::{BuildError, ConfigurationError};
use crate::expr::{Expression, ExpressionArg};
use crate::groups::{
    Eq5dHealthIndicator, GroupSettings, LikertRow, MatrixRow, OptionDef, ScaleOption,
    init_dropdown_group, init_eq5d_health_indicator, init_likert_scale_group,
    init_matrix_question, init_multiple_choice_group, init_single_choice_group,
    init_slider_categorical_group,
};
use crate::keys::{
    DATE_PICKER_KEY, EQ5D_KEY, LIKERT_SCALE_GROUP_KEY, MATRIX_KEY, MULTIPLE_CHOICE_KEY,
    NUMERIC_INPUT_KEY, RESPONSE_GROUP_KEY, SINGLE_CHOICE_KEY, SLIDER_CATEGORICAL_KEY, SLIDER_KEY,
};
use crate::locale::LocaleMap;
use crate::question::{QuestionBuilder, QuestionProps, RequiredRule, compose};
use crate::spec::component::{Component, Role, StyleEntry};
use crate::spec::item::{SurveyItem, Validation};

pub const YEAR_SECONDS: i64 = 31_536_000;
pub const MONTH_SECONDS: i64 = 2_592_000;
pub const DAY_SECONDS: i64 = 86_400;
pub const HOUR_SECONDS: i64 = 3_600;
pub const MINUTE_SECONDS: i64 = 60;

pub const LIKERT_VALIDATION_KEY: &str = "r";

/// Props for option-list questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionQuestionProps {
    #[serde(flatten)]
    pub common: QuestionProps,
    pub response_options: Vec<OptionDef>,
    /// Order expression for the options, e.g. to shuffle them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Expression>,
}

pub fn single_choice(props: &OptionQuestionProps) -> Result<SurveyItem, BuildError> {
    let inner = init_single_choice_group(
        SINGLE_CHOICE_KEY,
        &props.response_options,
        props.order.clone(),
    )?;
    compose(&props.common, Some(inner.into()), RequiredRule::HasResponse)
}

pub fn multiple_choice(props: &OptionQuestionProps) -> Result<SurveyItem, BuildError> {
    let inner = init_multiple_choice_group(
        MULTIPLE_CHOICE_KEY,
        &props.response_options,
        props.order.clone(),
    )?;
    compose(&props.common, Some(inner.into()), RequiredRule::HasResponse)
}

/// Dropdowns use the single choice key.
pub fn drop_down(props: &OptionQuestionProps) -> Result<SurveyItem, BuildError> {
    let inner = init_dropdown_group(
        SINGLE_CHOICE_KEY,
        &props.response_options,
        GroupSettings::ordered(props.order.clone()),
    )?;
    compose(&props.common, Some(inner.into()), RequiredRule::HasResponse)
}

pub fn slider_categorical(props: &OptionQuestionProps) -> Result<SurveyItem, BuildError> {
    let inner = init_slider_categorical_group(
        SLIDER_CATEGORICAL_KEY,
        &props.response_options,
        props.order.clone(),
        None,
    )?;
    compose(&props.common, Some(inner.into()), RequiredRule::HasResponse)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NumericInputProps {
    #[serde(flatten)]
    pub common: QuestionProps,
    pub content: LocaleMap,
    /// Render the label after the input field.
    #[serde(default)]
    pub content_behind_input: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_properties: Option<PropertiesInput>,
}

pub fn numeric_input(props: &NumericInputProps) -> Result<SurveyItem, BuildError> {
    let style = if props.content_behind_input {
        vec![StyleEntry::new("labelPlacement", "after")]
    } else {
        Vec::new()
    };
    let inner = LeafBuilder::new(Role::NumberInput)
        .key(NUMERIC_INPUT_KEY)
        .properties(props.component_properties.clone())
        .content(&props.content)
        .style(style)
        .build()?;
    compose(&props.common, Some(inner.into()), RequiredRule::HasResponse)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NumericSliderProps {
    #[serde(flatten)]
    pub common: QuestionProps,
    pub slider_label: LocaleMap,
    pub no_response_label: LocaleMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<PropertyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<PropertyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_size: Option<PropertyValue>,
}

pub fn numeric_slider(props: &NumericSliderProps) -> Result<SurveyItem, BuildError> {
    let inner = LeafBuilder::new(Role::SliderNumeric)
        .key(SLIDER_KEY)
        .content(&props.slider_label)
        .description(&props.no_response_label)
        .properties(PropertiesInput::range(
            props.min.clone(),
            props.max.clone(),
            props.step_size.clone(),
        ))
        .build()?;
    compose(&props.common, Some(inner.into()), RequiredRule::HasResponse)
}

/// Offset relative to `reference`, or to the time of answering when no
/// reference is given.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Duration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<PropertyValue>,
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Total seconds of a duration using fixed 365-day years and 30-day months.
/// Fails when the total does not fit in an `i64`.
pub fn duration_to_seconds(duration: &Duration) -> Result<i64, BuildError> {
    let parts = [
        (duration.years, YEAR_SECONDS),
        (duration.months, MONTH_SECONDS),
        (duration.days, DAY_SECONDS),
        (duration.hours, HOUR_SECONDS),
        (duration.minutes, MINUTE_SECONDS),
        (duration.seconds, 1),
    ];
    parts
        .into_iter()
        .try_fold(0i64, |total, (count, unit)| {
            count.checked_mul(unit)?.checked_add(total)
        })
        .ok_or_else(|| ConfigurationError::OutOfRange { field: "duration" }.into())
}

fn relative_date(duration: &Duration) -> Result<PropertyValue, BuildError> {
    let reference = duration.reference.clone().map(PropertyValue::into_arg);
    let offset = duration_to_seconds(duration)?;
    Ok(Expression::timestamp_with_offset(offset, reference).into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum DateInputMode {
    #[default]
    Ymd,
    Ym,
    Y,
}

impl DateInputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DateInputMode::Ymd => "YMD",
            DateInputMode::Ym => "YM",
            DateInputMode::Y => "Y",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatePickerProps {
    #[serde(flatten)]
    pub common: QuestionProps,
    #[serde(default)]
    pub date_input_mode: DateInputMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_label_text: Option<LocaleMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_text: Option<LocaleMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_relative_date: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_relative_date: Option<Duration>,
}

pub fn date_input(props: &DatePickerProps) -> Result<SurveyItem, BuildError> {
    let properties = PropertiesInput {
        min: props.min_relative_date.as_ref().map(relative_date).transpose()?,
        max: props.max_relative_date.as_ref().map(relative_date).transpose()?,
        step_size: None,
        date_input_mode: Some(ExpressionArg::str(props.date_input_mode.as_str()).into()),
    };
    let inner = LeafBuilder::new(Role::DateInput)
        .key(DATE_PICKER_KEY)
        .properties(properties)
        .content(props.input_label_text.as_ref())
        .description(props.placeholder_text.as_ref())
        .build()?;
    compose(&props.common, Some(inner.into()), RequiredRule::HasResponse)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikertGroupProps {
    #[serde(flatten)]
    pub common: QuestionProps,
    pub rows: Vec<LikertRow>,
    pub scale_options: Vec<ScaleOption>,
    #[serde(default)]
    pub stack_on_small_screen: bool,
}

/// Every row must have one of the scale options selected.
pub fn likert_required_rule(props: &LikertGroupProps) -> Validation {
    let item_key = props.common.full_key();
    let scale_keys: Vec<&str> = props
        .scale_options
        .iter()
        .map(|option| option.key.as_str())
        .collect();
    let clauses = props.rows.iter().map(|row| {
        let path = [RESPONSE_GROUP_KEY, LIKERT_SCALE_GROUP_KEY, row.key.as_str()].join(".");
        Expression::response_has_keys_any(&item_key, &path, scale_keys.iter().copied())
    });
    Validation::hard(LIKERT_VALIDATION_KEY, Expression::and(clauses))
}

pub fn simple_likert_group(props: &LikertGroupProps) -> Result<SurveyItem, BuildError> {
    let inner = init_likert_scale_group(
        LIKERT_SCALE_GROUP_KEY,
        &props.rows,
        &props.scale_options,
        props.stack_on_small_screen,
        None,
    )?;
    compose(
        &props.common,
        Some(inner.into()),
        RequiredRule::Custom(likert_required_rule(props)),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatrixQuestionProps {
    #[serde(flatten)]
    pub common: QuestionProps,
    pub rows: Vec<MatrixRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Expression>,
}

pub fn matrix(props: &MatrixQuestionProps) -> Result<SurveyItem, BuildError> {
    let inner = init_matrix_question(MATRIX_KEY, &props.rows, props.order.clone())?;
    compose(&props.common, Some(inner.into()), RequiredRule::HasResponse)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Eq5dQuestionProps {
    #[serde(flatten)]
    pub common: QuestionProps,
    pub instruction_text: LocaleMap,
    pub value_box_text: LocaleMap,
    pub max_health_text: LocaleMap,
    pub min_health_text: LocaleMap,
}

pub fn eq5d_health_indicator(props: &Eq5dQuestionProps) -> Result<SurveyItem, BuildError> {
    let inner = init_eq5d_health_indicator(&Eq5dHealthIndicator {
        key: EQ5D_KEY.into(),
        display_condition: None,
        disabled: None,
        instruction_text: props.instruction_text.clone(),
        value_box_text: props.value_box_text.clone(),
        max_health_text: props.max_health_text.clone(),
        min_health_text: props.min_health_text.clone(),
    })?;
    compose(&props.common, Some(inner.into()), RequiredRule::HasResponse)
}

/// Display-only item: the given components in order, nothing to answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisplayProps {
    pub parent_key: String,
    pub item_key: String,
    pub content: Vec<Component>,
}

pub fn display(props: &DisplayProps) -> Result<SurveyItem, BuildError> {
    props
        .content
        .iter()
        .cloned()
        .fold(
            QuestionBuilder::new(props.parent_key.as_str(), props.item_key.as_str()),
            QuestionBuilder::display_component,
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_uses_fixed_unit_lengths() {
        let duration = Duration {
            days: 1,
            hours: 2,
            ..Duration::default()
        };
        assert_eq!(duration_to_seconds(&duration), Ok(93_600));

        let duration = Duration {
            years: -1,
            months: 1,
            minutes: 1,
            seconds: 1,
            ..Duration::default()
        };
        assert_eq!(
            duration_to_seconds(&duration),
            Ok(-31_536_000 + 2_592_000 + 61)
        );
    }

    #[test]
    fn oversized_duration_is_out_of_range() {
        let duration = Duration {
            years: 300_000_000_000,
            ..Duration::default()
        };
        assert_eq!(
            duration_to_seconds(&duration),
            Err(BuildError::from(ConfigurationError::OutOfRange {
                field: "duration"
            }))
        );

        let duration = Duration {
            seconds: i64::MAX,
            minutes: 1,
            ..Duration::default()
        };
        assert!(duration_to_seconds(&duration).is_err());
    }

    #[test]
    fn date_input_mode_uses_short_codes() {
        assert_eq!(
            serde_json::to_value(DateInputMode::Ym).unwrap(),
            serde_json::json!("YM")
        );
    }
}
