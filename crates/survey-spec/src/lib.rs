#![allow(missing_docs)]

pub mod builder;
pub mod error;
pub mod expr;
pub mod generators;
pub mod groups;
pub mod keys;
pub mod locale;
pub mod question;
pub mod schema;
pub mod spec;
pub mod validate;

pub use builder::{
    ComponentAttrs, GroupBuilder, LeafBuilder, NodeBuilder, PropertiesInput, PropertyValue,
};
pub use error::{BuildError, ConfigurationError, UsageError};
pub use expr::{Expression, ExpressionArg};
pub use generators::{
    DateInputMode, DatePickerProps, DisplayProps, Duration, Eq5dQuestionProps, LikertGroupProps,
    MatrixQuestionProps, NumericInputProps, NumericSliderProps, OptionQuestionProps, date_input,
    display, drop_down, duration_to_seconds, eq5d_health_indicator, matrix, multiple_choice,
    numeric_input, numeric_slider, simple_likert_group, single_choice, slider_categorical,
};
pub use locale::{LocaleMap, LocalizedString, locale_map, localized};
pub use question::{HelpEntry, QuestionBuilder, QuestionProps, RequiredRule, compose};
pub use schema::document_schema;
pub use spec::{
    Component, ComponentBase, ComponentProperties, DataType, ItemComponent, ItemGroupComponent,
    Role, StyleEntry, SurveyItem, Validation, ValidationKind,
};
pub use validate::validate_item;
