use serde_json::json;

use survey_spec::groups::{LikertRow, OptionDef, init_likert_scale_group};
use survey_spec::{
    BuildError, ConfigurationError, DatePickerProps, LikertGroupProps, OptionQuestionProps,
    QuestionProps, SurveyItem, UsageError, date_input, locale_map, simple_likert_group,
    single_choice, validate_item,
};

fn props(options: Vec<OptionDef>) -> OptionQuestionProps {
    OptionQuestionProps {
        common: QuestionProps::new("survey", "q1", locale_map([("en", "Pick")])),
        response_options: options,
        order: None,
    }
}

#[test]
fn empty_option_list_is_a_configuration_error() {
    let err = single_choice(&props(Vec::new())).unwrap_err();
    assert_eq!(
        err,
        BuildError::from(ConfigurationError::EmptyList {
            what: "response options"
        })
    );
    assert!(!err.is_usage_error());
}

#[test]
fn duplicate_option_keys_are_rejected() {
    let options = vec![
        OptionDef::option("a", locale_map([("en", "A")])),
        OptionDef::option("a", locale_map([("en", "A again")])),
    ];
    let err = single_choice(&props(options)).unwrap_err();
    assert_eq!(
        err,
        BuildError::from(ConfigurationError::DuplicateKey {
            parent: "scg".into(),
            key: "a".into()
        })
    );
}

#[test]
fn dotted_option_key_is_rejected() {
    let options = vec![OptionDef::option("a.b", locale_map([("en", "A")]))];
    let err = single_choice(&props(options)).unwrap_err();
    assert_eq!(
        err,
        BuildError::from(ConfigurationError::InvalidKey { key: "a.b".into() })
    );
}

#[test]
fn invalid_parent_key_is_rejected() {
    let mut props = props(vec![OptionDef::option("a", locale_map([("en", "A")]))]);
    props.common.parent_key = "survey..weekly".into();
    assert!(single_choice(&props).is_err());
}

#[test]
fn likert_group_needs_rows_and_scale() {
    let scale = Vec::new();
    let rows = vec![LikertRow::new("a", locale_map([("en", "A")]))];
    assert!(init_likert_scale_group("lsg", &rows, &scale, false, None).is_err());

    let props = LikertGroupProps {
        common: QuestionProps::new("survey", "q2", locale_map([("en", "Agree?")])),
        rows: Vec::new(),
        scale_options: Vec::new(),
        stack_on_small_screen: false,
    };
    assert_eq!(
        simple_likert_group(&props).unwrap_err(),
        BuildError::from(ConfigurationError::EmptyList {
            what: "likert rows"
        })
    );
}

#[test]
fn validate_item_flags_children_on_leaf_roles() {
    let item: SurveyItem = serde_json::from_value(json!({
        "key": "survey.q1",
        "version": 1,
        "components": {
            "role": "root",
            "items": [
                { "role": "title", "items": [{ "role": "text" }] }
            ]
        }
    }))
    .unwrap();
    assert_eq!(
        validate_item(&item).unwrap_err(),
        BuildError::from(UsageError::ChildOnLeaf {
            role: survey_spec::Role::Title
        })
    );
}

#[test]
fn validate_item_flags_nested_duplicates() {
    let item: SurveyItem = serde_json::from_value(json!({
        "key": "survey.q1",
        "version": 1,
        "components": {
            "role": "root",
            "items": [{
                "key": "rg",
                "role": "responseGroup",
                "items": [{
                    "key": "scg",
                    "role": "singleChoiceGroup",
                    "items": [
                        { "key": "1", "role": "option" },
                        { "key": "1", "role": "option" }
                    ]
                }]
            }]
        }
    }))
    .unwrap();
    assert_eq!(
        validate_item(&item).unwrap_err(),
        BuildError::from(ConfigurationError::DuplicateKey {
            parent: "survey.q1.rg.scg".into(),
            key: "1".into()
        })
    );
}

#[test]
fn oversized_relative_date_is_out_of_range() {
    let props: DatePickerProps = serde_json::from_value(json!({
        "parentKey": "survey",
        "itemKey": "onset",
        "questionText": { "en": "When?" },
        "minRelativeDate": { "years": 300000000000i64 }
    }))
    .unwrap();
    assert_eq!(
        date_input(&props).unwrap_err(),
        BuildError::from(ConfigurationError::OutOfRange { field: "duration" })
    );
}
