use serde_json::{Value, json};

use survey_spec::{
    Component, DatePickerProps, DisplayProps, Duration, Eq5dQuestionProps, Expression,
    ExpressionArg, LeafBuilder, LikertGroupProps, MatrixQuestionProps, NumericInputProps,
    NumericSliderProps, OptionQuestionProps, PropertiesInput, QuestionProps, Role, StyleEntry,
    SurveyItem, ValidationKind, date_input, display, drop_down, eq5d_health_indicator,
    locale_map, matrix, multiple_choice, numeric_input, numeric_slider, simple_likert_group,
    single_choice, slider_categorical, validate_item,
};
use survey_spec::builder::ComponentAttrs;
use survey_spec::groups::{CellDef, MatrixRow, MatrixRowDef, OptionDef, ResponseCell};

fn fixture(name: &str) -> &'static str {
    match name {
        "single_choice" => include_str!("../tests/fixtures/single_choice.json"),
        "likert_group" => include_str!("../tests/fixtures/likert_group.json"),
        _ => panic!("unknown fixture {}", name),
    }
}

fn question(item_key: &str) -> QuestionProps {
    QuestionProps::new("survey", item_key, locale_map([("en", "Question")]))
}

fn response_inner(item: &SurveyItem) -> &Component {
    let rg = item
        .components
        .find_role(Role::ResponseGroup)
        .expect("response group");
    &rg.items()[0]
}

fn root_roles(item: &SurveyItem) -> Vec<Role> {
    item.components.items.iter().map(Component::role).collect()
}

#[test]
fn single_choice_from_json_follows_fixed_layout() {
    let props: OptionQuestionProps =
        serde_json::from_str(fixture("single_choice")).expect("deserialize");
    let item = single_choice(&props).expect("build");

    assert_eq!(item.key, "weekly.Q1");
    assert_eq!(item.parent_key(), "weekly");
    assert_eq!(item.version, 2);
    assert!(item.condition.is_some());
    assert_eq!(
        root_roles(&item),
        vec![Role::Title, Role::HelpGroup, Role::ResponseGroup, Role::Footnote]
    );

    let inner = response_inner(&item);
    assert_eq!(inner.role(), Role::SingleChoiceGroup);
    let keys: Vec<_> = inner.items().iter().filter_map(Component::key).collect();
    assert_eq!(keys, vec!["1", "0", "2", "99"]);

    let value = serde_json::to_value(&item).expect("serialize");
    let title = &value["components"]["items"][0];
    assert_eq!(title["role"], "title");
    assert_eq!(title["content"][0]["code"], "de");
    assert_eq!(title["description"][0]["parts"][0]["str"], "Since your last visit");

    let number_option = &value["components"]["items"][2]["items"][0]["items"][2];
    assert_eq!(number_option["dtype"], "number");
    assert_eq!(
        number_option["properties"],
        json!({
            "min": { "dtype": "num", "num": 35.0 },
            "max": { "dtype": "num", "num": 43.0 },
            "stepSize": { "dtype": "num", "num": 0.1 }
        })
    );

    let footnote = &value["components"]["items"][3];
    assert_eq!(
        footnote["style"],
        json!([{ "key": "className", "value": "fs-small fst-italic text-center" }])
    );
}

#[test]
fn required_single_choice_has_one_has_response_check() {
    let props: OptionQuestionProps =
        serde_json::from_str(fixture("single_choice")).expect("deserialize");
    let item = single_choice(&props).expect("build");

    assert_eq!(item.validations.len(), 1);
    let validation = &item.validations[0];
    assert_eq!(validation.key, "r1");
    assert_eq!(validation.kind, ValidationKind::Hard);
    assert_eq!(validation.rule, Expression::has_response("weekly.Q1", "rg"));
}

#[test]
fn decorations_and_custom_validations_keep_their_order() {
    let text = |key: &str| -> Component {
        LeafBuilder::new(Role::Text)
            .key(key)
            .content(&locale_map([("en", key)]))
            .build()
            .unwrap()
            .into()
    };
    let mut common = question("q3");
    common.top_display_components = vec![text("top1"), text("top2")];
    common.bottom_display_components = vec![text("bottom")];
    common.is_required = true;
    common.custom_validations = vec![survey_spec::Validation::soft(
        "plausible",
        Expression::new("alwaysTrue"),
    )];

    let props = OptionQuestionProps {
        common,
        response_options: vec![
            OptionDef::option("a", locale_map([("en", "A")])),
            OptionDef::option("b", locale_map([("en", "B")])),
        ],
        order: Some(Expression::new("randomized")),
    };
    let item = multiple_choice(&props).unwrap();

    let keys: Vec<_> = item.components.items.iter().map(Component::key).collect();
    assert_eq!(
        keys,
        vec![None, Some("top1"), Some("top2"), Some("rg"), Some("bottom")]
    );
    let validation_keys: Vec<_> = item.validations.iter().map(|v| v.key.as_str()).collect();
    assert_eq!(validation_keys, vec!["r1", "plausible"]);

    let inner = response_inner(&item).as_group().unwrap();
    assert_eq!(inner.base.role, Role::MultipleChoiceGroup);
    assert_eq!(inner.order, Some(Expression::new("randomized")));
}

#[test]
fn optional_question_has_no_validations() {
    let props = OptionQuestionProps {
        common: question("q4"),
        response_options: vec![OptionDef::option("a", locale_map([("en", "A")]))],
        order: None,
    };
    let item = drop_down(&props).unwrap();
    assert!(item.validations.is_empty());
    let inner = response_inner(&item);
    assert_eq!(inner.role(), Role::DropDownGroup);
    assert_eq!(inner.key(), Some("scg"));
}

#[test]
fn required_likert_group_uses_one_conjunction_rule() {
    let props: LikertGroupProps =
        serde_json::from_str(fixture("likert_group")).expect("deserialize");
    let item = simple_likert_group(&props).expect("build");

    assert_eq!(item.validations.len(), 1);
    let rule = &item.validations[0];
    assert_eq!(rule.key, "r");
    assert_eq!(rule.kind, ValidationKind::Hard);
    assert_eq!(rule.rule.name, "and");
    assert_eq!(rule.rule.data.len(), 3);

    for (clause, row) in rule.rule.data.iter().zip(["a", "b", "c"]) {
        let clause = clause.as_expression().expect("nested expression");
        assert_eq!(
            *clause,
            Expression::response_has_keys_any(
                "weekly.Q2",
                &format!("rg.lsg.{}", row),
                ["1", "2", "3"]
            )
        );
    }
}

#[test]
fn likert_group_json_shape() {
    let props: LikertGroupProps =
        serde_json::from_str(fixture("likert_group")).expect("deserialize");
    let item = simple_likert_group(&props).expect("build");
    let value = serde_json::to_value(&item).unwrap();

    let group = &value["components"]["items"][1]["items"][0];
    assert_eq!(group["role"], "likertGroup");
    assert_eq!(group["key"], "lsg");
    let children = group["items"].as_array().unwrap();
    assert_eq!(children.len(), 6);

    let row_b = &children[3];
    assert_eq!(row_b["role"], "likert");
    assert_eq!(
        row_b["style"],
        json!([{ "key": "responsive", "value": "stackOnSmallScreen" }])
    );
    assert_eq!(row_b["items"][2]["disabled"], json!({ "name": "isDefined" }));
    assert_eq!(row_b["items"][2]["style"][0]["value"], "text-success");
    assert!(row_b["items"][0].get("disabled").is_none());

    let label = &children[0];
    assert_eq!(label["style"][1], json!({ "key": "variant", "value": "h6" }));
}

fn strip_anonymous_keys(value: &mut Value) {
    if let Some(items) = value.get_mut("items").and_then(Value::as_array_mut) {
        for item in items {
            if item["role"] == "text" {
                if let Some(map) = item.as_object_mut() {
                    map.remove("key");
                }
            }
            strip_anonymous_keys(item);
        }
    }
}

#[test]
fn rebuilding_differs_only_in_anonymous_keys() {
    let props: LikertGroupProps =
        serde_json::from_str(fixture("likert_group")).expect("deserialize");
    let first = simple_likert_group(&props).unwrap();
    let second = simple_likert_group(&props).unwrap();

    let label_keys = |item: &SurveyItem| -> Vec<String> {
        response_inner(item)
            .items()
            .iter()
            .filter(|child| child.role() == Role::Text)
            .filter_map(|child| child.key().map(str::to_string))
            .collect()
    };
    assert_eq!(label_keys(&first).len(), 3);
    assert_ne!(label_keys(&first), label_keys(&second));

    let mut first = serde_json::to_value(&first).unwrap();
    let mut second = serde_json::to_value(&second).unwrap();
    strip_anonymous_keys(&mut first["components"]);
    strip_anonymous_keys(&mut second["components"]);
    assert_eq!(first, second);
}

#[test]
fn identical_props_build_identical_items() {
    let props: OptionQuestionProps =
        serde_json::from_str(fixture("single_choice")).expect("deserialize");
    assert_eq!(single_choice(&props).unwrap(), single_choice(&props).unwrap());
}

#[test]
fn display_item_only_holds_given_components() {
    let content: Vec<Component> = ["intro", "details"]
        .into_iter()
        .map(|key| {
            LeafBuilder::new(Role::Markdown)
                .key(key)
                .content(&locale_map([("en", "# Hello")]))
                .build()
                .unwrap()
                .into()
        })
        .collect();
    let item = display(&DisplayProps {
        parent_key: "survey".into(),
        item_key: "intro".into(),
        content: content.clone(),
    })
    .unwrap();

    assert_eq!(item.version, 1);
    assert!(item.validations.is_empty());
    assert!(item.components.find_role(Role::ResponseGroup).is_none());
    assert_eq!(item.components.items, content);
}

#[test]
fn slider_categorical_question_uses_its_fixed_key() {
    let props: OptionQuestionProps = serde_json::from_value(json!({
        "parentKey": "survey",
        "itemKey": "pain",
        "questionText": { "en": "How much pain?" },
        "isRequired": true,
        "responseOptions": [
            { "key": "0", "content": { "en": "None" } },
            { "key": "1", "content": { "en": "Some" } },
            { "key": "2", "content": { "en": "A lot" } }
        ]
    }))
    .unwrap();
    let item = slider_categorical(&props).unwrap();

    let inner = response_inner(&item);
    assert_eq!(inner.role(), Role::SliderCategorical);
    assert_eq!(inner.key(), Some("scc"));
    let keys: Vec<_> = inner.items().iter().filter_map(Component::key).collect();
    assert_eq!(keys, vec!["0", "1", "2"]);
    assert!(inner.items().iter().all(|option| option.role() == Role::Option));

    let value = serde_json::to_value(&item).unwrap();
    assert_eq!(
        value["components"]["items"][1]["items"][0]["role"],
        "sliderCategorical"
    );
    assert_eq!(item.validations.len(), 1);
}

#[test]
fn numeric_input_wraps_literal_bounds() {
    let limit = Expression::with_args("getAttribute", [ExpressionArg::str("age")]);
    let props = NumericInputProps {
        common: question("age"),
        content: locale_map([("en", "years")]),
        content_behind_input: true,
        component_properties: Some(PropertiesInput::range(
            Some(0.0.into()),
            Some(limit.clone().into()),
            Some(1.0.into()),
        )),
    };
    let item = numeric_input(&props).unwrap();
    let inner = response_inner(&item).base();

    assert_eq!(inner.role, Role::NumberInput);
    assert_eq!(inner.key.as_deref(), Some("num"));
    assert_eq!(inner.style_value("labelPlacement"), Some("after"));
    let properties = inner.properties.as_ref().unwrap();
    assert_eq!(properties.min, Some(ExpressionArg::num(0.0)));
    assert_eq!(properties.max, Some(ExpressionArg::Exp { exp: limit }));
    assert_eq!(properties.step_size, Some(ExpressionArg::num(1.0)));
}

#[test]
fn numeric_slider_labels_and_bounds() {
    let props = NumericSliderProps {
        common: question("slider"),
        slider_label: locale_map([("en", "Your score")]),
        no_response_label: locale_map([("en", "Move the slider")]),
        min: Some(0.0.into()),
        max: Some(100.0.into()),
        step_size: None,
    };
    let item = numeric_slider(&props).unwrap();
    let value = serde_json::to_value(response_inner(&item)).unwrap();
    assert_eq!(value["role"], "sliderNumeric");
    assert_eq!(value["key"], "slider");
    assert_eq!(value["description"][0]["parts"][0]["str"], "Move the slider");
    assert_eq!(
        value["properties"],
        json!({
            "min": { "dtype": "num", "num": 0.0 },
            "max": { "dtype": "num", "num": 100.0 }
        })
    );
}

#[test]
fn date_picker_bounds_are_relative_timestamps() {
    let reference = Expression::new("getLastSubmission");
    let props = DatePickerProps {
        common: question("onset"),
        date_input_mode: Default::default(),
        input_label_text: Some(locale_map([("en", "Date")])),
        placeholder_text: None,
        min_relative_date: Some(Duration {
            years: -1,
            ..Duration::default()
        }),
        max_relative_date: Some(Duration {
            reference: Some(reference.clone().into()),
            days: 1,
            hours: 2,
            ..Duration::default()
        }),
    };
    let item = date_input(&props).unwrap();
    let properties = response_inner(&item).base().properties.clone().unwrap();

    assert_eq!(properties.date_input_mode, Some(ExpressionArg::str("YMD")));
    assert_eq!(
        properties.min,
        Some(Expression::timestamp_with_offset(-31_536_000, None).into())
    );
    assert_eq!(
        properties.max,
        Some(Expression::timestamp_with_offset(93_600, Some(reference.into())).into())
    );
}

#[test]
fn matrix_question_wraps_matrix_group() {
    let props = MatrixQuestionProps {
        common: question("symptoms"),
        rows: vec![MatrixRow::ResponseRow(MatrixRowDef::new(
            "fever",
            vec![
                ResponseCell::Label(CellDef::with_content("l", locale_map([("en", "Fever")]))),
                ResponseCell::NumberInput(CellDef {
                    properties: Some(PropertiesInput::range(Some(35.0.into()), None, None)),
                    ..CellDef::new("t")
                }),
            ],
        ))],
        order: None,
    };
    let item = matrix(&props).unwrap();
    let inner = response_inner(&item);
    assert_eq!(inner.role(), Role::Matrix);
    assert_eq!(inner.items()[0].items()[1].role(), Role::NumberInput);
    validate_item(&item).unwrap();
}

#[test]
fn eq5d_question_wraps_fixed_widget() {
    let props = Eq5dQuestionProps {
        common: question("health"),
        instruction_text: locale_map([("en", "Tap the scale")]),
        value_box_text: locale_map([("en", "Today")]),
        max_health_text: locale_map([("en", "Best")]),
        min_health_text: locale_map([("en", "Worst")]),
    };
    let item = eq5d_health_indicator(&props).unwrap();
    let inner = response_inner(&item);
    assert_eq!(inner.role(), Role::Eq5dHealthIndicator);
    assert_eq!(inner.items().len(), 4);
}

#[test]
fn built_items_round_trip_through_json() {
    let props: OptionQuestionProps =
        serde_json::from_str(fixture("single_choice")).expect("deserialize");
    let item = single_choice(&props).unwrap();
    let text = serde_json::to_string(&item).unwrap();
    let parsed: SurveyItem = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, item);
    validate_item(&parsed).unwrap();
}

#[test]
fn style_entries_serialize_as_pairs() {
    assert_eq!(
        serde_json::to_value(StyleEntry::class_name("x")).unwrap(),
        json!({ "key": "className", "value": "x" })
    );
}
