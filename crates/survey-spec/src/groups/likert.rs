use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::builder::{ComponentAttrs, GroupBuilder, LeafBuilder};
use crate::error::BuildError;
use crate::expr::Expression;
use crate::keys::unique_random_key;
use crate::locale::LocaleMap;
use crate::spec::component::{ItemGroupComponent, Role, StyleEntry};

const ROW_LABEL_CLASS: &str = "mb-1 fw-bold";
const ROW_SPACING_CLASS: &str = " pt-1 mt-2";
const ROW_BORDER_CLASS: &str = " border-top border-1 border-grey-2";

/// Disables one scale option for a single row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionDisabled {
    pub option_key: String,
    pub exp: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikertRow {
    pub key: String,
    pub content: LocaleMap,
    #[serde(default)]
    pub hide_top_border: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub option_disabled: Vec<OptionDisabled>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_condition: Option<Expression>,
}

impl LikertRow {
    pub fn new(key: impl Into<String>, content: LocaleMap) -> Self {
        Self {
            key: key.into(),
            content,
            hide_top_border: false,
            option_disabled: Vec::new(),
            display_condition: None,
        }
    }

    /// Disabled expression for `option_key` in this row, if any.
    pub fn disabled_for(&self, option_key: &str) -> Option<&Expression> {
        self.option_disabled
            .iter()
            .find(|cond| cond.option_key == option_key)
            .map(|cond| &cond.exp)
    }
}

/// One point of the scale shared by every row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScaleOption {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub content: LocaleMap,
}

/// Option of a single likert item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LikertOption {
    pub key: String,
    pub class_name: Option<String>,
    pub content: Option<LocaleMap>,
    pub disabled: Option<Expression>,
}

/// Likert group: per row a bold label followed by a likert item using the
/// shared scale.
pub fn init_likert_scale_group(
    key: &str,
    rows: &[LikertRow],
    scale_options: &[ScaleOption],
    stack_on_small_screen: bool,
    display_condition: Option<Expression>,
) -> Result<ItemGroupComponent, BuildError> {
    if rows.is_empty() {
        return Err(BuildError::empty("likert rows"));
    }

    let mut taken: HashSet<String> = rows.iter().map(|row| row.key.clone()).collect();
    let mut group = GroupBuilder::new(Role::LikertGroup)
        .key(key)
        .display_condition(display_condition);

    for (index, row) in rows.iter().enumerate() {
        let label = LeafBuilder::new(Role::Text)
            .key(unique_random_key(&mut taken))
            .style(vec![
                StyleEntry::class_name(row_label_class(index, row.hide_top_border)),
                StyleEntry::new("variant", "h6"),
            ])
            .content(&row.content)
            .build()?;

        let options: Vec<LikertOption> = scale_options
            .iter()
            .map(|option| LikertOption {
                key: option.key.clone(),
                class_name: option.class_name.clone(),
                content: Some(option.content.clone()),
                disabled: row.disabled_for(&option.key).cloned(),
            })
            .collect();
        let item = init_likert_scale_item(
            &row.key,
            &options,
            stack_on_small_screen,
            row.display_condition.clone(),
        )?;

        group = group.child(label).child(item);
    }

    let group = group.build()?;
    tracing::trace!(key, rows = rows.len(), "assembled likert group");
    Ok(group)
}

fn row_label_class(index: usize, hide_top_border: bool) -> String {
    let mut class = String::from(ROW_LABEL_CLASS);
    if index > 0 {
        class.push_str(ROW_SPACING_CLASS);
        if !hide_top_border {
            class.push_str(ROW_BORDER_CLASS);
        }
    }
    class
}

pub fn init_likert_scale_item(
    key: &str,
    options: &[LikertOption],
    stack_on_small_screen: bool,
    display_condition: Option<Expression>,
) -> Result<ItemGroupComponent, BuildError> {
    if options.is_empty() {
        return Err(BuildError::empty("likert scale options"));
    }

    let mut group = GroupBuilder::new(Role::Likert)
        .key(key)
        .display_condition(display_condition);
    if stack_on_small_screen {
        group = group.style(vec![StyleEntry::new("responsive", "stackOnSmallScreen")]);
    }

    for option in options {
        let style = option
            .class_name
            .iter()
            .map(|class| StyleEntry::class_name(class.as_str()))
            .collect();
        group = group.child(
            LeafBuilder::new(Role::Option)
                .key(option.key.as_str())
                .content(option.content.as_ref())
                .style(style)
                .disabled(option.disabled.clone())
                .build()?,
        );
    }

    group.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::locale_map;
    use crate::spec::component::Component;

    fn scale() -> Vec<ScaleOption> {
        ["1", "2", "3"]
            .into_iter()
            .map(|key| ScaleOption {
                key: key.into(),
                class_name: (key == "1").then(|| "w-100".to_string()),
                content: locale_map([("en", key)]),
            })
            .collect()
    }

    fn rows() -> Vec<LikertRow> {
        let mut second = LikertRow::new("b", locale_map([("en", "Row B")]));
        second.option_disabled.push(OptionDisabled {
            option_key: "2".into(),
            exp: Expression::new("isB2Locked"),
        });
        let mut third = LikertRow::new("c", locale_map([("en", "Row C")]));
        third.hide_top_border = true;
        vec![LikertRow::new("a", locale_map([("en", "Row A")])), second, third]
    }

    #[test]
    fn each_row_emits_label_then_item() {
        let group = init_likert_scale_group("lsg", &rows(), &scale(), false, None).unwrap();
        assert_eq!(group.items.len(), 6);
        for (pair, row_key) in group.items.chunks(2).zip(["a", "b", "c"]) {
            assert_eq!(pair[0].role(), Role::Text);
            assert_eq!(pair[1].role(), Role::Likert);
            assert_eq!(pair[1].key(), Some(row_key));
        }
    }

    #[test]
    fn top_border_skipped_for_first_and_hidden_rows() {
        let group = init_likert_scale_group("lsg", &rows(), &scale(), false, None).unwrap();
        let classes: Vec<_> = group
            .items
            .iter()
            .filter(|item| item.role() == Role::Text)
            .map(|label| label.base().style_value("className").unwrap().to_string())
            .collect();
        assert_eq!(
            classes,
            vec![
                "mb-1 fw-bold",
                "mb-1 fw-bold pt-1 mt-2 border-top border-1 border-grey-2",
                "mb-1 fw-bold pt-1 mt-2",
            ]
        );
    }

    #[test]
    fn disabled_overrides_apply_per_row_and_option() {
        let group = init_likert_scale_group("lsg", &rows(), &scale(), true, None).unwrap();
        let Some(Component::Group(row_b)) = group.find("b") else {
            panic!("row b missing");
        };
        assert_eq!(row_b.base.style_value("responsive"), Some("stackOnSmallScreen"));
        let disabled: Vec<_> = row_b
            .items
            .iter()
            .map(|option| option.base().disabled.clone())
            .collect();
        assert_eq!(disabled, vec![None, Some(Expression::new("isB2Locked")), None]);

        let Some(Component::Group(row_a)) = group.find("a") else {
            panic!("row a missing");
        };
        assert!(row_a.items.iter().all(|option| option.base().disabled.is_none()));
        assert_eq!(row_a.items[0].base().style_value("className"), Some("w-100"));
    }

    #[test]
    fn label_keys_differ_from_row_keys() {
        let group = init_likert_scale_group("lsg", &rows(), &scale(), false, None).unwrap();
        let keys: HashSet<_> = group.child_keys().into_iter().collect();
        assert_eq!(keys.len(), 6);
    }
}
