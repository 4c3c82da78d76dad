use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{BuildError, ConfigurationError, UsageError};
use crate::spec::component::Component;
use crate::spec::item::SurveyItem;

static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^.\s]+$").expect("key pattern compiles"));

/// Component keys are joined with `.` into response paths, so a key may not
/// contain dots or whitespace.
pub fn is_valid_key(key: &str) -> bool {
    KEY_PATTERN.is_match(key)
}

/// Dotted path made of valid keys, e.g. a parent item key.
pub fn is_valid_path(path: &str) -> bool {
    !path.is_empty() && path.split('.').all(is_valid_key)
}

pub(crate) fn check_key(key: &str) -> Result<(), BuildError> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidKey { key: key.into() }.into())
    }
}

pub(crate) fn check_path(path: &str) -> Result<(), BuildError> {
    if is_valid_path(path) {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidKey { key: path.into() }.into())
    }
}

/// Checks that the keyed children of one group are well formed and unique.
/// Children without a key are not compared.
pub fn check_siblings(parent: &str, items: &[Component]) -> Result<(), BuildError> {
    let mut seen = HashSet::new();
    for key in items.iter().filter_map(Component::key) {
        check_key(key)?;
        if !seen.insert(key) {
            return Err(ConfigurationError::DuplicateKey {
                parent: parent.into(),
                key: key.into(),
            }
            .into());
        }
    }
    Ok(())
}

/// Re-checks the structure of a whole survey item, e.g. one read back from
/// JSON: the item path, sibling keys in every group and that only group
/// roles carry children.
pub fn validate_item(item: &SurveyItem) -> Result<(), BuildError> {
    check_path(&item.key)?;
    check_siblings(&item.key, &item.components.items)?;
    for child in &item.components.items {
        validate_component(&item.key, child)?;
    }
    Ok(())
}

fn validate_component(parent: &str, component: &Component) -> Result<(), BuildError> {
    let Component::Group(group) = component else {
        return match component.key() {
            Some(key) => check_key(key),
            None => Ok(()),
        };
    };

    if !group.base.role.is_group() && !group.items.is_empty() {
        return Err(UsageError::ChildOnLeaf {
            role: group.base.role,
        }
        .into());
    }

    let path = match group.base.key.as_deref() {
        Some(key) => format!("{}.{}", parent, key),
        None => parent.to_string(),
    };
    check_siblings(&path, &group.items)?;
    for child in &group.items {
        validate_component(&path, child)?;
    }
    Ok(())
}
