use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::expr::ExpressionArg;

/// Locale code to display text.
pub type LocaleMap = BTreeMap<String, String>;

/// Text for one locale, as the survey engine expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LocalizedString {
    pub code: String,
    pub parts: Vec<ExpressionArg>,
}

/// Converts a locale map into the ordered list stored on components.
/// Entries come out sorted by locale code.
pub fn localized(map: &LocaleMap) -> Vec<LocalizedString> {
    map.iter()
        .map(|(code, text)| LocalizedString {
            code: code.clone(),
            parts: vec![ExpressionArg::str(text.as_str())],
        })
        .collect()
}

/// Convenience constructor: `locale_map([("en", "Yes"), ("de", "Ja")])`.
pub fn locale_map<I, K, V>(entries: I) -> LocaleMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    entries
        .into_iter()
        .map(|(code, text)| (code.into(), text.into()))
        .collect()
}
