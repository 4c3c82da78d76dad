use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Expression tree evaluated by the survey engine. Builders only assemble
/// and forward it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expression {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<ExpressionArg>,
}

/// A single argument of an [`Expression`]: a literal or a nested expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "dtype", rename_all = "lowercase")]
pub enum ExpressionArg {
    Num { num: f64 },
    Str { str: String },
    Exp { exp: Expression },
}

impl Expression {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: None,
            data: Vec::new(),
        }
    }

    /// Builds `name(args...)`; arguments keep the given order.
    pub fn with_args<I, A>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<ExpressionArg>,
    {
        Self {
            name: name.into(),
            return_type: None,
            data: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Default selection order for groups.
    pub fn sequential() -> Self {
        Self::new("sequential")
    }

    pub fn and<I>(expressions: I) -> Self
    where
        I: IntoIterator<Item = Expression>,
    {
        Self::with_args("and", expressions)
    }

    pub fn has_response(item_key: &str, response_key: &str) -> Self {
        Self::with_args("hasResponse", [item_key, response_key])
    }

    /// `responseHasKeysAny(item, path, keys...)`
    pub fn response_has_keys_any<'a, I>(item_key: &str, path: &str, keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut data: Vec<ExpressionArg> = vec![item_key.into(), path.into()];
        data.extend(keys.into_iter().map(ExpressionArg::from));
        Self {
            name: "responseHasKeysAny".into(),
            return_type: None,
            data,
        }
    }

    /// Timestamp `offset_seconds` away from `reference`, or from "now" when
    /// no reference is given.
    pub fn timestamp_with_offset(offset_seconds: i64, reference: Option<ExpressionArg>) -> Self {
        let mut data = vec![ExpressionArg::from(offset_seconds)];
        data.extend(reference);
        Self {
            name: "timestampWithOffset".into(),
            return_type: None,
            data,
        }
    }
}

impl ExpressionArg {
    pub fn num(value: impl Into<f64>) -> Self {
        ExpressionArg::Num { num: value.into() }
    }

    pub fn str(value: impl Into<String>) -> Self {
        ExpressionArg::Str { str: value.into() }
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            ExpressionArg::Exp { exp } => Some(exp),
            _ => None,
        }
    }
}

impl From<f64> for ExpressionArg {
    fn from(value: f64) -> Self {
        ExpressionArg::Num { num: value }
    }
}

impl From<i64> for ExpressionArg {
    fn from(value: i64) -> Self {
        ExpressionArg::Num { num: value as f64 }
    }
}

impl From<&str> for ExpressionArg {
    fn from(value: &str) -> Self {
        ExpressionArg::Str { str: value.into() }
    }
}

impl From<String> for ExpressionArg {
    fn from(value: String) -> Self {
        ExpressionArg::Str { str: value }
    }
}

impl From<Expression> for ExpressionArg {
    fn from(exp: Expression) -> Self {
        ExpressionArg::Exp { exp }
    }
}
