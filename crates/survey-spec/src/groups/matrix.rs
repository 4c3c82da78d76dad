use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::builder::{ComponentAttrs, GroupBuilder, LeafBuilder, PropertiesInput};
use crate::error::BuildError;
use crate::expr::Expression;
use crate::groups::choice::{GroupSettings, OptionDef, ResponseGroupKind, init_response_group};
use crate::locale::LocaleMap;
use crate::spec::component::{Component, ItemGroupComponent, Role};

/// Shared cell attributes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CellDef {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<LocaleMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocaleMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_condition: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertiesInput>,
}

impl CellDef {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_content(key: impl Into<String>, content: LocaleMap) -> Self {
        Self {
            content: Some(content),
            ..Self::new(key)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum RadioCellRole {
    Label,
    Option,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RadioCell {
    pub role: RadioCellRole,
    #[serde(flatten)]
    pub cell: CellDef,
}

/// Dropdown nested inside a response row cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DropDownCell {
    #[serde(flatten)]
    pub cell: CellDef,
    pub items: Vec<OptionDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "role", rename_all = "camelCase")]
pub enum ResponseCell {
    Label(CellDef),
    Check(CellDef),
    Input(CellDef),
    NumberInput(CellDef),
    DropDownGroup(DropDownCell),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRowDef<C> {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_condition: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<Expression>,
    pub cells: Vec<C>,
}

impl<C> MatrixRowDef<C> {
    pub fn new(key: impl Into<String>, cells: Vec<C>) -> Self {
        Self {
            key: key.into(),
            display_condition: None,
            disabled: None,
            cells,
        }
    }
}

/// Matrix row. Header rows hold text cells only, radio rows share one
/// single-choice answer across their option cells, response rows mix
/// input cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "role", rename_all = "camelCase")]
pub enum MatrixRow {
    HeaderRow(MatrixRowDef<CellDef>),
    RadioRow(MatrixRowDef<RadioCell>),
    ResponseRow(MatrixRowDef<ResponseCell>),
}

impl MatrixRow {
    pub fn key(&self) -> &str {
        match self {
            MatrixRow::HeaderRow(row) => &row.key,
            MatrixRow::RadioRow(row) => &row.key,
            MatrixRow::ResponseRow(row) => &row.key,
        }
    }
}

pub fn init_matrix_question(
    key: &str,
    rows: &[MatrixRow],
    order: Option<Expression>,
) -> Result<ItemGroupComponent, BuildError> {
    if rows.is_empty() {
        return Err(BuildError::empty("matrix rows"));
    }

    let mut group = GroupBuilder::new(Role::Matrix).key(key).order(order);
    for row in rows {
        group = group.child(build_row(row)?);
    }
    let group = group.build()?;
    tracing::trace!(key, rows = group.items.len(), "assembled matrix");
    Ok(group)
}

fn build_row(row: &MatrixRow) -> Result<ItemGroupComponent, BuildError> {
    let cells: Vec<Component> = match row {
        MatrixRow::HeaderRow(def) => def
            .cells
            .iter()
            .map(|cell| leaf_cell(Role::Text, cell))
            .collect::<Result<_, _>>()?,
        MatrixRow::RadioRow(def) => def
            .cells
            .iter()
            .map(|cell| {
                let role = match cell.role {
                    RadioCellRole::Label => Role::Label,
                    RadioCellRole::Option => Role::Option,
                };
                leaf_cell(role, &cell.cell)
            })
            .collect::<Result<_, _>>()?,
        MatrixRow::ResponseRow(def) => def
            .cells
            .iter()
            .map(response_cell)
            .collect::<Result<_, _>>()?,
    };
    if cells.is_empty() {
        return Err(BuildError::empty("matrix row cells"));
    }

    let (role, display_condition, disabled) = match row {
        MatrixRow::HeaderRow(def) => (Role::HeaderRow, &def.display_condition, &def.disabled),
        MatrixRow::RadioRow(def) => (Role::RadioRow, &def.display_condition, &def.disabled),
        MatrixRow::ResponseRow(def) => (Role::ResponseRow, &def.display_condition, &def.disabled),
    };

    GroupBuilder::new(role)
        .key(row.key())
        .display_condition(display_condition.clone())
        .disabled(disabled.clone())
        .children(cells)
        .build()
}

fn leaf_cell(role: Role, cell: &CellDef) -> Result<Component, BuildError> {
    LeafBuilder::new(role)
        .key(cell.key.as_str())
        .content(cell.content.as_ref())
        .description(cell.description.as_ref())
        .display_condition(cell.display_condition.clone())
        .disabled(cell.disabled.clone())
        .properties(cell.properties.clone())
        .build()
        .map(Component::Item)
}

fn response_cell(cell: &ResponseCell) -> Result<Component, BuildError> {
    match cell {
        ResponseCell::Label(def) => leaf_cell(Role::Label, def),
        ResponseCell::Check(def) => leaf_cell(Role::Check, def),
        ResponseCell::Input(def) => leaf_cell(Role::Input, def),
        ResponseCell::NumberInput(def) => leaf_cell(Role::NumberInput, def),
        ResponseCell::DropDownGroup(dropdown) => {
            let def = &dropdown.cell;
            let mut group = init_response_group(
                ResponseGroupKind::DropDown,
                &def.key,
                &dropdown.items,
                GroupSettings {
                    order: None,
                    disabled: def.disabled.clone(),
                    content: def.content.clone(),
                    description: def.description.clone(),
                    properties: def.properties.clone(),
                },
            )?;
            group.base.display_condition = def.display_condition.clone();
            Ok(Component::Group(group))
        }
    }
}
