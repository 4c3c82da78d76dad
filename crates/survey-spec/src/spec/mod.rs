pub mod component;
pub mod item;

pub use component::{
    Component, ComponentBase, ComponentProperties, DataType, ItemComponent, ItemGroupComponent,
    Role, StyleEntry,
};
pub use item::{SurveyItem, Validation, ValidationKind};
