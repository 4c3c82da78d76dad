pub mod choice;
pub mod eq5d;
pub mod likert;
pub mod matrix;

pub use choice::{
    GroupSettings, OptionDef, OptionRole, ResponseGroupKind, init_dropdown_group,
    init_multiple_choice_group, init_response_group, init_single_choice_group,
    init_slider_categorical_group,
};
pub use eq5d::{Eq5dHealthIndicator, init_eq5d_health_indicator};
pub use likert::{
    LikertOption, LikertRow, OptionDisabled, ScaleOption, init_likert_scale_group,
    init_likert_scale_item,
};
pub use matrix::{
    CellDef, DropDownCell, MatrixRow, MatrixRowDef, RadioCell, RadioCellRole, ResponseCell,
    init_matrix_question,
};
