pub mod break_editor;
pub mod break_grid;
pub mod button;
pub mod input;

pub use break_editor::*;
pub use break_grid::*;
pub use button::*;
pub use input::text_input as input_field;
