pub mod keyboard;
pub mod panels;
pub mod pointer;

pub use keyboard::wire_keyboard;
pub use panels::wire_panel_controls;
pub use pointer::{wire_pointer_handlers, PointerWiring};
