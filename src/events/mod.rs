pub mod keyboard;
pub mod nav;
pub mod pointer;

pub use keyboard::wire_keyboard;
pub use nav::wire_navigation;
pub use pointer::{wire_pointer_handlers, PointerWiring};
