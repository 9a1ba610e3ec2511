pub mod console;
pub mod tui;

pub use console::ConsoleView;
pub use tui::{TuiEvent, TuiSignal, TuiView};
