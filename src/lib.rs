pub mod entry;
pub mod gate;
pub mod model;
pub mod remote;
pub mod session;
pub mod store;
pub mod tui;

mod tui_shell;
