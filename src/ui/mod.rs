pub mod actions;
pub mod app;
pub mod dialogs;
pub mod grid;
