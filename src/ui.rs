//! Ratatui front end for the loan table. The view owns no data of its own: it
//! renders whatever order the table currently holds, drives sorts from the
//! number keys, and shows the overdue alert composed by the core.

mod app;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
