pub mod api;
pub mod config;
pub mod errors;
pub mod logging;
pub mod model;
pub mod router;
pub mod shell;
pub mod ui;
pub mod views;
