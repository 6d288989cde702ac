pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod explorer;
pub mod logging;
pub mod terminal;

pub use term_input as input;
