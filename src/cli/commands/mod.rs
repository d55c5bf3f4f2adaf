//! Command implementations for the Resuma CLI.

mod config;
mod doctor;
mod run;
mod serve;

pub use config::run_config;
pub use doctor::run_doctor;
pub use run::run_process;
pub use serve::run_serve;
