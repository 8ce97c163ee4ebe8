//! CLI Commands
//!
//! One module per subcommand. Commands build what they need from the loaded
//! configuration and print with `console` styling; exit codes are decided in
//! `main` from the returned `Result`.

pub mod ask;
pub mod chat;
pub mod check;
pub mod config;
pub mod docs;
pub mod doctor;
