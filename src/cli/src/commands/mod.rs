//! Subcommand implementations.

pub mod check;
pub mod config;
pub mod inspect;
pub mod manage;
pub mod nav;
pub mod roles;
pub mod sections;
