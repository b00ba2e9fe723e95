//! CLI Integration Test Modules

pub mod argument_parsing;
pub mod display_output;
pub mod parser_wiring;
pub mod toml_config;
