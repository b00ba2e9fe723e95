//! App slash commands
//!
//! Parsing, autocomplete and call composition for commands contributed by
//! app integrations. Everything outside this module goes through [`api`].

// Internal modules - all access should go through api module
pub(crate) mod context;
pub(crate) mod error;
pub(crate) mod expander;
pub(crate) mod fixture;
pub(crate) mod form_cache;
pub(crate) mod http;
pub(crate) mod intl;
pub(crate) mod parsed_command;
pub(crate) mod parser;
pub(crate) mod resolver;
pub(crate) mod suggestions;
pub(crate) mod traits;
pub(crate) mod types;

// Public API module
pub mod api;

#[cfg(test)]
mod tests;
