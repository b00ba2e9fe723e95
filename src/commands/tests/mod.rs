//! Test modules for the app command parser
//!
//! Every suite shares the `/jira` workspace built in `helpers`. Tests are
//! organised by operation: tokenizing, composing calls, form resolution and
//! autocomplete.

mod helpers;

mod parsed_command;
mod suggestions;
