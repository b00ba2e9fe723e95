//! Common test utilities
//!
//! Loads the shared workspace fixture and builds parsers and settings
//! around it.

#![allow(dead_code)]

use appcmd::app::cli::config::Settings;
use appcmd::commands::api::{AppCommandParser, ParserContext, ParserServices, Workspace};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

pub const CHANNEL_ID: &str = "c1";
pub const TEAM_ID: &str = "t1";

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("workspace.json")
}

pub fn load_workspace() -> Arc<Workspace> {
    Arc::new(Workspace::load(&fixture_path()).expect("workspace fixture loads"))
}

pub fn parser_for(workspace: &Arc<Workspace>, context: ParserContext) -> AppCommandParser {
    AppCommandParser::new(ParserServices::from_workspace(workspace.clone()), context)
}

pub fn channel_parser(workspace: &Arc<Workspace>) -> AppCommandParser {
    parser_for(workspace, ParserContext::new(CHANNEL_ID, TEAM_ID))
}

/// Settings pointing at the fixture, as a config file would set them
pub fn fixture_settings() -> Settings {
    let mut settings = Settings::default();
    settings.workspace.fixture = Some(fixture_path());
    settings.workspace.channel_id = CHANNEL_ID.to_string();
    settings.workspace.team_id = TEAM_ID.to_string();
    settings
}

/// Write `contents` to a temporary file with the given suffix
pub fn temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("temp file write");
    file
}
