//! CLI argument parsing tests

use appcmd::app::cli::args::*;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_command_text_keeps_flags() {
    let args = Args::parse_from([
        "appcmd",
        "compose",
        "/jira",
        "create",
        "KEY",
        "--silent",
    ]);
    assert_eq!(args.command.name(), "compose");
    assert_eq!(args.command.text(), "/jira create KEY --silent");
}

#[test]
fn test_single_quoted_argument() {
    let args = Args::parse_from(["appcmd", "suggest", "/jira create KEY --s"]);
    assert_eq!(
        args.command,
        Command::Suggest {
            text: vec!["/jira create KEY --s".to_string()]
        }
    );
}

#[test]
fn test_global_options_before_command() {
    let args = Args::parse_from([
        "appcmd",
        "-w",
        "workspace.json",
        "--channel",
        "c9",
        "--team",
        "t9",
        "--root",
        "p1",
        "--log-level",
        "debug",
        "-o",
        "json",
        "--max-concurrent-expansions",
        "8",
        "execute",
        "/poll",
        "Lunch?",
    ]);

    assert_eq!(args.workspace, Some(PathBuf::from("workspace.json")));
    assert_eq!(args.channel_id.as_deref(), Some("c9"));
    assert_eq!(args.team_id.as_deref(), Some("t9"));
    assert_eq!(args.root_id.as_deref(), Some("p1"));
    assert_eq!(args.log_level.as_deref(), Some("debug"));
    assert_eq!(args.log_format.as_deref(), Some("json"));
    assert_eq!(args.max_concurrent_expansions, Some(8));
    assert_eq!(args.command.name(), "execute");
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let result = Args::try_parse_from(["appcmd", "--log-level", "loud", "suggest", "/"]);
    assert!(result.is_err());
}

#[test]
fn test_command_text_is_required() {
    assert!(Args::try_parse_from(["appcmd", "compose"]).is_err());
    assert!(Args::try_parse_from(["appcmd"]).is_err());
}
