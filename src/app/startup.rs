//! Application startup
//!
//! Argument parsing, configuration, logger initialisation and collaborator
//! wiring, then dispatch to the requested sub-command.

use crate::app::cli::args::{Args, Command};
use crate::app::cli::config::Settings;
use crate::app::cli::display::{format_call, format_response, print_suggestions};
use crate::commands::api::{
    AppCommandParser, CatalogFormatter, CommandError, CommandResult, HttpCallDispatcher,
    ParserContext, ParserServices, Workspace,
};
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;

pub async fn startup() -> ExitCode {
    let args = Args::parse();

    let mut settings = match Settings::load(args.config_file.as_deref()).await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    settings.apply_args(&args);

    // The logger itself depends on validated settings
    if let Err(e) = settings.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = init_logging(&settings.logging_options()) {
        eprintln!("Error initialising logging: {}", e);
        return ExitCode::FAILURE;
    }
    if !settings.logging.color {
        colored::control::set_override(false);
    }

    log::debug!("appcmd {} starting: {}", env!("CARGO_PKG_VERSION"), args.command.name());

    match run(&settings, &args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error_with_context(&e, &format!("Running '{}'", args.command.name()));
            ExitCode::FAILURE
        }
    }
}

/// Build a parser from settings: fixture collaborators, optional HTTP
/// dispatcher and optional message catalogue
pub fn build_parser(settings: &Settings) -> CommandResult<AppCommandParser> {
    let workspace = match settings.workspace.fixture.as_deref() {
        Some(path) => Workspace::load(path)?,
        None => {
            log::warn!("No workspace fixture configured; no commands are available");
            Workspace::default()
        }
    };
    let mut services = ParserServices::from_workspace(Arc::new(workspace));

    if let Some(url) = settings.server.url.as_deref() {
        let dispatcher = HttpCallDispatcher::new(url, settings.server.token.clone())
            .map_err(|e| CommandError::user(e.to_string()))?;
        log::debug!("Dispatching calls to {}", dispatcher.call_url());
        services = services.with_dispatcher(Arc::new(dispatcher));
    }

    if let Some(catalog) = settings.parser.catalog.as_deref() {
        let formatter = CatalogFormatter::from_file(catalog)?;
        log::debug!("Using '{}' message catalogue", formatter.locale());
        services = services.with_formatter(Arc::new(formatter));
    }

    let context = ParserContext::new(
        settings.workspace.channel_id.clone(),
        settings.workspace.team_id.clone(),
    )
    .with_root(settings.workspace.root_id.clone().unwrap_or_default());

    Ok(AppCommandParser::new(services, context)
        .with_max_concurrent_expansions(settings.parser.max_concurrent_expansions))
}

async fn run(settings: &Settings, command: &Command) -> CommandResult<()> {
    let parser = build_parser(settings)?;
    let text = command.text();

    match command {
        Command::Suggest { .. } => {
            let suggestions = parser.get_suggestions(&text).await;
            print_suggestions(&suggestions, settings.logging.color);
        }
        Command::Compose { .. } => {
            let call = parser.compose_call_from_command(&text).await.into_result()?;
            println!("{}", format_call(&call).map_err(CommandError::user)?);
        }
        Command::Execute { .. } => {
            let response = parser.execute(&text).await?;
            println!("{}", format_response(&response));
        }
    }
    Ok(())
}
