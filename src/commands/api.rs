//! Public API for app slash commands
//!
//! External modules should import from here rather than directly from the
//! internal modules.
//!
//! # Examples
//! ```no_run
//! # use std::sync::Arc;
//! # use appcmd::commands::api::{AppCommandParser, ParserContext, ParserServices, Workspace};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workspace = Workspace::load(std::path::Path::new("workspace.json"))?;
//! let services = ParserServices::from_workspace(Arc::new(workspace));
//! let parser = AppCommandParser::new(services, ParserContext::new("town-square", "t1"));
//!
//! for suggestion in parser.get_suggestions("/jira cr").await {
//!     println!("{}", suggestion.complete);
//! }
//! let call = parser
//!     .compose_call_from_command("/jira create MYPROJ --silent")
//!     .await
//!     .into_result()?;
//! println!("{}", call.path);
//! # Ok(())
//! # }
//! ```

// Parser entry points and wiring
pub use crate::commands::context::{app_context, ParserContext, ParserServices};
pub use crate::commands::parser::{parser_error_message, AppCommandParser, ComposeResult};
pub use crate::commands::suggestions::EXECUTE_KEY;

// Tokenizer
pub use crate::commands::parsed_command::{ParseMode, ParseState, ParsedCommand, EM_DASH};

// Resolution and expansion
pub use crate::commands::expander::{
    add_default_and_read_only_values, expand_options, missing_fields,
    DEFAULT_MAX_CONCURRENT_EXPANSIONS,
};
pub use crate::commands::form_cache::{form_cache_key, CacheNamespace, FormCache};
pub use crate::commands::resolver::FormResolver;

// Errors
pub use crate::commands::error::{
    CallError, CallResult, CommandError, CommandResult, DirectoryError, DirectoryResult,
    ParseError,
};

// Collaborators and their implementations
pub use crate::commands::fixture::{Workspace, WorkspaceData};
pub use crate::commands::http::{HttpCallDispatcher, USER_AGENT};
pub use crate::commands::traits::{
    channel_by_id, channel_by_name, user_by_id, user_by_username, BindingSource, CallDispatcher,
    ChannelDirectory, MessageFormatter, UserDirectory,
};

// Messages
pub use crate::commands::intl::{
    interpolate, messages, CatalogFormatter, DefaultFormatter, MessageDescriptor,
};

// Domain types
pub use crate::commands::types::{
    AppBinding, AppCall, AppContext, AppField, AppForm, AutocompleteSuggestion, CallRequest,
    CallResponse, CallResponseType, CallType, CallValue, CallValues, Channel, FieldDefault,
    FieldType, LookupData, LookupItem, SelectOption, SuggestionItem, SuggestionKind, UserProfile,
    COMMAND_SUGGESTION_ERROR, EXECUTE_CURRENT_COMMAND_ITEM_ID, REST_POSITION,
};
