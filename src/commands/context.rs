//! Parser wiring
//!
//! [`ParserServices`] bundles the collaborators a parser needs;
//! [`ParserContext`] is where the user is typing (channel, team, thread).

use crate::commands::form_cache::FormCache;
use crate::commands::intl::DefaultFormatter;
use crate::commands::traits::{
    BindingSource, CallDispatcher, ChannelDirectory, MessageFormatter, UserDirectory,
};
use crate::commands::types::{AppBinding, AppContext};
use std::sync::Arc;

#[derive(Clone)]
pub struct ParserServices {
    pub bindings: Arc<dyn BindingSource>,
    pub dispatcher: Arc<dyn CallDispatcher>,
    pub users: Arc<dyn UserDirectory>,
    pub channels: Arc<dyn ChannelDirectory>,
    pub formatter: Arc<dyn MessageFormatter>,
    pub form_cache: Arc<FormCache>,
}

impl ParserServices {
    /// Every collaborator served by one object, English messages and a fresh cache
    pub fn from_workspace<W>(workspace: Arc<W>) -> Self
    where
        W: BindingSource + CallDispatcher + UserDirectory + ChannelDirectory + 'static,
    {
        Self {
            bindings: workspace.clone(),
            dispatcher: workspace.clone(),
            users: workspace.clone(),
            channels: workspace,
            formatter: Arc::new(DefaultFormatter),
            form_cache: Arc::new(FormCache::new()),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: Arc<dyn CallDispatcher>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_formatter(mut self, formatter: Arc<dyn MessageFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Share a cache between parsers
    pub fn with_form_cache(mut self, form_cache: Arc<FormCache>) -> Self {
        self.form_cache = form_cache;
        self
    }
}

impl std::fmt::Debug for ParserServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserServices")
            .field("form_cache", &self.form_cache)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParserContext {
    pub channel_id: String,
    pub team_id: String,
    /// Set when typing a thread reply
    pub root_id: Option<String>,
}

impl ParserContext {
    pub fn new(channel_id: impl Into<String>, team_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            team_id: team_id.into(),
            root_id: None,
        }
    }

    pub fn with_root(mut self, root_id: impl Into<String>) -> Self {
        let root_id = root_id.into();
        self.root_id = (!root_id.is_empty()).then_some(root_id);
        self
    }

    pub fn in_thread(&self) -> bool {
        self.root_id.is_some()
    }
}

/// Context sent with calls made on behalf of `binding`
///
/// The team comes from the channel when it is known locally, else from the
/// parser's current team.
pub async fn app_context(
    services: &ParserServices,
    context: &ParserContext,
    binding: &AppBinding,
) -> AppContext {
    let channel_team = services
        .channels
        .local_by_id(&context.channel_id)
        .await
        .and_then(|channel| channel.team_id)
        .filter(|team_id| !team_id.is_empty());

    AppContext {
        app_id: binding.app_id.clone(),
        location: binding.location.clone(),
        root_id: context.root_id.clone(),
        channel_id: Some(context.channel_id.clone()),
        team_id: Some(channel_team.unwrap_or_else(|| context.team_id.clone())),
        user_agent: None,
    }
}
