//! In-memory workspace
//!
//! A `Workspace` is described by a JSON file and implements every
//! collaborator trait the parser consumes: binding pools for the composer
//! and for threads, users and channels (with a subset marked as locally
//! cached), forms and lookup items keyed by call path, and canned responses.
//! Every dispatched call is recorded so callers can inspect what was sent.
//!
//! ```json
//! {
//!   "bindings": [{"label": "jira", "bindings": [...]}],
//!   "users": [{"id": "u1", "username": "alice"}],
//!   "cached_users": ["u1"],
//!   "forms": {"/jira/create": {"fields": [...]}},
//!   "lookups": {"/jira/create": [{"label": "Bug", "value": "bug"}]},
//!   "responses": {"submit:/jira/create": {"type": "ok", "text": "Created"}}
//! }
//! ```

use crate::commands::error::{
    CallError, CallResult, CommandError, CommandResult, DirectoryError, DirectoryResult,
};
use crate::commands::traits::{BindingSource, CallDispatcher, ChannelDirectory, UserDirectory};
use crate::commands::types::{
    AppBinding, AppForm, CallRequest, CallResponse, CallType, Channel, LookupItem, UserProfile,
};
use crate::core::strings::{eq_ignore_case, starts_with_ignore_case};
use crate::core::sync::{handle_rwlock_read, handle_rwlock_write};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceData {
    #[serde(default)]
    pub bindings: Vec<AppBinding>,
    /// Thread pool; the composer pool is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_bindings: Option<Vec<AppBinding>>,
    #[serde(default)]
    pub users: Vec<UserProfile>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    /// Ids answered by `local_*` lookups
    #[serde(default)]
    pub cached_users: Vec<String>,
    #[serde(default)]
    pub cached_channels: Vec<String>,
    /// Form returned by `form` calls, by call path
    #[serde(default)]
    pub forms: HashMap<String, AppForm>,
    /// Items returned by `lookup` calls, by call path
    #[serde(default)]
    pub lookups: HashMap<String, Vec<LookupItem>>,
    /// Overrides keyed `"{call_type}:{path}"`, checked before anything else
    #[serde(default)]
    pub responses: HashMap<String, CallResponse>,
}

#[derive(Debug, Default)]
pub struct Workspace {
    data: WorkspaceData,
    calls: RwLock<Vec<(CallType, CallRequest)>>,
}

impl Workspace {
    pub fn new(data: WorkspaceData) -> Self {
        Self {
            data,
            calls: RwLock::new(Vec::new()),
        }
    }

    pub fn load(path: &Path) -> CommandResult<Self> {
        let fixture_error = |cause: String| CommandError::Fixture {
            path: path.display().to_string(),
            cause,
        };
        let contents = std::fs::read_to_string(path).map_err(|e| fixture_error(e.to_string()))?;
        let data: WorkspaceData =
            serde_json::from_str(&contents).map_err(|e| fixture_error(e.to_string()))?;
        log::debug!(
            "Loaded workspace '{}': {} bindings, {} users, {} channels, {} forms",
            path.display(),
            data.bindings.len(),
            data.users.len(),
            data.channels.len(),
            data.forms.len()
        );
        Ok(Self::new(data))
    }

    pub fn data(&self) -> &WorkspaceData {
        &self.data
    }

    /// Calls dispatched so far, oldest first
    pub fn calls(&self) -> Vec<(CallType, CallRequest)> {
        handle_rwlock_read(self.calls.read(), |message| message)
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self, call_type: CallType) -> usize {
        self.calls()
            .iter()
            .filter(|(kind, _)| *kind == call_type)
            .count()
    }

    fn user(&self, matches: impl Fn(&UserProfile) -> bool, local: bool) -> Option<UserProfile> {
        self.data
            .users
            .iter()
            .filter(|user| !local || self.data.cached_users.contains(&user.id))
            .find(|user| matches(user))
            .cloned()
    }

    fn channel(&self, matches: impl Fn(&Channel) -> bool, local: bool) -> Option<Channel> {
        self.data
            .channels
            .iter()
            .filter(|channel| !local || self.data.cached_channels.contains(&channel.id))
            .find(|channel| matches(channel))
            .cloned()
    }

    fn in_team(channel: &Channel, team_id: &str) -> bool {
        channel
            .team_id
            .as_deref()
            .map(|team| team.is_empty() || team == team_id)
            .unwrap_or(true)
    }
}

impl BindingSource for Workspace {
    fn command_bindings(&self, in_thread: bool) -> Vec<AppBinding> {
        match (&self.data.thread_bindings, in_thread) {
            (Some(thread), true) => thread.clone(),
            _ => self.data.bindings.clone(),
        }
    }
}

#[async_trait::async_trait]
impl CallDispatcher for Workspace {
    async fn perform_call(&self, request: &CallRequest, call_type: CallType) -> CallResult<CallResponse> {
        {
            let mut calls = handle_rwlock_write(self.calls.write(), |message| CallError::new(message))?;
            calls.push((call_type, request.clone()));
        }
        log::debug!("Fixture {} call to {}", call_type, request.path);

        let key = format!("{}:{}", call_type, request.path);
        if let Some(response) = self.data.responses.get(&key) {
            return Ok(response.clone());
        }

        match call_type {
            CallType::Form => self
                .data
                .forms
                .get(&request.path)
                .cloned()
                .map(CallResponse::with_form)
                .ok_or_else(|| CallError::new(format!("No form for {}", request.path))),
            CallType::Lookup => {
                let query = request.query.as_deref().unwrap_or_default();
                let items: Vec<LookupItem> = self
                    .data
                    .lookups
                    .get(&request.path)
                    .map(|items| {
                        items
                            .iter()
                            .filter(|item| {
                                starts_with_ignore_case(&item.label, query)
                                    || starts_with_ignore_case(&item.value, query)
                            })
                            .cloned()
                            .collect()
                    })
                    .unwrap_or_default();
                Ok(CallResponse::lookup(items))
            }
            CallType::Submit => Ok(CallResponse::ok(format!("Submitted {}", request.path))),
        }
    }
}

#[async_trait::async_trait]
impl UserDirectory for Workspace {
    async fn local_by_id(&self, user_id: &str) -> Option<UserProfile> {
        self.user(|user| user.id == user_id, true)
    }

    async fn local_by_username(&self, username: &str) -> Option<UserProfile> {
        self.user(|user| eq_ignore_case(&user.username, username), true)
    }

    async fn fetch_by_id(&self, user_id: &str) -> DirectoryResult<UserProfile> {
        self.user(|user| user.id == user_id, false)
            .ok_or_else(|| DirectoryError::NotFound {
                kind: "user",
                key: user_id.to_string(),
            })
    }

    async fn fetch_by_username(&self, username: &str) -> DirectoryResult<UserProfile> {
        self.user(|user| eq_ignore_case(&user.username, username), false)
            .ok_or_else(|| DirectoryError::NotFound {
                kind: "user",
                key: username.to_string(),
            })
    }

    async fn autocomplete(
        &self,
        term: &str,
        _team_id: &str,
        _channel_id: &str,
    ) -> DirectoryResult<Vec<UserProfile>> {
        Ok(self
            .data
            .users
            .iter()
            .filter(|user| starts_with_ignore_case(&user.username, term))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl ChannelDirectory for Workspace {
    async fn local_by_id(&self, channel_id: &str) -> Option<Channel> {
        self.channel(|channel| channel.id == channel_id, true)
    }

    async fn local_by_name(&self, team_id: &str, name: &str) -> Option<Channel> {
        self.channel(
            |channel| channel.name == name && Self::in_team(channel, team_id),
            true,
        )
    }

    async fn fetch_by_id(&self, channel_id: &str) -> DirectoryResult<Channel> {
        self.channel(|channel| channel.id == channel_id, false)
            .ok_or_else(|| DirectoryError::NotFound {
                kind: "channel",
                key: channel_id.to_string(),
            })
    }

    async fn fetch_by_name(&self, team_id: &str, name: &str) -> DirectoryResult<Channel> {
        self.channel(
            |channel| channel.name == name && Self::in_team(channel, team_id),
            false,
        )
        .ok_or_else(|| DirectoryError::NotFound {
            kind: "channel",
            key: name.to_string(),
        })
    }

    async fn autocomplete(&self, team_id: &str, term: &str) -> DirectoryResult<Vec<Channel>> {
        Ok(self
            .data
            .channels
            .iter()
            .filter(|channel| {
                Self::in_team(channel, team_id)
                    && (starts_with_ignore_case(&channel.name, term)
                        || starts_with_ignore_case(&channel.display_name, term))
            })
            .cloned()
            .collect())
    }
}
