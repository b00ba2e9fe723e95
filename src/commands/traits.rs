//! Collaborator Traits
//!
//! The parser never talks to a database, a server or a translation bundle
//! directly. It consumes these narrow capabilities instead:
//!
//! - **BindingSource**: the root command tree for the composer or a thread
//! - **CallDispatcher**: form, lookup and submit calls to an app
//! - **UserDirectory** / **ChannelDirectory**: local cache first, remote second
//! - **MessageFormatter**: locale-aware rendering of every user-facing string

use crate::commands::error::{CallResult, DirectoryResult};
use crate::commands::intl::MessageDescriptor;
use crate::commands::types::{AppBinding, CallRequest, CallResponse, CallType, Channel, UserProfile};

/// Supplies the root-level command bindings
pub trait BindingSource: Send + Sync {
    /// Bindings for the thread-reply pool when `in_thread`, else the composer pool
    fn command_bindings(&self, in_thread: bool) -> Vec<AppBinding>;
}

/// Issues calls to app integrations
#[async_trait::async_trait]
pub trait CallDispatcher: Send + Sync {
    async fn perform_call(&self, request: &CallRequest, call_type: CallType)
        -> CallResult<CallResponse>;
}

/// User lookups
///
/// `local_*` methods consult the on-device cache and never hit the network;
/// `fetch_*` and `autocomplete` may.
#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync {
    async fn local_by_id(&self, user_id: &str) -> Option<UserProfile>;

    async fn local_by_username(&self, username: &str) -> Option<UserProfile>;

    async fn fetch_by_id(&self, user_id: &str) -> DirectoryResult<UserProfile>;

    async fn fetch_by_username(&self, username: &str) -> DirectoryResult<UserProfile>;

    /// Users matching `term`, channel members first
    async fn autocomplete(
        &self,
        term: &str,
        team_id: &str,
        channel_id: &str,
    ) -> DirectoryResult<Vec<UserProfile>>;
}

/// Channel lookups, symmetric to [`UserDirectory`]
#[async_trait::async_trait]
pub trait ChannelDirectory: Send + Sync {
    async fn local_by_id(&self, channel_id: &str) -> Option<Channel>;

    async fn local_by_name(&self, team_id: &str, name: &str) -> Option<Channel>;

    async fn fetch_by_id(&self, channel_id: &str) -> DirectoryResult<Channel>;

    async fn fetch_by_name(&self, team_id: &str, name: &str) -> DirectoryResult<Channel>;

    async fn autocomplete(&self, team_id: &str, term: &str) -> DirectoryResult<Vec<Channel>>;
}

/// Renders a message descriptor with named values
pub trait MessageFormatter: Send + Sync {
    fn format(&self, descriptor: &MessageDescriptor, values: &[(&str, &str)]) -> String;
}

/// Resolve a user by id: local cache, then remote
pub async fn user_by_id(users: &dyn UserDirectory, user_id: &str) -> DirectoryResult<UserProfile> {
    match users.local_by_id(user_id).await {
        Some(user) => Ok(user),
        None => users.fetch_by_id(user_id).await,
    }
}

/// Resolve a user by username: local cache, then remote
pub async fn user_by_username(
    users: &dyn UserDirectory,
    username: &str,
) -> DirectoryResult<UserProfile> {
    match users.local_by_username(username).await {
        Some(user) => Ok(user),
        None => users.fetch_by_username(username).await,
    }
}

/// Resolve a channel by id: local cache, then remote
pub async fn channel_by_id(
    channels: &dyn ChannelDirectory,
    channel_id: &str,
) -> DirectoryResult<Channel> {
    match channels.local_by_id(channel_id).await {
        Some(channel) => Ok(channel),
        None => channels.fetch_by_id(channel_id).await,
    }
}

/// Resolve a channel by name within a team: local cache, then remote
pub async fn channel_by_name(
    channels: &dyn ChannelDirectory,
    team_id: &str,
    name: &str,
) -> DirectoryResult<Channel> {
    match channels.local_by_name(team_id, name).await {
        Some(channel) => Ok(channel),
        None => channels.fetch_by_name(team_id, name).await,
    }
}
