//! Form Cache
//!
//! Forms fetched for leaf bindings are cached per request context so the
//! same sub-command in the same channel/thread does not hit the network
//! twice. The cache is an explicit object: whoever builds the parser decides
//! its lifetime by sharing (or not sharing) the `Arc`.
//!
//! There is no eviction and no expiry. Writes are idempotent; the last
//! writer wins.

use crate::commands::error::{CommandError, CommandResult};
use crate::commands::types::AppForm;
use crate::core::sync::{handle_rwlock_read, handle_rwlock_write};
use std::collections::HashMap;
use std::sync::RwLock;

/// Origin of the request, each with its own key space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    /// Main message composer
    Composer,
    /// Thread reply composer
    Thread,
}

impl CacheNamespace {
    pub fn for_root(root_id: Option<&str>) -> Self {
        match root_id {
            Some(root) if !root.is_empty() => CacheNamespace::Thread,
            _ => CacheNamespace::Composer,
        }
    }
}

/// `channelId-rootId-location`
pub fn form_cache_key(channel_id: &str, root_id: Option<&str>, location: &str) -> String {
    format!("{}-{}-{}", channel_id, root_id.unwrap_or_default(), location)
}

#[derive(Debug, Default)]
pub struct FormCache {
    composer: RwLock<HashMap<String, AppForm>>,
    thread: RwLock<HashMap<String, AppForm>>,
}

impl FormCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn namespace(&self, namespace: CacheNamespace) -> &RwLock<HashMap<String, AppForm>> {
        match namespace {
            CacheNamespace::Composer => &self.composer,
            CacheNamespace::Thread => &self.thread,
        }
    }

    pub fn get(&self, namespace: CacheNamespace, key: &str) -> CommandResult<Option<AppForm>> {
        let forms = handle_rwlock_read(self.namespace(namespace).read(), |message| {
            CommandError::Cache { message }
        })?;
        Ok(forms.get(key).cloned())
    }

    pub fn insert(&self, namespace: CacheNamespace, key: String, form: AppForm) -> CommandResult<()> {
        let mut forms = handle_rwlock_write(self.namespace(namespace).write(), |message| {
            CommandError::Cache { message }
        })?;
        forms.insert(key, form);
        Ok(())
    }

    pub fn len(&self, namespace: CacheNamespace) -> usize {
        handle_rwlock_read(self.namespace(namespace).read(), |message| message)
            .map(|forms| forms.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len(CacheNamespace::Composer) == 0 && self.len(CacheNamespace::Thread) == 0
    }
}
