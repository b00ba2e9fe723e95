//! Form resolution for leaf bindings
//!
//! Leaf bindings usually arrive without their field schema. The first time a
//! sub-command is used in a given channel/thread its form is fetched from the
//! app with a `form` call and kept in the [`FormCache`](crate::commands::form_cache::FormCache).

use crate::commands::context::{app_context, ParserContext, ParserServices};
use crate::commands::error::{CommandError, CommandResult};
use crate::commands::form_cache::{form_cache_key, CacheNamespace};
use crate::commands::intl::messages;
use crate::commands::types::{AppBinding, AppForm, CallRequest, CallResponseType, CallType, CallValues};

pub struct FormResolver<'a> {
    services: &'a ParserServices,
    context: &'a ParserContext,
}

impl<'a> FormResolver<'a> {
    pub fn new(services: &'a ParserServices, context: &'a ParserContext) -> Self {
        Self { services, context }
    }

    /// Cached form for `location`, fetching it on a miss
    pub async fn resolve(&self, binding: &AppBinding, location: &str) -> CommandResult<AppForm> {
        let namespace = CacheNamespace::for_root(self.context.root_id.as_deref());
        let key = form_cache_key(
            &self.context.channel_id,
            self.context.root_id.as_deref(),
            location,
        );

        if let Some(form) = self.services.form_cache.get(namespace, &key)? {
            log::debug!("Form cache hit for '{}'", key);
            return Ok(form);
        }

        let form = self.fetch(binding).await?;
        self.services
            .form_cache
            .insert(namespace, key, form.clone())?;
        Ok(form)
    }

    /// Issue a `form` call for `binding`, bypassing the cache
    pub async fn fetch(&self, binding: &AppBinding) -> CommandResult<AppForm> {
        let formatter = self.services.formatter.as_ref();
        let Some(call) = binding.call.as_ref() else {
            return Err(CommandError::from_descriptor(
                formatter,
                &messages::MISSING_CALL,
                &[],
            ));
        };

        let context = app_context(self.services, self.context, binding).await;
        let request = CallRequest::new(call, context, CallValues::new(), None);
        log::debug!("Fetching form for '{}' from {}", binding.label, request.path);

        let response = self
            .services
            .dispatcher
            .perform_call(&request, CallType::Form)
            .await
            .map_err(|e| match e.text {
                Some(text) => CommandError::user(text),
                None => CommandError::from_descriptor(formatter, &messages::UNKNOWN_ERROR, &[]),
            })?;

        match response.kind() {
            Some(CallResponseType::Form) => response.form.ok_or_else(|| {
                CommandError::from_descriptor(formatter, &messages::UNKNOWN_ERROR, &[])
            }),
            Some(CallResponseType::Ok) | Some(CallResponseType::Navigate) => {
                Err(CommandError::from_descriptor(
                    formatter,
                    &messages::RESPONSE_UNEXPECTED_TYPE,
                    &[("type", response.response_type.as_str())],
                ))
            }
            None => Err(CommandError::from_descriptor(
                formatter,
                &messages::RESPONSE_UNKNOWN_TYPE,
                &[("type", response.response_type.as_str())],
            )),
        }
    }
}
