//! Host-side plugin dispatch.
//!
//! `PluginSet` is the surface a host wires into its run loop: one method
//! per extension point. Each method queries the capability predicate and
//! only then awaits the paired handler, so hosts that go through the set
//! cannot violate the predicate-before-handler contract.
//!
//! Transforming hooks fold through the chain in registration order; the
//! short-circuit hooks (on_planning, on_instruction, chat_completion)
//! stop at the first plugin that returns a value.

use std::sync::Arc;
use tracing::{debug, trace};

use crate::plugin::AgentPlugin;
use crate::types::{ChatMessage, CommandInvocation, CompletionRequest, PromptGenerator, ResponseContext};

/// An ordered set of plugins consulted at each lifecycle point.
#[derive(Default, Clone)]
pub struct PluginSet {
    plugins: Vec<Arc<dyn AgentPlugin>>,
}

impl PluginSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plugin. Dispatch order is registration order.
    pub fn register(&mut self, plugin: Arc<dyn AgentPlugin>) {
        debug!(plugin = %plugin.identity().name, "registered plugin");
        self.plugins.push(plugin);
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Iterate registered plugins in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn AgentPlugin>> {
        self.plugins.iter()
    }

    pub async fn on_response(&self, mut response: String, ctx: &ResponseContext) -> String {
        for plugin in &self.plugins {
            if !plugin.can_handle_on_response() {
                trace!(plugin = %plugin.identity().name, "skipping on_response");
                continue;
            }
            debug!(plugin = %plugin.identity().name, "dispatching on_response");
            response = plugin.on_response(response, ctx).await;
        }
        response
    }

    pub async fn post_prompt(&self, mut prompt: PromptGenerator) -> PromptGenerator {
        for plugin in &self.plugins {
            if !plugin.can_handle_post_prompt() {
                continue;
            }
            debug!(plugin = %plugin.identity().name, "dispatching post_prompt");
            prompt = plugin.post_prompt(prompt).await;
        }
        prompt
    }

    /// First `Some` wins; later plugins are not consulted.
    pub async fn on_planning(
        &self,
        prompt: &PromptGenerator,
        messages: &[ChatMessage],
    ) -> Option<String> {
        for plugin in &self.plugins {
            if !plugin.can_handle_on_planning() {
                continue;
            }
            debug!(plugin = %plugin.identity().name, "dispatching on_planning");
            if let Some(injected) = plugin.on_planning(prompt, messages).await {
                return Some(injected);
            }
        }
        None
    }

    pub async fn post_planning(&self, mut response: String) -> String {
        for plugin in &self.plugins {
            if !plugin.can_handle_post_planning() {
                continue;
            }
            debug!(plugin = %plugin.identity().name, "dispatching post_planning");
            response = plugin.post_planning(response).await;
        }
        response
    }

    pub async fn pre_instruction(&self, mut messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
        for plugin in &self.plugins {
            if !plugin.can_handle_pre_instruction() {
                continue;
            }
            debug!(plugin = %plugin.identity().name, "dispatching pre_instruction");
            messages = plugin.pre_instruction(messages).await;
        }
        messages
    }

    /// First `Some` wins; later plugins are not consulted.
    pub async fn on_instruction(&self, messages: &[ChatMessage]) -> Option<String> {
        for plugin in &self.plugins {
            if !plugin.can_handle_on_instruction() {
                continue;
            }
            debug!(plugin = %plugin.identity().name, "dispatching on_instruction");
            if let Some(result) = plugin.on_instruction(messages).await {
                return Some(result);
            }
        }
        None
    }

    pub async fn post_instruction(&self, mut response: String) -> String {
        for plugin in &self.plugins {
            if !plugin.can_handle_post_instruction() {
                continue;
            }
            debug!(plugin = %plugin.identity().name, "dispatching post_instruction");
            response = plugin.post_instruction(response).await;
        }
        response
    }

    pub async fn pre_command(&self, mut invocation: CommandInvocation) -> CommandInvocation {
        for plugin in &self.plugins {
            if !plugin.can_handle_pre_command() {
                continue;
            }
            debug!(
                plugin = %plugin.identity().name,
                command = %invocation.name,
                "dispatching pre_command"
            );
            invocation = plugin.pre_command(invocation).await;
        }
        invocation
    }

    pub async fn post_command(&self, command_name: &str, mut response: String) -> String {
        for plugin in &self.plugins {
            if !plugin.can_handle_post_command() {
                continue;
            }
            debug!(
                plugin = %plugin.identity().name,
                command = command_name,
                "dispatching post_command"
            );
            response = plugin.post_command(command_name, response).await;
        }
        response
    }

    /// First plugin whose predicate accepts the request gets to intercept
    /// the completion; a `None` from its handler falls through to the next
    /// accepting plugin, and finally to the host's own completion path.
    pub async fn chat_completion(&self, request: &CompletionRequest) -> Option<String> {
        for plugin in &self.plugins {
            if !plugin.can_handle_chat_completion(request) {
                continue;
            }
            debug!(
                plugin = %plugin.identity().name,
                model = %request.model,
                "dispatching chat_completion"
            );
            if let Some(text) = plugin.handle_chat_completion(request).await {
                return Some(text);
            }
        }
        None
    }
}
