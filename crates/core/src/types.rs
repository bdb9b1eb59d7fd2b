//! Payload types shared between the host and plugins.
//!
//! These are the shapes that cross the hook boundary. They are produced by
//! the host, handed to plugin handlers, and (for the transforming hooks)
//! handed back. None of them carry behavior beyond construction helpers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Chat messages
// ---------------------------------------------------------------------------

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single message in a chat transcript. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Named arguments for a command call. Values are loosely typed; commands
/// validate their own arguments at execution time.
pub type CommandArgs = HashMap<String, serde_json::Value>;

/// A command call the host is about to execute. A `pre_command` hook may
/// return a substituted invocation (different name, different args).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandInvocation {
    pub name: String,
    #[serde(default)]
    pub args: CommandArgs,
}

impl CommandInvocation {
    pub fn new(name: impl Into<String>, args: CommandArgs) -> Self {
        Self { name: name.into(), args }
    }

    /// An invocation with no arguments.
    pub fn bare(name: impl Into<String>) -> Self {
        Self { name: name.into(), args: CommandArgs::new() }
    }
}

// ---------------------------------------------------------------------------
// Response context
// ---------------------------------------------------------------------------

/// Context the host attaches to an outgoing model response.
///
/// `channel_id` names the chat channel the response should be relayed to,
/// when the host knows one. Absent means "no delivery destination".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseContext {
    pub channel_id: Option<u64>,
}

impl ResponseContext {
    pub fn for_channel(channel_id: u64) -> Self {
        Self { channel_id: Some(channel_id) }
    }
}

// ---------------------------------------------------------------------------
// Chat completion interception
// ---------------------------------------------------------------------------

/// The full parameter set of a completion call a plugin may intercept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

// ---------------------------------------------------------------------------
// Prompt scaffold
// ---------------------------------------------------------------------------

/// The mutable prompt scaffold handed to `post_prompt` and `on_planning`.
///
/// Hooks append to the section lists; the host renders the final prompt
/// with [`PromptGenerator::generate_prompt_string`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptGenerator {
    pub constraints: Vec<String>,
    pub resources: Vec<String>,
    pub performance_evaluations: Vec<String>,
}

impl PromptGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_constraint(&mut self, constraint: impl Into<String>) {
        self.constraints.push(constraint.into());
    }

    pub fn add_resource(&mut self, resource: impl Into<String>) {
        self.resources.push(resource.into());
    }

    pub fn add_performance_evaluation(&mut self, evaluation: impl Into<String>) {
        self.performance_evaluations.push(evaluation.into());
    }

    /// Render the scaffold as numbered sections, skipping empty ones.
    pub fn generate_prompt_string(&self) -> String {
        let mut out = String::new();
        for (title, items) in [
            ("Constraints", &self.constraints),
            ("Resources", &self.resources),
            ("Performance Evaluation", &self.performance_evaluations),
        ] {
            if items.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(title);
            out.push_str(":\n");
            for (i, item) in items.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, item));
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Plugin identity
// ---------------------------------------------------------------------------

/// Static plugin metadata, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginIdentity {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl PluginIdentity {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_snake_case() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn invocation_args_default_when_missing() {
        let inv: CommandInvocation = serde_json::from_str(r#"{"name":"browse"}"#).unwrap();
        assert_eq!(inv.name, "browse");
        assert!(inv.args.is_empty());
    }

    #[test]
    fn prompt_renders_numbered_sections() {
        let mut prompt = PromptGenerator::new();
        prompt.add_constraint("No user assistance");
        prompt.add_constraint("4000 word limit");
        prompt.add_resource("Internet access");

        let text = prompt.generate_prompt_string();
        assert!(text.starts_with("Constraints:\n1. No user assistance\n2. 4000 word limit\n"));
        assert!(text.contains("Resources:\n1. Internet access\n"));
        assert!(!text.contains("Performance Evaluation"));
    }

    #[test]
    fn empty_prompt_renders_empty() {
        assert_eq!(PromptGenerator::new().generate_prompt_string(), "");
    }
}
