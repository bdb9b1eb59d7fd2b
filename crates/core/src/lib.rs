pub mod dispatch;
pub mod error;
pub mod plugin;
pub mod types;

pub use dispatch::PluginSet;
pub use error::PluginError;
pub use plugin::AgentPlugin;
pub use types::{
    ChatMessage, CommandArgs, CommandInvocation, CompletionRequest, MessageRole, PluginIdentity,
    PromptGenerator, ResponseContext,
};
