//! The plugin contract: one capability predicate + one handler per
//! lifecycle extension point.
//!
//! Every method has a default body, so a concrete plugin only overrides
//! the pairs it opts into. Predicates default to `false` (hook declined);
//! handlers default to identity passthrough (or `None` for the
//! short-circuit hooks). A host must check the predicate before invoking
//! the paired handler; the default handler bodies keep the pipeline
//! well-behaved even if a host gets that wrong, but they are not a
//! substitute for the predicate check.

use async_trait::async_trait;

use crate::types::{
    ChatMessage, CommandInvocation, CompletionRequest, PluginIdentity, PromptGenerator,
    ResponseContext,
};

/// A lifecycle plugin the host consults at fixed points in its run loop.
///
/// Handlers are async because the interesting implementations (chat relays,
/// completion interceptors) suspend on network I/O. Predicates never
/// suspend; they are pure capability queries.
#[async_trait]
pub trait AgentPlugin: Send + Sync {
    /// Static metadata: name, version, description. Set once at
    /// construction and never mutated by hook invocations.
    fn identity(&self) -> &PluginIdentity;

    // -- on_response: post-process or relay a model response ---------------

    fn can_handle_on_response(&self) -> bool {
        false
    }

    /// Called when a response is received from the model. Returns the
    /// (possibly transformed) response the host should continue with.
    async fn on_response(&self, response: String, _ctx: &ResponseContext) -> String {
        response
    }

    // -- post_prompt: mutate prompt construction ---------------------------

    fn can_handle_post_prompt(&self) -> bool {
        false
    }

    /// Called after the prompt scaffold is created, before the prompt is
    /// rendered.
    async fn post_prompt(&self, prompt: PromptGenerator) -> PromptGenerator {
        prompt
    }

    // -- on_planning: inject content before the planning completion --------

    fn can_handle_on_planning(&self) -> bool {
        false
    }

    /// Called before the planning chat completion. A `Some` return is
    /// injected into the planning context by the host.
    async fn on_planning(
        &self,
        _prompt: &PromptGenerator,
        _messages: &[ChatMessage],
    ) -> Option<String> {
        None
    }

    // -- post_planning: post-process the planning result -------------------

    fn can_handle_post_planning(&self) -> bool {
        false
    }

    /// Called after the planning chat completion.
    async fn post_planning(&self, response: String) -> String {
        response
    }

    // -- pre_instruction: rewrite the instruction context ------------------

    fn can_handle_pre_instruction(&self) -> bool {
        false
    }

    /// Called before the instruction chat with the context messages.
    /// Returns the message list the host should use instead.
    async fn pre_instruction(&self, messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
        messages
    }

    // -- on_instruction: short-circuit the instruction result --------------

    fn can_handle_on_instruction(&self) -> bool {
        false
    }

    /// Called when the instruction chat is done. A `Some` return replaces
    /// the instruction result.
    async fn on_instruction(&self, _messages: &[ChatMessage]) -> Option<String> {
        None
    }

    // -- post_instruction: post-process the instruction result -------------

    fn can_handle_post_instruction(&self) -> bool {
        false
    }

    /// Called after the instruction chat is done.
    async fn post_instruction(&self, response: String) -> String {
        response
    }

    // -- pre_command: rewrite a command call before execution --------------

    fn can_handle_pre_command(&self) -> bool {
        false
    }

    /// Called before a command is executed. Returns the invocation the
    /// host should execute instead (name and arguments may both change).
    async fn pre_command(&self, invocation: CommandInvocation) -> CommandInvocation {
        invocation
    }

    // -- post_command: post-process command output -------------------------

    fn can_handle_post_command(&self) -> bool {
        false
    }

    /// Called after a command is executed with its textual result.
    async fn post_command(&self, _command_name: &str, response: String) -> String {
        response
    }

    // -- chat_completion: fully intercept a completion call ----------------

    /// Unlike the other predicates, capability here may depend on the
    /// request itself (model, size), so the full request is passed in.
    fn can_handle_chat_completion(&self, _request: &CompletionRequest) -> bool {
        false
    }

    /// Called in place of the host's own completion path. `None` means the
    /// plugin declined after all and the host should fall back.
    async fn handle_chat_completion(&self, _request: &CompletionRequest) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Inert {
        identity: PluginIdentity,
    }

    impl Inert {
        fn new() -> Self {
            Self {
                identity: PluginIdentity::new("inert", "0.1.0", "overrides nothing"),
            }
        }
    }

    #[async_trait]
    impl AgentPlugin for Inert {
        fn identity(&self) -> &PluginIdentity {
            &self.identity
        }
    }

    #[tokio::test]
    async fn defaults_decline_every_hook() {
        let plugin = Inert::new();
        let request = CompletionRequest {
            messages: vec![ChatMessage::user("hi")],
            model: "gpt-4".into(),
            temperature: 0.0,
            max_tokens: 128,
        };

        assert!(!plugin.can_handle_on_response());
        assert!(!plugin.can_handle_post_prompt());
        assert!(!plugin.can_handle_on_planning());
        assert!(!plugin.can_handle_post_planning());
        assert!(!plugin.can_handle_pre_instruction());
        assert!(!plugin.can_handle_on_instruction());
        assert!(!plugin.can_handle_post_instruction());
        assert!(!plugin.can_handle_pre_command());
        assert!(!plugin.can_handle_post_command());
        assert!(!plugin.can_handle_chat_completion(&request));
    }

    #[tokio::test]
    async fn default_handlers_pass_through() {
        let plugin = Inert::new();

        let ctx = ResponseContext::default();
        assert_eq!(plugin.on_response("unchanged".into(), &ctx).await, "unchanged");

        let mut prompt = PromptGenerator::new();
        prompt.add_constraint("stay terse");
        assert_eq!(plugin.post_prompt(prompt.clone()).await, prompt);

        let messages = vec![ChatMessage::system("ctx"), ChatMessage::user("go")];
        assert_eq!(plugin.pre_instruction(messages.clone()).await, messages);
        assert_eq!(plugin.on_instruction(&messages).await, None);
        assert_eq!(plugin.on_planning(&prompt, &messages).await, None);

        let inv = CommandInvocation::bare("browse");
        assert_eq!(plugin.pre_command(inv.clone()).await, inv);
        assert_eq!(plugin.post_command("browse", "out".into()).await, "out");
    }

    #[tokio::test]
    async fn identity_is_stable_across_invocations() {
        let plugin = Inert::new();
        let before = plugin.identity().clone();
        let _ = plugin.on_response("x".into(), &ResponseContext::default()).await;
        let _ = plugin.post_planning("y".into()).await;
        assert_eq!(plugin.identity(), &before);
    }
}
