//! The example plugin: relay agent responses into a Discord channel and
//! remap the `hello` command to `say_hello`.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use agentplug_core::{
    AgentPlugin, CommandInvocation, PluginIdentity, ResponseContext,
};

use crate::gateway::{ChatGateway, SessionState};

/// Command name the rewrite rule triggers on.
const HELLO_TRIGGER: &str = "hello";
/// Replacement command the host executes instead.
const SAY_HELLO: &str = "say_hello";

/// Relays model responses to Discord and rewrites the `hello` command.
///
/// Opts into exactly two hooks: `on_response` and `pre_command`. Delivery
/// is best-effort; the host's pipeline never sees a delivery failure.
pub struct DiscordRelayPlugin<G> {
    identity: PluginIdentity,
    gateway: Arc<G>,
}

impl<G: ChatGateway> DiscordRelayPlugin<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            identity: PluginIdentity::new(
                "agentplug-discord-relay",
                "0.1.0",
                "Relays agent responses to a Discord channel",
            ),
            gateway,
        }
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }
}

#[async_trait]
impl<G: ChatGateway + 'static> AgentPlugin for DiscordRelayPlugin<G> {
    fn identity(&self) -> &PluginIdentity {
        &self.identity
    }

    fn can_handle_on_response(&self) -> bool {
        true
    }

    /// Deliver the response to the context's channel when a session is
    /// up; always hand the response back unchanged.
    async fn on_response(&self, response: String, ctx: &ResponseContext) -> String {
        let Some(channel_id) = ctx.channel_id else {
            debug!("no destination channel, skipping relay");
            return response;
        };
        if self.gateway.state() != SessionState::Connected {
            debug!(channel_id, "session not connected, skipping relay");
            return response;
        }
        if let Err(e) = self.gateway.send_text(channel_id, &response).await {
            warn!(channel_id, "relay delivery failed: {e:#}");
        }
        response
    }

    fn can_handle_pre_command(&self) -> bool {
        true
    }

    /// `hello` becomes `say_hello` with no arguments; everything else
    /// passes through untouched.
    async fn pre_command(&self, invocation: CommandInvocation) -> CommandInvocation {
        if invocation.name == HELLO_TRIGGER {
            return CommandInvocation::bare(SAY_HELLO);
        }
        invocation
    }
}
