//! The seam to the external chat service.
//!
//! `ChatGateway` is the only surface the relay plugin talks through, so
//! tests can substitute a recording fake. `SerenityGateway` is the real
//! implementation: it owns the serenity client task and the session state
//! cell. Dropped connections are neither detected nor recovered here;
//! that is serenity's problem.

use std::sync::{Arc, Mutex, RwLock};

use agentplug_core::PluginError;
use anyhow::Result;
use async_trait::async_trait;
use serenity::model::channel::Message as DiscordMessage;
use serenity::model::gateway::Ready;
use serenity::model::id::ChannelId;
use serenity::prelude::*;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

/// Session lifecycle: only `Connected` permits delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected,
}

/// The three operations the relay needs from a chat service.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Authenticate and establish the session. Resolves once the gateway
    /// reports ready.
    async fn connect(&self) -> Result<()>;

    /// Current session state.
    fn state(&self) -> SessionState;

    /// Deliver text to the channel with the given identifier. Only legal
    /// while `Connected`; callers treat failures as best-effort.
    async fn send_text(&self, channel_id: u64, text: &str) -> Result<()>;
}

struct Shared {
    state: RwLock<SessionState>,
    http: RwLock<Option<Arc<serenity::http::Http>>>,
    ready_tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl Shared {
    fn set_state(&self, state: SessionState) {
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = state;
    }
}

struct Handler {
    shared: Arc<Shared>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("connected to Discord as {}", ready.user.name);
        self.shared.set_state(SessionState::Connected);
        if let Some(tx) = self.shared.ready_tx.lock().unwrap_or_else(|e| e.into_inner()).take() {
            let _ = tx.send(());
        }
    }

    async fn message(&self, ctx: Context, msg: DiscordMessage) {
        if msg.author.bot {
            return;
        }
        // The one built-in chat command the relay answers itself.
        if msg.content.trim() == "!say_hello" {
            if let Err(e) = msg.channel_id.say(&ctx.http, "Hello, world!").await {
                error!("failed to answer say_hello: {e:?}");
            }
        }
    }
}

/// Gateway backed by a live serenity client.
pub struct SerenityGateway {
    token: String,
    shared: Arc<Shared>,
}

impl SerenityGateway {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            shared: Arc::new(Shared {
                state: RwLock::new(SessionState::Disconnected),
                http: RwLock::new(None),
                ready_tx: Mutex::new(None),
            }),
        }
    }

    /// Record a failed connect attempt: the session ends back at
    /// `Disconnected`, never stuck in `Connecting`.
    fn connect_failed(&self, why: impl std::fmt::Display) -> anyhow::Error {
        self.shared.set_state(SessionState::Disconnected);
        PluginError::Connection(why.to_string()).into()
    }
}

#[async_trait]
impl ChatGateway for SerenityGateway {
    async fn connect(&self) -> Result<()> {
        self.shared.set_state(SessionState::Connecting);

        let intents = GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let (ready_tx, ready_rx) = oneshot::channel();
        *self.shared.ready_tx.lock().unwrap_or_else(|e| e.into_inner()) = Some(ready_tx);

        let mut client = match Client::builder(&self.token, intents)
            .event_handler(Handler { shared: self.shared.clone() })
            .await
        {
            Ok(client) => client,
            Err(e) => return Err(self.connect_failed(e)),
        };

        *self.shared.http.write().unwrap_or_else(|e| e.into_inner()) =
            Some(client.http.clone());

        let shared = self.shared.clone();
        let run = tokio::spawn(async move {
            if let Err(why) = client.start().await {
                error!("Discord client error: {why:?}");
                shared.set_state(SessionState::Disconnected);
                return Err(PluginError::Connection(format!("Discord client error: {why:?}")).into());
            }
            Ok::<(), anyhow::Error>(())
        });

        // Resolve on ready, or surface the startup error if the client
        // task dies first (bad token, gateway refused).
        tokio::select! {
            ready = ready_rx => match ready {
                Ok(()) => Ok(()),
                Err(_) => Err(self.connect_failed("gateway task exited before ready")),
            },
            joined = run => match joined.map_err(|e| self.connect_failed(e))? {
                Ok(()) => Err(self.connect_failed("gateway task exited before ready")),
                Err(e) => Err(e),
            },
        }
    }

    fn state(&self) -> SessionState {
        *self.shared.state.read().unwrap_or_else(|e| e.into_inner())
    }

    async fn send_text(&self, channel_id: u64, text: &str) -> Result<()> {
        if self.state() != SessionState::Connected {
            return Err(PluginError::Connection("not connected".into()).into());
        }
        let http = self
            .shared
            .http
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        let Some(http) = http else {
            return Err(PluginError::Connection("no session handle".into()).into());
        };
        if let Err(e) = ChannelId::new(channel_id).say(&http, text).await {
            warn!(channel_id, "send failed: {e:?}");
            return Err(PluginError::Connection(e.to_string()).into());
        }
        Ok(())
    }
}
