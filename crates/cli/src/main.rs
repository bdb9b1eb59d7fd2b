use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use agentplug_core::{CommandInvocation, PluginSet, ResponseContext};
use agentplug_discord::{ChatGateway, DiscordRelayPlugin, RelayConfig, SerenityGateway};

#[derive(Parser)]
#[command(name = "agentplug")]
#[command(about = "agentplug — lifecycle plugin SDK demo")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect the Discord relay plugin and run a demo dispatch pass
    Relay {
        /// Override the destination channel for the demo response
        #[arg(short, long)]
        channel: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Relay { channel } => relay(channel).await,
    }
}

async fn relay(channel_override: Option<u64>) -> Result<()> {
    let config = RelayConfig::from_env()?;
    let channel = channel_override.or(config.default_channel_id);

    let gateway = Arc::new(SerenityGateway::new(&config.bot_token));
    let plugin = Arc::new(DiscordRelayPlugin::new(gateway.clone()));

    let mut plugins = PluginSet::new();
    plugins.register(plugin);

    info!("connecting to Discord");
    gateway.connect().await?;

    // Demo pass: the two hooks the relay opts into.
    let rewritten = plugins.pre_command(CommandInvocation::bare("hello")).await;
    info!("pre_command rewrote `hello` to `{}`", rewritten.name);

    let ctx = match channel {
        Some(id) => ResponseContext::for_channel(id),
        None => ResponseContext::default(),
    };
    let response = plugins
        .on_response("agentplug relay is up".into(), &ctx)
        .await;
    info!("host continues with response: {response}");

    info!("relay running, press ctrl-c to exit");
    tokio::signal::ctrl_c().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_subcommand_parses_channel_override() {
        let cli = Cli::parse_from(["agentplug", "relay", "--channel", "42"]);
        let Commands::Relay { channel } = cli.command;
        assert_eq!(channel, Some(42));
    }
}
