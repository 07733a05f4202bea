use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;
use tracing::{info, warn, error};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

mod config;
mod data;
mod models;
mod commands;
mod services;
mod utils;

use config::AppConfig;
use data::{MarketStore, SharedMarketStore};

struct Handler;

/// Price dataset shared with every command
struct MarketData;

impl TypeMapKey for MarketData {
    type Value = SharedMarketStore;
}

struct Settings;

impl TypeMapKey for Settings {
    type Value = Arc<AppConfig>;
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        commands::handle_message(&ctx, &msg).await;
    }

    async fn ready(&self, _: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let filter = EnvFilter::from_default_env();
    let filter = match (
        "farmeco=debug".parse::<Directive>(),
        "serenity=warn".parse::<Directive>(),
    ) {
        (Ok(app), Ok(serenity)) => filter.add_directive(app).add_directive(serenity),
        _ => filter,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🌱 Starting FarmEco Pro...");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    // A missing dataset only disables market analytics
    info!("Loading price dataset from {}...", config.dataset_path.display());
    let store = Arc::new(MarketStore::load(&config.dataset_path));
    if !store.is_available() {
        warn!("Market analytics disabled; other dashboard pages remain available");
    }

    utils::configure_cooldown(config.cooldown_secs).await;

    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGES;

    let mut client = match Client::builder(&config.discord_token, intents)
        .event_handler(Handler)
        .await
    {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create client: {}", e);
            return;
        }
    };

    {
        let mut data = client.data.write().await;
        data.insert::<MarketData>(store);
        data.insert::<Settings>(Arc::new(config));
    }

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }
}
