pub mod home;
pub mod market;
pub mod waste;
pub mod carbon;
pub mod help;

use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::{debug, error, warn};

use crate::models::DashboardPage;
use crate::utils;

pub async fn handle_message(ctx: &Context, msg: &Message) {
    if msg.author.bot {
        return;
    }

    // Parse command and arguments
    let parts: Vec<&str> = msg.content.split_whitespace().collect();
    let Some((&command, args)) = parts.split_first() else {
        return;
    };
    if !command.starts_with('$') {
        return;
    }

    let page = if command.eq_ignore_ascii_case("$help") {
        None
    } else {
        match DashboardPage::from_command(command) {
            Some(page) => Some(page),
            None => return,
        }
    };

    if let Err(remaining_ms) = utils::check_global_rate_limit().await {
        warn!("Global rate limit hit, dropping {} ({}ms until a slot frees)", command, remaining_ms);
        return;
    }

    if let Some(page) = page {
        if let Err((remaining, should_warn)) = utils::check_cooldown(msg.author.id, page).await {
            debug!("{} on cooldown for {} ({}s left)", page, msg.author.id, remaining);
            if should_warn {
                let embed = CreateEmbed::default()
                    .title("Command Cooldown")
                    .description(format!("⏳ Please wait {} seconds before opening {} again.", remaining, page))
                    .color(0xffa500);
                let _ = msg.channel_id.send_message(ctx, CreateMessage::default().embed(embed)).await;
            }
            return;
        }
    }

    let result = match page {
        None => help::execute(ctx, msg).await,
        Some(DashboardPage::Home) => home::execute(ctx, msg).await,
        Some(DashboardPage::MarketAnalytics) => market::execute(ctx, msg, args).await,
        Some(DashboardPage::AgroWaste) => waste::execute(ctx, msg, args).await,
        Some(DashboardPage::CarbonCredit) => carbon::execute(ctx, msg, args).await,
    };

    if let Err(e) = result {
        error!("Error executing command {}: {}", command, e);

        let embed = CreateEmbed::default()
            .title("Command Error")
            .description(utils::user_message(&e))
            .color(0xff0000);

        let _ = msg.channel_id
            .send_message(ctx, CreateMessage::default().embed(embed))
            .await;
    }
}
