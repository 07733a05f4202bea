use serenity::builder::{CreateEmbed, CreateEmbedFooter, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::models::DashboardPage;
use crate::services::home_service::{self, MONSOON_GUIDE, OVERVIEW_CARDS, SEASONAL_ADVICE};

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let store = {
        let data = ctx.data.read().await;
        data.get::<crate::MarketData>().cloned()
    };
    let today = chrono::Local::now().date_naive();
    let price_alert = store
        .as_ref()
        .and_then(|store| store.dataset().ok())
        .and_then(|dataset| home_service::price_alert(dataset, today));

    let mut overview = CreateEmbed::default()
        .title("🌱 Dashboard Overview")
        .description("Welcome back, Farmer. Here is your daily farming summary.")
        .color(0x0e3b28);

    for card in &OVERVIEW_CARDS {
        let body = match (&price_alert, card.page) {
            (Some(alert), DashboardPage::MarketAnalytics) => alert.as_str(),
            _ => card.body,
        };
        overview = overview.field(
            format!("{} {}", card.icon, card.title),
            format!("{}\n➡️ {}: `{}`", body, card.action, card.page.command()),
            true,
        );
    }

    let mut advisory = CreateEmbed::default()
        .title("Seasonal Advice 🌦️")
        .description(SEASONAL_ADVICE)
        .color(0x1b5e20)
        .footer(CreateEmbedFooter::new("🌧️ Official Monsoon Advisory"));

    for (section, advice) in MONSOON_GUIDE {
        advisory = advisory.field(section, advice, false);
    }

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embeds(vec![overview, advisory]))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
