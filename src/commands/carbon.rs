use serenity::builder::{CreateEmbed, CreateEmbedFooter, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::services::carbon_service;

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    tracing::info!("🌍 Carbon command called with args: {:?}", args);

    let inputs = carbon_service::parse_carbon_args(args)?;
    let estimate = carbon_service::estimate(&inputs).map_err(|e| format!("❌ {}", e))?;

    let embed = CreateEmbed::default()
        .title("🌍 CarbonCredit: Income Advisor")
        .field("Farm Size", format!("{:.1} acres", inputs.farm_size_acres), true)
        .field("Farming Method", inputs.method.to_string(), true)
        .field("Trees Planted", inputs.trees_planted.to_string(), true)
        .field(
            "🌿 Total Carbon Credits",
            format!(
                "**{:.2}** (soil {:.2} + trees {:.2})",
                estimate.total_credits, estimate.soil_credits, estimate.tree_credits
            ),
            false,
        )
        .field(
            "💰 Estimated Annual Income",
            format!("**₹ {}**", carbon_service::format_rupees(estimate.annual_income)),
            false,
        )
        .footer(CreateEmbedFooter::new("Usage: $carbon [acres] [organic|conventional] [trees]"))
        .color(0x00ff00);

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
