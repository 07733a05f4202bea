use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::models::{Emphasis, WasteType};
use crate::services::waste_service;

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    tracing::info!("♻️ Waste command called with args: {:?}", args);

    let embed = if args.is_empty() {
        let types = WasteType::ALL
            .iter()
            .map(|w| format!("• {}", w))
            .collect::<Vec<_>>()
            .join("\n");

        CreateEmbed::default()
            .title("♻️ AgroWaste: Smart Reuse Recommendations")
            .description("Select a farm waste material to get an eco-friendly solution.")
            .field("Materials", types, false)
            .field("Usage", "`$waste <material>`\nExample: `$waste rice straw`", false)
            .color(0x00b0f4)
    } else {
        let waste: WasteType = args.join(" ").parse().map_err(|e| format!("❌ {}", e))?;

        let mut embed = CreateEmbed::default()
            .title(format!("♻️ Best Usage for {}:", waste))
            .color(0x00ff00);

        for idea in waste_service::suggestions(waste) {
            let name = match idea.emphasis {
                Emphasis::Primary => format!("{} {}", idea.icon, idea.title),
                Emphasis::Secondary => format!("{} {} (also)", idea.icon, idea.title),
            };
            embed = embed.field(name, idea.detail, false);
        }
        embed
    };

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
