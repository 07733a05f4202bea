use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let embed = CreateEmbed::default()
        .title("📖 FarmEco Commands Help")
        .description("**FarmEco Pro** - crop price forecasts, waste reuse ideas and carbon credit estimates for farmers.")
        .color(0x00b0f4)
        .field(
            "🏠 Home",
            "`$home` - Daily summary and seasonal advice\n`$help` - Show this help message",
            false,
        )
        .field(
            "📈 Market Analytics",
            "`$market` - List crops in the dataset\n\
             `$market <crop> [days=N] [price=X]` - Forecast price N days ahead (1-30, default 7) against your current price\n\
             `$market chart <crop> [days=N]` - Price history chart with trend",
            false,
        )
        .field(
            "♻️ AgroWaste",
            "`$waste` - List waste materials\n`$waste <material>` - Reuse suggestions",
            false,
        )
        .field(
            "🌍 CarbonCredit",
            "`$carbon [acres] [organic|conventional] [trees]` - Estimate annual carbon credit income",
            false,
        )
        .field(
            "⚡ Rate Limiting",
            "Short cooldown per page per user\nGlobal 50 requests/second limit",
            false,
        );

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| format!("Failed to send help message: {}", e))?;

    Ok(())
}
