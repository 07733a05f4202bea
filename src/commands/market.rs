use std::sync::Arc;

use serenity::all::{CreateAttachment, CreateEmbedFooter};
use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::config::AppConfig;
use crate::data::MarketStore;
use crate::services::chart_service::{self, TrendOverlay};
use crate::services::price_service::{self, MarketReport};

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    tracing::info!("📈 Market command called with args: {:?}", args);

    let store = market_store(ctx).await?;

    if args.is_empty() {
        return execute_overview(ctx, msg, &store).await;
    }

    if args[0].eq_ignore_ascii_case("chart") {
        return execute_chart(ctx, msg, &store, &args[1..]).await;
    }

    let dataset = store.dataset().map_err(|e| format!("❌ {}", e))?;
    let query = price_service::parse_market_args(args)?;
    let report = price_service::build_report(dataset, &query, today())?;

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(report_embed(&report)))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

async fn market_store(ctx: &Context) -> Result<Arc<MarketStore>, String> {
    let data = ctx.data.read().await;
    data.get::<crate::MarketData>()
        .cloned()
        .ok_or("Price dataset not initialized".to_string())
}

async fn settings(ctx: &Context) -> Result<Arc<AppConfig>, String> {
    let data = ctx.data.read().await;
    data.get::<crate::Settings>()
        .cloned()
        .ok_or("Settings not initialized".to_string())
}

/// List every crop with its history span and last price
async fn execute_overview(ctx: &Context, msg: &Message, store: &MarketStore) -> Result<(), String> {
    let dataset = store.dataset().map_err(|e| format!("❌ {}", e))?;
    let summaries = dataset.summaries();

    if summaries.is_empty() {
        return Err("❌ The price dataset contains no crops".to_string());
    }

    let embed = CreateEmbed::default()
        .title("📈 Market Analytics & Prediction")
        .description(price_service::format_crop_table(&summaries))
        .field(
            "Forecast",
            "`$market <crop> [days=N] [price=X]`\n`$market chart <crop> [days=N]`",
            false,
        )
        .footer(CreateEmbedFooter::new(format!(
            "{} crops, {} price rows",
            summaries.len(),
            dataset.row_count()
        )))
        .color(0x00b0f4);

    msg.channel_id
        .send_message(ctx, CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}

fn report_embed(report: &MarketReport) -> CreateEmbed {
    let crop = report.series.crop();
    let mut history = match (report.series.first_date(), report.series.last_date()) {
        (Some(first), Some(last)) => format!("{} points, {} to {}", report.series.len(), first, last),
        _ => format!("{} points", report.series.len()),
    };
    if let Some((low, high)) = report.series.price_range() {
        history.push_str(&format!("\nRange: ₹ {:.2} - ₹ {:.2}", low, high));
    }

    let mut embed = CreateEmbed::default()
        .title(format!("🤖 {}: AI Price Prediction & Advisory", crop))
        .field("📊 History", history, false)
        .field("Current Market Price", format!("₹ {:.2}/kg", report.baseline_price), true)
        .field(
            format!("AI Forecast for {}", report.target_date),
            format!(
                "**₹ {:.2}**\n{:+.2} vs Today",
                report.predicted_price,
                report.forecast
                    .as_ref()
                    .map_or(report.predicted_price - report.baseline_price, |(result, _)| result.delta())
            ),
            true,
        )
        .field(
            "Trend",
            format!(
                "{:+.3} ₹/day (R² {:.2})",
                report.trend.slope, report.trend.r_squared
            ),
            true,
        );

    if report.predicted_price < 0.0 {
        embed = embed.field(
            "⚠️ Caution",
            "The linear trend extrapolates below zero. Treat this forecast with care.",
            false,
        );
    }

    match &report.forecast {
        Some((result, recommendation)) => embed
            .field(
                "📢 System Recommendation",
                price_service::recommendation_text(result, *recommendation, report.horizon_days),
                false,
            )
            .footer(CreateEmbedFooter::new(format!(
                "Signal: {} ({}) | Horizon: {} days",
                recommendation,
                recommendation.action(),
                report.horizon_days
            )))
            .color(recommendation.color()),
        None => embed
            .field(
                "📢 System Recommendation",
                "Recommendation unavailable: the current price is zero.",
                false,
            )
            .color(0xffa500),
    }
}

/// Render and send the price history chart with the forecast overlay
async fn execute_chart(ctx: &Context, msg: &Message, store: &MarketStore, args: &[&str]) -> Result<(), String> {
    tracing::info!("🎨 Chart command received from user {} with args: {:?}", msg.author.id, args);

    if args.is_empty() {
        return Err("❌ Usage: `$market chart <crop> [days=N]`".to_string());
    }

    let dataset = store.dataset().map_err(|e| format!("❌ {}", e))?;
    let query = price_service::parse_market_args(args)?;
    let report = price_service::build_report(dataset, &query, today())?;
    let settings = settings(ctx).await?;

    match msg.channel_id.broadcast_typing(ctx.http.as_ref()).await {
        Ok(_) => tracing::debug!("Broadcast typing indicator"),
        Err(e) => tracing::warn!("Failed to broadcast typing: {}", e),
    };

    let (width, height) = (settings.chart_width, settings.chart_height);
    let crop = report.series.crop().to_string();
    let chart_data = tokio::task::spawn_blocking(move || {
        let overlay = TrendOverlay {
            trend: &report.trend,
            target_date: report.target_date,
            predicted_price: report.predicted_price,
        };
        chart_service::render_history_chart(&report.series, Some(overlay), width, height)
    })
    .await
    .map_err(|e| format!("Chart task failed: {}", e))?
    .map_err(|e| {
        tracing::error!("Chart generation error: {}", e);
        format!("❌ {}", e)
    })?;

    if chart_data.is_empty() {
        return Err("❌ Chart generation failed: produced empty image data".to_string());
    }
    tracing::info!("✓ Chart generated successfully: {} bytes", chart_data.len());

    let filename = format!("chart_{}.png", crop.replace(' ', "_"));
    let attachment = CreateAttachment::bytes(chart_data, filename);
    let message = CreateMessage::default()
        .content(format!("📊 Price History: **{}**", crop))
        .add_file(attachment);

    msg.channel_id
        .send_message(ctx, message)
        .await
        .map_err(|e| format!("Failed to send chart: {}", e))?;

    tracing::info!("✓ Chart message sent for {}", crop);
    Ok(())
}
