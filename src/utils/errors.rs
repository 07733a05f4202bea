/// Turn a command error into the text shown in the error embed.
///
/// Service errors already carry a `❌` marker; transport errors from Discord
/// are replaced with a short explanation instead of the raw HTTP message.
pub fn user_message(error_msg: &str) -> String {
    let lower = error_msg.to_lowercase();
    if lower.contains("429") || lower.contains("rate limit") || lower.contains("ratelimited") {
        return "⚠️ **Rate Limited**: Discord is rate limiting us. Please try again in a moment.".to_string();
    }
    if lower.contains("http request") {
        return "⚠️ **Network Error**: Having trouble connecting to Discord. Please try again.".to_string();
    }

    let clean = error_msg.trim().trim_start_matches('❌').trim();
    if clean.is_empty() {
        "❌ An error occurred while executing the command.".to_string()
    } else {
        format!("❌ {}", clean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_is_not_doubled() {
        assert_eq!(user_message("❌ Unknown crop"), "❌ Unknown crop");
        assert_eq!(user_message("Unknown crop"), "❌ Unknown crop");
    }

    #[test]
    fn test_transport_errors_are_summarised() {
        assert!(user_message("HTTP request failed: 429 Too Many Requests").contains("Rate Limited"));
        assert!(user_message("error sending HTTP request").contains("Network Error"));
        assert!(user_message("   ").contains("An error occurred"));
    }
}
