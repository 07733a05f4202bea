use std::collections::HashMap;
use std::hash::Hash;
use std::time::{SystemTime, UNIX_EPOCH};
use lazy_static::lazy_static;
use serenity::model::id::UserId;
use tokio::sync::Mutex;

use crate::models::DashboardPage;

const GLOBAL_RATE_LIMIT: usize = 50;  // requests per second
const RATE_WINDOW_MS: u64 = 1000;

/// Per-key cooldown bookkeeping.
///
/// A key on cooldown is warned about once per cooldown period so repeated
/// attempts don't flood the channel.
pub struct CooldownTracker<K> {
    cooldown_secs: u64,
    last_used: HashMap<K, u64>,
    last_warned: HashMap<K, u64>,
}

impl<K: Eq + Hash + Clone> CooldownTracker<K> {
    pub fn new(cooldown_secs: u64) -> Self {
        CooldownTracker {
            cooldown_secs,
            last_used: HashMap::new(),
            last_warned: HashMap::new(),
        }
    }

    pub fn set_cooldown(&mut self, cooldown_secs: u64) {
        self.cooldown_secs = cooldown_secs;
    }

    /// Ok if `key` may run at `now` (seconds), recording the use.
    /// Err((remaining_seconds, should_warn)) while on cooldown.
    pub fn check(&mut self, key: K, now: u64) -> Result<(), (u64, bool)> {
        if let Some(&last_time) = self.last_used.get(&key) {
            let elapsed = now.saturating_sub(last_time);
            if elapsed < self.cooldown_secs {
                let should_warn = match self.last_warned.get(&key) {
                    Some(&warned_at) => warned_at < last_time,
                    None => true,
                };
                if should_warn {
                    self.last_warned.insert(key, now);
                }
                return Err((self.cooldown_secs - elapsed, should_warn));
            }
        }

        self.last_used.insert(key, now);
        Ok(())
    }
}

/// Sliding one-second window over request timestamps (milliseconds)
pub struct RequestWindow {
    limit: usize,
    requests: Vec<u64>,
}

impl RequestWindow {
    pub fn new(limit: usize) -> Self {
        RequestWindow { limit, requests: Vec::new() }
    }

    /// Ok if under the limit (the request is recorded), Err(remaining_ms) otherwise
    pub fn check(&mut self, now_ms: u64) -> Result<(), u64> {
        let window_start = now_ms.saturating_sub(RATE_WINDOW_MS);
        self.requests.retain(|&timestamp| timestamp > window_start);

        if self.requests.len() >= self.limit {
            let oldest_leaves_at = self.requests[0] + RATE_WINDOW_MS;
            Err(oldest_leaves_at.saturating_sub(now_ms))
        } else {
            self.requests.push(now_ms);
            Ok(())
        }
    }
}

lazy_static! {
    static ref PAGE_COOLDOWNS: Mutex<CooldownTracker<(UserId, DashboardPage)>> =
        Mutex::new(CooldownTracker::new(crate::config::DEFAULT_COOLDOWN_SECS));

    static ref GLOBAL_REQUESTS: Mutex<RequestWindow> = Mutex::new(RequestWindow::new(GLOBAL_RATE_LIMIT));
}

fn now() -> std::time::Duration {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default()
}

/// Apply the configured cooldown length; called once at startup
pub async fn configure_cooldown(cooldown_secs: u64) {
    PAGE_COOLDOWNS.lock().await.set_cooldown(cooldown_secs);
}

/// Check if a user can open a dashboard page again
pub async fn check_cooldown(user_id: UserId, page: DashboardPage) -> Result<(), (u64, bool)> {
    let now = now().as_secs();
    PAGE_COOLDOWNS.lock().await.check((user_id, page), now)
}

/// Check the global request limit across all users
pub async fn check_global_rate_limit() -> Result<(), u64> {
    let now_ms = now().as_millis() as u64;
    GLOBAL_REQUESTS.lock().await.check(now_ms)
}
