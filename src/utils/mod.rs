pub mod table;
pub mod errors;
pub mod ratelimit;

pub use table::Table;
pub use errors::user_message;
pub use ratelimit::{check_cooldown, check_global_rate_limit, configure_cooldown};
