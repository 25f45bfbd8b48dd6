/// Timezone every "same day" comparison is made in.
pub const DEFAULT_TIMEZONE: &str = "Europe/Madrid";

/// Safety ceiling for occurrences generated from one recurring event (about 5 years weekly).
pub const MAX_OCCURRENCES: u16 = 260;

pub const DEFAULT_API_BASE_URL: &str = "https://nyx-club-back.onrender.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

/// Number of upcoming events highlighted on the home page.
pub const FEATURED_COUNT: usize = 2;
