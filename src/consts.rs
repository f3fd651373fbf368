//! Project-wide constants.

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Default chat model when none is specified.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o";

/// Default port, matching what the browser client expects.
pub const DEFAULT_PORT: u16 = 5000;

pub const DEFAULT_HOST: &str = "127.0.0.1";

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Upper bound on the number of competitors returned for one website.
pub const MAX_COMPETITORS: usize = 10;

/// Synthesized traffic values fall in `[0, TRAFFIC_CEILING)`.
pub const TRAFFIC_CEILING: u64 = 100_000;

/// Per-competitor enrichment timeout, in seconds.
pub const DEFAULT_ENRICH_TIMEOUT_SECS: u64 = 15;

/// Timeout applied to every outbound provider request, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

pub const OPENROUTER_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const SERPER_KEY_VAR: &str = "SERPER_API_KEY";

/// Abbreviate a number for display (e.g. 12,345 → "12.3K", 1,250,000 → "1.3M").
///
/// Halves round up, so 1,250,000 reads as "1.3M" rather than "1.2M".
pub fn format_number(n: u64) -> String {
    let (unit, suffix) = if n >= 1_000_000 {
        (1_000_000, "M")
    } else if n >= 1_000 {
        (1_000, "K")
    } else {
        return n.to_string();
    };
    let step = unit / 10;
    let tenths = n / step + u64::from(n % step >= step / 2);
    format!("{}.{}{}", tenths / 10, tenths % 10, suffix)
}
