use clap::Parser;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "friend-card")]
#[command(about = "Friend link card renderer with per-client rate limiting")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Rate limit max requests per client per window
    #[arg(long, env = "RATE_LIMIT", default_value_t = 500)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, env = "RATE_WINDOW", value_parser = clap::value_parser!(u64).range(1..), default_value_t = 3600)]
    pub rate_window: u64,

    // Tracked clients before sweeps start evicting
    #[arg(long, env = "MAX_RECORDS", default_value_t = 10_000)]
    pub max_records: usize,

    // Sweep interval in seconds
    #[arg(long, env = "SWEEP_INTERVAL", value_parser = clap::value_parser!(u64).range(1..), default_value_t = 60)]
    pub sweep_interval: u64,

    // Header carrying the client address, set by the edge proxy
    #[arg(long, env = "CLIENT_IP_HEADER", default_value = "cf-connecting-ip")]
    pub client_ip_header: String,

    // Avatar fetch timeout in seconds (svg only)
    #[arg(long, env = "AVATAR_TIMEOUT", value_parser = clap::value_parser!(u64).range(1..), default_value_t = 5)]
    pub avatar_timeout: u64,

    // Largest avatar body inlined into an svg card, in bytes
    #[arg(long, env = "AVATAR_MAX_BYTES", value_parser = clap::value_parser!(u64).range(1..), default_value_t = 1024 * 1024)]
    pub avatar_max_bytes: u64,

    // Skip fetching avatars for svg cards, always inline the placeholder
    #[arg(long, env = "NO_INLINE_AVATARS")]
    pub no_inline_avatars: bool,
}
