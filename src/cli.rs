use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "instagrab")]
#[command(about = "Scrape publicly visible posts from an Instagram profile", long_about = None)]
pub struct Cli {
    /// Instagram username to scrape
    #[arg(short, long)]
    pub username: String,

    /// Navigation timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Enable verbose logging and debug artifact dumps
    #[arg(long, default_value = "false")]
    pub debug: bool,

    /// Proxy URL, scheme://[user:pass@]host:port (http(s) or socks5);
    /// falls back to the PROXY_URL environment variable
    #[arg(long)]
    pub proxy: Option<String>,

    /// Run with a visible browser window instead of headless
    #[arg(long, default_value = "false")]
    pub no_headless: bool,
}

impl Cli {
    /// Proxy URL from the flag or the environment, flag winning.
    pub fn proxy_url(&self) -> Option<String> {
        self.proxy
            .clone()
            .or_else(|| std::env::var("PROXY_URL").ok().filter(|v| !v.is_empty()))
    }
}
