use clap::Parser;
use anyhow::Result;
use dotenvy::dotenv;

mod error;
mod feed;
mod output;
mod telemetry;
mod util;

use output::config::OutputConfig;

#[derive(Parser)]
#[command(name = "feedgen", about = "Generate an RSS 2.0 feed from a JSON item list")]
struct Cli {
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Pretty-print the envelope
    #[arg(long, default_value_t = false)]
    pretty: bool,

    #[command(flatten)]
    feed: feed::FeedCmd,
}

fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    // initialize logging/tracing (stderr). Respect RUST_LOG and FEEDGEN_LOG_FORMAT
    telemetry::config::init_tracing();

    let out = OutputConfig::from_flags(cli.json, cli.pretty);
    feed::run(cli.feed, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_use_working_directory_defaults() {
        let cli = Cli::try_parse_from(["feedgen"]).unwrap();
        assert_eq!(cli.feed.input, std::path::PathBuf::from("items.json"));
        assert_eq!(cli.feed.output, std::path::PathBuf::from("feed.xml"));
        assert!(!cli.feed.dry_run);
        assert!(!cli.json);
    }

    #[test]
    fn flags_override_paths() {
        let cli = Cli::try_parse_from(["feedgen", "-i", "data/in.json", "--output", "public/rss.xml", "--dry-run", "--json"]).unwrap();
        assert_eq!(cli.feed.input, std::path::PathBuf::from("data/in.json"));
        assert_eq!(cli.feed.output, std::path::PathBuf::from("public/rss.xml"));
        assert!(cli.feed.dry_run);
        assert_eq!(OutputConfig::from_flags(cli.json, cli.pretty).format, output::config::OutputFormat::Json);
    }
}
