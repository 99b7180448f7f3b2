use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use feedgen::config::Config;
use feedgen::rss::{self, TextStyle};

/// Get the config directory path (~/.config/feedgen/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("feedgen"))
}

#[derive(Parser, Debug)]
#[command(name = "feedgen", about = "Render a feed description as RSS 2.0")]
struct Args {
    /// Feed description (JSON if it ends in .json, TOML otherwise)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Write the feed here instead of stdout (atomic replace)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Config file (default: ~/.config/feedgen/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Wrap item titles and descriptions in CDATA
    #[arg(long)]
    encoded: bool,

    /// Sort items newest first before rendering
    #[arg(long)]
    sort: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the feed
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config: {}", config_path.display()))?;
    if args.encoded {
        config.text_style = TextStyle::Encoded;
    }

    let mut feed = feedgen::input::load_feed(&args.input)
        .with_context(|| format!("Failed to load feed: {}", args.input.display()))?;
    if feed.items.is_empty() {
        tracing::warn!(path = %args.input.display(), "Feed has no items");
    }
    if args.sort {
        // Items without any timestamp sink to the end
        feed.sort_items(|a, b| b.created.or(b.updated).cmp(&a.created.or(a.updated)));
    }

    let doc = rss::build_document(&feed, &config);

    match &args.output {
        Some(path) => {
            rss::export_to_file(&doc, path, config.indent)?;
            eprintln!(
                "Wrote {} items to {}",
                doc.channel.items.len(),
                path.display()
            );
        }
        None => {
            let xml = rss::to_xml_string(&doc, config.indent)
                .context("Failed to render RSS document")?;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", xml).context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
