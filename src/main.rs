use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use chatmark::{ClassConfig, Config, Renderer};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Config picked up from the working directory when `--config` is not given.
const LOCAL_CONFIG: &str = "chatmark.toml";

#[derive(Parser)]
#[command(name = "chatmark")]
#[command(about = "Render assistant chat messages to HTML")]
struct Cli {
    /// Input message file (reads stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Escape HTML in the message before rendering
    #[arg(long)]
    escape_html: bool,

    /// Emit elements without class attributes
    #[arg(long)]
    bare: bool,
}

fn main() {
    let cli = Cli::parse();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .try_init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> chatmark::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load(Path::new(LOCAL_CONFIG)),
    };
    if cli.bare {
        config.classes = ClassConfig::empty();
        config.links.class.clear();
    }
    if cli.escape_html {
        config.escape_html = true;
    }

    let message = match cli.input.as_deref() {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let markup = Renderer::new(config).render(&message);
    tracing::debug!(bytes = markup.len(), "rendered input");

    match cli.output {
        Some(path) => fs::write(&path, markup)?,
        None => println!("{}", markup),
    }
    Ok(())
}
