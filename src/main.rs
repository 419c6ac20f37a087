use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use imgproxy_url::logging::{init_subscriber, LogFormat};
use imgproxy_url::{ProxyConfig, ProxyParams, UrlBuilder};
use std::path::PathBuf;

/// imgproxy URL builder - encode, sign and decode image proxy URLs
#[derive(Parser, Debug)]
#[command(name = "imgproxy-url")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults to IMGPROXY_* environment variables)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log output format (json or pretty)
    #[arg(long, default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a proxy URL for an image
    Build {
        /// Image reference (path or absolute URL)
        image: String,

        /// Transformation option as name=value, e.g. -p width=300 -p format=webp
        #[arg(short, long = "param")]
        params: Vec<String>,

        /// Build an unsigned URL even when a key and salt are configured
        #[arg(long)]
        no_sign: bool,
    },
    /// Verify a proxy URL and print its decoded options
    Decode {
        /// Full proxy URL
        url: String,
    },
    /// Validate the configuration and exit
    Check,
}

fn load_config(path: Option<&PathBuf>) -> Result<ProxyConfig> {
    match path {
        Some(path) => ProxyConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => ProxyConfig::from_env().context("Failed to load configuration from environment"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_subscriber(args.log_format)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logging subsystem")?;

    let config = load_config(args.config.as_ref())?;
    let builder = UrlBuilder::new(&config).context("Invalid imgproxy configuration")?;

    tracing::debug!(
        base_url = %builder.base_url(),
        signing_enabled = builder.signing_enabled(),
        "Configuration loaded successfully"
    );

    match args.command {
        Command::Build {
            image,
            params,
            no_sign,
        } => {
            let params = params
                .iter()
                .map(String::as_str)
                .map(ProxyParams::parse_assignment)
                .collect::<imgproxy_url::Result<ProxyParams>>()
                .context("Invalid transformation option")?;

            println!("{}", builder.build_url(&image, &params, !no_sign));
        }
        Command::Decode { url } => {
            let decoded = builder.verify_url(&url).context("Failed to decode URL")?;
            for (option, value) in &decoded.segments {
                println!("{}:{}\t({})", option.code(), value, option);
            }
            println!("{}", decoded.image);
        }
        Command::Check => {
            println!(
                "base_url: {}\nsigning: {}",
                builder.base_url(),
                if builder.signing_enabled() {
                    "enabled"
                } else {
                    "disabled"
                }
            );
        }
    }

    Ok(())
}
