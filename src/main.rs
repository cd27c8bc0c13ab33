use apas::{config, generate, output, scan, server};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "apas")]
#[command(about = "Catalog site for APAS decorative art")]
#[command(long_about = "\
Catalog site for APAS decorative art

Serves a single page with a hero banner, a searchable catalog with tag
filters and a detail view, and an install guide. The catalog is read from
the site directory on every request.

Site structure:

  site/
  ├── config.toml                  # Site config (optional)
  └── public/                      # Served as-is at /
      ├── catalog-config.json      # Metadata keyed by image filename
      ├── cuadros/                 # Catalog images (.jpg .jpeg .png .webp)
      │   ├── 001.jpg
      │   └── 001-detalle.jpg      # Listed in 001.jpg's \"images\" for the carousel
      ├── hero/                    # Hero backgrounds
      ├── como-colocar/            # Install guide illustrations
      └── logo.png

Metadata resolution (first available wins):
  Title:       metadata \"title\" → filename without extension
  Description: metadata \"description\" → catalog.placeholder_description

Run 'apas gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the site over HTTP
    Serve {
        /// Address to bind (overrides server.bind in config.toml)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Write a static snapshot of the landing page
    Build {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Load the catalog and print what would be shown
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Serve { bind } => {
            let state = server::AppState::load(&cli.root)?;
            let bind = bind.unwrap_or_else(|| state.config.server.bind.clone());
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(state, &bind))?;
        }
        Command::Build { output: out_dir } => {
            let site_config = config::load_config(&cli.root)?;
            println!("==> Building {} → {}", cli.root.display(), out_dir.display());
            let report = generate::build_site(&cli.root, &site_config, &out_dir)?;
            output::print_build_output(&report);
        }
        Command::Check => {
            let site_config = config::load_config(&cli.root)?;
            println!("==> Checking {}", cli.root.display());
            let catalog = scan::load_catalog(&cli.root, &site_config)?;
            output::print_check_output(&catalog, &site_config);
            println!("==> Site is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
