use clap::{Parser, Subcommand};
use clinic_site::offline::RecordingServiceWorkers;
use clinic_site::page::{self, BootOptions};
use clinic_site::theme::MemoryStorage;
use clinic_site::timer::Scheduler;
use clinic_site::{config, output};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Upper bound for `snapshot --advance-ms`: one day of virtual time.
const MAX_ADVANCE_MS: u64 = 24 * 60 * 60 * 1000;

#[derive(Parser)]
#[command(name = "clinic-site")]
#[command(about = "Content and page behaviors for a clinic landing page")]
#[command(long_about = "\
Content and page behaviors for a clinic landing page

All dynamic content comes from one JSON file:

  config.json
  ├── about.biography          # Biography paragraphs
  ├── service_areas[]          # Cards: title, description, icon_svg
  ├── clinic.description       # Clinic paragraphs
  ├── clinic.photos[]          # Carousel images, in display order
  ├── carousel                 # interval_ms, fallback_image
  ├── animation                # Card reveal timing
  └── offline                  # Service worker script

Run 'clinic-site gen-config' to print a complete sample config.json.")]
#[command(version)]
struct Cli {
    /// Site config file
    #[arg(long, default_value = "config.json", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the config and print its content inventory
    Check,
    /// Load the page in memory and print its state and markup
    Snapshot {
        /// Virtual time to let pass after load, in milliseconds (at most one day)
        #[arg(
            long,
            default_value_t = 0,
            value_parser = clap::value_parser!(u64).range(..=MAX_ADVANCE_MS)
        )]
        advance_ms: u64,
        /// Load as if the system prefers a dark color scheme
        #[arg(long)]
        dark: bool,
    },
    /// Print a sample config.json with every option
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clinic_site=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let site_config = config::load_config(&cli.config)?;
            output::print_config_summary(&site_config);
            println!("==> Config is valid");
        }
        Command::Snapshot { advance_ms, dark } => {
            let mut doc = page::skeleton();
            let mut scheduler = Scheduler::new();
            let mut service_workers = RecordingServiceWorkers::default();
            let options = BootOptions {
                storage: Rc::new(RefCell::new(MemoryStorage::default())),
                prefers_dark: dark,
                service_workers: Some(&mut service_workers),
            };
            let site = page::boot(
                &mut doc,
                &mut scheduler,
                config::load_config(&cli.config),
                options,
            );
            scheduler.advance(&mut doc, advance_ms);
            output::print_page_state(&site, advance_ms);
            println!();
            println!("{}", doc.snapshot().into_string());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_json());
        }
    }

    Ok(())
}
