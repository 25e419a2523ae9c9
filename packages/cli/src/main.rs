#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line dashboard over the crime insights reference snapshot.
//!
//! ```text
//! crime_insights trends [--window all|last10|last5]
//! crime_insights overview
//! crime_insights models
//! crime_insights predict --model nb --arrest true --location retail
//! crime_insights clusters [--id 3]
//! crime_insights alerts
//! crime_insights rules
//! crime_insights validate
//! ```
//!
//! Running with no subcommand enters interactive mode.
//!
//! Settings come from an optional TOML file (`--config`), then the
//! `CRIME_INSIGHTS_*` environment variables, then the flags below.

mod interactive;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crime_insights_analytics_models::WindowToken;
use crime_insights_cli_utils::MultiProgress;
use crime_insights_dashboard::{Dashboard, DashboardConfig, Tab};
use crime_insights_dataset::validate;
use crime_insights_prediction_models::RawPredictionInput;

#[derive(Parser)]
#[command(
    name = "crime_insights",
    about = "Explore the crime insights reference snapshot"
)]
struct Cli {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reference dataset TOML to use instead of the embedded snapshot
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Simulated model latency in milliseconds
    #[arg(long)]
    latency_ms: Option<u64>,

    /// Print JSON instead of tables where supported
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show yearly incidents and arrests for a time window
    Trends {
        /// Window token (all, last10, last5; legacy 10yr and 5yr accepted)
        #[arg(long, default_value = "all")]
        window: String,
    },
    /// Show the headline overview figures
    Overview,
    /// Compare model metrics
    Models,
    /// Run a simulated prediction
    Predict {
        /// Model id (decisionTree, naiveBayes, svc; dt and nb accepted)
        #[arg(long, default_value = "naiveBayes")]
        model: String,
        /// Whether an arrest was made (true or false)
        #[arg(long, default_value = "false")]
        arrest: String,
        /// Location (street, residence, retail)
        #[arg(long, default_value = "street")]
        location: String,
    },
    /// List hotspot clusters, or show one in detail
    Clusters {
        /// Cluster to show in detail
        #[arg(long)]
        id: Option<u32>,
    },
    /// Show the recent-activity feed
    Alerts,
    /// Show association rules between crime types
    Rules,
    /// Check the dataset for inconsistencies
    Validate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = crime_insights_cli_utils::init_logger();
    let cli = Cli::parse();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(latency_ms) = cli.latency_ms {
        config.latency_ms = latency_ms;
    }
    if let Some(dataset) = cli.dataset {
        config.dataset_path = Some(dataset);
    }
    log::debug!("Using config: {config:?}");

    let dashboard = Dashboard::load(&config)?;

    let Some(command) = cli.command else {
        return interactive::run(&dashboard, &multi).await;
    };

    match command {
        Commands::Trends { window } => {
            dashboard.select_tab(Tab::Dashboard);
            dashboard.select_window(WindowToken::parse_or_default(&window));
            let summary = dashboard.window_summary();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render::trends(&dashboard.visible_series(), &summary));
                print_distribution_cards(&dashboard);
            }
        }
        Commands::Overview => {
            let metrics = dashboard.overview();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&metrics)?);
            } else {
                print!("{}", render::overview(&metrics, dashboard.dataset()));
            }
        }
        Commands::Models => {
            let models = &dashboard.dataset().models;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(models)?);
            } else {
                print!("{}", render::models(models));
            }
        }
        Commands::Predict {
            model,
            arrest,
            location,
        } => {
            let raw = RawPredictionInput {
                arrest_made: arrest,
                location,
            };
            let (model, inputs) = match crime_insights_prediction::parse_request(&model, &raw) {
                Ok(parsed) => parsed,
                Err(e) => {
                    eprintln!("Prediction unavailable: {e}");
                    std::process::exit(1);
                }
            };

            dashboard.select_tab(Tab::Models);
            dashboard.select_model(model);
            dashboard.set_inputs(inputs);
            predict(&dashboard, &multi, cli.json).await?;
        }
        Commands::Clusters { id } => {
            dashboard.select_tab(Tab::Geo);

            if let Some(id) = id {
                dashboard.select_cluster(Some(id));
                let Some(details) = dashboard.active_cluster() else {
                    eprintln!("Cluster not found: {id}");
                    std::process::exit(1);
                };

                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&details)?);
                } else {
                    println!("{}", render::cluster_details(&details));
                }
            } else {
                print!("{}", render::clusters(&dashboard.dataset().clusters));
            }
        }
        Commands::Alerts => print!("{}", render::alerts(&dashboard.dataset().alerts)),
        Commands::Rules => print!("{}", render::rules(&dashboard.dataset().association_rules)),
        Commands::Validate => {
            let issues = validate::validate(dashboard.dataset());
            print!("{}", render::issues(&issues));
            if !issues.is_empty() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Prints the hourly, monthly and severity cards of the trend view.
fn print_distribution_cards(dashboard: &Dashboard) {
    let dataset = dashboard.dataset();
    println!();
    print!("{}", render::hourly(&dataset.hourly));
    println!();
    print!("{}", render::monthly(&dataset.monthly));
    println!();
    print!("{}", render::severity(&dataset.severity));
}

/// Runs a prediction for the dashboard's current model and inputs behind
/// a spinner, then prints the output slot.
async fn predict(
    dashboard: &Dashboard,
    multi: &MultiProgress,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let model = dashboard.state().model();
    let pb = crime_insights_cli_utils::spinner(multi, &format!("Running {model}..."));

    let stored = dashboard.run_prediction().await?;
    pb.finish_and_clear();

    if !stored {
        log::warn!("Prediction for {model} was superseded");
    }

    let state = dashboard.state();
    match (json, state.prediction()) {
        (true, crime_insights_dashboard::PredictionSlot::Ready(result)) => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        (_, slot) => println!("{}", render::prediction(slot)),
    }

    Ok(())
}
