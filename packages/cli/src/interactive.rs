//! Menu-driven dashboard using `dialoguer`.
//!
//! Mirrors the three dashboard views. Each pass through the loop picks a
//! view, applies the user's selections to the [`Dashboard`] and prints the
//! result, until the user quits.

use crime_insights_analytics_models::WindowToken;
use crime_insights_cli_utils::MultiProgress;
use crime_insights_dashboard::{Dashboard, Tab};
use crime_insights_dataset_models::ModelId;
use crime_insights_prediction_models::{Location, PredictionInput};
use dialoguer::{Confirm, Select};

use crate::render;

/// Entries of the top-level menu.
enum MenuItem {
    View(Tab),
    Quit,
}

impl MenuItem {
    const ALL: &[Self] = &[
        Self::View(Tab::Dashboard),
        Self::View(Tab::Geo),
        Self::View(Tab::Models),
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::View(tab) => tab.label(),
            Self::Quit => "Quit",
        }
    }
}

/// Runs the interactive dashboard until the user quits.
///
/// # Errors
///
/// Returns an error if a prompt fails or a prediction task panics.
pub async fn run(
    dashboard: &Dashboard,
    multi: &MultiProgress,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Crime Insights");
    println!();

    let labels: Vec<&str> = MenuItem::ALL.iter().map(MenuItem::label).collect();

    loop {
        let current = dashboard.state().tab();
        let default = Tab::all().iter().position(|t| *t == current).unwrap_or(0);

        let idx = Select::new()
            .with_prompt("View")
            .items(&labels)
            .default(default)
            .interact()?;

        match &MenuItem::ALL[idx] {
            MenuItem::View(tab) => {
                dashboard.select_tab(*tab);
                match tab {
                    Tab::Dashboard => handle_dashboard(dashboard)?,
                    Tab::Geo => handle_geo(dashboard)?,
                    Tab::Models => handle_models(dashboard, multi).await?,
                }
            }
            MenuItem::Quit => break,
        }

        println!();
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Prompts for a window and prints the trend view.
fn handle_dashboard(dashboard: &Dashboard) -> Result<(), Box<dyn std::error::Error>> {
    let labels: Vec<&str> = WindowToken::all().iter().map(|w| w.label()).collect();
    let current = dashboard.state().window();
    let default = WindowToken::all()
        .iter()
        .position(|w| *w == current)
        .unwrap_or(0);

    let idx = Select::new()
        .with_prompt("Time window")
        .items(&labels)
        .default(default)
        .interact()?;
    dashboard.select_window(WindowToken::all()[idx]);

    println!();
    print!("{}", render::overview(&dashboard.overview(), dashboard.dataset()));
    println!();
    print!(
        "{}",
        render::trends(&dashboard.visible_series(), &dashboard.window_summary())
    );
    crate::print_distribution_cards(dashboard);
    println!();
    println!("Recent activity:");
    print!("{}", render::alerts(&dashboard.dataset().alerts));

    Ok(())
}

/// Prompts for a cluster and prints its details.
fn handle_geo(dashboard: &Dashboard) -> Result<(), Box<dyn std::error::Error>> {
    let clusters = &dashboard.dataset().clusters;
    if clusters.is_empty() {
        println!("No clusters in this dataset.");
        return Ok(());
    }

    print!("{}", render::clusters(clusters));

    let labels: Vec<String> = clusters
        .iter()
        .map(|c| format!("{} ({} incidents)", c.label, c.size))
        .collect();

    let idx = Select::new()
        .with_prompt("Cluster")
        .items(&labels)
        .default(0)
        .interact()?;
    dashboard.select_cluster(Some(clusters[idx].id));

    if let Some(details) = dashboard.active_cluster() {
        println!();
        println!("{}", render::cluster_details(&details));
    }

    Ok(())
}

/// Prompts for a model and inputs, then runs a prediction.
async fn handle_models(
    dashboard: &Dashboard,
    multi: &MultiProgress,
) -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", render::models(&dashboard.dataset().models));
    println!();

    let state = dashboard.state();

    let model_labels: Vec<String> = ModelId::all()
        .iter()
        .map(|id| {
            dashboard
                .dataset()
                .models
                .iter()
                .find(|m| m.id == *id)
                .map_or_else(|| id.to_string(), |m| m.display_name.clone())
        })
        .collect();
    let default = ModelId::all()
        .iter()
        .position(|m| *m == state.model())
        .unwrap_or(0);
    let idx = Select::new()
        .with_prompt("Model")
        .items(&model_labels)
        .default(default)
        .interact()?;
    let model = ModelId::all()[idx];
    if model != state.model() {
        dashboard.select_model(model);
    }

    let arrest_made = Confirm::new()
        .with_prompt("Arrest made?")
        .default(state.inputs().arrest_made)
        .interact()?;

    let location_labels: Vec<&str> = Location::all().iter().map(|l| l.label()).collect();
    let default = Location::all()
        .iter()
        .position(|l| *l == state.inputs().location)
        .unwrap_or(0);
    let idx = Select::new()
        .with_prompt("Location")
        .items(&location_labels)
        .default(default)
        .interact()?;

    dashboard.set_inputs(PredictionInput {
        arrest_made,
        location: Location::all()[idx],
    });

    if !Confirm::new()
        .with_prompt("Run model?")
        .default(true)
        .interact()?
    {
        println!("{}", render::prediction(dashboard.state().prediction()));
        return Ok(());
    }

    crate::predict(dashboard, multi, false).await
}
