#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Top-level dashboard controller.
//!
//! [`Dashboard`] owns the injected reference dataset and the single
//! [`DashboardState`]. Views read derived values through it and user
//! actions go through its transition methods.
//!
//! Prediction runs are spawned as tokio tasks that sleep for the
//! configured latency before completing. Every run carries a
//! [`state::PredictionTicket`]; only the ticket of the most recent run
//! may write a result, so a slow older run can never overwrite a newer
//! one. Selecting a model clears the output slot, invalidates every
//! outstanding ticket and aborts the in-flight task.

pub mod config;
pub mod state;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crime_insights_analytics::{clusters, overview, window};
use crime_insights_analytics_models::{
    ClusterDetails, OverviewMetrics, WindowSummary, WindowToken,
};
use crime_insights_dataset_models::{ModelId, ModelMetrics, ReferenceDataset, TemporalRecord};
use crime_insights_prediction_models::PredictionInput;
use tokio::task::{AbortHandle, JoinHandle};

pub use config::{ConfigError, DashboardConfig};
pub use state::{DashboardState, PredictionSlot, Tab};

/// The dashboard controller.
pub struct Dashboard {
    dataset: Arc<ReferenceDataset>,
    latency: Duration,
    state: Arc<Mutex<DashboardState>>,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl Dashboard {
    /// Creates a dashboard over `dataset` with the initial state.
    #[must_use]
    pub fn new(dataset: ReferenceDataset, config: &DashboardConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
            latency: config.latency(),
            state: Arc::new(Mutex::new(DashboardState::default())),
            in_flight: Mutex::new(None),
        }
    }

    /// Loads the dataset named by `config` (or the embedded snapshot) and
    /// creates a dashboard over it.
    ///
    /// # Errors
    ///
    /// Returns [`crime_insights_dataset::DatasetError`] if the dataset
    /// cannot be loaded.
    pub fn load(config: &DashboardConfig) -> Result<Self, crime_insights_dataset::DatasetError> {
        let dataset = crime_insights_dataset::load(config.dataset_path.as_deref())?;
        Ok(Self::new(dataset, config))
    }

    /// The reference dataset.
    #[must_use]
    pub fn dataset(&self) -> &ReferenceDataset {
        &self.dataset
    }

    /// Simulated model latency.
    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }

    /// Returns a copy of the current state.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    #[must_use]
    pub fn state(&self) -> DashboardState {
        lock(&self.state).clone()
    }

    /// Switches view.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn select_tab(&self, tab: Tab) {
        lock(&self.state).select_tab(tab);
    }

    /// Changes the trend window.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn select_window(&self, token: WindowToken) {
        lock(&self.state).select_window(token);
    }

    /// Selects a model, clearing the prediction slot and aborting any
    /// in-flight run.
    ///
    /// # Panics
    ///
    /// Panics if a mutex is poisoned.
    pub fn select_model(&self, model: ModelId) {
        lock(&self.state).select_model(model);

        if let Some(handle) = self
            .in_flight
            .lock()
            .expect("in-flight mutex poisoned")
            .take()
        {
            handle.abort();
        }
    }

    /// Replaces the prediction inputs.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn set_inputs(&self, inputs: PredictionInput) {
        lock(&self.state).set_inputs(inputs);
    }

    /// Highlights a cluster in the explorer.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn select_cluster(&self, cluster: Option<u32>) {
        lock(&self.state).select_cluster(cluster);
    }

    /// Temporal records visible under the selected window.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    #[must_use]
    pub fn visible_series(&self) -> Vec<TemporalRecord> {
        let token = lock(&self.state).window();
        window::select(&self.dataset.temporal, token).to_vec()
    }

    /// Summary of the selected window.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    #[must_use]
    pub fn window_summary(&self) -> WindowSummary {
        let token = lock(&self.state).window();
        window::summarize(&self.dataset.temporal, token)
    }

    /// Headline overview figures.
    #[must_use]
    pub fn overview(&self) -> OverviewMetrics {
        overview::overview(&self.dataset)
    }

    /// Metrics row of the selected model, if the table has one.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    #[must_use]
    pub fn active_model(&self) -> Option<&ModelMetrics> {
        let model = lock(&self.state).model();
        crime_insights_prediction::metrics_for(&self.dataset.models, model).ok()
    }

    /// Details of the highlighted cluster.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    #[must_use]
    pub fn active_cluster(&self) -> Option<ClusterDetails> {
        let id = lock(&self.state).active_cluster()?;
        clusters::find_cluster(&self.dataset.clusters, id).map(clusters::cluster_details)
    }

    /// Starts a simulated prediction for the current model and inputs.
    ///
    /// The slot turns pending immediately. The returned task resolves to
    /// `true` if its result was stored, or `false` if a later run or a
    /// model change made it stale. A task aborted by [`Self::select_model`]
    /// resolves to a cancelled [`tokio::task::JoinError`].
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if a mutex is poisoned.
    pub fn run_prediction(&self) -> JoinHandle<bool> {
        let ticket = lock(&self.state).begin_prediction();
        let state = Arc::clone(&self.state);
        let dataset = Arc::clone(&self.dataset);
        let latency = self.latency;

        let handle = tokio::spawn(async move {
            let outcome = crime_insights_prediction::simulate(
                ticket.model,
                ticket.inputs,
                &dataset.models,
                latency,
            )
            .await;
            lock(&state).complete_prediction(&ticket, outcome)
        });

        *self.in_flight.lock().expect("in-flight mutex poisoned") = Some(handle.abort_handle());

        handle
    }
}

fn lock(state: &Mutex<DashboardState>) -> MutexGuard<'_, DashboardState> {
    state.lock().expect("dashboard state mutex poisoned")
}

#[cfg(test)]
mod tests {
    use crime_insights_prediction::PredictionError;
    use crime_insights_prediction_models::Location;

    use super::*;

    fn dashboard() -> Dashboard {
        Dashboard::new(
            crime_insights_dataset::snapshot().unwrap(),
            &DashboardConfig::default(),
        )
    }

    fn ready_label(dashboard: &Dashboard) -> Option<String> {
        match dashboard.state().prediction() {
            PredictionSlot::Ready(result) => Some(result.label.clone()),
            _ => None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn run_completes_after_latency() {
        let dashboard = dashboard();
        let start = tokio::time::Instant::now();

        let handle = dashboard.run_prediction();
        assert!(dashboard.state().is_pending());

        assert!(handle.await.unwrap());
        assert!(start.elapsed() >= Duration::from_millis(800));

        let state = dashboard.state();
        let PredictionSlot::Ready(result) = state.prediction() else {
            panic!("expected a result, got {:?}", state.prediction());
        };
        assert_eq!(result.model, ModelId::NaiveBayes);
        assert_eq!(result.label, "Battery");
        assert!((result.confidence - 53.5).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn last_triggered_run_wins() {
        let dashboard = dashboard();

        dashboard.set_inputs(PredictionInput {
            arrest_made: false,
            location: Location::Retail,
        });
        let first = dashboard.run_prediction();

        dashboard.set_inputs(PredictionInput {
            arrest_made: false,
            location: Location::Residence,
        });
        let second = dashboard.run_prediction();

        assert!(!first.await.unwrap());
        assert!(second.await.unwrap());
        assert_eq!(ready_label(&dashboard).as_deref(), Some("Domestic"));
    }

    #[tokio::test(start_paused = true)]
    async fn model_change_clears_pending_run() {
        let dashboard = dashboard();
        let handle = dashboard.run_prediction();

        dashboard.select_model(ModelId::Svc);
        assert_eq!(dashboard.state().prediction(), &PredictionSlot::Idle);

        let joined = handle.await;
        assert!(joined.unwrap_err().is_cancelled());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(dashboard.state().prediction(), &PredictionSlot::Idle);
        assert_eq!(dashboard.state().model(), ModelId::Svc);
    }

    #[tokio::test(start_paused = true)]
    async fn model_change_clears_displayed_result() {
        let dashboard = dashboard();
        assert!(dashboard.run_prediction().await.unwrap());
        assert!(ready_label(&dashboard).is_some());

        dashboard.select_model(ModelId::DecisionTree);

        assert_eq!(dashboard.state().prediction(), &PredictionSlot::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_model_row_makes_prediction_unavailable() {
        let mut dataset = crime_insights_dataset::snapshot().unwrap();
        dataset.models.retain(|m| m.id != ModelId::NaiveBayes);
        let dashboard = Dashboard::new(dataset, &DashboardConfig::default());

        assert!(dashboard.run_prediction().await.unwrap());

        assert_eq!(
            dashboard.state().prediction(),
            &PredictionSlot::Unavailable(PredictionError::UnknownModel {
                model: "naiveBayes".to_string(),
            })
        );
        assert!(dashboard.active_model().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn configured_latency_is_used() {
        let config = DashboardConfig {
            latency_ms: 50,
            dataset_path: None,
        };
        let dashboard = Dashboard::new(crime_insights_dataset::snapshot().unwrap(), &config);
        let start = tokio::time::Instant::now();

        assert!(dashboard.run_prediction().await.unwrap());

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(50));
        assert!(elapsed < Duration::from_millis(800));
    }

    #[test]
    fn window_selection_drives_visible_series() {
        let dashboard = dashboard();
        assert_eq!(dashboard.visible_series().len(), 23);

        dashboard.select_window(WindowToken::Last10);
        assert_eq!(dashboard.visible_series().len(), 11);

        dashboard.select_window(WindowToken::Last5);
        let visible = dashboard.visible_series();
        assert_eq!(visible.len(), 6);
        assert_eq!(visible.last().unwrap().year, "2022");
        assert_eq!(dashboard.window_summary().window, WindowToken::Last5);
    }

    #[test]
    fn active_model_follows_selection() {
        let dashboard = dashboard();
        assert_eq!(dashboard.active_model().unwrap().display_name, "Naive Bayes");

        dashboard.select_model(ModelId::Svc);
        assert_eq!(dashboard.active_model().unwrap().display_name, "SVC");
    }

    #[test]
    fn active_cluster_details() {
        let dashboard = dashboard();
        assert!(dashboard.active_cluster().is_none());

        dashboard.select_cluster(Some(1));
        let details = dashboard.active_cluster().unwrap();
        assert_eq!(details.dominant_crime.as_deref(), Some("Theft"));

        dashboard.select_cluster(Some(42));
        assert!(dashboard.active_cluster().is_none());
    }
}
