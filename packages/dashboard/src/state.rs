//! Dashboard interaction state.
//!
//! [`DashboardState`] is the only place the dashboard's mutable selections
//! live. It changes only through the named transition methods below; the
//! analytics and prediction crates never see it and receive its values as
//! plain arguments instead.

use crime_insights_analytics_models::WindowToken;
use crime_insights_dataset_models::ModelId;
use crime_insights_prediction::PredictionError;
use crime_insights_prediction_models::{Location, PredictionInput, PredictionResult};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Dashboard view.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tab {
    /// Trend dashboard.
    #[default]
    Dashboard,
    /// Geospatial cluster explorer.
    Geo,
    /// Model comparison and prediction lab.
    Models,
}

impl Tab {
    /// Returns all variants in navigation order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Dashboard, Self::Geo, Self::Models]
    }

    /// Navigation label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Overview",
            Self::Geo => "Geospatial Map",
            Self::Models => "Models & AI",
        }
    }
}

/// The prediction lab's output slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PredictionSlot {
    /// Nothing has been run for the selected model.
    #[default]
    Idle,
    /// A run is in flight.
    Pending,
    /// The latest run finished.
    Ready(PredictionResult),
    /// The latest run failed.
    Unavailable(PredictionError),
}

/// Identifies one prediction run.
///
/// Only the ticket from the most recent [`DashboardState::begin_prediction`]
/// may complete; every other ticket is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionTicket {
    /// Request generation the run belongs to.
    pub generation: u64,
    /// Model selected when the run started.
    pub model: ModelId,
    /// Inputs captured when the run started.
    pub inputs: PredictionInput,
}

/// All mutable dashboard selections.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    tab: Tab,
    window: WindowToken,
    model: ModelId,
    inputs: PredictionInput,
    prediction: PredictionSlot,
    generation: u64,
    active_cluster: Option<u32>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            tab: Tab::default(),
            window: WindowToken::default(),
            model: ModelId::NaiveBayes,
            inputs: PredictionInput::default(),
            prediction: PredictionSlot::Idle,
            generation: 0,
            active_cluster: None,
        }
    }
}

impl DashboardState {
    /// Current view.
    #[must_use]
    pub const fn tab(&self) -> Tab {
        self.tab
    }

    /// Selected time window.
    #[must_use]
    pub const fn window(&self) -> WindowToken {
        self.window
    }

    /// Selected model.
    #[must_use]
    pub const fn model(&self) -> ModelId {
        self.model
    }

    /// Current prediction inputs.
    #[must_use]
    pub const fn inputs(&self) -> PredictionInput {
        self.inputs
    }

    /// Prediction output slot.
    #[must_use]
    pub const fn prediction(&self) -> &PredictionSlot {
        &self.prediction
    }

    /// Whether a prediction run is in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.prediction, PredictionSlot::Pending)
    }

    /// Current request generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Cluster highlighted in the explorer.
    #[must_use]
    pub const fn active_cluster(&self) -> Option<u32> {
        self.active_cluster
    }

    /// Switches view.
    pub fn select_tab(&mut self, tab: Tab) {
        log::debug!("select_tab: {} -> {tab}", self.tab);
        self.tab = tab;
    }

    /// Changes the trend window.
    pub fn select_window(&mut self, window: WindowToken) {
        log::debug!("select_window: {} -> {window}", self.window);
        self.window = window;
    }

    /// Selects a model.
    ///
    /// Clears any displayed or pending prediction and invalidates every
    /// outstanding ticket, even when the same model is selected again.
    pub fn select_model(&mut self, model: ModelId) {
        log::debug!("select_model: {} -> {model}", self.model);
        self.model = model;
        self.generation += 1;
        self.prediction = PredictionSlot::Idle;
    }

    /// Sets the arrest input.
    pub const fn set_arrest_made(&mut self, arrest_made: bool) {
        self.inputs.arrest_made = arrest_made;
    }

    /// Sets the location input.
    pub const fn set_location(&mut self, location: Location) {
        self.inputs.location = location;
    }

    /// Replaces all prediction inputs.
    pub const fn set_inputs(&mut self, inputs: PredictionInput) {
        self.inputs = inputs;
    }

    /// Highlights a cluster, or clears the highlight with `None`.
    pub const fn select_cluster(&mut self, cluster: Option<u32>) {
        self.active_cluster = cluster;
    }

    /// Starts a prediction run for the current model and inputs.
    ///
    /// Marks the slot pending and returns the ticket the run must present
    /// to [`Self::complete_prediction`]. Any earlier ticket becomes stale.
    pub fn begin_prediction(&mut self) -> PredictionTicket {
        self.generation += 1;
        self.prediction = PredictionSlot::Pending;

        log::debug!(
            "begin_prediction: generation={} model={}",
            self.generation,
            self.model
        );

        PredictionTicket {
            generation: self.generation,
            model: self.model,
            inputs: self.inputs,
        }
    }

    /// Completes a prediction run.
    ///
    /// Returns `true` if the outcome was stored. Stale tickets are ignored
    /// and leave the slot untouched.
    pub fn complete_prediction(
        &mut self,
        ticket: &PredictionTicket,
        outcome: Result<PredictionResult, PredictionError>,
    ) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "Discarding stale prediction (generation {}, current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }

        self.prediction = match outcome {
            Ok(result) => PredictionSlot::Ready(result),
            Err(e) => {
                log::warn!("Prediction unavailable: {e}");
                PredictionSlot::Unavailable(e)
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(label: &str, confidence: f64) -> PredictionResult {
        PredictionResult {
            model: ModelId::NaiveBayes,
            label: label.to_string(),
            confidence,
            raw_confidence: confidence,
        }
    }

    #[test]
    fn initial_state_matches_the_dashboard_defaults() {
        let state = DashboardState::default();

        assert_eq!(state.tab(), Tab::Dashboard);
        assert_eq!(state.window(), WindowToken::All);
        assert_eq!(state.model(), ModelId::NaiveBayes);
        assert_eq!(state.inputs(), PredictionInput::default());
        assert_eq!(state.prediction(), &PredictionSlot::Idle);
        assert_eq!(state.active_cluster(), None);
    }

    #[test]
    fn completing_the_current_ticket_stores_the_result() {
        let mut state = DashboardState::default();
        let ticket = state.begin_prediction();
        assert!(state.is_pending());

        assert!(state.complete_prediction(&ticket, Ok(result("Theft", 65.5))));
        assert_eq!(state.prediction(), &PredictionSlot::Ready(result("Theft", 65.5)));
        assert!(!state.is_pending());
    }

    #[test]
    fn stale_ticket_never_overwrites_a_later_run() {
        let mut state = DashboardState::default();
        let first = state.begin_prediction();
        let second = state.begin_prediction();

        assert!(state.complete_prediction(&second, Ok(result("Domestic", 61.5))));
        assert!(!state.complete_prediction(&first, Ok(result("Theft", 65.5))));

        assert_eq!(
            state.prediction(),
            &PredictionSlot::Ready(result("Domestic", 61.5))
        );
    }

    #[test]
    fn stale_ticket_does_not_resolve_a_pending_later_run() {
        let mut state = DashboardState::default();
        let first = state.begin_prediction();
        let _second = state.begin_prediction();

        assert!(!state.complete_prediction(&first, Ok(result("Theft", 65.5))));
        assert!(state.is_pending());
    }

    #[test]
    fn selecting_a_model_clears_a_displayed_result() {
        let mut state = DashboardState::default();
        let ticket = state.begin_prediction();
        state.complete_prediction(&ticket, Ok(result("Theft", 65.5)));

        state.select_model(ModelId::Svc);

        assert_eq!(state.model(), ModelId::Svc);
        assert_eq!(state.prediction(), &PredictionSlot::Idle);
    }

    #[test]
    fn selecting_a_model_invalidates_pending_runs() {
        let mut state = DashboardState::default();
        let ticket = state.begin_prediction();

        state.select_model(ModelId::DecisionTree);

        assert_eq!(state.prediction(), &PredictionSlot::Idle);
        assert!(!state.complete_prediction(&ticket, Ok(result("Theft", 65.5))));
        assert_eq!(state.prediction(), &PredictionSlot::Idle);
    }

    #[test]
    fn ticket_captures_model_and_inputs_at_start() {
        let mut state = DashboardState::default();
        state.set_arrest_made(true);
        state.set_location(Location::Retail);

        let ticket = state.begin_prediction();
        state.set_location(Location::Street);

        assert_eq!(ticket.model, ModelId::NaiveBayes);
        assert_eq!(
            ticket.inputs,
            PredictionInput {
                arrest_made: true,
                location: Location::Retail,
            }
        );
    }

    #[test]
    fn failed_run_marks_prediction_unavailable() {
        let mut state = DashboardState::default();
        let ticket = state.begin_prediction();
        let err = PredictionError::UnknownModel {
            model: "naiveBayes".to_string(),
        };

        assert!(state.complete_prediction(&ticket, Err(err.clone())));
        assert_eq!(state.prediction(), &PredictionSlot::Unavailable(err));
    }

    #[test]
    fn view_transitions_do_not_touch_the_prediction() {
        let mut state = DashboardState::default();
        let ticket = state.begin_prediction();
        state.complete_prediction(&ticket, Ok(result("Battery", 53.5)));

        state.select_tab(Tab::Geo);
        state.select_window(WindowToken::Last5);
        state.select_cluster(Some(3));
        state.set_inputs(PredictionInput {
            arrest_made: true,
            location: Location::Residence,
        });

        assert_eq!(state.tab(), Tab::Geo);
        assert_eq!(state.window(), WindowToken::Last5);
        assert_eq!(state.active_cluster(), Some(3));
        assert_eq!(
            state.prediction(),
            &PredictionSlot::Ready(result("Battery", 53.5))
        );
    }
}
