use crate::app::actions::{AnalysisActions, FetchOutcome};
use chrono::{DateTime, Local};
use mena_energy_tracker::domain::{AnalysisResult, EnergyRecord};
use mena_energy_tracker::{LoadEvent, LoadMachine, LoadPhase};
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;

/// Spinner frame interval while an analysis is loading
const THROBBER_TICK: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTab {
    Generation,
    Emissions,
    Mix,
}

impl ChartTab {
    pub const ALL: [Self; 3] = [Self::Generation, Self::Emissions, Self::Mix];

    pub const fn index(self) -> usize {
        match self {
            Self::Generation => 0,
            Self::Emissions => 1,
            Self::Mix => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Generation => "Generation (TWh)",
            Self::Emissions => "CO2 Emissions (Mt)",
            Self::Mix => "Energy Mix (%)",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Generation => Self::Emissions,
            Self::Emissions => Self::Mix,
            Self::Mix => Self::Generation,
        }
    }

    pub const fn previous(self) -> Self {
        match self {
            Self::Generation => Self::Mix,
            Self::Emissions => Self::Generation,
            Self::Mix => Self::Emissions,
        }
    }
}

pub struct App {
    pub running: bool,
    pub load: LoadMachine,
    pub actions: AnalysisActions,
    pub model: String,
    pub show_help: bool,
    pub chart_tab: ChartTab,
    pub selected_country: usize,
    pub status_message: String,
    pub last_updated: Option<DateTime<Local>>,
    pub throbber_state: ThrobberState,
    pub last_tick: Instant,
}

impl App {
    pub fn new(actions: AnalysisActions, model: String) -> Self {
        Self {
            running: true,
            load: LoadMachine::new(),
            actions,
            model,
            show_help: false,
            chart_tab: ChartTab::Generation,
            selected_country: 0,
            status_message: String::new(),
            last_updated: None,
            throbber_state: ThrobberState::default(),
            last_tick: Instant::now(),
        }
    }

    pub fn update(&mut self) {
        if self.last_tick.elapsed() < THROBBER_TICK {
            return;
        }
        self.last_tick = Instant::now();

        if matches!(self.load.phase(), LoadPhase::Idle | LoadPhase::Loading) {
            self.throbber_state.calc_next();
        }
    }

    /// First display: kick off the initial analysis.
    pub fn start(&mut self) {
        self.begin(LoadEvent::Mount);
    }

    /// User-triggered refresh; ignored while a request is in flight.
    pub fn refresh(&mut self) {
        if self.load.is_loading() {
            self.status_message = "Analysis already in progress".to_string();
            return;
        }
        self.begin(LoadEvent::Refresh);
    }

    fn begin(&mut self, trigger: LoadEvent) {
        match self.load.process(trigger) {
            Ok(()) => {
                self.actions.spawn_fetch();
                self.status_message = "Requesting analysis...".to_string();
            }
            Err(e) => {
                tracing::debug!(error = %e, "load trigger ignored");
            }
        }
    }

    /// Apply the outcome of the request started by `start` or `refresh`.
    pub fn complete(&mut self, outcome: FetchOutcome) {
        if let Err(e) = self.load.process(LoadEvent::from(outcome)) {
            tracing::warn!(error = %e, "dropping analysis outcome");
            return;
        }

        match self.load.result() {
            Some(result) => {
                self.last_updated = Some(Local::now());
                if self.selected_country >= result.data.len() {
                    self.selected_country = 0;
                }
                self.status_message = format!(
                    "Analysis ready: {} countries, period {}",
                    result.data.len(),
                    result.generated_at
                );
            }
            None => {
                self.status_message = "Analysis failed. Press r to retry.".to_string();
            }
        }
    }

    pub const fn result(&self) -> Option<&AnalysisResult> {
        self.load.result()
    }

    pub fn selected_record(&self) -> Option<&EnergyRecord> {
        self.result()
            .and_then(|result| result.data.get(self.selected_country))
    }

    fn country_count(&self) -> usize {
        self.result().map_or(0, |result| result.data.len())
    }

    pub fn select_next_country(&mut self) {
        let count = self.country_count();
        if count > 0 {
            self.selected_country = (self.selected_country + 1) % count;
        }
    }

    pub fn select_previous_country(&mut self) {
        let count = self.country_count();
        if count > 0 {
            self.selected_country = (self.selected_country + count - 1) % count;
        }
    }
}
