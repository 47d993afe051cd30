//! The running dashboard: current inputs, update dispatch, last rendered panels.
//!
//! Each of the three inputs (marker, metric, range) is an event source. Any
//! event updates the snapshot and triggers one pipeline cycle with the values
//! of all three inputs at that moment.
//!
//! Cycles may overlap when the caller dispatches concurrently. Every cycle is
//! tagged with a sequence number when it starts; a cycle that finishes after a
//! newer one has started is discarded, so the panels always reflect the most
//! recent input change.

use chrono::{Local, NaiveDate};
use parking_lot::Mutex;
use std::fmt;
use tracing::{debug, info};

use crate::{
    Config,
    chart::Panels,
    error::DashboardError,
    model::{DashboardInputs, Location, Metric, RangeMode},
    pipeline::Pipeline,
    provider::source_from_config,
};

/// Source of "today" for the historical window.
pub type Clock = Box<dyn Fn() -> NaiveDate + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MarkerMoved(Location),
    MetricChanged(Metric),
    RangeChanged(RangeMode),
}

impl InputEvent {
    fn apply(self, inputs: &mut DashboardInputs) {
        match self {
            InputEvent::MarkerMoved(location) => inputs.location = location,
            InputEvent::MetricChanged(metric) => inputs.metric = metric,
            InputEvent::RangeChanged(range) => inputs.range = range,
        }
    }
}

#[derive(Debug)]
struct State {
    inputs: DashboardInputs,
    latest_seq: u64,
    displayed: Option<Panels>,
}

pub struct Dashboard {
    pipeline: Pipeline,
    clock: Clock,
    state: Mutex<State>,
}

impl fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("pipeline", &self.pipeline)
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    pub fn new(pipeline: Pipeline, initial: DashboardInputs) -> Self {
        Self {
            pipeline,
            clock: Box::new(|| Local::now().date_naive()),
            state: Mutex::new(State { inputs: initial, latest_seq: 0, displayed: None }),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, DashboardError> {
        let source = source_from_config(config)?;
        let pipeline = Pipeline::new(source, config.api.timezone.clone());
        let initial = config.initial_inputs();

        info!(
            location = %initial.location,
            metric = initial.metric.api_key(),
            range = initial.range.as_str(),
            "dashboard initialised"
        );

        Ok(Self::new(pipeline, initial))
    }

    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn inputs(&self) -> DashboardInputs {
        self.state.lock().inputs
    }

    /// Panels from the most recent cycle that was not superseded.
    pub fn displayed(&self) -> Option<Panels> {
        self.state.lock().displayed.clone()
    }

    /// Apply one input change and re-render.
    ///
    /// Returns `None` when a newer cycle started while this one was fetching.
    pub async fn dispatch(&self, event: InputEvent) -> Option<Panels> {
        self.cycle(Some(event)).await
    }

    /// Re-render with the current inputs, e.g. for the initial page.
    pub async fn refresh(&self) -> Option<Panels> {
        self.cycle(None).await
    }

    async fn cycle(&self, event: Option<InputEvent>) -> Option<Panels> {
        let (seq, inputs) = {
            let mut state = self.state.lock();
            if let Some(event) = event {
                event.apply(&mut state.inputs);
            }
            state.latest_seq += 1;
            (state.latest_seq, state.inputs)
        };

        debug!(seq, ?event, "starting cycle");
        let panels = self.pipeline.run(&inputs, (self.clock)()).await;

        let mut state = self.state.lock();
        if seq != state.latest_seq {
            debug!(seq, latest = state.latest_seq, "discarding stale cycle");
            return None;
        }
        state.displayed = Some(panels.clone());
        Some(panels)
    }
}
