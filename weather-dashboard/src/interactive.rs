use anyhow::{Context, Result};
use inquire::{CustomType, CustomUserError, InquireError, Select, Text, validator::Validation};
use std::fmt;
use tracing::debug;
use weather_core::{
    Config, Dashboard, DashboardInputs, InputEvent, Location, Metric, RangeMode,
    config::MIN_TIMEOUT_SECS,
};

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    MoveMarker,
    ChangeMetric,
    ChangeRange,
    Quit,
}

impl Action {
    const ALL: [Action; 4] =
        [Action::MoveMarker, Action::ChangeMetric, Action::ChangeRange, Action::Quit];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::MoveMarker => "Move the marker",
            Action::ChangeMetric => "Change metric",
            Action::ChangeRange => "Change range",
            Action::Quit => "Quit",
        })
    }
}

/// What the menu produced.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Event(InputEvent),
    /// A sub-prompt was cancelled; show the menu again.
    Back,
    Quit,
}

/// Menu loop: every answered prompt is one input change and one re-render.
pub async fn run(dashboard: &Dashboard) -> Result<()> {
    if let Some(panels) = dashboard.refresh().await {
        print!("{}", render::panels(&panels));
    }

    loop {
        let inputs = dashboard.inputs();
        println!(
            "\nLocation: {}  |  Metric: {}  |  Range: {}",
            inputs.location, inputs.metric, inputs.range
        );

        let event = match next_step(&inputs)? {
            Step::Event(event) => event,
            Step::Back => continue,
            Step::Quit => return Ok(()),
        };

        debug!(?event, "dispatching input change");
        match dashboard.dispatch(event).await {
            Some(panels) => print!("{}", render::panels(&panels)),
            None => debug!(?event, "cycle superseded, nothing to render"),
        }
    }
}

/// Esc / Ctrl-C on the menu quits; on a sub-prompt it goes back to the menu.
fn next_step(inputs: &DashboardInputs) -> Result<Step> {
    let action = match Select::new("What do you want to change?", Action::ALL.to_vec()).prompt() {
        Ok(action) => action,
        Err(e) if is_cancel(&e) => return Ok(Step::Quit),
        Err(e) => return Err(e).context("Prompt failed"),
    };

    let answer = match action {
        Action::MoveMarker => prompt_location(inputs.location).map(InputEvent::MarkerMoved),
        Action::ChangeMetric => prompt_metric(inputs.metric).map(InputEvent::MetricChanged),
        Action::ChangeRange => prompt_range(inputs.range).map(InputEvent::RangeChanged),
        Action::Quit => return Ok(Step::Quit),
    };

    sub_prompt_step(answer)
}

fn sub_prompt_step(answer: Result<InputEvent, InquireError>) -> Result<Step> {
    match answer {
        Ok(event) => Ok(Step::Event(event)),
        Err(e) if is_cancel(&e) => Ok(Step::Back),
        Err(e) => Err(e).context("Prompt failed"),
    }
}

fn is_cancel(err: &InquireError) -> bool {
    matches!(err, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}

/// Treat Esc / Ctrl-C as "no answer" instead of an error.
fn cancellable<T>(result: Result<Option<T>, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if is_cancel(&e) => Ok(None),
        Err(e) => Err(e).context("Prompt failed"),
    }
}

fn prompt_location(current: Location) -> Result<Location, InquireError> {
    let latitude = CustomType::<f64>::new("Latitude:")
        .with_default(current.latitude)
        .with_error_message("Please enter a number")
        .prompt()?;
    let longitude = CustomType::<f64>::new("Longitude:")
        .with_default(current.longitude)
        .with_error_message("Please enter a number")
        .prompt()?;

    Ok(Location::new(latitude, longitude))
}

fn prompt_metric(current: Metric) -> Result<Metric, InquireError> {
    let start = Metric::all().iter().position(|m| *m == current).unwrap_or(0);
    Select::new("Metric:", Metric::all().to_vec()).with_starting_cursor(start).prompt()
}

fn prompt_range(current: RangeMode) -> Result<RangeMode, InquireError> {
    let start = RangeMode::all().iter().position(|r| *r == current).unwrap_or(0);
    Select::new("Range:", RangeMode::all().to_vec()).with_starting_cursor(start).prompt()
}

/// Interactive editing of the config file.
pub fn configure(mut config: Config) -> Result<()> {
    let answers = cancellable(prompt_config(&config).map(Some))?;
    let Some((inputs, timezone, timeout_secs)) = answers else {
        println!("Configuration unchanged.");
        return Ok(());
    };

    config.set_initial_inputs(&inputs);
    config.api.timezone = timezone;
    config.api.timeout_secs = timeout_secs;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

fn prompt_config(
    config: &Config,
) -> Result<(DashboardInputs, String, u64), InquireError> {
    let current = config.initial_inputs();

    println!("Starting marker position");
    let location = prompt_location(current.location)?;
    let metric = prompt_metric(current.metric)?;
    let range = prompt_range(current.range)?;

    let timezone = Text::new("Timezone for hourly timestamps:")
        .with_default(&config.api.timezone)
        .prompt()?;
    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.api.timeout_secs.max(MIN_TIMEOUT_SECS))
        .with_error_message("Please enter a whole number of seconds")
        .with_validator(|secs: &u64| {
            Ok::<_, CustomUserError>(if *secs >= MIN_TIMEOUT_SECS {
                Validation::Valid
            } else {
                Validation::Invalid(format!("Timeout must be at least {MIN_TIMEOUT_SECS} second").into())
            })
        })
        .prompt()?;

    Ok((DashboardInputs { location, metric, range }, timezone, timeout_secs))
}
