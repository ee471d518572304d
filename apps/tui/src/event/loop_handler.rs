use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::app::{handle_input, App, FetchOutcome};
use crate::ui;
use mena_energy_tracker::analysis::AnalysisClient;
use mena_energy_tracker::domain::AnalysisResult;
use mena_energy_tracker::load_state::fetch_into;
use mena_energy_tracker::presentation::{
    classify_source, display_number, find_highlight, leadership, MixRow,
};
use mena_energy_tracker::{LoadEvent, LoadMachine, LoadState};

pub const DISCLAIMER: &str =
    "AI-generated analysis. Data should be verified against official sources like IEA or Ember.";

/// Run one analysis without the UI and print it
pub async fn run_headless(client: &AnalysisClient, json: bool) -> Result<()> {
    let mut machine = LoadMachine::new();
    fetch_into(&mut machine, client, LoadEvent::Mount).await?;

    print!("{}", headless_output(machine.state(), json)?);
    Ok(())
}

fn headless_output(state: &LoadState, json: bool) -> Result<String> {
    match state {
        LoadState::Success(result) if json => {
            Ok(format!("{}\n", serde_json::to_string_pretty(result)?))
        }
        LoadState::Success(result) => Ok(format_report(result)),
        LoadState::Error(message) => Err(eyre!("{message}")),
        LoadState::Idle | LoadState::Loading => Err(eyre!("Analysis did not complete")),
    }
}

fn format_report(result: &AnalysisResult) -> String {
    let mut report = String::new();

    let title = format!("MENA Energy Analysis (~{})", result.generated_at);
    report.push_str(&format!("\n{title}\n{}\n", "=".repeat(title.chars().count())));
    report.push_str(&format!("{}\n", result.overview));

    if let Some(egypt) = find_highlight(&result.data) {
        report.push_str(&format!(
            "\nEgypt Focus: {}% renewable share, {} Mt CO2\n",
            display_number(egypt.energy_mix.renewable_percentage),
            display_number(egypt.co2_emissions_mt)
        ));
    }

    report.push_str("\nCountries:\n");
    for record in &result.data {
        report.push_str(&format!(
            "- {} | {} TWh | {} Mt CO2 | {}\n",
            record.country,
            display_number(record.total_generation_twh),
            display_number(record.co2_emissions_mt),
            leadership(record).label()
        ));

        let mix = MixRow::from_mix(&record.country, &record.energy_mix);
        let segments = mix
            .segments()
            .iter()
            .map(|(category, value)| format!("{} {}%", category.label(), display_number(*value)))
            .collect::<Vec<_>>()
            .join(" / ");
        report.push_str(&format!("    mix: {segments}\n"));

        if !record.energy_mix.top_sources.is_empty() {
            let sources = record
                .energy_mix
                .top_sources
                .iter()
                .map(|share| {
                    format!(
                        "{} {}% ({})",
                        share.source,
                        display_number(share.percentage),
                        classify_source(&share.source).as_str()
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            report.push_str(&format!("    top sources: {sources}\n"));
        }

        report.push_str(&format!("    {}\n", record.analysis));
    }

    report.push_str(&format!("\n{DISCLAIMER}\n"));
    report
}

/// Run the main application event loop
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    mut outcomes: UnboundedReceiver<FetchOutcome>,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    app.start();

    loop {
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(_) | Err(_) => {
                    // Resize and mouse events are picked up by the next draw
                }
            }
        }

        // Completed requests land here; the UI keeps drawing while they run
        while let Ok(outcome) = outcomes.try_recv() {
            app.complete(outcome);
        }
    }

    Ok(())
}
