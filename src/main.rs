mod aggregator;
mod config;
mod error;
mod form;
mod interactive;
mod logging;
mod report;
mod types;
mod ui;

use std::process::exit;
use std::time::Duration;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use aggregator::aggregate;
use config::{Cli, SavedConfig, load_config, reset_config};
use error::AppError;
use form::CostForm;
use interactive::run_setup_wizard;
use types::App;

fn display_startup_info(prefs: &SavedConfig) {
    eprintln!("🚀 Starting {}...", prefs.project_title);
    eprintln!("💱 Currency: {}", prefs.currency);
    eprintln!("🎯 Tip: ↑/↓ to move between fields, Enter to calculate, 'q' to quit");
    eprintln!();
}

fn event_loop<B: Backend>(app: &mut App, terminal: &mut Terminal<B>) -> Result<(), AppError> {
    let tick_rate = Duration::from_millis(250);
    loop {
        ui::render_ui(app, terminal)?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && ui::input::handle_key_event(app, key.code) {
                    return Ok(());
                }
            }
        }
    }
}

fn run_tui(app: &mut App) -> Result<(), AppError> {
    let mut terminal = ui::setup_terminal()?;
    let result = event_loop(app, &mut terminal);
    ui::restore_terminal(&mut terminal)?;
    result
}

fn run(cli: Cli) -> Result<(), AppError> {
    // Handle reset flag first
    if cli.reset {
        if reset_config()? {
            println!("✅ Saved preferences have been reset.");
        } else {
            println!("ℹ️  No saved preferences found to reset.");
        }
        return Ok(());
    }

    let saved = load_config().unwrap_or_default();
    let saved = if cli.setup {
        match run_setup_wizard(saved)? {
            Some(config) => config,
            None => return Ok(()),
        }
    } else {
        saved
    };
    let prefs = saved.with_overrides(&cli);
    let form = CostForm::from_cli(&cli)?;

    if cli.summary {
        let sheet = form.to_sheet();
        let summary = aggregate(&sheet);
        tracing::info!(
            entries = sheet.len(),
            components = summary.breakdown.len(),
            total = summary.total,
            "calculated total cost"
        );
        tracing::debug!(names = ?summary.breakdown.names(), "breakdown components");
        println!("{}", prefs.project_title);
        println!("Generated: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
        println!();
        print!("{}", report::render_summary(&summary, &prefs.currency));
        return Ok(());
    }

    display_startup_info(&prefs);
    let mut app = App::new(prefs, &form);
    run_tui(&mut app)
}

fn main() {
    let cli = Cli::parse();

    if cli.summary {
        logging::init_stderr(&cli.log_level);
    } else {
        logging::init_file(&cli.log_level);
    }

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "exiting with error");
        eprintln!("❌ {}", e);
        exit(e.exit_code());
    }
}
