// SPDX-License-Identifier: PMPL-1.0-or-later

//! page-gate: drive the event page controller from the command line
//!
//! Every invocation is one page load against an in-memory rendering of the
//! page. Preferences are kept in a JSON state file, so consecutive
//! invocations behave like reloads of the same browser tab.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use page_gate::clock::{Clock, SystemClock};
use page_gate::config::PageConfig;
use page_gate::document::{standard_page, Document, MemoryDocument};
use page_gate::events::PageEvent;
use page_gate::i18n::{t, Locale};
use page_gate::storage::FileStore;
use page_gate::PageController;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

type Controller = PageController<MemoryDocument, FileStore, SystemClock>;

#[derive(Parser)]
#[command(name = "page-gate")]
#[command(version)]
#[command(about = "State controller for a bilingual, password-gated event page")]
#[command(long_about = None)]
struct Cli {
    /// Preference file standing in for browser storage
    #[arg(long, global = true, default_value = "page-state.json")]
    state: PathBuf,

    /// Page configuration overrides (YAML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Page manifest to load instead of the built-in page (YAML or JSON)
    #[arg(long, global = true)]
    page: Option<PathBuf>,

    /// Print the final state as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the page and print its state
    Status,

    /// Switch the page language
    Lang {
        #[arg(value_enum)]
        locale: LocaleArg,
    },

    /// Submit a password to the gate
    Unlock {
        #[arg(value_name = "SECRET")]
        secret: String,
    },

    /// Show a content section
    Show {
        #[arg(value_name = "SECTION")]
        section: String,
    },

    /// Click an element by id
    Click {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Render the countdown once
    Countdown,

    /// Keep the page open and print the countdown on every tick
    Watch {
        /// Number of ticks to observe
        #[arg(short, long, default_value = "10")]
        ticks: u64,
    },

    /// Forget all persisted preferences
    Reset,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LocaleArg {
    En,
    Es,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::En => Locale::En,
            LocaleArg::Es => Locale::Es,
        }
    }
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut store = FileStore::open(&cli.state)?;
    if let Commands::Reset = cli.command {
        store.clear()?;
        println!("Cleared preferences in {}", store.path().display());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => PageConfig::load(path)?,
        None => PageConfig::default(),
    };
    let document = match &cli.page {
        Some(path) => MemoryDocument::load(path)?,
        None => standard_page(),
    };

    let mut controller = PageController::new(document, store, SystemClock, config);
    controller.start();

    match cli.command {
        Commands::Status | Commands::Reset => {}
        Commands::Lang { locale } => controller.set_locale(locale.into()),
        Commands::Unlock { secret } => {
            controller.submit(&secret);
            if !controller.is_unlocked() {
                let locale = controller.state().locale;
                println!("{}", t(locale, "gate.rejected").red());
            }
        }
        Commands::Show { section } => controller.show_section(&section),
        Commands::Click { id } => controller.dispatch(&PageEvent::click(id)),
        Commands::Countdown => controller.tick(),
        Commands::Watch { ticks } => watch(&mut controller, ticks),
    }

    settle(&mut controller);

    if cli.json {
        print_json(&controller)?;
    } else {
        print_status(&controller);
    }
    Ok(())
}

/// Let pending gate timers fire before the page is "closed".
fn settle(controller: &mut Controller) {
    while let Some(deadline) = controller.next_one_shot_deadline() {
        let wait = (deadline - controller.clock().now())
            .to_std()
            .unwrap_or(Duration::ZERO);
        thread::sleep(wait);
        controller.run_due_timers();
    }
}

fn watch(controller: &mut Controller, ticks: u64) {
    let period = controller
        .config()
        .tick_period()
        .to_std()
        .unwrap_or(Duration::from_secs(1));
    for _ in 0..ticks {
        thread::sleep(period);
        controller.run_due_timers();
        println!("{}", countdown_line(controller));
    }
}

fn countdown_line(controller: &Controller) -> String {
    let state = controller.state();
    if state.countdown_finished {
        controller
            .config()
            .terminal_message(state.locale)
            .bold()
            .to_string()
    } else {
        let ids = &controller.config().elements;
        let doc = controller.document();
        let field = |id: &str| doc.text(id).unwrap_or_default();
        format!(
            "{} {}  {} {}  {} {}  {} {}",
            field(&ids.days).as_str().cyan(),
            t(state.locale, "countdown.days"),
            field(&ids.hours).as_str().cyan(),
            t(state.locale, "countdown.hours"),
            field(&ids.minutes).as_str().cyan(),
            t(state.locale, "countdown.minutes"),
            field(&ids.seconds).as_str().cyan(),
            t(state.locale, "countdown.seconds"),
        )
    }
}

fn print_status(controller: &Controller) {
    let state = controller.state();
    let locale = state.locale;
    let gate = if state.gate.is_unlocked() {
        t(locale, state.gate.label()).green()
    } else {
        t(locale, state.gate.label()).yellow()
    };

    println!("{}", t(locale, "status.title").bold());
    println!("  {:18} {}", t(locale, "status.locale"), locale);
    println!("  {:18} {}", t(locale, "status.gate"), gate);
    println!("  {:18} {}", t(locale, "status.section"), state.section);
    println!(
        "  {:18} {}",
        t(locale, "status.countdown"),
        countdown_line(controller)
    );
}

fn print_json(controller: &Controller) -> Result<()> {
    let payload = serde_json::json!({
        "state": controller.state(),
        "remaining": controller.remaining(),
        "document": controller.document(),
    });
    let rendered =
        serde_json::to_string_pretty(&payload).context("serializing page state as json")?;
    println!("{rendered}");
    Ok(())
}
