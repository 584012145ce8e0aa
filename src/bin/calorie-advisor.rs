// ABOUTME: Interactive terminal front end for the calorie advisor
// ABOUTME: Logs food per meal, edits the daily goal and requests AI advice without blocking input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! GEMINI_API_KEY=... calorie-advisor --goal 1800 --language es
//! > add breakfast 300 Oatmeal with berries
//! > add lunch 450 Salad
//! > advise
//! ```
//!
//! Advice requests run on a background task, so the ledger stays editable
//! while one is in flight. Issuing `advise` again supersedes the previous
//! request; its late answer is discarded.

use std::io::Write;

use anyhow::Result;
use calorie_advisor::advice::{
    meal_label, render_blocks, AdviceClient, AdviceController, AdviceResolution, AdviceState,
};
use calorie_advisor::config::{parse_goal, AdviceLanguage, AdvisorConfig, LogLevel};
use calorie_advisor::ledger::NutritionLedger;
use calorie_advisor::logging::LoggingConfig;
use calorie_advisor::models::{FoodEntryId, MealType};
use clap::Parser;
use thiserror::Error;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "calorie-advisor",
    about = "Track today's calories and ask an AI nutritionist for advice",
    long_about = "Interactive calorie log grouped by meal, with dietary advice generated by \
                  Gemini. Requires GEMINI_API_KEY."
)]
struct Args {
    /// Model override (defaults to CALORIE_ADVISOR_MODEL or gemini-2.5-flash)
    #[arg(long)]
    model: Option<String>,

    /// Advice language: en or es
    #[arg(long)]
    language: Option<String>,

    /// Initial daily goal in kcal
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    goal: Option<u32>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Add { meal: MealType, calories: i64, name: String },
    Remove(FoodEntryId),
    Goal(String),
    List,
    Summary,
    Advise,
    Toggle,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
enum CommandError {
    #[error("unknown command '{0}', type 'help' for the list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown meal '{0}', expected breakfast, lunch, dinner or other")]
    UnknownMeal(String),
}

const ADD_USAGE: &str = "add <breakfast|lunch|dinner|other> <kcal> <name...>";
const REMOVE_USAGE: &str = "remove <id>";
const GOAL_USAGE: &str = "goal <kcal>";

const HELP: &str = "\
Commands:
  add <meal> <kcal> <name...>   log a food (meal: breakfast, lunch, dinner, other)
  remove <id>                   delete an entry
  goal <kcal>                   change the daily goal
  list                          show entries grouped by meal
  summary                       show progress against the goal
  advise                        ask the AI assistant for advice
  toggle                        show or hide the last advice
  help                          show this help
  quit                          exit";

impl Command {
    fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let command = match verb.to_lowercase().as_str() {
            "add" => {
                let meal_word = words.next().ok_or(CommandError::Usage(ADD_USAGE))?;
                let meal = MealType::parse(meal_word)
                    .ok_or_else(|| CommandError::UnknownMeal(meal_word.to_owned()))?;
                let calories = words
                    .next()
                    .and_then(|kcal| kcal.parse::<i64>().ok())
                    .ok_or(CommandError::Usage(ADD_USAGE))?;
                let name = words.collect::<Vec<_>>().join(" ");
                Self::Add { meal, calories, name }
            }
            "remove" | "rm" => words
                .next()
                .and_then(|id| id.trim_start_matches('#').parse::<u64>().ok())
                .map(|id| Self::Remove(FoodEntryId::new(id)))
                .ok_or(CommandError::Usage(REMOVE_USAGE))?,
            "goal" => {
                let raw = words.next().ok_or(CommandError::Usage(GOAL_USAGE))?;
                Self::Goal(raw.to_owned())
            }
            "list" | "ls" => Self::List,
            "summary" => Self::Summary,
            "advise" | "advice" => Self::Advise,
            "toggle" => Self::Toggle,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_owned())),
        };
        Ok(Some(command))
    }
}

struct App {
    ledger: NutritionLedger,
    advice: AdviceController,
    client: AdviceClient,
    resolutions: UnboundedSender<AdviceResolution>,
    language: AdviceLanguage,
}

impl App {
    /// Returns `false` when the user asked to quit
    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Add { meal, calories, name } => {
                // Rejected input is a no-op
                match self.ledger.add_entry(&name, calories, meal) {
                    Ok(id) => println!("Added #{id}: {} ({calories} kcal)", name.trim()),
                    Err(e) => debug!("Entry rejected: {}", e.message),
                }
            }
            Command::Remove(id) => {
                if let Some(entry) = self.ledger.remove_entry(id) {
                    println!("Removed #{id}: {}", entry.name);
                }
            }
            Command::Goal(raw) => {
                if let Some(goal) = parse_goal(&raw) {
                    if let Err(e) = self.ledger.set_goal(i64::from(goal)) {
                        debug!("Goal rejected: {}", e.message);
                    }
                }
                println!("Daily goal: {} kcal", self.ledger.daily_goal());
            }
            Command::List => self.print_list(),
            Command::Summary => self.print_summary(),
            Command::Advise => self.dispatch_advice(),
            Command::Toggle => {
                if self.advice.toggle_panel().is_some() {
                    self.print_advice();
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return false,
        }
        true
    }

    fn dispatch_advice(&mut self) {
        let ticket = self.advice.begin(&self.ledger);
        let client = self.client.clone();
        let resolutions = self.resolutions.clone();
        tokio::spawn(async move {
            let resolution = ticket.fetch(&client).await;
            if let Err(e) = resolutions.send(resolution) {
                debug!(request_id = %e.0.request_id, "Advice resolution dropped after shutdown");
            }
        });
        println!("Asking the AI assistant...");
    }

    fn apply(&mut self, resolution: AdviceResolution) {
        if self.advice.resolve(resolution) {
            self.print_advice();
        }
    }

    fn print_list(&self) {
        let groups = self.ledger.grouped_by_meal();
        if groups.is_empty() {
            println!("Nothing logged yet.");
            return;
        }
        for group in groups {
            let label = meal_label(group.meal, self.language);
            println!("{label} ({} kcal)", group.subtotal);
            for entry in group.entries {
                println!("  #{:<4} {:<30} {:>5} kcal", entry.id, entry.name, entry.calories);
            }
        }
    }

    fn print_summary(&self) {
        const BAR_WIDTH: usize = 30;
        let summary = self.ledger.summary();
        let filled = ((summary.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        println!(
            "[{}{}] {:.0}%",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            summary.percent
        );
        println!(
            "{} / {} kcal, {} kcal remaining",
            summary.total, summary.goal, summary.remaining
        );
        if summary.is_over_goal() {
            let excess = summary.total - u64::from(summary.goal);
            println!("Over the daily goal by {excess} kcal");
        }
    }

    fn print_advice(&self) {
        match self.advice.state() {
            AdviceState::Idle => {}
            AdviceState::Loading => println!("Asking the AI assistant..."),
            AdviceState::Failed(message) => println!("{message}"),
            AdviceState::Ready(text) => {
                if self.advice.is_panel_expanded() {
                    for block in render_blocks(text) {
                        println!("{block}");
                    }
                    println!("\n(type 'toggle' to hide)");
                } else {
                    println!("Advice hidden (type 'toggle' to show)");
                }
            }
        }
    }
}

fn print_prompt() {
    print!("> ");
    if let Err(e) = std::io::stdout().flush() {
        debug!("Failed to flush prompt: {e}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::from_env();
    if args.verbose {
        logging = logging.with_level(LogLevel::Debug.to_string());
    }
    logging.init()?;

    // A missing credential is fatal: there is no offline mode
    let mut config = AdvisorConfig::from_env()?;
    if let Some(model) = args.model {
        config = config.with_model(model);
    }
    if let Some(language) = args.language.as_deref() {
        config = config.with_language(AdviceLanguage::from_str_or_default(language));
    }
    if let Some(goal) = args.goal {
        config = config.with_daily_goal(goal);
    }

    let client = AdviceClient::from_config(&config)?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App {
        ledger: NutritionLedger::new(config.daily_goal)?,
        advice: AdviceController::new(config.language),
        client,
        resolutions: tx,
        language: config.language,
    };
    info!(model = %config.model, goal = config.daily_goal, "Session started");

    println!(
        "Calorie advisor. Daily goal: {} kcal. Type 'help' for commands.",
        app.ledger.daily_goal()
    );
    let mut lines = BufReader::new(io::stdin()).lines();
    print_prompt();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Ok(Some(command)) => {
                        if !app.handle(command) {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => println!("{e}"),
                }
                print_prompt();
            }
            Some(resolution) = rx.recv() => {
                println!();
                app.apply(resolution);
                print_prompt();
            }
        }
    }

    info!("Session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_joins_name() {
        let command = Command::parse("add lunch 450 Caesar salad").unwrap();
        assert_eq!(
            command,
            Some(Command::Add {
                meal: MealType::Lunch,
                calories: 450,
                name: "Caesar salad".into(),
            })
        );
    }

    #[test]
    fn test_parse_rejects_unknown_meal() {
        assert_eq!(
            Command::parse("add brunch 300 Eggs"),
            Err(CommandError::UnknownMeal("brunch".into()))
        );
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn test_parse_remove_accepts_hash_prefix() {
        assert_eq!(
            Command::parse("remove #3"),
            Ok(Some(Command::Remove(FoodEntryId::new(3))))
        );
    }
}
