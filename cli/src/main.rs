mod commands;
mod config;
mod notify;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::process;

use crate::commands::{
    cmd_adjust, cmd_analyze, cmd_entry_add, cmd_entry_delete, cmd_entry_list, cmd_profile_set,
    cmd_profile_show, cmd_stats, cmd_summary, cmd_watch,
};
use crate::config::Config;
use daytrack_core::models::{EntryKind, Sex};
use daytrack_core::tracker::Tracker;

#[derive(Parser)]
#[command(
    name = "daytrack",
    version,
    about = "A local-first calorie and fitness tracker",
    long_about = "Track daily food and workouts, derive BMR/TDEE and a daily calorie \
                  target from your profile, and let the weekly scheduler keep the \
                  target fresh. All state stays on this machine."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SexArg {
    Male,
    Female,
}

impl From<SexArg> for Sex {
    fn from(value: SexArg) -> Self {
        match value {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the user profile and computed energy stats
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Manage food entries
    Food {
        #[command(subcommand)]
        command: EntryCommands,
    },
    /// Manage workout entries
    Workout {
        #[command(subcommand)]
        command: EntryCommands,
    },
    /// Show a day's totals and remaining calories (defaults to today)
    Summary {
        /// Date to show (YYYY-MM-DD or today/yesterday/tomorrow)
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show lifetime consumed/burned tallies
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply this week's target adjustment if it has not run yet
    Adjust {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the weekly adjustment scheduler in the foreground
    Watch,
    /// Analyze a meal photo (stub) and optionally log the detected items
    Analyze {
        /// Path to the image file
        image: std::path::PathBuf,
        /// Log the detected items to today's food entries
        #[arg(long)]
        add: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reset profile, entries, and scheduling state to defaults
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Update profile fields; omitted fields keep their current values
    Set {
        /// Sex: male or female
        #[arg(long, value_enum)]
        sex: Option<SexArg>,
        /// Age in years
        #[arg(long)]
        age: Option<f64>,
        /// Height in cm
        #[arg(long)]
        height: Option<f64>,
        /// Current weight in kg
        #[arg(long)]
        weight: Option<f64>,
        /// Target weight in kg
        #[arg(long)]
        target_weight: Option<f64>,
        /// Activity multiplier (typically 1.2-1.9)
        #[arg(long)]
        activity: Option<f64>,
        /// Deficit percentage below TDEE (0-100)
        #[arg(long)]
        deficit: Option<f64>,
        /// Target BMI (recomputed from target weight when height is set)
        #[arg(long)]
        target_bmi: Option<f64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the profile with computed BMR/TDEE/target/BMI
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum EntryCommands {
    /// Log an entry for a date (default: today)
    Add {
        /// Entry name
        name: String,
        /// Calories
        calories: f64,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an entry by its list index (newest first)
    Delete {
        /// Index within the day's list, as shown by `list`
        index: usize,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List a day's entries, newest first
    List {
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow)
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let tracker = Tracker::open(&config.store_path)?;

    match cli.command {
        Commands::Profile { command } => match command {
            ProfileCommands::Set {
                sex,
                age,
                height,
                weight,
                target_weight,
                activity,
                deficit,
                target_bmi,
                json,
            } => cmd_profile_set(
                &tracker,
                sex.map(Sex::from),
                age,
                height,
                weight,
                target_weight,
                activity,
                deficit,
                target_bmi,
                json,
            ),
            ProfileCommands::Show { json } => cmd_profile_show(&tracker, json),
        },
        Commands::Food { command } => run_entry_command(&tracker, EntryKind::Food, command),
        Commands::Workout { command } => run_entry_command(&tracker, EntryKind::Workout, command),
        Commands::Summary { date, json } => cmd_summary(&tracker, date, json),
        Commands::Stats { json } => cmd_stats(&tracker, json),
        Commands::Adjust { json } => cmd_adjust(&tracker, json),
        Commands::Watch => cmd_watch(&tracker).await,
        Commands::Analyze { image, add, json } => cmd_analyze(&tracker, &image, add, json),
        Commands::Reset { yes } => {
            if yes || confirm_reset()? {
                tracker.reset()?;
                println!("Everything has been reset locally.");
            } else {
                eprintln!("Reset cancelled");
            }
            Ok(())
        }
    }
}

fn run_entry_command(tracker: &Tracker, kind: EntryKind, command: EntryCommands) -> Result<()> {
    match command {
        EntryCommands::Add {
            name,
            calories,
            date,
            json,
        } => cmd_entry_add(tracker, kind, &name, calories, date, json),
        EntryCommands::Delete { index, date, json } => {
            cmd_entry_delete(tracker, kind, index, date, json)
        }
        EntryCommands::List { date, json } => cmd_entry_list(tracker, kind, date, json),
    }
}

fn confirm_reset() -> Result<bool> {
    eprint!("Reset all entries and profile? [y/N] ");
    io::stderr().flush()?;
    let stdin = io::stdin();
    let line = stdin.lock().lines().next().transpose()?.unwrap_or_default();
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
