// src/main.rs

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use futures::StreamExt;

use neurocoach::config::data_path_from_env;
use neurocoach::{ChatMessage, CoachClient, CoachConfig, ProfileStore};

#[derive(Parser)]
#[command(name = "neurocoach")]
#[command(about = "Adaptive AI skill mentor: local profile store plus Gemini-backed coaching", long_about = None)]
struct Cli {
    /// Path to the profile document (overrides COACH_DATA_PATH)
    #[arg(long)]
    data_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current profile
    Show,
    /// Create or replace a skill
    UpsertSkill {
        name: String,
        #[arg(long, default_value_t = 0)]
        level: i64,
        #[arg(long, default_value_t = 0)]
        energy: i64,
    },
    /// Persist the current self-reported mood
    Mood { mood: String },
    /// Record a completed challenge: +boost energy across all skills
    CompleteChallenge {
        #[arg(long, default_value_t = 5)]
        boost: i64,
    },
    /// Log a 25-minute focus session
    LogFocus,
    /// Generate the daily progress summary
    Summary,
    /// Stream a single chat turn
    Chat {
        message: String,
        #[arg(long, default_value = "focused")]
        mood: String,
        #[arg(long, default_value = "motivational")]
        tone: String,
    },
    /// Generate a mini learning simulation
    Simulate {
        topic: String,
        #[arg(long, default_value = "quiz")]
        mode: String,
    },
    /// Generate a 6-month future snapshot
    Vision,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything async runs
    if cli.debug {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt().init();
    }

    // .env first so store-only commands see COACH_DATA_PATH too.
    let _ = dotenvy::dotenv();

    let data_path = cli.data_path.clone().unwrap_or_else(data_path_from_env);
    let store = ProfileStore::open(&data_path)
        .with_context(|| format!("failed to open profile store at {}", data_path.display()))?;

    match cli.command {
        Command::Show => {
            let profile = store.read()?;
            println!("{} (mood: {})", profile.user.name, profile.mood);
            if profile.skills.is_empty() {
                println!("No skills yet. Add one with `neurocoach upsert-skill`.");
            } else {
                for (name, skill) in &profile.skills {
                    println!("  {name}: level {} / energy {}", skill.level, skill.energy);
                }
            }
            if profile.engagements.is_empty() {
                println!("No activity yet. Complete a simulation or chat to add activity.");
            } else {
                println!("Recent engagement pulses:");
                for pulse in profile.recent_engagements(8) {
                    println!("  {} | {} | {:+} energy", pulse.time, pulse.event, pulse.delta);
                }
            }
        }
        Command::UpsertSkill {
            name,
            level,
            energy,
        } => {
            store.upsert_skill(&name, level, energy)?;
            println!("Saved {name}");
        }
        Command::Mood { mood } => {
            store.set_mood(&mood)?;
            println!("Mood set to {mood}");
        }
        Command::CompleteChallenge { boost } => {
            store.add_energy_all(boost)?;
            println!("Great job! Mind tree energy {boost:+} to all skills.");
        }
        Command::LogFocus => {
            store.log_event("focus_session", 3)?;
            println!("Logged +3 energy focus session.");
        }
        Command::Summary => {
            let coach = build_coach()?;
            let summary = coach.generate_summary(&store.read()?).await?;
            println!("{summary}");
        }
        Command::Chat {
            message,
            mood,
            tone,
        } => {
            let coach = build_coach()?;
            let history = vec![ChatMessage::new("user", message)];
            let snapshot = store.read()?;
            let mut stream = coach.stream_chat(&history, &mood, &tone, &snapshot).await?;
            let mut stdout = std::io::stdout();
            while let Some(chunk) = stream.next().await {
                print!("{}", chunk?);
                stdout.flush().ok();
            }
            println!();
        }
        Command::Simulate { topic, mode } => {
            let coach = build_coach()?;
            let plan = coach.generate_simulation(&topic, &mode).await?;
            println!("{plan}");
        }
        Command::Vision => {
            let coach = build_coach()?;
            let vision = coach.generate_vision(&store.read()?).await?;
            println!("{vision}");
        }
    }

    Ok(())
}

fn build_coach() -> anyhow::Result<CoachClient> {
    let config = CoachConfig::from_env().context("coach configuration failed")?;
    Ok(CoachClient::new(&config)?)
}
