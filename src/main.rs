//! study-review CLI
//!
//! Drives the SM-2 scheduler over a study set stored as a JSON snapshot.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use study_review::config::ReviewConfig;
use study_review::export::json::{export_json_to_path, import_json};
use study_review::models::SourceType;
use study_review::validation::validate_rating;
use study_review::{MasteryLevel, ReviewAction, ReviewSession, StudySet};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Spaced repetition review for generated study sets
#[derive(Parser)]
#[command(name = "study-review")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Schedule flashcard and quiz reviews with SM-2")]
struct Cli {
    /// Study set JSON file (overrides config.toml and STUDY_REVIEW_DATA)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty study set
    Init {
        title: String,
        /// Source type: pdf, text, youtube, link, audio, image
        #[arg(long, default_value = "text")]
        source: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Add a flashcard
    Add { front: String, back: String },

    /// Show mastery breakdown and due count
    Summary {
        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },

    /// List items due for review
    Due,

    /// Rate one item with an action tag or a raw 0-5 rating
    Rate {
        /// Flashcard or quiz question id
        item: String,
        /// still_learning, getting_there, almost or mastered
        action: Option<String>,
        /// Raw quality rating instead of an action
        #[arg(long, allow_negative_numbers = true, conflicts_with = "action")]
        rating: Option<i32>,
        /// Print the evaluation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Work through due items interactively
    Review,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "study_review=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ReviewConfig::load();
    if let Some(path) = cli.data {
        config.data_path = path;
    }

    match cli.command {
        Commands::Init {
            title,
            source,
            force,
        } => run_init(&config, title, &source, force),
        Commands::Add { front, back } => run_add(&config, front, back),
        Commands::Summary { json } => run_summary(&config, json),
        Commands::Due => run_due(&config),
        Commands::Rate {
            item,
            action,
            rating,
            json,
        } => run_rate(&config, &item, action, rating, json),
        Commands::Review => run_review(&config),
    }
}

fn load(config: &ReviewConfig) -> anyhow::Result<StudySet> {
    import_json(&config.data_path)
        .with_context(|| format!("Failed to load {}", config.data_path.display()))
}

fn format_date(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn run_init(
    config: &ReviewConfig,
    title: String,
    source: &str,
    force: bool,
) -> anyhow::Result<()> {
    if config.data_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config.data_path.display()
        );
    }
    let Some(source_type) = SourceType::parse(source) else {
        bail!("Unknown source type: {}", source);
    };

    let now = Utc::now();
    let id = format!("set-{}", now.timestamp());
    let set = StudySet::new(id, title, source_type, now);
    export_json_to_path(&set, &config.data_path)?;
    println!("Created '{}' at {}", set.title, config.data_path.display());
    Ok(())
}

fn run_add(config: &ReviewConfig, front: String, back: String) -> anyhow::Result<()> {
    let mut set = load(config)?;
    let id = set.add_flashcard(front, back, Utc::now()).id.clone();
    export_json_to_path(&set, &config.data_path)?;
    println!("Added {id}");
    Ok(())
}

fn run_summary(config: &ReviewConfig, json: bool) -> anyhow::Result<()> {
    let set = load(config)?;
    let now = Utc::now();
    let breakdown = set.mastery_breakdown();

    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    println!("{} ({})", set.title, set.source_type.as_str());
    for level in MasteryLevel::ALL.iter().rev() {
        println!("  {:<11} {}", level.label(), breakdown.count(*level));
    }
    println!("  Mastered: {:.0}%", breakdown.mastered_percent());
    println!("  Due now: {}", set.due_items(now).len());
    if let Some(next) = set.next_review_at().filter(|next| *next > now) {
        println!("  Next scheduled review: {}", format_date(next));
    }
    Ok(())
}

fn run_due(config: &ReviewConfig) -> anyhow::Result<()> {
    let set = load(config)?;
    let due = set.due_items(Utc::now());

    if due.is_empty() {
        match set.next_review_at() {
            Some(next) => println!("Nothing due. Next review: {}", format_date(next)),
            None => println!("Nothing due."),
        }
        return Ok(());
    }

    for item in due {
        println!("{:<8} {:<11} {}", item.id, item.mastery().as_str(), item.prompt);
    }
    Ok(())
}

fn run_rate(
    config: &ReviewConfig,
    item: &str,
    action: Option<String>,
    rating: Option<i32>,
    json: bool,
) -> anyhow::Result<()> {
    let rating = match (rating, action) {
        (Some(rating), _) if config.strict_ratings => validate_rating(rating)?,
        (Some(rating), _) => rating,
        (None, Some(tag)) => {
            let action = ReviewAction::from_tag(&tag);
            if action == ReviewAction::Unrecognized {
                tracing::warn!("Unrecognized action '{}', rating as {}", tag, action.rating());
            }
            action.rating()
        }
        (None, None) => bail!("Provide an action or --rating"),
    };

    let mut set = load(config)?;
    let now = Utc::now();
    let evaluation = set.rate_item(item, rating, now)?;
    export_json_to_path(&set, &config.data_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
        return Ok(());
    }
    println!(
        "{}: {} (ease {:.2}), next review in {} day(s) on {}",
        item,
        evaluation.mastery,
        evaluation.ease_factor,
        evaluation.interval_days,
        format_date(study_review::next_review_timestamp(now, evaluation.interval_days))
    );
    Ok(())
}

fn prompt(
    message: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;
    Ok(lines.next().transpose()?)
}

/// What the learner typed at the rating prompt.
#[derive(Debug, PartialEq)]
enum RatingInput {
    Rate(ReviewAction),
    Quit,
    Unknown,
}

fn parse_rating_input(line: &str) -> RatingInput {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        return RatingInput::Quit;
    }
    match line.chars().next().and_then(ReviewAction::from_key) {
        Some(action) => RatingInput::Rate(action),
        None => RatingInput::Unknown,
    }
}

fn run_review(config: &ReviewConfig) -> anyhow::Result<()> {
    let mut set = load(config)?;
    let mut session = ReviewSession::new_from_due(&set, Utc::now());
    if session.is_completed() {
        println!("Nothing due.");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !session.is_completed() {
        let Some(card) = session.current_card() else {
            break;
        };
        let (question, answer, mastery) =
            (card.prompt.clone(), card.answer.clone(), card.state.mastery());

        println!("\n{} [{}]", session.phase_message(), mastery);
        println!("Q: {question}");
        match prompt("Enter to flip, q to stop: ", &mut lines)? {
            Some(line) if line.trim() != "q" => {}
            _ => break,
        }

        session.toggle_answer();
        println!("A: {answer}");

        let Some(line) = prompt(
            "1 Still Learning, 2 Getting There, 3 Almost, 4 Mastered!, q to stop: ",
            &mut lines,
        )?
        else {
            break;
        };
        let action = match parse_rating_input(&line) {
            RatingInput::Rate(action) => action,
            RatingInput::Quit => break,
            RatingInput::Unknown => {
                println!("Unknown key, showing the card again.");
                session.toggle_answer();
                continue;
            }
        };

        if let Some(evaluation) = session.rate_current(action, Utc::now()) {
            println!(
                "{} -> {}, next review in {} day(s)",
                action.label(),
                evaluation.mastery,
                evaluation.interval_days
            );
        }
        session.next_card();
    }

    session.apply_to(&mut set)?;
    export_json_to_path(&set, &config.data_path)?;
    println!(
        "\nSession saved. {}/{} passed this round.",
        session.learned_count(),
        session.total_count()
    );
    Ok(())
}
