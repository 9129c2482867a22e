use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::{LevelFilter, debug};

use liftlog::auth::TokenIdentity;
use liftlog::db;
use liftlog::db::models::UserId;
use liftlog::draft::{NewWorkoutDraft, SetField};
use liftlog::logging::{init_logger, parse_level};
use liftlog::seed::seed;
use liftlog::session::Session;

#[derive(Parser, Debug)]
#[command(version, about = "liftlog - workout log CLI", long_about = None)]
struct Args {
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://liftlog.db", global = true)]
    database_url: String,
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the database if needed and apply migrations
    Migrate,
    /// Delete every row, keeping the schema
    Reset,
    /// Load the demo exercises and workouts for a user
    Seed {
        #[arg(short, long)]
        user: String,
    },
    /// Manage the shared exercise library
    Exercises {
        #[command(subcommand)]
        command: ExerciseCommands,
    },
    /// Print a user's workouts for one day
    Show {
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        date: NaiveDate,
    },
    /// Log a completed workout, e.g. --entry "Bench Press=60x10,80x8"
    Log {
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        date: NaiveDate,
        #[arg(short, long = "entry", required = true)]
        entries: Vec<String>,
    },
    /// Mint a bearer token for a user (development only)
    Token {
        #[arg(short, long)]
        user: String,
        #[arg(long, env = "AUTH_SECRET", hide_env_values = true)]
        secret: String,
        #[arg(long, default_value_t = 24)]
        ttl_hours: i64,
    },
}

#[derive(Subcommand, Debug)]
enum ExerciseCommands {
    List,
    Add {
        name: String,
        /// Acting user; the library is shared but changes need a signed-in caller
        #[arg(short, long, default_value = "cli")]
        user: String,
    },
}

fn ttl_seconds(hours: i64) -> Result<i64> {
    hours
        .checked_mul(3600)
        .with_context(|| format!("--ttl-hours {hours} is too large"))
}

/// "Bench Press=60x10,80x8" -> ("Bench Press", [("60", "10"), ("80", "8")])
fn parse_entry(raw: &str) -> Result<(String, Vec<(String, String)>)> {
    let (name, sets) = raw
        .split_once('=')
        .with_context(|| format!("entry '{raw}' should look like NAME=WEIGHTxREPS,..."))?;
    let name = name.trim();
    if name.is_empty() {
        bail!("entry '{raw}' has no exercise name");
    }

    let sets = sets
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|set| {
            set.split_once(['x', 'X'])
                .map(|(w, r)| (w.trim().to_string(), r.trim().to_string()))
                .with_context(|| format!("set '{set}' should look like WEIGHTxREPS"))
        })
        .collect::<Result<Vec<_>>>()?;
    if sets.is_empty() {
        bail!("entry '{raw}' has no sets");
    }
    Ok((name.to_string(), sets))
}

async fn log_workout(
    session: Session,
    date: NaiveDate,
    entries: &[String],
) -> Result<()> {
    let parsed = entries
        .iter()
        .map(|raw| parse_entry(raw))
        .collect::<Result<Vec<_>>>()?;

    let library = session.list_exercises().await?;
    let mut draft = NewWorkoutDraft::new(session, date, library);

    for (name, sets) in parsed {
        let known = draft
            .exercises()
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(&name))
            .map(|e| e.id);
        let exercise_id = match known {
            Some(id) => id,
            None => {
                let created = draft
                    .create_exercise(&name)
                    .await?
                    .with_context(|| format!("exercise name '{name}' is blank"))?;
                println!("Added exercise {} ({})", created.name, created.id);
                created.id
            }
        };

        let entry = draft.add_entry();
        draft.select_exercise(entry, exercise_id)?;
        for (i, (weight, reps)) in sets.iter().enumerate() {
            let set = if i == 0 {
                draft
                    .entries()
                    .iter()
                    .find(|e| e.local_id == entry)
                    .and_then(|e| e.sets.first())
                    .map(|s| s.local_id)
                    .context("new entry has no first set")?
            } else {
                draft.add_set(entry)?
            };
            draft.edit_set(entry, set, SetField::Weight, weight)?;
            draft.edit_set(entry, set, SetField::Reps, reps)?;
        }
    }

    let skipped = draft.entries().len() - draft.ready_entries().len();
    if skipped > 0 {
        println!("Skipping {skipped} entries with non-numeric sets");
    }
    match draft.save().await? {
        Some(workout) => println!("Saved workout {} on {}", workout.id, workout.date),
        None => println!("Nothing to save"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    init_logger(parse_level(&args.log_level).unwrap_or(LevelFilter::Warn));
    debug!("Using database {}", args.database_url);

    if let Commands::Token {
        user,
        secret,
        ttl_hours,
    } = &args.command
    {
        let token = TokenIdentity::new(secret.as_bytes())
            .issue(&UserId::new(user.as_str()), ttl_seconds(*ttl_hours)?)
            .context("Failed to sign token")?;
        println!("{token}");
        return Ok(());
    }

    let pool = db::connect(&args.database_url).await?;

    match args.command {
        Commands::Migrate => {
            println!("Database at {} is up to date", args.database_url);
        }
        Commands::Reset => {
            db::clear_all_tables(&pool).await?;
            println!("All rows deleted");
        }
        Commands::Seed { user } => {
            let summary = seed(&pool, &UserId::new(user)).await?;
            println!(
                "Seeded {} exercises, {} workouts, {} workout exercises, {} sets",
                summary.exercises, summary.workouts, summary.workout_exercises, summary.sets
            );
        }
        Commands::Exercises { command } => match command {
            ExerciseCommands::List => {
                for exercise in Session::anonymous(pool.clone()).list_exercises().await? {
                    println!("{}\t{}", exercise.id, exercise.name);
                }
            }
            ExerciseCommands::Add { name, user } => {
                let exercise = Session::for_user(pool.clone(), UserId::new(user))
                    .create_exercise(&name)
                    .await?;
                println!("{}\t{}", exercise.id, exercise.name);
            }
        },
        Commands::Show { user, date } => {
            let session = Session::for_user(pool.clone(), UserId::new(user));
            let workouts = session.workouts_by_date(date).await?;
            if workouts.is_empty() {
                println!("No workouts on {date}");
            }
            for workout in workouts.iter() {
                println!("{workout}");
            }
        }
        Commands::Log {
            user,
            date,
            entries,
        } => {
            let session = Session::for_user(pool.clone(), UserId::new(user));
            log_workout(session, date, &entries).await?;
        }
        Commands::Token { .. } => {}
    }

    pool.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_parsing() {
        let (name, sets) = parse_entry(" Bench Press = 60x10, 82.5X8 ").unwrap();
        assert_eq!(name, "Bench Press");
        assert_eq!(
            sets,
            vec![
                ("60".to_string(), "10".to_string()),
                ("82.5".to_string(), "8".to_string())
            ]
        );
    }

    #[test]
    fn token_lifetime_in_seconds() {
        assert_eq!(ttl_seconds(24).unwrap(), 86_400);
        assert!(ttl_seconds(i64::MAX / 1000).is_err());
    }

    #[test]
    fn malformed_entries() {
        assert!(parse_entry("Bench Press").is_err());
        assert!(parse_entry("=60x10").is_err());
        assert!(parse_entry("Squat=").is_err());
        assert!(parse_entry("Squat=60-10").is_err());
    }

    #[tokio::test]
    async fn log_saves_one_workout() {
        let pool = db::memory_pool().await.unwrap();
        let session = Session::for_user(pool.clone(), UserId::new("user_cli"));
        let date = NaiveDate::from_ymd_opt(2025, 12, 16).unwrap();

        log_workout(
            session.clone(),
            date,
            &["Squat=60x10,100x8".to_string(), "Dips=0x12".to_string()],
        )
        .await
        .unwrap();

        let workouts = session.workouts_by_date(date).await.unwrap();
        assert_eq!(workouts.len(), 1);
        assert!(workouts[0].workout.is_completed());
        assert_eq!(workouts[0].set_count(), 3);
        assert_eq!(workouts[0].exercises[1].exercise.name, "Dips");
    }
}
