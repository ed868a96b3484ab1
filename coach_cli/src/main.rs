use chrono::Utc;
use clap::{Parser, Subcommand};
use coach_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "coach")]
#[command(about = "Adaptive workout planning and recommendations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Score readiness from a health-metric snapshot
    Readiness {
        /// Snapshot JSON file
        #[arg(long)]
        metrics: PathBuf,
    },

    /// Generate a weekly workout plan
    Plan {
        /// Fitness goal (weight_loss, muscle_gain, flexibility, general_fitness, endurance)
        #[arg(long = "goal")]
        goals: Vec<String>,

        /// Available equipment; bodyweight exercises are always allowed
        #[arg(long)]
        equipment: Vec<String>,

        /// Fitness level (beginner, intermediate, advanced)
        #[arg(long)]
        level: Option<String>,

        /// Minutes per session
        #[arg(long)]
        minutes: Option<u32>,

        /// Sessions per week (1-7)
        #[arg(long)]
        sessions: Option<u32>,

        /// Write the plan here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Adapt a plan to current metrics and feedback
    Adapt {
        /// Plan JSON file
        #[arg(long)]
        plan: PathBuf,

        /// Snapshot JSON file
        #[arg(long)]
        metrics: PathBuf,

        /// Free-text feedback about the last workout
        #[arg(long)]
        feedback: Option<String>,

        /// Extra adaptation reason (e.g. illness, equipment_unavailable)
        #[arg(long)]
        reason: Option<String>,

        /// Write the adapted plan here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List alternatives for an exercise
    Alternatives {
        /// Exercise id
        exercise: String,

        /// Injury category (knee_injury, back_injury, shoulder_injury, wrist_injury)
        #[arg(long)]
        injury: Option<String>,
    },

    /// Browse the exercise catalog
    Exercises {
        /// Category (cardio, strength, flexibility, yoga, hiit)
        #[arg(long)]
        category: Option<String>,

        /// Targeted muscle group
        #[arg(long = "muscle")]
        muscles: Vec<String>,

        /// Available equipment
        #[arg(long)]
        equipment: Vec<String>,
    },

    /// Show recommended workouts (default)
    Recommend {
        /// Chat message fed to the scenario detector, in order
        #[arg(long = "message")]
        messages: Vec<String>,

        /// Current readiness score
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        readiness: Option<u8>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    coach_core::logging::init_with_level(coach_core::logging::level_for_verbosity(cli.verbose));

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let catalog = get_default_catalog().clone();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let mut coach = Coach::new(catalog, config);

    match cli.command {
        Some(Commands::Readiness { metrics }) => cmd_readiness(&coach, &metrics),
        Some(Commands::Plan {
            goals,
            equipment,
            level,
            minutes,
            sessions,
            out,
        }) => cmd_plan(
            &mut coach,
            &goals,
            equipment,
            level.as_deref(),
            minutes,
            sessions,
            out.as_deref(),
        ),
        Some(Commands::Adapt {
            plan,
            metrics,
            feedback,
            reason,
            out,
        }) => cmd_adapt(
            &mut coach,
            &plan,
            &metrics,
            feedback.as_deref(),
            reason.as_deref(),
            out.as_deref(),
        ),
        Some(Commands::Alternatives { exercise, injury }) => {
            cmd_alternatives(&coach, &exercise, injury.as_deref())
        }
        Some(Commands::Exercises {
            category,
            muscles,
            equipment,
        }) => cmd_exercises(&coach, category.as_deref(), muscles, equipment),
        Some(Commands::Recommend {
            messages,
            readiness,
        }) => cmd_recommend(&coach, &messages, readiness),
        None => {
            // Default to "recommend" command
            cmd_recommend(&coach, &[], None)
        }
    }
}

fn cmd_readiness(coach: &Coach, metrics_path: &Path) -> Result<()> {
    let metrics = load_snapshot(metrics_path)?;
    let score = coach.calculate_readiness_score(&metrics)?;
    let analysis = analyze(&metrics)?;

    println!("Readiness: {}/100", score);
    if analysis.needs_adaptation {
        println!("Adaptation needed (severity: {:?})", analysis.severity);
        for finding in &analysis.findings {
            println!("  - {} ({:?})", finding.reason.as_str(), finding.severity);
        }
    } else {
        println!("No adaptation needed");
    }
    Ok(())
}

fn cmd_plan(
    coach: &mut Coach,
    goals: &[String],
    equipment: Vec<String>,
    level: Option<&str>,
    minutes: Option<u32>,
    sessions: Option<u32>,
    out: Option<&Path>,
) -> Result<()> {
    let mut request = coach.default_plan_request();

    if !goals.is_empty() {
        request.goals = goals
            .iter()
            .map(|g| {
                FitnessGoal::parse(g)
                    .ok_or_else(|| Error::InvalidInput(format!("Unknown goal: {}", g)))
            })
            .collect::<Result<Vec<_>>>()?;
    }
    if !equipment.is_empty() {
        request.equipment = equipment;
    }
    if let Some(level) = level {
        request.fitness_level = FitnessLevel::parse(level)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown fitness level: {}", level)))?;
    }
    if let Some(minutes) = minutes {
        request.session_minutes = minutes;
    }
    if let Some(sessions) = sessions {
        request.sessions_per_week = sessions;
    }

    let plan = coach.generate_workout_plan(&request, Utc::now())?;
    emit_plan(&plan, out)
}

fn cmd_adapt(
    coach: &mut Coach,
    plan_path: &Path,
    metrics_path: &Path,
    feedback: Option<&str>,
    reason: Option<&str>,
    out: Option<&Path>,
) -> Result<()> {
    let plan = load_plan(plan_path)?;
    let metrics = load_snapshot(metrics_path)?;
    let now = Utc::now();

    let mut adapted = coach.adapt_workout(&plan, &metrics, feedback, now)?;

    if let Some(reason) = reason {
        let reason = AdaptationReason::parse(reason)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown adaptation reason: {}", reason)))?;
        let extra = adaptation_for(reason, Severity::Moderate, Some(&adapted), now);
        adapted = apply_adaptations(&adapted, &[extra], now);
    }

    let added = adapted.adaptations.len() - plan.adaptations.len();
    if added == 0 {
        eprintln!("No adaptations needed");
    } else {
        for adaptation in &adapted.adaptations[plan.adaptations.len()..] {
            for change in &adaptation.changes {
                eprintln!(
                    "Adapted for {}: {}",
                    adaptation.reason.as_str(),
                    change.description
                );
            }
        }
    }

    emit_plan(&adapted, out)
}

fn cmd_alternatives(coach: &Coach, exercise: &str, injury: Option<&str>) -> Result<()> {
    let found = coach.alternative_exercises(exercise, injury)?;

    if found.is_empty() {
        println!("No alternatives found for {}", exercise);
        return Ok(());
    }

    for alt in found {
        println!(
            "{}\t{}\t{:?}\t{} min",
            alt.id, alt.name, alt.difficulty, alt.duration_minutes
        );
    }
    Ok(())
}

fn cmd_exercises(
    coach: &Coach,
    category: Option<&str>,
    muscles: Vec<String>,
    equipment: Vec<String>,
) -> Result<()> {
    let category = category
        .map(|c| {
            ExerciseCategory::parse(c)
                .ok_or_else(|| Error::InvalidInput(format!("Unknown category: {}", c)))
        })
        .transpose()?;

    let filter = ExerciseFilter {
        category,
        muscle_groups: muscles,
        equipment: if equipment.is_empty() {
            None
        } else {
            Some(equipment)
        },
    };

    let exercises = coach.exercises_by_category(&filter);
    if exercises.is_empty() {
        println!("No exercises match");
    }
    for exercise in exercises {
        println!(
            "{}\t{}\t{:?}\t{:?}",
            exercise.id, exercise.name, exercise.category, exercise.difficulty
        );
    }
    Ok(())
}

fn cmd_recommend(coach: &Coach, messages: &[String], readiness: Option<u8>) -> Result<()> {
    let mut state = ScenarioState::default();
    for message in messages {
        if coach.process_chat_message(&mut state, message) {
            if let Some(scenario) = state.active() {
                eprintln!("Scenario detected: {:?}", scenario);
            }
        }
    }

    let preferences = readiness.map(|score| RecommendationPreferences {
        readiness: Some(score),
        ..Default::default()
    });

    let recs = coach.recommended_workouts(&state, preferences.as_ref(), Utc::now());
    if recs.is_empty() {
        println!("No recommendations");
    }
    for (i, rec) in recs.iter().enumerate() {
        let minutes = rec
            .plan
            .daily_workouts
            .first()
            .map_or(0, |d| d.duration_minutes);
        println!(
            "{}. [{:?}] {} ({} min) - {}",
            i + 1,
            rec.priority,
            rec.plan.name,
            minutes,
            rec.reason
        );
    }
    Ok(())
}

fn emit_plan(plan: &WorkoutPlan, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            save_plan(plan, path)?;
            println!("Wrote plan {} to {}", plan.id, path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(plan)?),
    }
    Ok(())
}
