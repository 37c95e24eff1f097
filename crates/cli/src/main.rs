//! gradplan CLI - course planning and graduation progress service.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gradplan_api::config::Config;
use gradplan_core::{Course, CourseCategory, CourseId, MajorTrackProgress, TrackProgress, UserId};
use gradplan_progress::{
    ProgressEngine, RequirementManager, StoredProgressEngine, StoredRequirementManager,
};
use gradplan_storage::{JsonStorage, Storage};

#[derive(Parser)]
#[command(name = "gradplan")]
#[command(about = "Course planning and graduation progress tracker", long_about = None)]
struct Cli {
    /// Data directory for the document store
    #[arg(long, default_value = ".gradplan")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Socket address to bind
        #[arg(long)]
        bind: Option<String>,
    },
    /// Print a user's graduation progress
    Progress {
        /// User ID
        user: String,
    },
    /// Create the baseline graduation requirement for a user
    InitRequirement {
        /// User ID
        user: String,
    },
    /// Add a course to the catalog
    AddCourse {
        /// Course code
        code: String,
        /// Display name
        name: String,
        /// Credit value
        credits: u32,
        /// Curriculum category (e.g. major_required)
        #[arg(long)]
        category: Option<String>,
        /// Owning department ID
        #[arg(long)]
        department: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind } => {
            let mut config = Config::load();
            config.data_dir = cli.data_dir;
            if let Some(bind) = bind {
                config.bind = bind;
            }
            info!("Using data directory {}", config.data_dir.display());
            gradplan_api::serve(config).await?;
        }
        Commands::Progress { user } => {
            let user_id: UserId = user
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid user ID"))?;
            let storage = Arc::new(JsonStorage::new(&cli.data_dir).await?);
            let engine = StoredProgressEngine::new(storage);

            let Some(progress) = engine.graduation_progress(user_id).await? else {
                println!("No graduation requirement configured for {}", user_id);
                return Ok(());
            };

            print_track("Total", &progress.total);
            print_major_track("Primary major", &progress.primary_major);
            print_track("General", &progress.general);
            if let Some(secondary) = &progress.secondary_major {
                print_major_track("Secondary major", secondary);
            }
            if let Some(minor) = &progress.minor {
                print_major_track("Minor", minor);
            }
            if let Some(floor) = &progress.minor_primary_major_min {
                println!(
                    "Primary-major floor: {}/{} cr ({}%)",
                    floor.earned, floor.required, floor.percentage
                );
            }
            println!(
                "Courses: {} completed, {} enrolled, {} planned",
                progress.courses.completed.len(),
                progress.courses.enrolled.len(),
                progress.courses.planned.len(),
            );
        }
        Commands::InitRequirement { user } => {
            let user_id: UserId = user
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid user ID"))?;
            let storage = Arc::new(JsonStorage::new(&cli.data_dir).await?);
            let manager = StoredRequirementManager::new(storage);

            let outcome = manager.ensure_baseline(user_id).await?;
            if outcome.created {
                println!("Created baseline requirement for {}", user_id);
            } else {
                println!("Requirement already exists for {}", user_id);
            }
            println!(
                "  Total: {} cr | Primary major: {} cr (core {}) | General: {} cr",
                outcome.requirement.total_credits,
                outcome.requirement.primary_major_credits,
                outcome.requirement.primary_major_required_min,
                outcome.requirement.general_credits,
            );
        }
        Commands::AddCourse {
            code,
            name,
            credits,
            category,
            department,
        } => {
            let category = match category.as_deref() {
                Some(s) => Some(
                    parse_category(s).ok_or_else(|| anyhow::anyhow!("Unknown category: {}", s))?,
                ),
                None => None,
            };
            let department = match department.as_deref() {
                Some(s) => Some(
                    s.parse()
                        .map_err(|_| anyhow::anyhow!("Invalid department ID"))?,
                ),
                None => None,
            };

            let storage = JsonStorage::new(&cli.data_dir).await?;
            let course = Course {
                id: CourseId::new(),
                code,
                name,
                credits,
                category,
                department,
            };
            storage.save_course(&course).await?;
            println!("Added course: {} - {} ({} cr)", course.id, course.code, course.credits);
        }
    }

    Ok(())
}

fn print_track(label: &str, track: &TrackProgress) {
    println!(
        "{}: {}/{} cr earned, {} enrolled, {} planned ({}%)",
        label, track.earned, track.required, track.enrolled, track.planned, track.percentage
    );
}

fn print_major_track(label: &str, track: &MajorTrackProgress) {
    println!(
        "{}: {}/{} cr earned, {} enrolled, {} planned ({}%)",
        label, track.earned, track.required, track.enrolled, track.planned, track.percentage
    );
    println!(
        "  core: {}/{} cr earned ({}%)",
        track.required_min.earned, track.required_min.required, track.required_min.percentage
    );
}

fn parse_category(s: &str) -> Option<CourseCategory> {
    match s {
        "major_required" => Some(CourseCategory::MajorRequired),
        "major_compulsory" => Some(CourseCategory::MajorCompulsory),
        "major_elective" => Some(CourseCategory::MajorElective),
        "general_required" => Some(CourseCategory::GeneralRequired),
        "general_elective" => Some(CourseCategory::GeneralElective),
        "free_elective" => Some(CourseCategory::FreeElective),
        "teaching" => Some(CourseCategory::Teaching),
        _ => None,
    }
}
