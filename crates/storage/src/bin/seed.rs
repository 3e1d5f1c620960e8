use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use portal_core::ProgressPercent;
use portal_core::model::{
    CourseDraft, CourseId, CourseProgress, LessonDraft, LessonId, LiveDraft, LiveId,
    MaterialDraft, MaterialId, ModuleDraft, ModuleId, UserId,
};
use storage::repository::Storage;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    user_id: UserId,
    progress: ProgressPercent,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidUserId { raw: String },
    InvalidProgress { raw: String },
    InvalidDbUrl { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidUserId { raw } => write!(f, "invalid --user value: {raw}"),
            ArgsError::InvalidProgress { raw } => write!(f, "invalid --progress value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_user(value: String) -> Result<UserId, ArgsError> {
    value
        .parse()
        .map_err(|_| ArgsError::InvalidUserId { raw: value })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("PORTAL_DB_URL").unwrap_or_else(|_| "sqlite:dev.sqlite3".into());
        let mut user_id = match std::env::var("PORTAL_USER_ID") {
            Ok(raw) => parse_user(raw)?,
            Err(_) => parse_user(DEMO_USER.into())?,
        };
        let mut progress = ProgressPercent::clamped(40);
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--user" => {
                    user_id = parse_user(require_value(&mut args, "--user")?)?;
                }
                "--progress" => {
                    let value = require_value(&mut args, "--progress")?;
                    let parsed = value
                        .parse::<i64>()
                        .map_err(|_| ArgsError::InvalidProgress { raw: value.clone() })?;
                    progress = ProgressPercent::new(parsed)
                        .map_err(|_| ArgsError::InvalidProgress { raw: value })?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            user_id,
            progress,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:dev.sqlite3)");
    eprintln!("  --user <uuid>             User whose progress is seeded");
    eprintln!("  --progress <0-100>        Stored course progress (default: 40)");
    eprintln!("  --now <rfc3339>           Fixed current time for deterministic seeding");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  PORTAL_DB_URL, PORTAL_USER_ID");
}

/// Stable demo user so repeated seeds line up with the app's default user.
const DEMO_USER: &str = "00000000-0000-4000-8000-000000000001";

const VIDEO: &str = "https://www.youtube.com/embed/dQw4w9WgXcQ";

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let mut now = args.now.unwrap_or_else(Utc::now);
    let mut tick = || {
        now += Duration::seconds(1);
        now
    };

    let course = CourseDraft {
        title: "Chatbot Fundamentals".into(),
        description: "Core concepts for building effective chatbots across platforms.".into(),
        category: "Chatbots".into(),
        image: "https://images.unsplash.com/photo-1531297484001-80022131f5a1".into(),
    }
    .validate(CourseId::random(), tick())?;
    storage.courses.insert_course(&course).await?;

    let outline: [(&str, &[(&str, &str)]); 2] = [
        (
            "Introduction to Chatbots",
            &[
                ("What chatbots are and how they work", "15:30"),
                ("History and evolution of chatbots", "12:45"),
                ("Kinds of chatbots on the market", "18:20"),
            ],
        ),
        (
            "Building Your First Chatbot",
            &[
                ("Planning and strategy", "22:15"),
                ("Basic conversation flows", "25:40"),
                ("Hands-on implementation", "30:10"),
                ("Testing and tuning", "20:30"),
            ],
        ),
    ];

    let mut lesson_count = 0;
    for (module_title, lessons) in outline {
        let module = ModuleDraft {
            course_id: course.id(),
            title: module_title.into(),
        }
        .validate(ModuleId::random(), tick())?;
        storage.modules.insert_module(&module).await?;

        for (title, duration) in lessons {
            let lesson = LessonDraft {
                module_id: module.id(),
                title: (*title).into(),
                duration: (*duration).into(),
                video_url: VIDEO.into(),
            }
            .validate(LessonId::random(), tick())?;
            storage.modules.insert_lesson(&lesson).await?;
            lesson_count += 1;
        }
    }

    storage
        .progress
        .upsert_progress(&CourseProgress::new(
            args.user_id,
            course.id(),
            args.progress,
            tick(),
        ))
        .await?;

    let lives = [
        ("Live Q&A: conversation design", 2024, 7, 10, "19:00", false),
        ("Case study: support bots", 2024, 5, 2, "20:00", true),
    ];
    for (title, y, m, d, time, is_past) in lives {
        let date = NaiveDate::from_ymd_opt(y, m, d).ok_or("invalid seed date")?;
        let live = LiveDraft {
            title: title.into(),
            description: String::new(),
            date,
            time: time.into(),
            image: String::new(),
            link: "https://meet.example.com/portal-live".into(),
            is_past,
        }
        .validate(LiveId::random(), tick())?;
        storage.lives.insert_live(&live).await?;
    }

    let materials = [
        ("Best Practices Guide", "Guides", "PDF"),
        ("Flow Templates", "Templates", "ZIP"),
    ];
    for (title, category, kind) in materials {
        let material = MaterialDraft {
            title: title.into(),
            description: String::new(),
            category: category.into(),
            download_url: "https://files.example.com/portal/download".into(),
            kind: kind.into(),
        }
        .validate(MaterialId::random(), tick())?;
        storage.materials.insert_material(&material).await?;
    }

    println!(
        "Seeded course {} ({} lessons, {} for user {}) plus {} lives and {} materials into {}",
        course.id(),
        lesson_count,
        args.progress,
        args.user_id,
        lives.len(),
        materials.len(),
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
