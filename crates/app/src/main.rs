use std::fmt;
use std::sync::Arc;

use portal_core::model::{CourseId, LessonId, UserId};
use services::{AppServices, Clock, TracingNotifier};
use tracing_subscriber::EnvFilter;

mod render;

/// Stable demo user shared with the seed binary.
const DEMO_USER: &str = "00000000-0000-4000-8000-000000000001";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingCommand,
    UnknownCommand(String),
    UnknownArg(String),
    InvalidCourseId { raw: String },
    InvalidLessonId { raw: String },
    InvalidUserId { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingCommand => write!(f, "missing subcommand"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCourseId { raw } => write!(f, "invalid course id: {raw}"),
            ArgsError::InvalidLessonId { raw } => write!(f, "invalid --lesson value: {raw}"),
            ArgsError::InvalidUserId { raw } => write!(f, "invalid --user value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Courses,
    Course(CourseId),
    Lives,
    Materials,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    command: Command,
    db_url: String,
    user_id: UserId,
    lesson: Option<LessonId>,
    json: bool,
    help: bool,
}

/// Values taken from the environment before flags are applied.
struct Defaults {
    db_url: Option<String>,
    user_id: Option<String>,
}

impl Defaults {
    fn from_env() -> Self {
        Self {
            db_url: std::env::var("PORTAL_DB_URL").ok(),
            user_id: std::env::var("PORTAL_USER_ID").ok(),
        }
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- courses            [options]");
    eprintln!("  cargo run -p app -- course <course-id> [options] [--lesson <lesson-id>]");
    eprintln!("  cargo run -p app -- lives              [options]");
    eprintln!("  cargo run -p app -- materials          [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>   SQLite URL (default: sqlite:dev.sqlite3)");
    eprintln!("  --user <uuid>       Whose progress to show (default: the demo user)");
    eprintln!("  --json              Print JSON instead of text");
    eprintln!("  -h, --help          Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PORTAL_DB_URL, PORTAL_USER_ID, RUST_LOG");
}

impl Args {
    fn parse(
        defaults: Defaults,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Self, ArgsError> {
        let command = match args.next().as_deref() {
            None => return Err(ArgsError::MissingCommand),
            Some("courses") => Command::Courses,
            Some("lives") => Command::Lives,
            Some("materials") => Command::Materials,
            Some("course") => {
                let raw = require_value(args, "course")?;
                let id = raw
                    .parse()
                    .map_err(|_| ArgsError::InvalidCourseId { raw })?;
                Command::Course(id)
            }
            Some(other) => return Err(ArgsError::UnknownCommand(other.to_owned())),
        };

        let mut db_url = defaults
            .db_url
            .map_or_else(|| normalize_sqlite_url("sqlite:dev.sqlite3".into()), normalize_sqlite_url);
        let mut user_id = parse_user(defaults.user_id.unwrap_or_else(|| DEMO_USER.into()))?;
        let mut lesson = None;
        let mut json = false;
        let mut help = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--user" => user_id = parse_user(require_value(args, "--user")?)?,
                "--lesson" if matches!(command, Command::Course(_)) => {
                    let raw = require_value(args, "--lesson")?;
                    let id = raw
                        .parse()
                        .map_err(|_| ArgsError::InvalidLessonId { raw })?;
                    lesson = Some(id);
                }
                "--json" => json = true,
                "--help" | "-h" => help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            command,
            db_url,
            user_id,
            lesson,
            json,
            help,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

/// Filter from `RUST_LOG` directives, falling back to `info` when unset or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn init_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1).peekable();
    if matches!(argv.peek().map(String::as_str), Some("--help" | "-h")) {
        print_usage();
        return Ok(());
    }

    let args = Args::parse(Defaults::from_env(), &mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    init_tracing();
    tracing::debug!(db = %args.db_url, user = %args.user_id, "starting");

    // Open + migrate SQLite here so services never touch the filesystem.
    prepare_sqlite_file(&args.db_url)?;
    let services = AppServices::new_sqlite(
        &args.db_url,
        Clock::default_clock(),
        Arc::new(TracingNotifier),
    )
    .await?;

    let output = match args.command {
        Command::Courses => {
            let cards = services.courses().course_cards(args.user_id).await?;
            if args.json {
                serde_json::to_string_pretty(&cards)?
            } else {
                render::course_cards(&cards)
            }
        }
        Command::Course(course_id) => {
            let detail = services
                .courses()
                .course_detail(course_id, args.user_id)
                .await?;
            if args.json {
                serde_json::to_string_pretty(&detail)?
            } else {
                let selected = detail.outline.select_lesson(args.lesson);
                render::course_detail(&detail, selected)
            }
        }
        Command::Lives => {
            let schedule = services.lives().schedule().await?;
            if args.json {
                serde_json::to_string_pretty(&schedule)?
            } else {
                render::schedule(&schedule)
            }
        }
        Command::Materials => {
            let materials = services.materials().list_materials().await?;
            if args.json {
                serde_json::to_string_pretty(&materials)?
            } else {
                render::materials(&materials)
            }
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;
    use std::sync::Mutex;

    fn parse(argv: &[&str]) -> Result<Args, ArgsError> {
        let defaults = Defaults {
            db_url: Some("sqlite:///tmp/portal.sqlite3".into()),
            user_id: None,
        };
        Args::parse(defaults, &mut argv.iter().map(|s| (*s).to_owned()))
    }

    #[test]
    fn course_command_takes_id_and_flags() {
        let course = CourseId::random();
        let lesson = LessonId::random();
        let args = parse(&[
            "course",
            &course.to_string(),
            "--json",
            "--lesson",
            &lesson.to_string(),
        ])
        .unwrap();
        assert_eq!(args.command, Command::Course(course));
        assert_eq!(args.lesson, Some(lesson));
        assert!(args.json);
        assert_eq!(args.db_url, "sqlite:///tmp/portal.sqlite3");
        assert_eq!(args.user_id.to_string(), DEMO_USER);
    }

    #[test]
    fn flags_override_environment() {
        let user = UserId::random();
        let args = parse(&["courses", "--db", "/var/portal.db", "--user", &user.to_string()])
            .unwrap();
        assert_eq!(args.db_url, "sqlite:///var/portal.db");
        assert_eq!(args.user_id, user);
    }

    #[test]
    fn help_is_accepted_after_the_command() {
        assert!(parse(&["courses", "--help"]).unwrap().help);
        assert!(parse(&["lives", "--json", "-h"]).unwrap().help);
        assert!(!parse(&["materials"]).unwrap().help);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured_logs(directives: Option<&str>) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(log_filter(directives))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("loaded 3 courses");
            tracing::info!("course created");
        });
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn rust_log_debug_lets_debug_events_through() {
        let logs = captured_logs(Some("debug"));
        assert!(logs.contains("loaded 3 courses"));
        assert!(logs.contains("course created"));
    }

    #[test]
    fn log_filter_defaults_to_info() {
        for directives in [None, Some("app=loud")] {
            let logs = captured_logs(directives);
            assert!(!logs.contains("loaded 3 courses"));
            assert!(logs.contains("course created"));
        }
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse(&[]).unwrap_err(), ArgsError::MissingCommand);
        assert_eq!(
            parse(&["course", "nope"]).unwrap_err(),
            ArgsError::InvalidCourseId { raw: "nope".into() }
        );
        assert_eq!(
            parse(&["lives", "--lesson", "x"]).unwrap_err(),
            ArgsError::UnknownArg("--lesson".into())
        );
        assert_eq!(
            parse(&["materials", "--db"]).unwrap_err(),
            ArgsError::MissingValue { flag: "--db" }
        );
        assert!(matches!(
            parse(&["podcasts"]).unwrap_err(),
            ArgsError::UnknownCommand(_)
        ));
    }
}
