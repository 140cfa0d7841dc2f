// Match board entry point.
//
// Startup sequence:
// 1. Handle CLI flags (--help, --version, --bracket exit early)
// 2. Initialize tracing (log to file, not terminal)
// 3. Load config (seeding config/ from defaults/)
// 4. Load team names and the schedule named in the config
// 5. Run the TUI until the operator quits

use std::path::Path;

use anyhow::Context;
use tracing::info;

use matchboard_core::config;
use matchboard_core::rankings;
use matchboard_core::seeding;
use matchboard_tui::app::App;
use matchboard_tui::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. CLI flags
    if handle_cli_args()? {
        return Ok(());
    }

    // 2. Tracing
    init_tracing()?;
    info!("match board starting up");

    // 3. Config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "config loaded: {} active / {} on deck, {} seeding",
        config.display.active_matches, config.display.on_deck_matches, config.seeding.strategy
    );

    // 4. Startup data. A bad file is shown on the board, not fatal.
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let mut app = App::new(config, cwd);
    if let Err(e) = app.load_startup_data() {
        app.set_error(format!("{e:#}"));
    }

    // 5. TUI
    tui::run(app).await?;

    info!("match board shut down cleanly");
    Ok(())
}

/// Returns true when the process should exit without starting the TUI.
fn handle_cli_args() -> anyhow::Result<bool> {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return Ok(false);
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            Ok(true)
        }
        "-V" | "--version" => {
            println!("matchboard {}", env!("CARGO_PKG_VERSION"));
            Ok(true)
        }
        "--bracket" => {
            let Some(path) = args.next() else {
                eprintln!("--bracket needs a rankings file\n\n{}", usage_text());
                std::process::exit(2);
            };
            print_bracket(Path::new(&path))?;
            Ok(true)
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

/// Seed a bracket from a rankings file and print it as JSON.
fn print_bracket(path: &Path) -> anyhow::Result<()> {
    let strategy = match config::load_config() {
        Ok(config) => config.seeding.strategy,
        Err(e) => {
            eprintln!("using default seeding strategy: {e}");
            seeding::SeedingStrategy::default()
        }
    };
    let list = rankings::load_rankings(path)
        .with_context(|| format!("failed to load rankings from {}", path.display()))?;
    let bracket = seeding::generate_matches(&list, strategy);
    if bracket.is_empty() {
        anyhow::bail!(
            "{} has fewer than {} ranked teams",
            path.display(),
            seeding::TEAMS_PER_MATCH
        );
    }
    let json = serde_json::to_string_pretty(&bracket).context("failed to encode bracket")?;
    println!("{json}");
    Ok(())
}

fn usage_text() -> &'static str {
    "matchboard - robotics tournament match board\n\n\
Usage:\n  matchboard [OPTIONS]\n\n\
Options:\n  \
--bracket <FILE>  Print the elimination bracket seeded from a rankings CSV as JSON\n  \
-h, --help        Show this help text\n  \
-V, --version     Show version\n\n\
Run from the directory holding config/ (or defaults/) and the data files."
}

/// Initialize tracing to log to a file (the terminal belongs to the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;
    let log_file = std::fs::File::create(log_dir.join("matchboard.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("matchboard=info,matchboard_tui=info,matchboard_core=info,warn")
        }))
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;
    Ok(())
}
