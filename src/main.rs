mod clock;
mod events;
mod input;
mod ui;

use clock::FrameClock;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use events::{apply_game_events, Hud};
use flappy::accounts::{BestScoreStore, FileStore};
use flappy::core::constants::{FRAME_INTERVAL_MS, LEADERBOARD_SIZE};
use flappy::utils::build_info;
use flappy::utils::persistence::flappy_dir;
use flappy::{GameConfig, GameEvent, GameSession, Variant};
use input::{map_key, KeyAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Longest stretch of wall time simulated in one go after a stall.
const MAX_CATCH_UP_MS: u64 = 100;

/// Options for a play session.
struct PlayOptions {
    variant: Variant,
    config_path: Option<PathBuf>,
    user: Option<String>,
    guest: bool,
}

fn print_help() {
    println!("Flappy - fly through the gaps\n");
    println!("Usage: flappy [options]");
    println!("       flappy register <name>");
    println!("       flappy leaderboard\n");
    println!("Options:");
    println!("  --variant <name>  classic, zoomed, winged or wide (default classic)");
    println!("  --config <path>   JSON file overriding game parameters");
    println!("  --user <name>     Log in and record scores for this user");
    println!("  --guest           Forget the saved login and play as guest");
    println!("  --version         Show version information");
    println!("  --help            Show this help message");
}

fn main() -> io::Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut options = PlayOptions {
        variant: Variant::Classic,
        config_path: None,
        user: None,
        guest: false,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "register" => {
                let Some(name) = iter.next() else {
                    exit_with("Usage: flappy register <name>");
                };
                return register_command(name);
            }
            "leaderboard" => return leaderboard_command(),
            "--variant" => {
                let name = iter.next().map(String::as_str).unwrap_or("");
                options.variant =
                    Variant::from_name(name).unwrap_or_else(|e| exit_with(&e.to_string()));
            }
            "--config" => match iter.next() {
                Some(path) => options.config_path = Some(PathBuf::from(path)),
                None => exit_with("--config needs a path"),
            },
            "--guest" => options.guest = true,
            "--user" => match iter.next() {
                Some(name) => options.user = Some(name.clone()),
                None => exit_with("--user needs a name"),
            },
            other => {
                eprintln!("Unknown command: {}", other);
                exit_with("Run 'flappy --help' for usage.");
            }
        }
    }

    play(options)
}

fn exit_with(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

/// Log to ~/.flappy/flappy.log so output never lands on the TUI.
/// Level comes from FLAPPY_LOG (default `warn`).
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let Ok(dir) = flappy_dir() else {
        return;
    };
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("flappy.log"))
    else {
        return;
    };
    let filter = EnvFilter::try_from_env("FLAPPY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
}

fn read_password(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn register_command(name: &str) -> io::Result<()> {
    let mut store = FileStore::open_default()?;
    let password = read_password("Choose a password: ")?;
    match store.register(name, &password, &mut rand::thread_rng()) {
        Ok(()) => {
            println!(
                "Registered '{}'. Play with: flappy --user {}",
                name.trim(),
                name.trim()
            );
            Ok(())
        }
        Err(e) => exit_with(&format!("Could not register: {}", e)),
    }
}

fn leaderboard_command() -> io::Result<()> {
    let store = FileStore::open_default()?;
    let board = store.leaderboard(LEADERBOARD_SIZE);
    if board.is_empty() {
        println!("No registered players yet.");
        return Ok(());
    }
    println!("{:>4}  {:<20}  {:>5}", "#", "Player", "Best");
    for entry in board {
        println!(
            "{:>4}  {:<20}  {:>5}",
            entry.rank, entry.username, entry.best_score
        );
    }
    println!("\nGuest best: {}", store.load_best(None));
    Ok(())
}

fn play(options: PlayOptions) -> io::Result<()> {
    let mut store = FileStore::open_default()?;

    let user = match &options.user {
        Some(name) => {
            let password = read_password(&format!("Password for {}: ", name))?;
            match store.login(name, &password) {
                Ok(name) => Some(name),
                Err(e) => exit_with(&format!("Login failed: {}", e)),
            }
        }
        None if options.guest => {
            if let Err(e) = store.logout() {
                tracing::warn!(error = %e, "could not clear saved login");
            }
            None
        }
        // Last login stays active until --guest or another --user
        None => store.current_user(),
    };

    let config = match &options.config_path {
        Some(path) => GameConfig::load_from_file(path)
            .unwrap_or_else(|e| exit_with(&format!("Could not read {}: {}", path.display(), e))),
        None => options.variant.config(),
    };
    let best = store.load_best(user.as_deref());
    let mut session = GameSession::new(config, best)
        .unwrap_or_else(|e| exit_with(&format!("Invalid game configuration: {}", e)));
    let mut hud = Hud::new(user.clone(), options.variant);

    tracing::info!(variant = options.variant.name(), user = ?user, best, "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut session, &mut store, user.as_deref(), &mut hud);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<W: Write>(
    terminal: &mut Terminal<CrosstermBackend<W>>,
    session: &mut GameSession,
    store: &mut FileStore,
    user: Option<&str>,
    hud: &mut Hud,
) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut clock = FrameClock::new(Instant::now());
    let mut accumulated_ms: u64 = 0;

    loop {
        let snapshot = session.snapshot();
        terminal.draw(|frame| {
            let area = frame.size();
            ui::render_play(frame, area, &snapshot, hud);
        })?;

        if event::poll(Duration::from_millis(FRAME_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                let events = match map_key(key) {
                    KeyAction::Tap => session.apply_input(&mut rng),
                    KeyAction::Restart => session.restart_session(&mut rng),
                    KeyAction::Quit => return Ok(()),
                    KeyAction::Ignore => Vec::new(),
                };
                present(hud, &events)?;
            }
        }

        let elapsed_ms = clock.take_elapsed_ms(Instant::now());

        // Countdown runs on wall time, independent of frame pacing
        let events = session.advance_countdown(elapsed_ms);
        present(hud, &events)?;

        accumulated_ms += elapsed_ms.min(MAX_CATCH_UP_MS);
        while accumulated_ms >= FRAME_INTERVAL_MS {
            accumulated_ms -= FRAME_INTERVAL_MS;
            hud.tick();
            let result = session.tick(&mut rng);
            present(hud, &result.events)?;
            if result.best_score_changed {
                if let Err(e) = store.save_best(user, session.best_score()) {
                    tracing::warn!(error = %e, "could not save best score");
                }
            }
        }
    }
}

fn present(hud: &mut Hud, events: &[GameEvent]) -> io::Result<()> {
    if apply_game_events(hud, events) {
        let mut out = io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
    }
    Ok(())
}
