use std::env;
use std::fs;
use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::{Local, Utc};
use crossbeam_channel::{select, unbounded, Receiver};

use anyhow::Context;

use votewise_client::ballot::{BallotPage, PageData};
use votewise_client::config::ClientConfig;
use votewise_client::error::AppResult;
use votewise_client::messaging::{Command, Event, EventBus, SelectionStatus};
use votewise_client::results::{
    countdown_display, updated_at_display, ResultsBoard, ResultsClient, ResultsPoller, ResultsView,
};
use votewise_client::session::{Ticker, VotingSession};
use votewise_client::wizard::{ConfirmationSummary, FormSubmitter};

const LOG_TARGET_STARTUP: &str = "votewise_client::startup";

/// Initialize tracing with file rotation
///
/// Logs are written to:
/// - macOS: ~/Library/Application Support/VoteWise/logs/
/// - Windows: %APPDATA%/VoteWise/logs/
/// - Linux: ~/.config/VoteWise/logs/
///
/// Log rotation is daily; debug builds also log to the console.
fn initialize_tracing() {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_dir = dirs::config_dir()
        .map(|dir| dir.join("VoteWise").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    let file_appender = rolling::daily(&log_dir, "votewise-client.log");

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    #[cfg(debug_assertions)]
    {
        let console_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .init();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();
    }

    tracing::info!(target: LOG_TARGET_STARTUP, "Log directory: {}", log_dir.display());
}

fn main() {
    initialize_tracing();

    println!("===========================================");
    println!("  VoteWise - Voting Client");
    println!("===========================================\n");

    let cfg = match ClientConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("✗ Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        target: LOG_TARGET_STARTUP,
        "Starting VoteWise client v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("--results") => {
            let url = args
                .get(2)
                .cloned()
                .unwrap_or_else(|| cfg.results_url.clone());
            run_results_watch(&cfg, &url);
        }
        Some("--help") | None => print_usage(),
        Some(page_path) => {
            let post_url = match args.get(2).map(String::as_str) {
                Some("--post") => match args.get(3) {
                    Some(url) => Some(url.clone()),
                    None => {
                        eprintln!("✗ --post requires a URL");
                        std::process::exit(1);
                    }
                },
                _ => None,
            };
            run_voting_session(page_path, post_url, &cfg);
        }
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  votewise-client <page.json> [--post <url>]");
    println!("      Drive the ballot wizard for the given page model.");
    println!("      With --post, the confirmed ballot is posted to <url>.");
    println!("  votewise-client --results [url]");
    println!("      Watch the public results endpoint.\n");
    println!("Session commands:");
    print_session_help();
}

fn print_session_help() {
    println!("  start                  begin the timed session");
    println!("  toggle <pos> <cand>    toggle a candidate for a position");
    println!("  next / back            navigate between steps");
    println!("  submit                 open the confirmation dialog");
    println!("  confirm / cancel       close the confirmation dialog");
    println!("  quit                   leave without voting");
}

enum Input {
    Command(Command),
    Quit,
}

fn spawn_stdin_reader() -> Receiver<Input> {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(_) => break,
            };
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let command = match tokens.as_slice() {
                [] => continue,
                ["start"] => Command::StartSession,
                ["toggle", position, candidate] => Command::ToggleCandidate {
                    position_id: position.to_string(),
                    candidate_id: candidate.to_string(),
                },
                ["next"] => Command::Advance,
                ["back"] => Command::Retreat,
                ["submit"] => Command::OpenConfirmation,
                ["confirm"] => Command::ConfirmSubmission,
                ["cancel"] => Command::CancelConfirmation,
                ["quit"] | ["exit"] => {
                    let _ = tx.send(Input::Quit);
                    break;
                }
                _ => {
                    print_session_help();
                    continue;
                }
            };
            if tx.send(Input::Command(command)).is_err() {
                break;
            }
        }
    });
    rx
}

fn load_page(page_path: &str) -> AppResult<BallotPage> {
    let raw = fs::read_to_string(page_path)
        .with_context(|| format!("Failed to read page model {}", page_path))?;
    let data = PageData::from_str(&raw).context("Failed to parse embedded page data")?;
    let page = BallotPage::from_page(&data).context("Page has no usable ballot")?;
    Ok(page)
}

fn run_voting_session(page_path: &str, post_url: Option<String>, cfg: &ClientConfig) {
    let page = match load_page(page_path) {
        Ok(page) => page,
        Err(e) => {
            eprintln!("✗ {:#}", e);
            std::process::exit(1);
        }
    };

    println!("✓ Loaded ballot page");
    if let Some(election) = page.election() {
        println!("  Election: {}", election);
    }
    for position in page.positions() {
        println!(
            "  [{}] {} (select up to {})",
            position.id, position.name, position.max_winners
        );
        for candidate in &position.candidates {
            println!("      [{}] {}", candidate.id, candidate.name);
        }
    }
    println!();
    print_session_help();
    println!();

    let bus: EventBus<Event> = EventBus::new();
    let (events, _sub) = bus.subscribe();
    let mut session = VotingSession::new(page, cfg.session_timings(), bus);

    let (tick_tx, tick_rx) = unbounded();
    let ticker = Ticker::start(Duration::from_secs(1), tick_tx);
    let inputs = spawn_stdin_reader();

    let submitter = post_url
        .map(|url| FormSubmitter::new(url, Duration::from_secs(cfg.request_timeout_secs)));
    let mut renderer = EventRenderer::new(submitter);

    loop {
        select! {
            recv(inputs) -> msg => match msg {
                Ok(Input::Command(command)) => session.handle(command),
                Ok(Input::Quit) | Err(_) => break,
            },
            recv(tick_rx) -> msg => match msg {
                Ok(()) => session.handle(Command::Tick),
                Err(_) => break,
            },
            recv(events) -> msg => match msg {
                Ok(event) => {
                    if renderer.render(&event) {
                        break;
                    }
                }
                Err(_) => break,
            },
        }
    }

    ticker.stop();
    println!("\nGoodbye.");
}

/// Renders session events to the terminal, standing in for the page.
struct EventRenderer {
    submitter: Option<FormSubmitter>,
    warned: bool,
}

impl EventRenderer {
    fn new(submitter: Option<FormSubmitter>) -> Self {
        Self {
            submitter,
            warned: false,
        }
    }

    /// Returns true when the session is over.
    fn render(&mut self, event: &Event) -> bool {
        match event {
            Event::StepChanged { to, .. } => println!("→ Now on {}", to),
            Event::SelectionAdded {
                position_id,
                candidate_id,
            } => println!("✓ Selected {} for position {}", candidate_id, position_id),
            Event::SelectionRemoved {
                position_id,
                candidate_id,
            } => println!("✓ Deselected {} for position {}", candidate_id, position_id),
            Event::SelectionRejected { max_winners, .. } => println!(
                "✗ You can only select {} candidate(s) for this position.",
                max_winners
            ),
            Event::ProgressChanged { fraction } => {
                println!("  Progress: {:.0}%", fraction * 100.0)
            }
            Event::VoteSummaryChanged {
                selected,
                positions,
            } => println!(
                "  {} candidate(s) selected across {} position(s)",
                selected, positions
            ),
            Event::SubmitReadinessChanged { ready } => {
                if *ready {
                    println!("  All positions filled - ready to submit");
                }
            }
            Event::ReviewPopulated { rows } => {
                println!("----- Review your ballot -----");
                for row in rows {
                    let badge = match row.status {
                        SelectionStatus::Complete => "Complete",
                        SelectionStatus::Pending => "Pending",
                    };
                    println!(
                        "  {} [{}] {}",
                        row.position_name,
                        badge,
                        row.candidate_names.join(", ")
                    );
                }
            }
            Event::ConfirmationOpened { summary } => {
                println!("----- Confirm your vote -----");
                match summary {
                    ConfirmationSummary::NoCandidates => println!("  No candidates selected"),
                    ConfirmationSummary::Selections(lines) => {
                        for line in lines {
                            println!(
                                "  {}: {}",
                                line.position_name,
                                line.candidate_names.join(", ")
                            );
                        }
                    }
                }
                println!("Type 'confirm' to cast your vote or 'cancel' to go back.");
            }
            Event::ConfirmationClosed => println!("Confirmation closed."),
            Event::BallotSubmitted { payload, forced } => {
                if *forced {
                    println!("✗ Time expired - ballot submitted automatically:");
                } else {
                    println!("✓ Ballot submitted:");
                }
                for (name, value) in payload.fields() {
                    println!("  {} = {}", name, value);
                }
                if let Some(submitter) = &self.submitter {
                    match submitter.submit(payload) {
                        Ok(()) => println!("✓ Vote recorded by the server"),
                        Err(e) => eprintln!("✗ Ballot post failed: {}", e),
                    }
                }
                return true;
            }
            Event::SessionStarted { duration_secs } => {
                println!("✓ Session started: {} remaining", mmss(*duration_secs));
            }
            Event::ImmersiveChanged { active } => {
                if *active {
                    println!("  (immersive mode: page chrome hidden)");
                }
            }
            Event::TimerTick { remaining_secs } => {
                if *remaining_secs > 0 && remaining_secs % 30 == 0 {
                    println!("⏱ {} remaining", mmss(*remaining_secs));
                }
            }
            Event::TimerWarning { remaining_secs } => {
                if !self.warned {
                    self.warned = true;
                    println!("⚠ Less than a minute left: {}", mmss(*remaining_secs));
                }
            }
            Event::SessionExpired => {
                println!("✗ Time is up. Your ballot will be submitted as-is.");
            }
            Event::NavigationGuardChanged { active } => {
                if *active {
                    println!("  (leaving this page now would discard your selections)");
                }
            }
        }
        false
    }
}

fn mmss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn run_results_watch(cfg: &ClientConfig, url: &str) {
    println!("✓ Watching results at {}", url);
    println!("  Polling every {}s\n", cfg.poll_interval_secs);

    let client = Arc::new(ResultsClient::new(
        url,
        Duration::from_secs(cfg.request_timeout_secs),
    ));
    let board = ResultsBoard::new();
    let poller = ResultsPoller::start(
        client,
        board.clone(),
        Duration::from_secs(cfg.poll_interval_secs),
    );

    let (tick_tx, tick_rx) = unbounded();
    let ticker = Ticker::start(Duration::from_secs(1), tick_tx);

    let mut until_refresh = cfg.poll_interval_secs;
    while tick_rx.recv().is_ok() {
        until_refresh = if until_refresh <= 1 {
            cfg.poll_interval_secs
        } else {
            until_refresh - 1
        };

        let (latest, error) = board.snapshot();

        if let Some(message) = &error {
            println!("✗ {} (retrying on next poll)", message);
        }

        let Some(payload) = latest else {
            continue;
        };

        match payload.view() {
            ResultsView::NoData => {
                println!("No election is currently active.");
            }
            ResultsView::Standings {
                total_votes,
                closed,
                positions,
            } => {
                println!("----- {} total votes -----", total_votes);
                if let Some(end) = payload.end_time() {
                    println!("  Voting ends in: {}", countdown_display(end, Utc::now()));
                }
                for standing in positions {
                    println!("  {}:", standing.position);
                    for candidate in standing.candidates {
                        let badge = if candidate.winner { "  [WINNER]" } else { "" };
                        println!(
                            "    {:>5} votes ({:>5.1}%)  {}{}",
                            candidate.votes, candidate.percentage, candidate.name, badge
                        );
                    }
                }
                if closed {
                    println!("  Election closed - results are final.");
                }
            }
        }
        println!(
            "  {}  (next update in {}s)\n",
            updated_at_display(Local::now()),
            until_refresh
        );
    }

    ticker.stop();
    poller.stop();
}
