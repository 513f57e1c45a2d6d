//! Duet headless driver
//!
//! Runs games without a window: the configured pilot steers (manual mode
//! simply holds), snapshots can be traced as JSON lines, and a JSON summary
//! is printed at the end.
//!
//! Usage: duet [--mode man|contr|ai] [--seed N] [--config FILE] [--games N]
//!             [--max-ticks N] [--realtime] [--trace]

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use duet::consts::TICK_DELAY_MS;
use duet::sim::{Snapshot, Steering};
use duet::{DuetError, Frontend, GameConfig, Mode, play};

/// Value following `flag`, parsed; missing or malformed values are errors
fn flag_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, DuetError> {
    let raw = args
        .get(i)
        .ok_or_else(|| DuetError::InvalidConfig(format!("{flag} needs a value")))?;
    raw.parse()
        .map_err(|_| DuetError::InvalidConfig(format!("invalid value '{raw}' for {flag}")))
}

/// Command line options
#[derive(Debug)]
struct Options {
    mode: Mode,
    seed: Option<u64>,
    config: Option<PathBuf>,
    games: usize,
    max_ticks: Option<u64>,
    realtime: bool,
    trace: bool,
}

impl Options {
    fn parse(args: &[String]) -> Result<Self, DuetError> {
        let mut options = Options {
            mode: Mode::Controller,
            seed: None,
            config: None,
            games: 1,
            max_ticks: None,
            realtime: false,
            trace: false,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--mode" => {
                    i += 1;
                    options.mode = args.get(i).map_or("", String::as_str).parse()?;
                }
                "--seed" => {
                    i += 1;
                    options.seed = Some(flag_value(args, i, "--seed")?);
                }
                "--config" => {
                    i += 1;
                    options.config = Some(flag_value(args, i, "--config")?);
                }
                "--games" => {
                    i += 1;
                    options.games = flag_value(args, i, "--games")?;
                    if options.games == 0 {
                        return Err(DuetError::InvalidConfig(
                            "--games must be at least 1".to_string(),
                        ));
                    }
                }
                "--max-ticks" => {
                    i += 1;
                    options.max_ticks = Some(flag_value(args, i, "--max-ticks")?);
                }
                "--realtime" => options.realtime = true,
                "--trace" => options.trace = true,
                other => log::warn!("Ignoring unknown argument '{}'", other),
            }
            i += 1;
        }

        Ok(options)
    }
}

/// Frontend with no window: counts ticks, optionally traces snapshots
struct Headless {
    games_left: usize,
    ticks: u64,
    max_ticks: Option<u64>,
    delay: Option<Duration>,
    trace: bool,
}

impl Frontend for Headless {
    fn steering(&mut self) -> Option<Steering> {
        None
    }

    fn close_requested(&mut self) -> bool {
        self.max_ticks.is_some_and(|limit| self.ticks >= limit)
    }

    fn present(&mut self, snapshot: &Snapshot) {
        self.ticks += 1;
        if self.trace {
            match serde_json::to_string(snapshot) {
                Ok(line) => println!("{}", line),
                Err(e) => log::warn!("Snapshot trace failed: {}", e),
            }
        }
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
    }

    fn game_over(&mut self, score: u64) -> bool {
        log::info!("Final score: {}", score);
        self.games_left = self.games_left.saturating_sub(1);
        self.games_left == 0
    }
}

/// Seed from the wall clock
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn run(args: &[String]) -> Result<(), DuetError> {
    let options = Options::parse(args)?;
    let config = match &options.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    log::info!("Duet (headless) starting in {} mode", options.mode.as_str());

    let mut frontend = Headless {
        games_left: options.games,
        ticks: 0,
        max_ticks: options.max_ticks,
        delay: options
            .realtime
            .then(|| Duration::from_millis(TICK_DELAY_MS)),
        trace: options.trace,
    };

    let mut next_seed = options.seed;
    let seeds = || match next_seed.as_mut() {
        Some(seed) => {
            let current = *seed;
            *seed = seed.wrapping_add(1);
            current
        }
        None => clock_seed(),
    };

    let summary = play(&config, options.mode, seeds, &mut frontend)?;
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("duet: {}", e);
            ExitCode::FAILURE
        }
    }
}
