//! feed-runner: headless front end for the typo feed.
//!
//! Usage:
//!   feed-runner --region Poland --errors 3 --seed abc123 --pages 2
//!   feed-runner --region USA --random-seed --json
//!   feed-runner --config settings.json --ipc-mode

use anyhow::Result;
use typofeed_core::{
    rng::random_seed, snapshot::FeedSnapshot, FeedSettings, GenerationConfig, PageOutcome,
    PaginatedFeed, Region,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    More,
    Configure {
        region: Region,
        error_intensity: u8,
        seed: String,
    },
    RandomSeed,
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let region: Region = find_arg(&args, "--region").unwrap_or("Poland").parse()?;
    let errors = parse_arg(&args, "--errors", 0u8);
    let pages = parse_arg(&args, "--pages", 0usize);
    let total = args
        .windows(2)
        .find(|w| w[0] == "--total")
        .and_then(|w| w[1].parse::<u64>().ok());
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let json = args.iter().any(|a| a == "--json");
    let seed = if args.iter().any(|a| a == "--random-seed") {
        random_seed()
    } else {
        find_arg(&args, "--seed").unwrap_or_default().to_string()
    };
    let settings = match find_arg(&args, "--config") {
        Some(path) => FeedSettings::load(path)?,
        None => FeedSettings::default(),
    };

    let mut config = GenerationConfig::for_region(region, errors, seed);
    config.total_count = total;

    let mut feed = PaginatedFeed::new(settings);
    feed.initialize(config)?;

    if ipc_mode {
        return run_ipc_loop(&mut feed);
    }

    for _ in 0..pages {
        if feed.request_more()? == PageOutcome::Exhausted {
            break;
        }
    }

    let snapshot = feed.snapshot();
    if json {
        println!("{}", snapshot.to_json()?);
    } else {
        print_table(&snapshot, feed.settings());
    }
    Ok(())
}

fn run_ipc_loop(feed: &mut PaginatedFeed) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    // Initial state, so the consumer can render before sending anything.
    writeln!(stdout, "{}", feed.snapshot().to_json()?)?;
    stdout.flush()?;

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        let result = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => Ok(()),
            IpcCommand::More => feed.request_more().map(|_| ()),
            IpcCommand::Configure {
                region,
                error_intensity,
                seed,
            } => reconfigure(feed, GenerationConfig::for_region(region, error_intensity, seed)),
            IpcCommand::RandomSeed => {
                let mut config = feed.config().cloned().unwrap_or_default();
                config.seed = random_seed();
                reconfigure(feed, config)
            }
        };

        match result {
            Ok(()) => writeln!(stdout, "{}", feed.snapshot().to_json()?)?,
            Err(e) => {
                log::warn!("IPC command failed: {e}");
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

/// Restart the feed only when something actually changed.
fn reconfigure(feed: &mut PaginatedFeed, mut config: GenerationConfig) -> typofeed_core::FeedResult<()> {
    if let Some(current) = feed.config() {
        config.total_count = current.total_count;
        if *current == config {
            return Ok(());
        }
    }
    feed.reconfigure(config).map(|_| ())
}

fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(stdout, "{}", err_json)?;
    stdout.flush()?;
    Ok(())
}

fn print_table(snapshot: &FeedSnapshot, settings: &FeedSettings) {
    if let Some(config) = &snapshot.config {
        println!("typofeed feed-runner");
        println!("  region:    {}", config.region);
        println!("  locale:    {}", config.locale);
        println!("  errors:    {}", config.error_intensity);
        println!("  seed:      {:?}", config.seed);
        println!("  has more:  {}", snapshot.has_more);
        println!(
            "  paging:    {} then {} per page, {:?} noise",
            settings.initial_page_size, settings.page_size, settings.noise_mode
        );
        println!();
    }
    println!("{:>6}  {:<8}  {:<28}  {:<48}  {}", "Index", "Id", "Name", "Address", "Phone");
    for r in &snapshot.records {
        println!(
            "{:>6}  {:<8}  {:<28}  {:<48}  {}",
            r.index, r.identifier, r.name, r.address, r.phone
        );
    }
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
