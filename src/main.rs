// algotty: step-through algorithm animator for the terminal

mod drivers;
mod engine;
mod ui;
mod vis;

use std::io;
use std::time::SystemTime;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use drivers::{random_values, Algorithm, DriverParams};
use ui::App;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} <algorithm> [values...] [options]", program_name);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --target <n>   search target / pair sum (default: picked from the input)");
    eprintln!("  --window <n>   sliding window length (default: a third of the input)");
    eprintln!("  --speed <ms>   base step duration in milliseconds (default: 300)");
    eprintln!("  --list         list available algorithms");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} bubble-sort                 # random array", program_name);
    eprintln!("  {} binary-search 10 20 30 40 50 --target 30", program_name);
    eprintln!("  {} merge-sort 5 3 8 1 9 2 --speed 150", program_name);
}

fn print_algorithms() {
    eprintln!("Available algorithms:");
    for algorithm in Algorithm::ALL {
        eprintln!("  {:<16} {}", algorithm.name(), algorithm.description());
    }
}

fn parse_number(flag: &str, value: Option<&String>) -> i64 {
    match value.map(|v| v.parse::<i64>()) {
        Some(Ok(n)) => n,
        _ => {
            eprintln!("Error: {} expects an integer argument", flag);
            std::process::exit(1);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("algotty");

    if args.len() < 2 {
        eprintln!("Error: No algorithm given");
        eprintln!();
        print_usage(program_name);
        eprintln!();
        print_algorithms();
        std::process::exit(1);
    }

    if args[1] == "--list" || args[1] == "-l" {
        print_algorithms();
        return Ok(());
    }

    let Some(algorithm) = Algorithm::parse(&args[1]) else {
        eprintln!("Error: Unknown algorithm '{}'", args[1]);
        eprintln!();
        print_algorithms();
        std::process::exit(1);
    };

    let mut values: Vec<i64> = Vec::new();
    let mut target: Option<i64> = None;
    let mut window: Option<i64> = None;
    let mut speed_ms: u64 = 300;

    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--target" => target = Some(parse_number("--target", rest.next())),
            "--window" => window = Some(parse_number("--window", rest.next())),
            "--speed" => {
                let ms = parse_number("--speed", rest.next());
                if ms <= 0 {
                    eprintln!("Error: --speed must be positive");
                    std::process::exit(1);
                }
                speed_ms = ms as u64;
            }
            other => match other.parse::<i64>() {
                Ok(n) => values.push(n),
                Err(_) => {
                    eprintln!("Error: '{}' is not an integer or a known option", other);
                    eprintln!();
                    print_usage(program_name);
                    std::process::exit(1);
                }
            },
        }
    }

    // Seed from the clock; any non-zero value will do
    let mut seed = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9e37_79b9)
        | 1;

    if values.is_empty() {
        values = random_values(&mut seed, 16, algorithm);
        eprintln!("No values given, generated {} random ones.", values.len());
    }

    algorithm.prepare_input(&mut values);

    let suggested = DriverParams::suggest(algorithm, &values);
    let params = DriverParams {
        target: target.unwrap_or(suggested.target),
        window: window
            .map(|w| w.max(1) as usize)
            .unwrap_or(suggested.window),
    };

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(algorithm, values, params, speed_ms, seed);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
