//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    use chromapick_app::{Outcome, Session, commands};
    use chromapick_core::PickerConfig;
    use std::io::BufRead;

    env_logger::init();
    log::info!("Starting chromapick");

    let mut config_path = None;
    let mut controlled = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--controlled" => controlled = true,
            "-h" | "--help" => {
                println!("Usage: chromapick [config.json] [--controlled]");
                return;
            }
            _ => config_path = Some(arg),
        }
    }

    let config = match config_path {
        Some(path) => match PickerConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => PickerConfig::default(),
    };

    let mut session = Session::new(config, controlled);
    println!("{}", session.describe());

    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
        };
        match commands::parse(&line) {
            Ok(None) => {}
            Ok(Some(command)) => match session.execute(command) {
                Outcome::Continue(out) => println!("{out}"),
                Outcome::Quit => break,
            },
            Err(e) => eprintln!("{e}"),
        }
    }

    log::info!("Exiting chromapick");
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
