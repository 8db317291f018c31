use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use spellout_core::{IntentBus, TracingIntentLogger};
use spellout_runner::{
    build_engine, config::Config, input::parse_input, load_word_bank,
    presenter::JsonLinesPresenter,
};
use spellout_types::GamePhase;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr, stdout carries display intents
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    info!("Starting Spellout...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let word_bank = match load_word_bank(&config) {
        Ok(bank) => bank,
        Err(e) => {
            error!("Failed to load the word catalog: {:#}", e);
            error!("Unset SPELLOUT_WORDS_FILE to play with the built-in catalog.");
            std::process::exit(1);
        }
    };

    let mut engine = build_engine(&config, word_bank);
    let mut bus = IntentBus::new();
    bus.add_handler(Box::new(TracingIntentLogger));
    bus.add_handler(Box::new(JsonLinesPresenter::new(std::io::stdout())));
    bus.publish_all(&engine.welcome());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(config.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match parse_input(&line) {
                        Ok(input) => match engine.handle(input, Instant::now()) {
                            Ok(intents) => bus.publish_all(&intents),
                            Err(e) => warn!("Ignoring input: {}", e),
                        },
                        Err(e) => warn!("Could not read {:?}: {}", line, e),
                    }
                }
                Ok(None) => {
                    info!("Input closed");
                    break;
                }
                Err(e) => {
                    error!("Failed to read input: {}", e);
                    break;
                }
            },
            _ = ticker.tick() => match engine.tick(Instant::now()) {
                Ok(intents) => bus.publish_all(&intents),
                Err(e) => error!("Countdown failed: {}", e),
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }

        if engine.phase() == GamePhase::Closed {
            break;
        }
    }

    info!("Spellout stopped.");
}
