use censy::{tracing_err, BannedWordSet, DatamuseOracle, MessageChecker};
use clap::Parser;
use futures::prelude::*;
use std::panic::AssertUnwindSafe;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Checks the message for the banned words and prints the verdict as JSON.
///
/// Exits with 0 if the message is clean, 1 if it is flagged and 2 on errors.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Banned word to look for. May be specified multiple times
    #[arg(short, long = "word", required = true)]
    words: Vec<String>,

    /// Text of the message. Read from stdin if omitted
    message: Option<String>,
}

const EXIT_FLAGGED: u8 = 1;
const EXIT_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if dotenvy::dotenv().is_err() {
        eprintln!("Dotenv config was not found, ignoring this...")
    }

    let logging_task = censy::init_logging();

    let exit_code = AssertUnwindSafe(async {
        let result = try_main(args).await;

        result.unwrap_or_else(|err| {
            if err.is_user_error() {
                warn!(err = tracing_err(&err), "Invalid input, exiting...");
            } else {
                error!(err = tracing_err(&err), "Exitting with an error...");
            }
            ExitCode::from(EXIT_ERROR)
        })
    })
    .catch_unwind()
    .unwrap_or_else(|_| {
        error!("Exitting due to a panic...");
        ExitCode::from(EXIT_ERROR)
    })
    .await;

    logging_task.shutdown().await;

    exit_code
}

async fn try_main(args: Args) -> censy::Result<ExitCode> {
    let config = censy::Config::load_or_panic();

    let banned_words = BannedWordSet::from_words(&args.words)?;

    let message = match args.message {
        Some(message) => message,
        None => std::io::read_to_string(std::io::stdin())?,
    };

    let oracle = DatamuseOracle::new(config.datamuse)?;
    let checker = MessageChecker::new(Arc::new(oracle), config.checker);

    let result = checker
        .check_message(&message, banned_words.as_slice())
        .await?;

    let output = serde_json::to_string_pretty(&result).unwrap_or_else(|err| {
        panic!("BUG: the check result is not serializable to JSON: {err:#?}")
    });

    println!("{output}");

    info!(flagged = result.is_flagged(), "Finished checking the message");

    Ok(if result.is_flagged() {
        ExitCode::from(EXIT_FLAGGED)
    } else {
        ExitCode::SUCCESS
    })
}
