//! Utility Billing Engine CLI
//!
//! Command-line interface for applying billing actions from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- actions.csv > accounts.csv
//! cargo run -- --seed-demo --receipts-dir slips actions.csv > accounts.csv
//! cargo run -- --strategy async --batch-size 2000 actions.csv > accounts.csv
//! cargo run -- --filter Water --search jane --page 1 actions.csv
//! ```
//!
//! The program reads action records from the input CSV file, applies them
//! through the billing engine using the selected strategy, and outputs the
//! accounts selected by the dashboard view to stdout. Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid configuration, file not found, file not readable, etc.)

use std::process;
use utility_billing_engine::cli;
use utility_billing_engine::strategy;

fn main() {
    utility_billing_engine::init_tracing();

    let args = cli::parse_args();

    let config = match args.to_billing_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let strategy = {
        let batch_config = if args.strategy == cli::StrategyType::Async {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config, batch_config)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
