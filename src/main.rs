//! Bank Ledger CLI
//!
//! Command-line front end for the bank back-office: manage clients, ATM
//! locations and services, authenticate users, move money, and export or
//! import table snapshots.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- init
//! cargo run -- add-client --name Ann --login ann --password secret --balance 500 --account-number 111 --phone 9001
//! cargo run -- transfer-by-account --from 111 --to 222 --amount 50
//! cargo run -- --snapshot-dir backups export --table clients --format xml
//! RUST_LOG=debug cargo run -- list-clients
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid credential, failed transfer, unreadable snapshot, etc.)

use bank_ledger::cli;
use log::error;
use std::process;

fn main() {
    env_logger::init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            process::exit(1);
        }
    };

    // Results go to stdout
    let mut output = std::io::stdout();
    if let Err(e) = runtime.block_on(cli::run(args, &mut output)) {
        error!("{:?}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
