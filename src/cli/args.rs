use crate::io::{SnapshotFormat, SnapshotTable};
use crate::types::Role;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bank back-office: clients, ATMs, services and money transfers
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(
    about = "Bank back-office: clients, ATMs, services and money transfers",
    long_about = None
)]
pub struct CliArgs {
    /// SQLite database file, created and bootstrapped if missing
    #[arg(
        long = "database",
        value_name = "PATH",
        default_value = "bank.db",
        global = true,
        help = "Path to the SQLite database file"
    )]
    pub database: PathBuf,

    /// Directory holding snapshot files for export/import
    #[arg(
        long = "snapshot-dir",
        value_name = "DIR",
        default_value = ".",
        global = true,
        help = "Directory where snapshot files are written and read"
    )]
    pub snapshot_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations available from the command line
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create tables and seed managers
    Init,

    /// Check a login/password pair
    Login {
        #[arg(long, value_enum, default_value = "client")]
        role: Role,
        #[arg(long)]
        login: String,
        #[arg(long)]
        password: String,
    },

    /// Add a client
    AddClient {
        #[arg(long)]
        name: String,
        #[arg(long)]
        login: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value_t = 0)]
        balance: i64,
        #[arg(long = "account-number")]
        account_number: i64,
        #[arg(long = "phone")]
        phone_number: i64,
    },

    /// Add an ATM location
    AddAtm {
        #[arg(long)]
        name: String,
        #[arg(long)]
        street: String,
    },

    /// Add a payable service
    AddService {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: i64,
    },

    /// List all clients
    ListClients,

    /// List all ATM locations
    ListAtms,

    /// List all services
    ListServices,

    /// Show the accounts of one client
    Accounts {
        #[arg(long = "client-id")]
        client_id: i64,
    },

    /// Transfer between clients addressed by phone number
    TransferByPhone {
        #[arg(long)]
        from: i64,
        #[arg(long)]
        to: i64,
        #[arg(long, allow_hyphen_values = true)]
        amount: i64,
    },

    /// Transfer between clients addressed by account number
    TransferByAccount {
        #[arg(long)]
        from: i64,
        #[arg(long)]
        to: i64,
        #[arg(long, allow_hyphen_values = true)]
        amount: i64,
    },

    /// Pay a service from an account and set its new price
    PayService {
        #[arg(long)]
        from: i64,
        #[arg(long = "service-id")]
        service_id: i64,
        #[arg(long, allow_hyphen_values = true)]
        amount: i64,
        #[arg(long = "new-price")]
        new_price: i64,
    },

    /// Credit a client addressed by login
    TopUp {
        #[arg(long)]
        login: String,
        #[arg(long, allow_hyphen_values = true)]
        amount: i64,
    },

    /// Write a table snapshot
    Export {
        #[arg(long, value_enum)]
        table: SnapshotTable,
        #[arg(long, value_enum, default_value = "json")]
        format: SnapshotFormat,
    },

    /// Load a table snapshot
    Import {
        #[arg(long, value_enum)]
        table: SnapshotTable,
        #[arg(long, value_enum, default_value = "json")]
        format: SnapshotFormat,
    },
}
