//! Command dispatch
//!
//! Opens the configured database, wires the components onto its pool and
//! runs one parsed command, writing human-readable lines to `output`.

use super::args::{CliArgs, Command};
use crate::core::{IdentityLookup, LedgerEngine};
use crate::io::SnapshotService;
use crate::store::{Database, RecordStore};
use crate::types::{LedgerError, LoginOutcome, NewClient, Service};
use std::io::Write;

/// Run the parsed command against the configured database
///
/// Output write failures are reported as I/O errors on `<output>`.
pub async fn run(args: CliArgs, output: &mut dyn Write) -> Result<(), LedgerError> {
    let db = Database::open(&args.database).await?;
    let result = execute(&db, &args, output).await;
    db.close().await;
    result
}

async fn execute(db: &Database, args: &CliArgs, output: &mut dyn Write) -> Result<(), LedgerError> {
    let records = RecordStore::new(db.pool().clone());
    let ledger = LedgerEngine::new(db.pool().clone());

    match &args.command {
        Command::Init => emit(output, format!("database ready at {}", args.database.display())),
        Command::Login {
            role,
            login,
            password,
        } => {
            let identity = IdentityLookup::new(db.pool().clone());
            match identity.login(*role, login, password).await? {
                LoginOutcome::Authorized { id } => emit(output, format!("authorized, id {}", id)),
                LoginOutcome::NotFound => emit(output, format!("no such login: {}", login)),
            }
        }
        Command::AddClient {
            name,
            login,
            password,
            balance,
            account_number,
            phone_number,
        } => {
            let id = records
                .insert_client(&NewClient {
                    name: name.clone(),
                    login: login.clone(),
                    password: password.clone(),
                    balance: *balance,
                    account_number: *account_number,
                    phone_number: *phone_number,
                })
                .await?;
            emit(output, format!("added client {}", id))
        }
        Command::AddAtm { name, street } => {
            let id = records.insert_atm(name, street).await?;
            emit(output, format!("added atm {}", id))
        }
        Command::AddService { name, price } => {
            let id = records.insert_service(name, *price).await?;
            emit(output, format!("added service {}", id))
        }
        Command::ListClients => {
            for client in records.list_clients().await? {
                emit(
                    output,
                    format!(
                        "{}\t{}\t{}\taccount {}\tphone {}\tbalance {}",
                        client.id,
                        client.name,
                        client.login,
                        client.account_number,
                        client.phone_number,
                        client.balance
                    ),
                )?;
            }
            Ok(())
        }
        Command::ListAtms => {
            for atm in records.list_atms().await? {
                emit(output, format!("{}\t{}\t{}", atm.id, atm.name, atm.address))?;
            }
            Ok(())
        }
        Command::ListServices => {
            for service in records.list_services().await? {
                emit(output, format!("{}\t{}\t{}", service.id, service.name, service.price))?;
            }
            Ok(())
        }
        Command::Accounts { client_id } => {
            for account in records.client_accounts(*client_id).await? {
                emit(
                    output,
                    format!(
                        "{}\t{}\taccount {}\tbalance {}",
                        account.id, account.name, account.account_number, account.balance
                    ),
                )?;
            }
            Ok(())
        }
        Command::TransferByPhone { from, to, amount } => {
            ledger.check_phone_number(*from).await?;
            ledger.check_phone_number(*to).await?;
            ledger.transfer_by_phone(*from, *amount, *to).await?;
            emit(output, format!("transferred {} from phone {} to phone {}", amount, from, to))
        }
        Command::TransferByAccount { from, to, amount } => {
            ledger.check_account_number(*from).await?;
            ledger.check_account_number(*to).await?;
            ledger.transfer_by_account(*from, *amount, *to).await?;
            emit(
                output,
                format!("transferred {} from account {} to account {}", amount, from, to),
            )
        }
        Command::PayService {
            from,
            service_id,
            amount,
            new_price,
        } => {
            ledger.check_account_number(*from).await?;
            ledger.check_service(*service_id).await?;
            let service = records
                .find_service(*service_id)
                .await?
                .map(|s| Service {
                    price: *new_price,
                    ..s
                })
                .ok_or_else(|| LedgerError::service_not_found(*service_id))?;
            ledger.pay_service(*from, *amount, &service).await?;
            emit(
                output,
                format!("paid {} to {}, price now {}", amount, service.name, service.price),
            )
        }
        Command::TopUp { login, amount } => {
            ledger.top_up(login, *amount).await?;
            emit(output, format!("topped up {} by {}", login, amount))
        }
        Command::Export { table, format } => {
            let snapshots = SnapshotService::new(records, &args.snapshot_dir);
            let path = snapshots.export(*table, *format).await?;
            emit(output, format!("exported to {}", path.display()))
        }
        Command::Import { table, format } => {
            let snapshots = SnapshotService::new(records, &args.snapshot_dir);
            let count = snapshots.import(*table, *format).await?;
            emit(output, format!("imported {} records", count))
        }
    }
}

fn emit(output: &mut dyn Write, line: String) -> Result<(), LedgerError> {
    writeln!(output, "{}", line).map_err(LedgerError::io("<output>"))
}
