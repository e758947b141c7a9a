//! End-to-end integration tests
//!
//! These tests drive the public API and the CLI dispatcher against real
//! SQLite databases in temporary directories. They cover:
//! - The transfer scenario: a successful transfer, then an overdraft that
//!   must leave both balances untouched
//! - Service payments and their atomicity
//! - Login outcomes for clients and managers
//! - Snapshot export into one database and import into a fresh one

#[cfg(test)]
mod tests {
    use bank_ledger::cli::{run, CliArgs};
    use bank_ledger::{
        Database, IdentityLookup, LedgerEngine, LedgerError, LoginOutcome, NewClient, RecordStore,
        Service, SnapshotFormat, SnapshotService, SnapshotTable,
    };
    use clap::Parser;
    use rstest::rstest;
    use std::path::Path;
    use tempfile::TempDir;

    /// Bank with client X (balance 500, account 111, phone 9001),
    /// client Y (balance 100, account 222, phone 9002) and one service
    async fn open_bank(dir: &Path) -> Database {
        let db = Database::open(&dir.join("bank.db")).await.unwrap();
        let records = RecordStore::new(db.pool().clone());
        for (name, balance, account, phone) in [("X", 500, 111, 9001), ("Y", 100, 222, 9002)] {
            records
                .insert_client(&NewClient {
                    name: name.to_string(),
                    login: name.to_lowercase(),
                    password: format!("{}-pass", name.to_lowercase()),
                    balance,
                    account_number: account,
                    phone_number: phone,
                })
                .await
                .unwrap();
        }
        records.insert_service("Internet", 400).await.unwrap();
        records.insert_atm("Central", "1 Main St").await.unwrap();
        db
    }

    async fn balances(db: &Database) -> (i64, i64) {
        let records = RecordStore::new(db.pool().clone());
        let x = records.find_client_by_account(111).await.unwrap().unwrap();
        let y = records.find_client_by_account(222).await.unwrap().unwrap();
        (x.balance, y.balance)
    }

    /// Run one whitespace-separated CLI command line against the database in `dir`
    async fn cli(dir: &TempDir, line: &str) -> Result<String, LedgerError> {
        let database = dir.path().join("bank.db");
        let mut argv = vec![
            "bank-ledger",
            "--database",
            database.to_str().unwrap(),
            "--snapshot-dir",
            dir.path().to_str().unwrap(),
        ];
        argv.extend(line.split_whitespace());

        let mut output = Vec::new();
        run(CliArgs::try_parse_from(argv).unwrap(), &mut output).await?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[tokio::test]
    async fn test_transfer_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_bank(dir.path()).await;
        let ledger = LedgerEngine::new(db.pool().clone());

        ledger.transfer_by_account(111, 50, 222).await.unwrap();
        assert_eq!(balances(&db).await, (450, 150));

        let err = ledger.transfer_by_account(111, 9999, 222).await.unwrap_err();
        assert!(matches!(err, LedgerError::Query { .. }));
        assert_eq!(balances(&db).await, (450, 150));
    }

    #[rstest]
    #[case::small(1)]
    #[case::exact(100)]
    #[case::too_much(101)]
    #[tokio::test]
    async fn test_phone_transfer_conserves_total(#[case] amount: i64) {
        let dir = tempfile::tempdir().unwrap();
        let db = open_bank(dir.path()).await;
        let ledger = LedgerEngine::new(db.pool().clone());

        let result = ledger.transfer_by_phone(9002, amount, 9001).await;

        let (x, y) = balances(&db).await;
        assert_eq!(x + y, 600);
        if amount <= 100 {
            assert!(result.is_ok());
            assert_eq!((x, y), (500 + amount, 100 - amount));
        } else {
            assert!(result.is_err());
            assert_eq!((x, y), (500, 100));
        }
    }

    #[tokio::test]
    async fn test_unknown_source_leaves_balances_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_bank(dir.path()).await;
        let ledger = LedgerEngine::new(db.pool().clone());

        let err = ledger.transfer_by_account(333, 10, 222).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(balances(&db).await, (500, 100));
    }

    #[tokio::test]
    async fn test_service_payment_is_atomic() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_bank(dir.path()).await;
        let ledger = LedgerEngine::new(db.pool().clone());
        let records = RecordStore::new(db.pool().clone());
        let internet = records.list_services().await.unwrap().remove(0);

        ledger
            .pay_service(111, 150, &Service { price: 250, ..internet.clone() })
            .await
            .unwrap();
        assert_eq!(balances(&db).await, (350, 100));
        assert_eq!(records.list_services().await.unwrap()[0].price, 250);

        // A non-positive price fails after the debit and must undo it
        let err = ledger
            .pay_service(111, 250, &Service { price: 0, ..internet })
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Query { .. }));
        assert_eq!(balances(&db).await, (350, 100));
        assert_eq!(records.list_services().await.unwrap()[0].price, 250);
    }

    #[tokio::test]
    async fn test_login_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_bank(dir.path()).await;
        let identity = IdentityLookup::new(db.pool().clone());

        assert!(identity.login_client("x", "x-pass").await.unwrap().is_authorized());
        assert_eq!(
            identity.login_client("z", "z-pass").await.unwrap(),
            LoginOutcome::NotFound
        );
        assert!(matches!(
            identity.login_client("x", "y-pass").await,
            Err(LedgerError::InvalidCredential)
        ));
        assert!(identity.login_manager("sasha", "1616").await.unwrap().is_authorized());
    }

    #[rstest]
    #[case::json(SnapshotFormat::Json)]
    #[case::xml(SnapshotFormat::Xml)]
    #[tokio::test]
    async fn test_snapshot_into_fresh_database(#[case] format: SnapshotFormat) {
        let source_dir = tempfile::tempdir().unwrap();
        let source = open_bank(source_dir.path()).await;
        LedgerEngine::new(source.pool().clone())
            .transfer_by_account(111, 75, 222)
            .await
            .unwrap();
        let source_records = RecordStore::new(source.pool().clone());
        let snapshots = SnapshotService::new(source_records.clone(), source_dir.path());
        snapshots.export(SnapshotTable::Clients, format).await.unwrap();
        snapshots.export(SnapshotTable::Atms, format).await.unwrap();

        let target_dir = tempfile::tempdir().unwrap();
        let target = Database::open(&target_dir.path().join("bank.db")).await.unwrap();
        let target_records = RecordStore::new(target.pool().clone());
        let imports = SnapshotService::new(target_records.clone(), source_dir.path());
        assert_eq!(imports.import(SnapshotTable::Clients, format).await.unwrap(), 2);
        assert_eq!(imports.import(SnapshotTable::Atms, format).await.unwrap(), 1);

        assert_eq!(
            target_records.list_clients().await.unwrap(),
            source_records.list_clients().await.unwrap()
        );
        assert_eq!(
            target_records.list_atms().await.unwrap(),
            source_records.list_atms().await.unwrap()
        );
        assert_eq!(balances(&target).await, (425, 175));
    }

    #[tokio::test]
    async fn test_cli_session() {
        let dir = tempfile::tempdir().unwrap();

        cli(&dir, "init").await.unwrap();
        let clients = [
            "add-client --name ann --login ann --password pw --balance 500 \
             --account-number 111 --phone 9001",
            "add-client --name bob --login bob --password pw --balance 100 \
             --account-number 222 --phone 9002",
        ];
        for line in clients {
            cli(&dir, line).await.unwrap();
        }
        cli(&dir, "add-service --name Water --price 300").await.unwrap();

        let transfer = cli(&dir, "transfer-by-account --from 111 --to 222 --amount 50")
            .await
            .unwrap();
        assert_eq!(transfer, "transferred 50 from account 111 to account 222\n");

        let payment = cli(
            &dir,
            "pay-service --from 222 --service-id 1 --amount 150 --new-price 150",
        )
        .await
        .unwrap();
        assert_eq!(payment, "paid 150 to Water, price now 150\n");

        let overdraft = cli(&dir, "transfer-by-phone --from 9002 --to 9001 --amount 1").await;
        assert!(overdraft.is_err());

        let top_up = cli(&dir, &format!("top-up --login bob --amount {}", i64::MAX)).await;
        assert!(top_up.is_err());

        let accounts = cli(&dir, "accounts --client-id 1").await.unwrap();
        assert_eq!(accounts, "1\tann\taccount 111\tbalance 450\n");

        let exported = cli(&dir, "export --table clients --format csv").await.unwrap();
        assert!(exported.starts_with("exported to "));
        assert!(dir.path().join("clients.csv").exists());

        let services = cli(&dir, "list-services").await.unwrap();
        assert_eq!(services, "1\tWater\t150\n");
    }
}
