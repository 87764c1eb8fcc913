use bank_core::application::account_service::{AccountServiceImpl, AccountServiceRef};
use bank_core::application::runner::{OperationRunner, Outcome};
use bank_core::domain::ports::AccountStoreBox;
use bank_core::infrastructure::in_memory::InMemoryAccountStore;
use bank_core::interfaces::csv::account_writer::AccountWriter;
use bank_core::interfaces::csv::operation_reader::OperationReader;
use bank_core::logging::init_tracing;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input operations CSV file
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[cfg(feature = "storage-rocksdb")]
fn account_store(db_path: Option<PathBuf>) -> Result<AccountStoreBox> {
    use bank_core::infrastructure::rocksdb::RocksDBStore;

    match db_path {
        Some(path) => Ok(Box::new(RocksDBStore::open(path).into_diagnostic()?)),
        None => Ok(Box::new(InMemoryAccountStore::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn account_store(db_path: Option<PathBuf>) -> Result<AccountStoreBox> {
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(Box::new(InMemoryAccountStore::new()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let account_service: AccountServiceRef =
        Arc::new(AccountServiceImpl::new(account_store(cli.db_path)?));
    let runner = OperationRunner::new(account_service);

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = OperationReader::new(file);
    for (row, operation) in reader.operations().enumerate() {
        match operation {
            Ok(operation) => {
                let name = operation.name();
                match runner.apply(operation).await {
                    Ok(Outcome::Rejected) => info!(row, operation = name, "operation rejected"),
                    Ok(_) => {}
                    Err(e) => error!(row, operation = name, "Error processing operation: {}", e),
                }
            }
            Err(e) => error!(row, "Error reading operation: {}", e),
        }
    }

    let accounts = runner.into_results().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = AccountWriter::new(stdout.lock());
    writer.write_accounts(accounts).into_diagnostic()?;

    Ok(())
}
