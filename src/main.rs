use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use payreg::application::store::PaymentStore;
use payreg::domain::payment::Payment;
use payreg::domain::ports::PaymentBackendBox;
use payreg::infrastructure::json_file::JsonFileBackend;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the JSON payments file
    #[arg(long)]
    data_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all payments
    List,
    /// Register a new payment
    Create {
        id: String,
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        method: String,
    },
    /// Update a payment that is still registered
    Update {
        id: String,
        #[arg(long)]
        amount: Option<Decimal>,
        #[arg(long)]
        method: Option<String>,
    },
    /// Attempt to pay a registered payment
    Pay { id: String },
    /// Revert a failed payment back to registered
    Revert { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let backend: PaymentBackendBox = Box::new(JsonFileBackend::new(&cli.data_path));
    let store = PaymentStore::load(backend).await.into_diagnostic()?;

    match cli.command {
        Command::List => {
            let payments = store.list_all().await;
            println!(
                "{}",
                serde_json::to_string_pretty(&payments).into_diagnostic()?
            );
        }
        Command::Create { id, amount, method } => {
            let payment = store
                .create(&id, amount, &method)
                .await
                .into_diagnostic()?;
            print_payment(&payment)?;
        }
        Command::Update { id, amount, method } => {
            let payment = store
                .update(&id, amount, method.as_deref())
                .await
                .into_diagnostic()?;
            print_payment(&payment)?;
        }
        Command::Pay { id } => {
            let payment = store.pay(&id).await.into_diagnostic()?;
            print_payment(&payment)?;
        }
        Command::Revert { id } => {
            let payment = store.revert(&id).await.into_diagnostic()?;
            print_payment(&payment)?;
        }
    }

    Ok(())
}

fn print_payment(payment: &Payment) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(payment).into_diagnostic()?
    );
    Ok(())
}
