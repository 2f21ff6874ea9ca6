use std::error::Error;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use time::{Duration, OffsetDateTime};

use expense_tracker::{
    category::{EXPENSE_CATEGORIES, INCOME_CATEGORIES},
    persistence::{FileStore, TRANSACTIONS_KEY, TransactionGateway},
    tracker::{ExpenseTracker, TrackerConfig},
    transaction::{AmountField, TransactionForm},
};

/// A utility for creating sample data for the expense tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory to save the transactions to.
    #[arg(long, short)]
    data_dir: PathBuf,

    /// The number of transactions to create.
    #[arg(long, short, default_value_t = 60)]
    count: usize,
}

const EXPENSE_DESCRIPTIONS: [&str; 8] = [
    "Groceries",
    "Bus pass",
    "New shoes",
    "Cinema tickets",
    "Power bill",
    "Pharmacy",
    "Online course",
    "Miscellaneous",
];

const INCOME_DESCRIPTIONS: [&str; 4] = ["Salary", "Website project", "Dividends", "Gift"];

/// Create and save sample transactions spread over the past year for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let store = FileStore::open(&args.data_dir)?;
    let data_path = store.path_for(TRANSACTIONS_KEY);

    if data_path.is_file() {
        eprintln!("File already exists at {data_path:#?}!");
        exit(1);
    }

    println!("Creating {} transactions in {data_path:#?}", args.count);
    let mut tracker = ExpenseTracker::load(TransactionGateway::new(store), TrackerConfig::default())?;
    let today = OffsetDateTime::now_utc().date();

    // Oldest first so that the newest transaction ends up at the top of the list.
    for i in (0..args.count).rev() {
        let date = today - Duration::days((i * 6 % 365) as i64);
        tracker.add_transaction(&sample_form(i, &date.to_string()))?;
    }

    println!("Success!");

    Ok(())
}

/// Every fifth transaction is income, the rest cycle through the expense categories.
fn sample_form(i: usize, date: &str) -> TransactionForm {
    let (transaction_type, category, description, amount) = if i % 5 == 0 {
        let index = (i / 5) % INCOME_CATEGORIES.len();
        (
            "income",
            INCOME_CATEGORIES[index],
            INCOME_DESCRIPTIONS[index],
            500.0 + (i % 7) as f64 * 125.0,
        )
    } else {
        let index = i % EXPENSE_CATEGORIES.len();
        (
            "expense",
            EXPENSE_CATEGORIES[index],
            EXPENSE_DESCRIPTIONS[index],
            5.0 + (i % 13) as f64 * 7.25,
        )
    };

    TransactionForm {
        transaction_type: Some(transaction_type.to_owned()),
        amount: Some(AmountField::Number(amount)),
        description: Some(description.to_owned()),
        date: Some(date.to_owned()),
        category: Some(category.to_string()),
    }
}
