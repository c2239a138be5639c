//! Command dispatch for the `fintrack` binary.

use chrono::{NaiveDate, Utc};
use colored::Colorize;
use uuid::Uuid;

use crate::cli::format::{format_currency, format_date, format_month};
use crate::cli::{CliError, CliResult};
use crate::config::{Config, ConfigManager};
use crate::core::services::{
    CategoryService, DateWindow, SummaryService, TransactionService,
};
use crate::domain::transaction::{RecurrenceKind, Transaction, TransactionKind, TransactionStatus};
use crate::notify::ChangeNotifier;
use crate::storage::JsonStore;

const USAGE: &str = "\
fintrack — personal finance tracker

USAGE:
    fintrack <command> [args]

COMMANDS:
    list [YYYY-MM]                          transactions due in a month
    summary [YYYY-MM]                       monthly totals and category breakdown
    add <expense|income> <description> <amount> <YYYY-MM-DD>
        [--category <name>] [--installments <n>] [--recur <kind> [--times <n>]]
    pay <id> <amount> [YYYY-MM-DD]          confirm a payment
    reopen <id>                             undo a payment confirmation
    remove <id>                             delete one transaction
    remove-series <group-id>                delete a whole installment/recurrence series
    categories                              list registered categories
    seed-categories                         install the built-in category catalog
    help                                    show this message";

/// Entry point used by the binary. Returns a process exit code.
pub fn run(args: &[String]) -> i32 {
    match dispatch(args) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            1
        }
    }
}

fn dispatch(args: &[String]) -> CliResult<()> {
    let config = ConfigManager::new()?.load()?;
    let store = open_store(&config)?;

    let notifier = ChangeNotifier::new();
    notifier.subscribe(|| tracing::debug!("transaction data changed"));

    let command = args.first().map(String::as_str).unwrap_or("help");
    match command {
        "list" => list(&store, &config, args.get(1)),
        "summary" => summary(&store, &config, args.get(1)),
        "add" => add(&store, &notifier, &args[1..]),
        "pay" => pay(&store, &notifier, &args[1..]),
        "reopen" => reopen(&store, &notifier, &args[1..]),
        "remove" => remove(&store, &notifier, &args[1..]),
        "remove-series" => remove_series(&store, &notifier, &args[1..]),
        "categories" => categories(&store),
        "seed-categories" => seed_categories(&store),
        "help" | "--help" | "-h" => {
            println!("{USAGE}");
            Ok(())
        }
        other => Err(CliError::UnknownCommand(other.to_owned())),
    }
}

fn list(store: &JsonStore, config: &Config, month: Option<&String>) -> CliResult<()> {
    let today = Utc::now().date_naive();
    let window = parse_window(month, today)?;
    let service = TransactionService::new(store);
    let mut transactions: Vec<Transaction> = service
        .list_as_of(today)
        .into_iter()
        .filter(|txn| window.contains(txn.due_date))
        .collect();
    transactions.sort_by_key(|txn| txn.due_date);

    println!(
        "{}",
        format!("Transactions due {}", format_month(window.start)).bold()
    );
    if transactions.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for txn in &transactions {
        let amount = format_currency(signed_amount(txn), config);
        println!(
            "  {}  {}  {:>14}  {}  {}",
            txn.id.to_string()[..8].dimmed(),
            format_date(txn.due_date, config),
            amount,
            paint_status(txn.status),
            txn.description
        );
    }
    Ok(())
}

fn summary(store: &JsonStore, config: &Config, month: Option<&String>) -> CliResult<()> {
    let today = Utc::now().date_naive();
    let window = parse_window(month, today)?;
    let summary = SummaryService::new(store).summarize_window_as_of(window, today);

    println!("{}", format!("Summary {}", format_month(window.start)).bold());
    println!(
        "  income     {:>14}   settled {:>14}",
        format_currency(summary.provisioned_income, config).green(),
        format_currency(summary.settled_income, config)
    );
    println!(
        "  expenses   {:>14}   settled {:>14}",
        format_currency(summary.provisioned_expense, config).red(),
        format_currency(summary.settled_expense, config)
    );
    let balance = format_currency(summary.balance, config);
    let balance = if summary.balance < 0.0 {
        balance.red()
    } else {
        balance.green()
    };
    println!("  balance    {:>14}", balance);

    if !summary.expense_by_category.is_empty() {
        println!("{}", "Expenses by category".bold());
        for entry in &summary.expense_by_category {
            println!(
                "  {} {:<16} {:>14}",
                entry.icon,
                entry.name,
                format_currency(entry.total, config)
            );
        }
    }
    Ok(())
}

fn add(store: &JsonStore, notifier: &ChangeNotifier, args: &[String]) -> CliResult<()> {
    if args.len() < 4 {
        return Err(CliError::Input(
            "expected: add <expense|income> <description> <amount> <YYYY-MM-DD>".into(),
        ));
    }
    let kind = match args[0].as_str() {
        "expense" => TransactionKind::Expense,
        "income" => TransactionKind::Income,
        other => {
            return Err(CliError::Input(format!(
                "`{other}` is neither `expense` nor `income`"
            )))
        }
    };
    let amount = parse_amount(&args[2])?;
    let due_date = parse_date(&args[3])?;
    let mut template = Transaction::new(kind, args[1].clone(), amount, due_date);

    let mut installments: Option<u32> = None;
    let mut recur: Option<RecurrenceKind> = None;
    let mut times: Option<u32> = None;
    let mut rest = args[4..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--category" => {
                let name = rest
                    .next()
                    .ok_or_else(|| CliError::Input("--category needs a name".into()))?;
                let category = CategoryService::new(store)
                    .list()
                    .into_iter()
                    .find(|cat| cat.name.eq_ignore_ascii_case(name))
                    .ok_or_else(|| CliError::Input(format!("unknown category `{name}`")))?;
                template = template.with_category(category.id);
            }
            "--installments" => {
                let n = rest
                    .next()
                    .ok_or_else(|| CliError::Input("--installments needs a count".into()))?;
                installments = Some(parse_count(n)?);
            }
            "--recur" => {
                let kind = rest
                    .next()
                    .ok_or_else(|| CliError::Input("--recur needs a kind".into()))?;
                recur = Some(kind.parse().map_err(|err| CliError::Input(format!("{err}")))?);
            }
            "--times" => {
                let n = rest
                    .next()
                    .ok_or_else(|| CliError::Input("--times needs a count".into()))?;
                times = Some(parse_count(n)?);
            }
            other => return Err(CliError::Input(format!("unknown flag `{other}`"))),
        }
    }
    if installments.is_some() && recur.is_some() {
        return Err(CliError::Input(
            "a transaction is either installments or recurring, not both".into(),
        ));
    }

    let service = TransactionService::new(store);
    if let Some(count) = installments {
        let ids = service.add_installments(&template, count)?;
        println!("added {} installments", ids.len());
    } else if let Some(kind) = recur {
        let ids = service.add_recurrences(&template, kind, times)?;
        println!("added {} occurrences", ids.len());
    } else {
        let id = service.add(template)?;
        println!("added {id}");
    }
    notifier.data_changed();
    Ok(())
}

fn pay(store: &JsonStore, notifier: &ChangeNotifier, args: &[String]) -> CliResult<()> {
    if args.len() < 2 {
        return Err(CliError::Input("expected: pay <id> <amount> [date]".into()));
    }
    let id = parse_id(&args[0])?;
    let amount = parse_amount(&args[1])?;
    let date = match args.get(2) {
        Some(raw) => parse_date(raw)?,
        None => Utc::now().date_naive(),
    };
    TransactionService::new(store).settle(id, amount, date)?;
    notifier.data_changed();
    println!("paid {id}");
    Ok(())
}

fn reopen(store: &JsonStore, notifier: &ChangeNotifier, args: &[String]) -> CliResult<()> {
    let id = parse_id(args.first().ok_or_else(|| {
        CliError::Input("expected: reopen <id>".into())
    })?)?;
    TransactionService::new(store).reopen(id, Utc::now().date_naive())?;
    notifier.data_changed();
    println!("reopened {id}");
    Ok(())
}

fn remove(store: &JsonStore, notifier: &ChangeNotifier, args: &[String]) -> CliResult<()> {
    let id = parse_id(args.first().ok_or_else(|| {
        CliError::Input("expected: remove <id>".into())
    })?)?;
    let removed = TransactionService::new(store).remove(id)?;
    notifier.data_changed();
    println!("removed `{}`", removed.description);
    Ok(())
}

fn remove_series(store: &JsonStore, notifier: &ChangeNotifier, args: &[String]) -> CliResult<()> {
    let group = parse_id(args.first().ok_or_else(|| {
        CliError::Input("expected: remove-series <group-id>".into())
    })?)?;
    let count = TransactionService::new(store).remove_series(group)?;
    notifier.data_changed();
    println!("removed {count} transactions");
    Ok(())
}

fn categories(store: &JsonStore) -> CliResult<()> {
    let categories = CategoryService::new(store).list();
    if categories.is_empty() {
        println!("no categories registered (try `seed-categories`)");
        return Ok(());
    }
    for category in categories {
        println!(
            "  {}  {} {:<16} {}",
            category.id.to_string()[..8].dimmed(),
            category.icon,
            category.name,
            category.kind.to_string().dimmed()
        );
    }
    Ok(())
}

fn seed_categories(store: &JsonStore) -> CliResult<()> {
    let seeded = CategoryService::new(store).seed_defaults()?;
    if seeded == 0 {
        println!("categories already present, nothing seeded");
    } else {
        println!("seeded {seeded} categories");
    }
    Ok(())
}

/// A `data_dir` in the stored config wins; otherwise the env/platform
/// default resolved by [`JsonStore::open_default`].
fn open_store(config: &Config) -> CliResult<JsonStore> {
    match config.data_dir.as_deref() {
        Some(dir) => Ok(JsonStore::new(dir)?),
        None => Ok(JsonStore::open_default()?),
    }
}

fn signed_amount(txn: &Transaction) -> f64 {
    match txn.kind {
        TransactionKind::Expense => -txn.effective_amount(),
        TransactionKind::Income => txn.effective_amount(),
    }
}

fn paint_status(status: TransactionStatus) -> colored::ColoredString {
    let label = format!("{:<9}", status.to_string());
    match status {
        TransactionStatus::Paid => label.green(),
        TransactionStatus::Overdue => label.red(),
        TransactionStatus::Pending => label.yellow(),
        TransactionStatus::Scheduled => label.blue(),
    }
}

fn parse_window(month: Option<&String>, today: NaiveDate) -> CliResult<DateWindow> {
    match month {
        None => Ok(DateWindow::month_of(today)),
        Some(raw) => {
            let first = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
                .map_err(|_| CliError::Input(format!("`{raw}` is not a YYYY-MM month")))?;
            Ok(DateWindow::month_of(first))
        }
    }
}

fn parse_date(raw: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| CliError::Input(format!("`{raw}` is not a YYYY-MM-DD date")))
}

fn parse_amount(raw: &str) -> CliResult<f64> {
    raw.parse::<f64>()
        .map_err(|_| CliError::Input(format!("`{raw}` is not an amount")))
}

fn parse_count(raw: &str) -> CliResult<u32> {
    raw.parse::<u32>()
        .map_err(|_| CliError::Input(format!("`{raw}` is not a count")))
}

fn parse_id(raw: &str) -> CliResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| CliError::Input(format!("`{raw}` is not a valid id")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_parsing_accepts_year_month() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let window = parse_window(Some(&"2024-02".to_string()), today).unwrap();
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let fallback = parse_window(None, today).unwrap();
        assert_eq!(fallback.start, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert!(parse_window(Some(&"2024/02".to_string()), today).is_err());
    }

    #[test]
    fn configured_data_dir_overrides_store_root() {
        let dir = tempfile::tempdir().unwrap();
        let books = dir.path().join("books");
        let config = Config {
            data_dir: Some(books.clone()),
            ..Config::default()
        };
        let store = open_store(&config).unwrap();
        assert_eq!(store.root(), books.as_path());
        assert!(books.is_dir());
    }

    #[test]
    fn bad_inputs_become_input_errors() {
        assert!(parse_date("15-01-2024").is_err());
        assert!(parse_amount("ten").is_err());
        assert!(parse_count("-1").is_err());
        assert!(parse_id("not-a-uuid").is_err());
    }
}
