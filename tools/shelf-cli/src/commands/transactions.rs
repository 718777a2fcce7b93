//! Purchase history commands.

use anyhow::{Error, Result};
use chrono::Local;
use shelf_commerce::checkout::Transaction;
use shelf_commerce::ids::TransactionId;
use shelf_commerce::search::{Page, TransactionQuery};
use shelf_commerce::{Currency, Money};

use super::books::page_footer;
use super::{TransactionsArgs, TransactionsCommand};
use crate::context::Context;
use crate::output::Output;

const HISTORY_COLUMNS: [usize; 4] = [8, 18, 8, 16];
const ITEM_COLUMNS: [usize; 4] = [32, 5, 14, 16];

/// Run the transactions command.
pub async fn run(args: TransactionsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(TransactionsCommand::List { search, sort, page }) => {
            let mut query = TransactionQuery::new()
                .with_sort_key(&sort)
                .map_err(Error::msg)?;
            if let Some(search) = search {
                query = query.with_search(search);
            }
            list_transactions(query.with_page(page), ctx).await
        }
        None => list_transactions(TransactionQuery::new(), ctx).await,
        Some(TransactionsCommand::Show { id }) => {
            show_transaction(&TransactionId::new(id), ctx).await
        }
    }
}

async fn list_transactions(query: TransactionQuery, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Loading transactions...");
    let result = client.list_transactions(&query).await;
    spinner.finish_and_clear();
    let page = result?;

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header("Transactions");
    print_history(&page, ctx.config.store.currency, &ctx.output);
    Ok(())
}

async fn show_transaction(id: &TransactionId, ctx: &Context) -> Result<()> {
    let transaction = ctx.client()?.get_transaction(id).await?;

    if ctx.output.is_json() {
        ctx.output.json(&transaction);
        return Ok(());
    }

    print_transaction(&transaction, ctx.config.store.currency, &ctx.output);
    Ok(())
}

/// One row per transaction with a pagination footer.
pub(crate) fn print_history(page: &Page<Transaction>, currency: Currency, output: &Output) {
    if page.is_empty() {
        output.info("No transactions yet.");
        return;
    }

    output.table_row(&["ID", "DATE", "ITEMS", "TOTAL"], &HISTORY_COLUMNS);
    output.table_rule(&HISTORY_COLUMNS);
    for transaction in &page.items {
        let quantity: u64 = transaction
            .transaction_items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum();
        output.table_row(
            &[
                transaction.id.as_str(),
                &format_date(transaction),
                &quantity.to_string(),
                &transaction.total_in(currency).to_string(),
            ],
            &HISTORY_COLUMNS,
        );
    }
    output.line("");
    output.info(&page_footer(page.page, page.total_pages));
}

/// Header, items and total of a single transaction.
pub(crate) fn print_transaction(transaction: &Transaction, currency: Currency, output: &Output) {
    output.header(&format!("Transaction {}", transaction.id));
    output.kv("date", &format_date(transaction));
    output.line("");

    output.table_row(&["BOOK", "QTY", "PRICE", "SUBTOTAL"], &ITEM_COLUMNS);
    output.table_rule(&ITEM_COLUMNS);
    for item in &transaction.transaction_items {
        output.table_row(
            &[
                &item.book.title,
                &item.quantity.to_string(),
                &Money::new(item.price_at_buy, currency).to_string(),
                &Money::new(item.subtotal(), currency).to_string(),
            ],
            &ITEM_COLUMNS,
        );
    }
    output.table_rule(&ITEM_COLUMNS);
    output.kv("total", &transaction.total_in(currency).to_string());
}

fn format_date(transaction: &Transaction) -> String {
    transaction
        .created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
