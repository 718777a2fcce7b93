//! Catalog commands.

use anyhow::Result;
use dialoguer::Confirm;
use shelf_commerce::catalog::{Book, NewBook};
use shelf_commerce::ids::{BookId, GenreId};
use shelf_commerce::search::{BookQuery, Page};
use shelf_commerce::Currency;

use super::{AddBookArgs, BooksArgs, BooksCommand};
use crate::context::Context;
use crate::output::{stock_badge, stock_label, Output};

const BOOK_COLUMNS: [usize; 5] = [6, 32, 20, 14, 12];

/// Run the books command.
pub async fn run(args: BooksArgs, ctx: &Context) -> Result<()> {
    match args.command {
        BooksCommand::List {
            search,
            condition,
            sort,
            page,
        } => {
            let mut query = BookQuery::new().with_condition(condition).with_sort(sort);
            if let Some(search) = search {
                query = query.with_search(search);
            }
            list_books(query.with_page(page), ctx).await
        }
        BooksCommand::Show { id } => show_book(&BookId::new(id), ctx).await,
        BooksCommand::Add(args) => add_book(args, ctx).await,
        BooksCommand::Delete { id, yes } => delete_book(&BookId::new(id), yes, ctx).await,
    }
}

async fn list_books(query: BookQuery, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Loading books...");
    let result = client.list_books(&query).await;
    spinner.finish_and_clear();
    let page = result?;

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header(&format!("Books ({})", query.sort.display_name()));
    print_book_page(&page, ctx.config.store.currency, &ctx.output);
    Ok(())
}

/// Table of books with a pagination footer.
pub(crate) fn print_book_page(page: &Page<Book>, currency: Currency, output: &Output) {
    if page.is_empty() {
        output.info("No books found.");
        return;
    }

    output.table_row(&["ID", "TITLE", "WRITER", "PRICE", "STOCK"], &BOOK_COLUMNS);
    output.table_rule(&BOOK_COLUMNS);
    for book in &page.items {
        let price = book.price_in(currency).to_string();
        let stock = stock_label(book.stock_quantity);
        output.table_row(
            &[book.id.as_str(), &book.title, &book.writer, &price, &stock],
            &BOOK_COLUMNS,
        );
    }
    output.line("");
    output.info(&page_footer(page.page, page.total_pages));
}

pub(crate) fn page_footer(page: u32, total_pages: u32) -> String {
    let mut footer = format!("Page {} of {}", page, total_pages);
    if page < total_pages {
        footer.push_str(&format!(" (next: --page {})", page + 1));
    }
    footer
}

async fn show_book(id: &BookId, ctx: &Context) -> Result<()> {
    let book = ctx.client()?.get_book(id).await?;

    if ctx.output.is_json() {
        ctx.output.json(&book);
        return Ok(());
    }

    let currency = ctx.config.store.currency;
    ctx.output.header(&book.title);
    ctx.output.kv("id", book.id.as_str());
    ctx.output.kv("writer", &book.writer);
    ctx.output.kv("price", &book.price_in(currency).to_string());
    ctx.output.kv("stock", &stock_badge(book.stock_quantity));
    ctx.output.kv("genre", book.genre_name());
    if let Some(publisher) = &book.publisher {
        ctx.output.kv("publisher", publisher);
    }
    if let Some(year) = book.publication_year {
        ctx.output.kv("year", &year.to_string());
    }
    if let Some(condition) = book.condition {
        ctx.output.kv("condition", condition.as_str());
    }
    if let Some(isbn) = &book.isbn {
        ctx.output.kv("isbn", isbn);
    }
    if let Some(description) = &book.description {
        ctx.output.line("");
        ctx.output.line(description);
    }
    Ok(())
}

async fn add_book(args: AddBookArgs, ctx: &Context) -> Result<()> {
    let book = NewBook {
        title: args.title,
        writer: args.writer,
        publisher: args.publisher,
        publication_year: args.year,
        genre_id: Some(GenreId::new(args.genre)),
        price: args.price,
        stock_quantity: args.stock,
        condition: args.condition,
        isbn: args.isbn,
        description: args.description,
        image_url: args.image_url,
    };

    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Adding book...");
    let result = client.add_book(&book).await;
    spinner.finish_and_clear();
    let created = result?;

    if ctx.output.is_json() {
        ctx.output.json(&created);
    } else {
        ctx.output
            .success(&format!("Added '{}' (id {})", created.title, created.id));
    }
    Ok(())
}

async fn delete_book(id: &BookId, yes: bool, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete book {}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    client.delete_book(id).await?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "deleted": id }));
    } else {
        ctx.output.success(&format!("Deleted book {}", id));
    }
    Ok(())
}
