//! Interactive shopping session.
//!
//! Owns one cart and one checkout reconciler for the lifetime of the
//! session. The cart is not persisted.

use std::collections::HashMap;

use anyhow::{bail, Result};
use dialoguer::Input;
use shelf_client::BookstoreClient;
use shelf_commerce::cart::CartStore;
use shelf_commerce::catalog::Book;
use shelf_commerce::checkout::CheckoutReconciler;
use shelf_commerce::ids::BookId;
use shelf_commerce::search::{BookQuery, TransactionQuery};
use shelf_commerce::{Currency, Money};

use super::books::print_book_page;
use super::describe;
use super::transactions::{print_history, print_transaction};
use crate::context::Context;
use crate::output::{status_badge, Output};

const CART_COLUMNS: [usize; 5] = [6, 30, 5, 14, 16];

const HELP: &[(&str, &str)] = &[
    ("books [search]", "list books, optionally filtered"),
    ("add <id>", "put a book in the cart"),
    ("inc <id>", "one more copy"),
    ("dec <id>", "one fewer copy; the last one removes the line"),
    ("remove <id>", "take a book out of the cart"),
    ("clear", "empty the cart"),
    ("cart", "show the cart and totals"),
    ("checkout", "buy everything in the cart"),
    ("help", "show this list"),
    ("quit", "leave the shop"),
];

/// A parsed shop prompt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopCommand {
    Books(Option<String>),
    Add(BookId),
    Increase(BookId),
    Decrease(BookId),
    Remove(BookId),
    Clear,
    Cart,
    Checkout,
    Help,
    Quit,
}

impl ShopCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let id = |name: &str| -> Result<BookId, String> {
            if rest.is_empty() || rest.contains(char::is_whitespace) {
                Err(format!("usage: {} <book id>", name))
            } else {
                Ok(BookId::new(rest))
            }
        };

        let command = match word.to_lowercase().as_str() {
            "books" | "ls" => ShopCommand::Books((!rest.is_empty()).then(|| rest.to_string())),
            "add" => ShopCommand::Add(id("add")?),
            "inc" | "+" => ShopCommand::Increase(id("inc")?),
            "dec" | "-" => ShopCommand::Decrease(id("dec")?),
            "remove" | "rm" => ShopCommand::Remove(id("remove")?),
            "clear" => ShopCommand::Clear,
            "cart" => ShopCommand::Cart,
            "checkout" => ShopCommand::Checkout,
            "help" | "?" => ShopCommand::Help,
            "quit" | "exit" | "q" => ShopCommand::Quit,
            other => return Err(format!("unknown command '{}'; type `help`", other)),
        };
        Ok(Some(command))
    }
}

/// Run the shop command.
pub async fn run(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("`shelf shop` is interactive and does not support --json");
    }

    let client = ctx.client()?;
    let mut shop = Shop::new(ctx.config.store.currency, ctx.config.shipping());

    ctx.output.header("shelf shop");
    print_help(&ctx.output);
    if !client.session().is_authenticated() {
        ctx.output
            .warn("Not logged in. Browsing works; run `shelf login` in another terminal before checkout.");
    }

    loop {
        let line = match Input::<String>::new()
            .with_prompt(shop.prompt())
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(_) => break,
        };

        let command = match ShopCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                ctx.output.warn(&message);
                continue;
            }
        };
        if command == ShopCommand::Quit {
            break;
        }

        if let Err(e) = shop.execute(command, &client, &ctx.output).await {
            ctx.output.error(&describe(&e));
        }
    }

    if !shop.cart.is_empty() {
        ctx.output.info(&format!(
            "Left {} item(s) in the cart; it is not saved.",
            shop.cart.state().item_count()
        ));
    }
    Ok(())
}

fn print_help(output: &Output) {
    for (usage, what) in HELP {
        output.kv(&format!("{:<16}", usage), what);
    }
}

struct Shop {
    cart: CartStore,
    checkout: CheckoutReconciler,
    currency: Currency,
    seen: HashMap<BookId, Book>,
}

impl Shop {
    fn new(currency: Currency, shipping: Money) -> Self {
        Self {
            cart: CartStore::new(currency),
            checkout: CheckoutReconciler::with_shipping(shipping),
            currency,
            seen: HashMap::new(),
        }
    }

    fn prompt(&self) -> String {
        match self.cart.state().item_count() {
            0 => "shop".to_string(),
            n => format!("shop [{} in cart]", n),
        }
    }

    async fn execute(
        &mut self,
        command: ShopCommand,
        client: &BookstoreClient,
        output: &Output,
    ) -> Result<()> {
        match command {
            ShopCommand::Books(search) => {
                let query = BookQuery::new().with_search(search.unwrap_or_default());
                let page = client.list_books(&query).await?;
                for book in &page.items {
                    self.seen.insert(book.id.clone(), book.clone());
                }
                print_book_page(&page, self.currency, output);
            }
            ShopCommand::Add(id) => {
                let book = match self.seen.get(&id) {
                    Some(book) => book.clone(),
                    None => {
                        let book = client.get_book(&id).await?;
                        self.seen.insert(id.clone(), book.clone());
                        book
                    }
                };
                self.cart.add_item(&book);
                output.success(&format!(
                    "Added '{}' (quantity {})",
                    book.title,
                    self.cart.state().quantity_of(&id)
                ));
                if !book.is_in_stock() {
                    output.warn("The store lists this book as out of stock.");
                }
            }
            ShopCommand::Increase(id) => {
                if self.cart.increase_item(&id) {
                    self.report_quantity(&id, output);
                } else {
                    output.warn(&format!("Book {} is not in the cart", id));
                }
            }
            ShopCommand::Decrease(id) => {
                if !self.cart.decrease_item(&id) {
                    output.warn(&format!("Book {} is not in the cart", id));
                } else if self.cart.state().line(&id).is_some() {
                    self.report_quantity(&id, output);
                } else {
                    output.success(&format!("Removed book {}", id));
                }
            }
            ShopCommand::Remove(id) => {
                if self.cart.remove_item(&id) {
                    output.success(&format!("Removed book {}", id));
                } else {
                    output.warn(&format!("Book {} is not in the cart", id));
                }
            }
            ShopCommand::Clear => {
                self.cart.clear_cart();
                output.success("Cart cleared");
            }
            ShopCommand::Cart => self.print_cart(output),
            ShopCommand::Checkout => self.place_order(client, output).await,
            ShopCommand::Help => print_help(output),
            ShopCommand::Quit => {}
        }
        Ok(())
    }

    fn report_quantity(&self, id: &BookId, output: &Output) {
        if let Some(line) = self.cart.state().line(id) {
            output.success(&format!("'{}' x{}", line.book.title, line.quantity));
        }
    }

    fn print_cart(&self, output: &Output) {
        let summary = self.checkout.summary(&self.cart);

        output.header("Cart");
        if summary.lines.is_empty() {
            output.info("Your cart is empty.");
        } else {
            output.table_row(&["ID", "TITLE", "QTY", "PRICE", "TOTAL"], &CART_COLUMNS);
            output.table_rule(&CART_COLUMNS);
            for line in &summary.lines {
                output.table_row(
                    &[
                        line.book_id.as_str(),
                        &line.title,
                        &line.quantity.to_string(),
                        &line.unit_price.to_string(),
                        &line.line_total.to_string(),
                    ],
                    &CART_COLUMNS,
                );
            }
            output.table_rule(&CART_COLUMNS);
            output.kv("subtotal", &summary.subtotal.to_string());
            if summary.has_shipping() {
                output.kv("shipping", &summary.shipping.to_string());
            }
            output.kv("total", &summary.total.to_string());
        }
        output.kv("checkout", &status_badge(self.checkout.status()));

        if let Some(message) = self.checkout.failure_message(&self.cart) {
            output.error(&message);
        }
    }

    /// Submit the cart. Failures are reported here and kept by the
    /// reconciler until the cart changes.
    ///
    /// The saved session is re-read first so a `shelf login` made in
    /// another terminal applies without leaving the shop.
    async fn place_order(&mut self, client: &BookstoreClient, output: &Output) {
        if let Err(e) = client.session().reload() {
            output.warn(&format!("Could not read the saved session: {}", e));
        }

        let spinner = output.spinner("Placing order...");
        let result = self.checkout.submit(&mut self.cart, client).await;
        spinner.finish_and_clear();

        match result {
            Ok(transaction) => {
                output.success("Order placed");
                print_transaction(&transaction, self.currency, output);

                match client.list_transactions(&TransactionQuery::new()).await {
                    Ok(history) => {
                        output.header("Your transactions");
                        print_history(&history, self.currency, output);
                    }
                    Err(e) => output.warn(&format!(
                        "Could not load transaction history: {}",
                        e.user_message()
                    )),
                }
            }
            Err(error) => {
                let message = self
                    .checkout
                    .failure_message(&self.cart)
                    .unwrap_or_else(|| error.user_message());
                output.error(&message);
                if error.requires_login() {
                    output.info(
                        "Run `shelf login` in another terminal, then `checkout` again. The cart is kept.",
                    );
                }
            }
        }
    }
}
