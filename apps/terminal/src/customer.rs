//! # Customer Panel
//!
//! Browse, search, cart, and checkout.
//!
//! The cart lives only for this panel visit - it is created empty on entry
//! and dropped on exit or cleared by a successful checkout. Stock is checked
//! once when a line is added and re-checked at checkout against a freshly
//! loaded catalog; a shortage rejects the checkout, leaves the cart intact,
//! and the customer adjusts and retries.

use chrono::Utc;
use tracing::info;

use crate::error::{report, AppError};
use crate::prompt;
use crate::render;
use crate::App;
use medstore_core::validation::validate_purchase_quantity;
use medstore_core::{settle, Cart, CoreError, TransactionRecord};
use medstore_store::format_receipt;

/// Runs the customer panel menu until the customer backs out.
pub fn panel(app: &App) -> Result<(), AppError> {
    let mut cart = Cart::new();

    loop {
        println!();
        render::print_rule('-', 40);
        println!("        CUSTOMER PANEL");
        render::print_rule('-', 40);
        println!("1. Browse Medicines");
        println!("2. Search Medicine");
        println!("3. Add to Cart");
        println!("4. Remove from Cart");
        println!("5. View Cart");
        println!("6. Checkout");
        println!("0. Return to Main Menu");

        match prompt::read_menu_choice("Enter your choice: ")? {
            Some(1) => report(browse(app))?,
            Some(2) => report(search(app))?,
            Some(3) => report(add_to_cart(app, &mut cart))?,
            Some(4) => report(remove_from_cart(app, &mut cart))?,
            Some(5) => report(view_cart(app, &cart))?,
            Some(6) => report(checkout(app, &mut cart))?,
            Some(0) => {
                // Cart is discarded with this panel visit
                println!("\nReturning to Main Menu...");
                return Ok(());
            }
            _ => {
                println!("\nInvalid choice! Please try again.");
                continue;
            }
        }
        prompt::pause()?;
    }
}

fn browse(app: &App) -> Result<(), AppError> {
    render::print_header("BROWSE MEDICINES");

    let records = app.catalog.list()?;
    render::print_by_category(&records);
    Ok(())
}

fn search(app: &App) -> Result<(), AppError> {
    render::print_header("SEARCH MEDICINE");

    let keyword = prompt::prompt_text("Enter name keyword: ")?;
    let hits = app.catalog.search_by_name(&keyword)?;
    if hits.is_empty() {
        println!("No medicines found matching '{keyword}'");
        return Ok(());
    }

    render::print_medicines(&hits);
    Ok(())
}

fn add_to_cart(app: &App, cart: &mut Cart) -> Result<(), AppError> {
    let id = prompt::prompt_u64("\nEnter medicine ID to add: ")?;

    // Fresh snapshot for this action; the cart freezes name and price now,
    // stock is re-validated at checkout
    let medicine = app
        .catalog
        .find_by_id(id)?
        .ok_or(CoreError::MedicineNotFound(id))?;

    if medicine.quantity <= 0 {
        println!("Out of stock.");
        return Ok(());
    }

    println!("Available quantity: {}", medicine.quantity);
    let quantity = prompt::prompt_i64("Enter desired quantity: ")?;
    validate_purchase_quantity(quantity).map_err(CoreError::from)?;

    cart.add_line(&medicine, quantity)?;
    println!("{quantity} x {} added to cart.", medicine.name);
    Ok(())
}

fn remove_from_cart(app: &App, cart: &mut Cart) -> Result<(), AppError> {
    if cart.is_empty() {
        println!("\nYour cart is empty!");
        return Ok(());
    }

    view_cart(app, cart)?;

    let id = prompt::prompt_u64("\nEnter medicine ID to remove (0 to cancel): ")?;
    if id == 0 {
        println!("Cancelled.");
        return Ok(());
    }

    let line = cart.line(id).ok_or(CoreError::NotInCart(id))?;
    println!("Found: {} (Quantity: {})", line.name, line.quantity);
    let name = line.name.clone();

    let remove_qty = prompt::prompt_i64("Enter quantity to remove (0 to remove all): ")?;
    cart.remove(id, remove_qty)?;

    match cart.line(id) {
        Some(remaining) => println!(
            "Reduced quantity of {name} by {remove_qty}. Remaining: {}",
            remaining.quantity
        ),
        None => println!("Removed {name} from cart."),
    }
    Ok(())
}

fn view_cart(app: &App, cart: &Cart) -> Result<(), AppError> {
    render::print_header("YOUR SHOPPING CART");

    if cart.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    let rate = app.config.tax_rate;
    render::print_cart(cart, cart.totals(rate), rate.percentage());
    Ok(())
}

fn checkout(app: &App, cart: &mut Cart) -> Result<(), AppError> {
    if cart.is_empty() {
        println!("\nYour cart is empty!");
        return Ok(());
    }

    // Reviewing: display only, nothing is mutated
    render::print_header("CHECKOUT");
    let rate = app.config.tax_rate;
    render::print_cart(cart, cart.totals(rate), rate.percentage());

    if !prompt::prompt_yes_no("\nProceed to payment? (y/n): ")? {
        println!("Checkout cancelled.");
        return Ok(());
    }

    let customer_name = prompt::prompt_optional_text("Enter your name (press Enter to skip): ")?;

    // Validating + Committed; an insufficient-stock rejection propagates
    // with the cart left intact for the customer to adjust
    let record = commit(app, cart, customer_name)?;

    println!("\nPayment successful. Thank you for your purchase!");
    print!("{}", format_receipt(&record, rate));
    Ok(())
}

/// The commit half of checkout.
///
/// Re-validates against a freshly loaded catalog, then persists: one atomic
/// catalog save carrying every stock decrement (the atomicity boundary),
/// one transaction-log append, one receipt append, and finally the cart is
/// cleared. A validation failure returns before anything is written.
fn commit(
    app: &App,
    cart: &mut Cart,
    customer_name: Option<String>,
) -> Result<TransactionRecord, AppError> {
    let mut catalog = app.catalog.load()?;
    let settlement = settle(&catalog.records, cart, app.config.tax_rate)?;

    catalog.records = settlement.records;
    app.catalog.save(&catalog)?;

    let record = TransactionRecord {
        id: app.transactions.next_id()?,
        timestamp: Utc::now(),
        customer_name,
        lines: settlement.lines,
        subtotal_cents: settlement.subtotal_cents,
        tax_cents: settlement.tax_cents,
        total_cents: settlement.total_cents,
    };
    app.transactions.append(&record)?;
    app.receipts.append(&record, app.config.tax_rate)?;

    cart.clear();

    info!(
        transaction_id = record.id,
        total_cents = record.total_cents,
        lines = record.lines.len(),
        "checkout committed"
    );
    Ok(record)
}
