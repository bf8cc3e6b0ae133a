//! # Admin Panel
//!
//! Catalog CRUD and history views, gated by the shared-secret password.
//!
//! Every action loads a fresh catalog snapshot through the store - nothing
//! is cached between menu choices. Errors are printed and the panel
//! continues.

use tracing::{info, warn};

use crate::error::{report, AppError};
use crate::prompt;
use crate::render;
use crate::App;
use medstore_core::{MedicinePatch, NewMedicine};
use medstore_store::StoreError;

/// Runs the admin panel menu until the administrator backs out.
pub fn panel(app: &App) -> Result<(), AppError> {
    if !authenticate(app)? {
        println!("\nAccess denied! Invalid password.");
        return Ok(());
    }

    loop {
        println!();
        render::print_rule('-', 40);
        println!("          ADMIN PANEL");
        render::print_rule('-', 40);
        println!("1. Add New Medicine");
        println!("2. View All Medicines");
        println!("3. Search Medicine");
        println!("4. Update Medicine");
        println!("5. Delete Medicine");
        println!("6. View Low Stock Medicines");
        println!("7. View Transactions");
        println!("8. View Sales History");
        println!("0. Return to Main Menu");

        match prompt::read_menu_choice("Enter your choice: ")? {
            Some(1) => report(add_medicine(app))?,
            Some(2) => report(view_all(app))?,
            Some(3) => report(search(app))?,
            Some(4) => report(update(app))?,
            Some(5) => report(delete(app))?,
            Some(6) => report(low_stock(app))?,
            Some(7) => report(view_transactions(app))?,
            Some(8) => report(view_receipts(app))?,
            Some(0) => {
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

/// Prompts for the admin password and compares against the configured
/// shared secret.
fn authenticate(app: &App) -> Result<bool, AppError> {
    let password = prompt::read_line("\nEnter admin password: ")?;
    let granted = password == app.config.admin_password;
    if granted {
        info!("admin authenticated");
    } else {
        warn!("admin authentication failed");
    }
    Ok(granted)
}

fn add_medicine(app: &App) -> Result<(), AppError> {
    render::print_header("ADD NEW MEDICINE");

    let name = prompt::prompt_text("Enter medicine name: ")?;
    let category = prompt::prompt_text("Enter category (e.g. Tablet, Syrup, Injection): ")?;
    let price_cents = prompt::prompt_price("Enter price: ")?;
    let quantity = prompt::prompt_i64("Enter quantity: ")?;
    let expiry = prompt::prompt_date("Enter expiry date (YYYY-MM-DD): ")?;

    let medicine = app.catalog.add(NewMedicine {
        name,
        category,
        price_cents,
        quantity,
        expiry,
    })?;

    println!("\nMedicine added successfully!");
    println!("Medicine ID: {}", medicine.id);
    Ok(())
}

fn view_all(app: &App) -> Result<(), AppError> {
    render::print_header("ALL MEDICINES INVENTORY");

    let records = app.catalog.list()?;
    if records.is_empty() {
        println!("No medicines found in inventory.");
        return Ok(());
    }

    render::print_inventory(&records);
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

fn update(app: &App) -> Result<(), AppError> {
    render::print_header("UPDATE MEDICINE");

    let id = prompt::prompt_u64("Enter medicine ID to update: ")?;
    let current = app
        .catalog
        .find_by_id(id)?
        .ok_or(StoreError::NotFound(id))?;

    println!("\nCurrent details:");
    render::print_medicines(std::slice::from_ref(&current));

    println!("\nEnter new details (leave blank to keep the current value):");
    let patch = MedicinePatch {
        name: prompt::prompt_optional_text(&format!("Name [{}]: ", current.name))?,
        category: prompt::prompt_optional_text(&format!("Category [{}]: ", current.category))?,
        price_cents: prompt::prompt_optional_price(&format!("Price [{}]: ", current.price()))?,
        quantity: prompt::prompt_optional_i64(&format!("Quantity [{}]: ", current.quantity))?,
        expiry: prompt::prompt_optional_date(&format!(
            "Expiry date [{}]: ",
            current.expiry.format("%Y-%m-%d")
        ))?,
    };

    if patch.is_empty() {
        println!("\nNothing changed.");
        return Ok(());
    }

    app.catalog.update(id, &patch)?;
    println!("\nMedicine updated successfully!");
    Ok(())
}

fn delete(app: &App) -> Result<(), AppError> {
    render::print_header("DELETE MEDICINE");

    let id = prompt::prompt_u64("Enter medicine ID to delete: ")?;
    let medicine = app
        .catalog
        .find_by_id(id)?
        .ok_or(StoreError::NotFound(id))?;

    println!("\nMedicine to delete:");
    render::print_medicines(std::slice::from_ref(&medicine));

    if !prompt::prompt_yes_no("\nAre you sure you want to delete this medicine? (y/n): ")? {
        println!("Deletion cancelled.");
        return Ok(());
    }

    app.catalog.delete(id)?;
    println!("Medicine deleted successfully!");
    Ok(())
}

fn low_stock(app: &App) -> Result<(), AppError> {
    let threshold = app.config.low_stock_threshold;
    render::print_header(&format!("LOW STOCK MEDICINES (Quantity < {threshold})"));

    let records = app.catalog.low_stock(threshold)?;
    if records.is_empty() {
        println!("No low stock medicines found.");
        return Ok(());
    }

    render::print_medicines(&records);
    Ok(())
}

fn view_transactions(app: &App) -> Result<(), AppError> {
    render::print_header("TRANSACTION HISTORY");

    let records = app.transactions.list()?;
    if records.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    render::print_transactions(&records);
    Ok(())
}

fn view_receipts(app: &App) -> Result<(), AppError> {
    render::print_header("SALES HISTORY");

    let text = app.receipts.read_all()?;
    if text.is_empty() {
        println!("No sales history available.");
        return Ok(());
    }

    print!("{text}");
    Ok(())
}
