//! # Console Rendering
//!
//! Table and header printing for the menu loops. Formatting only - nothing
//! here reads input or touches a store.

use medstore_core::{Cart, CartTotals, Medicine, Money, TransactionRecord};

/// Prints a horizontal rule of `length` copies of `ch`.
pub fn print_rule(ch: char, length: usize) {
    println!("{}", ch.to_string().repeat(length));
}

/// Prints the application banner.
pub fn print_banner(store_name: &str) {
    println!();
    print_rule('=', 60);
    println!("    {store_name}");
    print_rule('=', 60);
}

/// Prints a boxed section header.
pub fn print_header(title: &str) {
    println!();
    print_rule('=', 50);
    println!("          {title}");
    print_rule('=', 50);
}

/// Prints the medicine table header row.
fn print_medicine_header() {
    println!(
        "{:<8} {:<30} {:<15} {:>10} {:>6}  {:<12}",
        "ID", "Name", "Category", "Price", "Qty", "Expiry"
    );
    print_rule('-', 88);
}

/// Prints one medicine row.
fn print_medicine_row(medicine: &Medicine) {
    println!(
        "{:<8} {:<30} {:<15} {:>10} {:>6}  {:<12}",
        medicine.id,
        medicine.name,
        medicine.category,
        medicine.price().to_string(),
        medicine.quantity,
        medicine.expiry.format("%Y-%m-%d")
    );
}

/// Prints a table of medicines.
pub fn print_medicines(records: &[Medicine]) {
    print_medicine_header();
    for medicine in records {
        print_medicine_row(medicine);
    }
}

/// Prints the full-inventory table with count and value footer.
pub fn print_inventory(records: &[Medicine]) {
    print_medicines(records);
    print_rule('-', 88);

    let total_value = records
        .iter()
        .fold(Money::zero(), |acc, m| acc + m.price().multiply_quantity(m.quantity));
    println!("Total Medicines: {}", records.len());
    println!("Total Inventory Value: {total_value}");
}

/// Prints the in-stock records grouped by category, for browsing.
pub fn print_by_category(records: &[Medicine]) {
    let in_stock: Vec<&Medicine> = records.iter().filter(|m| m.quantity > 0).collect();
    if in_stock.is_empty() {
        println!("No medicines available.");
        return;
    }

    // Unique categories in first-seen order
    let mut categories: Vec<&str> = Vec::new();
    for medicine in &in_stock {
        if !categories.contains(&medicine.category.as_str()) {
            categories.push(&medicine.category);
        }
    }

    for category in categories {
        println!("\n{category}:");
        println!("{:<8} {:<30} {:>10} {:>6}", "ID", "Name", "Price", "Stock");
        print_rule('-', 58);
        for medicine in in_stock.iter().filter(|m| m.category == category) {
            println!(
                "{:<8} {:<30} {:>10} {:>6}",
                medicine.id,
                medicine.name,
                medicine.price().to_string(),
                medicine.quantity
            );
        }
    }
}

/// Prints the cart with line totals and the subtotal/VAT/total footer.
pub fn print_cart(cart: &Cart, totals: CartTotals, tax_pct: f64) {
    println!(
        "{:<8} {:<30} {:>10} {:>6} {:>10}",
        "ID", "Name", "Price", "Qty", "Total"
    );
    print_rule('-', 68);
    for line in &cart.lines {
        println!(
            "{:<8} {:<30} {:>10} {:>6} {:>10}",
            line.medicine_id,
            line.name,
            Money::from_cents(line.unit_price_cents).to_string(),
            line.quantity,
            line.line_total().to_string()
        );
    }
    print_rule('-', 68);
    println!("Subtotal: {}", totals.subtotal);
    println!("VAT ({tax_pct}%): {}", totals.tax);
    println!("Total: {}", totals.total);
}

/// Prints the transaction summary table with running totals.
pub fn print_transactions(records: &[TransactionRecord]) {
    println!(
        "{:<8} {:<22} {:>6} {:>10}",
        "ID", "Time", "Items", "Amount"
    );
    print_rule('-', 50);

    let mut total_sales = Money::zero();
    for record in records {
        println!(
            "{:<8} {:<22} {:>6} {:>10}",
            record.id,
            record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            record.items_count(),
            record.total().to_string()
        );
        total_sales += record.total();
    }

    print_rule('-', 50);
    println!("Total Transactions: {}", records.len());
    println!("Total Sales: {total_sales}");
}
