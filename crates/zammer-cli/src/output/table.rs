use anyhow::Result;
use comfy_table::{Cell, Table};
use zammer_core::ViewedItem;

use crate::commands::utils::{format_price, format_timestamp};

pub fn print_table(table: Table) -> Result<()> {
    println!("{table}");
    Ok(())
}

pub fn viewed_items_table(items: &[ViewedItem]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "ID", "Name", "Price", "MRP", "Viewed"]);

    for (index, item) in items.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&item.id),
            Cell::new(item.name.as_deref().unwrap_or("-")),
            Cell::new(format_price(item.zammer_price)),
            Cell::new(format_price(item.mrp)),
            Cell::new(format_timestamp(Some(item.viewed_at))),
        ]);
    }

    table
}
