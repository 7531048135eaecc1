use anyhow::{Context, Result};
use serde_json::json;
use zammer_core::{CatalogItem, LocalStorage, RecentlyViewed};

use crate::cli::{RecentCommands, RecordArgs};
use crate::output::table::{print_table, viewed_items_table};
use crate::output::{OutputFormat, json::print_json};

type Tracker = RecentlyViewed<LocalStorage>;

pub fn run(tracker: &mut Tracker, command: RecentCommands, format: OutputFormat) -> Result<()> {
    match command {
        RecentCommands::List => list_items(tracker, format),
        RecentCommands::Record(args) => record_item(tracker, args, format),
        RecentCommands::Remove { id } => remove_item(tracker, &id, format),
        RecentCommands::Clear => clear_items(tracker, format),
    }
}

fn list_items(tracker: &Tracker, format: OutputFormat) -> Result<()> {
    if format.is_json() {
        return print_json(&tracker.items());
    }

    if tracker.is_empty() {
        println!("No recently viewed products.");
        return Ok(());
    }

    print_table(viewed_items_table(tracker.items()))
}

fn record_item(tracker: &mut Tracker, args: RecordArgs, format: OutputFormat) -> Result<()> {
    let item = catalog_item_from_args(args)?;
    let recorded = tracker.record(&item);

    if format.is_json() {
        return print_json(&json!({
            "recorded": recorded,
            "persisted": tracker.is_persisted(),
            "items": tracker.items(),
        }));
    }

    if recorded {
        println!("Recorded view of {}", tracker.items()[0].id);
    } else {
        println!("Ignored: item has no identifier");
    }
    warn_if_memory_only(tracker);
    Ok(())
}

fn remove_item(tracker: &mut Tracker, id: &str, format: OutputFormat) -> Result<()> {
    let removed = tracker.remove(id);

    if format.is_json() {
        return print_json(&json!({
            "id": id,
            "removed": removed,
            "persisted": tracker.is_persisted(),
        }));
    }

    if removed {
        println!("Removed {id}");
    } else {
        println!("{id} is not in the recently viewed list");
    }
    warn_if_memory_only(tracker);
    Ok(())
}

fn clear_items(tracker: &mut Tracker, format: OutputFormat) -> Result<()> {
    tracker.clear();

    if format.is_json() {
        return print_json(&json!({
            "cleared": true,
            "persisted": tracker.is_persisted(),
        }));
    }

    println!("Cleared recently viewed products.");
    warn_if_memory_only(tracker);
    Ok(())
}

fn warn_if_memory_only(tracker: &Tracker) {
    if !tracker.is_persisted() {
        eprintln!("Warning: change could not be saved to local storage");
    }
}

fn catalog_item_from_args(args: RecordArgs) -> Result<CatalogItem> {
    if let Some(raw) = args.json {
        return serde_json::from_str(&raw).context("Invalid catalog item JSON");
    }

    Ok(CatalogItem {
        id: args.id,
        name: args.name,
        images: args.images,
        zammer_price: args.price,
        mrp: args.mrp,
        brand: args.brand,
        average_rating: args.rating,
        num_reviews: args.reviews,
        is_limited_edition: args.limited_edition.then_some(true),
        is_trending: args.trending.then_some(true),
    })
}
