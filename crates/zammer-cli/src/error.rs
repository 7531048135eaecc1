use colored::Colorize;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    let msg = format!("{err:#}").to_lowercase();

    if msg.contains("catalog item json") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Pass a JSON object with at least an \"_id\" field, e.g.:");
        eprintln!(
            "  {} zammer recent record --json '{{\"_id\": \"p-1\", \"name\": \"Kurta\"}}'",
            "$".dimmed()
        );
    }

    if msg.contains("already open") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Another zammer process is using the database. Try again when it exits.");
    }

    if msg.contains("must be at least") || msg.contains("must not be empty") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Check the [tracker] section of your config file:");
        eprintln!("  {} zammer info", "$".dimmed());
    }

    std::process::exit(1);
}
