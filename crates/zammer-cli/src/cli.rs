use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Output format for CLI commands
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    #[allow(dead_code)]
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

#[derive(Parser)]
#[command(name = "zammer")]
#[command(version, about = "Zammer - recently viewed products on this device")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (defaults to ~/.zammer/zammer.db)
    #[arg(long, global = true, env = "ZAMMER_DB_PATH")]
    pub db_path: Option<String>,

    /// Log to stderr at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Recently viewed products
    Recent {
        #[command(subcommand)]
        command: RecentCommands,
    },

    /// Configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Show data directory and file locations
    Info,
}

#[derive(Subcommand)]
pub enum RecentCommands {
    /// List recently viewed products, most recent first
    List,

    /// Record a product view
    Record(RecordArgs),

    /// Remove one product from the list
    Remove {
        /// Product identifier
        id: String,
    },

    /// Remove every product from the list
    Clear,
}

#[derive(Args)]
pub struct RecordArgs {
    /// Product identifier
    #[arg(required_unless_present = "json")]
    pub id: Option<String>,

    /// Full catalog item as a JSON object (storefront field names)
    #[arg(
        long,
        conflicts_with_all = [
            "id",
            "name",
            "images",
            "price",
            "mrp",
            "brand",
            "rating",
            "reviews",
            "limited_edition",
            "trending",
        ]
    )]
    pub json: Option<String>,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Image URL (repeatable, only the first two are kept)
    #[arg(long = "image")]
    pub images: Vec<String>,

    /// Current selling price
    #[arg(long)]
    pub price: Option<f64>,

    /// List price
    #[arg(long)]
    pub mrp: Option<f64>,

    #[arg(long)]
    pub brand: Option<String>,

    /// Average rating
    #[arg(long)]
    pub rating: Option<f64>,

    /// Number of reviews
    #[arg(long)]
    pub reviews: Option<u32>,

    #[arg(long)]
    pub limited_edition: bool,

    #[arg(long)]
    pub trending: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
}
