use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "ibooks")]
#[command(about = "Apple Books library and annotation extraction toolkit")]
#[command(version)]
pub struct Cli {
    /// Control colored output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List books in the library
    Books {
        /// Path to the BKLibrary .sqlite store (default: auto-discover)
        #[arg(short, long)]
        library: Option<String>,

        /// Path to the AEAnnotation .sqlite store (default: auto-discover)
        #[arg(short, long)]
        store: Option<String>,

        /// Include hidden assets
        #[arg(long)]
        hidden: bool,

        /// Display additional metadata per book
        #[arg(short, long)]
        verbose: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List annotations in reading order
    Annotations {
        /// Path to the BKLibrary .sqlite store (default: auto-discover)
        #[arg(short, long)]
        library: Option<String>,

        /// Path to the AEAnnotation .sqlite store (default: auto-discover)
        #[arg(short, long)]
        store: Option<String>,

        /// Only annotations of one book (store asset id)
        #[arg(short, long)]
        book: Option<String>,

        /// Include annotations marked deleted
        #[arg(long)]
        deleted: bool,

        /// Keep store order instead of sorting by location
        #[arg(long)]
        unsorted: bool,

        /// Display location and dates per annotation
        #[arg(short, long)]
        verbose: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Export books with their nested annotations
    Export {
        /// Path to the BKLibrary .sqlite store (default: auto-discover)
        #[arg(short, long)]
        library: Option<String>,

        /// Path to the AEAnnotation .sqlite store (default: auto-discover)
        #[arg(short, long)]
        store: Option<String>,

        /// Output format: json or csv
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Include annotations marked deleted
        #[arg(long)]
        deleted: bool,
    },

    /// Show resolved store paths and row counts
    Info {
        /// Path to the BKLibrary .sqlite store (default: auto-discover)
        #[arg(short, long)]
        library: Option<String>,

        /// Path to the AEAnnotation .sqlite store (default: auto-discover)
        #[arg(short, long)]
        store: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
