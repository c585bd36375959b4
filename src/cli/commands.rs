use clap::{Parser, Subcommand};

use crate::entity::SortOrder;

#[derive(Parser, Debug)]
#[command(name = "notepin")]
#[command(version, about = "Pinned, tagged short notes kept next to your project")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the .notepin/ directory in the current directory
    Init,

    /// Add a new note
    Add {
        /// Note title
        title: String,

        /// Note content
        #[arg(long, short = 'c', conflicts_with = "stdin")]
        content: Option<String>,

        /// Read content from stdin
        #[arg(long)]
        stdin: bool,

        /// Comma-separated tags, e.g. "work, q3"
        #[arg(long, short = 't', default_value = "")]
        tags: String,

        /// Pin the note to the top of listings
        #[arg(long)]
        pin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit a note. Fields not given keep their current value.
    Edit {
        /// Note ID (full or unique prefix)
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New content
        #[arg(long, short = 'c', conflicts_with = "stdin")]
        content: Option<String>,

        /// Read new content from stdin
        #[arg(long)]
        stdin: bool,

        /// New comma-separated tags (replaces the current ones)
        #[arg(long, short = 't')]
        tags: Option<String>,

        /// Pin the note
        #[arg(long, conflicts_with = "unpin")]
        pin: bool,

        /// Unpin the note
        #[arg(long)]
        unpin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note
    Delete {
        /// Note ID (full or unique prefix)
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// List notes, pinned first
    List {
        /// Only notes with a tag containing this text (case-insensitive)
        #[arg(long, short = 't')]
        tag: Option<String>,

        /// Sort order within the pinned and unpinned groups
        #[arg(long, short = 's', default_value = "newest")]
        sort: SortOrder,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Get {
        /// Note ID (full or unique prefix)
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
