use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "A contact book that keeps phone numbers and emails unique")]
pub struct Cli {
    /// Path to the address book file
    #[clap(long, global = true)]
    pub file: Option<PathBuf>,

    /// Log debug output to stderr
    #[clap(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Starts the interactive shell when omitted
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum TagGroupCommand {
    /// Register one or more tag groups
    Add {
        /// Group names (alphanumeric)
        #[clap(required = true)]
        names: Vec<String>,
    },

    /// Remove a tag group that no person uses
    Remove {
        name: String,
    },

    /// List registered tag groups
    List,
}

#[derive(Subcommand, Debug)]
pub enum PrefsCommand {
    /// Print the preferences file and the address book it points at
    Show,

    /// Make PATH the default address book
    SetFile {
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new person
    Add {
        #[clap(long)]
        name: Option<String>,

        #[clap(long)]
        phone: Option<String>,

        #[clap(long)]
        email: Option<String>,

        #[clap(long)]
        address: Option<String>,

        /// May be repeated; roles must be unique ignoring case
        #[clap(long = "role")]
        roles: Vec<String>,

        /// May be repeated; GROUP.VALUE tags need a registered group
        #[clap(long = "tag")]
        tags: Vec<String>,

        /// PENDING or COMPLETED
        #[clap(long)]
        status: Option<String>,

        /// Use interactive mode (prompts)
        #[clap(long)]
        interactive: bool,
    },

    /// Edit the person at INDEX of the list
    Edit {
        index: String,

        #[clap(long)]
        name: Option<String>,

        #[clap(long)]
        phone: Option<String>,

        #[clap(long)]
        email: Option<String>,

        #[clap(long)]
        address: Option<String>,

        /// Replaces all roles; may be repeated
        #[clap(long = "role")]
        roles: Vec<String>,

        /// Remove every role
        #[clap(long, conflicts_with = "roles")]
        clear_roles: bool,

        /// Replaces all tags; may be repeated
        #[clap(long = "tag")]
        tags: Vec<String>,

        /// Remove every tag
        #[clap(long, conflicts_with = "tags")]
        clear_tags: bool,

        #[clap(long)]
        status: Option<String>,

        /// Remove the status
        #[clap(long, conflicts_with = "status")]
        clear_status: bool,
    },

    /// Delete the person at INDEX of the list
    Delete {
        index: String,

        /// Skip confirmation
        #[clap(long, short = 'y')]
        yes: bool,
    },

    /// List persons whose name contains a keyword, optionally by status and tag
    Find {
        keywords: Vec<String>,

        #[clap(long = "status")]
        statuses: Vec<String>,

        #[clap(long = "tag")]
        tags: Vec<String>,
    },

    /// List every person
    List,

    /// Delete every person (tag groups are kept)
    Clear {
        /// Skip confirmation
        #[clap(long, short = 'y')]
        yes: bool,
    },

    /// Manage tag groups
    #[clap(name = "taggroup", subcommand)]
    TagGroup(TagGroupCommand),

    /// Read commands interactively (`add n/NAME p/PHONE ...`)
    Shell,

    /// Show or change preferences
    #[clap(subcommand)]
    Prefs(PrefsCommand),
}
