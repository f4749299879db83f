use bookrank::view_state::SortMode;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const ABOUT: &str = "Rank the books recommended on book-review channels";

#[derive(Parser, Debug)]
#[command(
    name = "bookrank",
    bin_name = "bookrank",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = ABOUT, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding books.json and channels.json
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Config file to use instead of the discovered bookrank.json
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Never colour the output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Browse,
    Catalogue,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Browse => "Browse:",
            CommandGroup::Catalogue => "Catalogue:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "show" => Some(CommandGroup::Browse),
            "channels" | "stats" | "link" => Some(CommandGroup::Catalogue),
            "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    /// Returns all groups in display order
    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Browse,
            CommandGroup::Catalogue,
            CommandGroup::Misc,
        ]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("bookrank {version}\n"));
    output.push_str(ABOUT);
    output.push('\n');
    output.push('\n');
    output.push_str("Usage: bookrank [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --data <DIR>     Directory holding books.json and channels.json\n");
    output.push_str("      --config <FILE>  Config file to use instead of bookrank.json\n");
    output.push_str("      --no-color       Never colour the output\n");
    output.push_str("  -v, --verbose        More log output (-v info, -vv debug)\n");
    output.push_str("  -h, --help           Print help\n");
    output.push_str("  -V, --version        Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a command by name, using clap's rendering
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            print!("{}", subcmd.render_help());
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

pub fn print_subcommand_help(command: &Option<Commands>) {
    let name = match command {
        Some(Commands::Browse(BrowseCommands::List(_))) => "list",
        Some(Commands::Browse(BrowseCommands::Show { .. })) => "show",
        Some(Commands::Catalogue(CatalogueCommands::Channels)) => "channels",
        Some(Commands::Catalogue(CatalogueCommands::Stats)) => "stats",
        Some(Commands::Catalogue(CatalogueCommands::Link { .. })) => "link",
        Some(Commands::Misc(MiscCommands::Help { .. })) => "help",
        None => {
            print_grouped_help();
            return;
        }
    };
    print_help_for_command(name);
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Browse(BrowseCommands),

    #[command(flatten)]
    Catalogue(CatalogueCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum BrowseCommands {
    /// Show one page of the ranking
    #[command(alias = "ls", display_order = 1)]
    List(ListArgs),

    /// Show a book and every video that mentions it
    #[command(alias = "s", display_order = 2)]
    Show {
        /// Book id, as shown in the listing
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CatalogueCommands {
    /// List the channels the catalogue is built from
    #[command(display_order = 10)]
    Channels,

    /// Totals, covered years and the busiest channels
    #[command(display_order = 11)]
    Stats,

    /// Print a store link for an ASIN or a 978 ISBN-13
    #[command(display_order = 12)]
    Link {
        /// ASIN, ISBN-10 or 978 ISBN-13 (hyphens allowed)
        code: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Print help for bookrank or a subcommand
    #[command(display_order = 20)]
    Help {
        /// Subcommand to get help for
        command: Option<String>,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
    /// Ranking order
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<usize>,

    /// Only books whose title or author contains this text
    #[arg(short, long)]
    pub query: Option<String>,

    /// Only count videos published in this year
    #[arg(long)]
    pub year: Option<i32>,

    /// Only count videos from this channel (exact name)
    #[arg(long)]
    pub channel: Option<String>,

    /// Start from a shared link or query string; other flags override it
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Point,
    Count,
    Views,
    Likes,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Point => SortMode::Point,
            SortArg::Count => SortMode::Count,
            SortArg::Views => SortMode::Views,
            SortArg::Likes => SortMode::Likes,
        }
    }
}
