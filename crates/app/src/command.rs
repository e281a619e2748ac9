//! Shell command parsing.
//!
//! Each input line is parsed as a multicall command line, so the first word
//! names the subcommand and clap generates `help` and usage errors.

use std::str::FromStr;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use domain::{MenuFilter, ProfileField};
use thiserror::Error;

/// Input the shell could not make sense of, or a request for help.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct CommandError(#[from] clap::Error);

impl CommandError {
    pub fn kind(&self) -> ErrorKind {
        self.0.kind()
    }

    /// True when the line asked for help rather than failing to parse.
    pub fn is_help(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        )
    }
}

#[derive(Debug, Parser)]
#[command(name = "restaurant", multicall = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List dishes, optionally one category
    Menu {
        /// all, pizza, seafood, salads, burgers, pasta or mexican
        #[arg(default_value = "all")]
        category: MenuFilter,
    },
    /// Add one of a dish (id or name)
    Add {
        #[arg(required = true)]
        dish: Vec<String>,
    },
    /// Raise a quantity by one
    #[command(name = "inc")]
    Increment {
        #[arg(required = true)]
        dish: Vec<String>,
    },
    /// Lower a quantity by one
    #[command(name = "dec")]
    Decrement {
        #[arg(required = true)]
        dish: Vec<String>,
    },
    /// Set a quantity (0 or less removes the dish)
    #[command(name = "qty", allow_negative_numbers = true)]
    SetQuantity {
        #[arg(required = true)]
        dish: Vec<String>,
        quantity: i64,
    },
    /// Remove a dish from the cart
    #[command(visible_alias = "rm")]
    Remove {
        #[arg(required = true)]
        dish: Vec<String>,
    },
    /// Empty the cart
    Clear,
    /// Show the cart and amount due
    Cart,
    /// Place the order
    Checkout,
    /// Show the order status
    Status,
    /// Cancel the order in progress
    Cancel,
    /// Sign in
    Login { email: String, password: String },
    /// Create an account and sign in
    Register {
        name: String,
        email: String,
        password: String,
        confirm: String,
    },
    /// Sign out
    Logout,
    /// Change password
    #[command(name = "passwd")]
    ChangePassword {
        email: String,
        current: String,
        new: String,
        confirm: String,
    },
    /// Show or edit the profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },
    /// Leave
    #[command(visible_alias = "exit")]
    Quit,
}

/// Profile page actions. No action shows the profile.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ProfileAction {
    /// Start editing
    Edit,
    /// Change one field of the draft
    Set {
        field: ProfileField,
        #[arg(required = true)]
        value: Vec<String>,
    },
    /// Keep the draft
    Save,
    /// Drop the draft
    Cancel,
}

impl Command {
    /// Short name used in logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Menu { .. } => "menu",
            Command::Add { .. } => "add",
            Command::Increment { .. } => "inc",
            Command::Decrement { .. } => "dec",
            Command::SetQuantity { .. } => "qty",
            Command::Remove { .. } => "remove",
            Command::Clear => "clear",
            Command::Cart => "cart",
            Command::Checkout => "checkout",
            Command::Status => "status",
            Command::Cancel => "cancel",
            Command::Login { .. } => "login",
            Command::Register { .. } => "register",
            Command::Logout => "logout",
            Command::ChangePassword { .. } => "passwd",
            Command::Profile { .. } => "profile",
            Command::Quit => "quit",
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            let err = ShellLine::command().error(
                ErrorKind::MissingSubcommand,
                "type `help` for a list of commands",
            );
            return Err(err.into());
        };

        let args = std::iter::once(verb.to_ascii_lowercase()).chain(words.map(str::to_string));
        let parsed = ShellLine::try_parse_from(args)?;
        Ok(parsed.command)
    }
}
