//! Command-line surface.
//!
//! ```text
//! storefront [--config <path>] <command>
//!
//!   books [--category ID | --search TEXT | --author NAME]
//!   categories
//!   book <id>
//!   cart show | add <id> [--qty N] | remove <id> | update <id> <qty> | clear
//!   checkout --address <text> [--method credit-card|debit-card|paypal|bank-transfer]
//!   orders
//!   review <book-id> --rating 1..5 [--comment <text>]
//!   my-reviews
//!   login --username <name> --password <pw>
//!   register --username .. --email .. --password .. --password2 ..
//!            --first-name .. --last-name ..
//!   logout | whoami
//!   profile show | update [--first-name ..] [--last-name ..] [--email ..]
//!                         [--phone ..] [--address ..]
//! ```

use std::path::PathBuf;

use bookstore_core::{BookId, PaymentMethod, ProfileUpdate, Registration};
use clap::{Args, Parser, Subcommand};

use crate::commands::books::BookFilter;

#[derive(Debug, Parser)]
#[command(name = "storefront", author, version, about = "Browse and buy books from the terminal")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "STOREFRONT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List books, optionally filtered
    Books(BookFilterArgs),
    /// List book categories
    Categories,
    /// Show one book with its reviews and rating
    Book { id: BookId },
    /// Work with the local cart
    #[command(subcommand)]
    Cart(CartCommand),
    /// Place an order for everything in the cart
    Checkout {
        #[arg(long)]
        address: String,
        #[arg(long, default_value = "credit-card")]
        method: PaymentMethod,
    },
    /// List your orders
    Orders,
    /// Review a book
    Review {
        book_id: BookId,
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        comment: Option<String>,
    },
    /// List reviews you have written
    MyReviews,
    /// Log in and remember the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "BOOKSTORE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and log in
    Register(RegisterArgs),
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// View or edit your profile
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Debug, Args)]
pub struct BookFilterArgs {
    #[arg(long, conflicts_with_all = ["search", "author"])]
    pub category: Option<i64>,
    #[arg(long, conflicts_with = "author")]
    pub search: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
}

impl From<BookFilterArgs> for BookFilter {
    fn from(args: BookFilterArgs) -> Self {
        BookFilter {
            category: args.category,
            search: args.search,
            author: args.author,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    Show,
    Add {
        id: BookId,
        #[arg(long, default_value_t = 1)]
        qty: i64,
    },
    Remove {
        id: BookId,
    },
    /// Set a quantity; zero or less removes the item
    Update {
        id: BookId,
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },
    Clear,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub password2: String,
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
}

impl From<RegisterArgs> for Registration {
    fn from(args: RegisterArgs) -> Self {
        Registration {
            username: args.username,
            email: args.email,
            password: args.password,
            password2: args.password2,
            first_name: args.first_name,
            last_name: args.last_name,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    Show,
    Update(ProfileUpdateArgs),
}

#[derive(Debug, Args)]
pub struct ProfileUpdateArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

impl From<ProfileUpdateArgs> for ProfileUpdate {
    fn from(args: ProfileUpdateArgs) -> Self {
        ProfileUpdate {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            address: args.address,
        }
    }
}
