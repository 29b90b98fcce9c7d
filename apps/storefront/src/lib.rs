//! # Bookstore Storefront
//!
//! Terminal front end for the bookstore services.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main()                                                                 │
//! │    │                                                                    │
//! │    ├── 1. Cli::parse()                                                  │
//! │    ├── 2. init_tracing()          RUST_LOG, or the default filter       │
//! │    ├── 3. StorefrontConfig::load  defaults → toml → BOOKSTORE_* env     │
//! │    ├── 4. AppContext::open        FileStorage + Session/Cart + Api      │
//! │    ├── 5. dispatch(command)       one command, typed result             │
//! │    └── 6. render::*               plain text to stdout                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr so command output can be piped.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod render;

use bookstore_core::{ProfileUpdate, Registration};
use tracing_subscriber::EnvFilter;

use crate::cli::{CartCommand, Cli, Command, ProfileCommand};
use crate::commands::books::BookFilter;
use crate::commands::{account, books, cart, checkout, orders, reviews};
use crate::config::StorefrontConfig;
use crate::context::AppContext;
use crate::error::StorefrontResult;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,bookstore=debug,storefront=debug,reqwest=warn";

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - every request and storage write
/// - `RUST_LOG=bookstore=trace` - bookstore crates only
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads configuration, opens local state and runs one command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = StorefrontConfig::load(cli.config)?;
    let ctx = AppContext::open(&config)?;

    let output = dispatch(&ctx, cli.command).await?;
    println!("{}", output.trim_end());
    Ok(())
}

/// Runs a command against `ctx` and renders its result.
pub async fn dispatch(ctx: &AppContext, command: Command) -> StorefrontResult<String> {
    let output = match command {
        Command::Books(args) => {
            let filter: BookFilter = args.into();
            render::books(&books::list_books(ctx, &filter).await?)
        }
        Command::Categories => render::categories(&books::list_categories(ctx).await?),
        Command::Book { id } => render::book_detail(&books::book_detail(ctx, id).await?),

        Command::Cart(CartCommand::Show) => render::cart(&cart::show(ctx)),
        Command::Cart(CartCommand::Add { id, qty }) => render::cart(&cart::add(ctx, id, qty).await?),
        Command::Cart(CartCommand::Remove { id }) => render::cart(&cart::remove(ctx, id)),
        Command::Cart(CartCommand::Update { id, qty }) => render::cart(&cart::update(ctx, id, qty)?),
        Command::Cart(CartCommand::Clear) => render::cart(&cart::clear(ctx)),

        Command::Checkout { address, method } => {
            render::receipt(&checkout::place_order(ctx, &address, method).await?)
        }
        Command::Orders => render::orders(&orders::my_orders(ctx).await?),

        Command::Review {
            book_id,
            rating,
            comment,
        } => {
            let review = reviews::submit(ctx, book_id, rating, comment.as_deref()).await?;
            let id = review.id;
            format!("Review #{} saved.\n{}", id, render::reviews(&[review]))
        }
        Command::MyReviews => render::reviews(&reviews::my_reviews(ctx).await?),

        Command::Login { username, password } => {
            let user = account::login(ctx, &username, &password).await?;
            format!("Logged in as {}.", user.display_name())
        }
        Command::Register(args) => {
            let form: Registration = args.into();
            let user = account::register(ctx, &form).await?;
            format!("Welcome, {}! You are now logged in.", user.display_name())
        }
        Command::Logout => {
            account::logout(ctx);
            "Logged out.".to_string()
        }
        Command::Whoami => match account::whoami(ctx) {
            Some(user) => render::user(&user),
            None => "Not logged in.".to_string(),
        },
        Command::Profile(ProfileCommand::Show) => render::user(&account::profile(ctx).await?),
        Command::Profile(ProfileCommand::Update(args)) => {
            let update: ProfileUpdate = args.into();
            render::user(&account::update_profile(ctx, &update).await?)
        }
    };

    Ok(output)
}
