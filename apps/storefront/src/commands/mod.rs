//! # Storefront Commands
//!
//! One module per view. Each command takes the [`AppContext`] and returns
//! typed data; printing is left to [`crate::render`].
//!
//! ```text
//! ┌──────────────┬──────────────────────────────┬───────────────────────────┐
//! │ Module       │ Commands                     │ Touches                   │
//! ├──────────────┼──────────────────────────────┼───────────────────────────┤
//! │ books        │ list, categories, detail     │ books, reviews services   │
//! │ cart         │ show, add, remove, update,   │ CartStore (+ books svc    │
//! │              │ clear                        │ for add)                  │
//! │ checkout     │ place_order                  │ orders, payments, cart    │
//! │ orders       │ my_orders                    │ orders service            │
//! │ reviews      │ submit, my_reviews           │ reviews service           │
//! │ account      │ login, register, logout,     │ users service, session    │
//! │              │ whoami, profile, update      │                           │
//! └──────────────┴──────────────────────────────┴───────────────────────────┘
//! ```
//!
//! [`AppContext`]: crate::context::AppContext

pub mod account;
pub mod books;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod reviews;
