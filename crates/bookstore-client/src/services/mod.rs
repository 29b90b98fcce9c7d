//! Typed wrappers, one per backend service.
//!
//! Paths mirror the services' routes, trailing slash included.

pub mod books;
pub mod orders;
pub mod payments;
pub mod reviews;
pub mod users;

pub use books::BooksService;
pub use orders::OrdersService;
pub use payments::PaymentsService;
pub use reviews::ReviewsService;
pub use users::UsersService;
