//! # Services Layer
//!
//! Business logic between the HTTP handlers and the repositories.
//!
//! ```text
//! Handlers (HTTP) → Services (Business Logic) → Repositories (SQL)
//! ```
//!
//! - [`account`] - registration and login for admins and users
//! - [`merchant`] - merchant registration and listing
//! - [`product`] - product registration and listing, scoped to a merchant
//!
//! Services hold their dependencies (pool, config, clock, ID generator) and
//! are cheap to clone. All methods return `Result<T, AppError>`.

pub mod account;
pub mod merchant;
pub mod product;

pub use account::AccountService;
pub use merchant::MerchantService;
pub use product::ProductService;
