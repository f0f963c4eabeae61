//! Authentication and the admin access gate.
//!
//! Tokens are issued elsewhere; this feature only validates them
//! ([`TokenValidator`]), turns them into a [`model::Principal`] and gates admin routes
//! ([`guards::admin_gate`]).

mod token;

pub mod directory;
pub mod guards;
pub mod model;

pub use directory::{AdminDirectory, PgAdminDirectory};
pub use token::TokenValidator;
