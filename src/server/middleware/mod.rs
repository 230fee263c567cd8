//! Request-level authentication helpers

mod principal;

pub use principal::CurrentUser;
