//! Admin-only handlers, mounted behind the admin key check.

pub mod bans;
pub mod clients;
