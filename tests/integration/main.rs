//! HTTP integration tests over in-memory backends.

mod admin_test;
mod auth_test;
mod helpers;
