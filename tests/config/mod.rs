//! Configuration tests
//!
//! - Reloading from files and resetting in place
//! - Change notifications
//! - Schema drift handling

mod tests_configuration;
