//! Terminal output
//!
//! disk-mgr only prints plain columnar text; there is no interactive UI.

pub mod table;

pub use table::{device_table, Table};
