//! Path resolution over generated route tables.

pub mod table;

pub use table::RouteTable;
