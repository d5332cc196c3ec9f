//! Terminal output helpers.

mod delivery;
mod tables;

pub use delivery::{describe_event, format_delivery};
pub use tables::{format_timestamp, marker, print_separator, truncate_string};
