//! Request handlers for quote, category and import/export operations.

mod quotes;
mod transfer;

pub use quotes::*;
pub use transfer::*;
