//! monday.com source client
//!
//! Reads boards, groups, items and updates through the monday.com GraphQL API
//! and hands them to the import pipeline as source records.

mod client;
mod descriptor;

pub use client::{MondayClient, DEFAULT_MONDAY_API_URL};
pub use descriptor::{ImporterInfo, MONDAY_IMPORTER};
