//! Nozbe destination client for tasklift imports

mod client;

pub use client::{NozbeClient, DEFAULT_NOZBE_API_URL};
