//! Application layer
//!
//! Use cases behind the invoice form actions. Each use case validates its
//! input, drives the domain service, refreshes the page cache and reports an
//! explicit outcome for the HTTP layer to act on.

pub mod invoice;
