//! End-to-end tests of the view, client and export against a mock backend.

mod export_test;
mod helpers;
mod listing_test;
mod race_test;
mod summary_test;
