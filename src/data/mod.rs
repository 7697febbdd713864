//! Data layer: launch records, the CSV loader, and the in-memory table.

mod loader;
mod models;
mod table;

pub use loader::load_csv;
pub use models::Outcome;
pub use table::LaunchTable;
#[cfg(test)]
pub(crate) use models::LaunchRecord;
#[cfg(test)]
pub(crate) use table::tests::sample_table;
