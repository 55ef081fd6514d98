pub mod analyze;
pub mod build_dataset;
pub mod search;
pub mod serve;

pub use analyze::analyze;
pub use build_dataset::build_dataset;
pub use search::search;
pub use serve::serve;
