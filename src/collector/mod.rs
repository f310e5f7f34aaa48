pub mod scrape;
pub mod table_walker;
pub mod target;
pub mod types;

pub use scrape::ScrapeOrchestrator;
pub use table_walker::TableWalker;
pub use target::TargetCollector;
pub use types::{SensorRecord, SensorTable, assign_by_position};
