pub mod catalog;
pub mod config;
pub mod devotion;
pub mod research;
pub mod scripture;
pub mod session;
pub mod topic;

// Re-export main types for convenience
pub use catalog::{validate_catalogs, CatalogError};
pub use config::Config;
pub use devotion::{Devotion, DEVOTIONS};
pub use research::{ResearchEngine, ResearchMatch, ResearchRecord, ResearchResult, SUGGESTED_TOPICS};
pub use scripture::Verse;
pub use session::{ResearchState, SavedVerses, SearchHistory, Session, HISTORY_LIMIT};
pub use topic::Topic;
