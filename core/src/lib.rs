pub mod analytics;
pub mod catalog;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use analytics::sides::SidePolicy;
pub use analytics::{compute, compute_now, Analytics, AnalyticsOptions, CategoryStats, Totals};
pub use config::{Config, Settings};
pub use error::EntryError;
pub use input::{apply_fields, build_draft, expand_key, parse_args, ParsedInput};
pub use model::category::Category;
pub use model::entry::{EntryDraft, TrainingEntry};
pub use model::label::{Side, TechniqueLabel};
pub use repository::{EntryRepository, FileEntryRepository};
pub use service::{AnalyticsService, EntryService};
pub use time::{parse_entry_date, parse_hours};
