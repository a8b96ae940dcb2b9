pub mod analytics_service;
pub mod entry_service;

pub use analytics_service::AnalyticsService;
pub use entry_service::EntryService;
