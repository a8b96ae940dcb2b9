use std::cell::RefCell;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::analytics::{compute, Analytics, AnalyticsOptions};
use crate::repository::EntryRepository;

struct CachedAnalytics {
    fingerprint: u64,
    today: NaiveDate,
    options: AnalyticsOptions,
    analytics: Analytics,
}

/// Runs the analytics engine over the stored entries, reusing the last result
/// while the store fingerprint, date and options are unchanged.
pub struct AnalyticsService<R: EntryRepository> {
    repo: R,
    options: AnalyticsOptions,
    cache: RefCell<Option<CachedAnalytics>>,
}

impl<R: EntryRepository> AnalyticsService<R> {
    pub fn new(repo: R, options: AnalyticsOptions) -> Self {
        Self {
            repo,
            options,
            cache: RefCell::new(None),
        }
    }

    pub fn options(&self) -> &AnalyticsOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: AnalyticsOptions) {
        self.options = options;
    }

    pub fn analytics(&self) -> Result<Analytics> {
        self.analytics_on(Local::now().date_naive())
    }

    pub fn analytics_on(&self, today: NaiveDate) -> Result<Analytics> {
        let snapshot = self.repo.snapshot()?;

        if let Some(cached) = self.cache.borrow().as_ref() {
            if cached.fingerprint == snapshot.fingerprint
                && cached.today == today
                && cached.options == self.options
            {
                debug!("Analytics cache hit");
                return Ok(cached.analytics.clone());
            }
        }

        let analytics = compute(&snapshot.entries, today, &self.options);
        debug!(sessions = snapshot.entries.len(), "Recomputed analytics");
        *self.cache.borrow_mut() = Some(CachedAnalytics {
            fingerprint: snapshot.fingerprint,
            today,
            options: self.options.clone(),
            analytics: analytics.clone(),
        });
        Ok(analytics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::sides::SidePolicy;
    use crate::model::entry::TrainingEntry;
    use crate::model::label::TechniqueLabel;
    use crate::repository::Snapshot;
    use std::cell::Cell;

    /// Reports a fingerprint that only moves when told to, so a stale result
    /// shows that the cache answered.
    struct PinnedRepo {
        entries: RefCell<Vec<TrainingEntry>>,
        fingerprint: Cell<u64>,
    }

    impl PinnedRepo {
        fn new(entries: Vec<TrainingEntry>) -> Self {
            Self {
                entries: RefCell::new(entries),
                fingerprint: Cell::new(1),
            }
        }
    }

    impl EntryRepository for &PinnedRepo {
        fn create(&self, entry: TrainingEntry) -> Result<TrainingEntry> {
            self.entries.borrow_mut().insert(0, entry.clone());
            Ok(entry)
        }
        fn get(&self, _id: &str) -> Result<TrainingEntry> {
            unimplemented!()
        }
        fn list(&self) -> Result<Vec<TrainingEntry>> {
            Ok(self.entries.borrow().clone())
        }
        fn update(&self, _entry: &TrainingEntry) -> Result<()> {
            unimplemented!()
        }
        fn delete(&self, _id: &str) -> Result<()> {
            unimplemented!()
        }
        fn snapshot(&self) -> Result<Snapshot> {
            Ok(Snapshot {
                entries: self.list()?,
                fingerprint: self.fingerprint.get(),
            })
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session(date: NaiveDate, label: &str) -> TrainingEntry {
        let mut e = TrainingEntry::new(date, "1");
        e.submissions_got.push(TechniqueLabel::parse(label));
        e
    }

    #[test]
    fn test_unchanged_fingerprint_reuses_result() {
        let repo = PinnedRepo::new(vec![session(ymd(2024, 1, 1), "Armbar")]);
        let service = AnalyticsService::new(&repo, AnalyticsOptions::default());
        let today = ymd(2024, 1, 2);

        let first = service.analytics_on(today).unwrap();
        assert_eq!(first.totals.submissions_got, 1);

        // Same fingerprint: the stored result comes back even though the data moved
        (&repo).create(session(ymd(2024, 1, 2), "Kimura (R)")).unwrap();
        let cached = service.analytics_on(today).unwrap();
        assert_eq!(cached, first);

        repo.fingerprint.set(2);
        let fresh = service.analytics_on(today).unwrap();
        assert_eq!(fresh.totals.submissions_got, 2);
    }

    #[test]
    fn test_new_day_invalidates_cache() {
        let repo = PinnedRepo::new(vec![session(ymd(2024, 1, 1), "Armbar")]);
        let service = AnalyticsService::new(&repo, AnalyticsOptions::default());

        let first = service.analytics_on(ymd(2024, 1, 2)).unwrap();
        assert_eq!(first.recent.len(), 1);

        (&repo).create(session(ymd(2024, 1, 3), "Kimura (R)")).unwrap();
        let next_day = service.analytics_on(ymd(2024, 1, 3)).unwrap();
        assert_eq!(next_day.totals.submissions_got, 2);
        assert_eq!(next_day.recent.len(), 2);
    }

    #[test]
    fn test_options_change_the_result() {
        let repo = PinnedRepo::new(vec![session(ymd(2024, 1, 1), "Armbar")]);
        let mut service = AnalyticsService::new(&repo, AnalyticsOptions::default());
        let today = ymd(2024, 1, 2);

        let compat = service.analytics_on(today).unwrap();
        let armbar = compat.submissions_got.sides.as_ref().unwrap().technique("Armbar").unwrap();
        assert_eq!(armbar.left, 1);

        service.set_options(AnalyticsOptions {
            side_policy: SidePolicy::Strict,
            ..AnalyticsOptions::default()
        });
        let strict = service.analytics_on(today).unwrap();
        let armbar = strict.submissions_got.sides.as_ref().unwrap().technique("Armbar").unwrap();
        assert_eq!((armbar.left, armbar.unmarked), (0, 1));
    }
}
