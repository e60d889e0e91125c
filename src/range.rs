//! Crawl window selection.
//!
//! The feed is walked from newest to oldest and stops at the first article
//! released outside the window. The window comes from either a look-back of
//! whole "months" (30 days each) or, in update mode, from the day after the
//! newest article already saved locally.

use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::diagnostics::Diagnostic;
use crate::error::{Error, Result};

/// Length of one look-back "month".
const DAYS_PER_MONTH: u64 = 30;

/// Inclusive release-time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// Earliest release time accepted.
    pub start: NaiveDateTime,
    /// Latest release time accepted.
    pub end: NaiveDateTime,
}

impl TimeRange {
    /// Whether `at` falls inside the window (both ends inclusive).
    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }

    /// Computes the crawl window.
    ///
    /// * No local data: `months` must be positive; the window is the last
    ///   `30 * months` days. `update` has no effect.
    /// * Local data and `update`: from the day after `latest_local` to `now`;
    ///   `months` has no effect.
    /// * Local data without `update`: as the first case, warning when the
    ///   window overlaps (and will overwrite) local data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] when a look-back is required and
    /// `months` is zero, or when the window start cannot be represented.
    pub fn compute(
        months: u32,
        update: bool,
        latest_local: Option<NaiveDate>,
        now: NaiveDateTime,
    ) -> Result<(Self, Vec<Diagnostic>)> {
        let mut diagnostics = Vec::new();

        match latest_local {
            None => {
                diagnostics.push(Diagnostic::info("no local articles, crawling by months"));
                if update {
                    diagnostics.push(Diagnostic::warning("update has no effect without local articles"));
                }
                Ok((Self::look_back(months, now)?, diagnostics))
            }
            Some(latest) if update => {
                diagnostics.push(Diagnostic::info("local articles found, crawling new articles only"));
                if months > 0 {
                    diagnostics.push(Diagnostic::warning("months has no effect in update mode"));
                }
                let start = latest
                    .checked_add_days(Days::new(1))
                    .ok_or_else(|| Error::InvalidRange(format!("no day after {latest}")))?
                    .and_hms_opt(0, 0, 0)
                    .ok_or_else(|| Error::InvalidRange(format!("no midnight after {latest}")))?;
                Ok((Self { start, end: now }, diagnostics))
            }
            Some(latest) => {
                let range = Self::look_back(months, now)?;
                if latest >= range.start.date() {
                    diagnostics.push(Diagnostic::warning(format!(
                        "local articles from {} to {latest} will be overwritten",
                        range.start.date()
                    )));
                }
                Ok((range, diagnostics))
            }
        }
    }

    fn look_back(months: u32, now: NaiveDateTime) -> Result<Self> {
        if months == 0 {
            return Err(Error::InvalidRange(format!("months={months} is not valid")));
        }
        let start = now
            .checked_sub_days(Days::new(DAYS_PER_MONTH * u64::from(months)))
            .ok_or_else(|| Error::InvalidRange(format!("months={months} reaches before the calendar")))?;
        Ok(Self { start, end: now })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, 0, 0))
            .expect("valid date")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_fresh_crawl_by_months() {
        let now = at(2024, 3, 31, 12);
        let (range, diagnostics) = TimeRange::compute(1, false, None, now).expect("valid");
        assert_eq!(range.start, at(2024, 3, 1, 12));
        assert_eq!(range.end, now);
        assert!(diagnostics.iter().all(|d| d.level != crate::diagnostics::Level::Warning));
    }

    #[test]
    fn test_fresh_crawl_requires_months() {
        let err = TimeRange::compute(0, false, None, at(2024, 3, 31, 12)).unwrap_err();
        assert!(matches!(err, Error::InvalidRange(_)));
        // update does not help without local data
        assert!(TimeRange::compute(0, true, None, at(2024, 3, 31, 12)).is_err());
    }

    #[test]
    fn test_update_starts_day_after_latest() {
        let now = at(2024, 3, 31, 12);
        let (range, diagnostics) =
            TimeRange::compute(2, true, Some(date(2024, 3, 20)), now).expect("valid");
        assert_eq!(range.start, at(2024, 3, 21, 0));
        assert_eq!(range.end, now);
        assert!(diagnostics.iter().any(|d| d.message.contains("months has no effect")));
    }

    #[test]
    fn test_update_ignores_zero_months() {
        let now = at(2024, 3, 31, 12);
        assert!(TimeRange::compute(0, true, Some(date(2024, 3, 20)), now).is_ok());
    }

    #[test]
    fn test_overlap_with_local_data_warns() {
        let now = at(2024, 3, 31, 12);
        let (_, diagnostics) =
            TimeRange::compute(1, false, Some(date(2024, 3, 20)), now).expect("valid");
        assert!(diagnostics.iter().any(|d| d.message.contains("overwritten")));

        let (_, diagnostics) =
            TimeRange::compute(1, false, Some(date(2024, 1, 1)), now).expect("valid");
        assert!(!diagnostics.iter().any(|d| d.message.contains("overwritten")));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = TimeRange {
            start: at(2024, 3, 1, 0),
            end: at(2024, 3, 2, 0),
        };
        assert!(range.contains(at(2024, 3, 1, 0)));
        assert!(range.contains(at(2024, 3, 2, 0)));
        assert!(!range.contains(at(2024, 2, 29, 23)));
        assert!(!range.contains(at(2024, 3, 2, 1)));
    }
}
