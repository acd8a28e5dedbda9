// 📊 Progress & Urgency Engine
// Pure computation layer: raw records + a caller-supplied "now" in,
// derived display facts out (ratios, tiers, day counts, filter buckets).
//
// Rules of the module:
// - No clock reads. `now` is always an argument, so tests are deterministic
//   and a batch of related computations can share one consistent instant.
// - No mutation, no I/O, no retained state. Identical inputs give identical
//   outputs, so calls are safe from any number of threads.
// - Degenerate inputs (zero limits, zero targets) fail with a typed error;
//   callers decide the fallback display.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

use crate::entities::{CreditFacility, Goal, ItemStatus, MonetaryRecord, TimeBound};
use crate::error::{EngineError, EngineResult};

// ============================================================================
// TIER BOUNDARIES
// ============================================================================

/// Usage below this fraction of the limit is low.
pub const USAGE_MEDIUM_THRESHOLD: f64 = 0.30;

/// Usage at or above this fraction of the limit is high.
pub const USAGE_HIGH_THRESHOLD: f64 = 0.70;

/// Items due within this many days (inclusive) are due-soon.
pub const DUE_SOON_WINDOW_DAYS: i64 = 3;

// ============================================================================
// USAGE RATIO & TIER
// ============================================================================

/// Credit usage classification for badge/color selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageTier {
    Low,
    Medium,
    High,
}

impl UsageTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageTier::Low => "low",
            UsageTier::Medium => "medium",
            UsageTier::High => "high",
        }
    }
}

/// Fraction of the limit currently used: `used / limit`, in `[0, +inf)`.
/// Over-limit facilities return a ratio above 1.0.
///
/// A zero (or negative) limit is a degenerate facility and fails with
/// `DivisionByZero` rather than producing a silent infinity.
pub fn usage_ratio(facility: &CreditFacility) -> EngineResult<f64> {
    if facility.limit <= 0.0 {
        return Err(EngineError::DivisionByZero {
            what: "credit facility limit",
        });
    }
    Ok(facility.used / facility.limit)
}

/// Classify a usage ratio. Boundaries are inclusive on the lower bound:
/// exactly 0.30 is Medium, exactly 0.70 is High.
pub fn usage_tier(ratio: f64) -> UsageTier {
    if ratio < USAGE_MEDIUM_THRESHOLD {
        UsageTier::Low
    } else if ratio < USAGE_HIGH_THRESHOLD {
        UsageTier::Medium
    } else {
        UsageTier::High
    }
}

// ============================================================================
// GOAL PROGRESS
// ============================================================================

/// Goal completion as a fraction capped at 1.0.
///
/// The cap keeps progress bars honest when `current_amount` overshoots the
/// target; use `progress_ratio_uncapped` to detect overachievement.
pub fn progress_ratio(goal: &Goal) -> EngineResult<f64> {
    progress_ratio_uncapped(goal).map(|r| r.min(1.0))
}

/// Goal completion without the 1.0 cap. Values above 1.0 mean the goal
/// was overachieved.
pub fn progress_ratio_uncapped(goal: &Goal) -> EngineResult<f64> {
    if goal.target_amount <= 0.0 {
        return Err(EngineError::DivisionByZero {
            what: "goal target amount",
        });
    }
    Ok(goal.current_amount / goal.target_amount)
}

// ============================================================================
// DAYS REMAINING
// ============================================================================

/// Whole calendar days from `now` until `target`. Negative means overdue,
/// zero means due today.
///
/// `now` is truncated to its UTC calendar day before subtracting, so the
/// result never drifts with the time of day: an item due later today is
/// 0 days out regardless of the hour.
pub fn days_remaining(target: NaiveDate, now: DateTime<Utc>) -> i64 {
    (target - now.date_naive()).num_days()
}

// ============================================================================
// URGENCY TIER
// ============================================================================

/// Display-priority classification for a time-bound item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    /// Item is done; dates no longer matter
    Completed,
    /// Active and past due
    Overdue,
    /// Active, due today through 3 days out (inclusive)
    DueSoon,
    /// Active with comfortable lead time
    Normal,
}

impl UrgencyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyTier::Completed => "completed",
            UrgencyTier::Overdue => "overdue",
            UrgencyTier::DueSoon => "due_soon",
            UrgencyTier::Normal => "normal",
        }
    }
}

/// Classify urgency from a day count and a status. Completed always wins.
/// Tie-breaks: exactly 0 and exactly 3 days remaining are DueSoon.
pub fn urgency_tier(days_remaining: i64, status: ItemStatus) -> UrgencyTier {
    if status == ItemStatus::Completed {
        return UrgencyTier::Completed;
    }
    if days_remaining < 0 {
        UrgencyTier::Overdue
    } else if days_remaining <= DUE_SOON_WINDOW_DAYS {
        UrgencyTier::DueSoon
    } else {
        UrgencyTier::Normal
    }
}

/// Urgency of any time-bound item at a given instant.
pub fn classify<T: TimeBound>(item: &T, now: DateTime<Utc>) -> UrgencyTier {
    urgency_tier(days_remaining(item.due_date(), now), item.status())
}

// ============================================================================
// RELATIVE DATE LABEL
// ============================================================================

/// Human-oriented label for a date relative to now. The caller renders the
/// actual text (locale, language); the engine only classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeDateLabel {
    /// Due on the current calendar day
    Today,
    /// Due on the next calendar day
    Tomorrow,
    /// Due in 2..=6 days
    InDays(i64),
    /// Past due by `n` days
    DaysAgo(i64),
    /// A week or more out: show the plain calendar date
    DateStamp(NaiveDate),
}

/// Classify `target` relative to `now`:
/// 0 days → Today, 1 → Tomorrow, 2..=6 → InDays, negative → DaysAgo,
/// 7 or more → DateStamp.
pub fn relative_date_label(target: NaiveDate, now: DateTime<Utc>) -> RelativeDateLabel {
    let diff = days_remaining(target, now);
    if diff < 0 {
        RelativeDateLabel::DaysAgo(-diff)
    } else if diff == 0 {
        RelativeDateLabel::Today
    } else if diff == 1 {
        RelativeDateLabel::Tomorrow
    } else if diff < 7 {
        RelativeDateLabel::InDays(diff)
    } else {
        RelativeDateLabel::DateStamp(target)
    }
}

// ============================================================================
// FILTER BUCKETS
// ============================================================================

/// Named filter predicate used to partition a list for UI tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    All,
    Active,
    Completed,
    /// Active AND past due
    Overdue,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::All => "all",
            Bucket::Active => "active",
            Bucket::Completed => "completed",
            Bucket::Overdue => "overdue",
        }
    }
}

/// Pure filter over time-bound items. Input order is preserved.
/// Overdue requires both `status == Active` and a negative day count.
pub fn filter_by_bucket<T: TimeBound>(items: &[T], bucket: Bucket, now: DateTime<Utc>) -> Vec<&T> {
    items
        .iter()
        .filter(|item| match bucket {
            Bucket::All => true,
            Bucket::Active => item.status() == ItemStatus::Active,
            Bucket::Completed => item.status() == ItemStatus::Completed,
            Bucket::Overdue => {
                item.status() == ItemStatus::Active && days_remaining(item.due_date(), now) < 0
            }
        })
        .collect()
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Group monetary records by a caller-supplied key and sum their amounts.
///
/// Key order follows first appearance in the input, so a chronologically
/// sorted input yields chronologically ordered month buckets.
pub fn aggregate_totals<K, F>(records: &[MonetaryRecord], key_fn: F) -> Vec<(K, f64)>
where
    K: Eq + Hash + Clone,
    F: Fn(&MonetaryRecord) -> K,
{
    let mut totals: Vec<(K, f64)> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for record in records {
        let key = key_fn(record);
        match index.get(&key) {
            Some(&pos) => totals[pos].1 += record.amount,
            None => {
                index.insert(key.clone(), totals.len());
                totals.push((key, record.amount));
            }
        }
    }

    totals
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Reminder, RecordKind};
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Mid-afternoon instant: day math must not drift with time of day
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 15, 14, 30, 0).unwrap()
    }

    fn record(amount: f64, category: &str) -> MonetaryRecord {
        MonetaryRecord::new("", amount, date(2024, 12, 1), category, RecordKind::Expense)
    }

    #[test]
    fn test_usage_ratio_exact() {
        let facility = CreditFacility::new("Nubank", 5000.0, 1250.0);
        assert_eq!(usage_ratio(&facility).unwrap(), 0.25);
        assert_eq!(usage_tier(0.25), UsageTier::Low);
    }

    #[test]
    fn test_usage_ratio_over_limit() {
        let facility = CreditFacility::new("Itaú", 2000.0, 3000.0);
        assert_eq!(usage_ratio(&facility).unwrap(), 1.5);
        assert_eq!(usage_tier(1.5), UsageTier::High);
    }

    #[test]
    fn test_usage_ratio_zero_limit_fails() {
        let facility = CreditFacility::new("Sem limite", 0.0, 100.0);
        let err = usage_ratio(&facility).unwrap_err();
        assert_eq!(
            err,
            EngineError::DivisionByZero {
                what: "credit facility limit"
            }
        );
    }

    #[test]
    fn test_usage_tier_boundaries() {
        assert_eq!(usage_tier(0.2999), UsageTier::Low);
        assert_eq!(usage_tier(0.30), UsageTier::Medium);
        assert_eq!(usage_tier(0.6999), UsageTier::Medium);
        assert_eq!(usage_tier(0.70), UsageTier::High);
    }

    #[test]
    fn test_progress_ratio_capped_at_one() {
        let goal = Goal::new("MBA", 8000.0, 9500.0, date(2024, 12, 1), ItemStatus::Active);
        assert_eq!(progress_ratio(&goal).unwrap(), 1.0);
        assert_eq!(progress_ratio_uncapped(&goal).unwrap(), 9500.0 / 8000.0);
    }

    #[test]
    fn test_progress_ratio_partial() {
        let goal = Goal::new(
            "Reserva",
            30000.0,
            18500.0,
            date(2025, 6, 30),
            ItemStatus::Active,
        );
        assert_eq!(progress_ratio(&goal).unwrap(), 18500.0 / 30000.0);
    }

    #[test]
    fn test_progress_ratio_zero_target_fails() {
        let goal = Goal::new("Vazia", 0.0, 100.0, date(2025, 1, 1), ItemStatus::Active);
        assert_eq!(
            progress_ratio(&goal).unwrap_err(),
            EngineError::DivisionByZero {
                what: "goal target amount"
            }
        );
    }

    #[test]
    fn test_days_remaining_same_day_is_zero() {
        // 14:30 on the 15th vs the 15th: still "today", not "yesterday"
        assert_eq!(days_remaining(date(2024, 12, 15), now()), 0);
    }

    #[test]
    fn test_days_remaining_future_and_past() {
        assert_eq!(days_remaining(date(2024, 12, 20), now()), 5);
        assert_eq!(days_remaining(date(2024, 12, 10), now()), -5);
    }

    #[test]
    fn test_urgency_tier_tie_breaks() {
        assert_eq!(urgency_tier(0, ItemStatus::Active), UrgencyTier::DueSoon);
        assert_eq!(urgency_tier(3, ItemStatus::Active), UrgencyTier::DueSoon);
        assert_eq!(urgency_tier(4, ItemStatus::Active), UrgencyTier::Normal);
        assert_eq!(urgency_tier(-1, ItemStatus::Active), UrgencyTier::Overdue);
    }

    #[test]
    fn test_completed_wins_regardless_of_days() {
        assert_eq!(
            urgency_tier(-30, ItemStatus::Completed),
            UrgencyTier::Completed
        );
        assert_eq!(
            urgency_tier(30, ItemStatus::Completed),
            UrgencyTier::Completed
        );
    }

    #[test]
    fn test_reminder_due_in_three_days() {
        let reminder = Reminder::new("Pagar cartão", date(2024, 12, 18), ItemStatus::Active);
        assert_eq!(classify(&reminder, now()), UrgencyTier::DueSoon);
        assert_eq!(
            relative_date_label(reminder.due_date, now()),
            RelativeDateLabel::InDays(3)
        );
    }

    #[test]
    fn test_reminder_five_days_overdue() {
        let reminder = Reminder::new("Renovar seguro", date(2024, 12, 10), ItemStatus::Active);
        assert_eq!(classify(&reminder, now()), UrgencyTier::Overdue);
        assert_eq!(
            relative_date_label(reminder.due_date, now()),
            RelativeDateLabel::DaysAgo(5)
        );
    }

    #[test]
    fn test_relative_date_label_near_dates() {
        assert_eq!(
            relative_date_label(date(2024, 12, 15), now()),
            RelativeDateLabel::Today
        );
        assert_eq!(
            relative_date_label(date(2024, 12, 16), now()),
            RelativeDateLabel::Tomorrow
        );
        assert_eq!(
            relative_date_label(date(2024, 12, 21), now()),
            RelativeDateLabel::InDays(6)
        );
    }

    #[test]
    fn test_relative_date_label_week_or_more_is_date_stamp() {
        assert_eq!(
            relative_date_label(date(2024, 12, 22), now()),
            RelativeDateLabel::DateStamp(date(2024, 12, 22))
        );
    }

    #[test]
    fn test_filter_by_bucket_overdue() {
        let reminders = vec![
            Reminder::new("Atrasado", date(2024, 12, 10), ItemStatus::Active),
            Reminder::new("Pago com atraso", date(2024, 12, 10), ItemStatus::Completed),
            Reminder::new("Futuro", date(2024, 12, 28), ItemStatus::Active),
        ];

        let overdue = filter_by_bucket(&reminders, Bucket::Overdue, now());
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].title, "Atrasado");

        // Completed items never show as overdue even when past due
        let none: Vec<&Reminder> =
            filter_by_bucket(&reminders[1..2], Bucket::Overdue, now());
        assert!(none.is_empty());
    }

    #[test]
    fn test_filter_by_bucket_preserves_order() {
        let reminders = vec![
            Reminder::new("Primeiro", date(2024, 12, 20), ItemStatus::Active),
            Reminder::new("Segundo", date(2024, 12, 16), ItemStatus::Active),
            Reminder::new("Feito", date(2024, 12, 12), ItemStatus::Completed),
        ];

        let all = filter_by_bucket(&reminders, Bucket::All, now());
        assert_eq!(all.len(), 3);

        let active = filter_by_bucket(&reminders, Bucket::Active, now());
        let titles: Vec<&str> = active.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Primeiro", "Segundo"]);

        let completed = filter_by_bucket(&reminders, Bucket::Completed, now());
        assert_eq!(completed.len(), 1);
    }

    #[test]
    fn test_aggregate_totals_by_category() {
        let records = vec![record(100.0, "A"), record(50.0, "A"), record(30.0, "B")];

        let totals = aggregate_totals(&records, |r| r.category.clone());
        assert_eq!(totals, vec![("A".to_string(), 150.0), ("B".to_string(), 30.0)]);
    }

    #[test]
    fn test_aggregate_totals_first_seen_order() {
        let records = vec![
            record(10.0, "Transporte"),
            record(20.0, "Alimentação"),
            record(5.0, "Transporte"),
        ];

        let totals = aggregate_totals(&records, |r| r.category.clone());
        assert_eq!(totals[0].0, "Transporte");
        assert_eq!(totals[0].1, 15.0);
        assert_eq!(totals[1].0, "Alimentação");
    }

    #[test]
    fn test_aggregate_totals_empty_input() {
        let totals = aggregate_totals(&[], |r| r.category.clone());
        assert!(totals.is_empty());
    }
}
