// 📈 Report Aggregation
// Dashboard summaries built on top of the engine: cashflow totals, monthly
// breakdowns, category spend, credit overview, goal and reminder counters.
//
// Same purity rules as the engine: no clock reads, no mutation, no I/O.
// Callers hand in the records and one `now` instant per render batch.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::{
    aggregate_totals, filter_by_bucket, progress_ratio_uncapped, usage_ratio, Bucket,
};
use crate::entities::{CreditFacility, Goal, ItemStatus, MonetaryRecord, RecordKind, Reminder};
use crate::error::{EngineError, EngineResult};

// ============================================================================
// CASHFLOW
// ============================================================================

/// Income vs expense totals over a set of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowReport {
    /// Sum of all income amounts
    pub total_income: f64,

    /// Sum of all expense amounts
    pub total_expense: f64,

    /// Income minus expense. Negative when spending outpaces income
    pub net_balance: f64,
}

impl CashflowReport {
    /// Net balance as a fraction of income ("what share of income was kept").
    /// Zero income fails with `DivisionByZero` instead of yielding NaN.
    pub fn savings_rate(&self) -> EngineResult<f64> {
        if self.total_income <= 0.0 {
            return Err(EngineError::DivisionByZero {
                what: "total income",
            });
        }
        Ok(self.net_balance / self.total_income)
    }
}

/// Total income, expense, and net over all records.
pub fn cashflow_report(records: &[MonetaryRecord]) -> CashflowReport {
    let mut total_income = 0.0;
    let mut total_expense = 0.0;

    for record in records {
        match record.kind {
            RecordKind::Income => total_income += record.amount,
            RecordKind::Expense => total_expense += record.amount,
        }
    }

    CashflowReport {
        total_income,
        total_expense,
        net_balance: total_income - total_expense,
    }
}

// ============================================================================
// MONTHLY BREAKDOWN
// ============================================================================

/// One month's income/expense totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Year of the bucket
    pub year: i32,

    /// Month of the bucket (1-12)
    pub month: u32,

    /// Income total for the month
    pub income: f64,

    /// Expense total for the month
    pub expense: f64,

    /// Income minus expense
    pub net: f64,
}

/// Per-month totals in first-seen order: feed chronologically sorted records
/// and the buckets come out chronological.
pub fn monthly_summaries(records: &[MonetaryRecord]) -> Vec<MonthlySummary> {
    let income: Vec<MonetaryRecord> = records
        .iter()
        .filter(|r| r.kind == RecordKind::Income)
        .cloned()
        .collect();
    let expense: Vec<MonetaryRecord> = records
        .iter()
        .filter(|r| r.kind == RecordKind::Expense)
        .cloned()
        .collect();

    let month_key = |r: &MonetaryRecord| (r.occurred_on.year(), r.occurred_on.month());
    let income_totals = aggregate_totals(&income, month_key);
    let expense_totals = aggregate_totals(&expense, month_key);

    // Month ordering follows first appearance across the full record list
    let months = aggregate_totals(records, month_key);

    months
        .into_iter()
        .map(|((year, month), _)| {
            let lookup = |totals: &[((i32, u32), f64)]| {
                totals
                    .iter()
                    .find(|(k, _)| *k == (year, month))
                    .map(|(_, sum)| *sum)
                    .unwrap_or(0.0)
            };
            let income = lookup(&income_totals);
            let expense = lookup(&expense_totals);
            MonthlySummary {
                year,
                month,
                income,
                expense,
                net: income - expense,
            }
        })
        .collect()
}

/// Expense totals per category, first-seen order (donut chart data).
pub fn expense_by_category(records: &[MonetaryRecord]) -> Vec<(String, f64)> {
    let expenses: Vec<MonetaryRecord> = records
        .iter()
        .filter(|r| r.kind == RecordKind::Expense)
        .cloned()
        .collect();
    aggregate_totals(&expenses, |r| r.category.clone())
}

// ============================================================================
// CREDIT OVERVIEW
// ============================================================================

/// Summary row across all credit facilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditOverview {
    /// Sum of all limits
    pub total_limit: f64,

    /// Sum of all used amounts
    pub total_used: f64,

    /// Sum of `limit - used` per facility. Negative contributions from
    /// over-limit facilities are kept, not clamped
    pub total_available: f64,

    /// How many facilities are over their limit
    pub over_limit_count: usize,
}

/// Aggregate limits and usage across facilities.
pub fn credit_overview(facilities: &[CreditFacility]) -> CreditOverview {
    let mut overview = CreditOverview {
        total_limit: 0.0,
        total_used: 0.0,
        total_available: 0.0,
        over_limit_count: 0,
    };

    for facility in facilities {
        overview.total_limit += facility.limit;
        overview.total_used += facility.used;
        overview.total_available += facility.available();
        // usage_ratio fails on zero limits; over-limit detection only makes
        // sense for real facilities
        if let Ok(ratio) = usage_ratio(facility) {
            if ratio > 1.0 {
                overview.over_limit_count += 1;
            }
        }
    }

    overview
}

// ============================================================================
// GOAL OVERVIEW
// ============================================================================

/// Summary counters across all goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalOverview {
    /// Goals still being worked toward
    pub active_count: usize,

    /// Goals already reached
    pub completed_count: usize,

    /// Sum of current amounts across active goals
    pub total_saved: f64,

    /// Sum of target amounts across active goals
    pub total_target: f64,
}

impl GoalOverview {
    /// Combined progress across active goals: total saved over total target.
    /// Fails with `DivisionByZero` when there are no active targets.
    pub fn overall_progress(&self) -> EngineResult<f64> {
        if self.total_target <= 0.0 {
            return Err(EngineError::DivisionByZero {
                what: "combined goal target",
            });
        }
        Ok(self.total_saved / self.total_target)
    }
}

/// Count and sum goals by status.
pub fn goal_overview(goals: &[Goal]) -> GoalOverview {
    let mut overview = GoalOverview {
        active_count: 0,
        completed_count: 0,
        total_saved: 0.0,
        total_target: 0.0,
    };

    for goal in goals {
        match goal.status {
            ItemStatus::Active => {
                overview.active_count += 1;
                overview.total_saved += goal.current_amount;
                overview.total_target += goal.target_amount;
            }
            ItemStatus::Completed => overview.completed_count += 1,
        }
    }

    overview
}

/// How far past the target an overachieved goal went, as a fraction of the
/// target. None for goals at or below target.
pub fn overachievement(goal: &Goal) -> EngineResult<Option<f64>> {
    let ratio = progress_ratio_uncapped(goal)?;
    Ok(if ratio > 1.0 { Some(ratio - 1.0) } else { None })
}

// ============================================================================
// REMINDER OVERVIEW
// ============================================================================

/// Counts backing the reminder summary cards (Ativos / Em Atraso /
/// Concluídos / Total).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderOverview {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub overdue: usize,
}

/// Count reminders per bucket at one instant.
pub fn reminder_overview(reminders: &[Reminder], now: DateTime<Utc>) -> ReminderOverview {
    ReminderOverview {
        total: reminders.len(),
        active: filter_by_bucket(reminders, Bucket::Active, now).len(),
        completed: filter_by_bucket(reminders, Bucket::Completed, now).len(),
        overdue: filter_by_bucket(reminders, Bucket::Overdue, now).len(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
