// 💳 Dashboard Entities
// Plain records supplied by the external data source (hosted table / fixtures).
//
// Entities are immutable from the engine's point of view: the engine reads
// them and derives display facts, it never mutates them. Status transitions
// (active → completed) belong to the data source. Sign conventions:
// - MonetaryRecord.amount is always >= 0; direction lives in `kind`
// - CreditFacility.used may exceed `limit` (over-limit is reportable, not an error)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

// ============================================================================
// STATUS & KIND ENUMS
// ============================================================================

/// Lifecycle status shared by reminders and goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Still open, counts toward urgency classification
    Active,
    /// Done; always classified as completed regardless of dates
    Completed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Completed => "completed",
        }
    }
}

/// Direction of a monetary record. The amount itself stays non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expense",
        }
    }
}

// ============================================================================
// MONETARY RECORD
// ============================================================================

/// A single income or expense entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonetaryRecord {
    /// Stable identity (UUID)
    pub id: String,

    /// Free-text description (e.g., "Supermercado Extra")
    pub description: String,

    /// Absolute amount. Invariant: `amount >= 0`
    pub amount: f64,

    /// Calendar date the movement occurred
    pub occurred_on: NaiveDate,

    /// Category label (e.g., "Alimentação", "Transporte")
    pub category: String,

    /// Income or expense
    pub kind: RecordKind,
}

impl MonetaryRecord {
    pub fn new(
        description: &str,
        amount: f64,
        occurred_on: NaiveDate,
        category: &str,
        kind: RecordKind,
    ) -> Self {
        MonetaryRecord {
            id: Uuid::new_v4().to_string(),
            description: description.to_string(),
            amount,
            occurred_on,
            category: category.to_string(),
            kind,
        }
    }

    /// Check the amount invariant.
    pub fn validate(&self) -> EngineResult<()> {
        if self.amount < 0.0 {
            return Err(EngineError::InvalidRange {
                field: "amount",
                message: format!("must be >= 0, got {}", self.amount),
            });
        }
        Ok(())
    }
}

// ============================================================================
// CREDIT FACILITY
// ============================================================================

/// A credit line with a limit and a used amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditFacility {
    /// Stable identity (UUID)
    pub id: String,

    /// Display name (e.g., "Nubank", "Itaú Platinum")
    pub name: String,

    /// Credit limit. Usage ratios require `limit > 0`
    pub limit: f64,

    /// Amount currently used. Invariant: `used >= 0`.
    /// May exceed `limit`; over-limit is a valid, reportable state.
    pub used: f64,
}

impl CreditFacility {
    pub fn new(name: &str, limit: f64, used: f64) -> Self {
        CreditFacility {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            limit,
            used,
        }
    }

    /// Remaining credit. Negative when over limit.
    pub fn available(&self) -> f64 {
        self.limit - self.used
    }

    /// Check the used-amount invariant.
    pub fn validate(&self) -> EngineResult<()> {
        if self.used < 0.0 {
            return Err(EngineError::InvalidRange {
                field: "used",
                message: format!("must be >= 0, got {}", self.used),
            });
        }
        Ok(())
    }
}

// ============================================================================
// GOAL
// ============================================================================

/// A savings goal with a monetary target and a deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Stable identity (UUID)
    pub id: String,

    /// Display title (e.g., "Reserva de Emergência")
    pub title: String,

    /// Target amount. Invariant: `target_amount > 0`
    pub target_amount: f64,

    /// Amount saved so far. May exceed the target (overachieved)
    pub current_amount: f64,

    /// Deadline for reaching the target
    pub target_date: NaiveDate,

    /// Active or completed
    pub status: ItemStatus,
}

impl Goal {
    pub fn new(
        title: &str,
        target_amount: f64,
        current_amount: f64,
        target_date: NaiveDate,
        status: ItemStatus,
    ) -> Self {
        Goal {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            target_amount,
            current_amount,
            target_date,
            status,
        }
    }

    /// Check the target invariant.
    pub fn validate(&self) -> EngineResult<()> {
        if self.target_amount <= 0.0 {
            return Err(EngineError::InvalidRange {
                field: "target_amount",
                message: format!("must be > 0, got {}", self.target_amount),
            });
        }
        if self.current_amount < 0.0 {
            return Err(EngineError::InvalidRange {
                field: "current_amount",
                message: format!("must be >= 0, got {}", self.current_amount),
            });
        }
        Ok(())
    }
}

// ============================================================================
// REMINDER
// ============================================================================

/// A dated to-do item (pay a bill, renew insurance, file taxes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    /// Stable identity (UUID)
    pub id: String,

    /// Display title (e.g., "Pagar cartão Nubank")
    pub title: String,

    /// Due date
    pub due_date: NaiveDate,

    /// Active or completed
    pub status: ItemStatus,
}

impl Reminder {
    pub fn new(title: &str, due_date: NaiveDate, status: ItemStatus) -> Self {
        Reminder {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            due_date,
            status,
        }
    }
}

// ============================================================================
// TIME-BOUND TRAIT
// ============================================================================

/// Anything with a due date and an active/completed status.
///
/// Reminders and goals share urgency classification and bucket filtering;
/// this trait is the seam that lets the engine treat them uniformly.
pub trait TimeBound {
    fn due_date(&self) -> NaiveDate;
    fn status(&self) -> ItemStatus;
}

impl TimeBound for Reminder {
    fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    fn status(&self) -> ItemStatus {
        self.status
    }
}

impl TimeBound for Goal {
    fn due_date(&self) -> NaiveDate {
        self.target_date
    }

    fn status(&self) -> ItemStatus {
        self.status
    }
}

// ============================================================================
// DATE PARSING
// ============================================================================

/// Parse an ISO `YYYY-MM-DD` date as supplied by the data source.
/// Malformed input is an `InvalidRange`: degenerate, not transient.
pub fn parse_date(input: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|e| EngineError::InvalidRange {
        field: "date",
        message: format!("'{}' is not a valid YYYY-MM-DD date: {}", input, e),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_record_validate_rejects_negative_amount() {
        let record = MonetaryRecord::new(
            "Estorno mal cadastrado",
            -50.0,
            date(2024, 12, 10),
            "Outros",
            RecordKind::Expense,
        );
        let err = record.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange { field: "amount", .. }));
    }

    #[test]
    fn test_record_validate_accepts_zero_amount() {
        let record = MonetaryRecord::new(
            "Ajuste",
            0.0,
            date(2024, 12, 10),
            "Outros",
            RecordKind::Income,
        );
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_facility_available_can_go_negative() {
        let over = CreditFacility::new("Nubank", 3000.0, 3450.0);
        assert!(over.validate().is_ok());
        assert_eq!(over.available(), -450.0);
    }

    #[test]
    fn test_goal_validate_rejects_zero_target() {
        let goal = Goal::new("Meta vazia", 0.0, 0.0, date(2025, 6, 30), ItemStatus::Active);
        let err = goal.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange { field: "target_amount", .. }));
    }

    #[test]
    fn test_time_bound_uniform_access() {
        let reminder = Reminder::new("Pagar IPVA", date(2024, 12, 15), ItemStatus::Completed);
        let goal = Goal::new("Carro novo", 25000.0, 12300.0, date(2025, 12, 31), ItemStatus::Active);

        assert_eq!(reminder.due_date(), date(2024, 12, 15));
        assert_eq!(reminder.status(), ItemStatus::Completed);
        assert_eq!(goal.due_date(), date(2025, 12, 31));
        assert_eq!(goal.status(), ItemStatus::Active);
    }

    #[test]
    fn test_parse_date_valid_and_malformed() {
        assert_eq!(parse_date("2024-12-20").unwrap(), date(2024, 12, 20));

        let err = parse_date("20/12/2024").unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange { field: "date", .. }));
    }

    #[test]
    fn test_status_serde_roundtrip() {
        let json = serde_json::to_string(&ItemStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");
        let back: ItemStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ItemStatus::Active);
    }
}
