// ISA Finance - Dashboard Computation Core
// Pure derivation layer for the personal-finance dashboard: progress and
// urgency classification, report aggregation, session lifecycle, and the
// chat conversation state machine. Rendering, routing, and the hosted data
// source live outside this crate.

pub mod chat;
pub mod engine;
pub mod entities;
pub mod error;
pub mod mock;
pub mod reports;
pub mod session;

// Re-export commonly used types
pub use chat::{ChatConversation, ChatMessage, ChatState, PanelState, Sender};
pub use engine::{
    aggregate_totals, classify, days_remaining, filter_by_bucket, progress_ratio,
    progress_ratio_uncapped, relative_date_label, urgency_tier, usage_ratio, usage_tier, Bucket,
    RelativeDateLabel, UrgencyTier, UsageTier, DUE_SOON_WINDOW_DAYS, USAGE_HIGH_THRESHOLD,
    USAGE_MEDIUM_THRESHOLD,
};
pub use entities::{
    parse_date, CreditFacility, Goal, ItemStatus, MonetaryRecord, RecordKind, Reminder, TimeBound,
};
pub use error::{ChatError, EngineError, EngineResult};
pub use reports::{
    cashflow_report, credit_overview, expense_by_category, goal_overview, monthly_summaries,
    overachievement, reminder_overview, CashflowReport, CreditOverview, GoalOverview,
    MonthlySummary, ReminderOverview,
};
pub use session::{
    JsonFileSessionStore, MemorySessionStore, SessionManager, SessionStore, UserSession,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
