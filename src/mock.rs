// 🗂️ Sample Dataset
// Fixture data matching what the hosted table will eventually serve: the
// demo CLI and doc examples run against these records with a fixed "now"
// so output is deterministic.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::entities::{CreditFacility, Goal, ItemStatus, MonetaryRecord, RecordKind, Reminder};
use crate::session::UserSession;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // Fixture dates are hardcoded valid calendar days
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// The fixed instant the sample dashboard is rendered at.
pub fn sample_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 15, 12, 0, 0)
        .single()
        .expect("valid fixture instant")
}

/// Upcoming and past reminders.
pub fn sample_reminders() -> Vec<Reminder> {
    vec![
        Reminder::new("Pagar cartão Nubank", date(2024, 12, 20), ItemStatus::Active),
        Reminder::new("Revisar investimentos", date(2024, 12, 22), ItemStatus::Active),
        Reminder::new("Renovar seguro do carro", date(2024, 12, 28), ItemStatus::Active),
        Reminder::new("Declarar Imposto de Renda", date(2024, 12, 30), ItemStatus::Active),
        Reminder::new("Pagar IPVA", date(2024, 12, 15), ItemStatus::Completed),
        Reminder::new("Pagar conta de luz", date(2024, 12, 12), ItemStatus::Active),
    ]
}

/// Savings goals in several stages of progress.
pub fn sample_goals() -> Vec<Goal> {
    vec![
        Goal::new("Reserva de Emergência", 30000.0, 18500.0, date(2025, 6, 30), ItemStatus::Active),
        Goal::new("Viagem para Europa", 15000.0, 8200.0, date(2025, 7, 1), ItemStatus::Active),
        Goal::new("Carro Novo", 25000.0, 12300.0, date(2025, 12, 31), ItemStatus::Active),
        Goal::new("Curso de Especialização", 8000.0, 8000.0, date(2024, 12, 1), ItemStatus::Completed),
        Goal::new("Investimento Imobiliário", 50000.0, 23800.0, date(2026, 3, 31), ItemStatus::Active),
    ]
}

/// Credit cards, including one close to its limit.
pub fn sample_facilities() -> Vec<CreditFacility> {
    vec![
        CreditFacility::new("Nubank", 5000.0, 1250.0),
        CreditFacility::new("Itaú Platinum", 8000.0, 3200.0),
        CreditFacility::new("Santander Free", 3000.0, 2650.0),
    ]
}

/// Two months of income and expense movements, chronologically ordered.
pub fn sample_records() -> Vec<MonetaryRecord> {
    vec![
        MonetaryRecord::new("Salário", 5400.0, date(2024, 11, 1), "Salário", RecordKind::Income),
        MonetaryRecord::new("Aluguel", 1800.0, date(2024, 11, 5), "Moradia", RecordKind::Expense),
        MonetaryRecord::new("Supermercado Extra", 620.0, date(2024, 11, 9), "Alimentação", RecordKind::Expense),
        MonetaryRecord::new("Uber", 180.0, date(2024, 11, 14), "Transporte", RecordKind::Expense),
        MonetaryRecord::new("Freelance", 900.0, date(2024, 11, 20), "Extras", RecordKind::Income),
        MonetaryRecord::new("Cinema", 85.0, date(2024, 11, 23), "Lazer", RecordKind::Expense),
        MonetaryRecord::new("Salário", 5800.0, date(2024, 12, 1), "Salário", RecordKind::Income),
        MonetaryRecord::new("Aluguel", 1800.0, date(2024, 12, 5), "Moradia", RecordKind::Expense),
        MonetaryRecord::new("Farmácia", 140.0, date(2024, 12, 7), "Saúde", RecordKind::Expense),
        MonetaryRecord::new("Supermercado Extra", 710.0, date(2024, 12, 10), "Alimentação", RecordKind::Expense),
    ]
}

/// The signed-in demo user.
pub fn sample_user() -> UserSession {
    UserSession {
        id: "demo-user".to_string(),
        registration: "2024001".to_string(),
        name: "Maria Silva".to_string(),
        email: Some("maria@example.com".to_string()),
        phone: "+55 11 91234-5678".to_string(),
        balance: 12580.45,
        plan_type: "premium".to_string(),
        subscription_status: "active".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_satisfy_invariants() {
        for record in sample_records() {
            record.validate().unwrap();
        }
        for goal in sample_goals() {
            goal.validate().unwrap();
        }
        for facility in sample_facilities() {
            facility.validate().unwrap();
        }
    }

    #[test]
    fn test_fixture_has_an_overdue_reminder() {
        let now = sample_now();
        let overdue: Vec<_> = sample_reminders()
            .into_iter()
            .filter(|r| r.status == ItemStatus::Active && r.due_date < now.date_naive())
            .collect();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].title, "Pagar conta de luz");
    }
}
