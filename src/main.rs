// Dashboard snapshot CLI: renders the sample dataset the way the web client
// would, exercising the full derivation layer (urgency, progress, usage,
// reports) against one fixed instant.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use isa_finance::{
    cashflow_report, classify, credit_overview, expense_by_category, filter_by_bucket,
    goal_overview, mock, monthly_summaries, progress_ratio, relative_date_label,
    reminder_overview, usage_ratio, usage_tier, Bucket, RelativeDateLabel, SessionManager,
    MemorySessionStore, UrgencyTier, UsageTier,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let now = mock::sample_now();

    // Session lifecycle: init at startup, login, clear at exit
    let mut session = SessionManager::init(Box::new(MemorySessionStore::new()))?;
    let user = mock::sample_user();
    session.login(user.clone())?;

    println!("💰 ISA Finance — painel de {}", user.name);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Saldo: R$ {:.2}  |  Plano: {}\n", user.balance, user.plan_type);

    print_reminders(now)?;
    print_goals()?;
    print_cards()?;
    print_reports()?;

    session.logout()?;
    Ok(())
}

fn print_reminders(now: chrono::DateTime<chrono::Utc>) -> Result<()> {
    let reminders = mock::sample_reminders();
    let overview = reminder_overview(&reminders, now);

    println!("🔔 Lembretes ({} ativos, {} em atraso, {} concluídos)",
        overview.active, overview.overdue, overview.completed);

    for reminder in filter_by_bucket(&reminders, Bucket::All, now) {
        let tier = classify(reminder, now);
        let when = match relative_date_label(reminder.due_date, now) {
            RelativeDateLabel::Today => "hoje".to_string(),
            RelativeDateLabel::Tomorrow => "amanhã".to_string(),
            RelativeDateLabel::InDays(n) => format!("em {} dias", n),
            RelativeDateLabel::DaysAgo(n) => format!("{} dias em atraso", n),
            RelativeDateLabel::DateStamp(d) => d.format("%d/%m/%Y").to_string(),
        };
        println!("  {} {} — {}", tier_icon(tier), reminder.title, when);
    }
    println!();
    Ok(())
}

fn tier_icon(tier: UrgencyTier) -> &'static str {
    match tier {
        UrgencyTier::Completed => "✅",
        UrgencyTier::Overdue => "🔴",
        UrgencyTier::DueSoon => "🟡",
        UrgencyTier::Normal => "🔵",
    }
}

fn print_goals() -> Result<()> {
    let goals = mock::sample_goals();
    let overview = goal_overview(&goals);

    println!("🎯 Metas ({} ativas, {} concluídas, progresso geral {:.1}%)",
        overview.active_count,
        overview.completed_count,
        overview.overall_progress()? * 100.0);

    for goal in &goals {
        let progress = progress_ratio(goal)?;
        println!(
            "  {} — {:.1}% (R$ {:.2} de R$ {:.2})",
            goal.title,
            progress * 100.0,
            goal.current_amount,
            goal.target_amount
        );
    }
    println!();
    Ok(())
}

fn print_cards() -> Result<()> {
    let facilities = mock::sample_facilities();
    let overview = credit_overview(&facilities);

    println!("💳 Cartões (limite total R$ {:.2}, disponível R$ {:.2})",
        overview.total_limit, overview.total_available);

    for facility in &facilities {
        let ratio = usage_ratio(facility)?;
        let tier = usage_tier(ratio);
        let icon = match tier {
            UsageTier::Low => "🟢",
            UsageTier::Medium => "🟡",
            UsageTier::High => "🔴",
        };
        println!(
            "  {} {} — {:.1}% usado (R$ {:.2} disponível)",
            icon,
            facility.name,
            ratio * 100.0,
            facility.available()
        );
    }
    println!();
    Ok(())
}

fn print_reports() -> Result<()> {
    let records = mock::sample_records();
    let cashflow = cashflow_report(&records);

    println!("📈 Relatório");
    println!(
        "  Receitas R$ {:.2}  |  Despesas R$ {:.2}  |  Saldo R$ {:.2} ({:.1}% das receitas)",
        cashflow.total_income,
        cashflow.total_expense,
        cashflow.net_balance,
        cashflow.savings_rate()? * 100.0
    );

    for summary in monthly_summaries(&records) {
        println!(
            "  {:04}-{:02}: receitas R$ {:.2}, despesas R$ {:.2}, saldo R$ {:.2}",
            summary.year, summary.month, summary.income, summary.expense, summary.net
        );
    }

    println!("  Despesas por categoria:");
    for (category, total) in expense_by_category(&records) {
        println!("    {} — R$ {:.2}", category, total);
    }

    Ok(())
}
