#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::error::Error;
use crate::models::{Budget, Profile, SavingsGoal, Transaction, TransactionSummary, TransactionType};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn make_budget(amount: Decimal, spent: Decimal) -> Budget {
    let mut budget = Budget::new(
        "Food",
        amount,
        crate::models::DateRange::month(2024, 1).unwrap(),
    );
    budget.spent = Some(spent);
    budget
}

fn make_goal(target: Decimal, current: Decimal) -> SavingsGoal {
    let mut goal = SavingsGoal::new("Vacation", target);
    goal.current_amount = current;
    goal
}

fn txn(kind: TransactionType, amount: Decimal) -> Transaction {
    Transaction::new(kind, amount, "Food", date("2024-01-15"))
}

// ── percent_of ────────────────────────────────────────────────

#[test]
fn test_percent_of_zero_whole_is_zero() {
    assert_eq!(percent_of(dec!(500), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(percent_of(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
}

#[test]
fn test_percent_of_basic() {
    assert_eq!(percent_of(dec!(850), dec!(1000)), dec!(85));
    assert_eq!(percent_of(dec!(1500), dec!(1000)), dec!(150));
}

// ── format_amount / format_percent ────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56), "₹"), "₹1,234.56");
    assert_eq!(format_amount(dec!(999.99), "$"), "$999.99");
}

#[test]
fn test_format_amount_zero_and_negative() {
    assert_eq!(format_amount(dec!(0), "₹"), "₹0.00");
    assert_eq!(format_amount(dec!(-5000), "₹"), "-₹5,000.00");
}

#[test]
fn test_format_amount_large() {
    assert_eq!(format_amount(dec!(1234567.89), "$"), "$1,234,567.89");
}

#[test]
fn test_format_amount_rounds_half_up() {
    assert_eq!(format_amount(dec!(1.005), "$"), "$1.01");
    assert_eq!(format_amount(dec!(1.5), "$"), "$1.50");
}

#[test]
fn test_format_percent_one_decimal() {
    assert_eq!(format_percent(dec!(85)), "85.0");
    assert_eq!(format_percent(dec!(94.96)), "95.0");
    assert_eq!(format_percent(dec!(33.333333)), "33.3");
}

// ── Balance ───────────────────────────────────────────────────

#[test]
fn test_balance_formula() {
    let summary = TransactionSummary::new(dec!(2000), dec!(15000), dec!(5000));
    assert_eq!(balance(dec!(40000), &summary).unwrap(), dec!(22000));
}

#[test]
fn test_balance_all_zero() {
    assert_eq!(
        balance(Decimal::ZERO, &TransactionSummary::default()).unwrap(),
        Decimal::ZERO
    );
}

#[test]
fn test_balance_formula_grid() {
    let values = [dec!(0), dec!(1), dec!(250.5), dec!(10000)];
    for &target in &values {
        for &income in &values {
            for &expenses in &values {
                for &savings in &values {
                    let summary = TransactionSummary::new(income, expenses, savings);
                    assert_eq!(
                        balance(target, &summary).unwrap(),
                        (target + income) - (expenses + savings)
                    );
                }
            }
        }
    }
}

#[test]
fn test_balance_overflow_is_an_error() {
    let summary = TransactionSummary::new(Decimal::MAX, Decimal::ZERO, Decimal::ZERO);
    assert_eq!(balance(Decimal::MAX, &summary), Err(Error::Overflow));

    let profile = Profile {
        target_expenses: Decimal::MAX,
        ..Default::default()
    };
    assert_eq!(Overview::compute(Some(&profile), &summary), Err(Error::Overflow));
}

#[test]
fn test_preview_saturates_far_negative_projection() {
    let result = preview_submission(Decimal::MIN, txn(TransactionType::Expense, dec!(10)));
    let Submission::NeedsConfirmation(pending) = result else {
        panic!("expected confirmation");
    };
    assert_eq!(pending.new_balance(), Decimal::MIN);
}

#[test]
fn test_overview_fields() {
    let profile = Profile::new(dec!(50000), dec!(10000));
    let summary = TransactionSummary::new(dec!(2000), dec!(15000), dec!(5000));
    let overview = Overview::compute(Some(&profile), &summary).unwrap();

    assert_eq!(overview.target_expenses, dec!(40000));
    assert_eq!(overview.total_income, dec!(42000));
    assert_eq!(overview.total_outflow, dec!(20000));
    assert_eq!(overview.balance, dec!(22000));
    assert!(!overview.is_negative());
    assert!(overview.expense_warning.is_none());
}

#[test]
fn test_overview_without_profile() {
    let summary = TransactionSummary::new(dec!(100), dec!(300), Decimal::ZERO);
    let overview = Overview::compute(None, &summary).unwrap();
    assert_eq!(overview.target_expenses, Decimal::ZERO);
    assert_eq!(overview.balance, dec!(-200));
    assert!(overview.is_negative());
    assert!(overview.expense_warning.is_none());
}

#[test]
fn test_overview_ignores_backend_available_balance() {
    let mut summary = TransactionSummary::new(dec!(100), dec!(50), dec!(25));
    summary.available_balance = Some(dec!(999999));
    let overview = Overview::compute(Some(&Profile::new(dec!(1000), dec!(0))), &summary).unwrap();
    assert_eq!(overview.balance, dec!(1025));
}

#[test]
fn test_overview_percent_of_zero_income() {
    let overview =
        Overview::compute(Some(&Profile::default()), &TransactionSummary::default()).unwrap();
    assert_eq!(overview.percent_of_income(dec!(500)), Decimal::ZERO);
}

#[test]
fn test_scenario_expense_pushes_balance_negative() {
    let profile = Profile::new(dec!(50000), dec!(10000));
    assert_eq!(profile.target_expenses, dec!(40000));

    let overview = Overview::compute(Some(&profile), &TransactionSummary::default()).unwrap();
    match overview.preview(txn(TransactionType::Expense, dec!(45000))) {
        Submission::NeedsConfirmation(pending) => {
            assert_eq!(pending.current_balance(), dec!(40000));
            assert_eq!(pending.new_balance(), dec!(-5000));
        }
        Submission::Ready(_) => panic!("expected confirmation"),
    }
}

// ── Negative-balance confirmation ─────────────────────────────

#[test]
fn test_preview_income_never_needs_confirmation() {
    for amount in [dec!(1), dec!(1000000)] {
        let result = preview_submission(dec!(-500), txn(TransactionType::Income, amount));
        assert!(matches!(result, Submission::Ready(_)));
    }
}

#[test]
fn test_preview_withdrawal_never_needs_confirmation() {
    let result = preview_submission(dec!(-500), txn(TransactionType::Savings, dec!(-200)));
    assert!(matches!(result, Submission::Ready(_)));
}

#[test]
fn test_preview_contribution_below_zero_needs_confirmation() {
    let result = preview_submission(dec!(100), txn(TransactionType::Savings, dec!(150)));
    assert!(matches!(result, Submission::NeedsConfirmation(_)));
}

#[test]
fn test_preview_exactly_zero_is_ready() {
    let result = preview_submission(dec!(100), txn(TransactionType::Expense, dec!(100)));
    assert!(matches!(result, Submission::Ready(_)));
}

#[test]
fn test_preview_iff_projection_negative() {
    let balances = [dec!(-10), dec!(0), dec!(50), dec!(100)];
    let amounts = [dec!(0.01), dec!(50), dec!(100), dec!(150)];
    for &current in &balances {
        for &amount in &amounts {
            let result = preview_submission(current, txn(TransactionType::Expense, amount));
            let needs = matches!(result, Submission::NeedsConfirmation(_));
            assert_eq!(needs, current - amount < Decimal::ZERO, "{current} - {amount}");
        }
    }
}

#[test]
fn test_pending_confirm_returns_same_transaction() {
    let original = txn(TransactionType::Expense, dec!(200)).with_description("Rent top-up");
    let Submission::NeedsConfirmation(pending) = preview_submission(dec!(100), original.clone())
    else {
        panic!("expected confirmation");
    };
    assert_eq!(pending.transaction(), &original);
    assert_eq!(pending.confirm(), original);
}

// ── BudgetTier ────────────────────────────────────────────────

#[test]
fn test_tier_thresholds() {
    assert_eq!(BudgetTier::from_percentage(dec!(0)), BudgetTier::OnTrack);
    assert_eq!(BudgetTier::from_percentage(dec!(79.99)), BudgetTier::OnTrack);
    assert_eq!(BudgetTier::from_percentage(dec!(80)), BudgetTier::Caution);
    assert_eq!(BudgetTier::from_percentage(dec!(89.99)), BudgetTier::Caution);
    assert_eq!(BudgetTier::from_percentage(dec!(90)), BudgetTier::Warning);
    assert_eq!(BudgetTier::from_percentage(dec!(99.99)), BudgetTier::Warning);
    assert_eq!(BudgetTier::from_percentage(dec!(100)), BudgetTier::Exceeded);
    assert_eq!(BudgetTier::from_percentage(dec!(250)), BudgetTier::Exceeded);
}

#[test]
fn test_tier_presentation() {
    assert_eq!(BudgetTier::Exceeded.label(), "EXCEEDED");
    assert_eq!(BudgetTier::Exceeded.color(), "#ff3b30");
    assert_eq!(BudgetTier::Exceeded.emoji(), "🚨");
    assert_eq!(BudgetTier::Warning.color(), "#ff9500");
    assert_eq!(BudgetTier::Caution.color(), "#ffc107");
    assert_eq!(BudgetTier::OnTrack.emoji(), "✅");
    assert_eq!(format!("{}", BudgetTier::OnTrack), "ON TRACK");
}

#[test]
fn test_tier_monotonic_in_spent() {
    let mut previous = BudgetTier::OnTrack;
    let mut spent = Decimal::ZERO;
    while spent <= dec!(1500) {
        let tier = TrackedBudget::from_budget(&make_budget(dec!(1000), spent)).tier;
        assert!(tier >= previous, "tier dropped at spent={spent}");
        previous = tier;
        spent += dec!(5);
    }
    assert_eq!(previous, BudgetTier::Exceeded);
}

// ── TrackedBudget ─────────────────────────────────────────────

#[test]
fn test_tracked_budget_caution_scenario() {
    let tracked = TrackedBudget::from_budget(&make_budget(dec!(1000), dec!(850)));
    assert_eq!(tracked.percentage_used, dec!(85.0));
    assert_eq!(tracked.tier, BudgetTier::Caution);
    assert_eq!(tracked.remaining, dec!(150));
    assert!(!tracked.is_over());
}

#[test]
fn test_tracked_budget_zero_amount() {
    let tracked = TrackedBudget::from_budget(&make_budget(Decimal::ZERO, dec!(50)));
    assert_eq!(tracked.percentage_used, Decimal::ZERO);
    assert_eq!(tracked.tier, BudgetTier::OnTrack);
}

#[test]
fn test_tracked_budget_missing_spent() {
    let mut budget = make_budget(dec!(1000), Decimal::ZERO);
    budget.spent = None;
    let tracked = TrackedBudget::from_budget(&budget);
    assert_eq!(tracked.spent, Decimal::ZERO);
    assert_eq!(tracked.remaining, dec!(1000));
}

#[test]
fn test_tracked_budget_prefers_server_remaining() {
    let mut budget = make_budget(dec!(1000), dec!(200));
    budget.remaining = Some(dec!(750));
    assert_eq!(TrackedBudget::from_budget(&budget).remaining, dec!(750));
}

#[test]
fn test_budget_totals() {
    let tracked = track(&[
        make_budget(dec!(1000), dec!(850)),
        make_budget(dec!(500), dec!(600)),
    ]);
    let totals = BudgetTotals::of(&tracked);
    assert_eq!(totals.planned, dec!(1500));
    assert_eq!(totals.spent, dec!(1450));
    assert_eq!(totals.remaining, dec!(50));
    assert!(tracked[1].is_over());
}

#[test]
fn test_progress_width_clamped() {
    assert_eq!(progress_width(dec!(150)), dec!(100));
    assert_eq!(progress_width(dec!(42.5)), dec!(42.5));
    assert_eq!(progress_width(dec!(-3)), Decimal::ZERO);
}

// ── Budget alerts ─────────────────────────────────────────────

#[test]
fn test_budget_alerts_threshold_and_status() {
    let mut budgets = vec![
        make_budget(dec!(1000), dec!(799)),
        make_budget(dec!(1000), dec!(800)),
        make_budget(dec!(1000), dec!(950)),
        make_budget(dec!(1000), dec!(1000)),
        make_budget(Decimal::ZERO, dec!(10)),
    ];
    for (i, b) in budgets.iter_mut().enumerate() {
        b.id = Some(i as i64 + 1);
    }

    let badge = budget_alerts(&budgets);
    assert_eq!(badge.count(), 3);
    let ids: Vec<_> = badge.alerts.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![Some(2), Some(3), Some(4)]);
    assert_eq!(badge.alerts[0].status, AlertStatus::Warning);
    assert_eq!(badge.alerts[1].status, AlertStatus::Warning);
    assert_eq!(badge.alerts[2].status, AlertStatus::Exceeded);
    assert_eq!(badge.alerts[2].percentage_used, dec!(100));
}

#[test]
fn test_budget_alerts_empty() {
    assert!(budget_alerts(&[]).is_empty());
}

// ── Target-expense banner ─────────────────────────────────────

#[test]
fn test_expense_warning_guards() {
    assert!(target_expense_warning(dec!(500), Decimal::ZERO).is_none());
    assert!(target_expense_warning(Decimal::ZERO, dec!(1000)).is_none());
    assert!(target_expense_warning(dec!(799), dec!(1000)).is_none());
}

#[test]
fn test_expense_warning_danger() {
    let warning = target_expense_warning(dec!(1200), dec!(1000)).unwrap();
    assert_eq!(warning.severity, Severity::Exceeded);
    assert_eq!(warning.severity.banner_level(), "danger");
    assert_eq!(warning.cited_amount(), dec!(200));
    assert_eq!(
        warning.message("₹"),
        "Alert! You've exceeded your target expenses by ₹200.00"
    );
}

#[test]
fn test_expense_warning_at_exactly_target() {
    let warning = target_expense_warning(dec!(1000), dec!(1000)).unwrap();
    assert_eq!(warning.severity, Severity::Exceeded);
    assert_eq!(warning.cited_amount(), Decimal::ZERO);
}

#[test]
fn test_expense_warning_warning_level() {
    let warning = target_expense_warning(dec!(950), dec!(1000)).unwrap();
    assert_eq!(warning.severity.banner_level(), "warning");
    assert_eq!(
        warning.message("₹"),
        "Warning! You've used 95.0% of your target expenses. Only ₹50.00 remaining."
    );
}

#[test]
fn test_expense_warning_caution_level() {
    let warning = target_expense_warning(dec!(850), dec!(1000)).unwrap();
    assert_eq!(warning.severity.banner_level(), "caution");
    assert_eq!(
        warning.message("$"),
        "Heads up! You've used 85.0% of your target expenses. $150.00 remaining."
    );
}

// ── Savings goals ─────────────────────────────────────────────

#[test]
fn test_goal_complete_scenario() {
    let progress = GoalProgress::of(&make_goal(dec!(5000), dec!(5000)));
    assert_eq!(progress.progress_percent, dec!(100));
    assert!(progress.is_complete);
    assert_eq!(progress.remaining, Decimal::ZERO);
}

#[test]
fn test_goal_zero_target() {
    let progress = GoalProgress::of(&make_goal(Decimal::ZERO, dec!(300)));
    assert_eq!(progress.progress_percent, Decimal::ZERO);
    assert!(!progress.is_complete);
}

#[test]
fn test_goal_partial_and_overshoot() {
    let partial = GoalProgress::of(&make_goal(dec!(5000), dec!(1250)));
    assert_eq!(partial.progress_percent, dec!(25));
    assert!(!partial.is_complete);
    assert_eq!(partial.remaining, dec!(3750));

    let over = GoalProgress::of(&make_goal(dec!(5000), dec!(6000)));
    assert!(over.is_complete);
    assert_eq!(over.remaining, dec!(-1000));
}

#[test]
fn test_goal_just_below_complete() {
    let progress = GoalProgress::of(&make_goal(dec!(5000), dec!(4999.99)));
    assert!(progress.progress_percent < dec!(100));
    assert!(!progress.is_complete);
}

#[test]
fn test_goal_prefers_server_remaining() {
    let mut goal = make_goal(dec!(5000), dec!(1000));
    goal.remaining_amount = Some(dec!(3900));
    assert_eq!(GoalProgress::of(&goal).remaining, dec!(3900));
}

#[test]
fn test_goal_totals() {
    let totals = GoalTotals::of(&[
        make_goal(dec!(5000), dec!(2500)),
        make_goal(dec!(3000), dec!(3500)),
    ])
    .unwrap();
    assert_eq!(totals.total_target, dec!(8000));
    assert_eq!(totals.total_saved, dec!(6000));
    assert_eq!(totals.total_remaining, dec!(2000));
    assert_eq!(totals.overall_progress, dec!(75));
}

#[test]
fn test_goal_totals_empty() {
    let totals = GoalTotals::of(&[]).unwrap();
    assert_eq!(totals.overall_progress, Decimal::ZERO);
}

#[test]
fn test_goal_totals_overflow_is_an_error() {
    let goals = [make_goal(Decimal::MAX, dec!(0)), make_goal(Decimal::MAX, dec!(0))];
    assert_eq!(GoalTotals::of(&goals), Err(Error::Overflow));
}

#[test]
fn test_find_goal_is_exact_match() {
    let goals = vec![make_goal(dec!(100), dec!(0))];
    assert!(find_goal(&goals, "Vacation").is_some());
    assert!(find_goal(&goals, "vacation").is_none());
    assert!(find_goal(&goals, "Vacation ").is_none());
}
