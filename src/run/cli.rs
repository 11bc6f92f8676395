use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

use budgetwise::api::SnapshotApi;
use budgetwise::calc::{format_amount, format_percent, Submission};
use budgetwise::config::Config;
use budgetwise::forecast::{run_rate, trend_forecast};
use budgetwise::models::{DateRange, Profile, Transaction, TransactionType};
use budgetwise::reports::{
    available_months, export_csv, export_file_name, month_summary, period_comparison,
    spending_by_category, ExportPreset, Period,
};
use budgetwise::workspace::{SubmitOutcome, Workspace};

use super::{flag_value, has_flag, load_snapshot, positionals, save_snapshot, shellexpand};

/// Completed months the trend forecast is fitted over.
const TREND_MONTHS: u32 = 6;

pub(crate) fn as_cli(args: &[String], config: &Config) -> Result<()> {
    let command = args.get(1).map(String::as_str).unwrap_or("overview");
    let rest = args.get(2..).unwrap_or_default();
    match command {
        "overview" | "o" => cli_overview(rest, config),
        "budgets" | "b" => cli_budgets(rest, config),
        "alerts" => cli_alerts(rest, config),
        "goals" | "g" => cli_goals(rest, config),
        "check" => cli_add(rest, config, false),
        "add" => cli_add(rest, config, true),
        "report" | "r" => cli_report(rest, config),
        "forecast" => cli_forecast(rest, config),
        "export" => cli_export(rest, config),
        "target" => cli_target(rest, config),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budgetwise {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Budgetwise - balance, budgets and savings goals from a finance snapshot");
    println!();
    println!("Usage: budgetwise [command] [--snapshot <file.json>]");
    println!();
    println!("Commands:");
    println!("  overview                      Balance card and target-expense warning (default)");
    println!("  budgets                       Budgets with consumption tier and totals");
    println!("  alerts                        Budgets at or above 80% used");
    println!("  goals                         Savings goal progress");
    println!("  check <type> <amount> <cat>   Validate a transaction and preview the balance");
    println!("  add <type> <amount> <cat>     Record a transaction in the snapshot");
    println!("    --date <YYYY-MM-DD>         Transaction date (default: today)");
    println!("    --desc <text>               Description");
    println!("    --yes                       Accept a negative resulting balance");
    println!("  report                        Spending by category and period comparison");
    println!("    --month <YYYY-MM>           Restrict to one month");
    println!("    --yearly                    Compare years instead of months");
    println!("  forecast                      Next-month expense prediction");
    println!("  export [path]                 Export transactions to CSV");
    println!("    --preset <p>                last30 | this-month | last-month | all");
    println!("  target <income> <savings>     Show derived target expenses");
    println!("    --save                      Store them in the snapshot profile");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Types: income, expense, savings (negative savings withdraw from a goal)");
}

fn snapshot_path(args: &[String], config: &Config) -> Result<PathBuf> {
    let flag = flag_value(args, "--snapshot").map(|s| PathBuf::from(shellexpand(s)));
    Ok(config.resolve_snapshot_path(flag.as_deref())?)
}

fn open_workspace(path: &Path, config: &Config) -> Result<Workspace<SnapshotApi>> {
    let snapshot = load_snapshot(path)?;
    let mut ws = Workspace::new(SnapshotApi::new(snapshot)).with_currency(&config.currency_symbol);
    ws.refresh().context("Failed to load snapshot data")?;
    Ok(ws)
}

fn parse_amount(raw: &str) -> Result<Decimal> {
    raw.trim()
        .trim_start_matches('+')
        .replace(',', "")
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount: {raw}"))
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn cli_overview(args: &[String], config: &Config) -> Result<()> {
    let ws = open_workspace(&snapshot_path(args, config)?, config)?;
    let sym = &config.currency_symbol;
    let o = ws.overview()?;

    println!("Budgetwise - Overview");
    println!("{}", "─".repeat(40));
    println!("  Monthly Income:   {}", format_amount(o.monthly_income, sym));
    println!("  Target Expenses:  {}", format_amount(o.target_expenses, sym));
    println!("  Total Income:     {}", format_amount(o.total_income, sym));
    println!(
        "  Expenses:         {} ({}% of income)",
        format_amount(o.total_expenses, sym),
        format_percent(o.percent_of_income(o.total_expenses))
    );
    println!("  Savings:          {}", format_amount(o.total_savings, sym));
    println!("  Balance:          {}", format_amount(o.balance, sym));

    if let Some(warning) = &o.expense_warning {
        println!();
        println!(
            "[{}] {}",
            warning.severity.banner_level().to_uppercase(),
            warning.message(sym)
        );
    }
    Ok(())
}

fn cli_budgets(args: &[String], config: &Config) -> Result<()> {
    let ws = open_workspace(&snapshot_path(args, config)?, config)?;
    let sym = &config.currency_symbol;
    let tracked = ws.tracked_budgets();
    if tracked.is_empty() {
        println!("No budgets");
        return Ok(());
    }

    println!(
        "{:<18} {:>14} {:>14} {:>14} {:>7}  Status",
        "Category", "Planned", "Spent", "Remaining", "Used"
    );
    println!("{}", "─".repeat(84));
    for t in &tracked {
        println!(
            "{:<18} {:>14} {:>14} {:>14} {:>6}%  {} {}",
            t.budget.category,
            format_amount(t.budget.amount, sym),
            format_amount(t.spent, sym),
            format_amount(t.remaining, sym),
            format_percent(t.percentage_used),
            t.tier.emoji(),
            t.tier
        );
    }

    let totals = ws.budget_totals();
    println!("{}", "─".repeat(84));
    println!(
        "{:<18} {:>14} {:>14} {:>14} {:>6}%",
        "Total",
        format_amount(totals.planned, sym),
        format_amount(totals.spent, sym),
        format_amount(totals.remaining, sym),
        format_percent(totals.percentage_used())
    );
    Ok(())
}

fn cli_alerts(args: &[String], config: &Config) -> Result<()> {
    let ws = open_workspace(&snapshot_path(args, config)?, config)?;
    let sym = &config.currency_symbol;
    let badge = ws.alerts();
    if badge.is_empty() {
        println!("All budgets on track");
        return Ok(());
    }

    println!("{} budget alert(s)", badge.count());
    for alert in &badge.alerts {
        println!(
            "  {:<9} {:<18} {} of {} ({}%)",
            alert.status.as_str().to_uppercase(),
            alert.category,
            format_amount(alert.spent, sym),
            format_amount(alert.amount, sym),
            format_percent(alert.percentage_used)
        );
    }
    Ok(())
}

fn cli_goals(args: &[String], config: &Config) -> Result<()> {
    let ws = open_workspace(&snapshot_path(args, config)?, config)?;
    let sym = &config.currency_symbol;
    let goals = ws.goal_progress();
    if goals.is_empty() {
        println!("No savings goals");
        return Ok(());
    }

    for (goal, progress) in &goals {
        let deadline = goal
            .deadline
            .map(|d| d.to_string())
            .unwrap_or_else(|| "no deadline".into());
        let done = if progress.is_complete { "  ✅ complete" } else { "" };
        println!(
            "{} ({}, {deadline}){done}",
            goal.goal_name,
            goal.goal_type()
        );
        println!(
            "  {} of {}  {}%  remaining {}",
            format_amount(goal.current_amount, sym),
            format_amount(goal.target_amount, sym),
            format_percent(progress.progress_percent),
            format_amount(progress.remaining, sym)
        );
    }

    let totals = ws.goal_totals()?;
    println!("{}", "─".repeat(40));
    println!(
        "Saved {} of {} ({}%), {} to go",
        format_amount(totals.total_saved, sym),
        format_amount(totals.total_target, sym),
        format_percent(totals.overall_progress),
        format_amount(totals.total_remaining, sym)
    );
    Ok(())
}

fn parse_transaction(args: &[String]) -> Result<Transaction> {
    let usage = "Usage: budgetwise add|check <income|expense|savings> <amount> <category>";
    let pos = positionals(args);
    let [kind, amount, category, ..] = pos.as_slice() else {
        anyhow::bail!(usage);
    };
    let kind = TransactionType::parse(kind)
        .ok_or_else(|| anyhow::anyhow!("Unknown transaction type: {kind}\n{usage}"))?;
    let amount = parse_amount(amount)?;
    let date = match flag_value(args, "--date") {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid date: {raw}, expected YYYY-MM-DD"))?,
        None => today(),
    };

    let mut txn = Transaction::new(kind, amount, *category, date);
    if let Some(desc) = flag_value(args, "--desc") {
        txn = txn.with_description(desc);
    }
    Ok(txn)
}

fn cli_add(args: &[String], config: &Config, write: bool) -> Result<()> {
    let path = snapshot_path(args, config)?;
    let mut ws = open_workspace(&path, config)?;
    let sym = &config.currency_symbol;
    let txn = parse_transaction(args)?;
    let current = ws.overview()?.balance;

    if !write {
        return match ws.preview_transaction(txn)? {
            Submission::Ready(t) => {
                let after = if t.reduces_balance() {
                    current - t.amount
                } else {
                    current
                };
                println!(
                    "OK: balance {} -> {}",
                    format_amount(current, sym),
                    format_amount(after, sym)
                );
                Ok(())
            }
            Submission::NeedsConfirmation(p) => {
                println!(
                    "Warning: this will make your balance negative ({}). Current balance: {}",
                    format_amount(p.new_balance(), sym),
                    format_amount(p.current_balance(), sym)
                );
                Ok(())
            }
        };
    }

    let stored = match ws.submit_transaction(txn)? {
        SubmitOutcome::Submitted(t) => t,
        SubmitOutcome::NeedsConfirmation { new_balance, .. } if has_flag(args, "--yes") => {
            log::info!("Accepted negative balance {new_balance}");
            ws.confirm_pending()?
        }
        SubmitOutcome::NeedsConfirmation { new_balance, .. } => {
            ws.cancel_pending();
            anyhow::bail!(
                "This will make your balance negative ({}). Re-run with --yes to record it anyway.",
                format_amount(new_balance, sym)
            );
        }
    };

    save_snapshot(&path, ws.api().snapshot())?;
    println!(
        "Recorded {} {} in {} (id {})",
        stored.kind,
        format_amount(stored.amount, sym),
        stored.category,
        stored.id.unwrap_or_default()
    );
    println!("Balance: {}", format_amount(ws.overview()?.balance, sym));
    Ok(())
}

fn cli_report(args: &[String], config: &Config) -> Result<()> {
    let ws = open_workspace(&snapshot_path(args, config)?, config)?;
    let sym = &config.currency_symbol;
    let snapshot = ws.snapshot();
    let target = snapshot.target_expenses();
    let yearly = has_flag(args, "--yearly");

    let mut txns = snapshot.transactions.clone();
    if let Some(month) = flag_value(args, "--month").filter(|_| !yearly) {
        let range = DateRange::parse_month(month)?;
        txns.retain(|t| range.contains(t.date));

        let summary = month_summary(&snapshot.transactions, target, month)?;
        println!("Budgetwise - {}", summary.month);
        println!("{}", "─".repeat(40));
        println!("  Income:     {}", format_amount(summary.income, sym));
        println!("  Expenses:   {}", format_amount(summary.expenses, sym));
        println!("  Savings:    {}", format_amount(summary.savings, sym));
        println!();
    } else {
        let months = available_months(&snapshot.transactions);
        if !months.is_empty() {
            println!("Months with data: {}", months.join(", "));
            println!();
        }
    }

    let spending = spending_by_category(&txns);
    if !spending.is_empty() {
        println!("Spending by Category:");
        for row in &spending {
            println!(
                "  {:<24} {:>14} {:>6}%",
                row.category,
                format_amount(row.amount, sym),
                format_percent(row.percentage)
            );
        }
        println!();
    }

    let period = if yearly { Period::Yearly } else { Period::Monthly };
    let comparison = period_comparison(&txns, target, period);
    if comparison.is_empty() {
        println!("No transactions to compare");
        return Ok(());
    }
    println!(
        "{:<10} {:>14} {:>14} {:>14}",
        if yearly { "Year" } else { "Month" },
        "Income",
        "Expenses",
        "Savings"
    );
    for row in &comparison {
        println!(
            "{:<10} {:>14} {:>14} {:>14}",
            row.label,
            format_amount(row.income, sym),
            format_amount(row.expenses, sym),
            format_amount(row.savings, sym)
        );
    }
    Ok(())
}

fn cli_forecast(args: &[String], config: &Config) -> Result<()> {
    let ws = open_workspace(&snapshot_path(args, config)?, config)?;
    let sym = &config.currency_symbol;
    let txns = &ws.snapshot().transactions;
    let today = today();

    let rate = run_rate(txns, today);
    for point in &rate.historical {
        println!("{} so far:      {}", point.label, format_amount(point.value, sym));
    }
    for point in &rate.predicted {
        println!(
            "{} at this pace: {}",
            point.label,
            format_amount(point.value, sym)
        );
    }

    let trend = trend_forecast(txns, today, TREND_MONTHS);
    println!();
    println!("Trend over the last {TREND_MONTHS} months:");
    for point in &trend.historical {
        println!("  {:<4} {:>14}", point.label, format_amount(point.value, sym));
    }
    println!(
        "  Expected this month: {}",
        format_amount(trend.next_month_prediction, sym)
    );
    Ok(())
}

fn cli_export(args: &[String], config: &Config) -> Result<()> {
    let ws = open_workspace(&snapshot_path(args, config)?, config)?;
    let preset = match flag_value(args, "--preset") {
        Some(raw) => ExportPreset::parse(raw)
            .ok_or_else(|| anyhow::anyhow!("Unknown preset: {raw}"))?,
        None => ExportPreset::ThisMonth,
    };
    let range = preset.range(today())?;

    let output_path = positionals(args)
        .first()
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| export_file_name(&range));

    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("Failed to create {output_path}"))?;
    let count = export_csv(file, &ws.snapshot().transactions, &range)
        .with_context(|| format!("Failed to write {output_path}"))?;
    if count == 0 {
        println!("No transactions for {range}");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

fn cli_target(args: &[String], config: &Config) -> Result<()> {
    let sym = &config.currency_symbol;
    let pos = positionals(args);
    let [income, savings, ..] = pos.as_slice() else {
        anyhow::bail!("Usage: budgetwise target <monthly-income> <savings-goal> [--save]");
    };
    let profile = Profile::new(parse_amount(income)?, parse_amount(savings)?);

    println!("Monthly Income:   {}", format_amount(profile.monthly_income, sym));
    println!("Savings Goal:     {}", format_amount(profile.savings_goal, sym));
    println!("Target Expenses:  {}", format_amount(profile.target_expenses, sym));
    println!(
        "                  {}% of income",
        format_percent(profile.percent_of_income(profile.target_expenses))
    );

    if has_flag(args, "--save") {
        let path = snapshot_path(args, config)?;
        let mut ws = open_workspace(&path, config)?;
        ws.save_profile(profile)?;
        save_snapshot(&path, &ws.into_api().into_snapshot())?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}
