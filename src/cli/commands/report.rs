use chrono::Local;

use crate::cli::commands::{require_args, CommandDefinition};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::core::services::{PeriodTotals, ReportService, SummaryService};
use crate::currency::Sign;
use crate::ledger::{by_month, Period};

const REPORT_USAGE: &str = "report month <YYYY-MM> | report year <YYYY>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "summary",
            "Show month and year totals",
            "summary [YYYY-MM]",
            cmd_summary,
        ),
        CommandDefinition::new(
            "chart",
            "Show the daily series of a month",
            "chart [YYYY-MM]",
            cmd_chart,
        ),
        CommandDefinition::new(
            "report",
            "Print and save a monthly or yearly report",
            REPORT_USAGE,
            cmd_report,
        ),
    ]
}

fn month_arg(args: &[&str], usage: &str) -> Result<String, CommandError> {
    require_args(args, 1, usage)?;
    Period::month(args[0])
        .map(|period| period.label().to_string())
        .map_err(CommandError::InvalidArguments)
}

/// Like [`month_arg`], falling back to the current local month.
fn month_or_current(args: &[&str], usage: &str) -> Result<String, CommandError> {
    if args.is_empty() {
        let (month, _) = Period::containing(Local::now().date_naive());
        return Ok(month.label().to_string());
    }
    month_arg(args, usage)
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let month = month_or_current(args, "summary [YYYY-MM]")?;
    let year = &month[..4];
    let overview = SummaryService::overview(context.ledger_manager.ledger(), &month, year);

    output_section(format!("Summary {month}"));
    print_totals(context, "月", &overview.month);
    print_totals(context, "年", &overview.year);
    Ok(())
}

fn print_totals(context: &ShellContext, scope: &str, totals: &PeriodTotals) {
    let format = context.reports.format();
    io::print_info(format!(
        "{scope}  収入 {}  支出 {}  残高 {}",
        format.signed_money(Sign::Plus, totals.income),
        format.signed_money(Sign::Minus, totals.expense),
        format.balance(totals.balance)
    ));
}

fn cmd_chart(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let month = month_or_current(args, "chart [YYYY-MM]")?;
    let ledger = context.ledger_manager.ledger();
    let chart = SummaryService::chart(by_month(ledger.transactions(), &month));

    output_section(format!("Chart {month}"));
    let Some(axis) = chart.axis else {
        io::print_info("No data to plot.");
        return Ok(());
    };
    for point in &chart.points {
        println!(
            "{}\t{}\t{}\t{}",
            point.date,
            context.reports.tooltip_label("収入", point.income),
            context.reports.tooltip_label("支出", -point.expense),
            context.reports.tooltip_label("累積残高", point.running_balance)
        );
    }
    io::print_info(format!("Axis: {} .. {}", axis.min, axis.max));
    Ok(())
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, REPORT_USAGE)?;
    let ledger = context.ledger_manager.ledger();
    let (text, file_name) = match args[0] {
        "month" => {
            let month = month_arg(&args[1..], REPORT_USAGE)?;
            (
                context.reports.monthly(ledger, &month),
                ReportService::monthly_file_name(&month),
            )
        }
        "year" => {
            let year = Period::year(args[1]).map_err(CommandError::InvalidArguments)?;
            (
                context.reports.yearly(ledger, year.label()),
                ReportService::yearly_file_name(year.label()),
            )
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown report kind `{other}`; usage: {REPORT_USAGE}"
            )))
        }
    };

    output::raw(&text);
    let path = ReportService::write_report(&context.config.output_dir(), &file_name, &text)?;
    io::print_success(format!("Report saved to {}", path.display()));
    Ok(())
}
