use chrono::NaiveDate;
use spend_core::{parse_granularity, DashboardSummary};
use spend_domain::ISO_DATE_FORMAT;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatters::{format_amount, format_date};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "view",
            "Switch the dashboard granularity",
            "view <daily|weekly|monthly>",
            cmd_view,
        ),
        CommandEntry::new(
            "date",
            "Move the dashboard reference date",
            "date <YYYY-MM-DD|today>",
            cmd_date,
        ),
        CommandEntry::new(
            "summary",
            "Show totals, category breakdown and spending over time",
            "summary [--json]",
            cmd_summary,
        ),
    ]
}

fn cmd_view(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: view <daily|weekly|monthly>".into(),
        ));
    };
    let granularity = parse_granularity(raw)?;
    context.session.set_granularity(granularity);
    print_dashboard(&context.session.dashboard(), &context.config.currency);
    Ok(())
}

fn cmd_date(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(raw) if raw.eq_ignore_ascii_case("today") => context.session.reset_reference(),
        Some(raw) => {
            let date = NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT).map_err(|_| {
                CommandError::InvalidArguments(format!("`{raw}` is not a YYYY-MM-DD date"))
            })?;
            context.session.set_reference(date);
        }
        None => {
            return Err(CommandError::InvalidArguments(
                "usage: date <YYYY-MM-DD|today>".into(),
            ))
        }
    }
    print_dashboard(&context.session.dashboard(), &context.config.currency);
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let summary = context.session.dashboard();
    match args.first() {
        Some(&"--json") => output::line(serde_json::to_string_pretty(&summary)?),
        Some(other) => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown option `{other}`"
            )))
        }
        None => print_dashboard(&summary, &context.config.currency),
    }
    Ok(())
}

fn print_dashboard(summary: &DashboardSummary, currency: &str) {
    output::section(format!("{} ({})", summary.label, summary.granularity));
    output::line(format!(
        "  Total spent (all time): {}",
        format_amount(summary.total_all_time, currency)
    ));
    output::line(format!(
        "  Total spent (period)  : {}",
        format_amount(summary.total_in_window, currency)
    ));
    output::line(format!("  Records in period     : {}", summary.record_count));

    if summary.by_category.is_empty() {
        output::info("No spending in this period.");
        return;
    }

    output::line("  By category:");
    for entry in summary.by_category.entries() {
        output::line(format!(
            "    {:<16} {:>12}",
            entry.category,
            format_amount(entry.total, currency)
        ));
    }

    output::line("  Over time:");
    for (label, total) in summary.series.points() {
        output::line(format!("    {:<10} {:>12}", label, format_amount(total, currency)));
    }
    output::hint(format!(
        "Window {} to {}",
        format_date(summary.window.start),
        format_date(summary.window.end)
    ));
}
