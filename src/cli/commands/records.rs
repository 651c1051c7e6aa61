use spend_core::RecordDraft;
use spend_domain::{date_key, CategoryChoice, SpendingRecord};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatters::format_amount;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a spending entry",
            "add <YYYY-MM-DD|today> <category|Others> <amount> [custom category]",
            cmd_add,
        ),
        CommandEntry::new(
            "list",
            "List records in the current view, or every record",
            "list [all]",
            cmd_list,
        ),
        CommandEntry::new(
            "categories",
            "List predefined and custom categories",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new(
            "category",
            "Register a custom category",
            "category <name>",
            cmd_category,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: add <YYYY-MM-DD|today> <category|Others> <amount> [custom category]".into(),
        ));
    }
    let date = if args[0].eq_ignore_ascii_case("today") {
        date_key(context.session.today())
    } else {
        args[0].to_string()
    };
    let other_text = args[3..].join(" ");
    let draft = RecordDraft::new(
        date,
        CategoryChoice::from_selection(args[1], &other_text),
        args[2],
    );

    let record = context.session.submit(&draft)?;
    output::success(format!(
        "Recorded {} {} {}",
        record.date,
        record.category,
        format_amount(record.amount, &context.config.currency)
    ));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let session = &context.session;
    let (title, records): (String, Vec<&SpendingRecord>) = match args.first() {
        Some(scope) if scope.eq_ignore_ascii_case("all") => {
            ("All records".into(), session.records().iter().collect())
        }
        Some(other) => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown list scope `{other}`; expected `all`"
            )))
        }
        None => {
            let engine = session.engine();
            (
                engine.window_label(session.granularity(), session.reference()),
                engine.filter(session.records(), session.granularity(), session.reference()),
            )
        }
    };

    output::section(title);
    if records.is_empty() {
        output::info("No records.");
        return Ok(());
    }
    for (idx, record) in records.iter().enumerate() {
        output::line(format!(
            "  {:>3}. {:<10}  {:<16} {:>12}",
            idx + 1,
            record.date,
            record.category,
            format_amount(record.amount, &context.config.currency)
        ));
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let categories = context.session.categories();
    output::section("Categories");
    for name in categories.predefined() {
        output::line(format!("  {name}"));
    }
    for name in categories.custom() {
        output::line(format!("  {name} (custom)"));
    }
    output::hint("Pick `Others` with a name to add a category while recording.");
    Ok(())
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args.join(" ");
    if context.session.add_custom_category(name.trim())? {
        output::success(format!("Category `{}` added", name.trim()));
    } else {
        output::warning(format!("Category `{}` already exists", name.trim()));
    }
    Ok(())
}
