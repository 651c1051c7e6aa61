use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Spend Tracker {}", meta.version));
    output::line(format!("  CLI version  : {}", build_info::CLI_VERSION));
    output::line(format!(
        "  Build hash   : {} ({})",
        meta.git_hash, meta.git_status
    ));
    output::line(format!("  Built at     : {}", meta.timestamp));
    output::line(format!("  Target       : {}", meta.target));
    output::line(format!("  Profile      : {}", meta.profile));
    output::line(format!("  Rustc        : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.print_help(args.first().copied());
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
