use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;

const SCRIPT_ENV: &str = "SPEND_TRACKER_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context, io::stdin().lock()),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::info("Type `help` to list commands.");

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err),
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Executes one command per input line until `exit` or end of input.
pub(crate) fn run_script<R: BufRead>(context: &mut ShellContext, input: R) -> Result<(), CliError> {
    for line in input.lines() {
        if !context.running {
            break;
        }
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let tokens = match shell_words::split(trimmed) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(err);
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };

    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_string).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        // Only the first word is a command name.
        if prefix.trim_start().contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let start = prefix.len() - prefix.trim_start().len();
        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = self
            .commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::NaiveDate;
    use spend_config::Config;
    use spend_core::{FixedClock, MemoryStorage};
    use spend_domain::{Granularity, PredefinedCategory};

    use super::*;
    use crate::session::Session;

    fn context() -> ShellContext {
        let predefined = vec![PredefinedCategory::new("Food")];
        let (session, _) = Session::with_storage(
            Box::new(MemoryStorage::new()),
            &predefined,
            &Config::default(),
            Box::new(FixedClock(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())),
        );
        ShellContext::with_session(CliMode::Script, session, Config::default())
    }

    #[test]
    fn script_lines_drive_the_session() {
        let mut context = context();
        let script = "\
# comment lines are skipped
add today Food 12.50
add 2024-03-14 Others 3 \"Pet care\"
add 2024-03-14 Others 3
view weekly
exit
add 2024-03-14 Food 1
";
        run_script(&mut context, Cursor::new(script)).unwrap();

        let records = context.session.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, "2024-03-15");
        assert_eq!(records[1].category, "Pet care");
        assert_eq!(context.session.granularity(), Granularity::Weekly);
        assert!(!context.running);
    }

    #[test]
    fn unknown_commands_and_bad_quotes_keep_running() {
        let mut context = context();
        assert_eq!(
            handle_line(&mut context, "sumary").unwrap(),
            LoopControl::Continue
        );
        assert_eq!(
            handle_line(&mut context, "add \"unterminated").unwrap(),
            LoopControl::Continue
        );
        assert!(context.running);
    }

    #[test]
    fn command_errors_are_returned_to_the_loop() {
        let mut context = context();
        let err = handle_line(&mut context, "view yearly").unwrap_err();
        assert!(matches!(err, CommandError::Tracker(_)));
        let err = handle_line(&mut context, "date 15/03/2024").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn completer_only_offers_command_names() {
        let helper = CommandHelper::new(vec!["summary", "add", "view"]);
        let history = DefaultHistory::new();
        let ctx = ReadlineContext::new(&history);
        let (start, pairs) = helper.complete("su", 2, &ctx).unwrap();
        assert_eq!(start, 0);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].replacement, "summary");

        let (_, pairs) = helper.complete("view we", 7, &ctx).unwrap();
        assert!(pairs.is_empty());
    }
}
