pub mod records;
pub mod system;
pub mod view;

use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(records::definitions());
    commands.extend(view::definitions());
    commands.extend(system::definitions());
    commands
}
