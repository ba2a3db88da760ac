pub mod advisor;
pub mod category;
pub mod system;
pub mod transaction;
pub mod views;

use crate::cli::registry::{CommandEntry, CommandRegistry};

const ROOT_COMMAND_ORDER: &[&str] = &[
    "home",
    "history",
    "analysis",
    "categories",
    "advisor",
    "add",
    "suggest",
    "delete",
    "undo",
    "category-add",
    "category-delete",
    "help",
    "version",
    "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(views::definitions());
    commands.extend(advisor::definitions());
    commands.extend(transaction::definitions());
    commands.extend(category::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = all_entries();
    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| entry.name.eq_ignore_ascii_case(name))
            .unwrap_or(ROOT_COMMAND_ORDER.len())
    });
    for entry in entries {
        registry.register(entry);
    }
}
