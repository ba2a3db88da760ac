use uuid::Uuid;

use crate::cli::core::{short_id, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::ledger::PRESET_COLORS;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "category-add",
            "Create a category",
            "category-add <name> [color]",
            cmd_category_add,
        ),
        CommandEntry::new(
            "category-delete",
            "Delete a category (transactions keep their category name)",
            "category-delete <name|id-prefix>",
            cmd_category_delete,
        ),
    ]
}

fn cmd_category_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (name, color) = match args {
        [] => {
            return Err(CommandError::InvalidArguments(
                "usage: category-add <name> [color]".into(),
            ))
        }
        [name] => (*name, PRESET_COLORS[0]),
        [name, color] => (*name, *color),
        _ => {
            return Err(CommandError::InvalidArguments(
                "quote category names that contain spaces".into(),
            ))
        }
    };
    let category = context.tracker_mut().add_category(name, color)?;
    output::success(format!(
        "Category `{}` added ({}) [{}]",
        category.name,
        category.color,
        short_id(category.id)
    ));
    Ok(())
}

fn cmd_category_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let needle = args.join(" ");
    if needle.trim().is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: category-delete <name|id-prefix>".into(),
        ));
    }
    let id = resolve_category(context, needle.trim())?;
    if let Some(removed) = context.tracker_mut().delete_category(id)? {
        output::success(format!("Category `{}` deleted.", removed.name));
    }
    Ok(())
}

fn resolve_category(context: &ShellContext, needle: &str) -> Result<Uuid, CommandError> {
    let registry = context.tracker().categories();
    if let Some(category) = registry.lookup(needle) {
        return Ok(category.id);
    }
    let prefix = needle.to_lowercase();
    let matches: Vec<Uuid> = registry
        .iter()
        .filter(|category| category.id.simple().to_string().starts_with(&prefix))
        .map(|category| category.id)
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(CommandError::InvalidArguments(format!(
            "no category named `{}`",
            needle
        ))),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{}` matches several categories; use a longer id",
            needle
        ))),
    }
}
