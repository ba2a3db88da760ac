use crate::cli::core::{parse_date, short_id, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::ledger::{parse_amount, TransactionDraft, TransactionKind};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a transaction",
            "add <amount> [expense|income] [--category NAME] [--date YYYY-MM-DD] [--note TEXT] [--suggest]",
            cmd_add,
        ),
        CommandEntry::new(
            "suggest",
            "Ask the advisor which category fits a note",
            "suggest <note>",
            cmd_suggest,
        ),
        CommandEntry::new(
            "delete",
            "Delete a transaction (undo stays available briefly)",
            "delete <id-prefix>",
            cmd_delete,
        )
        .with_aliases(&["rm"]),
        CommandEntry::new("undo", "Restore the last deleted transaction", "undo", cmd_undo),
    ]
}

#[derive(Debug, Default, PartialEq)]
struct AddArgs {
    amount: String,
    kind: Option<String>,
    category: Option<String>,
    date: Option<String>,
    note: Option<String>,
    suggest: bool,
}

fn parse_add_args(args: &[&str]) -> Result<AddArgs, CommandError> {
    let mut parsed = AddArgs::default();
    let mut positionals = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match *arg {
            "--category" | "-c" => parsed.category = Some(flag_value(arg, iter.next())?),
            "--date" | "-d" => parsed.date = Some(flag_value(arg, iter.next())?),
            "--note" | "-n" => parsed.note = Some(flag_value(arg, iter.next())?),
            "--suggest" | "-s" => parsed.suggest = true,
            other if other.starts_with("--") => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown option `{}`",
                    other
                )))
            }
            other => positionals.push(other.to_string()),
        }
    }
    let mut positionals = positionals.into_iter();
    parsed.amount = positionals
        .next()
        .ok_or_else(|| CommandError::InvalidArguments("usage: add <amount> [expense|income] ...".into()))?;
    parsed.kind = positionals.next();
    if let Some(extra) = positionals.next() {
        return Err(CommandError::InvalidArguments(format!(
            "unexpected argument `{}`",
            extra
        )));
    }
    Ok(parsed)
}

fn flag_value(flag: &str, value: Option<&&str>) -> Result<String, CommandError> {
    value
        .map(|value| value.to_string())
        .ok_or_else(|| CommandError::InvalidArguments(format!("`{}` needs a value", flag)))
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_add_args(args)?;
    let amount = parse_amount(&parsed.amount)?;
    let kind = match parsed.kind.as_deref() {
        None => TransactionKind::Expense,
        Some(raw) => TransactionKind::parse(raw).ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "unknown type `{}` (use expense or income)",
                raw
            ))
        })?,
    };
    let default_category = context
        .tracker()
        .categories()
        .first()
        .map(|category| category.name.clone())
        .unwrap_or_else(|| "Other".to_string());

    let mut draft = TransactionDraft::new(
        amount,
        kind,
        parsed.category.clone().unwrap_or(default_category),
    )
    .with_note(parsed.note.clone().unwrap_or_default());
    if let Some(raw) = parsed.date.as_deref() {
        draft = draft.with_date(parse_date(raw)?);
    }

    if parsed.suggest {
        if parsed.category.is_some() {
            output::warning("`--suggest` ignored because `--category` was given.");
        } else if let Some(suggested) = suggest_for(context, &draft.note) {
            output::info(format!("Advisor suggests `{}`.", suggested));
            draft.apply_suggestion(suggested);
        }
    }

    let transaction = context.tracker_mut().add_transaction(draft)?;
    output::success(format!(
        "Added {} {}{} ({}) [{}]",
        transaction.note,
        transaction.kind.sign(),
        context.format_money(transaction.amount),
        transaction.category,
        short_id(transaction.id)
    ));
    Ok(())
}

fn suggest_for(context: &ShellContext, note: &str) -> Option<String> {
    let categories = context.tracker().categories().as_slice();
    context.block_on(context.advisor().suggest_category(note, categories))
}

fn cmd_suggest(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = args.join(" ");
    if note.trim().is_empty() {
        return Err(CommandError::InvalidArguments("usage: suggest <note>".into()));
    }
    match suggest_for(context, &note) {
        Some(category) => output::success(format!("Suggested category: {}", category)),
        None => output::warning("No categories available to suggest from."),
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let prefix = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: delete <id-prefix>".into()))?;
    let target = context.transaction_by_prefix(prefix)?;
    if let Some(removed) = context.tracker_mut().delete_transaction(target.id) {
        let window = context.config().undo_window().num_seconds();
        output::success(format!("Deleted {} [{}].", removed.note, short_id(removed.id)));
        output::hint(format!("Type `undo` within {}s to restore it.", window));
    }
    Ok(())
}

fn cmd_undo(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.tracker_mut().undo_delete() {
        Some(restored) => output::success(format!(
            "Restored {} [{}].",
            restored.note,
            short_id(restored.id)
        )),
        None => output::info("Nothing to undo."),
    }
    Ok(())
}
