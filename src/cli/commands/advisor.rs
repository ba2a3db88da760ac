use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "advisor",
        "Ask the advisor for spending tips",
        "advisor",
        cmd_advisor,
    )
    .with_aliases(&["ai"])]
}

fn cmd_advisor(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(format!(
        "Consulting the {} advisor...",
        context.advisor().model_name()
    ));
    let advice = context.block_on(context.advisor().advice(context.tracker().transactions()));
    output::section("Advisor report");
    for line in advice.lines().filter(|line| !line.trim().is_empty()) {
        output::line(line.trim_end());
    }
    Ok(())
}
