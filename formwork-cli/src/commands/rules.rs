//! Rules command - prints the effective permission matrix
//!
//! Runs the same evaluation the workflow's permission step uses, so a
//! custom `[[permissions]]` table can be checked without opening the TUI.

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use formwork_core::{
    OptionalSelections, PermissionKey, PermissionMode, Role, RuleTable, evaluate,
};
use tracing::warn;

use crate::config::FormworkConfig;

#[derive(Args, Debug, Default)]
#[command(after_long_help = "\
Examples:
  formwork rules                                Modes for every role
  formwork rules --role Admin                   Effective matrix for Admin
  formwork rules --role Admin --grant EXPORT_DATA
")]
pub struct RulesArgs {
    /// Role to evaluate for (Admin, Editor or Viewer)
    #[arg(long)]
    pub role: Option<Role>,

    /// Optional permission to pick; repeat for several
    #[arg(long = "grant", value_name = "KEY")]
    pub grants: Vec<PermissionKey>,
}

pub fn run(args: RulesArgs, config: &FormworkConfig) -> Result<()> {
    let rules = config.rules();
    let table = match args.role {
        Some(role) => {
            let (table, rejected) = effective_table(&rules, role, &args.grants);
            for key in rejected {
                warn!(%key, %role, "not optional for this role, ignored");
            }
            table
        }
        None => modes_table(&rules),
    };
    println!("{table}");
    Ok(())
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    table
}

fn mode_cell(mode: PermissionMode) -> Cell {
    let color = match mode {
        PermissionMode::Required => Color::Green,
        PermissionMode::Optional => Color::Yellow,
        PermissionMode::Forbidden => Color::DarkGrey,
    };
    Cell::new(mode).fg(color)
}

/// One row per permission, one column per role.
fn modes_table(rules: &RuleTable) -> Table {
    let mut header = vec!["Key", "Permission"];
    header.extend(Role::ALL.iter().map(|r| r.as_str()));
    let mut table = new_table(&header);

    for def in rules.defs() {
        let mut row = vec![Cell::new(def.key), Cell::new(&def.label)];
        row.extend(Role::ALL.iter().map(|r| mode_cell(def.modes.for_role(*r))));
        table.add_row(row);
    }
    table
}

/// Evaluates `grants` for `role`. Returns the table and the grants that
/// were not optional for the role.
fn effective_table(
    rules: &RuleTable,
    role: Role,
    grants: &[PermissionKey],
) -> (Table, Vec<PermissionKey>) {
    let mut selections = OptionalSelections::new();
    let rejected = grants
        .iter()
        .copied()
        .filter(|key| !selections.toggle(rules, Some(role), *key, true))
        .collect();

    let effective = evaluate(rules, Some(role), &selections);
    let mut table = new_table(&["Key", "Permission", "Mode", "Granted"]);
    for (key, entry) in effective.iter() {
        let label = rules.get(key).map_or("", |d| d.label.as_str());
        let granted = if entry.checked { "yes" } else { "no" };
        table.add_row(vec![
            Cell::new(key),
            Cell::new(label),
            mode_cell(entry.mode),
            Cell::new(granted),
        ]);
    }
    (table, rejected)
}
