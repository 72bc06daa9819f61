//! Mode CLI commands

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use super::app::EXIT_FAILURE;
use super::output::Output;
use crate::domain::Mode;
use crate::launch::{Activator, ShellSpawner, SystemUrlOpener};
use crate::storage::{Config, ModeStore};

pub fn list(output: &Output, store: &ModeStore) {
    let modes = store.list();

    if output.is_json() {
        output.data(&modes);
        return;
    }

    if modes.is_empty() {
        println!("No modes saved.");
        return;
    }

    for (i, mode) in modes.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_mode(mode);
    }
}

pub fn show(output: &Output, store: &ModeStore, name: &str) -> Result<()> {
    let mode = store.get(name)?;

    if output.is_json() {
        let entries: Vec<_> = mode
            .classified()
            .map(|(entry, kind)| serde_json::json!({ "entry": entry, "kind": kind }))
            .collect();
        output.data(&serde_json::json!({
            "name": mode.name,
            "entries": entries,
        }));
    } else {
        println!("[{}]", mode.name);
        for (entry, kind) in mode.classified() {
            println!("  {:<8} {}", kind, entry);
        }
    }

    Ok(())
}

pub fn add(
    output: &Output,
    store: &mut ModeStore,
    name: &str,
    entries: Vec<String>,
    file: Option<&Path>,
) -> Result<()> {
    let entries = match file {
        Some(path) => read_entries(path)?,
        None => entries,
    };

    let mode = store.create_or_replace(name, &entries)?;
    report_saved(output, &mode, "Saved");
    Ok(())
}

pub fn update(
    output: &Output,
    store: &mut ModeStore,
    name: &str,
    rename: Option<&str>,
    entries: Vec<String>,
    file: Option<&Path>,
) -> Result<()> {
    let current = store.get(name)?;

    let entries = match file {
        Some(path) => read_entries(path)?,
        None if entries.is_empty() => current.entries,
        None => entries,
    };
    let new_name = rename.unwrap_or(name);

    let mode = store.rename_and_update(current.name.as_str(), new_name, &entries)?;
    if mode.name != current.name {
        output.verbose_ctx("update", &format!("Renamed '{}' to '{}'", current.name, mode.name));
    }
    report_saved(output, &mode, "Updated");
    Ok(())
}

pub fn activate(output: &Output, store: &ModeStore, config: &Config, name: &str) -> Result<ExitCode> {
    let opener = SystemUrlOpener::new(config.browser.clone());
    let spawner = ShellSpawner::new(config.shell_command());
    let report = Activator::new(store, opener, spawner).activate(name)?;

    if output.is_json() {
        let failed: Vec<_> = report
            .failed
            .iter()
            .map(|f| {
                serde_json::json!({
                    "entry": f.entry,
                    "kind": f.kind,
                    "error": f.cause.to_string(),
                })
            })
            .collect();
        output.data(&serde_json::json!({
            "mode": report.mode_name,
            "success": report.is_success(),
            "succeeded": report.succeeded,
            "failed": failed,
        }));
    } else {
        for entry in &report.succeeded {
            println!("  launched  {}", entry);
        }
        for failure in &report.failed {
            output.warn(&format!("  failed    {}", failure));
        }
        println!(
            "Activated '{}': {} launched, {} failed",
            report.mode_name,
            report.succeeded.len(),
            report.failed.len()
        );
    }

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_FAILURE))
    }
}

pub fn delete(output: &Output, store: &mut ModeStore, name: &str) -> Result<()> {
    let removed = store.delete(name)?;
    let name = name.trim().to_lowercase();

    if output.is_json() {
        output.data(&serde_json::json!({
            "name": name,
            "deleted": removed,
        }));
    } else if removed {
        output.success(&format!("Deleted mode '{}'", name));
    } else {
        output.success(&format!("No mode named '{}'; nothing to delete", name));
    }

    Ok(())
}

fn print_mode(mode: &Mode) {
    println!("[{}]", mode.name);
    for entry in &mode.entries {
        println!("  - {}", entry);
    }
}

fn report_saved(output: &Output, mode: &Mode, verb: &str) {
    if output.is_json() {
        output.data(mode);
    } else {
        output.success(&format!(
            "{} mode '{}' ({} {})",
            verb,
            mode.name,
            mode.entries.len(),
            if mode.entries.len() == 1 { "entry" } else { "entries" }
        ));
    }
}

/// Reads raw entry lines from a file, or stdin for `-`
fn read_entries(path: &Path) -> Result<Vec<String>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read entries from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read entries: {}", path.display()))?
    };

    Ok(vec![content])
}
