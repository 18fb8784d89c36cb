use crate::catalog::{parse_display_name, LauncherViewModel};
use crate::ui::{filter_versions, MatchMode};
use anyhow::Result;
use colored::Colorize;

pub struct VersionsCommand;

impl VersionsCommand {
    /// Print the versions the grid would show for `query`, or every version
    /// with its installed state when `all` is set
    pub fn execute(
        model: &dyn LauncherViewModel,
        query: Option<String>,
        all: bool,
        mode: MatchMode,
    ) -> Result<()> {
        let versions = model.versions();

        if all {
            println!("\n{} versions:\n", versions.len().to_string().green().bold());
            for version in versions {
                let marker = if version.is_installed {
                    "[installed]".yellow().to_string()
                } else {
                    String::new()
                };
                println!("  {} {}", parse_display_name(version).blue().bold(), marker);
            }
            return Ok(());
        }

        let query = query.unwrap_or_default();
        let visible = filter_versions(versions, &query, mode);
        if visible.is_empty() {
            println!("{}", "No versions found.".yellow());
            return Ok(());
        }

        if query.is_empty() {
            println!("\n{} versions available:\n", visible.len().to_string().green());
        } else {
            println!(
                "\n{} versions matching '{}':\n",
                visible.len().to_string().green(),
                query
            );
        }
        for index in visible {
            println!("  {}", parse_display_name(&versions[index]).blue().bold());
        }

        Ok(())
    }
}
