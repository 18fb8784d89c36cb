use crate::catalog::LauncherViewModel;
use anyhow::Result;
use colored::Colorize;

pub struct InstallationsCommand;

impl InstallationsCommand {
    pub fn execute(model: &dyn LauncherViewModel) -> Result<()> {
        let installations = model.installations();

        if installations.is_empty() {
            println!("{}", "No installations yet.".yellow());
            return Ok(());
        }

        println!(
            "\n{} installations:\n",
            installations.len().to_string().green().bold()
        );
        for installation in installations {
            let label = match installation.label() {
                "" => installation.id.dimmed().to_string(),
                label => label.bold().to_string(),
            };
            match &installation.version {
                Some(version) => println!("  {} {}", label, version.green()),
                None => println!("  {}", label),
            }
        }

        Ok(())
    }
}
