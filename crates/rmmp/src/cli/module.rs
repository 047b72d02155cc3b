use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use rmmp_root::{ADB_ROOT, RootRuntime, RuntimeKind};

use crate::ui::{
    self,
    table::{FormatConfig, Formatter, ModuleRow},
};

#[derive(Clone, Debug, Subcommand)]
pub enum ModuleCommands {
    /// Install a module archive
    #[command(alias = "i", name = "install")]
    Install(InstallArg),
    /// List installed modules
    #[command(alias = "ls", name = "list")]
    List,
}

#[derive(Args, Clone, Debug)]
pub struct InstallArg {
    /// Path to the module zip
    pub archive: PathBuf,
}

pub fn run(cmd: ModuleCommands) -> Result<()> {
    let runtime = match RootRuntime::require() {
        Ok(runtime) => runtime,
        Err(e) => {
            print_supported_managers();
            return Err(e.into());
        }
    };

    match cmd {
        ModuleCommands::Install(arg) => {
            ui::info(format!(
                "installing {} with {}",
                arg.archive.display(),
                runtime.kind()
            ));
            runtime
                .install(&arg.archive)
                .context("Module installation failed")?;
            ui::success("module installed");
        }
        ModuleCommands::List => {
            let modules = runtime
                .list_modules()
                .with_context(|| format!("Failed to list {} modules", runtime.kind()))?;
            if modules.is_empty() {
                ui::info("no modules installed");
                return Ok(());
            }

            let table = Formatter::render(
                modules.iter().map(ModuleRow::from),
                FormatConfig {
                    header: Some(format!("{} modules ({})", runtime.kind(), modules.len())),
                    ..FormatConfig::default()
                },
            );
            println!("{table}");
        }
    }
    Ok(())
}

fn print_supported_managers() {
    ui::warn("rmmp needs one of these root managers:");
    for kind in RuntimeKind::PRIORITY {
        println!("  • {kind}");
    }
    println!("looked for their binaries under {ADB_ROOT}");
}
