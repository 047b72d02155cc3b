use clap::{ArgAction, Parser, Subcommand};

use super::completions::CompletionsArg;
use super::get::GetArg;
use super::module::ModuleCommands;
use super::proxy::ProxyCommands;

#[derive(Clone, Debug, Parser)]
#[command(
    name = "rmmp",
    version = env!("CARGO_PKG_VERSION"),
    about = "Root module manager: fetch, install and list modules for KernelSU, APatch and Magisk",
    long_about = None,
    propagate_version = true
)]
pub struct App {
    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Download the latest release of a GitHub-hosted module and install it
    #[command(alias = "g", name = "get")]
    Get(GetArg),
    /// Inspect and maintain the GitHub mirror list
    #[command(alias = "p", name = "proxy", subcommand)]
    Proxy(ProxyCommands),
    /// Install or list modules through the device's root manager
    #[command(alias = "m", name = "module", subcommand)]
    Module(ModuleCommands),
    /// Print a shell completion script
    #[command(name = "completions")]
    Completions(CompletionsArg),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        App::command().debug_assert();
    }

    #[test]
    fn parses_get_with_flags() {
        let app = App::try_parse_from(["rmmp", "-vv", "get", "owner/repo", "--yes"]).unwrap();
        assert_eq!(app.verbose, 2);
        match app.cmd {
            Commands::Get(arg) => {
                assert_eq!(arg.repo.to_string(), "owner/repo");
                assert!(arg.yes);
                assert!(!arg.no_install);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_repository() {
        assert!(App::try_parse_from(["rmmp", "get", "just-a-name"]).is_err());
    }

    #[test]
    fn yes_and_no_install_conflict() {
        assert!(App::try_parse_from(["rmmp", "get", "a/b", "-y", "--no-install"]).is_err());
    }

    #[test]
    fn aliases_resolve() {
        let app = App::try_parse_from(["rmmp", "p", "ls"]).unwrap();
        assert!(matches!(app.cmd, Commands::Proxy(ProxyCommands::List)));

        let app = App::try_parse_from(["rmmp", "m", "i", "/sdcard/m.zip"]).unwrap();
        assert!(matches!(app.cmd, Commands::Module(ModuleCommands::Install(_))));
    }
}
