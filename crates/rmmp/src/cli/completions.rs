use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{Shell, generate};

use super::app::App;

#[derive(Args, Clone, Debug)]
pub struct CompletionsArg {
    /// Shell to generate completions for
    pub shell: Shell,
}

pub fn run(arg: CompletionsArg) -> Result<()> {
    let mut command = App::command();
    let name = command.get_name().to_string();
    generate(arg.shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
