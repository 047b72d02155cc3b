pub mod app;
pub mod completions;
pub mod get;
pub mod module;
pub mod proxy;

use anyhow::Result;

use crate::env::RmmpEnv;
use app::{App, Commands};

pub async fn dispatch(app: App) -> Result<()> {
    match app.cmd {
        Commands::Get(arg) => get::run(arg, &RmmpEnv::new()?).await,
        Commands::Proxy(cmd) => proxy::run(cmd, &RmmpEnv::new()?).await,
        Commands::Module(cmd) => module::run(cmd),
        Commands::Completions(arg) => completions::run(arg),
    }
}
