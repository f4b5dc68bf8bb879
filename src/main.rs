mod app;
mod cli;
mod frontend;
mod logging;
mod lsp;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let config = Cli::from_args().into_config();
    logging::init(&config.log_level);

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(app::run(config));
    // A pending stdin read cannot be cancelled; don't wait for it.
    runtime.shutdown_background();

    if let Err(e) = &result {
        tracing::error!(error = %e, "bridge failed");
    }
    result
}
