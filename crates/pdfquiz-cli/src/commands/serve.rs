//! Serve command - run the HTTP extraction endpoint.

use clap::Args;
use console::style;

use pdfquiz_core::PdfQuizConfig;

use super::config::load_config;

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind (overrides config and PDFQUIZ_BIND)
    #[arg(short, long)]
    bind: Option<String>,
}

pub async fn run(args: ServeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config: PdfQuizConfig = load_config(config_path)?.with_env_overrides();
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }

    println!(
        "{} Serving POST {} on {}",
        style("ℹ").blue(),
        config.server.route,
        config.server.bind_addr
    );

    pdfquiz_server::serve(config).await?;
    Ok(())
}
