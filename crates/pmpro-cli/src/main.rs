use pmpro_cli::{build_cli, execute, logging, Context, PmConfig};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = build_cli().get_matches();

    logging::init(matches.get_flag("log-json"))?;

    let config = PmConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    let ctx = Context::new(config);

    let output = execute(&matches, &ctx).await?;
    println!("{output}");
    Ok(())
}
