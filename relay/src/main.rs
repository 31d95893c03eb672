use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use relay::{AppState, Cli, Command, commands, init_logging};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    init_logging();

    match &cli.command {
        Some(Command::Label(args)) => {
            let entries = commands::label(args, &cli.upstream).await?;
            let json = serde_json::to_string_pretty(&entries)?;
            match &args.output {
                Some(path) => std::fs::write(path, json)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{json}"),
            }
        }
        None => {
            let state = AppState::new(cli.upstream.vision_client(), cli.serve.static_dir.clone());
            commands::serve(&cli.serve.addr, state).await?;
        }
    }
    Ok(())
}
