use anyhow::Result;
use clap::Parser;
use wallet_bot::{
    check_balance, init_stderr_tracing, load_config, load_wallet_config, run_bot, Cli, Commands,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::CheckBalance { address } => {
            init_stderr_tracing()?;
            let wallet = load_wallet_config()?;
            println!("{}", check_balance(&wallet, &address).await?);
            Ok(())
        }
    }
}
