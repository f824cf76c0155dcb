use anyhow::Result;
use nonna_bot::{commands, logging, Action, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_with_dotenv(cli.json);

    let config = || commands::load_config(cli.config.as_deref());

    match &cli.action {
        Action::BuildLists { url, out } => {
            let count = commands::build_lists(url, out).await?;
            println!("wrote {count} names to {}", out.display());
        }
        Action::Normalize { titles } => {
            for line in commands::normalize(titles) {
                println!("{line}");
            }
        }
        Action::Ask { text, identity } => {
            println!("{}", commands::ask(config()?, text, identity).await?);
        }
        Action::Console { identity } => commands::console(config()?, identity).await?,
        Action::Serve { addr } => commands::serve(*addr).await?,
    }

    Ok(())
}
