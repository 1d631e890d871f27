mod commands;
mod terminal;

use commands::{CommandLine, Commands, discover, statuses};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let commands = CommandLine::parse_args();
    let cfg = commands.to_config();

    logging::init_logging(&cfg);
    print::initialize(&cfg);
    print::banner(&cfg);

    let result = match commands.command {
        Commands::Discover(args) => discover::discover(args, &commands.api, &cfg).await,
        Commands::Statuses => statuses::statuses(&cfg),
    };

    if cfg.quiet == 0 {
        print::closing_rule();
    }
    result
}
