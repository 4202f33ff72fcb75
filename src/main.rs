use clap::Parser;
use dashboard::cli::{handle_completions, handle_config_init, Cli, Commands, ConfigCommands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => dashboard::cli::run::run_dashboard(args).await,
        Commands::Status(args) => dashboard::cli::status::run_status(args).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
