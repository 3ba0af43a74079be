use clap::Parser;
use tunnel_status::cli::{handle_completions, handle_config_init, Cli, Commands, ConfigCommands};

#[tokio::main]
async fn main() {
    // Values from a .env file never override variables already set
    dotenv_flow::dotenv_flow().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => tunnel_status::cli::serve::run_serve(args).await,
        Commands::Check(args) => match tunnel_status::cli::check::run_check(&args).await {
            Ok(output) => {
                println!("{}", output);
                Ok(())
            }
            Err(e) => Err(e),
        },
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
