use clap::Parser;
use higgs::analysis::AnalysisAdapter;
use higgs::cli::{
    handle_analyze, handle_completions, handle_config_init, handle_simulate, load_config, Cli,
    Commands, ConfigCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => higgs::cli::serve::run_serve(args).await,
        Commands::Simulate(args) => load_config(&args.config)
            .and_then(|config| handle_simulate(&args, &config))
            .map(|output| println!("{}", output)),
        Commands::Analyze(args) => match load_config(&args.config) {
            Ok(config) => {
                let adapter =
                    AnalysisAdapter::from_config(&config.analysis, reqwest::Client::new());
                handle_analyze(&args, &config, &adapter)
                    .await
                    .map(|output| println!("{}", output))
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
