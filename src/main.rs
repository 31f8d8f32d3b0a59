use clap::Parser;
use spark_network::core::ConfigProvider;
use spark_network::utils::error::{ErrorSeverity, Result};
use spark_network::utils::{logger, validation::Validate};
use spark_network::{
    AnyPacer, Catalog, CliConfig, FixedPacer, GithubLookup, GraphAssembler, LocalStorage,
    NoopPacer, RegistryEngine, RegistryPipeline, SnapshotWriter, StatusProbe, TomlConfig,
};

async fn run<C: ConfigProvider + Validate>(config: &C, pacing: bool) -> Result<String> {
    config.validate()?;

    let catalog = Catalog::spark_network();
    catalog.validate()?;

    let lookup = GithubLookup::from_config(config)?;
    if !lookup.is_authenticated() {
        tracing::warn!("No API token configured, requests are unauthenticated");
    }

    let pacer = if pacing {
        AnyPacer::Fixed(FixedPacer::from_config(config))
    } else {
        tracing::info!("Pacing disabled");
        AnyPacer::Noop(NoopPacer)
    };

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = RegistryPipeline::new(
        catalog,
        GraphAssembler::new(StatusProbe::new(lookup, config.owner()), pacer),
        SnapshotWriter::new(storage, config.filename()),
        config.output_path(),
    );

    RegistryEngine::new(pipeline).run().await
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let result = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => {
                    let config = config.with_fallback_token(cli.token.clone());
                    let pacing = config.pacing_enabled() && !cli.no_pacing;
                    run(&config, pacing).await
                }
                Err(e) => Err(e),
            }
        }
        None => run(&cli, !cli.no_pacing).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "Scan failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}
