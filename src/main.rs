use clap::Parser;
use qoffea::{cli, config, error, local_image, terminal, transport};
use cli::{Cli, Commands};
use config::Config;
use error::{QoffeaError, Result};
use local_image::LocalImage;
use qoffea_common::{select_from_picker, AnalysisClient, ApiConfig, SourceTag, Workflow};
use terminal::TerminalPresenter;
use transport::ReqwestTransport;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

fn client(config: &Config, confidence: Option<f32>) -> Result<AnalysisClient<ReqwestTransport>> {
    let api = ApiConfig::new(config.api_base_url());
    tracing::debug!(base_url = api.base_url(), "using api");
    let transport = ReqwestTransport::new(config.timeout())?;
    Ok(AnalysisClient::new(api, transport).with_confidence(confidence)?)
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, confidence, report, output, force } => {
            println!("☕ qoffea - analisis biji kopi\n");

            let file = LocalImage::open(&image)?;
            let mime = select_from_picker(&file)?;
            let artifact = file.read(mime)?;

            let client = client(&config, confidence.or(config.confidence))?;
            let workflow = Workflow::new(client, TerminalPresenter::new(output, force));

            workflow
                .submit(artifact, SourceTag::Gallery)
                .await
                .map_err(QoffeaError::Reported)?;
            if report {
                workflow
                    .download_report()
                    .await
                    .map_err(QoffeaError::Reported)?;
            }
        }

        Commands::Report { analysis_id, output, force } => {
            println!("📄 qoffea - laporan PDF\n");

            let client = client(&config, None)?;
            let workflow = Workflow::new(client, TerminalPresenter::new(output, force));
            workflow
                .fetch_report(&analysis_id)
                .await
                .map_err(QoffeaError::Reported)?;
        }

        Commands::Config { set_base_url, show } => {
            let mut config = config;

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                println!("✔ URL API disimpan");
            }

            if show {
                println!("Pengaturan:");
                println!("  URL API: {}", config.api_base_url());
                println!("  Timeout: {} detik", config.timeout_seconds);
                match config.confidence {
                    Some(c) => println!("  Confidence: {}", c),
                    None => println!("  Confidence: (default server)"),
                }
                println!("  File: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => {}
        // プレゼンターが表示済み
        Err(QoffeaError::Reported(_)) => std::process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}
