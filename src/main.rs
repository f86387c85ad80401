use clap::{Parser, Subcommand};
use logospark::{
    logger::{self, LogLevel, LoggerConfig},
    save_downloads, Config, DownloadState, ImageFetcher, ImageService, LogoError, LogoSpark,
    LogoStyle, SubmissionOutcome, SynthesisClient,
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "logospark")]
#[command(about = "Turn your ideas into professional logo concepts")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Mirror log output into this file
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate four concepts and save the downloads
    Generate {
        /// What does your company or project do?
        #[arg(short, long)]
        description: String,

        /// Minimalist, Geometric, Abstract, Vintage, Playful or Corporate
        #[arg(short, long, default_value = "Minimalist")]
        style: LogoStyle,

        /// Describe a color palette
        #[arg(short, long)]
        palette: String,

        /// Directory that receives logo_concept_<n>.png
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Serve the HTML form
    #[cfg(feature = "server")]
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Defaults to $PORT, then 8080
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let cli = Cli::parse();
    let config = Config::from_env();

    let mut logger_config = if config.log_json {
        LoggerConfig::production()
    } else {
        LoggerConfig::new()
    };
    if cli.verbose {
        logger_config = logger_config.with_level(LogLevel::Debug);
    }
    if let Some(path) = &cli.log_file {
        logger_config = logger_config.with_file_output(path);
    }
    logger::init_with_config(logger_config)?;

    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    if !dotenv_loaded {
        log::debug!("No .env file found, using process environment");
    }
    logger::log_config_info(&config);

    let client = match SynthesisClient::new(&config.openai) {
        Ok(client) => client,
        Err(e) => {
            log::error!("🚨 {}", e);
            return Err(e.into());
        }
    };
    let spark = client.into_spark();

    match cli.command {
        Command::Generate {
            description,
            style,
            palette,
            out_dir,
        } => generate(&spark, &description, style, &palette, &out_dir).await?,
        #[cfg(feature = "server")]
        Command::Serve { host, port } => {
            let port = port.unwrap_or_else(|| config.port_or_default());
            logospark::server::run(&host, port, spark).await?
        }
    }

    Ok(())
}

async fn generate<S: ImageService, F: ImageFetcher>(
    spark: &LogoSpark<S, F>,
    description: &str,
    style: LogoStyle,
    palette: &str,
    out_dir: &Path,
) -> logospark::Result<()> {
    println!("Our AI designer is sketching your concepts... This might take a moment.");
    let submission = spark.submit(description, style, palette).await;

    let message = submission.error_message();
    match submission.outcome {
        SubmissionOutcome::Rejected(message) => {
            eprintln!("⚠️  {}", message);
            Err(LogoError::ValidationError(message))
        }
        SubmissionOutcome::Failed { cause, .. } => {
            eprintln!("🔥 {}", message.unwrap_or_default());
            eprintln!(
                "🚨 Could not generate logo concepts. The AI may have flagged the prompt, or an API error occurred."
            );
            Err(cause)
        }
        SubmissionOutcome::Presented(concepts) => {
            println!("Here Are Your AI-Generated Logo Concepts!");
            for concept in &concepts {
                println!("{}: {}", concept.caption, concept.image_reference);
                if let Some(revised) = &concept.revised_prompt {
                    println!("   revised prompt: {}", revised);
                }
                match &concept.download {
                    DownloadState::Ready(download) => {
                        println!("   download: {} ({} bytes)", download.file_name, download.bytes.len())
                    }
                    DownloadState::Unavailable(reason) => {
                        println!("   download unavailable: {}", reason)
                    }
                }
            }

            let written = save_downloads(out_dir, &concepts)?;
            println!("Saved {} of {} concepts to {}", written.len(), concepts.len(), out_dir.display());
            Ok(())
        }
    }
}
