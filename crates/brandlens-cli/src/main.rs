use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod analyze;

#[derive(Debug, Parser)]
#[command(name = "brandlens")]
#[command(about = "AI assistant brand visibility analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a full visibility analysis for a brand website.
    Analyze {
        /// Brand website URL, e.g. https://acme.io
        #[arg(long)]
        url: String,
        /// Brand name override; derived from the domain when omitted.
        #[arg(long)]
        brand: Option<String>,
        /// File with one prompt per line; template prompts are generated
        /// when omitted.
        #[arg(long)]
        prompts_file: Option<String>,
        /// Number of template prompts to generate.
        #[arg(long, default_value_t = 10)]
        count: usize,
        /// Comma-separated competitor names.
        #[arg(long, value_delimiter = ',')]
        competitors: Vec<String>,
        /// Comma-separated category topics, e.g. "crm,marketing".
        #[arg(long, value_delimiter = ',')]
        topics: Vec<String>,
        /// Write the analysis record to this file instead of stdout.
        #[arg(long)]
        out: Option<String>,
    },
    /// Print the template prompts that would be used for a brand.
    Prompts {
        #[arg(long)]
        url: String,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long, default_value_t = 10)]
        count: usize,
        #[arg(long, value_delimiter = ',')]
        competitors: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        topics: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = brandlens_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            url,
            brand,
            prompts_file,
            count,
            competitors,
            topics,
            out,
        } => {
            let input = analyze::build_input(
                &url,
                brand.as_deref(),
                prompts_file.as_deref(),
                count,
                competitors,
                topics,
            )?;
            analyze::run_analyze(&config, &url, input, out.as_deref()).await
        }
        Commands::Prompts {
            url,
            brand,
            count,
            competitors,
            topics,
        } => {
            let input = analyze::build_input(&url, brand.as_deref(), None, count, competitors, topics)?;
            for prompt in &input.prompts {
                println!("{prompt}");
            }
            Ok(())
        }
    }
}
