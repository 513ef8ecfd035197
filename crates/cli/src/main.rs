//! Terminal front end for Medicine Finder.
//!
//! ## Environment Variables
//! - `GEMINI_API_KEY` (or `API_KEY`): key for the Gemini API, required for `search`
//! - `MEDFIND_MODEL`: model name (default: "gemini-2.5-flash")
//! - `MEDFIND_API_BASE`: API base URL (default: the public v1beta endpoint)
//! - `MEDFIND_TIMEOUT_SECS`: request timeout in seconds (default: 30)

use clap::{Parser, Subcommand};
use medfind_core::config::{
    api_base_from_env_value, api_key_from_env_values, model_from_env_value,
    timeout_from_env_value,
};
use medfind_core::constants::DISCLAIMER;
use medfind_core::prompt::{build_prompt, response_schema};
use medfind_core::{
    FinderConfig, GeminiClient, Medicine, MedicineFinder, MedicineQuery, SearchSession,
    SearchState, View,
};
use std::fmt::Write as _;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "medfind")]
#[command(about = "Find alternative medicines with the same active ingredients")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a medicine and list its alternatives
    Search {
        /// Medicine name, e.g. "Crocin"
        name: String,
        /// Print the validated result as JSON instead of text cards
        #[arg(long)]
        json: bool,
    },
    /// Print the instruction that would be sent for a medicine name
    Prompt {
        /// Medicine name
        name: String,
    },
    /// Print the structured-output schema sent with every lookup
    Schema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medfind_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Search { name, json }) => {
            let query = MedicineQuery::parse(&name).map_err(|e| anyhow::anyhow!(e.user_message()))?;
            let finder = MedicineFinder::new(GeminiClient::new(&config_from_env()?)?);
            let session = SearchSession::new();

            match session.search(&finder, &query).await {
                SearchState::Failed { message, .. } => anyhow::bail!(message),
                SearchState::Success { result, .. } if json => {
                    println!("{}", serde_json::to_string_pretty(result.as_ref())?);
                }
                state => print!("{}", render_view(&View::for_state(&state))?),
            }
        }
        Some(Commands::Prompt { name }) => {
            let query = MedicineQuery::parse(&name).map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("{}", build_prompt(query.as_str()));
        }
        Some(Commands::Schema) => {
            println!("{}", serde_json::to_string_pretty(&response_schema())?);
        }
        None => {
            println!("Use 'medfind --help' for commands");
        }
    }

    Ok(())
}

fn config_from_env() -> anyhow::Result<FinderConfig> {
    let api_key = api_key_from_env_values(
        std::env::var("GEMINI_API_KEY").ok(),
        std::env::var("API_KEY").ok(),
    )?;
    let cfg = FinderConfig::new(
        api_key,
        model_from_env_value(std::env::var("MEDFIND_MODEL").ok()),
        api_base_from_env_value(std::env::var("MEDFIND_API_BASE").ok()),
        timeout_from_env_value(std::env::var("MEDFIND_TIMEOUT_SECS").ok())?,
    )?;
    Ok(cfg)
}

fn write_card(out: &mut String, medicine: &Medicine) -> std::fmt::Result {
    writeln!(out, "  * {}", medicine.brand_name)?;
    writeln!(out, "      Salt:    {}", medicine.salt)?;
    writeln!(out, "      Dosage:  {}", medicine.dosage)?;
    writeln!(out, "      Company: {}", medicine.company)
}

/// Plain-text rendering of a view.
fn render_view(view: &View) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", view.title())?;

    match view {
        View::Results {
            searched,
            categories,
        } => {
            write_card(&mut out, searched)?;
            for category in categories {
                writeln!(out, "\n{}", category.title)?;
                for medicine in &category.medicines {
                    write_card(&mut out, medicine)?;
                }
            }
        }
        View::NoAlternatives { searched } => {
            write_card(&mut out, searched)?;
            writeln!(out, "\n{}", view.message())?;
        }
        _ => writeln!(out, "{}", view.message())?,
    }

    if matches!(view, View::Results { .. } | View::NoAlternatives { .. }) {
        writeln!(out, "\n{DISCLAIMER}")?;
    }
    Ok(out)
}
