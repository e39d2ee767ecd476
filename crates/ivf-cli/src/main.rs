mod config;
mod pages;
mod server;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ivf_core::{
    AgeRange, MAX_CYCLES, MIN_CYCLES, MedicalCondition, ResultSummary, SurveyAnswers, decode,
    encode,
};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "ivf", about = "IVF success-rate calculator CLI and web server")]
struct Cli {
    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the success rate for a set of answers
    Score {
        #[command(flatten)]
        answers: AnswerArgs,

        /// Print answers, query string and score breakdown as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the results-page query string for a set of answers
    Encode {
        #[command(flatten)]
        answers: AnswerArgs,
    },

    /// Show the results page for a query string (or a full results URL)
    Decode {
        query: String,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the calculator form and results page over HTTP
    Serve {
        /// Listen address (overrides IVF_ADDR and the config file)
        #[arg(long)]
        addr: Option<String>,

        /// TOML config file (default: $IVF_CONFIG)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct AnswerArgs {
    /// Age range: under-30, 30-34, 35-37, 38-40, 41-43 or above-43
    #[arg(long, default_value = "under-30")]
    age_range: AgeRange,

    /// Number of IVF cycles
    #[arg(
        long,
        default_value_t = MIN_CYCLES,
        value_parser = clap::value_parser!(u8).range(i64::from(MIN_CYCLES)..=i64::from(MAX_CYCLES))
    )]
    cycles: u8,

    /// Previous ICSI procedure
    #[arg(long)]
    icsi: bool,

    /// Previous PGT testing
    #[arg(long)]
    pgt: bool,

    /// Medical condition; repeat for several (PCOS, Endometriosis, "Low Ovarian Reserve", "Male Factor Infertility")
    #[arg(long = "condition")]
    conditions: Vec<MedicalCondition>,
}

impl AnswerArgs {
    fn to_answers(&self) -> SurveyAnswers {
        let mut answers = SurveyAnswers {
            age_range: self.age_range,
            ivf_cycles: self.cycles,
            icsi_procedure: self.icsi.into(),
            pgt_testing: self.pgt.into(),
            medical_conditions: Vec::new(),
        };
        for condition in &self.conditions {
            answers.set_condition(*condition, true);
        }
        answers
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Score { answers, json } => cmd_score(&cli, answers, *json),
        Commands::Encode { answers } => cmd_encode(answers),
        Commands::Decode { query, json } => cmd_decode(&cli, query, *json),
        Commands::Serve { addr, config } => cmd_serve(addr.as_deref(), config.as_deref()).await,
    }
}

fn cmd_score(cli: &Cli, args: &AnswerArgs, json: bool) -> Result<()> {
    let answers = args.to_answers();
    let breakdown = answers.score_breakdown();

    if json {
        let out = serde_json::json!({
            "answers": answers,
            "query": encode(&answers),
            "breakdown": breakdown,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("failed to serialize score")?
        );
    } else {
        println!("{:.1}%", breakdown.rate);
    }

    if cli.verbose {
        eprintln!(
            "--- terms: base={}, age={:+}, icsi={:+}, pgt={:+}, endometriosis=-{} -> {} ---",
            breakdown.base,
            breakdown.age_adjustment,
            breakdown.icsi_bonus,
            breakdown.pgt_bonus,
            breakdown.endometriosis_penalty,
            breakdown.pre_decay,
        );
        eprintln!(
            "--- decay: cycles={}, factor={:.4}, raw={:.4} ---",
            breakdown.cycles, breakdown.decay_factor, breakdown.raw
        );
    }
    Ok(())
}

fn cmd_encode(args: &AnswerArgs) -> Result<()> {
    println!("{}", encode(&args.to_answers()));
    Ok(())
}

/// The query part of a results URL, or the input itself when it is not a URL.
fn query_of(input: &str) -> String {
    match url::Url::parse(input) {
        Ok(url) if url.has_host() => url.query().unwrap_or_default().to_string(),
        _ => input.to_string(),
    }
}

fn cmd_decode(cli: &Cli, input: &str, json: bool) -> Result<()> {
    let record = decode(&query_of(input));
    let summary = ResultSummary::from_record(&record);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("failed to serialize summary")?
        );
    } else {
        println!("success rate:       {}%", summary.rate_display);
        println!("cycles:             {}", summary.cycles_label);
        println!("age range:          {}", summary.age_range);
        println!("icsi procedure:     {}", summary.icsi_procedure);
        println!("pgt testing:        {}", summary.pgt_testing);
        println!("medical conditions: {}", summary.medical_conditions);
    }

    if cli.verbose {
        eprintln!(
            "--- decoded {} params, raw rate={:.4} ---",
            record.len(),
            summary.breakdown.raw
        );
    }
    Ok(())
}

async fn cmd_serve(addr: Option<&str>, config_path: Option<&std::path::Path>) -> Result<()> {
    let config = Config::load(config_path).context("failed to load config")?;
    let addr = config.listen_addr(addr)?;
    server::serve(addr, &config.server).await
}
