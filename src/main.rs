// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use word_quiz_generator::utils::logging::{
    format_error, format_info, format_step, format_success, format_warning,
};
use word_quiz_generator::{
    Config, JsonExporter, PhraseCatalog, PipelineOrchestrator, TransformRegistry, TransformSet,
    Validator, clean_sidecars,
};

#[derive(Parser)]
#[command(name = "word_quiz_generator")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Fill-in-the-blank quiz generation from phrase catalogs", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate preprocessed and lemmatized sidecars for the given sources
    Make {
        /// Comma-separated files or directories to process
        #[arg(short, long)]
        src: String,

        /// Language tag selecting the built-in preprocessor and lemmatizer
        #[arg(short, long)]
        lang: Option<String>,

        /// Named transform overriding the language preprocessor
        #[arg(long, value_name = "NAME")]
        preprocessor: Option<String>,

        /// Named transform overriding the language lemmatizer
        #[arg(long, value_name = "NAME")]
        lemmatizer: Option<String>,
    },

    /// Locate catalog phrases in prepared sources and export questions
    Generate {
        /// Phrase catalog CSV (section,phrase,answer)
        #[arg(short, long, value_name = "FILE")]
        phrases: PathBuf,

        /// Comma-separated files or directories holding prepared sources
        #[arg(short, long)]
        src: String,

        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,

        /// Language tag used when phrases are lemmatized before matching
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Remove every cached sidecar under the given sources
    Clean {
        #[arg(short, long)]
        src: String,
    },

    /// List built-in languages and named transforms
    Languages,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    word_quiz_generator::utils::logging::init_logger(cli.color, cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{}", format_error(&format!("{:#}", e)));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Make {
            src,
            lang,
            preprocessor,
            lemmatizer,
        } => {
            let transforms = build_transforms(
                &config,
                lang.as_deref(),
                preprocessor.as_deref(),
                lemmatizer.as_deref(),
            )?;
            cmd_make(config, transforms, &src).await?;
        }
        Commands::Generate {
            phrases,
            src,
            output,
            pretty,
            lang,
        } => {
            let transforms = build_transforms(&config, lang.as_deref(), None, None)?;
            cmd_generate(config, transforms, &phrases, &src, output, pretty).await?;
        }
        Commands::Clean { src } => {
            cmd_clean(&src)?;
        }
        Commands::Languages => {
            cmd_languages();
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        info!("Loading configuration from: {}", path.display());
        return Config::load(Some(path)).context("Failed to load configuration");
    }

    warn!(
        "Config file {} not found, using built-in defaults",
        path.display()
    );
    let config = Config::default_config();
    config.validate().context("Invalid built-in configuration")?;
    Ok(config)
}

fn build_transforms(
    config: &Config,
    lang: Option<&str>,
    preprocessor: Option<&str>,
    lemmatizer: Option<&str>,
) -> Result<TransformSet> {
    let registry = TransformRegistry::builtin();
    let lang = lang.unwrap_or(&config.pipeline.language);

    let mut transforms = registry
        .transform_set(lang)
        .with_context(|| format!("Cannot select transforms for '{}'", lang))?;

    if let Some(name) = preprocessor {
        transforms = transforms.with_preprocessor(registry.require(name)?);
    }
    if let Some(name) = lemmatizer {
        transforms = transforms.with_lemmatizer(registry.require(name)?);
    }

    Ok(transforms)
}

async fn cmd_make(config: Config, transforms: TransformSet, src: &str) -> Result<()> {
    info!("Preparing sources: {}", src);

    let orchestrator = PipelineOrchestrator::new(config, transforms);
    let stats = orchestrator
        .make(src)
        .await
        .context("Failed to prepare sources")?;

    if stats.files_failed > 0 {
        println!(
            "{}",
            format_warning(&format!("{} files could not be prepared", stats.files_failed))
        );
    }
    println!("{}", format_success(&stats.summary()));

    Ok(())
}

async fn cmd_generate(
    config: Config,
    transforms: TransformSet,
    phrases: &Path,
    src: &str,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    Validator::validate_file_path(phrases)?;

    let output_dir = output.unwrap_or_else(|| config.output.directory.clone());
    let pretty = pretty || config.output.pretty;

    println!("{}", format_step(1, 3, "Loading phrase catalog"));
    let catalog = PhraseCatalog::from_path(phrases).context("Failed to read phrase catalog")?;

    println!("{}", format_step(2, 3, "Locating phrases in sources"));
    let orchestrator = PipelineOrchestrator::new(config, transforms);
    let outcome = orchestrator
        .generate(catalog, src)
        .await
        .context("Question generation failed")?;

    println!("{}", format_step(3, 3, "Exporting questions"));
    let exporter = JsonExporter::new(&output_dir, pretty)?;
    let manifest = exporter.export(&outcome.questions, &outcome.unanswerable)?;

    for (section, questions) in outcome.questions.by_section() {
        println!(
            "{}",
            format_info(&format!("Section {}: {} questions", section, questions.len()))
        );
    }

    for phrase in &outcome.unanswerable {
        println!(
            "{}",
            format_warning(&format!(
                "Not found in any source: [{}] {}",
                phrase.section,
                Validator::truncate_text(&phrase.phrase, 60)
            ))
        );
    }

    println!(
        "{}",
        format_success(&format!(
            "{} questions from {} sources written to {}",
            manifest.total_questions,
            outcome.sources_loaded,
            exporter.output_dir().display()
        ))
    );

    Ok(())
}

fn cmd_clean(src: &str) -> Result<()> {
    let removed = clean_sidecars(src).context("Failed to clean sidecars")?;
    println!(
        "{}",
        format_success(&format!("Removed {} sidecar files", removed))
    );
    Ok(())
}

fn cmd_languages() {
    let registry = TransformRegistry::builtin();

    for entry in registry.languages() {
        println!(
            "{:<6} {:<14} preprocessor={} lemmatizer={}",
            entry.tag,
            entry.description,
            entry.preprocessor.unwrap_or("-"),
            entry.lemmatizer.unwrap_or("-")
        );
    }

    println!("transforms: {}", registry.transform_names().join(", "));
}
