use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use vokab_anki::AnkiConnectClient;
use vokab_config::Config;
use vokab_types::PageRange;

use crate::pipeline::{self, Review};
use crate::profile::{Overrides, load_profile};
use crate::terminal::{ReviewTerminal, wait_for_enter};

#[derive(Parser)]
#[command(name = "vokab")]
#[command(about = "Collect unfamiliar words from a scanned book and turn them into Anki cards")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults apply when it does not exist)
    #[arg(short, long, global = true, default_value = "vokab.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// OCR a PDF, review its words, translate the unknown ones
    Extract {
        /// PDF to read (overrides config)
        #[arg(short, long)]
        document: Option<PathBuf>,
        /// Inclusive page ranges such as 16-241 or 7
        #[arg(short, long, num_args = 1..)]
        pages: Vec<PageRange>,
    },

    /// Fill missing translations in an existing word CSV
    Translate {
        csv_file: PathBuf,
    },

    /// Build <deck>.apkg from a word CSV
    Export {
        csv_file: PathBuf,
        /// Directory for the package (overrides config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Also send the notes to a running Anki via AnkiConnect
        #[arg(long)]
        push: bool,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Extract { document, pages } => {
            let overrides = Overrides {
                document,
                pages,
                ..Overrides::default()
            };
            extract(&load_profile(&cli.config, overrides)?).await
        }
        Commands::Translate { csv_file } => {
            let config = load_profile(&cli.config, Overrides::default())?;
            translate(&config, &csv_file).await
        }
        Commands::Export {
            csv_file,
            out_dir,
            push,
        } => {
            let overrides = Overrides {
                out_dir,
                push,
                ..Overrides::default()
            };
            export(&load_profile(&cli.config, overrides)?, &csv_file).await
        }
    }
}

async fn extract(config: &Config) -> anyhow::Result<()> {
    let text = vokab_ocr::extract_text(&config.ocr).context("Text extraction failed")?;
    let words = pipeline::candidate_words(config, &text)?;

    let mut review = Review::prepare(config)?;
    wait_for_enter()?;

    let outcome = {
        let mut terminal = ReviewTerminal::open().context("Failed to open terminal")?;
        review.run(&words, &mut terminal.input, &mut terminal.screen)?
    };
    println!("Progress saved to files.");

    tracing::debug!("Review outcome: {:?}", outcome);

    if config.translator.enabled {
        let translator = vokab_translator::from_config(&config.translator)?;
        review.translate(translator.as_ref(), &config.translator).await?;
    } else {
        tracing::info!("Translation disabled, skipping");
    }

    println!(
        "Unknown words: {}",
        review.store.paths().unknown_words.display()
    );
    Ok(())
}

async fn translate(config: &Config, csv_file: &Path) -> anyhow::Result<()> {
    let translator = vokab_translator::from_config(&config.translator)?;
    let report = pipeline::translate_csv(translator.as_ref(), &config.translator, csv_file).await?;
    println!(
        "Translated {} words, {} failed",
        report.translated, report.failed
    );
    Ok(())
}

async fn export(config: &Config, csv_file: &Path) -> anyhow::Result<()> {
    let package = vokab_anki::export_csv(csv_file, &config.anki.out_dir)?;
    println!("Anki deck created: {}", package.display());

    if config.anki.push {
        let deck = vokab_anki::deck_from_csv(csv_file)?;
        let client = AnkiConnectClient::new(config.anki.url.clone());
        let report = vokab_anki::push_deck(&client, &deck)
            .await
            .context("Failed to push deck to Anki")?;
        println!(
            "Pushed {} notes to Anki ({} already present)",
            report.added, report.rejected
        );
    }

    Ok(())
}
