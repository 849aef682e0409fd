//! Single page OCR check - run with: cargo run -p vokab-ocr --bin test_ocr -- book.pdf 17

use std::path::PathBuf;

use anyhow::{Context, Result};
use vokab_config::ocr::OcrConfig;
use vokab_types::PageRange;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let document = PathBuf::from(args.next().context("usage: test_ocr <document.pdf> [page]")?);
    let page: u32 = args
        .next()
        .map(|p| p.parse())
        .transpose()
        .context("page must be a number")?
        .unwrap_or(1);

    let config = OcrConfig {
        document: document.clone(),
        pages: vec![PageRange::new(page, page)?],
        ..OcrConfig::default()
    };

    tracing::debug!("=== OCR Test: {} page {} ===", document.display(), page);
    let start = std::time::Instant::now();
    let mut extractor = vokab_ocr::PageExtractor::new(&config)?;
    let text = extractor.extract(&document)?;
    tracing::debug!("{:?} - {} chars", start.elapsed(), text.len());

    for line in text.lines().filter(|l| !l.trim().is_empty()).take(5) {
        tracing::debug!("   > {}", line);
    }

    tracing::debug!("=== Done ===");
    Ok(())
}
