use crate::fragkon::{cpg_indices, ExtractionStats, FragKonOptions, FragKonWriter, WindowExtractor};
use crate::pileup::{Annotator, PileupReader, PositionRecord};
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Duration;

const REPORT_INTERVAL: u64 = 250_000;
const PARSE_REFRESH_ROWS: usize = 1 << 16;
const PROGRESS_REFRESH_ROWS: u64 = 1 << 12;

pub fn run(input_file: String, output_file: String) -> Result<()> {
    let options = FragKonOptions::new(input_file, output_file);
    options.validate()?;
    extract_fragkons(&options)?;
    Ok(())
}

/// Reads and annotates the whole pileup, then writes one fragmentation
/// context row per usable CpG.
pub fn extract_fragkons(options: &FragKonOptions) -> Result<ExtractionStats> {
    let table = parse_pileup(options)?;
    write_fragkons(&table, options)
}

fn parse_pileup(options: &FragKonOptions) -> Result<Vec<PositionRecord>> {
    info!("Parsing pileup file {}", options.input.display());
    let progress = ProgressBarBuilder::new("Parsing pileup...")
        .with_template("{spinner:.green} [{elapsed_precise}] {msg} {human_pos} positions")
        .with_tick(Duration::from_millis(200))
        .build()?;

    let reader = PileupReader::from_path(&options.input)?;
    let mut annotator = Annotator::new();
    let mut table = Vec::new();
    for row in reader {
        let row = row.with_context(|| format!("Failed to parse {}", options.input.display()))?;
        table.push(annotator.annotate(&row));
        if table.len() % PARSE_REFRESH_ROWS == 0 {
            progress.set_position(table.len() as u64);
        }
    }

    progress.set_position(table.len() as u64);
    progress.finish_with_message("Parsed");

    let max = annotator.max_termini();
    info!("Parsed {} positions", table.len());
    info!(
        "Max termini per position: forward starts {}, forward ends {}, reverse starts {}, reverse ends {}; max coverage {}",
        max.for_starts,
        max.for_ends,
        max.rev_starts,
        max.rev_ends,
        annotator.max_coverage()
    );
    Ok(table)
}

fn write_fragkons(table: &[PositionRecord], options: &FragKonOptions) -> Result<ExtractionStats> {
    let total = cpg_indices(table).count() as u64;
    info!("Iterating through {} CpG sites", total);

    let progress = ProgressBarBuilder::new("Extracting CpG windows")
        .with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .with_length(total)
        .build()?;

    let mut writer = FragKonWriter::from_path(&options.output)?;
    let mut extractor = WindowExtractor::new(table);
    let mut next_report = 0;
    while let Some(window) = extractor.next() {
        writer.write_window(&window)?;

        let detected = extractor.stats().detected;
        if writer.rows_written() % PROGRESS_REFRESH_ROWS == 0 {
            progress.set_position(detected);
        }
        if detected > next_report {
            progress.suspend(|| {
                info!(
                    "Processing CpG {}/{} at {}",
                    detected,
                    total,
                    window.cpg_id()
                )
            });
            next_report = (detected / REPORT_INTERVAL + 1) * REPORT_INTERVAL;
        }
    }
    writer
        .finish()
        .with_context(|| format!("Failed to write {}", options.output.display()))?;

    let stats = extractor.stats();
    progress.set_position(stats.detected);
    progress.finish_with_message("Complete");

    info!("Total Number of CpGs Identified: {}", stats.detected);
    info!("Total Number of CpGs Successfully Processed: {}", stats.emitted);
    info!("Total Number of CpGs Skipped: {}", stats.skipped());
    debug!(
        "Skipped CpGs: {} near table start, {} near table end, {} with position gaps, {} across chromosomes",
        stats.before_start, stats.past_end, stats.coordinate_gap, stats.contig_boundary
    );
    info!("Wrote {}", options.output.display());

    Ok(stats)
}
