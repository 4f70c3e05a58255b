//! Batch run: drive the processor with a progress spinner and print the summary.

use cropthumb_core::{Config, ImageProcessor, RunSummary};

/// Walk the source tree and thumbnail every candidate.
///
/// Per-file failures end up in the summary; only configuration and walk
/// errors come back as `Err`.
pub fn execute(config: &Config, json_summary: bool) -> anyhow::Result<()> {
    tracing::info!(
        "Cropping {:?} into {:?} ({}x{}, policy {})",
        config.source_dir,
        config.dest_dir,
        config.thumbnail.width,
        config.thumbnail.height,
        config.thumbnail.crop_policy
    );

    let processor = ImageProcessor::new(config);
    let progress = create_spinner();
    let start = std::time::Instant::now();
    let mut processed: u64 = 0;

    let result = processor.run(|file, outcome| {
        processed += 1;
        if outcome.is_ok() {
            progress.set_message(format!(
                "{} ({:.1} img/sec)",
                file.basename().to_string_lossy(),
                rate(processed, start.elapsed())
            ));
        }
        progress.inc(1);
    });

    progress.finish_and_clear();
    let summary = result?;

    if summary.total() == 0 {
        tracing::warn!("No supported image files found under {:?}", config.source_dir);
    }

    if json_summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_summary(&summary));
    }

    Ok(())
}

fn rate(count: u64, elapsed: std::time::Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        count as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}

/// Create a spinner; the walk is lazy so there is no total to show.
fn create_spinner() -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} image(s) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(120));
    pb.set_message("starting...");
    pb
}

/// Format the summary table, listing every failed file.
fn render_summary(summary: &RunSummary) -> String {
    use std::fmt::Write;

    let elapsed = std::time::Duration::from_millis(summary.duration_ms);
    let mb_written = summary.bytes_written as f64 / 1_000_000.0;

    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "  ====================================");
    let _ = writeln!(out, "               Summary");
    let _ = writeln!(out, "  ====================================");
    let _ = writeln!(out, "    Written:      {:>8}", summary.succeeded);
    if !summary.failed.is_empty() {
        let _ = writeln!(out, "    Failed:       {:>8}", summary.failed.len());
    }
    let _ = writeln!(out, "  ------------------------------------");
    let _ = writeln!(out, "    Total:        {:>8}", summary.total());
    let _ = writeln!(out, "    Output:       {:>7.1} MB", mb_written);
    let _ = writeln!(out, "    Duration:     {:>7.1}s", elapsed.as_secs_f64());
    let _ = writeln!(
        out,
        "    Rate:         {:>7.1} img/sec",
        rate(summary.total(), elapsed)
    );
    let _ = writeln!(out, "  ====================================");

    for failed in &summary.failed {
        let _ = writeln!(out, "Error processing {}: {}", failed.path.display(), failed.error);
    }
    out
}
