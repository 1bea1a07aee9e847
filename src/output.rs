//! CLI output for errors, warnings, and run statistics.
//!
//! Errors and warnings go to stderr with a fixed prefix so they stand out
//! from the command echo on stdout. The statistics block printed after a run
//! mirrors the counters in [`RunStats`]:
//!
//! ```text
//! Files found      =   12
//! Files converted  =   11
//! Files per second =    0.52
//! Time per file    =    1.92 sec
//! Total time       =   23.08 sec
//! ```
//!
//! When sources existed but nothing matched the supported extensions, the
//! stats are replaced by a notice listing the accepted file types.
//!
//! Each block has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::config::ConvertConfig;
use crate::walker::RunStats;

/// Print an error to stderr. The run usually continues; fatal conditions are
/// propagated as errors instead of passing through here.
pub fn error(message: &str) {
    eprintln!("error: {message}");
}

/// Print a warning to stderr.
pub fn warn(message: &str) {
    eprintln!("warning: {message}");
}

/// Format the end-of-run statistics block.
pub fn format_stats(stats: &RunStats, config: &ConvertConfig) -> Vec<String> {
    if stats.files_found == 0 {
        if !stats.source_found {
            return Vec::new();
        }
        let mut lines = vec!["Supported images not found. Supported file types:".to_string()];
        lines.extend(config.extensions.iter().map(|ext| format!(" .{ext}")));
        return lines;
    }

    let total_time = stats.elapsed.as_secs_f64();
    let (files_per_sec, sec_per_file) = if total_time > 0.0 && stats.files_converted > 0 {
        (
            format!("{:7.2}", stats.files_converted as f64 / total_time),
            format!("{:7.2}", total_time / stats.files_converted as f64),
        )
    } else {
        ("    ???".to_string(), "    ???".to_string())
    };

    vec![
        format!("Files found      = {:4}", stats.files_found),
        format!("Files converted  = {:4}", stats.files_converted),
        format!("Files per second = {files_per_sec}"),
        format!("Time per file    = {sec_per_file} sec"),
        format!("Total time       = {total_time:7.2} sec"),
    ]
}

/// Print the statistics block to stdout.
pub fn print_stats(stats: &RunStats, config: &ConvertConfig) {
    let lines = format_stats(stats, config);
    if lines.is_empty() {
        return;
    }
    println!();
    for line in lines {
        println!("{line}");
    }
}
