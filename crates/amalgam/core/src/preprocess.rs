//! Top-level entry points: expand a file into an output file or any writer.

use crate::error::{PreprocessError, Result};
use crate::expander::{ExpandOptions, Expander, ExpansionStats};
use crate::search_path::SearchPath;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Flatten `input` and everything it includes into `output`.
///
/// `output` is created or truncated only after `input` has been opened
/// successfully. On failure the output keeps whatever was written before the
/// failing directive.
pub fn preprocess(
    input: &Path,
    output: &Path,
    search_path: &SearchPath,
    options: ExpandOptions,
) -> Result<ExpansionStats> {
    File::open(input).map_err(|source| PreprocessError::OpenInput {
        path: input.to_path_buf(),
        source,
    })?;

    let file = File::create(output).map_err(|source| PreprocessError::CreateOutput {
        path: output.to_path_buf(),
        source,
    })?;
    let mut sink = BufWriter::new(file);

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        search_dirs = search_path.len(),
        "preprocessing"
    );
    preprocess_into(input, &mut sink, search_path, options)
}

/// Expand `input` into an arbitrary sink. The sink is flushed whether or not
/// expansion succeeds.
pub fn preprocess_into<W: Write>(
    input: &Path,
    sink: &mut W,
    search_path: &SearchPath,
    options: ExpandOptions,
) -> Result<ExpansionStats> {
    let result = Expander::new(search_path, options, sink)?.expand(input);
    let flushed = sink.flush().map_err(PreprocessError::Write);

    let stats = result?;
    flushed?;
    tracing::info!(
        files = stats.files_expanded,
        lines = stats.lines_written,
        max_depth = stats.max_depth_reached,
        "expansion complete"
    );
    Ok(stats)
}
