use super::domain::ScoredLead;

pub const EXPORT_COLUMNS: [&str; 6] = ["name", "role", "company", "intent", "score", "reason"];
pub const EXPORT_FILENAME: &str = "results.csv";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No results to export.")]
    Empty,
    #[error("failed to render results CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush results CSV: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders results as CSV: a bare header line followed by fully quoted rows, `\n` separated.
pub fn render_results_csv(results: &[ScoredLead]) -> Result<Vec<u8>, ExportError> {
    if results.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut output = EXPORT_COLUMNS.join(",").into_bytes();
    output.push(b'\n');

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(output);

    for result in results {
        let score = result.score.to_string();
        writer.write_record([
            result.name.as_str(),
            result.role.as_str(),
            result.company.as_str(),
            result.intent.label(),
            score.as_str(),
            result.reason.as_str(),
        ])?;
    }

    let mut output = writer.into_inner().map_err(|err| err.into_error())?;
    if output.last() == Some(&b'\n') {
        output.pop();
    }

    Ok(output)
}
