//! Run report rendering
//!
//! The Markdown report summarizes a batch: table count, per-table summary
//! lines with table and row warnings, segment bases and failures. It
//! carries no timestamps so identical runs render identically.

use crate::commands::execute::ExecutionResult;
use crosscut_core::errors::Result;

const DIGEST_PREFIX_LEN: usize = 16;

/// Render a batch result as a Markdown run report
pub fn render_run_report(result: &ExecutionResult, dataset_digest: Option<&str>) -> String {
    let mut output = String::new();

    output.push_str("# Analysis Run Report\n\n");
    if let Some(digest) = dataset_digest {
        let short = digest.get(..DIGEST_PREFIX_LEN).unwrap_or(digest);
        output.push_str(&format!("**Dataset Hash:** {}...\n\n", short));
    }

    let status = if result.is_success() {
        "Success"
    } else {
        "Completed with errors"
    };
    output.push_str(&format!("## Status: {}\n\n", status));

    output.push_str("## Execution Results\n");
    output.push_str(&format!("**Tables Generated:** {}\n", result.tables.len()));
    if !result.failures.is_empty() {
        output.push_str(&format!("**Execution Errors:** {}\n", result.failures.len()));
    }
    output.push('\n');

    for table in &result.tables {
        output.push_str(&format!("### {}\n", table.cut_id));
        output.push_str(&format!("- Metric: {}\n", table.metric_type));
        output.push_str(&format!("- Question: {}\n", table.question_id));
        output.push_str(&format!("- Base N: {}\n", table.base_n));
        for warning in &table.warnings {
            output.push_str(&format!(
                "- Warning ({}): {}\n",
                warning.severity.as_str(),
                warning.message
            ));
        }
        for row in &table.rows {
            let label = row.dimension_label.as_deref().unwrap_or("All");
            for warning in &row.warnings {
                output.push_str(&format!(
                    "- Warning ({}) [{}]: {}\n",
                    warning.severity.as_str(),
                    label,
                    warning.message
                ));
            }
        }
        output.push('\n');
    }

    if !result.segment_bases.is_empty() {
        output.push_str("## Segments\n");
        for (segment_id, base) in &result.segment_bases {
            output.push_str(&format!("- {}: {}\n", segment_id, base));
        }
        output.push('\n');
    }

    if !result.failures.is_empty() {
        output.push_str("## Errors\n");
        for failure in &result.failures {
            output.push_str(&format!(
                "- {} [{}]: {}\n",
                failure.cut_id, failure.code, failure.message
            ));
        }
        output.push('\n');
    }

    output
}

/// Render a batch result as pretty-printed JSON
///
/// # Errors
///
/// `Serialization` if encoding fails.
pub fn render_result_json(result: &ExecutionResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
