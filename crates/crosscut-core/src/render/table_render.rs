use crate::errors::Result;
use crate::model::{DimensionKind, MetricResult, MetricType, MetricValue, Table, Warning};

const OVERALL_LABEL: &str = "All";

/// Render a table to Markdown
///
/// Layout:
/// - Title as H1 with the cut id
/// - Metric, question, dimension and base lines
/// - One pipe-table row per result row (one per code for frequencies)
/// - Table-level then row-level warnings as bullets
///
/// The header follows the table's metric, so an empty table still gets
/// its metric's columns. Non-finite values render as `n/a` and pipes in
/// labels are escaped.
pub fn render_table_markdown(table: &Table) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", table.cut_id));
    output.push_str(&format!("- Metric: {}\n", table.metric_type));
    output.push_str(&format!("- Question: {}\n", table.question_id));
    if let Some(dimension) = &table.dimension {
        let kind = match dimension.kind {
            DimensionKind::Question => "question",
            DimensionKind::Segment => "segment",
        };
        output.push_str(&format!("- Dimension: {}:{}\n", kind, dimension.id));
    }
    output.push_str(&format!("- Base N: {}\n", table.base_n));
    if let Some(weighted) = table.weighted_base {
        output.push_str(&format!("- Weighted base: {}\n", fmt_num(weighted)));
    }
    output.push('\n');

    let header = header_for(table.metric_type);
    output.push_str(&format!("| {} |\n", header.join(" | ")));
    output.push_str(&format!("|{}\n", "---|".repeat(header.len())));

    for row in &table.rows {
        for cells in row_cells(row) {
            output.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
    }

    let row_warnings: Vec<(&str, &Warning)> = table
        .rows
        .iter()
        .flat_map(|row| {
            let label = row.dimension_label.as_deref().unwrap_or(OVERALL_LABEL);
            row.warnings.iter().map(move |w| (label, w))
        })
        .collect();

    if !table.warnings.is_empty() || !row_warnings.is_empty() {
        output.push_str("\n## Warnings\n\n");
        for warning in &table.warnings {
            output.push_str(&format!(
                "- {}: {}\n",
                warning.severity.as_str(),
                warning.message
            ));
        }
        for (label, warning) in row_warnings {
            output.push_str(&format!(
                "- [{}] {}: {}\n",
                label,
                warning.severity.as_str(),
                warning.message
            ));
        }
    }

    output
}

/// Render a table to pretty-printed JSON
///
/// # Errors
/// `Serialization` if encoding fails.
pub fn render_table_json(table: &Table) -> Result<String> {
    Ok(serde_json::to_string_pretty(table)?)
}

fn header_for(metric_type: MetricType) -> &'static [&'static str] {
    match metric_type {
        MetricType::Frequency => &["Group", "Value", "Label", "Count", "%", "Base N"],
        MetricType::Mean => &["Group", "Mean", "Std", "Min", "Max", "Base N"],
        MetricType::Top2Box | MetricType::Bottom2Box => &["Group", "%", "Count", "Base N"],
        MetricType::Nps => &[
            "Group",
            "NPS",
            "Promoters %",
            "Passives %",
            "Detractors %",
            "Base N",
        ],
    }
}

/// Escape text placed inside a pipe-table cell
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn row_cells(row: &MetricResult) -> Vec<Vec<String>> {
    let group = cell(row.dimension_label.as_deref().unwrap_or(OVERALL_LABEL));
    let base = row.base_n.to_string();

    match &row.value {
        MetricValue::Frequency { distribution } if distribution.is_empty() => vec![vec![
            group,
            "n/a".to_string(),
            "n/a".to_string(),
            "0".to_string(),
            "n/a".to_string(),
            base,
        ]],
        MetricValue::Frequency { distribution } => distribution
            .iter()
            .map(|f| {
                vec![
                    group.clone(),
                    cell(&f.value.as_code()),
                    cell(&f.label),
                    f.count.to_string(),
                    fmt_num(f.percentage),
                    base.clone(),
                ]
            })
            .collect(),
        MetricValue::Mean(stats) => vec![vec![
            group,
            fmt_num(stats.mean),
            fmt_num(stats.std),
            fmt_num(stats.min),
            fmt_num(stats.max),
            base,
        ]],
        MetricValue::Top2Box(score) | MetricValue::Bottom2Box(score) => {
            vec![vec![group, fmt_num(score.pct), score.count.to_string(), base]]
        }
        MetricValue::Nps(score) => vec![vec![
            group,
            fmt_num(score.nps),
            fmt_num(score.promoters_pct),
            fmt_num(score.passives_pct),
            fmt_num(score.detractors_pct),
            base,
        ]],
    }
}

fn fmt_num(value: f64) -> String {
    if value.is_finite() {
        format!("{}", value)
    } else {
        "n/a".to_string()
    }
}
