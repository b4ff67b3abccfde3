//! Human-readable summary renderer for comparison results.

use crate::compare::model::{ComparisonResult, DiffEntry, DuplicateName, TypeIssueEntry};
use crate::model::value_label;
use nodediff_core_types::{is_secret_field, Sensitive};
use serde_json::Value;
use std::collections::BTreeMap;

const RULE: &str = "================================================================================";
const THIN_RULE: &str = "--------------------------------------------------------------------------------";

/// Duplicate names listed per side before collapsing into "... and N more"
const DUPLICATE_LIST_LIMIT: usize = 5;

/// Renderer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Example diffs shown per protocol type in the actual-issue section
    pub max_examples: usize,
    /// Example diffs shown per protocol type in the all-differences section
    pub max_type_examples: usize,
    /// Print credential fields as `***REDACTED***`
    pub redact_secrets: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_examples: 3,
            max_type_examples: 5,
            redact_secrets: false,
        }
    }
}

/// Overall grade derived from the quality score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityGrade {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl QualityGrade {
    pub fn from_score(score: f64) -> Self {
        if score >= 95.0 {
            QualityGrade::Excellent
        } else if score >= 80.0 {
            QualityGrade::Good
        } else if score >= 60.0 {
            QualityGrade::Fair
        } else {
            QualityGrade::NeedsImprovement
        }
    }

    fn verdict(&self) -> (&'static str, &'static str) {
        match self {
            QualityGrade::Excellent => (
                "Excellent",
                "Nearly all differences match mihomo semantics; the conversion logic is sound.",
            ),
            QualityGrade::Good => (
                "Good",
                "Most differences match mihomo semantics; a few need confirmation.",
            ),
            QualityGrade::Fair => (
                "Fair",
                "Many differences need attention; review the conversion logic.",
            ),
            QualityGrade::NeedsImprovement => (
                "Needs improvement",
                "Large numbers of differences; inspect the conversion logic carefully.",
            ),
        }
    }
}

fn render_value(field: &str, value: &Value, options: &SummaryOptions) -> String {
    if options.redact_secrets && is_secret_field(field) {
        Sensitive::new(value).to_string()
    } else {
        value_label(value)
    }
}

fn section(out: &mut String, title: &str) {
    out.push_str(RULE);
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
}

fn render_duplicates(out: &mut String, side: &str, duplicates: &[DuplicateName]) {
    if duplicates.is_empty() {
        return;
    }
    out.push_str(&format!(
        "WARNING: {} duplicate node name(s) in the {} set:\n",
        duplicates.len(),
        side
    ));
    for dup in duplicates.iter().take(DUPLICATE_LIST_LIMIT) {
        out.push_str(&format!("  - {} ({} occurrences)\n", dup.name, dup.count));
    }
    if duplicates.len() > DUPLICATE_LIST_LIMIT {
        out.push_str(&format!(
            "  ... and {} more\n",
            duplicates.len() - DUPLICATE_LIST_LIMIT
        ));
    }
    out.push('\n');
}

/// Group entries by reason, keeping first-seen reason order
fn group_by_reason(diffs: &[DiffEntry]) -> Vec<(&str, Vec<&DiffEntry>)> {
    let mut groups: Vec<(&str, Vec<&DiffEntry>)> = Vec::new();
    for diff in diffs {
        let reason = diff.reason.as_deref().unwrap_or_default();
        match groups.iter_mut().find(|(r, _)| *r == reason) {
            Some((_, items)) => items.push(diff),
            None => groups.push((reason, vec![diff])),
        }
    }
    groups
}

fn field_counts<'a>(fields: impl Iterator<Item = &'a str>) -> BTreeMap<&'a str, usize> {
    let mut counts = BTreeMap::new();
    for field in fields {
        *counts.entry(field).or_insert(0) += 1;
    }
    counts
}

fn render_field_counts<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    let counts: Vec<String> = field_counts(fields)
        .into_iter()
        .map(|(field, count)| format!("{}: {}", field, count))
        .collect();
    out.push_str(&format!("  fields: {}\n", counts.join(", ")));
}

fn render_legitimate(out: &mut String, result: &ComparisonResult) {
    if result.legitimate_diffs.is_empty() {
        return;
    }
    section(out, "Legitimate differences (mihomo-compliant)");
    for (node_type, diffs) in &result.legitimate_diffs {
        out.push_str(&format!(
            "\n[{}] {} legitimate difference(s)\n",
            node_type,
            diffs.len()
        ));
        out.push_str(THIN_RULE);
        out.push('\n');

        for (reason, items) in group_by_reason(diffs) {
            out.push_str(&format!("\n  * {}\n", reason));
            out.push_str(&format!("    affected nodes: {}\n", items.len()));
            let shown = if items.len() <= 3 { items.len() } else { 2 };
            for item in items.iter().take(shown) {
                out.push_str(&format!("      - {}\n", item.name));
            }
            if items.len() > shown {
                out.push_str(&format!("      ... and {} more\n", items.len() - shown));
            }
        }
    }
    out.push('\n');
}

fn render_actual(out: &mut String, result: &ComparisonResult, options: &SummaryOptions) {
    if result.actual_issues.is_empty() {
        return;
    }
    section(out, "Differences needing attention");
    for (node_type, issues) in &result.actual_issues {
        out.push_str(&format!(
            "\n[{}] {} difference(s) needing attention\n",
            node_type,
            issues.len()
        ));
        out.push_str(THIN_RULE);
        out.push('\n');

        render_field_counts(out, issues.iter().map(|e| e.field.as_str()));

        out.push_str(&format!(
            "\n  examples (up to {}):\n",
            options.max_examples
        ));
        for (i, issue) in issues.iter().take(options.max_examples).enumerate() {
            out.push_str(&format!("\n  {}. node: {}\n", i + 1, issue.name));
            out.push_str(&format!("     field:  {}\n", issue.field));
            out.push_str(&format!(
                "     before: {}\n",
                render_value(&issue.field, &issue.before, options)
            ));
            out.push_str(&format!(
                "     after:  {}\n",
                render_value(&issue.field, &issue.after, options)
            ));
        }
    }
    out.push('\n');
}

fn verdict_marker(entry: &TypeIssueEntry) -> &'static str {
    if entry.is_legitimate {
        "[legitimate]"
    } else {
        "[attention]"
    }
}

fn render_type_issues(out: &mut String, result: &ComparisonResult, options: &SummaryOptions) {
    if result.type_issues.is_empty() {
        return;
    }
    section(out, "All differences by node type");
    for (node_type, entries) in &result.type_issues {
        out.push_str(&format!(
            "\n[{}] {} difference(s)\n",
            node_type,
            entries.len()
        ));
        out.push_str(THIN_RULE);
        out.push('\n');

        render_field_counts(out, entries.iter().map(|e| e.field.as_str()));

        out.push_str(&format!(
            "\n  examples (up to {}):\n",
            options.max_type_examples
        ));
        for (i, entry) in entries.iter().take(options.max_type_examples).enumerate() {
            out.push_str(&format!(
                "\n  {}. {} node: {}\n",
                i + 1,
                verdict_marker(entry),
                entry.name
            ));
            out.push_str(&format!("     field:  {}\n", entry.field));
            out.push_str(&format!(
                "     before: {}\n",
                render_value(&entry.field, &entry.before, options)
            ));
            out.push_str(&format!(
                "     after:  {}\n",
                render_value(&entry.field, &entry.after, options)
            ));
            if entry.is_legitimate && !entry.reason.is_empty() {
                out.push_str(&format!("     reason: {}\n", entry.reason));
            }
        }
    }
    out.push('\n');
}

/// Targeted advice for the fields that most often point at a converter bug
pub fn suggestions(result: &ComparisonResult) -> Vec<String> {
    let mut out = Vec::new();
    for (node_type, issues) in &result.actual_issues {
        for (field, count) in field_counts(issues.iter().map(|e| e.field.as_str())) {
            match field {
                "ws-opts" if node_type == "trojan" => {
                    out.push(format!(
                        "Trojan WebSocket config: {} node(s) with ws-opts differences",
                        count
                    ));
                    out.push(
                        "  check whether headers.Host was missing before conversion and whether the added value is correct"
                            .to_string(),
                    );
                }
                "ws-opts" if node_type == "vmess" => {
                    out.push(format!("VMess early-data config: {} node(s)", count));
                    out.push("  confirm the early-data parameter is parsed as expected".to_string());
                }
                "port" => {
                    out.push(format!("{} port field: {} node(s) differ", node_type, count));
                    out.push("  check port parsing and export".to_string());
                }
                "uuid" => {
                    out.push(format!("{} UUID field: {} node(s) differ", node_type, count));
                    out.push("  check UUID formatting".to_string());
                }
                "password" => {
                    out.push(format!(
                        "{} password field: {} node(s) differ",
                        node_type, count
                    ));
                    out.push("  check password encoding and special-character handling".to_string());
                }
                _ => {}
            }
        }
    }
    out
}

/// Render a plain-text summary of a [`ComparisonResult`].
///
/// Informational only; the structured result is the source of truth.
pub fn render_human_summary(result: &ComparisonResult, options: &SummaryOptions) -> String {
    let mut out = String::new();
    let stats = &result.stats;

    section(&mut out, "Node conversion comparison report");
    out.push('\n');
    out.push_str(&format!("Nodes before conversion: {}\n", stats.total_before));
    out.push_str(&format!("Nodes after conversion:  {}\n", stats.total_after));
    out.push_str(&format!("Common nodes:            {}\n", stats.common.len()));
    out.push_str(&format!("Missing nodes:           {}\n", stats.missing.len()));
    out.push_str(&format!("New nodes:               {}\n", stats.new.len()));
    out.push('\n');

    render_duplicates(&mut out, "before", &result.duplicates.before);
    render_duplicates(&mut out, "after", &result.duplicates.after);

    let total_diffs = result.total_diffs();
    let total_legitimate = result.total_legitimate();
    let total_actual = result.total_actual();

    section(&mut out, "Difference classification");
    out.push_str(&format!("Total differences: {}\n", total_diffs));
    out.push_str(&format!("  legitimate (mihomo-compliant): {}\n", total_legitimate));
    out.push_str(&format!("  needing attention:             {}\n", total_actual));
    out.push('\n');

    section(&mut out, "Field differences (occurrences)");
    let mut fields: Vec<(&String, &usize)> = result.field_diffs.iter().collect();
    fields.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (field, count) in fields {
        out.push_str(&format!("{:30}: {:5}\n", field, count));
    }
    out.push('\n');

    render_legitimate(&mut out, result);
    render_actual(&mut out, result, options);
    render_type_issues(&mut out, result, options);

    section(&mut out, "Conversion quality");
    if let Some(score) = result.quality_score() {
        let (grade, detail) = QualityGrade::from_score(score).verdict();
        out.push_str(&format!("\nQuality score: {:.1}%\n", score));
        out.push_str(&format!("  - legitimate: {}\n", total_legitimate));
        out.push_str(&format!("  - needing attention: {}\n", total_actual));
        out.push_str(&format!("\nGrade: {}\n  {}\n", grade, detail));
    } else {
        out.push_str("\nNo field differences between matched nodes.\n");
    }
    out.push('\n');

    section(&mut out, "Suggestions");
    if !result.has_actual_issues() {
        out.push_str("\nAll differences are legitimate; nothing to fix.\n");
    } else {
        let advice = suggestions(result);
        if advice.is_empty() {
            out.push_str("\nA few differences found; confirm manually whether they are expected.\n");
        } else {
            for line in advice {
                out.push_str(&format!("\n{}", line));
            }
            out.push('\n');
        }
    }
    out.push('\n');

    section(&mut out, "References");
    out.push_str("mihomo documentation: https://wiki.metacubex.one/config/\n");
    out.push_str("  - proxies:   https://wiki.metacubex.one/config/proxies/\n");
    out.push_str("  - VLESS:     https://wiki.metacubex.one/config/proxies/vless/\n");
    out.push_str("  - VMess:     https://wiki.metacubex.one/config/proxies/vmess/\n");
    out.push_str("  - Trojan:    https://wiki.metacubex.one/config/proxies/trojan/\n");
    out.push_str("  - TLS:       https://wiki.metacubex.one/config/proxies/tls/\n");
    out.push_str("  - transport: https://wiki.metacubex.one/config/proxies/transport/\n");
    out.push_str(RULE);
    out.push('\n');

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(QualityGrade::from_score(100.0), QualityGrade::Excellent);
        assert_eq!(QualityGrade::from_score(95.0), QualityGrade::Excellent);
        assert_eq!(QualityGrade::from_score(94.9), QualityGrade::Good);
        assert_eq!(QualityGrade::from_score(80.0), QualityGrade::Good);
        assert_eq!(QualityGrade::from_score(60.0), QualityGrade::Fair);
        assert_eq!(QualityGrade::from_score(59.9), QualityGrade::NeedsImprovement);
    }

    #[test]
    fn test_group_by_reason_keeps_first_seen_order() {
        let entry = |name: &str, reason: &str| DiffEntry {
            name: name.to_string(),
            field: "flow".to_string(),
            before: Value::Null,
            after: Value::Null,
            reason: Some(reason.to_string()),
        };
        let diffs = vec![entry("a", "r2"), entry("b", "r1"), entry("c", "r2")];
        let groups = group_by_reason(&diffs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "r2");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "r1");
    }

    #[test]
    fn test_render_value_redacts_only_secret_fields() {
        let options = SummaryOptions {
            redact_secrets: true,
            ..SummaryOptions::default()
        };
        let secret = Value::String("hunter2".to_string());
        assert_eq!(render_value("password", &secret, &options), "***REDACTED***");
        assert_eq!(render_value("server", &secret, &options), "hunter2");
        assert_eq!(
            render_value("password", &secret, &SummaryOptions::default()),
            "hunter2"
        );
    }
}
