use serde::Serialize;

/// Document title of the batch report.
pub const REPORT_TITLE: &str = "Code Error Explanation Report";

/// Result of analyzing one file.
#[derive(Debug, Clone, Serialize)]
pub enum Outcome {
    /// Explanation text returned by the provider
    Explained(String),
    /// Reason the analysis failed
    Failed(String),
}

/// One analyzed file in the batch report.
///
/// The position in the entry list carries the ordering index; rendering
/// numbers cases 1-based from that position. Failed analyses keep their
/// entry so the report never silently drops a file.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub filename: String,
    pub code: String,
    pub outcome: Outcome,
}

impl ReportEntry {
    pub fn explained(
        filename: impl Into<String>,
        code: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            code: code.into(),
            outcome: Outcome::Explained(explanation.into()),
        }
    }

    pub fn failed(filename: impl Into<String>, code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            code: code.into(),
            outcome: Outcome::Failed(reason.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }
}

/// Render the batch report as a single Markdown document.
///
/// Entries appear in slice order, numbered from 1: a document title, then
/// per file a "Case N" section with the original code in a fenced block
/// followed by the explanation text verbatim, or a failure notice for
/// entries whose analysis did not succeed.
pub fn render_markdown(entries: &[ReportEntry], language: &str) -> String {
    let mut doc = String::new();

    doc.push_str(&format!("# {REPORT_TITLE}\n\n"));
    doc.push_str("---\n\n");

    for (index, entry) in entries.iter().enumerate() {
        doc.push_str(&format!("## Case {}: {}\n\n", index + 1, entry.filename));
        doc.push_str("### Original Code\n");
        doc.push_str(&format!("```{language}\n{}\n```\n\n", entry.code));
        doc.push_str("### AI Assistant Explanation\n");
        match &entry.outcome {
            Outcome::Explained(text) => doc.push_str(text),
            Outcome::Failed(reason) => doc.push_str(&format!("> Analysis failed: {reason}")),
        }
        doc.push_str("\n\n---\n\n");
    }

    doc
}
