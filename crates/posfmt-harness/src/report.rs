//! Conformance report generation (markdown + JSON).

use serde::Serialize;

use crate::runner::VerificationResult;

#[derive(Debug, Clone, Serialize)]
pub struct ConformanceReport {
    pub title: String,
    pub campaign: String,
    pub timestamp: String,
    pub total_cases: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<VerificationResult>,
}

impl ConformanceReport {
    #[must_use]
    pub fn new(
        campaign: impl Into<String>,
        timestamp: impl Into<String>,
        results: Vec<VerificationResult>,
    ) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            title: "posfmt conformance report".to_string(),
            campaign: campaign.into(),
            timestamp: timestamp.into(),
            total_cases: results.len(),
            passed,
            failed: results.len() - passed,
            results,
        }
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Render as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str(&format!("# {}\n\n", self.title));
        md.push_str(&format!("- Campaign: {}\n", self.campaign));
        md.push_str(&format!("- Timestamp: {}\n", self.timestamp));
        md.push_str(&format!(
            "- Cases: {} total, {} passed, {} failed\n\n",
            self.total_cases, self.passed, self.failed
        ));
        md.push_str("| Family | Case | Policy | Status |\n");
        md.push_str("|--------|------|--------|--------|\n");
        for r in &self.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                r.family, r.case_name, r.policy, status
            ));
        }

        let failures: Vec<_> = self.results.iter().filter(|r| !r.passed).collect();
        if !failures.is_empty() {
            md.push_str("\n## Failures\n");
            for r in failures {
                md.push_str(&format!("\n### {} / {}\n\n```\n", r.family, r.case_name));
                md.push_str(r.diff.as_deref().unwrap_or(""));
                md.push_str("\n```\n");
            }
        }
        md
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
