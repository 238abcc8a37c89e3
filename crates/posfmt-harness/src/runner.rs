//! Test execution engine.

use std::time::Instant;

use posfmt_core::{ScanPolicy, Scanner};
use serde::Serialize;

use crate::fixtures::{Expectation, FixtureCase, FixtureSet};

/// Outcome of one fixture case under one policy.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    pub family: String,
    pub case_name: String,
    pub policy: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    /// `FormatError::kind_name()` when the call failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    pub latency_ns: u64,
}

/// Runs fixture sets under one scan policy.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    pub policy: ScanPolicy,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>, policy: ScanPolicy) -> Self {
        Self {
            campaign: campaign.into(),
            policy,
        }
    }

    /// Run every case of `fixture_set` that applies to this runner's policy.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .filter(|case| policy_matches(self.policy, &case.policy))
            .map(|case| {
                let case_name = if case.policy.eq_ignore_ascii_case("both") {
                    format!("{} [{}]", case.name, self.policy.as_str())
                } else {
                    case.name.clone()
                };
                let mut result = execute_case(case, self.policy);
                result.family = fixture_set.family.clone();
                result.case_name = case_name;
                result
            })
            .collect()
    }
}

fn policy_matches(active: ScanPolicy, case_policy: &str) -> bool {
    case_policy.eq_ignore_ascii_case("both") || ScanPolicy::from_str_loose(case_policy) == active
}

/// Textual form of an error outcome, shared by expected and actual values.
fn error_marker(kind: &str) -> String {
    format!("error:{kind}")
}

fn execute_case(case: &FixtureCase, policy: ScanPolicy) -> VerificationResult {
    let mut result = VerificationResult {
        family: String::new(),
        case_name: case.name.clone(),
        policy: policy.as_str().to_string(),
        passed: false,
        expected: String::new(),
        actual: String::new(),
        diff: None,
        error_kind: None,
        latency_ns: 0,
    };

    let expected = match case.expectation() {
        Ok(Expectation::Output(out)) => out.to_string(),
        Ok(Expectation::Error(kind)) => error_marker(kind),
        Err(err) => {
            result.actual = format!("fixture-error: {err}");
            return result;
        }
    };
    result.expected = expected;

    let args = match case.resolve_args() {
        Ok(args) => args,
        Err(err) => {
            result.actual = format!("fixture-error: {err}");
            return result;
        }
    };

    let scanner = Scanner::new(policy);
    let started = Instant::now();
    let first = scanner.format(&case.template, args.as_slice());
    result.latency_ns = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);
    let second = scanner.format(&case.template, args.as_slice());

    result.actual = match &first {
        Ok(out) => out.clone(),
        Err(err) => {
            result.error_kind = Some(err.kind_name().to_string());
            error_marker(err.kind_name())
        }
    };

    let mut notes = Vec::new();
    if first != second {
        notes.push("repeated call produced a different outcome".to_string());
    }
    if result.actual != result.expected {
        notes.push(render_diff(&result.expected, &result.actual));
    }
    result.passed = notes.is_empty();
    if !notes.is_empty() {
        result.diff = Some(notes.join("\n"));
    }
    result
}

/// Line-oriented expected/actual diff with the first differing byte.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    let first_mismatch = expected
        .bytes()
        .zip(actual.bytes())
        .position(|(e, a)| e != a)
        .unwrap_or_else(|| expected.len().min(actual.len()));
    format!("- {expected:?}\n+ {actual:?}\n  first difference at byte {first_mismatch}")
}
