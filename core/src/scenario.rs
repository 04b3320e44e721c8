//! Scenario metadata: what a test demonstrates and which service defect, if
//! any, it documents.
//!
//! # Design
//! Every acceptance test owns a `const` [`Scenario`]. The kind says whether
//! the test shows the service behaving (positive) or refusing (negative). A
//! [`KnownIssue`] marks a scenario whose observed behavior diverges from
//! what the service should do. Which of the two outcomes the test asserts is
//! decided by [`DefectPolicy`] through [`Scenario::expect`], so one suite can
//! either document the service as it is or act as a regression check that
//! stays red until the defect is fixed upstream.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TestType {
    Positive,
    Negative,
}

/// A divergence between what the service does and what it should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownIssue {
    /// Tracker reference; empty when none was filed.
    pub ticket: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub name: &'static str,
    pub kind: TestType,
    pub description: &'static str,
    pub issue: Option<KnownIssue>,
}

impl Scenario {
    pub const fn positive(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: TestType::Positive,
            description,
            issue: None,
        }
    }

    pub const fn negative(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: TestType::Negative,
            description,
            issue: None,
        }
    }

    pub const fn with_issue(self, ticket: &'static str, description: &'static str) -> Self {
        Self {
            issue: Some(KnownIssue {
                ticket,
                description,
            }),
            ..self
        }
    }

    /// Log the scenario header. Call once at the top of the test.
    pub fn begin(&self) {
        match &self.issue {
            Some(issue) => info!(
                scenario = self.name,
                kind = %self.kind,
                ticket = issue.ticket,
                issue = issue.description,
                "{}",
                self.description
            ),
            None => info!(scenario = self.name, kind = %self.kind, "{}", self.description),
        }
    }

    /// Pick the value to assert. Without a known issue the ideal value always
    /// wins; with one, `policy` decides.
    pub fn expect<T>(&self, policy: DefectPolicy, ideal: T, observed: T) -> T {
        match (self.issue, policy) {
            (Some(_), DefectPolicy::Document) => observed,
            _ => ideal,
        }
    }

    pub fn categories(&self) -> Vec<Category> {
        let mut categories = vec![match self.kind {
            TestType::Positive => Category::Positive,
            TestType::Negative => Category::Negative,
        }];
        if self.issue.is_some() {
            categories.push(Category::KnownDefect);
        }
        categories
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestType::Positive => write!(f, "positive"),
            TestType::Negative => write!(f, "negative"),
        }
    }
}

/// How scenarios carrying a [`KnownIssue`] are asserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefectPolicy {
    /// Assert what the service currently does.
    #[default]
    Document,
    /// Assert what the service should do; these scenarios fail until fixed.
    Regression,
}

impl FromStr for DefectPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" => Ok(DefectPolicy::Document),
            "regression" => Ok(DefectPolicy::Regression),
            other => Err(format!("expected `document` or `regression`, got {other:?}")),
        }
    }
}

/// Report grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Positive,
    Negative,
    KnownDefect,
}

/// Group scenario names by category. A scenario with a known issue is listed
/// under its kind and under [`Category::KnownDefect`].
pub fn group_by_category(scenarios: &[Scenario]) -> BTreeMap<Category, Vec<&'static str>> {
    let mut groups: BTreeMap<Category, Vec<&'static str>> = BTreeMap::new();
    for scenario in scenarios {
        for category in scenario.categories() {
            groups.entry(category).or_default().push(scenario.name);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: Scenario = Scenario::positive("plain", "nothing wrong here");
    const DEFECT: Scenario =
        Scenario::negative("defect", "unknown id").with_issue("", "answers 200 instead of 404");

    #[test]
    fn expect_without_issue_is_always_ideal() {
        assert_eq!(PLAIN.expect(DefectPolicy::Document, 404, 200), 404);
        assert_eq!(PLAIN.expect(DefectPolicy::Regression, 404, 200), 404);
    }

    #[test]
    fn expect_with_issue_follows_policy() {
        assert_eq!(DEFECT.expect(DefectPolicy::Document, 404, 200), 200);
        assert_eq!(DEFECT.expect(DefectPolicy::Regression, 404, 200), 404);
    }

    #[test]
    fn defect_scenarios_land_in_two_groups() {
        let groups = group_by_category(&[PLAIN, DEFECT]);
        assert_eq!(groups[&Category::Positive], vec!["plain"]);
        assert_eq!(groups[&Category::Negative], vec!["defect"]);
        assert_eq!(groups[&Category::KnownDefect], vec!["defect"]);
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("Document".parse::<DefectPolicy>(), Ok(DefectPolicy::Document));
        assert_eq!(" regression ".parse::<DefectPolicy>(), Ok(DefectPolicy::Regression));
        assert!("strict".parse::<DefectPolicy>().is_err());
    }
}
