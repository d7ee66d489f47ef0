use std::collections::BTreeMap;
use std::fmt::{self, Write};

use strum::Display;

use crate::tree::MemberKey;

/// Severity level of a validation issue.
///
/// Issues are always returned as data, never thrown; callers gate a larger pipeline
/// on error-severity issues (or on warnings too, their choice).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Convention violation worth reporting but not blocking.
    #[strum(serialize = "WARN")]
    Warning,
    /// Violation that should fail a validation run.
    #[strum(serialize = "ERROR")]
    Error,
}

/// A single validation finding, tagged with the validator that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Severity of the finding.
    pub severity: Severity,
    /// Name of the validator that produced the finding.
    pub validator: &'static str,
    /// Human-readable description of the finding.
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.validator, self.message)
    }
}

/// Per-node collector handed to validator hooks.
///
/// The sink pre-binds the reporting validator's name, so hooks only supply severity
/// and message.
pub struct IssueSink<'a> {
    validator: &'static str,
    issues: &'a mut Vec<Issue>,
}

impl<'a> IssueSink<'a> {
    /// Creates a sink reporting under `validator` into `issues`.
    pub fn new(validator: &'static str, issues: &'a mut Vec<Issue>) -> Self {
        Self { validator, issues }
    }

    /// Records a warning-severity issue for the current node.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message);
    }

    /// Records an error-severity issue for the current node.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.issues.push(Issue {
            severity,
            validator: self.validator,
            message: message.into(),
        });
    }
}

/// Issues collected for one method and its parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodIssues {
    /// Issues on the method node itself.
    pub issues: Vec<Issue>,
    /// Issues per parameter slot.
    pub params: BTreeMap<u8, Vec<Issue>>,
}

impl MethodIssues {
    /// True if neither the method nor any parameter produced an issue.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty() && self.params.values().all(Vec::is_empty)
    }
}

/// Issues collected for one class and its members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassIssues {
    /// Issues on the class node itself.
    pub issues: Vec<Issue>,
    /// Issues per field, keyed by field name.
    pub fields: BTreeMap<String, Vec<Issue>>,
    /// Issues per method, keyed by name+descriptor.
    pub methods: BTreeMap<MemberKey, MethodIssues>,
}

impl ClassIssues {
    /// True if the class and all its members produced no issue.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
            && self.fields.values().all(Vec::is_empty)
            && self.methods.values().all(MethodIssues::is_empty)
    }
}

/// A single finding paired with the qualified path of the node it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef<'a> {
    /// Qualified node path (`a/B`, `a/B.count`, `a/B.run(I)V`, `a/B.run(I)V[1]`).
    pub path: String,
    /// The finding itself.
    pub issue: &'a Issue,
}

/// The output of a validation run: a tree of issues mirroring the mapping tree.
///
/// Only nodes that produced an issue themselves or through a descendant are
/// materialized; a clean branch never appears even though it was visited. Shape and
/// sort order follow the mapping tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTree {
    /// Issues per package, keyed by package path.
    pub packages: BTreeMap<String, Vec<Issue>>,
    /// Issues per class, keyed by class name.
    pub classes: BTreeMap<String, ClassIssues>,
}

impl ResultTree {
    /// Creates an empty result tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the run produced no issue at all.
    pub fn is_empty(&self) -> bool {
        self.packages.values().all(Vec::is_empty) && self.classes.values().all(ClassIssues::is_empty)
    }

    /// True if any error-severity issue was produced.
    pub fn has_errors(&self) -> bool {
        self.entries()
            .iter()
            .any(|e| e.issue.severity == Severity::Error)
    }

    /// True if any warning-severity issue was produced.
    pub fn has_warnings(&self) -> bool {
        self.entries()
            .iter()
            .any(|e| e.issue.severity == Severity::Warning)
    }

    /// Number of error-severity issues.
    pub fn error_count(&self) -> usize {
        self.entries()
            .iter()
            .filter(|e| e.issue.severity == Severity::Error)
            .count()
    }

    /// Number of warning-severity issues.
    pub fn warning_count(&self) -> usize {
        self.entries()
            .iter()
            .filter(|e| e.issue.severity == Severity::Warning)
            .count()
    }

    /// Flattens the tree into (qualified path, issue) entries in tree order.
    pub fn entries(&self) -> Vec<IssueRef<'_>> {
        let mut out = Vec::new();

        for (name, issues) in &self.packages {
            for issue in issues {
                out.push(IssueRef {
                    path: name.clone(),
                    issue,
                });
            }
        }

        for (name, class) in &self.classes {
            for issue in &class.issues {
                out.push(IssueRef {
                    path: name.clone(),
                    issue,
                });
            }
            for (field, issues) in &class.fields {
                for issue in issues {
                    out.push(IssueRef {
                        path: format!("{name}.{field}"),
                        issue,
                    });
                }
            }
            for (key, method) in &class.methods {
                for issue in &method.issues {
                    out.push(IssueRef {
                        path: format!("{name}.{key}"),
                        issue,
                    });
                }
                for (index, issues) in &method.params {
                    for issue in issues {
                        out.push(IssueRef {
                            path: format!("{name}.{key}[{index}]"),
                            issue,
                        });
                    }
                }
            }
        }

        out
    }

    /// Formats a human-readable summary of all findings.
    pub fn summary(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(
            output,
            "Validation: {} error(s), {} warning(s)",
            self.error_count(),
            self.warning_count()
        );
        for entry in self.entries() {
            let _ = writeln!(output, "  {}: {}", entry.path, entry.issue);
        }
        output
    }
}

impl fmt::Display for ResultTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
