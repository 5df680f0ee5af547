//! Structured validation failures.

use std::fmt;

use thiserror::Error;

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueKind {
    #[error("is required")]
    Missing,

    #[error("must be a number")]
    NotANumber,

    #[error("must be positive")]
    NotPositive,

    #[error("must be an integer")]
    NotInteger,

    #[error("is too large")]
    TooLarge,

    #[error("has too many decimal places")]
    TooPrecise,

    #[error("invalid pair `{0}`")]
    UnknownPair(String),

    #[error("invalid direction `{0}`")]
    UnknownDirection(String),
}

/// Field of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionField {
    Direction,
    Lot,
    Open,
}

impl PositionField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionField::Direction => "direction",
            PositionField::Lot => "lot",
            PositionField::Open => "open",
        }
    }
}

/// Path to the field an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Pair,
    Close,
    /// A position field; `index` is `None` for a standalone position.
    Position {
        index: Option<usize>,
        field: PositionField,
    },
}

impl FieldPath {
    pub(crate) fn position(index: Option<usize>, field: PositionField) -> Self {
        FieldPath::Position { index, field }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Pair => f.write_str("pair"),
            FieldPath::Close => f.write_str("close"),
            FieldPath::Position {
                index: Some(i),
                field,
            } => write!(f, "positions[{}].{}", i, field.as_str()),
            FieldPath::Position { index: None, field } => f.write_str(field.as_str()),
        }
    }
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: FieldPath,
    pub kind: IssueKind,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// Every issue found while validating one input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {}", join_issues(.issues))]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub(crate) fn new(issues: Vec<FieldIssue>) -> Self {
        debug_assert!(!issues.is_empty(), "validation error without issues");
        Self { issues }
    }

    pub(crate) fn single(field: FieldPath, kind: IssueKind) -> Self {
        Self {
            issues: vec![FieldIssue { field, kind }],
        }
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// First issue reported for `field`, if any.
    pub fn issue_for(&self, field: FieldPath) -> Option<&IssueKind> {
        self.issues
            .iter()
            .find(|issue| issue.field == field)
            .map(|issue| &issue.kind)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
