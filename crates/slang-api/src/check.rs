//! Contract between checks and the scan that runs them.

use crate::text::TextRange;
use crate::tree::{IdentifierTree, Tree};
use serde::{Deserialize, Serialize};

/// Where an issue is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueLocation {
    /// The whole file, used for nodes without source position
    File,
    Range(TextRange),
}

impl IssueLocation {
    pub fn range(&self) -> Option<TextRange> {
        match self {
            Self::File => None,
            Self::Range(range) => Some(*range),
        }
    }
}

impl From<TextRange> for IssueLocation {
    fn from(range: TextRange) -> Self {
        Self::Range(range)
    }
}

impl From<Option<TextRange>> for IssueLocation {
    fn from(range: Option<TextRange>) -> Self {
        range.map_or(Self::File, Self::Range)
    }
}

impl From<&Tree> for IssueLocation {
    fn from(tree: &Tree) -> Self {
        tree.text_range().into()
    }
}

impl From<&IdentifierTree> for IssueLocation {
    fn from(identifier: &IdentifierTree) -> Self {
        identifier.text_range().into()
    }
}

/// Additional location explaining an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryLocation {
    pub range: TextRange,
    pub message: Option<String>,
}

impl SecondaryLocation {
    pub fn new(range: TextRange, message: Option<String>) -> Self {
        Self { range, message }
    }

    pub fn with_message(range: TextRange, message: impl Into<String>) -> Self {
        Self::new(range, Some(message.into()))
    }

    /// Location of a node, `None` when the node has no source position
    pub fn of_tree(tree: &Tree, message: Option<&str>) -> Option<Self> {
        tree.text_range()
            .map(|range| Self::new(range, message.map(str::to_string)))
    }
}

/// What a check sees while handling a node
pub trait CheckContext<'a> {
    /// Strict ancestors of the current node, nearest first
    fn ancestors(&self) -> Vec<&'a Tree>;

    fn parent(&self) -> Option<&'a Tree>;

    fn filename(&self) -> Option<&str>;

    /// Report an issue; `gap` is the remediation effort, when it depends on the finding
    fn report_issue(
        &mut self,
        location: IssueLocation,
        message: String,
        secondaries: Vec<SecondaryLocation>,
        gap: Option<f64>,
    );

    fn report_simple(&mut self, location: IssueLocation, message: String) {
        self.report_issue(location, message, Vec::new(), None);
    }

    fn report_with_secondary(
        &mut self,
        location: IssueLocation,
        message: String,
        secondary: Option<SecondaryLocation>,
    ) {
        self.report_issue(location, message, secondary.into_iter().collect(), None);
    }
}
