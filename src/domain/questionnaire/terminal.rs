//! Terminal tags - opaque end-of-questionnaire markers.

use serde::Serialize;
use std::fmt;

/// Prefix that distinguishes a terminal tag from a question identity.
pub const TERMINAL_PREFIX: &str = "END";

/// An end state of the questionnaire.
///
/// The set of tags is open: anything starting with [`TERMINAL_PREFIX`] is a
/// valid terminal, and tags without a dedicated meaning render as a generic
/// result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TerminalTag(String);

impl TerminalTag {
    /// Parses a reference into a terminal tag if it carries the terminal prefix.
    pub fn parse(reference: &str) -> Option<Self> {
        if reference.starts_with(TERMINAL_PREFIX) {
            Some(Self(reference.to_string()))
        } else {
            None
        }
    }

    /// Returns the raw tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classifies the tag into one of the known end states.
    pub fn kind(&self) -> TerminalKind {
        match self.0.as_str() {
            "END_NONE" => TerminalKind::NoRelevance,
            "END_PROVIDER" => TerminalKind::Provider,
            "END_SUMMARY" => TerminalKind::Summary,
            _ => TerminalKind::Generic,
        }
    }
}

impl fmt::Display for TerminalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Known end states. Unrecognized tags fall into `Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalKind {
    NoRelevance,
    Provider,
    Summary,
    Generic,
}

impl TerminalKind {
    /// Heading shown on the result view and the exported report.
    pub fn title(&self) -> &'static str {
        match self {
            TerminalKind::NoRelevance => "Result: No particular relevance",
            TerminalKind::Provider => "Result: Provider role",
            TerminalKind::Summary => "Summary",
            TerminalKind::Generic => "Result",
        }
    }

    /// Short badge label.
    pub fn badge(&self) -> &'static str {
        match self {
            TerminalKind::NoRelevance => "Info",
            TerminalKind::Provider => "Provider",
            TerminalKind::Summary => "Summary",
            TerminalKind::Generic => "Result",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_prefixed_references() {
        let tag = TerminalTag::parse("END_SUMMARY").unwrap();
        assert_eq!(tag.as_str(), "END_SUMMARY");
    }

    #[test]
    fn parse_rejects_question_references() {
        assert!(TerminalTag::parse("2").is_none());
        assert!(TerminalTag::parse("q_end").is_none());
    }

    #[test]
    fn known_tags_map_to_their_kind() {
        assert_eq!(TerminalTag::parse("END_NONE").unwrap().kind(), TerminalKind::NoRelevance);
        assert_eq!(TerminalTag::parse("END_PROVIDER").unwrap().kind(), TerminalKind::Provider);
        assert_eq!(TerminalTag::parse("END_SUMMARY").unwrap().kind(), TerminalKind::Summary);
    }

    #[test]
    fn unrecognized_tags_render_as_generic_result() {
        let tag = TerminalTag::parse("END_SOMETHING_NEW").unwrap();
        assert_eq!(tag.kind(), TerminalKind::Generic);
        assert_eq!(tag.kind().title(), "Result");
        assert_eq!(tag.kind().badge(), "Result");
    }
}
