//! EPUB Canonical Fragment Identifier parsing and ordering.
//!
//! Apple Books anchors every annotation to an EPUB CFI, a path of
//! child-node indices with optional element-id assertions and text offsets,
//! e.g. `epubcfi(/6/14[chap05]!/4/2:284)`. Parsing extracts the linear
//! step path ([`Step`]); the [`Ord`] implementation on [`EpubCfi`] orders
//! two locations from the same book by document position, which is what
//! lets annotations be sorted into reading order.
//!
//! Only the step-path subset the application actually emits is understood.
//! Range, indirection, and assertion syntax beyond `[id]` is skipped by the
//! scanner rather than rejected, so dialect variations still yield a usable
//! ordering. Resolving a CFI against document content is out of scope; no
//! document tree is available here.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::books::constants::{CFI_PREFIX, CFI_SUFFIX};
use crate::IbkError;

/// One `/index[id]:offset` step of a CFI path.
///
/// Pattern per step: a `/` followed by the child-node index, an optional
/// bracketed element-id assertion, and an optional `:offset` into text
/// content. Anything between steps that does not fit this shape is ignored
/// by the scanner.
fn step_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"/(\d+)(?:\[(\w+)\])?(?::(\d+))?").expect("step pattern is valid")
    })
}

/// One segment of a CFI path.
///
/// CFI child indices are 1-based and even for element nodes by convention,
/// but no parity check is made here; the value is carried as written.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    /// Ordinal child-node index at this tree depth.
    pub index: u64,
    /// Element id asserted in brackets after the index, if any.
    pub element_id: Option<String>,
    /// Character offset into text content (`:N` suffix), if any.
    /// Absent is not the same as zero: `/4/2` sorts before `/4/2:0`.
    pub text_offset: Option<u64>,
}

impl Step {
    /// The id assertion as it participates in ordering: absent reads as "".
    fn assertion(&self) -> &str {
        self.element_id.as_deref().unwrap_or_default()
    }
}

impl Ord for Step {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index
            .cmp(&other.index)
            .then_with(|| self.assertion().cmp(other.assertion()))
            // Option ordering puts None first, which is exactly the rule:
            // a missing offset sorts before any present, differing offset.
            .then_with(|| self.text_offset.cmp(&other.text_offset))
    }
}

impl PartialOrd for Step {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality must agree with cmp: an absent id and an empty id are the same
// position, so the derive (None != Some("")) would be wrong here.
impl PartialEq for Step {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Step {}

/// A parsed CFI location.
///
/// Holds the step path plus the source string, kept verbatim for display
/// and round-trip; never mutated after construction. Ordering compares the
/// step paths lexicographically (see [`Ord`] impl), so two locations with
/// the same steps are equal even when their source strings differ in
/// skipped text.
#[derive(Debug, Clone)]
pub struct EpubCfi {
    raw: String,
    steps: Vec<Step>,
}

impl EpubCfi {
    /// Parse a CFI location string.
    ///
    /// The `epubcfi( … )` envelope is mandatory; a missing envelope is the
    /// only parse failure. Inside the envelope the scanner collects every
    /// non-overlapping step match in order and silently skips text that
    /// does not fit the step grammar. An empty body is valid and yields an
    /// empty step path.
    pub fn parse(raw: &str) -> Result<Self, IbkError> {
        let body = raw
            .strip_prefix(CFI_PREFIX)
            .and_then(|rest| rest.strip_suffix(CFI_SUFFIX))
            .ok_or_else(|| IbkError::Cfi(format!("not an epubcfi(…) location: {raw:?}")))?;

        let steps = step_pattern()
            .captures_iter(body)
            .filter_map(|caps| {
                // A step index too large for u64 cannot come from a real
                // document; the scanner skips it like any other non-step text.
                let index = caps[1].parse().ok()?;
                Some(Step {
                    index,
                    element_id: caps.get(2).map(|m| m.as_str().to_owned()),
                    text_offset: caps.get(3).and_then(|m| m.as_str().parse().ok()),
                })
            })
            .collect();

        Ok(EpubCfi {
            raw: raw.to_owned(),
            steps,
        })
    }

    /// The source string, exactly as parsed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The step path, outermost first.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// True when the envelope contained no recognizable steps.
    ///
    /// An empty path is the unique minimum of the ordering.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl FromStr for EpubCfi {
    type Err = IbkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EpubCfi::parse(s)
    }
}

impl fmt::Display for EpubCfi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Ord for EpubCfi {
    /// Document order over step paths.
    ///
    /// Steps are compared pairwise up to the shorter path: index decides
    /// first, then the id assertion (absent reads as ""), then the text
    /// offset with absent sorting before present. If every shared position
    /// ties, the shorter path (the ancestor) comes first.
    fn cmp(&self, other: &Self) -> Ordering {
        self.steps.cmp(&other.steps)
    }
}

impl PartialOrd for EpubCfi {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EpubCfi {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EpubCfi {}

impl Serialize for EpubCfi {
    /// Serializes as the source string plus the parsed path, so JSON export
    /// round-trips the location while still exposing the step structure.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EpubCfi", 2)?;
        state.serialize_field("cfi", &self.raw)?;
        state.serialize_field("steps", &self.steps)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfi(s: &str) -> EpubCfi {
        EpubCfi::parse(s).unwrap()
    }

    #[test]
    fn test_parse_full_step_path() {
        let c = cfi("epubcfi(/6/14[chap05]!/4/2:284)");
        let steps = c.steps();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].index, 6);
        assert_eq!(steps[1].index, 14);
        assert_eq!(steps[1].element_id.as_deref(), Some("chap05"));
        assert_eq!(steps[1].text_offset, None);
        assert_eq!(steps[3].index, 2);
        assert_eq!(steps[3].text_offset, Some(284));
    }

    #[test]
    fn test_parse_keeps_source_string() {
        let raw = "epubcfi(/6/14[chap05]!/4/2,:1,:20)";
        let c = cfi(raw);
        assert_eq!(c.as_str(), raw);
        assert_eq!(c.to_string(), raw);
    }

    #[test]
    fn test_missing_envelope_is_rejected() {
        assert!(matches!(EpubCfi::parse("/4/2:5"), Err(IbkError::Cfi(_))));
        assert!(matches!(EpubCfi::parse("epubcfi(/4/2"), Err(IbkError::Cfi(_))));
        assert!(matches!(EpubCfi::parse("/4/2)"), Err(IbkError::Cfi(_))));
        assert!(matches!(EpubCfi::parse(""), Err(IbkError::Cfi(_))));
    }

    #[test]
    fn test_empty_body_is_valid() {
        let c = cfi("epubcfi()");
        assert!(c.is_empty());
        assert_eq!(c.as_str(), "epubcfi()");
    }

    #[test]
    fn test_scanner_skips_foreign_syntax() {
        // Indirection (!) sits between steps and is skipped.
        let c = cfi("epubcfi(/6/4[chap01]!/4[body01]/10/2:3)");
        assert_eq!(c.steps().len(), 5);

        // Range form: the ,:start,:end offsets have no leading slash and
        // contribute nothing; the path steps still come out in order.
        let c = cfi("epubcfi(/6/14!/4/2,:1,:20)");
        let indices: Vec<u64> = c.steps().iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![6, 14, 4, 2]);
        assert_eq!(c.steps()[3].text_offset, None);

        // Temporal/spatial garbage between steps disappears entirely.
        let c = cfi("epubcfi(/4 ~3.2 @1:2 /6)");
        let indices: Vec<u64> = c.steps().iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![4, 6]);
    }

    #[test]
    fn test_absent_id_is_none_not_empty() {
        let c = cfi("epubcfi(/4)");
        assert_eq!(c.steps()[0].element_id, None);
    }

    #[test]
    fn test_absent_and_empty_id_compare_equal() {
        let bare = Step {
            index: 4,
            element_id: None,
            text_offset: None,
        };
        let empty = Step {
            index: 4,
            element_id: Some(String::new()),
            text_offset: None,
        };
        assert_eq!(bare, empty);
        assert_eq!(bare.cmp(&empty), Ordering::Equal);
    }

    #[test]
    fn test_oversized_index_is_skipped() {
        let c = cfi("epubcfi(/99999999999999999999999/4)");
        let indices: Vec<u64> = c.steps().iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![4]);
    }

    #[test]
    fn test_serialize_exposes_raw_and_steps() {
        let c = cfi("epubcfi(/4/2:5)");
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["cfi"], "epubcfi(/4/2:5)");
        assert_eq!(json["steps"][1]["text_offset"], 5);
    }
}
