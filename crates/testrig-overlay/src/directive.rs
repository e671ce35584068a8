//! Merge directive recognition.
//!
//! Overlay mappings may carry control keys (`$merge`, `$list`) that select
//! how the node combines with its base counterpart. This module classifies
//! a mapping's control keys into a [`Directive`], rejecting malformed
//! combinations up front so they cannot silently drop data.

use crate::error::MergeError;
use testrig_document::{Document, Mapping};

pub(crate) const MERGE_KEY: &str = "$merge";
pub(crate) const LIST_KEY: &str = "$list";

/// How a `$list` fragment combines with the base sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceStrategy {
    /// The fragment replaces the base sequence verbatim (default).
    #[default]
    Replace,
    /// Base order kept; fragment elements not already present (by deep
    /// value equality) are appended in fragment order.
    Merge,
    /// Fragment concatenated before the base sequence.
    AppendHead,
    /// Base sequence concatenated before the fragment.
    AppendTail,
    /// Fragment replaces the first `len(fragment)` base elements.
    OverwriteHead,
    /// Fragment replaces the last `len(fragment)` base elements.
    OverwriteTail,
}

impl SequenceStrategy {
    /// All recognized strategy names, for diagnostics.
    pub(crate) const KNOWN: &'static str =
        "replace, merge, append_head, append_tail, overwrite_head, overwrite_tail";

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "replace" => Some(SequenceStrategy::Replace),
            "merge" => Some(SequenceStrategy::Merge),
            "append_head" => Some(SequenceStrategy::AppendHead),
            "append_tail" => Some(SequenceStrategy::AppendTail),
            "overwrite_head" => Some(SequenceStrategy::OverwriteHead),
            "overwrite_tail" => Some(SequenceStrategy::OverwriteTail),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SequenceStrategy::Replace => "replace",
            SequenceStrategy::Merge => "merge",
            SequenceStrategy::AppendHead => "append_head",
            SequenceStrategy::AppendTail => "append_tail",
            SequenceStrategy::OverwriteHead => "overwrite_head",
            SequenceStrategy::OverwriteTail => "overwrite_tail",
        }
    }
}

/// The classified control keys of an overlay mapping.
#[derive(Debug)]
pub(crate) enum Directive<'a> {
    /// `$list` present: combine the fragment with the base sequence.
    Sequence {
        strategy: SequenceStrategy,
        list: &'a [Document],
    },
    /// Boolean `$merge` on a plain mapping: recursive merge or replace.
    Mapping { merge: bool },
}

impl<'a> Directive<'a> {
    /// Classify the control keys carried by an overlay mapping.
    ///
    /// Returns `Ok(None)` when the mapping carries no control keys (it is
    /// then merged recursively, the default). Malformed combinations are
    /// rejected as [`MergeError::AmbiguousDirective`].
    pub(crate) fn parse(
        entries: &'a Mapping,
        path: &[String],
    ) -> Result<Option<Directive<'a>>, MergeError> {
        let merge = entries.get(MERGE_KEY);
        let list = entries.get(LIST_KEY);

        match (merge, list) {
            (None, None) => Ok(None),

            (merge, Some(list)) => {
                let strategy = match merge {
                    None => SequenceStrategy::Replace,
                    Some(Document::String(name)) => {
                        SequenceStrategy::from_name(name).ok_or_else(|| {
                            MergeError::ambiguous(
                                path,
                                format!(
                                    "unsupported sequence merge strategy '{name}' \
                                     (expected one of: {})",
                                    SequenceStrategy::KNOWN
                                ),
                            )
                        })?
                    }
                    Some(other) => {
                        return Err(MergeError::ambiguous(
                            path,
                            format!(
                                "`$merge` must name a sequence strategy when `$list` \
                                 is present, got {}",
                                other.type_name()
                            ),
                        ));
                    }
                };
                let items = list.as_sequence().ok_or_else(|| {
                    MergeError::ambiguous(
                        path,
                        format!("`$list` must be a sequence, got {}", list.type_name()),
                    )
                })?;
                // The directive's only product is a sequence; payload keys
                // next to `$list` could only be dropped silently.
                if let Some(stray) = entries.keys().find(|k| *k != MERGE_KEY && *k != LIST_KEY) {
                    return Err(MergeError::ambiguous(
                        path,
                        format!("key '{stray}' cannot appear alongside `$list`"),
                    ));
                }
                Ok(Some(Directive::Sequence {
                    strategy,
                    list: items,
                }))
            }

            (Some(Document::Bool(merge)), None) => Ok(Some(Directive::Mapping { merge: *merge })),

            (Some(Document::String(name)), None) => Err(MergeError::ambiguous(
                path,
                format!("sequence strategy `$merge: \"{name}\"` requires a `$list` fragment"),
            )),

            (Some(other), None) => Err(MergeError::ambiguous(
                path,
                format!(
                    "`$merge` must be a boolean or a sequence strategy name, got {}",
                    other.type_name()
                ),
            )),
        }
    }
}
