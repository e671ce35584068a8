//! Overlay composition.
//!
//! [`merge`] composes one overlay onto a base document; [`fold`] composes
//! a stack of overlays in argument order (`merge(merge(base, ov1), ov2)`,
//! so later overlays win conflicts). Both are pure: inputs are borrowed
//! and a fresh tree is returned.
//!
//! Overlay subtrees are materialized even where the base has no
//! counterpart, so control keys are consumed everywhere and malformed
//! directives are rejected wherever they occur in the overlay.

use crate::directive::{Directive, MERGE_KEY, SequenceStrategy};
use crate::error::MergeError;
use testrig_document::{Document, Mapping};

/// Options for overlay composition.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Maximum nesting depth (default: 256).
    ///
    /// Composition fails with [`MergeError::NestingTooDeep`] if the
    /// overlay exceeds this depth.
    pub max_depth: usize,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// Compose `overlay` onto `base` with default options.
///
/// Neither input is mutated; the composed tree is returned. Control keys
/// (`$merge`, `$list`) never appear in the result.
pub fn merge(base: &Document, overlay: &Document) -> Result<Document, MergeError> {
    merge_with_options(base, overlay, &MergeOptions::default())
}

/// Compose `overlay` onto `base` with custom options.
pub fn merge_with_options(
    base: &Document,
    overlay: &Document,
    options: &MergeOptions,
) -> Result<Document, MergeError> {
    let mut merger = Merger {
        options,
        path: Vec::new(),
    };
    merger.node(Some(base), overlay)
}

/// Left-fold a stack of overlays onto `base` in argument order.
///
/// With no overlays the base is returned unchanged (a base is not an
/// overlay: any `$`-keys it happens to contain are plain data).
pub fn fold<'a, I>(base: &Document, overlays: I) -> Result<Document, MergeError>
where
    I: IntoIterator<Item = &'a Document>,
{
    fold_with_options(base, overlays, &MergeOptions::default())
}

/// Left-fold a stack of overlays onto `base` with custom options.
pub fn fold_with_options<'a, I>(
    base: &Document,
    overlays: I,
    options: &MergeOptions,
) -> Result<Document, MergeError>
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut composed = base.clone();
    for overlay in overlays {
        composed = merge_with_options(&composed, overlay, options)?;
    }
    Ok(composed)
}

/// Walks an overlay against its base counterpart, tracking the current
/// path for diagnostics and depth limiting.
struct Merger<'a> {
    options: &'a MergeOptions,
    path: Vec<String>,
}

impl Merger<'_> {
    /// Compose one overlay node onto the base node at the same path.
    ///
    /// `base` is `None` where the base has no counterpart; the overlay is
    /// then materialized against nothing (directives still apply, against
    /// an empty base).
    fn node(&mut self, base: Option<&Document>, overlay: &Document) -> Result<Document, MergeError> {
        if self.path.len() > self.options.max_depth {
            return Err(MergeError::NestingTooDeep {
                max_depth: self.options.max_depth,
                path: self.path.clone(),
            });
        }
        match overlay {
            Document::Mapping(entries) => self.mapping(base, entries),
            Document::Sequence(items) => self.sequence_verbatim(items),
            scalar => Ok(scalar.clone()),
        }
    }

    /// A directive-less overlay sequence replaces the base wholesale. Its
    /// elements are still materialized so nested control keys are consumed.
    fn sequence_verbatim(&mut self, items: &[Document]) -> Result<Document, MergeError> {
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            self.path.push(format!("[{index}]"));
            let materialized = self.node(None, item)?;
            self.path.pop();
            out.push(materialized);
        }
        Ok(Document::Sequence(out))
    }

    fn mapping(
        &mut self,
        base: Option<&Document>,
        entries: &Mapping,
    ) -> Result<Document, MergeError> {
        match Directive::parse(entries, &self.path)? {
            Some(Directive::Sequence { strategy, list }) => {
                // Where the base is missing or not a sequence, strategies
                // operate on an empty base.
                let base_items = base.and_then(Document::as_sequence).unwrap_or_default();
                self.apply_strategy(strategy, base_items, list)
            }
            Some(Directive::Mapping { merge: false }) => self.replace_mapping(entries),
            Some(Directive::Mapping { merge: true }) | None => self.merge_mapping(base, entries),
        }
    }

    /// `$merge: false` — the overlay mapping (control key stripped)
    /// wholly replaces the base subtree.
    fn replace_mapping(&mut self, entries: &Mapping) -> Result<Document, MergeError> {
        let mut out = Mapping::new();
        for (key, value) in entries {
            if key == MERGE_KEY {
                continue;
            }
            self.path.push(key.clone());
            let materialized = self.node(None, value)?;
            self.path.pop();
            out.insert(key.clone(), materialized);
        }
        Ok(Document::Mapping(out))
    }

    /// Recursive key-by-key merge: base-only keys kept in place,
    /// overlay-only keys appended, shared keys merged recursively.
    fn merge_mapping(
        &mut self,
        base: Option<&Document>,
        entries: &Mapping,
    ) -> Result<Document, MergeError> {
        let base_entries = base.and_then(Document::as_mapping);
        let mut out = base_entries.cloned().unwrap_or_default();
        for (key, value) in entries {
            if key == MERGE_KEY {
                continue;
            }
            self.path.push(key.clone());
            let merged = self.node(base_entries.and_then(|m| m.get(key)), value)?;
            self.path.pop();
            out.insert(key.clone(), merged);
        }
        Ok(Document::Mapping(out))
    }

    fn apply_strategy(
        &mut self,
        strategy: SequenceStrategy,
        base: &[Document],
        list: &[Document],
    ) -> Result<Document, MergeError> {
        // Fragment elements are materialized before combination so the
        // strategy (and `merge` equality) sees final values.
        let mut fragment = Vec::with_capacity(list.len());
        for (index, item) in list.iter().enumerate() {
            self.path.push(format!("[{index}]"));
            fragment.push(self.node(None, item)?);
            self.path.pop();
        }

        let combined = match strategy {
            SequenceStrategy::Replace => fragment,
            SequenceStrategy::Merge => {
                let mut out = base.to_vec();
                for item in fragment {
                    if !out.contains(&item) {
                        out.push(item);
                    }
                }
                out
            }
            SequenceStrategy::AppendHead => {
                let mut out = fragment;
                out.extend_from_slice(base);
                out
            }
            SequenceStrategy::AppendTail => {
                let mut out = base.to_vec();
                out.extend(fragment);
                out
            }
            SequenceStrategy::OverwriteHead => {
                let overwritten = fragment.len().min(base.len());
                let mut out = fragment;
                out.extend_from_slice(&base[overwritten..]);
                out
            }
            SequenceStrategy::OverwriteTail => {
                let kept = base.len().saturating_sub(fragment.len());
                let mut out = base[..kept].to_vec();
                out.extend(fragment);
                out
            }
        };
        Ok(Document::Sequence(combined))
    }
}
