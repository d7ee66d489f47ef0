use std::collections::{hash_map::Entry, BTreeSet, HashMap};

use strum::Display;

use crate::Result;

/// Whether a method owns slot 0 or cedes it to the implicit receiver.
///
/// When structure data is absent the staticness of a method is unknowable; the
/// indexer then unions both assumptions, a deliberate over-approximation that avoids
/// flagging a real parameter as orphaned.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Staticness {
    /// Static method: the first parameter lives in slot 0.
    Static,
    /// Instance method: slot 0 holds the receiver, parameters start at slot 1.
    Instance,
    /// Staticness not knowable; valid slots are the union of both assumptions.
    Unknown,
}

/// Memoizing calculator of the structurally possible parameter slots of a descriptor.
///
/// The memo table is owned by the indexer value itself, never shared process-wide.
/// Sharing one indexer across threads is therefore an explicit choice of the caller,
/// who must provide the synchronization; a fresh indexer is cheap.
///
/// # Examples
///
/// ```rust
/// use mapscope::descriptor::{ParameterIndexer, Staticness};
///
/// let mut indexer = ParameterIndexer::new();
/// assert!(indexer.indexes("()V", Staticness::Static)?.is_empty());
/// assert_eq!(indexer.indexes("(I)V", Staticness::Instance)?.first(), Some(&1));
/// # Ok::<(), mapscope::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct ParameterIndexer {
    cache: HashMap<(String, Staticness), BTreeSet<u8>>,
}

impl ParameterIndexer {
    /// Creates an indexer with an empty memo table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set of slot indices the descriptor can assign parameters to.
    ///
    /// The scan walks the region between the descriptor's parentheses left to right.
    /// The running slot starts at 0 for [`Staticness::Static`] and 1 for
    /// [`Staticness::Instance`] (slot 0 reserved for the receiver). Each parameter
    /// records the current slot, then advances by 2 for `J`/`D` (the high slot is
    /// unindexed) and by 1 otherwise. Arrays of any depth advance by exactly 1.
    /// [`Staticness::Unknown`] yields the union of both assumptions.
    ///
    /// Results are memoized by `(descriptor, staticness)`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if the descriptor has no parameter region
    /// or contains an invalid type token. Malformed descriptors are a hard failure,
    /// never silently treated as empty.
    pub fn indexes(&mut self, descriptor: &str, staticness: Staticness) -> Result<&BTreeSet<u8>> {
        match self.cache.entry((descriptor.to_owned(), staticness)) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let indexes = match staticness {
                    Staticness::Static => scan(descriptor, 0)?,
                    Staticness::Instance => scan(descriptor, 1)?,
                    Staticness::Unknown => {
                        let mut union = scan(descriptor, 0)?;
                        union.extend(scan(descriptor, 1)?);
                        union
                    }
                };
                Ok(entry.insert(indexes))
            }
        }
    }

    /// Number of memoized (descriptor, staticness) entries.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

/// Walks the parameter region of `descriptor` with the running slot starting at `base`.
fn scan(descriptor: &str, base: u16) -> Result<BTreeSet<u8>> {
    let inner = descriptor
        .strip_prefix('(')
        .and_then(|rest| rest.split_once(')'))
        .map(|(params, _return)| params)
        .ok_or_else(|| malformed_error!("Invalid method descriptor - {}", descriptor))?;

    let bytes = inner.as_bytes();
    let mut indexes = BTreeSet::new();
    let mut slot = base;
    let mut pos = 0;

    while pos < bytes.len() {
        if slot <= u16::from(u8::MAX) {
            indexes.insert(slot as u8);
        }

        match bytes[pos] {
            b'B' | b'C' | b'F' | b'I' | b'S' | b'Z' => {
                slot += 1;
                pos += 1;
            }
            b'J' | b'D' => {
                // Wide primitive: the high slot stays unindexed.
                slot += 2;
                pos += 1;
            }
            b'[' => {
                // Arrays are references regardless of depth or element type.
                slot += 1;
                while pos < bytes.len() && bytes[pos] == b'[' {
                    pos += 1;
                }
                match bytes.get(pos) {
                    Some(b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z') => pos += 1,
                    Some(b'L') => pos = skip_class_ref(bytes, pos, descriptor)?,
                    _ => {
                        return Err(malformed_error!(
                            "Array without element type in descriptor - {}",
                            descriptor
                        ))
                    }
                }
            }
            b'L' => {
                slot += 1;
                pos = skip_class_ref(bytes, pos, descriptor)?;
            }
            other => {
                return Err(malformed_error!(
                    "Invalid type token '{}' in descriptor - {}",
                    char::from(other),
                    descriptor
                ))
            }
        }
    }

    Ok(indexes)
}

/// Advances past an `L...;` class-reference token starting at `pos`.
fn skip_class_ref(bytes: &[u8], pos: usize, descriptor: &str) -> Result<usize> {
    debug_assert_eq!(bytes[pos], b'L');
    for (offset, byte) in bytes.iter().enumerate().skip(pos + 1) {
        if *byte == b';' {
            return Ok(offset + 1);
        }
    }
    Err(malformed_error!(
        "Unterminated class reference in descriptor - {}",
        descriptor
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(descriptor: &str, staticness: Staticness) -> Vec<u8> {
        let mut indexer = ParameterIndexer::new();
        indexer
            .indexes(descriptor, staticness)
            .unwrap()
            .iter()
            .copied()
            .collect()
    }

    #[test]
    fn no_params() {
        // No parameter tokens means no slots, receiver or not.
        assert_eq!(slots("()V", Staticness::Static), Vec::<u8>::new());
        assert_eq!(slots("()V", Staticness::Instance), Vec::<u8>::new());
    }

    #[test]
    fn single_int() {
        assert_eq!(slots("(I)V", Staticness::Static), vec![0]);
        assert_eq!(slots("(I)V", Staticness::Instance), vec![1]);
    }

    #[test]
    fn wide_primitives_skip_high_slots() {
        // double at 0-1, long at 2-3, int at 4.
        assert_eq!(slots("(DJI)V", Staticness::Static), vec![0, 2, 4]);
        assert_eq!(slots("(DJI)V", Staticness::Instance), vec![1, 3, 5]);
    }

    #[test]
    fn arrays_advance_one() {
        assert_eq!(slots("([[[I)V", Staticness::Static), vec![0]);
        assert_eq!(slots("([J[D)V", Staticness::Static), vec![0, 1]);
    }

    #[test]
    fn class_refs_scan_to_their_own_terminator() {
        assert_eq!(slots("(Ljava/lang/Object;I)V", Staticness::Static), vec![0, 1]);
        assert_eq!(
            slots("(Ljava/lang/Object;Ljava/lang/String;)V", Staticness::Static),
            vec![0, 1]
        );
        assert_eq!(slots("([Ljava/lang/Object;J)V", Staticness::Static), vec![0, 1]);
    }

    #[test]
    fn unknown_is_the_union() {
        assert_eq!(slots("(I)V", Staticness::Unknown), vec![0, 1]);
        assert_eq!(slots("(DJI)V", Staticness::Unknown), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(slots("()V", Staticness::Unknown), Vec::<u8>::new());
    }

    #[test]
    fn malformed_descriptors_are_fatal() {
        let mut indexer = ParameterIndexer::new();
        for bad in ["", "I", "(I", "(Q)V", "(Ljava/lang/Object)V", "([)V"] {
            assert!(
                matches!(
                    indexer.indexes(bad, Staticness::Static),
                    Err(crate::Error::Malformed { .. })
                ),
                "expected malformed error for {bad:?}"
            );
        }
    }

    #[test]
    fn results_are_memoized_per_staticness() {
        let mut indexer = ParameterIndexer::new();
        indexer.indexes("(I)V", Staticness::Static).unwrap();
        indexer.indexes("(I)V", Staticness::Static).unwrap();
        indexer.indexes("(I)V", Staticness::Instance).unwrap();
        assert_eq!(indexer.cached(), 2);
    }
}
