//! Arbitrary tag values as dense class ids.
//!
//! Raw datasets label documents with strings or other values rather than
//! `0..K`. [`TagSet`] collects the distinct tags in sorted order and maps
//! them to class ids; [`fix_tags`] runs the default engine end to end.

use crate::error::{Error, Result};
use crate::reclassify::{Nnra, Reclassification};
use ndarray::Array2;
use std::collections::BTreeSet;

/// Sorted distinct tags; a tag's position is its class id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet<T> {
    tags: Vec<T>,
}

impl<T: Ord + Clone> TagSet<T> {
    /// Collect the distinct tags of `tags`.
    pub fn from_tags(tags: &[T]) -> Self {
        let distinct: BTreeSet<&T> = tags.iter().collect();
        Self {
            tags: distinct.into_iter().cloned().collect(),
        }
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether there are no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Class id of `tag`, if known.
    pub fn class_of(&self, tag: &T) -> Option<usize> {
        self.tags.binary_search(tag).ok()
    }

    /// Tag of class `class`, if in range.
    pub fn tag_of(&self, class: usize) -> Option<&T> {
        self.tags.get(class)
    }

    /// Map tags to class ids.
    pub fn encode(&self, tags: &[T]) -> Result<Vec<usize>> {
        tags.iter()
            .map(|t| {
                self.class_of(t).ok_or(Error::InvalidParameter {
                    name: "tags",
                    message: "tag not in tag set",
                })
            })
            .collect()
    }

    /// Map class ids back to tags.
    pub fn decode(&self, labels: &[usize]) -> Result<Vec<T>> {
        labels
            .iter()
            .enumerate()
            .map(|(index, &label)| {
                self.tag_of(label)
                    .cloned()
                    .ok_or(Error::LabelOutOfRange {
                        index,
                        label,
                        n_classes: self.len(),
                    })
            })
            .collect()
    }
}

/// Reclassify tagged documents with default settings.
///
/// The number of classes is the number of distinct tags.
///
/// ```rust
/// use ndarray::array;
/// use nnra::fix_tags;
///
/// let s = array![
///     [1.0, 0.1, 0.1, 0.1, 0.9, 0.9],
///     [0.1, 1.0, 0.9, 0.9, 0.1, 0.1],
///     [0.1, 0.9, 1.0, 0.9, 0.1, 0.1],
///     [0.1, 0.9, 0.9, 1.0, 0.1, 0.1],
///     [0.9, 0.1, 0.1, 0.1, 1.0, 0.9],
///     [0.9, 0.1, 0.1, 0.1, 0.9, 1.0],
/// ];
/// let fixed = fix_tags(&s, &["0", "1", "1", "0", "0", "0"]).unwrap();
/// assert_eq!(fixed, vec!["0", "1", "1", "1", "0", "0"]);
/// ```
pub fn fix_tags<T: Ord + Clone>(similarity: &Array2<f64>, tags: &[T]) -> Result<Vec<T>> {
    let tag_set = TagSet::from_tags(tags);
    if tag_set.is_empty() {
        return Err(Error::EmptyInput);
    }
    let labels = tag_set.encode(tags)?;
    let fixed = Nnra::new(tag_set.len()).reclassify(&labels, similarity)?;
    tag_set.decode(&fixed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_set_is_sorted_and_distinct() {
        let ts = TagSet::from_tags(&["sports", "news", "sports", "arts"]);
        assert_eq!(ts.len(), 3);
        assert_eq!(ts.class_of(&"arts"), Some(0));
        assert_eq!(ts.class_of(&"news"), Some(1));
        assert_eq!(ts.class_of(&"sports"), Some(2));
        assert_eq!(ts.class_of(&"tech"), None);
    }

    #[test]
    fn test_encode_decode() {
        let tags = ["b", "a", "b"];
        let ts = TagSet::from_tags(&tags);
        let labels = ts.encode(&tags).unwrap();
        assert_eq!(labels, vec![1, 0, 1]);
        assert_eq!(ts.decode(&[0, 0, 1]).unwrap(), vec!["a", "a", "b"]);
        assert!(matches!(
            ts.decode(&[2]),
            Err(Error::LabelOutOfRange { label: 2, .. })
        ));
    }

    #[test]
    fn test_fix_tags_empty() {
        let s = Array2::<f64>::zeros((0, 0));
        let tags: [&str; 0] = [];
        assert_eq!(fix_tags(&s, &tags), Err(Error::EmptyInput));
    }
}
