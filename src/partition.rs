//! Class membership bookkeeping.

use crate::error::{Error, Result};

/// Items grouped by class id.
///
/// `members(c)` lists the items labelled `c` in ascending index order. An
/// empty class is an empty list, never a missing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping {
    classes: Vec<Vec<usize>>,
}

impl Grouping {
    /// Group `labels` into `n_classes` classes.
    ///
    /// Fails if any label is `>= n_classes`.
    pub fn from_labels(labels: &[usize], n_classes: usize) -> Result<Self> {
        let mut classes = vec![Vec::new(); n_classes];
        for (index, &label) in labels.iter().enumerate() {
            match classes.get_mut(label) {
                Some(members) => members.push(index),
                None => {
                    return Err(Error::LabelOutOfRange {
                        index,
                        label,
                        n_classes,
                    })
                }
            }
        }
        Ok(Self { classes })
    }

    /// Number of classes (including empty ones).
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Members of class `class`, ascending.
    pub fn members(&self, class: usize) -> &[usize] {
        &self.classes[class]
    }

    /// Number of members of `class`.
    pub fn size(&self, class: usize) -> usize {
        self.classes[class].len()
    }

    /// Iterate over `(class, members)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.classes
            .iter()
            .enumerate()
            .map(|(c, members)| (c, members.as_slice()))
    }

    /// Move `item` from class `from` to class `to`.
    ///
    /// Member lists stay sorted, so the result is identical to rebuilding
    /// from the updated labels.
    pub(crate) fn move_item(&mut self, item: usize, from: usize, to: usize) {
        if let Ok(pos) = self.classes[from].binary_search(&item) {
            let _ = self.classes[from].remove(pos);
        }
        if let Err(pos) = self.classes[to].binary_search(&item) {
            self.classes[to].insert(pos, item);
        }
    }
}
