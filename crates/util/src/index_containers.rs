use std::ops;

/// A sparse map of `usize` to `V` designed for dense, low-valued indexes and backed by a
/// `Vec<Option<V>>`.
///
/// Iteration is always in ascending index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMap<V> {
    vec: Vec<Option<V>>,
    len: usize,
}

impl<V> Default for IndexMap<V> {
    fn default() -> Self {
        Self {
            vec: Vec::new(),
            len: 0,
        }
    }
}

impl<V> IndexMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of occupied indexes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, i: usize) -> bool {
        self.get(i).is_some()
    }

    pub fn get(&self, i: usize) -> Option<&V> {
        self.vec.get(i)?.as_ref()
    }

    /// Return the value at index `i`, inserting the result of `f` first if it is vacant.
    pub fn get_or_insert_with(&mut self, i: usize, f: impl FnOnce() -> V) -> &mut V {
        if !self.contains(i) {
            self.len += 1;
        }
        self.slot(i).get_or_insert_with(f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &V)> + '_ {
        self.vec
            .iter()
            .enumerate()
            .filter_map(|(i, v)| Some((i, v.as_ref()?)))
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    fn slot(&mut self, i: usize) -> &mut Option<V> {
        if i >= self.vec.len() {
            self.vec.resize_with(i + 1, || None);
        }
        &mut self.vec[i]
    }
}

impl<V> ops::Index<usize> for IndexMap<V> {
    type Output = V;

    fn index(&self, index: usize) -> &V {
        self.get(index).expect("no such index in `IndexMap`")
    }
}
