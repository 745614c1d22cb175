use std::collections::HashSet;

/// A committed base pair between two original sequence positions, `i < j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BasePair {
    pub i: usize,
    pub j: usize,
}

impl BasePair {
    /// Builds a pair from two positions given in either order.
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { i: a, j: b }
        } else {
            Self { i: b, j: a }
        }
    }

    /// `true` if exactly one endpoint of `other` lies inside this pair.
    pub fn crosses(&self, other: &BasePair) -> bool {
        (self.i < other.i && other.i < self.j && self.j < other.j)
            || (other.i < self.i && self.i < other.j && other.j < self.j)
    }
}

/// Append-only list of base pairs in commit order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairList {
    pairs: Vec<BasePair>,
}

impl PairList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pair: BasePair) {
        self.pairs.push(pair);
    }

    /// Appends every pair of `other`, keeping its order.
    pub fn append(&mut self, other: PairList) {
        self.pairs.extend(other.pairs);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BasePair> {
        self.pairs.iter()
    }

    pub fn as_slice(&self) -> &[BasePair] {
        &self.pairs
    }

    pub fn contains(&self, pair: &BasePair) -> bool {
        self.pairs.contains(pair)
    }

    /// Every position that takes part in at least one pair.
    pub fn paired_positions(&self) -> HashSet<usize> {
        self.pairs.iter().flat_map(|p| [p.i, p.j]).collect()
    }

    /// Pairs of mutually crossing entries, in commit order.
    pub fn crossing_pairs(&self) -> Vec<(BasePair, BasePair)> {
        let mut crossings = Vec::new();
        for (idx, a) in self.pairs.iter().enumerate() {
            for b in &self.pairs[idx + 1..] {
                if a.crosses(b) {
                    crossings.push((*a, *b));
                }
            }
        }
        crossings
    }

    pub fn is_nested(&self) -> bool {
        self.crossing_pairs().is_empty()
    }

    /// The pairs sorted by their 5' position.
    pub fn sorted(&self) -> Vec<BasePair> {
        let mut sorted = self.pairs.clone();
        sorted.sort_unstable();
        sorted
    }
}

impl From<Vec<BasePair>> for PairList {
    fn from(pairs: Vec<BasePair>) -> Self {
        Self { pairs }
    }
}

impl FromIterator<BasePair> for PairList {
    fn from_iter<T: IntoIterator<Item = BasePair>>(iter: T) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PairList {
    type Item = &'a BasePair;
    type IntoIter = std::slice::Iter<'a, BasePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_orders_endpoints() {
        assert_eq!(BasePair::new(9, 2), BasePair { i: 2, j: 9 });
    }

    #[test]
    fn crossing_is_symmetric_and_excludes_nesting() {
        let a = BasePair::new(0, 10);
        let b = BasePair::new(5, 15);
        let nested = BasePair::new(2, 8);
        let disjoint = BasePair::new(11, 14);
        assert!(a.crosses(&b));
        assert!(b.crosses(&a));
        assert!(!a.crosses(&nested));
        assert!(!a.crosses(&disjoint));
    }

    #[test]
    fn crossing_pairs_reports_each_conflict_once() {
        let pairs: PairList = vec![
            BasePair::new(0, 10),
            BasePair::new(5, 15),
            BasePair::new(1, 9),
        ]
        .into();
        let crossings = pairs.crossing_pairs();
        assert_eq!(crossings.len(), 2);
        assert!(!pairs.is_nested());
    }

    #[test]
    fn append_keeps_commit_order() {
        let mut a: PairList = vec![BasePair::new(0, 9)].into();
        let b: PairList = vec![BasePair::new(2, 7), BasePair::new(3, 6)].into();
        a.append(b);
        let order: Vec<_> = a.iter().map(|p| p.i).collect();
        assert_eq!(order, vec![0, 2, 3]);
        assert_eq!(a.paired_positions().len(), 6);
    }
}
