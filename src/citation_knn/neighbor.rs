//! Reference and citer selection over a [`DistanceCache`].
//!
//! - The **references** of bag `i` are the `R` bags nearest to `i`.
//! - The **citers** of bag `i` are the bags that count `i`
//!   among their own references, capped at the `C` nearest to `i`.
//!
//! Ties on distance are broken by ascending bag index,
//! so the selection is deterministic.
use std::cmp::Ordering;
use std::collections::{BinaryHeap, BTreeSet};

use fixedbitset::FixedBitSet;
use rayon::prelude::*;

use super::distance_cache::DistanceCache;


/// A candidate neighbor ordered by `(distance, index)`.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f64,
    index: usize,
}


impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}


impl Eq for Candidate {}


impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}


impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance.total_cmp(&other.distance)
            .then_with(|| self.index.cmp(&other.index))
    }
}


/// Keeps the `k` smallest candidates with a bounded max-heap.
/// The result is sorted in ascending order.
fn k_smallest<I>(candidates: I, k: usize) -> Vec<usize>
    where I: Iterator<Item = Candidate>,
{
    if k == 0 { return Vec::new(); }

    let mut heap = BinaryHeap::with_capacity(k + 1);
    for candidate in candidates {
        if heap.len() < k {
            heap.push(candidate);
        } else if heap.peek().is_some_and(|top| candidate < *top) {
            heap.pop();
            heap.push(candidate);
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|candidate| candidate.index)
        .collect()
}


/// Returns the `n_references` bags nearest to the `i`-th bag,
/// nearest first. The `i`-th bag itself is never returned.
pub fn references(
    distances: &DistanceCache,
    i: usize,
    n_references: usize,
) -> Vec<usize>
{
    let candidates = distances.row(i)
        .iter()
        .copied()
        .enumerate()
        .filter(|&(j, _)| j != i)
        .map(|(index, distance)| Candidate { distance, index });
    k_smallest(candidates, n_references)
}


/// Returns at most `n_citers` bags that have the `i`-th bag
/// among their references, nearest to `i` first.
pub fn citers(
    distances: &DistanceCache,
    references: &ReferenceMatrix,
    i: usize,
    n_citers: usize,
) -> Vec<usize>
{
    let row = distances.row(i);
    let candidates = (0..references.len())
        .filter(|&j| j != i && references.is_reference(j, i))
        .map(|index| Candidate { distance: row[index], index });
    k_smallest(candidates, n_citers)
}


/// Returns the union of the references and the citers of the `i`-th bag.
/// A bag that is both a reference and a citer appears once.
pub fn neighborhood(
    distances: &DistanceCache,
    references: &ReferenceMatrix,
    i: usize,
    n_citers: usize,
) -> BTreeSet<usize>
{
    let mut union = references.references_of(i)
        .collect::<BTreeSet<_>>();
    union.extend(citers(distances, references, i, n_citers));
    union
}


/// `ReferenceMatrix[i][j]` is set iff bag `j` is
/// among the references of bag `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatrix {
    rows: Vec<FixedBitSet>,
}


impl ReferenceMatrix {
    /// Computes the references of every bag covered by `distances`.
    /// Each row costs `O(n log R)`, so the whole matrix costs
    /// `O(n^2 log R)`.
    pub fn compute(distances: &DistanceCache, n_references: usize) -> Self {
        let size = distances.len();
        let rows = (0..size).into_par_iter()
            .map(|i| {
                let mut bits = FixedBitSet::with_capacity(size);
                references(distances, i, n_references)
                    .into_iter()
                    .for_each(|j| { bits.put(j); });
                bits
            })
            .collect::<Vec<_>>();

        Self { rows }
    }


    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }


    /// Returns `true` if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }


    /// Returns `true` if bag `j` is a reference of bag `i`.
    pub fn is_reference(&self, i: usize, j: usize) -> bool {
        self.rows[i].contains(j)
    }


    /// Returns the references of bag `i` in ascending index order.
    pub fn references_of(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.rows[i].ones()
    }


    /// Returns the number of references of bag `i`.
    pub fn count(&self, i: usize) -> usize {
        self.rows[i].count_ones(..)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bag, HausdorffDistance};

    // Bags on a line:
    //
    //   0   1       2           3
    //   |---|-------|-----------|
    //   0   1       4           9
    fn line() -> DistanceCache {
        let bags = [0.0, 1.0, 4.0, 9.0].iter()
            .enumerate()
            .map(|(i, &x)| Bag::unlabeled(i, vec![vec![x]]).unwrap())
            .collect::<Vec<_>>();
        let metric = HausdorffDistance::maximal();
        DistanceCache::build_full(&bags, &metric).unwrap()
    }


    #[test]
    fn test_references_nearest_first() {
        let distances = line();
        assert_eq!(references(&distances, 0, 2), vec![1, 2]);
        assert_eq!(references(&distances, 3, 1), vec![2]);
        assert_eq!(references(&distances, 2, 3), vec![1, 0, 3]);
        assert!(references(&distances, 2, 0).is_empty());
    }


    #[test]
    fn test_reference_matrix() {
        let distances = line();
        let refs = ReferenceMatrix::compute(&distances, 1);

        assert_eq!(refs.len(), 4);
        assert!(refs.is_reference(0, 1));
        assert!(refs.is_reference(1, 0));
        assert!(refs.is_reference(2, 1));
        assert!(refs.is_reference(3, 2));
        assert!((0..4).all(|i| refs.count(i) == 1));
    }


    #[test]
    fn test_citers_are_capped() {
        let distances = line();
        let refs = ReferenceMatrix::compute(&distances, 1);

        // Bags 0 and 2 both cite bag 1.
        assert_eq!(citers(&distances, &refs, 1, 2), vec![0, 2]);
        assert_eq!(citers(&distances, &refs, 1, 1), vec![0]);
        // Nobody cites bag 3.
        assert!(citers(&distances, &refs, 3, 5).is_empty());
    }


    #[test]
    fn test_neighborhood_is_a_set() {
        let distances = line();
        let refs = ReferenceMatrix::compute(&distances, 1);

        // Bag 0 is both the reference and a citer of bag 1.
        let union = neighborhood(&distances, &refs, 1, 2);
        assert_eq!(union.into_iter().collect::<Vec<_>>(), vec![0, 2]);
    }


    #[test]
    fn test_ties_break_by_index() {
        // Four bags at the same location.
        let bags = (0..4)
            .map(|i| Bag::unlabeled(i, vec![vec![1.0, 1.0]]).unwrap())
            .collect::<Vec<_>>();
        let metric = HausdorffDistance::average();
        let distances = DistanceCache::build_full(&bags, &metric).unwrap();

        assert_eq!(references(&distances, 3, 2), vec![0, 1]);
        assert_eq!(references(&distances, 0, 2), vec![1, 2]);
    }
}
