use std::ops::Index;

use rayon::prelude::*;

use crate::{Bag, BagDistance};
use crate::error::{MimlError, Result};


/// A symmetric `n x n` matrix of bag-to-bag distances
/// with a zero diagonal, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceCache {
    size: usize,
    values: Vec<f64>,
}


impl DistanceCache {
    /// Computes all pairwise distances of `bags`.
    /// The metric is evaluated `n (n - 1) / 2` times;
    /// the diagonal is never evaluated.
    /// The first failure of `metric` is returned.
    pub fn build_full<D>(bags: &[Bag], metric: &D) -> Result<Self>
        where D: BagDistance + Sync,
    {
        let size = bags.len();

        // Upper triangle, row by row.
        let upper = (0..size).into_par_iter()
            .map(|i| {
                bags[i+1..].iter()
                    .map(|other| metric.distance(&bags[i], other))
                    .collect::<Result<Vec<f64>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let mut values = vec![0f64; size * size];
        for (i, row) in upper.into_iter().enumerate() {
            for (k, d) in row.into_iter().enumerate() {
                let j = i + 1 + k;
                values[i * size + j] = d;
                values[j * size + i] = d;
            }
        }

        Ok(Self { size, values })
    }


    /// Returns an `(n + 1) x (n + 1)` copy of `self`
    /// where `new_bag` takes index `n`.
    /// Every existing entry is copied unchanged;
    /// only the `n` distances from `new_bag` to `bags` are computed.
    /// `bags` must be the `n` bags `self` was built from.
    pub fn extend_by_one<D>(
        &self,
        bags: &[Bag],
        new_bag: &Bag,
        metric: &D,
    ) -> Result<Self>
        where D: BagDistance + Sync,
    {
        let n = self.size;
        if n != bags.len() {
            return Err(MimlError::InvalidInput(format!(
                "the cache has {n} rows but {} bags are given", bags.len()
            )));
        }

        let column = bags.par_iter()
            .map(|bag| metric.distance(new_bag, bag))
            .collect::<Result<Vec<f64>>>()?;

        let size = n + 1;
        let mut values = Vec::with_capacity(size * size);
        for (i, row) in self.values.chunks(n.max(1)).take(n).enumerate() {
            values.extend_from_slice(row);
            values.push(column[i]);
        }
        values.extend_from_slice(&column);
        values.push(0f64);

        Ok(Self { size, values })
    }


    /// Replace `self` by a previously saved copy.
    pub fn restore(&mut self, saved: DistanceCache) {
        *self = saved;
    }


    /// Returns the number of bags covered by the cache.
    pub fn len(&self) -> usize {
        self.size
    }


    /// Returns `true` if the cache covers no bag.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }


    /// Returns the distances from the `i`-th bag to every bag.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }


    /// Returns `true` if the matrix is symmetric with a zero diagonal.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| {
            self[(i, i)] == 0f64
                && (0..i).all(|j| self[(i, j)] == self[(j, i)])
        })
    }
}


impl Index<(usize, usize)> for DistanceCache {
    type Output = f64;


    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.values[i * self.size + j]
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::HausdorffDistance;

    fn points(xs: &[f64]) -> Vec<Bag> {
        xs.iter()
            .enumerate()
            .map(|(i, &x)| Bag::unlabeled(i, vec![vec![x]]).unwrap())
            .collect()
    }


    #[test]
    fn test_build_full_is_symmetric() {
        let bags = points(&[0.0, 1.0, 4.0, 9.0]);
        let metric = HausdorffDistance::maximal();
        let cache = DistanceCache::build_full(&bags, &metric).unwrap();

        assert_eq!(cache.len(), 4);
        assert!(cache.is_symmetric());
        assert_eq!(cache[(0, 3)], 9.0);
        assert_eq!(cache[(2, 1)], 3.0);
        assert_eq!(cache.row(1), &[1.0, 0.0, 3.0, 8.0]);
    }


    #[test]
    fn test_extend_by_one_keeps_entries() {
        let bags = points(&[0.0, 1.0, 4.0]);
        let metric = HausdorffDistance::maximal();
        let cache = DistanceCache::build_full(&bags, &metric).unwrap();

        let query = Bag::unlabeled("q", vec![vec![2.0]]).unwrap();
        let extended = cache.extend_by_one(&bags, &query, &metric).unwrap();

        assert_eq!(extended.len(), 4);
        assert!(extended.is_symmetric());
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(extended[(i, j)], cache[(i, j)]);
            }
        }
        assert_eq!(extended.row(3), &[2.0, 1.0, 2.0, 0.0]);
    }


    #[test]
    fn test_extend_empty_cache() {
        let metric = HausdorffDistance::maximal();
        let cache = DistanceCache::build_full(&[], &metric).unwrap();
        assert!(cache.is_empty());

        let query = Bag::unlabeled("q", vec![vec![2.0]]).unwrap();
        let extended = cache.extend_by_one(&[], &query, &metric).unwrap();
        assert_eq!(extended.len(), 1);
        assert_eq!(extended[(0, 0)], 0.0);
    }


    #[test]
    fn test_extend_with_wrong_number_of_bags() {
        let bags = points(&[0.0, 1.0, 4.0]);
        let metric = HausdorffDistance::maximal();
        let cache = DistanceCache::build_full(&bags, &metric).unwrap();

        let query = Bag::unlabeled("q", vec![vec![2.0]]).unwrap();
        let extended = cache.extend_by_one(&bags[..2], &query, &metric);
        assert!(matches!(extended, Err(MimlError::InvalidInput(_))));
    }


    #[test]
    fn test_restore() {
        let bags = points(&[0.0, 1.0]);
        let metric = HausdorffDistance::maximal();
        let mut cache = DistanceCache::build_full(&bags, &metric).unwrap();
        let saved = cache.clone();

        let query = Bag::unlabeled("q", vec![vec![5.0]]).unwrap();
        cache = cache.extend_by_one(&bags, &query, &metric).unwrap();
        assert_eq!(cache.len(), 3);

        cache.restore(saved.clone());
        assert_eq!(cache, saved);
    }


    #[test]
    fn test_metric_failure_propagates() {
        let mut bags = points(&[0.0, 1.0]);
        bags.push(Bag::unlabeled("empty", Vec::new()).unwrap());
        let metric = HausdorffDistance::maximal();

        let result = DistanceCache::build_full(&bags, &metric);
        assert!(matches!(result, Err(MimlError::MetricFailure(_))));
    }
}
