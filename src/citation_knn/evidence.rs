use crate::Bag;


/// Counts, for each label, how many bags in `indices` carry it.
/// The counts are not normalized.
pub fn evidence<I>(indices: I, bags: &[Bag], n_labels: usize) -> Vec<f64>
    where I: IntoIterator<Item = usize>,
{
    let mut counts = vec![0f64; n_labels];
    for j in indices {
        bags[j].labels()
            .iter()
            .zip(counts.iter_mut())
            .for_each(|(&y, c)| if y { *c += 1.0; });
    }
    counts
}


/// Maps each label to `+1` (present) or `-1` (absent).
pub fn ground_truth(labels: &[bool]) -> Vec<f64> {
    labels.iter()
        .map(|&y| if y { 1.0 } else { -1.0 })
        .collect()
}
