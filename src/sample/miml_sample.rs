use std::collections::HashMap;
use std::ops::Index;

use polars::prelude::*;
use rayon::prelude::*;
use serde::{
    Serialize,
    Deserialize,
};

use crate::error::{MimlError, Result};
use super::bag::Bag;


/// Struct `MimlSample` holds an ordered collection of bags
/// together with the label names.
/// Every bag carries exactly `n_labels` labels,
/// and every non-empty bag has instances of the same length.
/// These hold for deserialized samples as well,
/// since deserialization goes through [`MimlSample::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawSample")]
pub struct MimlSample {
    label_names: Vec<String>,
    bags: Vec<Bag>,
    n_features: usize,
}


/// Unchecked fields of a deserialized `MimlSample`.
/// `n_features` is recomputed from the bags.
#[derive(Deserialize)]
struct RawSample {
    label_names: Vec<String>,
    bags: Vec<Bag>,
}


impl TryFrom<RawSample> for MimlSample {
    type Error = MimlError;


    fn try_from(raw: RawSample) -> Result<Self> {
        Self::new(&raw.label_names, raw.bags)
    }
}


impl MimlSample {
    /// Construct a new sample from label names and bags.
    pub fn new<S>(label_names: &[S], bags: Vec<Bag>) -> Result<Self>
        where S: ToString,
    {
        let label_names = label_names.iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>();
        let n_labels = label_names.len();

        let n_features = bags.iter()
            .find(|bag| bag.n_instances() > 0)
            .map(|bag| bag.n_features())
            .unwrap_or(0);

        for bag in &bags {
            if bag.n_labels() != n_labels {
                return Err(MimlError::InvalidInput(format!(
                    "bag `{}` has {} labels, expected {n_labels}",
                    bag.id(), bag.n_labels(),
                )));
            }
            if bag.n_instances() > 0 && bag.n_features() != n_features {
                return Err(MimlError::InvalidInput(format!(
                    "bag `{}` has {} features per instance, expected {n_features}",
                    bag.id(), bag.n_features(),
                )));
            }
        }

        Ok(Self { label_names, bags, n_features })
    }


    /// Convert a `polars::DataFrame` into `MimlSample`.
    /// This method takes the ownership for the given `data`.
    ///
    /// Each row of `data` is one instance.
    /// Rows sharing the same value in `bag_column` form a bag,
    /// and bags are ordered by their first appearance.
    /// The columns named in `label_columns` are read as
    /// `value != 0` and must agree on every row of a bag.
    /// All the remaining columns are features.
    pub fn from_dataframe<S>(
        data: DataFrame,
        bag_column: &str,
        label_columns: &[S],
    ) -> Result<Self>
        where S: AsRef<str>,
    {
        let label_names = label_columns.iter()
            .map(|name| name.as_ref().to_string())
            .collect::<Vec<_>>();

        let ids = data.column(bag_column)?
            .cast(&DataType::Utf8)?;
        let ids = ids.utf8()?
            .into_iter()
            .enumerate()
            .map(|(row, id)| {
                id.map(|id| id.to_string())
                    .ok_or_else(|| MimlError::InvalidInput(format!(
                        "row {row} has no value in column `{bag_column}`"
                    )))
            })
            .collect::<Result<Vec<_>>>()?;

        let features = data.get_columns()
            .iter()
            .filter(|series| {
                let name = series.name();
                name != bag_column && !label_names.iter().any(|l| l == name)
            })
            .collect::<Vec<_>>();
        let features = features.into_par_iter()
            .map(column_as_f64)
            .collect::<Result<Vec<_>>>()?;

        let labels = label_names.iter()
            .map(|name| -> Result<Vec<bool>> {
                let column = data.column(name)?;
                let values = column_as_f64(column)?;
                Ok(values.into_iter().map(|v| v != 0.0).collect::<Vec<_>>())
            })
            .collect::<Result<Vec<_>>>()?;

        // Group rows by bag identifier.
        let mut id_to_index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
        for (row, id) in ids.into_iter().enumerate() {
            match id_to_index.get(&id) {
                Some(&k) => { groups[k].1.push(row); },
                None => {
                    id_to_index.insert(id.clone(), groups.len());
                    groups.push((id, vec![row]));
                },
            }
        }

        let bags = groups.into_iter()
            .map(|(id, rows)| {
                let instances = rows.iter()
                    .map(|&row| {
                        features.iter()
                            .map(|column| column[row])
                            .collect::<Vec<_>>()
                    })
                    .collect::<Vec<_>>();

                let first = rows[0];
                let bag_labels = labels.iter()
                    .map(|column| column[first])
                    .collect::<Vec<_>>();

                let disagree = rows.iter()
                    .any(|&row| {
                        labels.iter()
                            .zip(&bag_labels)
                            .any(|(column, &y)| column[row] != y)
                    });
                if disagree {
                    return Err(MimlError::InvalidInput(format!(
                        "the rows of bag `{id}` disagree on their labels"
                    )));
                }

                Bag::new(id, instances, bag_labels)
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(&label_names, bags)
    }


    /// Returns the pair of the number of bags and
    /// the number of labels.
    pub fn shape(&self) -> (usize, usize) {
        (self.bags.len(), self.label_names.len())
    }


    /// Returns the number of bags.
    pub fn n_bags(&self) -> usize {
        self.bags.len()
    }


    /// Returns the number of labels.
    pub fn n_labels(&self) -> usize {
        self.label_names.len()
    }


    /// Returns the number of features per instance.
    pub fn n_features(&self) -> usize {
        self.n_features
    }


    /// Returns the label names.
    pub fn label_names(&self) -> &[String] {
        &self.label_names[..]
    }


    /// Returns a slice of type `Bag`.
    pub fn bags(&self) -> &[Bag] {
        &self.bags[..]
    }


    /// Returns the `idx`-th bag.
    pub fn bag(&self, idx: usize) -> Option<&Bag> {
        self.bags.get(idx)
    }


    /// Check whether `bag` is compatible with `self`.
    /// The instance length must match
    /// and the labels must be either absent or of length `n_labels`.
    pub fn check_bag(&self, bag: &Bag) -> Result<()> {
        let n_labels = self.n_labels();
        if bag.n_labels() != 0 && bag.n_labels() != n_labels {
            return Err(MimlError::InvalidInput(format!(
                "bag `{}` has {} labels, expected {n_labels}",
                bag.id(), bag.n_labels(),
            )));
        }

        if bag.n_instances() > 0 && bag.n_features() != self.n_features {
            return Err(MimlError::InvalidInput(format!(
                "bag `{}` has {} features per instance, expected {}",
                bag.id(), bag.n_features(), self.n_features,
            )));
        }
        Ok(())
    }
}


/// Read a column as a vector of `f64`.
fn column_as_f64(series: &Series) -> Result<Vec<f64>> {
    let name = series.name().to_string();
    let series = series.cast(&DataType::Float64)?;
    let values = series.f64()?
        .into_iter()
        .enumerate()
        .map(|(row, x)| {
            x.ok_or_else(|| MimlError::InvalidInput(format!(
                "row {row} has no value in column `{name}`"
            )))
        })
        .collect::<Result<Vec<f64>>>();
    values
}


impl Index<usize> for MimlSample {
    type Output = Bag;


    fn index(&self, idx: usize) -> &Self::Output {
        &self.bags[idx]
    }
}
