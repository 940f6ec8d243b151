use serde::{
    Serialize,
    Deserialize,
};

use crate::error::{MimlError, Result};


/// A labeled pattern made of a set of instances.
/// Each instance is a feature vector of a fixed length,
/// and the bag carries one boolean per label.
///
/// Deserialization goes through [`Bag::new`],
/// so ragged instances are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBag")]
pub struct Bag {
    id: String,
    instances: Vec<Vec<f64>>,
    labels: Vec<bool>,
}


/// Unchecked fields of a deserialized `Bag`.
#[derive(Deserialize)]
struct RawBag {
    id: String,
    instances: Vec<Vec<f64>>,
    #[serde(default)]
    labels: Vec<bool>,
}


impl TryFrom<RawBag> for Bag {
    type Error = MimlError;


    fn try_from(raw: RawBag) -> Result<Self> {
        Self::new(raw.id, raw.instances, raw.labels)
    }
}


impl Bag {
    /// Construct a new bag.
    /// All instances must have the same number of features.
    pub fn new<S>(id: S, instances: Vec<Vec<f64>>, labels: Vec<bool>)
        -> Result<Self>
        where S: ToString,
    {
        let id = id.to_string();
        if let Some(first) = instances.first() {
            let n_features = first.len();
            let mismatch = instances.iter()
                .position(|instance| instance.len() != n_features);
            if let Some(k) = mismatch {
                return Err(MimlError::InvalidInput(format!(
                    "bag `{id}`: instance {k} has {} features, \
                     expected {n_features}",
                    instances[k].len(),
                )));
            }
        }

        Ok(Self { id, instances, labels })
    }


    /// Construct a bag without labels.
    /// Such a bag can only be used as a query for prediction.
    pub fn unlabeled<S>(id: S, instances: Vec<Vec<f64>>) -> Result<Self>
        where S: ToString,
    {
        Self::new(id, instances, Vec::new())
    }


    /// Returns the identifier of the bag.
    pub fn id(&self) -> &str {
        &self.id
    }


    /// Returns the instances of the bag.
    pub fn instances(&self) -> &[Vec<f64>] {
        &self.instances[..]
    }


    /// Returns the label vector of the bag.
    pub fn labels(&self) -> &[bool] {
        &self.labels[..]
    }


    /// Returns the number of instances.
    pub fn n_instances(&self) -> usize {
        self.instances.len()
    }


    /// Returns the number of features per instance.
    /// An empty bag has no features.
    pub fn n_features(&self) -> usize {
        self.instances.first()
            .map(|instance| instance.len())
            .unwrap_or(0)
    }


    /// Returns the number of labels this bag carries.
    pub fn n_labels(&self) -> usize {
        self.labels.len()
    }


    /// Returns `true` if the `label`-th label is set.
    pub fn has_label(&self, label: usize) -> bool {
        self.labels.get(label).copied().unwrap_or(false)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bag_shape() {
        let bag = Bag::new(
            "b0",
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
            vec![true, false],
        ).unwrap();

        assert_eq!(bag.id(), "b0");
        assert_eq!(bag.n_instances(), 3);
        assert_eq!(bag.n_features(), 2);
        assert_eq!(bag.n_labels(), 2);
        assert!(bag.has_label(0));
        assert!(!bag.has_label(1));
        assert!(!bag.has_label(7));
    }

    #[test]
    fn test_ragged_instances_are_rejected() {
        let bag = Bag::new(
            "ragged",
            vec![vec![1.0, 2.0], vec![3.0]],
            vec![true],
        );
        assert!(matches!(bag, Err(MimlError::InvalidInput(_))));
    }

    #[test]
    fn test_deserialized_bag_is_checked() {
        let json = r#"{ "id": "b", "instances": [[1.0, 2.0], [3.0]] }"#;
        let bag = serde_json::from_str::<Bag>(json);
        assert!(bag.is_err());

        let json = r#"{ "id": "b", "instances": [[1.0, 2.0]], "labels": [true] }"#;
        let bag = serde_json::from_str::<Bag>(json).unwrap();
        assert_eq!(bag.n_features(), 2);
        assert!(bag.has_label(0));
    }


    #[test]
    fn test_unlabeled_bag() {
        let bag = Bag::unlabeled("q", vec![vec![0.0; 4]]).unwrap();
        assert_eq!(bag.n_labels(), 0);
        assert_eq!(bag.n_features(), 4);
    }
}
