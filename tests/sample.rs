use minimiml::prelude::*;

use polars::prelude::*;


// Six instances grouped into three bags.
//
//   bag |   x    y | a  b
//  -----+----------+------
//    7  |  0.0  1.0 | 1  0
//    7  |  0.5  1.5 | 1  0
//    3  |  4.0  4.0 | 0  1
//    3  |  4.5  3.0 | 0  1
//    3  |  5.0  4.2 | 0  1
//    9  |  9.0  0.0 | 1  1
fn instances(b: &[i64]) -> DataFrame {
    let bag = Series::new("bag", &[7_i64, 7, 3, 3, 3, 9]);
    let x = Series::new("x", &[0.0, 0.5, 4.0, 4.5, 5.0, 9.0]);
    let y = Series::new("y", &[1.0, 1.5, 4.0, 3.0, 4.2, 0.0]);
    let a = Series::new("a", &[1_i64, 1, 0, 0, 0, 1]);
    let b = Series::new("b", b);

    DataFrame::new(vec![bag, x, y, a, b]).unwrap()
}


#[test]
fn bags_from_dataframe() {
    let df = instances(&[0, 0, 1, 1, 1, 1]);
    let sample = MimlSample::from_dataframe(df, "bag", &["a", "b"])
        .unwrap();

    assert_eq!(sample.shape(), (3, 2));
    assert_eq!(sample.n_features(), 2);
    assert_eq!(sample.label_names(), &["a".to_string(), "b".to_string()]);

    let ids = sample.bags()
        .iter()
        .map(|bag| bag.id())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["7", "3", "9"]);

    let bag = &sample[1];
    assert_eq!(bag.n_instances(), 3);
    assert_eq!(bag.instances()[2], vec![5.0, 4.2]);
    assert_eq!(bag.labels(), &[false, true]);

    assert_eq!(sample[2].labels(), &[true, true]);
}


#[test]
fn rows_of_a_bag_must_agree_on_labels() {
    let df = instances(&[0, 1, 1, 1, 1, 1]);
    let sample = MimlSample::from_dataframe(df, "bag", &["a", "b"]);
    assert!(matches!(sample, Err(MimlError::InvalidInput(_))));
}


#[test]
fn missing_columns_are_reported() {
    let df = instances(&[0, 0, 1, 1, 1, 1]);
    let sample = MimlSample::from_dataframe(df, "bag", &["a", "c"]);
    assert!(matches!(sample, Err(MimlError::Polars(_))));
}


#[test]
fn sample_checks_label_count() {
    let bags = vec![
        Bag::new("0", vec![vec![1.0]], vec![true, false]).unwrap(),
        Bag::new("1", vec![vec![2.0]], vec![true]).unwrap(),
    ];
    let sample = MimlSample::new(&["a", "b"], bags);
    assert!(matches!(sample, Err(MimlError::InvalidInput(_))));
}


#[test]
fn sample_checks_instance_length() {
    let bags = vec![
        Bag::new("0", vec![vec![1.0, 2.0]], vec![true]).unwrap(),
        Bag::new("1", vec![vec![2.0]], vec![true]).unwrap(),
    ];
    let sample = MimlSample::new(&["a"], bags);
    assert!(matches!(sample, Err(MimlError::InvalidInput(_))));
}


#[test]
fn query_bags_are_checked() {
    let bags = vec![
        Bag::new("0", vec![vec![1.0, 2.0]], vec![true]).unwrap(),
    ];
    let sample = MimlSample::new(&["a"], bags).unwrap();

    let ok = Bag::unlabeled("q", vec![vec![0.0, 0.0]]).unwrap();
    assert!(sample.check_bag(&ok).is_ok());

    let wide = Bag::unlabeled("q", vec![vec![0.0, 0.0, 0.0]]).unwrap();
    assert!(sample.check_bag(&wide).is_err());
}


#[test]
fn deserialized_samples_are_checked() {
    // Two label names, but the bags carry a single label.
    let json = r#"{
        "label_names": ["a", "b"],
        "bags": [
            { "id": "0", "instances": [[0.0]], "labels": [true] },
            { "id": "1", "instances": [[1.0]], "labels": [false] }
        ]
    }"#;
    let sample = serde_json::from_str::<MimlSample>(json);
    assert!(sample.is_err());
}


#[test]
fn samples_survive_serialization() {
    let bags = vec![
        Bag::new("0", vec![vec![1.0, 2.0]], vec![true, false]).unwrap(),
        Bag::new("1", vec![vec![2.0, 0.5]], vec![false, true]).unwrap(),
        Bag::new("2", vec![vec![3.0, 3.0], vec![4.0, 1.0]], vec![true, true])
            .unwrap(),
    ];
    let sample = MimlSample::new(&["a", "b"], bags).unwrap();

    let json = serde_json::to_string(&sample).unwrap();
    let back = serde_json::from_str::<MimlSample>(&json).unwrap();
    assert_eq!(back.shape(), (3, 2));
    assert_eq!(back.n_features(), 2);
    assert_eq!(back.bags(), sample.bags());

    let mut knn = CitationKnn::new(HausdorffDistance::maximal());
    assert!(knn.train(&back).is_ok());
}
