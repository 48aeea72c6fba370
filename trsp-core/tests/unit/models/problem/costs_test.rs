use super::*;

#[test]
fn can_create_matrix_transport_cost() {
    let transport = create_matrix_transport_cost(vec![0., 1., 2., 0.], vec![0., 10., 20., 0.]).unwrap();

    assert_eq!(transport.size(), 2);
    assert_eq!(transport.duration(0, 1), 1.);
    assert_eq!(transport.duration(1, 0), 2.);
    assert_eq!(transport.distance(1, 0), 20.);
}

parameterized_test! {can_detect_invalid_matrix, (durations, distances, expected), {
    can_detect_invalid_matrix_impl(durations, distances, expected);
}}

can_detect_invalid_matrix! {
    case01_empty: (vec![], vec![], "no matrix data found"),
    case02_mismatch: (vec![0.; 4], vec![0.; 1], "distance and duration collections have different length"),
    case03_not_square: (vec![0.; 3], vec![0.; 3], "matrix is not square: 3 items"),
    case04_negative: (vec![0., -1., 1., 0.], vec![0.; 4], "matrix contains negative or non finite values"),
    case05_infinite: (vec![0.; 4], vec![0., f64::INFINITY, 1., 0.], "matrix contains negative or non finite values"),
}

fn can_detect_invalid_matrix_impl(durations: Vec<Duration>, distances: Vec<Distance>, expected: &str) {
    let result = create_matrix_transport_cost(durations, distances);

    assert_eq!(result.err().map(|err| err.to_string()), Some(expected.to_string()));
}

#[test]
fn can_create_euclidean_transport_cost() {
    let transport = create_euclidean_transport_cost(&[(0., 0.), (3., 4.)]).unwrap();

    assert_eq!(transport.distance(0, 1), 5.);
    assert_eq!(transport.duration(1, 0), 5.);
    assert_eq!(transport.distance(1, 1), 0.);
}
