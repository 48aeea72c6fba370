use super::*;

#[test]
fn can_create_demand() {
    assert_eq!(Demand::new(&[1, 2]).map(|demand| demand.as_vec()), Some(vec![1, 2]));
    assert_eq!(Demand::single(3).as_vec(), vec![3]);
    assert!(Demand::new(&[0; DEMAND_DIMENSION_SIZE + 1]).is_none());
    assert!(Demand::default().is_empty());
    assert!(Demand::new(&[0, -1]).is_some_and(|demand| demand.has_negative()));
}

#[test]
fn can_sum_and_sub_demands() {
    let a = Demand::new(&[1, 2]).unwrap();
    let b = Demand::single(3);

    assert_eq!((a + b).as_vec(), vec![4, 2]);
    assert_eq!((a - b).as_vec(), vec![-2, 2]);
    assert_eq!([a, b, b].into_iter().sum::<Demand>().as_vec(), vec![7, 2]);
}

#[test]
fn can_use_specific_functions() {
    let a = Demand::new(&[1, 5]).unwrap();
    let b = Demand::new(&[3, 2]).unwrap();

    assert_eq!(a.max_per_dim(b).as_vec(), vec![3, 5]);
    assert_eq!(Demand::new(&[-1, 2]).unwrap().non_negative().as_vec(), vec![0, 2]);

    let capacity = Demand::new(&[10, 10]).unwrap();
    assert!(capacity.can_fit(&a));
    assert!(capacity.can_fit(&Demand::new(&[10, 10]).unwrap()));
    assert!(!capacity.can_fit(&Demand::new(&[4, 11]).unwrap()));
    assert!(!Demand::default().can_fit(&Demand::single(1)));

    assert_eq!(a.to_string(), "[1, 5]");
}
