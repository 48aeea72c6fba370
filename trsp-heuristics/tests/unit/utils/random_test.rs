use super::*;

#[test]
fn can_generate_values_in_range() {
    let random = DefaultRandom::default();

    (0..1000).for_each(|_| {
        let int = random.uniform_int(2, 5);
        let real = random.uniform_real(2., 5.);

        assert!((2..=5).contains(&int));
        assert!((2. ..5.).contains(&real));
    });

    assert_eq!(random.uniform_int(3, 3), 3);
    assert_eq!(random.uniform_real(3., 3.), 3.);
}

#[test]
fn can_use_repeatable_random_in_different_threads() {
    let sample = || {
        let random = DefaultRandom::new_repeatable();
        (0..10).map(|_| random.uniform_int(0, 1000)).collect::<Vec<_>>()
    };

    let first = std::thread::spawn(sample).join().unwrap();
    let second = std::thread::spawn(sample).join().unwrap();

    assert_eq!(first, second);
}

#[test]
fn can_create_rng_with_seed() {
    let mut first = RandomGen::with_seed(42);
    let mut second = RandomGen::with_seed(42);

    assert_eq!(first.next_u64(), second.next_u64());
}
