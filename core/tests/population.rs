//! Population generation tests.

use laborsim_core::{error::SimError, population::generate_population, rng::SimRng};

#[test]
fn population_has_requested_size_and_range() {
    let mut rng = SimRng::new(1234);
    let cons = generate_population(&mut rng, 1_000_000.0, 10_000).unwrap();

    assert_eq!(cons.len(), 10_000);
    assert_eq!(rng.draws(), 10_000);
    assert!(cons.iter().all(|c| (1.0..1_000_000.0).contains(c)));
}

#[test]
fn population_is_roughly_uniform() {
    let mut rng = SimRng::new(42);
    let cons = generate_population(&mut rng, 101.0, 100_000).unwrap();
    let mean = cons.iter().sum::<f64>() / cons.len() as f64;
    assert!((mean - 51.0).abs() < 0.5, "mean {mean:.3} should be near 51");
}

#[test]
fn same_seed_same_population() {
    let a = generate_population(&mut SimRng::new(7), 50.0, 1_000).unwrap();
    let b = generate_population(&mut SimRng::new(7), 50.0, 1_000).unwrap();
    let c = generate_population(&mut SimRng::new(8), 50.0, 1_000).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn empty_population_is_allowed() {
    let mut rng = SimRng::new(1);
    assert!(generate_population(&mut rng, 10.0, 0).unwrap().is_empty());
    assert_eq!(rng.draws(), 0);
}

#[test]
fn max_grid_must_exceed_one() {
    let mut rng = SimRng::new(1);
    for bad in [1.0, 0.5, f64::INFINITY, f64::NAN] {
        let err = generate_population(&mut rng, bad, 10).unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter { name: "max_grid", .. }));
    }
}
