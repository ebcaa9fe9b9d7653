//! Two engines, same seed, same config.
//! They must produce byte-identical output files and identical event logs.

use laborsim_core::{
    config::ModelConfig,
    engine::{calc_chosen_utility, ChoiceEngine},
    population::generate_population,
    rng::SimRng,
    store::read_f64_array,
};
use std::path::PathBuf;

fn test_config(seed: u64, tag: &str) -> ModelConfig {
    let path: PathBuf = std::env::temp_dir()
        .join(format!("laborsim-det-{}-{tag}-{seed}.npy", std::process::id()));
    ModelConfig {
        num_grid: 20_000,
        seed,
        output_path: path.display().to_string(),
        ..ModelConfig::default()
    }
}

fn payloads(engine: &ChoiceEngine) -> Vec<String> {
    engine.event_log().iter().map(|e| e.payload.clone()).collect()
}

#[test]
fn same_seed_produces_byte_identical_output() {
    let _ = env_logger::builder().is_test(true).try_init();
    const SEED: u64 = 1234;

    let config_a = test_config(SEED, "a");
    let config_b = test_config(SEED, "b");
    let mut engine_a = ChoiceEngine::new(config_a.clone()).unwrap();
    let mut engine_b = ChoiceEngine::new(config_b.clone()).unwrap();

    let out_a = engine_a.run_and_persist().unwrap();
    let out_b = engine_b.run_and_persist().unwrap();

    assert_eq!(out_a.chosen_utility.len(), 20_000);
    assert_eq!(out_a.summary, out_b.summary);

    let bytes_a = std::fs::read(&config_a.output_path).unwrap();
    let bytes_b = std::fs::read(&config_b.output_path).unwrap();
    assert_eq!(bytes_a, bytes_b, "output files diverged under the same seed");

    // The output_written events name different paths; everything before matches.
    let log_a = payloads(&engine_a);
    let log_b = payloads(&engine_b);
    assert_eq!(log_a.len(), 5);
    assert_eq!(log_a[..4], log_b[..4]);

    std::fs::remove_file(&config_a.output_path).unwrap();
    std::fs::remove_file(&config_b.output_path).unwrap();
}

#[test]
fn different_seeds_produce_different_output() {
    let mut engine_a = ChoiceEngine::new(test_config(42, "x")).unwrap();
    let mut engine_b = ChoiceEngine::new(test_config(99, "x")).unwrap();

    let out_a = engine_a.run().unwrap();
    let out_b = engine_b.run().unwrap();
    assert_ne!(out_a.chosen_utility, out_b.chosen_utility);
}

#[test]
fn persisted_file_matches_in_memory_outcome() {
    let config = test_config(7, "persist");
    let mut engine = ChoiceEngine::new(config.clone()).unwrap();
    let outcome = engine.run_and_persist().unwrap();

    let loaded = read_f64_array(&config.output_path).unwrap();
    assert_eq!(loaded, outcome.chosen_utility);
    for (i, choice) in outcome.choices.iter().enumerate() {
        assert_eq!(loaded[i], outcome.utilities.rows()[i][choice.index()]);
    }
    std::fs::remove_file(&config.output_path).unwrap();
}

#[test]
fn engine_draws_population_before_shocks() {
    let config = ModelConfig { num_grid: 1_000, ..ModelConfig::default_test() };
    let mut engine = ChoiceEngine::new(config.clone()).unwrap();
    let outcome = engine.run().unwrap();

    // Same stream by hand: population first, then the function chain.
    let mut rng = SimRng::new(config.seed).with_name("labor_choice");
    let cons = generate_population(&mut rng, config.max_grid, config.num_grid).unwrap();
    let chosen = calc_chosen_utility(&cons, config.floor, config.disutility, &mut rng).unwrap();

    assert_eq!(cons, outcome.consumption);
    assert_eq!(chosen, outcome.chosen_utility);
    assert_eq!(rng.draws(), 3 * config.num_grid as u64);
}

#[test]
fn zero_agents_runs_cleanly() {
    let config = ModelConfig { num_grid: 0, ..test_config(1234, "empty") };
    let mut engine = ChoiceEngine::new(config.clone()).unwrap();
    let outcome = engine.run_and_persist().unwrap();

    assert!(outcome.chosen_utility.is_empty());
    assert!(read_f64_array(&config.output_path).unwrap().is_empty());
    std::fs::remove_file(&config.output_path).unwrap();
}

#[test]
fn engine_refuses_a_second_run() {
    let mut engine = ChoiceEngine::new(ModelConfig::default_test()).unwrap();
    engine.run().unwrap();
    assert!(engine.run().is_err());
}

#[test]
fn output_length_matches_num_grid() {
    for n in [1, 2, 17, 1_000] {
        let config = ModelConfig { num_grid: n, ..ModelConfig::default_test() };
        let outcome = ChoiceEngine::new(config).unwrap().run().unwrap();
        assert_eq!(outcome.chosen_utility.len(), n);
        assert_eq!(outcome.summary.agents, n);
    }
}
