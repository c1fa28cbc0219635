use std::fs;

use prime_oracle::{GrowthStrategy, OnePolicy, OracleConfig, OracleError, PrimeOracle};

#[test]
fn full_section_parses() {
    let src = r#"
[oracle]
initial_bound = 64
one = "prime"
strategy = "segmented"
"#;
    let config = OracleConfig::from_toml_str(src).unwrap();
    assert_eq!(config.initial_bound, 64);
    assert_eq!(config.one, OnePolicy::Prime);
    assert_eq!(config.strategy, GrowthStrategy::Segmented);

    let mut o = PrimeOracle::with_config(config).unwrap();
    assert_eq!(o.max_checked(), 64);
    assert!(o.is_prime(1));
}

#[test]
fn missing_keys_keep_defaults() {
    let config = OracleConfig::from_toml_str("[oracle]\ninitial_bound = 7\n").unwrap();
    assert_eq!(config, OracleConfig::with_bound(7));
    assert_eq!(OracleConfig::from_toml_str("").unwrap(), OracleConfig::default());
}

#[test]
fn unknown_policy_is_a_config_error() {
    let err = OracleConfig::from_toml_str("[oracle]\none = \"maybe\"\n").unwrap_err();
    assert!(matches!(err, OracleError::Config(_)));
}

#[test]
fn negative_bound_in_config_is_rejected_at_construction() {
    let config = OracleConfig::from_toml_str("[oracle]\ninitial_bound = -3\n").unwrap();
    assert_eq!(PrimeOracle::with_config(config).unwrap_err(), OracleError::NegativeBound(-3));
}

#[test]
fn load_missing_file_gives_default() {
    let path = std::env::temp_dir().join("prime-oracle-does-not-exist.toml");
    assert_eq!(OracleConfig::load(&path).unwrap(), OracleConfig::default());
}

#[test]
fn load_reads_file() {
    let path = std::env::temp_dir().join(format!("prime-oracle-{}.toml", std::process::id()));
    fs::write(&path, "[oracle]\nstrategy = \"segmented\"\n").unwrap();
    let config = OracleConfig::load(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(config.strategy, GrowthStrategy::Segmented);
    assert_eq!(config.initial_bound, 1000);
}

#[test]
fn event_capacity_parses() {
    let config = OracleConfig::from_toml_str("[oracle]\nevent_capacity = 4\n").unwrap();
    assert_eq!(config.event_capacity, 4);
    assert_eq!(config, OracleConfig::default().event_capacity(4));
}
