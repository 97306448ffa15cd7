use scantrack_apps::LocatorConfig;
use scantrack_base::GatingPolicy;

#[test]
fn verify_sample_configs() {
    let files = vec![
        "config/sample_locator_config.toml",
        "config/sample_locator_config_with_rejection.toml",
        "config/raw_range_config.toml",
    ];
    for f in files {
        let result = LocatorConfig::try_new(f);
        assert!(result.is_ok(), "{:?} {:?}", f, result);
        let ser_result = toml::to_string(&result.unwrap());
        assert!(ser_result.is_ok(), "{:?} {:?}", f, ser_result);
    }
}

#[test]
fn sample_config_matches_default() {
    let sample = LocatorConfig::try_new("config/sample_locator_config.toml").unwrap();
    assert_eq!(
        toml::to_string(&sample).unwrap(),
        toml::to_string(&LocatorConfig::default()).unwrap()
    );

    let rejection =
        LocatorConfig::try_new("config/sample_locator_config_with_rejection.toml").unwrap();
    assert_eq!(rejection.tracker.gating, GatingPolicy::Reject);
    assert!(!rejection.publish_filtered_scan);
    assert!(rejection.use_tracker);
}

#[test]
fn ser_default_config() {
    toml::to_string(&LocatorConfig::default()).unwrap();
}
