use chrono::NaiveDate;
use salvo::Depot;

use super::*;

fn settings(max_occurrences: usize) -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8698,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
        },
        recurrence: RecurrenceConfig {
            horizon: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            max_occurrences,
        },
        storage: StorageConfig::default(),
    }
}

#[test]
fn test_missing_config_is_invariant_violation() {
    let depot = Depot::new();
    let result = get_config_from_depot(&depot);
    assert!(matches!(
        result,
        Err(AppError::CoreError(CoreError::InvariantViolation(_)))
    ));
}

#[test]
fn test_injected_config_is_retrievable() {
    let mut depot = Depot::new();
    depot.inject(Arc::new(settings(10)));

    let found = get_config_from_depot(&depot).unwrap();
    assert_eq!(found.server.bind_addr(), "127.0.0.1:8698");
}

#[test]
fn test_generator_uses_configured_limits() {
    let generator = generator_from_settings(&settings(7)).unwrap();
    assert_eq!(generator.options().max_occurrences, 7);
    assert_eq!(
        generator.options().horizon,
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
    );
}

#[test]
fn test_generator_rejects_zero_cap() {
    assert!(generator_from_settings(&settings(0)).is_err());
}
