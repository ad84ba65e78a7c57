//! Integration Tests für die Glühwürmchen-Zustandsmaschine
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen MockOutput + FakeClock

mod common;

use std::time::Duration;

use common::{FakeClock, MockOutput};
use firefly_core::{
    ConfigError, Firefly, FireflyConfig, FireflyId, FireflyOutput, FireflyState, LIGHT_TIME,
    MAX_DARK_TIME, MIN_DARK_TIME, OutputError,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

type TestFirefly<'a> = Firefly<MockOutput, &'a FakeClock, SmallRng>;

fn random_firefly(clock: &FakeClock, seed: u64) -> TestFirefly<'_> {
    Firefly::new(
        MockOutput::new(),
        FireflyId::new(0x27, 0),
        FireflyConfig::default(),
        clock,
        SmallRng::seed_from_u64(seed),
    )
    .unwrap()
}

fn fixed_firefly(clock: &FakeClock, dark_time: Duration) -> TestFirefly<'_> {
    Firefly::with_dark_time(
        MockOutput::new(),
        FireflyId::new(0x27, 0),
        FireflyConfig::default(),
        clock,
        SmallRng::seed_from_u64(42),
        dark_time,
    )
    .unwrap()
}

fn in_dark_range(dark_time: Duration) -> bool {
    dark_time >= MIN_DARK_TIME && dark_time <= MAX_DARK_TIME
}

// ============================================================================
// Tests: MockOutput
// ============================================================================

#[test]
fn test_mock_output_set() {
    let mut mock = MockOutput::new();
    assert_eq!(mock.write_count(), 0);
    assert!(!mock.get());

    mock.set(true).unwrap();

    assert_eq!(mock.write_count(), 1);
    assert!(mock.get());
}

#[test]
fn test_mock_output_fail() {
    let mut mock = MockOutput::new();
    mock.fail_next_write = true;

    let result = mock.set(true);
    assert_eq!(result, Err(OutputError::WriteFailed));
    assert_eq!(mock.write_count(), 0);
    assert!(!mock.get());

    // Second write succeeds
    assert!(mock.set(true).is_ok());
    assert_eq!(mock.history, vec![true]);
}

// ============================================================================
// Tests: Erstellen
// ============================================================================

#[test]
fn test_new_firefly_is_dark() {
    let clock = FakeClock::new();
    clock.set_millis(12_000);

    let ff = Firefly::new(
        MockOutput::lit(),
        FireflyId::new(0x27, 5),
        FireflyConfig::default(),
        &clock,
        SmallRng::seed_from_u64(5),
    )
    .unwrap();

    assert!(!ff.is_lit());
    assert_eq!(ff.state(), FireflyState::Dark);
    assert_eq!(ff.time_dark(), Duration::ZERO);
    assert_eq!(ff.time_lit(), Duration::ZERO);
    assert!(in_dark_range(ff.dark_time()));
    assert_eq!(ff.output().history, vec![false]);
    assert_eq!(ff.id().to_string(), "0x27-5");
    assert_eq!(ff.flashes(), 0);
}

#[test]
fn test_new_firefly_keeps_explicit_dark_time() {
    let clock = FakeClock::new();
    let ff = fixed_firefly(&clock, Duration::from_secs(1));
    assert_eq!(ff.dark_time(), Duration::from_secs(1));
}

#[test]
fn test_new_firefly_propagates_write_error() {
    let clock = FakeClock::new();
    let mut output = MockOutput::new();
    output.fail_next_write = true;

    let result = Firefly::new(
        output,
        FireflyId::new(0x27, 0),
        FireflyConfig::default(),
        &clock,
        SmallRng::seed_from_u64(0),
    );
    assert!(matches!(result, Err(OutputError::WriteFailed)));
}

#[test]
fn test_inverted_config_cannot_build_firefly() {
    let clock = FakeClock::new();

    // Nur new() erzeugt eine Konfiguration, ein umgedrehter Bereich
    // kommt also nie bis zum Ziehen der Dunkelphase
    let config = FireflyConfig::new(LIGHT_TIME, MAX_DARK_TIME, MIN_DARK_TIME);
    assert_eq!(config, Err(ConfigError::InvertedDarkRange));

    let built = config.map(|config| {
        Firefly::new(
            MockOutput::new(),
            FireflyId::new(0x27, 0),
            config,
            &clock,
            SmallRng::seed_from_u64(0),
        )
    });
    assert!(built.is_err());
}

#[test]
fn test_custom_config_drives_timing() {
    let clock = FakeClock::new();
    let config = FireflyConfig::new(
        Duration::from_millis(100),
        Duration::from_millis(200),
        Duration::from_millis(300),
    )
    .unwrap();
    let mut ff = Firefly::new(
        MockOutput::new(),
        FireflyId::new(0x27, 1),
        config,
        &clock,
        SmallRng::seed_from_u64(1),
    )
    .unwrap();

    assert!(ff.dark_time() >= config.min_dark_time());
    assert!(ff.dark_time() <= config.max_dark_time());

    clock.set_millis(300);
    assert_eq!(ff.toggle_if_ready(), Ok(true));
    clock.set_millis(399);
    assert_eq!(ff.toggle_if_ready(), Ok(false));
    clock.set_millis(400);
    assert_eq!(ff.toggle_if_ready(), Ok(true));
    assert!(!ff.is_lit());
}

#[test]
fn test_into_output_releases_written_output() {
    let clock = FakeClock::new();
    let mut ff = fixed_firefly(&clock, Duration::from_secs(1));
    clock.set_millis(1_000);
    ff.toggle_if_ready().unwrap();

    let mut output = ff.into_output();
    assert_eq!(output.history, vec![false, true]);
    assert!(output.get());

    // Ausgang ist wieder frei verwendbar
    output.set(false).unwrap();
    assert_eq!(output.write_count(), 3);
}

// ============================================================================
// Tests: set_lit() und Timing
// ============================================================================

#[test]
fn test_set_lit_true_starts_lit_phase() {
    let clock = FakeClock::new();
    let mut ff = random_firefly(&clock, 1);
    clock.set_millis(3_000);

    ff.set_lit(true).unwrap();

    assert!(ff.is_lit());
    assert_eq!(ff.time_lit(), Duration::ZERO);
    assert_eq!(ff.time_dark(), Duration::ZERO);
    assert_eq!(ff.lit_since(), Duration::from_millis(3_000));
    assert_eq!(ff.flashes(), 1);
}

#[test]
fn test_lit_phase_lasts_light_time() {
    let clock = FakeClock::new();
    let mut ff = random_firefly(&clock, 2);
    ff.set_lit(true).unwrap();

    clock.set_millis(749);
    assert!(!ff.is_ready_to_toggle());
    assert_eq!(ff.time_lit(), Duration::from_millis(749));

    clock.set_millis(750);
    assert!(ff.is_ready_to_toggle());
}

#[test]
fn test_dark_phase_lasts_dark_time() {
    let clock = FakeClock::new();
    let mut ff = random_firefly(&clock, 3);
    ff.set_lit(true).unwrap();
    ff.set_lit(false).unwrap();
    let dark_time = ff.dark_time();
    assert!(in_dark_range(dark_time));

    clock.advance(dark_time - Duration::from_micros(1));
    assert!(!ff.is_ready_to_toggle());

    clock.advance(Duration::from_micros(1));
    assert!(ff.is_ready_to_toggle());
    assert_eq!(ff.time_dark(), dark_time);
}

#[test]
fn test_set_lit_always_redraws_dark_time() {
    let clock = FakeClock::new();
    let mut ff = fixed_firefly(&clock, Duration::from_secs(1));

    ff.set_lit(true).unwrap();
    assert!(in_dark_range(ff.dark_time()));

    // Auch set_lit(false) zieht neu
    let mut redrawn = false;
    for _ in 0..20 {
        let before = ff.dark_time();
        ff.set_lit(false).unwrap();
        assert!(in_dark_range(ff.dark_time()));
        redrawn |= ff.dark_time() != before;
    }
    assert!(redrawn);
}

#[test]
fn test_set_dark_time_pins_next_phase() {
    let clock = FakeClock::new();
    let mut ff = random_firefly(&clock, 4);
    ff.set_dark_time(Duration::from_millis(200));

    clock.set_millis(199);
    assert!(!ff.is_ready_to_toggle());
    clock.set_millis(200);
    assert!(ff.is_ready_to_toggle());
}

#[test]
fn test_redraw_dark_time_stays_in_range() {
    let clock = FakeClock::new();
    let mut ff = fixed_firefly(&clock, Duration::from_millis(10));
    ff.redraw_dark_time();
    assert!(in_dark_range(ff.dark_time()));
}

#[test]
fn test_failed_set_lit_keeps_state() {
    let clock = FakeClock::new();
    let mut ff = Firefly::with_dark_time(
        MockOutput::failing_after(1),
        FireflyId::new(0x27, 7),
        FireflyConfig::default(),
        &clock,
        SmallRng::seed_from_u64(7),
        Duration::from_secs(1),
    )
    .unwrap();

    clock.set_millis(5_000);
    assert_eq!(ff.set_lit(true), Err(OutputError::WriteFailed));
    assert!(!ff.is_lit());
    assert_eq!(ff.lit_since(), Duration::ZERO);
    assert_eq!(ff.dark_time(), Duration::from_secs(1));
    assert_eq!(ff.flashes(), 0);
}

// ============================================================================
// Tests: toggle() / toggle_if_ready()
// ============================================================================

#[test]
fn test_toggle_if_ready_is_noop_when_not_due() {
    let clock = FakeClock::new();
    let mut ff = fixed_firefly(&clock, Duration::from_secs(1));

    for millis in [0, 10, 500, 999] {
        clock.set_millis(millis);
        assert_eq!(ff.toggle_if_ready(), Ok(false));
    }

    assert!(!ff.is_lit());
    assert_eq!(ff.output().write_count(), 1);
}

#[test]
fn test_toggle_ignores_timing() {
    let clock = FakeClock::new();
    let mut ff = fixed_firefly(&clock, Duration::from_secs(1));

    ff.toggle().unwrap();
    assert!(ff.is_lit());
    ff.toggle().unwrap();
    assert!(!ff.is_lit());
    assert_eq!(ff.output().history, vec![false, true, false]);
}

#[test]
fn test_toggle_if_ready_same_instant_is_idempotent() {
    let clock = FakeClock::new();
    let mut ff = fixed_firefly(&clock, Duration::from_secs(1));
    clock.set_millis(1_000);

    assert_eq!(ff.toggle_if_ready(), Ok(true));
    assert_eq!(ff.toggle_if_ready(), Ok(false));
    assert_eq!(ff.toggle_if_ready(), Ok(false));
    assert_eq!(ff.output().write_count(), 2);
}

#[test]
fn test_scenario_fixed_one_second_dark_time() {
    let clock = FakeClock::new();
    let mut ff = fixed_firefly(&clock, Duration::from_secs(1));
    assert_eq!(ff.state(), FireflyState::Dark);

    clock.set_millis(1_000);
    assert_eq!(ff.toggle_if_ready(), Ok(true));
    assert_eq!(ff.state(), FireflyState::Lit);

    clock.set_millis(1_749);
    assert_eq!(ff.toggle_if_ready(), Ok(false));

    clock.set_millis(1_750);
    assert_eq!(ff.toggle_if_ready(), Ok(true));
    assert_eq!(ff.state(), FireflyState::Dark);
    assert!(in_dark_range(ff.dark_time()));
}

#[test]
fn test_round_trip_at_high_polling_rate() {
    let clock = FakeClock::new();
    let mut ff = random_firefly(&clock, 11);

    // (Zeitpunkt, neuer Zustand, gezogene Dunkelphase)
    let mut transitions = Vec::new();
    for millis in 1..=60_000 {
        clock.set_millis(millis);
        if ff.toggle_if_ready().unwrap() {
            transitions.push((Duration::from_millis(millis), ff.is_lit(), ff.dark_time()));
        }
    }

    assert!(transitions.len() >= 14);
    assert!(transitions[0].1, "first transition must light up");

    for pair in transitions.windows(2) {
        let (start, lit, dark_time) = pair[0];
        let (end, next_lit, _) = pair[1];
        assert_ne!(lit, next_lit, "no duplicate transitions");

        let phase = end - start;
        if lit {
            assert_eq!(phase, LIGHT_TIME);
        } else {
            assert!(phase >= dark_time);
            assert!(phase < dark_time + Duration::from_millis(1));
        }
    }

    let history = &ff.output().history;
    assert!(history.windows(2).all(|w| w[0] != w[1]));
}
