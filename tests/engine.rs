use std::time::Duration;

use tokio::time::{sleep, Instant};
use traffic_intersection::{ConfigError, CrossingCounts, EngineConfig, Phase, SimulationEngine};

/// Green after one second and for a long time.
fn long_green_config() -> EngineConfig {
    EngineConfig {
        red_hold: Duration::from_secs(1),
        green_hold: Duration::from_secs(120),
        ..EngineConfig::default()
    }
}

// Dispatcher ticks land at 0.5s, 1.5s, 2.5s ... after start.
async fn wait_for_phase(engine: &SimulationEngine, phase: Phase) {
    for _ in 0..200 {
        if engine.current_phase() == phase {
            return;
        }
        sleep(Duration::from_millis(100)).await;
    }
    panic!("phase never became {}", phase);
}

#[tokio::test(start_paused = true)]
async fn phase_cycles_with_twelve_second_period() {
    let engine = SimulationEngine::start_default();
    let start = Instant::now();
    assert_eq!(engine.current_phase(), Phase::Red);

    let expectations = [
        (2_500, Phase::Red),
        (5_100, Phase::Green),
        (9_900, Phase::Green),
        (10_100, Phase::Yellow),
        (12_100, Phase::Red),
        (17_100, Phase::Green),
        (22_100, Phase::Yellow),
        (24_100, Phase::Red),
    ];
    for (at_ms, expected) in expectations {
        tokio::time::sleep_until(start + Duration::from_millis(at_ms)).await;
        assert_eq!(engine.current_phase(), expected, "at {}ms", at_ms);
    }

    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn two_vehicles_drain_one_per_tick_once_green() {
    let engine = SimulationEngine::start_default();
    engine.add_vehicle("v1");
    engine.add_vehicle("v2");
    assert_eq!(engine.queue_size(), 2);

    wait_for_phase(&engine, Phase::Green).await;
    assert_eq!(engine.queue_size(), 2);

    sleep(Duration::from_secs(1)).await;
    assert_eq!(engine.queue_size(), 1);

    sleep(Duration::from_secs(1)).await;
    assert_eq!(engine.queue_size(), 0);
    assert_eq!(engine.crossings().released, 2);

    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn light_timing_counts_from_start_even_if_tasks_start_late() {
    let engine = SimulationEngine::start_default();
    let start = Instant::now();

    // Background tasks get their first poll only after 3s have passed.
    tokio::time::advance(Duration::from_secs(3)).await;

    tokio::time::sleep_until(start + Duration::from_millis(4_900)).await;
    assert_eq!(engine.current_phase(), Phase::Red);
    tokio::time::sleep_until(start + Duration::from_millis(5_100)).await;
    assert_eq!(engine.current_phase(), Phase::Green);

    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn nothing_is_released_during_red() {
    let engine = SimulationEngine::start_default();
    for id in ["A", "B", "C"] {
        engine.add_vehicle(id);
    }

    // Ticks at 0.5s through 4.5s all see red.
    sleep(Duration::from_millis(4_800)).await;
    assert_eq!(engine.current_phase(), Phase::Red);
    assert_eq!(engine.queue_size(), 3);
    assert_eq!(engine.crossings(), CrossingCounts::default());

    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn sustained_green_releases_at_most_one_per_tick() {
    let engine = SimulationEngine::start(long_green_config()).unwrap();
    for i in 0..100 {
        engine.add_vehicle(format!("car-{}", i));
    }

    // Green from 1s; ticks at 1.5s..=10.5s release one each.
    sleep(Duration::from_millis(10_750)).await;
    assert_eq!(engine.current_phase(), Phase::Green);
    assert_eq!(engine.queue_size(), 90);
    assert_eq!(engine.crossings().released, 10);

    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn released_vehicles_finish_crossing() {
    let engine = SimulationEngine::start(long_green_config()).unwrap();
    engine.add_vehicle("a");
    engine.add_vehicle("b");

    sleep(Duration::from_millis(2_750)).await;
    let counts = engine.crossings();
    assert_eq!(counts.released, 2);
    assert_eq!(counts.completed, 0);

    // Both crossings end before 2.5s + 4s.
    sleep(Duration::from_millis(4_000)).await;
    let counts = engine.crossings();
    assert_eq!(counts.completed, 2);
    assert_eq!(counts.in_flight(), 0);

    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_abandons_in_flight_crossings_and_stops_the_light() {
    let engine = SimulationEngine::start(long_green_config()).unwrap();
    engine.add_vehicle("crossing");

    sleep(Duration::from_millis(2_000)).await;
    assert_eq!(engine.crossings().in_flight(), 1);

    engine.shutdown().await;
    let counts = engine.crossings();
    assert_eq!(counts.abandoned, 1);
    assert_eq!(counts.completed, 0);
    assert!(!engine.is_running());

    let frozen = engine.current_phase();
    engine.add_vehicle("after");
    sleep(Duration::from_secs(200)).await;
    assert_eq!(engine.current_phase(), frozen);
    assert_eq!(engine.queue_size(), 1);

    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn queue_survives_shutdown_untouched() {
    let engine = SimulationEngine::start_default();
    engine.add_vehicle("x");
    engine.add_vehicle("x");
    engine.add_vehicle("");
    engine.shutdown().await;
    assert_eq!(engine.queue_size(), 3);
}

#[tokio::test]
async fn invalid_config_spawns_nothing() {
    let config = EngineConfig {
        crossing_min: Duration::from_secs(4),
        crossing_max: Duration::from_secs(2),
        ..EngineConfig::default()
    };
    assert_eq!(
        SimulationEngine::start(config).unwrap_err(),
        ConfigError::EmptyCrossingRange {
            min: Duration::from_secs(4),
            max: Duration::from_secs(2),
        }
    );
}

#[tokio::test(start_paused = true)]
async fn snapshot_serializes_for_monitoring() {
    let engine = SimulationEngine::start_default();
    engine.add_vehicle("v1");
    wait_for_phase(&engine, Phase::Green).await;

    let json = serde_json::to_value(engine.snapshot()).unwrap();
    assert_eq!(json["phase"], "GREEN");
    assert_eq!(json["queue_size"], 1);

    engine.shutdown().await;
}
