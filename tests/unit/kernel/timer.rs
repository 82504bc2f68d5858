use super::*;

#[test]
fn test_fires_once_per_interval() {
    let t0 = Instant::now();
    let mut timer = PeriodicTimer::new();
    timer.start(Duration::from_millis(100), t0);

    assert!(!timer.poll(t0));
    assert!(!timer.poll(t0 + Duration::from_millis(99)));
    assert!(timer.poll(t0 + Duration::from_millis(100)));
    assert!(!timer.poll(t0 + Duration::from_millis(150)));
    assert!(timer.poll(t0 + Duration::from_millis(200)));
}

#[test]
fn test_missed_periods_fire_once() {
    let t0 = Instant::now();
    let mut timer = PeriodicTimer::new();
    timer.start(Duration::from_millis(10), t0);

    let late = t0 + Duration::from_secs(5);
    assert!(timer.poll(late));
    assert!(!timer.poll(late));
    assert_eq!(timer.next_due(), Some(late + Duration::from_millis(10)));
}

#[test]
fn test_stop_prevents_further_fires() {
    let t0 = Instant::now();
    let mut timer = PeriodicTimer::new();
    timer.start(Duration::from_millis(10), t0);
    timer.stop();

    assert!(!timer.is_running());
    assert!(!timer.poll(t0 + Duration::from_secs(1)));
}

#[test]
fn test_zero_interval_does_not_arm() {
    let mut timer = PeriodicTimer::new();
    timer.start(Duration::ZERO, Instant::now());
    assert!(!timer.is_running());
}
