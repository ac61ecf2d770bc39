use crate::{ElapsedClock, format_elapsed};

/// WHAT: A halted clock ignores ticks
/// WHY: The timer is frozen between recordings
#[test]
fn given_halted_clock_when_ticking_then_frozen() {
    // Given: A clock that ran for two ticks and was halted
    let mut clock = ElapsedClock::default();
    clock.restart();
    clock.tick();
    clock.tick();
    clock.halt();

    // When: Ticking again
    let value = clock.tick();

    // Then: Value stays at two
    assert_eq!(value, 2);
    assert!(!clock.is_running());
}

/// WHAT: Restart resets to zero
/// WHY: Each take is timed from zero
#[test]
fn given_running_clock_when_restarting_then_zero() {
    // Given: A clock at three seconds
    let mut clock = ElapsedClock::default();
    clock.restart();
    for _ in 0..3 {
        clock.tick();
    }

    // When: Restarting
    clock.restart();

    // Then: Zero and running
    assert_eq!(clock.elapsed_secs(), 0);
    assert!(clock.is_running());
}

/// WHAT: Elapsed time renders as zero-padded MM:SS
/// WHY: Matches the recording badge format
#[test]
fn given_seconds_when_formatting_then_minutes_and_seconds_padded() {
    // Given/When/Then: Representative values
    assert_eq!(format_elapsed(0), "00:00");
    assert_eq!(format_elapsed(9), "00:09");
    assert_eq!(format_elapsed(75), "01:15");
    assert_eq!(format_elapsed(3600), "60:00");
}
