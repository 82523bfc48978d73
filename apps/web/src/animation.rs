#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SwimMode {
    Swimming,
    Paused,
}

const SWIM_SPEED: f64 = 1.1;
const SWIM_MAX_FRAME_DELTA: f64 = 0.25;
const SWIM_FULL_CIRCLE: f64 = 2.0 * std::f64::consts::PI;

/// Advances the swim phase of the radial fish dots from wall-clock seconds.
/// The phase stays within one full circle and never runs backwards.
pub fn advance_swim_phase(
    phase: f64,
    last_tick: Option<f64>,
    now_seconds: f64,
    mode: SwimMode,
) -> (f64, Option<f64>) {
    let delta = last_tick
        .map(|last| (now_seconds - last).max(0.0).min(SWIM_MAX_FRAME_DELTA))
        .unwrap_or(0.0);

    let next_phase = match mode {
        SwimMode::Swimming => (phase + delta * SWIM_SPEED).rem_euclid(SWIM_FULL_CIRCLE),
        SwimMode::Paused => phase.rem_euclid(SWIM_FULL_CIRCLE),
    };

    (next_phase, Some(now_seconds))
}

#[cfg(test)]
mod tests {
    use super::{advance_swim_phase, SwimMode, SWIM_FULL_CIRCLE, SWIM_SPEED};

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual}, diff {diff}"
        );
    }

    #[test]
    fn first_tick_initializes_clock_without_advancing() {
        let start_phase = 0.75;
        let (phase, last_tick) = advance_swim_phase(start_phase, None, 5.0, SwimMode::Swimming);

        assert_close(phase, start_phase);
        assert_eq!(last_tick, Some(5.0));
    }

    #[test]
    fn swimming_advances_and_wraps() {
        let start_phase = SWIM_FULL_CIRCLE - 0.05;
        let (phase, last_tick) =
            advance_swim_phase(start_phase, Some(2.0), 2.2, SwimMode::Swimming);

        let expected = (start_phase + 0.2 * SWIM_SPEED).rem_euclid(SWIM_FULL_CIRCLE);
        assert_close(phase, expected);
        assert_eq!(last_tick, Some(2.2));
    }

    #[test]
    fn paused_keeps_phase_but_updates_clock() {
        let start_phase = 1.5;
        let (phase, last_tick) = advance_swim_phase(start_phase, Some(1.0), 1.3, SwimMode::Paused);

        assert_close(phase, start_phase);
        assert_eq!(last_tick, Some(1.3));
    }

    #[test]
    fn large_frame_gap_is_clamped() {
        let (phase, _) = advance_swim_phase(0.0, Some(3.0), 60.0, SwimMode::Swimming);

        assert_close(phase, 0.25 * SWIM_SPEED);
    }

    #[test]
    fn backwards_time_does_not_reverse_the_phase() {
        let start_phase = 2.8;
        let (phase, last_tick) =
            advance_swim_phase(start_phase, Some(9.0), 8.0, SwimMode::Swimming);

        assert_close(phase, start_phase);
        assert_eq!(last_tick, Some(8.0));
    }
}
