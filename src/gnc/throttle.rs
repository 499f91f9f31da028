// ---------------------------------------------------------------------------
// Geometric throttle steps
// ---------------------------------------------------------------------------

/// Scale `throttle` toward terminal velocity.
///
/// Above terminal velocity the throttle is multiplied by `damping` (< 1),
/// otherwise divided by it. The result is clamped to `[floor, 1]`; the floor
/// stays non-zero so the engine keeps the reaction wheels powered.
pub fn regulate_to_terminal(throttle: f64, speed: f64, terminal: f64, damping: f64, floor: f64) -> f64 {
    let next = if speed > terminal {
        throttle * damping
    } else {
        throttle / damping
    };
    next.clamp(floor, 1.0)
}

/// One geometric throttle step for powered descent.
///
/// When more thrust is needed from a dead engine the throttle first jumps to
/// `minimum` so it can grow at all. Results below `minimum` snap to 0.
pub fn step_throttle(throttle: f64, increase: bool, factor: f64, minimum: f64) -> f64 {
    let next = if increase {
        let base = if throttle <= 0.0 { minimum } else { throttle };
        base / factor
    } else {
        throttle * factor
    };
    let next = next.clamp(0.0, 1.0);
    if next < minimum {
        0.0
    } else {
        next
    }
}
