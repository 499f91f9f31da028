// ---------------------------------------------------------------------------
// Guidance: desired pitch as a function of altitude
// ---------------------------------------------------------------------------

/// Gravity-turn angle (deg from vertical) at `altitude`.
///
/// - below `turn_start`: 0 (vertical ascent)
/// - between the two: linear pitchover
/// - above `turn_end`: 90 (horizontal)
pub fn gravity_turn_angle(altitude: f64, turn_start: f64, turn_end: f64) -> f64 {
    let span = turn_end - turn_start;
    let frac = if span > 0.0 {
        (altitude - turn_start) / span
    } else if altitude >= turn_start {
        1.0
    } else {
        0.0
    };
    90.0 * frac.clamp(0.0, 1.0)
}

/// Pitch above the horizon (deg) for the gravity turn.
pub fn gravity_turn_pitch(altitude: f64, turn_start: f64, turn_end: f64) -> f64 {
    90.0 - gravity_turn_angle(altitude, turn_start, turn_end)
}
