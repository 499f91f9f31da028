use std::path::Path;

use rocket_guidance::config::load_mission;
use rocket_guidance::sequencer::MissionPhase;
use rocket_guidance::vehicle::presets;

fn mission_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("missions").join(name)
}

#[test]
fn bundled_orbit_mission_matches_preset() {
    let loaded = load_mission(mission_path("orbit.toml")).unwrap();
    assert_eq!(loaded, presets::orbit());
}

#[test]
fn bundled_landing_mission_loads() {
    let loaded = load_mission(mission_path("mun_landing.toml")).unwrap();
    let preset = presets::mun_landing();
    assert_eq!(loaded.phases, preset.phases);
    assert_eq!(loaded.ascent, preset.ascent);
    assert_eq!(loaded.descent, preset.descent);
    assert_eq!(loaded.timing.timeout_secs, Some(7_200.0));
    assert_eq!(loaded.phases.last(), Some(&MissionPhase::Landed));
}
