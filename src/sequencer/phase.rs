use std::fmt;

use serde::Deserialize;

/// Mission phases, in the fixed order a mission flies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionPhase {
    Prelaunch,
    Ascent,
    CoastToApoapsis,
    #[serde(rename = "CIRCULARIZE_1")]
    Circularize1,
    WaitTransferWindow,
    TransferBurn,
    CoastToSoi,
    #[serde(rename = "CIRCULARIZE_2")]
    Circularize2,
    Deorbit,
    HighDescent,
    LowDescent,
    Landed,
}

impl MissionPhase {
    pub const ALL: [MissionPhase; 12] = [
        MissionPhase::Prelaunch,
        MissionPhase::Ascent,
        MissionPhase::CoastToApoapsis,
        MissionPhase::Circularize1,
        MissionPhase::WaitTransferWindow,
        MissionPhase::TransferBurn,
        MissionPhase::CoastToSoi,
        MissionPhase::Circularize2,
        MissionPhase::Deorbit,
        MissionPhase::HighDescent,
        MissionPhase::LowDescent,
        MissionPhase::Landed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MissionPhase::Prelaunch => "PRELAUNCH",
            MissionPhase::Ascent => "ASCENT",
            MissionPhase::CoastToApoapsis => "COAST_TO_APOAPSIS",
            MissionPhase::Circularize1 => "CIRCULARIZE_1",
            MissionPhase::WaitTransferWindow => "WAIT_TRANSFER_WINDOW",
            MissionPhase::TransferBurn => "TRANSFER_BURN",
            MissionPhase::CoastToSoi => "COAST_TO_SOI",
            MissionPhase::Circularize2 => "CIRCULARIZE_2",
            MissionPhase::Deorbit => "DEORBIT",
            MissionPhase::HighDescent => "HIGH_DESCENT",
            MissionPhase::LowDescent => "LOW_DESCENT",
            MissionPhase::Landed => "LANDED",
        }
    }
}

impl fmt::Display for MissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
