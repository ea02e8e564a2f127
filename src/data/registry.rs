//! The season's race registry.
//!
//! Rounds are listed in running order. Adding a race means appending an entry
//! here and dropping the matching result files into the XML directory.
//!
//! The multiclass series shares tracks with the sprint cup but runs a P2UR and
//! a GT3 field in the same session, so each of its rounds carries one alien
//! lap time per class.

use crate::domain::{ImprovementWindows, RaceClass, RaceRound, Series};
use crate::error::AppError;

const SEASON: [RaceRound; 5] = [
    RaceRound {
        round_index: 1,
        track_name: "Portimao",
        file_stem: "s3-sc1",
        reference_lap_seconds: 103.14,
    },
    RaceRound {
        round_index: 2,
        track_name: "Le Mans",
        file_stem: "s3-sc2",
        reference_lap_seconds: 235.31,
    },
    RaceRound {
        round_index: 3,
        track_name: "Interlagos",
        file_stem: "s3-sc3",
        reference_lap_seconds: 93.65,
    },
    RaceRound {
        round_index: 4,
        track_name: "Monza",
        file_stem: "s3-sc4",
        reference_lap_seconds: 99.01,
    },
    RaceRound {
        round_index: 5,
        track_name: "Sebring",
        file_stem: "s3-sc5",
        reference_lap_seconds: 120.17,
    },
];

struct MulticlassRound {
    round_index: u32,
    track_name: &'static str,
    file_stem: &'static str,
    p2ur_reference: f64,
    gt3_reference: f64,
}

const MULTICLASS: [MulticlassRound; 4] = [
    MulticlassRound {
        round_index: 1,
        track_name: "Portimao",
        file_stem: "s3-mc1",
        p2ur_reference: 91.53,
        gt3_reference: 103.14,
    },
    MulticlassRound {
        round_index: 2,
        track_name: "Le Mans",
        file_stem: "s3-mc2",
        p2ur_reference: 206.83,
        gt3_reference: 235.31,
    },
    MulticlassRound {
        round_index: 3,
        track_name: "Interlagos",
        file_stem: "s3-mc3",
        p2ur_reference: 82.86,
        gt3_reference: 93.65,
    },
    MulticlassRound {
        round_index: 4,
        track_name: "Monza",
        file_stem: "s3-mc4",
        p2ur_reference: 87.27,
        gt3_reference: 99.01,
    },
];

/// Number of rounds at each end of the season compared for improvement.
const WINDOW_LEN: usize = 2;

/// All configured rounds, in order.
pub fn season() -> &'static [RaceRound] {
    &SEASON
}

/// Rounds of a series, with reference times resolved for the class.
///
/// The multiclass series cannot be scored without a class.
pub fn rounds_for(series: Series, race_class: Option<RaceClass>) -> Result<Vec<RaceRound>, AppError> {
    match (series, race_class) {
        (Series::Sprint, _) => Ok(SEASON.to_vec()),
        (Series::Multiclass, Some(class)) => Ok(MULTICLASS
            .iter()
            .map(|r| RaceRound {
                round_index: r.round_index,
                track_name: r.track_name,
                file_stem: r.file_stem,
                reference_lap_seconds: match class {
                    RaceClass::P2ur => r.p2ur_reference,
                    RaceClass::Gt3 => r.gt3_reference,
                },
            })
            .collect()),
        (Series::Multiclass, None) => Err(AppError::config(
            "The multiclass series needs a car class (--class P2UR or --class GT3)",
        )),
    }
}

/// Early/late windows: the first two and the last two rounds.
pub fn improvement_windows(rounds: &[RaceRound]) -> ImprovementWindows {
    let n = rounds.len().min(WINDOW_LEN);
    ImprovementWindows {
        early: rounds.iter().take(n).map(|r| r.round_index).collect(),
        late: rounds[rounds.len() - n..].iter().map(|r| r.round_index).collect(),
    }
}
