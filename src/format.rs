use crate::record::{
    INSTRUCTION_VIDEO_1, INSTRUCTION_VIDEO_2, REPS_MAX, REPS_MIN, REPS_UNIT, Record, SETS_MAX,
    SETS_MIN,
};
use serde::Serialize;

/// `repsUnit` value for counted repetitions; any other unit is a duration.
pub const REPETITIONS: &str = "repetitions";

/// How the rep range of an exercise is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RepsKind {
    Reps,
    Duration,
}

impl RepsKind {
    pub fn label(self) -> &'static str {
        match self {
            RepsKind::Reps => "Reps",
            RepsKind::Duration => "Duration",
        }
    }
}

/// Display strings for the sets and reps of one exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseDetails {
    pub sets: String,
    pub reps_kind: RepsKind,
    pub reps: String,
}

/// A numbered instruction video link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoLink {
    pub label: String,
    pub url: String,
}

/// Collapse a min/max pair to a single value when both sides are equal.
pub fn range_text(min: &str, max: &str) -> String {
    if min == max {
        min.to_string()
    } else {
        format!("{min}-{max}")
    }
}

pub fn exercise_details(record: &Record) -> ExerciseDetails {
    let sets = range_text(record.get(SETS_MIN), record.get(SETS_MAX));
    let reps = range_text(record.get(REPS_MIN), record.get(REPS_MAX));
    let unit = record.get(REPS_UNIT);
    if unit == REPETITIONS {
        ExerciseDetails {
            sets,
            reps_kind: RepsKind::Reps,
            reps,
        }
    } else {
        let reps = format!("{reps} {unit}").trim_end().to_string();
        ExerciseDetails {
            sets,
            reps_kind: RepsKind::Duration,
            reps,
        }
    }
}

/// Instruction videos in column order, numbered by position among the
/// non-empty ones.
pub fn video_links(record: &Record) -> Vec<VideoLink> {
    [INSTRUCTION_VIDEO_1, INSTRUCTION_VIDEO_2]
        .iter()
        .map(|field| record.get(field))
        .filter(|url| !url.is_empty())
        .enumerate()
        .map(|(i, url)| VideoLink {
            label: format!("Video {}", i + 1),
            url: url.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    #[test]
    fn equal_bounds_collapse() {
        assert_eq!(range_text("3", "3"), "3");
        assert_eq!(range_text("3", "5"), "3-5");
        assert_eq!(range_text("", ""), "");
        assert_eq!(range_text("03", "3"), "03-3");
    }

    #[test]
    fn repetitions_use_reps_label_without_unit() {
        let d = exercise_details(&rec(&[
            (SETS_MIN, "3"),
            (SETS_MAX, "4"),
            (REPS_MIN, "8"),
            (REPS_MAX, "8"),
            (REPS_UNIT, "repetitions"),
        ]));
        assert_eq!(d.sets, "3-4");
        assert_eq!(d.reps_kind.label(), "Reps");
        assert_eq!(d.reps, "8");
    }

    #[test]
    fn other_units_are_durations() {
        let d = exercise_details(&rec(&[
            (SETS_MIN, "1"),
            (SETS_MAX, "1"),
            (REPS_MIN, "30"),
            (REPS_MAX, "60"),
            (REPS_UNIT, "seconds"),
        ]));
        assert_eq!(d.reps_kind, RepsKind::Duration);
        assert_eq!(d.reps, "30-60 seconds");
    }

    #[test]
    fn missing_unit_is_a_duration_without_suffix() {
        let d = exercise_details(&rec(&[(REPS_MIN, "60"), (REPS_MAX, "60")]));
        assert_eq!(d.reps_kind, RepsKind::Duration);
        assert_eq!(d.reps, "60");
    }

    #[test]
    fn videos_are_numbered_by_kept_position() {
        let both = rec(&[
            (INSTRUCTION_VIDEO_1, "https://a"),
            (INSTRUCTION_VIDEO_2, "https://b"),
        ]);
        let links = video_links(&both);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].label, "Video 1");
        assert_eq!(links[1].url, "https://b");

        let second_only = rec(&[(INSTRUCTION_VIDEO_2, "https://b")]);
        assert_eq!(
            video_links(&second_only),
            vec![VideoLink {
                label: "Video 1".into(),
                url: "https://b".into()
            }]
        );

        assert!(video_links(&rec(&[])).is_empty());
    }
}
