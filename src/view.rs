//! Declarative description of the rendered program.
//!
//! [`build_view`] turns grouped records into plain data. The egui and HTML
//! renderers only read it, and completion state lives next to it in a
//! [`crate::completion::CompletionStore`] keyed by [`ExerciseId`].

use crate::format::{ExerciseDetails, VideoLink, exercise_details, video_links};
use crate::grouping::DayGroups;
use crate::record::Record;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Stable key of one rendered exercise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ExerciseId(String);

impl ExerciseId {
    /// `{day}-{orderNr}-{activity}` with whitespace runs replaced by `-`.
    pub fn derive(record: &Record) -> Self {
        let raw = format!(
            "{}-{}-{}",
            record.day(),
            record.order_nr(),
            record.activity()
        );
        Self(WHITESPACE.replace_all(&raw, "-").into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseCard {
    pub id: ExerciseId,
    pub name: String,
    pub warmup: bool,
    pub details: ExerciseDetails,
    pub videos: Vec<VideoLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySection {
    pub title: String,
    pub exercises: Vec<ExerciseCard>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgramView {
    pub days: Vec<DaySection>,
}

impl ProgramView {
    pub fn exercise_count(&self) -> usize {
        self.days.iter().map(|d| d.exercises.len()).sum()
    }

    pub fn exercises(&self) -> impl Iterator<Item = &ExerciseCard> {
        self.days.iter().flat_map(|d| d.exercises.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Build the view for grouped records.
///
/// Exercises whose derived id is already taken, by an earlier derived or
/// suffixed id, get the first free `-2`, `-3`, ... suffix so that each card
/// owns its completion state.
pub fn build_view(groups: &DayGroups) -> ProgramView {
    let mut used: HashSet<ExerciseId> = HashSet::new();
    let days = groups
        .iter()
        .map(|group| DaySection {
            title: group.day.clone(),
            exercises: group
                .records
                .iter()
                .map(|record| card(unique_id(ExerciseId::derive(record), &mut used), record))
                .collect(),
        })
        .collect();
    ProgramView { days }
}

fn unique_id(base: ExerciseId, used: &mut HashSet<ExerciseId>) -> ExerciseId {
    let mut id = base.clone();
    let mut n = 1;
    while used.contains(&id) {
        n += 1;
        id = ExerciseId(format!("{}-{n}", base.0));
    }
    used.insert(id.clone());
    id
}

fn card(id: ExerciseId, record: &Record) -> ExerciseCard {
    ExerciseCard {
        id,
        name: record.activity().to_string(),
        warmup: record.is_warmup(),
        details: exercise_details(record),
        videos: video_links(record),
    }
}
