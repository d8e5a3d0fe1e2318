use crate::completion::CompletionStore;
use crate::status::StatusBanner;
use crate::view::{DaySection, ExerciseCard, ProgramView};
use maud::{DOCTYPE, Markup, html};
use std::path::Path;

pub fn export_html_page<P: AsRef<Path>>(
    path: P,
    view: &ProgramView,
    completion: &CompletionStore,
    banner: &StatusBanner,
) -> std::io::Result<()> {
    let markup = build_page(view, completion, banner);
    std::fs::write(path, markup.into_string())
}

/// Standalone page: the banner, if any, sits directly before `#workouts`.
pub fn build_page(
    view: &ProgramView,
    completion: &CompletionStore,
    banner: &StatusBanner,
) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head { meta charset="utf-8"; title { "Workout Program" } }
            body {
                main {
                    (banner_markup(banner))
                    div id="workouts" {
                        @for day in &view.days {
                            (day_card(day, completion))
                        }
                    }
                }
            }
        }
    }
}

pub fn banner_markup(banner: &StatusBanner) -> Markup {
    html! {
        @if let Some(status) = banner.current() {
            div id="status-banner" style=(status.severity.css()) { (status.message) }
        }
    }
}

fn day_card(day: &DaySection, completion: &CompletionStore) -> Markup {
    html! {
        div class="day-card" {
            div class="day-header" {
                div class="day-icon" {}
                h2 class="day-title" { (day.title) }
            }
            @for exercise in &day.exercises {
                (exercise_markup(exercise, completion))
            }
        }
    }
}

fn exercise_markup(exercise: &ExerciseCard, completion: &CompletionStore) -> Markup {
    let state = completion.state(&exercise.id);
    html! {
        div.exercise.warmup[exercise.warmup].done[state.is_completed()]
            data-exercise-id=(exercise.id.as_str()) {
            div class="exercise-name" {
                (exercise.name)
                @if exercise.warmup {
                    " "
                    span class="warmup-badge" { "Warmup" }
                }
            }
            div class="exercise-details" {
                div class="detail-item" {
                    span class="detail-label" { "Sets:" }
                    " "
                    span class="detail-value" { (exercise.details.sets) }
                }
                div class="detail-item" {
                    span class="detail-label" { (exercise.details.reps_kind.label()) ":" }
                    " "
                    span class="detail-value" { (exercise.details.reps) }
                }
            }
            @if !exercise.videos.is_empty() {
                div class="video-links" {
                    @for video in &exercise.videos {
                        a href=(video.url) target="_blank" class="video-link" { (video.label) }
                    }
                }
            }
            button class="done-btn" id={ "done-btn-" (exercise.id.as_str()) } { (state.label()) }
        }
    }
}
