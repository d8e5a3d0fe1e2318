//! egui rendering of the banner and the program view.

use crate::completion::CompletionStore;
use crate::status::StatusBanner;
use crate::view::{DaySection, ExerciseCard, ExerciseId, ProgramView};
use eframe::egui::{self, Color32, RichText};

const WARMUP_COLOR: Color32 = Color32::from_rgb(0xd9, 0x77, 0x06);
const DONE_FILL: Color32 = Color32::from_rgb(0xdc, 0xfc, 0xe7);

fn rgb([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Draw the banner if one is set. Call right before [`show_program`].
pub fn show_banner(ui: &mut egui::Ui, banner: &StatusBanner) {
    let Some(status) = banner.current() else {
        return;
    };
    let (bg, fg) = status.severity.colors();
    egui::Frame::none()
        .fill(rgb(bg))
        .rounding(12.0)
        .inner_margin(egui::Margin::symmetric(16.0, 12.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(&status.message).strong().color(rgb(fg)));
        });
    ui.add_space(16.0);
}

/// Draw every day section. Clicking a card's button flips it in `store`.
pub fn show_program(ui: &mut egui::Ui, view: &ProgramView, store: &mut CompletionStore) {
    for day in &view.days {
        show_day(ui, day, store);
        ui.add_space(12.0);
    }
}

fn show_day(ui: &mut egui::Ui, day: &DaySection, store: &mut CompletionStore) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.heading(&day.title);
            let (done, total) = store.progress(day);
            ui.label(RichText::new(format!("{done}/{total} done")).weak());
        });
        ui.separator();
        for exercise in &day.exercises {
            show_exercise(ui, exercise, store);
        }
    });
}

fn show_exercise(ui: &mut egui::Ui, exercise: &ExerciseCard, store: &mut CompletionStore) {
    let state = store.state(&exercise.id);
    let mut frame = egui::Frame::none()
        .rounding(8.0)
        .inner_margin(egui::Margin::same(8.0));
    if state.is_completed() {
        frame = frame.fill(DONE_FILL);
    } else if exercise.warmup {
        frame = frame.stroke(egui::Stroke::new(1.0, WARMUP_COLOR));
    }

    frame.show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            let mut name = RichText::new(&exercise.name).strong().size(16.0);
            if state.is_completed() {
                name = name.strikethrough();
            }
            ui.label(name);
            if exercise.warmup {
                ui.label(RichText::new("Warmup").small().color(WARMUP_COLOR));
            }
        });
        ui.horizontal(|ui| {
            ui.label(RichText::new("Sets:").weak());
            ui.label(&exercise.details.sets);
            ui.add_space(12.0);
            ui.label(RichText::new(format!("{}:", exercise.details.reps_kind.label())).weak());
            ui.label(&exercise.details.reps);
        });
        if !exercise.videos.is_empty() {
            ui.horizontal(|ui| {
                for video in &exercise.videos {
                    ui.add(
                        egui::Hyperlink::from_label_and_url(&video.label, &video.url)
                            .open_in_new_tab(true),
                    );
                }
            });
        }
        toggle_button(ui, &exercise.id, store);
    });
    ui.add_space(4.0);
}

/// The Done button of one exercise. A click flips its state in `store`.
fn toggle_button(ui: &mut egui::Ui, id: &ExerciseId, store: &mut CompletionStore) -> egui::Response {
    let response = ui.button(store.state(id).label());
    if response.clicked() {
        let next = store.toggle(id);
        log::debug!("{id} -> {next:?}");
    }
    response
}
