//! Workout program viewer: application shell and persistent user settings.

use dirs_next as dirs;
use eframe::{App, Frame, NativeOptions, egui};
use rfd::FileDialog;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};

use log::info;

mod completion;
mod export;
use export::{save_program_json, save_records_csv, save_records_json};
mod format;
mod grouping;
mod loader;
use loader::{
    DEFAULT_BASE_URL, DEFAULT_DATA_FILE, FileSource, HttpSource, LoadError, ProgramSource,
    TextSource, decode_text, resolve_base_url,
};
mod parser;
mod pipeline;
use pipeline::{Orchestrator, Program, load_program};
mod record;
mod report;
use report::export_html_page;
mod status;
mod ui;
use ui::{show_banner, show_program};
mod view;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_true() -> bool {
    true
}

/// Persistent configuration.
///
/// Serialized to a JSON file in the user's config directory. Every field has
/// a serde default so older or hand-edited files still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Settings {
    /// Origin the program file is fetched from. `GYM_PROGRAM_URL` wins over
    /// this value.
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_data_file")]
    data_file: String,
    /// Set after opening a CSV from disk; reloads read that file until the
    /// server is selected again in the settings window.
    #[serde(default)]
    last_local_file: Option<String>,
    #[serde(default = "default_true")]
    load_on_start: bool,
}

impl Settings {
    const FILE: &'static str = "gym_program_viewer_settings.json";

    fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(Self::FILE))
    }

    fn load() -> Self {
        if let Some(path) = Self::path() {
            if let Ok(data) = std::fs::read_to_string(&path) {
                match serde_json::from_str(&data) {
                    Ok(cfg) => return cfg,
                    Err(e) => log::warn!("Ignoring invalid settings {}: {e}", path.display()),
                }
            }
        }
        Self::default()
    }

    fn save(&self) {
        if let Some(path) = Self::path() {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(data) = serde_json::to_string_pretty(self) {
                if let Err(e) = std::fs::write(&path, data) {
                    log::error!("Failed to save settings to {}: {e}", path.display());
                }
            }
        }
    }

    /// Where the next load reads from.
    fn source(&self) -> Box<dyn ProgramSource + Send> {
        match &self.last_local_file {
            Some(path) => Box::new(FileSource::new(path)),
            None => Box::new(HttpSource::new(
                resolve_base_url(&self.base_url),
                self.data_file.clone(),
            )),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            data_file: default_data_file(),
            last_local_file: None,
            load_on_start: true,
        }
    }
}

type LoadOutcome = (String, Result<Program, LoadError>);

struct ProgramApp {
    settings: Settings,
    settings_dirty: bool,
    show_settings: bool,
    orchestrator: Orchestrator,
    pending: Option<Receiver<LoadOutcome>>,
    started: bool,
}

impl Default for ProgramApp {
    fn default() -> Self {
        Self {
            settings: Settings::load(),
            settings_dirty: false,
            show_settings: false,
            orchestrator: Orchestrator::default(),
            pending: None,
            started: false,
        }
    }
}

impl ProgramApp {
    /// Run the pipeline for `source` on a worker thread. Returns `false`, and
    /// does nothing, while another load is still running.
    fn start_load(&mut self, ctx: &egui::Context, source: Box<dyn ProgramSource + Send>) -> bool {
        if !self.orchestrator.begin() {
            info!("Load already in progress, ignoring {}", source.resource());
            return false;
        }
        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let resource = source.resource();
            let result = load_program(source.as_ref());
            let _ = tx.send((resource, result));
            ctx.request_repaint();
        });
        self.pending = Some(rx);
        true
    }

    fn reload(&mut self, ctx: &egui::Context) {
        let source = self.settings.source();
        self.start_load(ctx, source);
    }

    fn poll_load(&mut self) {
        let Some(polled) = self.pending.as_ref().map(|rx| rx.try_recv()) else {
            return;
        };
        match polled {
            Ok((resource, result)) => {
                self.pending = None;
                self.orchestrator.finish(&resource, result);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                let resource = self.settings.data_file.clone();
                self.orchestrator.finish(
                    &resource,
                    Err(LoadError::Transport {
                        resource: resource.clone(),
                        source: "loader thread stopped before reporting".into(),
                    }),
                );
            }
        }
    }

    /// Load a CSV from disk and remember it for later reloads, but only if
    /// the load was actually started.
    fn open_local_file(&mut self, ctx: &egui::Context, path: PathBuf) -> bool {
        let remembered = path.display().to_string();
        if !self.start_load(ctx, Box::new(FileSource::new(path))) {
            return false;
        }
        self.settings.last_local_file = Some(remembered);
        self.settings_dirty = true;
        true
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        for file in ctx.input(|i| i.raw.dropped_files.clone()) {
            let ext_ok = file
                .path
                .as_ref()
                .and_then(|p| p.extension())
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("csv"))
                .unwrap_or_else(|| file.name.to_lowercase().ends_with(".csv"));
            if !ext_ok {
                continue;
            }

            let started = if let Some(path) = file.path.clone() {
                self.open_local_file(ctx, path)
            } else if let Some(bytes) = file.bytes {
                let source = TextSource {
                    name: file.name.clone(),
                    text: decode_text(&bytes),
                };
                self.start_load(ctx, Box::new(source))
            } else {
                false
            };
            // One program at a time; the rest of a multi-file drop is ignored.
            if started {
                break;
            }
        }
    }

    fn export_html(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("HTML", &["html"])
            .set_file_name("program.html")
            .save_file()
        else {
            return;
        };
        let Some(program) = self.orchestrator.program() else {
            return;
        };
        let result = export_html_page(
            &path,
            &program.view,
            self.orchestrator.completion(),
            self.orchestrator.banner(),
        );
        match result {
            Ok(()) => {
                info!("Exported program to {}", path.display());
                if let Err(e) = open::that(&path) {
                    log::error!("Failed to open {}: {e}", path.display());
                }
            }
            Err(e) => self.report_export_error(e),
        }
    }

    fn export_records(&mut self, json: bool) {
        let (name, ext) = if json {
            ("records.json", "json")
        } else {
            ("records.csv", "csv")
        };
        let Some(path) = FileDialog::new()
            .add_filter(ext, &[ext])
            .set_file_name(name)
            .save_file()
        else {
            return;
        };
        let Some(program) = self.orchestrator.program() else {
            return;
        };
        let result = if json {
            save_records_json(&path, &program.records).map_err(|e| e.to_string())
        } else {
            save_records_csv(&path, &program.records).map_err(|e| e.to_string())
        };
        if let Err(e) = result {
            self.report_export_error(e);
        }
    }

    fn export_program_json(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("json", &["json"])
            .set_file_name("program.json")
            .save_file()
        else {
            return;
        };
        let Some(program) = self.orchestrator.program() else {
            return;
        };
        if let Err(e) = save_program_json(&path, &program.view) {
            self.report_export_error(e);
        }
    }

    fn report_export_error(&mut self, e: impl std::fmt::Display) {
        log::error!("Failed to export: {e}");
        self.orchestrator
            .banner_mut()
            .error(format!("Export failed: {e}"));
    }

    fn settings_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings;
        let mut apply = false;
        egui::Window::new("Settings")
            .open(&mut open)
            .show(ctx, |ui| {
                egui::Grid::new("settings_grid").show(ui, |ui| {
                    ui.label("Base URL");
                    if ui.text_edit_singleline(&mut self.settings.base_url).changed() {
                        self.settings_dirty = true;
                    }
                    ui.end_row();
                    ui.label("Program file");
                    if ui.text_edit_singleline(&mut self.settings.data_file).changed() {
                        self.settings_dirty = true;
                    }
                    ui.end_row();
                });
                if ui
                    .checkbox(&mut self.settings.load_on_start, "Load on start")
                    .changed()
                {
                    self.settings_dirty = true;
                }
                if let Some(local) = &self.settings.last_local_file {
                    ui.label(format!("Currently reading {local}"));
                }
                if ui.button("Use server and reload").clicked() {
                    apply = true;
                }
            });
        self.show_settings = open;
        if apply {
            self.settings.last_local_file = None;
            self.settings_dirty = true;
            self.reload(ctx);
        }
    }
}

impl App for ProgramApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if !self.started {
            self.started = true;
            if self.settings.load_on_start {
                self.reload(ctx);
            }
        }
        self.poll_load();
        self.handle_dropped_files(ctx);

        let has_program = self.orchestrator.program().is_some();
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Reload").clicked() {
                        self.reload(ctx);
                        ui.close_menu();
                    }
                    if ui.button("Open CSV…").clicked() {
                        ui.close_menu();
                        if let Some(path) = FileDialog::new().add_filter("CSV", &["csv"]).pick_file()
                        {
                            self.open_local_file(ctx, path);
                        }
                    }
                    ui.separator();
                    if ui
                        .add_enabled(has_program, egui::Button::new("Export HTML…"))
                        .clicked()
                    {
                        ui.close_menu();
                        self.export_html();
                    }
                    if ui
                        .add_enabled(has_program, egui::Button::new("Export Records CSV…"))
                        .clicked()
                    {
                        ui.close_menu();
                        self.export_records(false);
                    }
                    if ui
                        .add_enabled(has_program, egui::Button::new("Export Records JSON…"))
                        .clicked()
                    {
                        ui.close_menu();
                        self.export_records(true);
                    }
                    if ui
                        .add_enabled(has_program, egui::Button::new("Export Program JSON…"))
                        .clicked()
                    {
                        ui.close_menu();
                        self.export_program_json();
                    }
                    ui.separator();
                    if ui.button("Settings").clicked() {
                        self.show_settings = true;
                        ui.close_menu();
                    }
                });
                if let Some(program) = self.orchestrator.program() {
                    ui.separator();
                    ui.label(format!(
                        "{}: {} exercises, {} done",
                        program.resource,
                        program.view.exercise_count(),
                        self.orchestrator.completion().completed_count()
                    ));
                }
                if self.orchestrator.is_loading() {
                    ui.spinner();
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            show_banner(ui, self.orchestrator.banner());
            egui::ScrollArea::vertical().show(ui, |ui| {
                let (view, store) = self.orchestrator.view_and_completion();
                if let Some(view) = view {
                    show_program(ui, view, store);
                }
            });
        });

        if self.show_settings {
            self.settings_window(ctx);
        }

        if self.settings_dirty {
            self.settings.save();
            self.settings_dirty = false;
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.settings.save();
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let options = NativeOptions::default();
    eframe::run_native(
        "Gym Program",
        options,
        Box::new(|_cc| Box::new(ProgramApp::default())),
    )
}
