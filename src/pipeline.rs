use crate::completion::CompletionStore;
use crate::grouping::group_by_day;
use crate::loader::{LoadError, ProgramSource};
use crate::parser::parse_program_csv;
use crate::record::Record;
use crate::status::{LOADING_MESSAGE, StatusBanner, local_file_message, remediation_message};
use crate::view::{ProgramView, build_view};

/// A successfully loaded program.
#[derive(Debug, Clone)]
pub struct Program {
    pub resource: String,
    pub records: Vec<Record>,
    pub view: ProgramView,
}

/// Fetch, parse, group and build the view, strictly in that order.
pub fn load_program(source: &dyn ProgramSource) -> Result<Program, LoadError> {
    let text = source.fetch()?;
    let records = parse_program_csv(&text);
    let groups = group_by_day(records.iter().cloned());
    let view = build_view(&groups);
    log::info!(
        "Loaded {} exercises over {} days from {}",
        view.exercise_count(),
        view.days.len(),
        source.resource()
    );
    Ok(Program {
        resource: source.resource(),
        records,
        view,
    })
}

/// Owns what is on screen: the banner, the current program and its
/// completion state.
#[derive(Debug, Default)]
pub struct Orchestrator {
    banner: StatusBanner,
    program: Option<Program>,
    completion: CompletionStore,
    loading: bool,
}

impl Orchestrator {
    /// Show the loading banner. Returns `false` if a load is already running.
    pub fn begin(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.banner.info(LOADING_MESSAGE);
        true
    }

    /// Apply the outcome of a load started with [`Orchestrator::begin`].
    ///
    /// Success replaces the program and forgets completion state. Failure
    /// leaves whatever was shown before and switches the banner to an error:
    /// the server remediation message, or a plain read error for local files.
    pub fn finish(&mut self, resource: &str, result: Result<Program, LoadError>) {
        self.loading = false;
        match result {
            Ok(program) => {
                self.completion.clear();
                self.banner.clear();
                self.program = Some(program);
            }
            Err(e) => {
                log::error!("{e}");
                let message = match &e {
                    LoadError::File { source, .. } => local_file_message(resource, source),
                    _ => remediation_message(resource),
                };
                self.banner.error(message);
            }
        }
    }

    /// Run a whole load on the current thread.
    pub fn run(&mut self, source: &dyn ProgramSource) {
        if !self.begin() {
            return;
        }
        let result = load_program(source);
        self.finish(&source.resource(), result);
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn banner(&self) -> &StatusBanner {
        &self.banner
    }

    pub fn banner_mut(&mut self) -> &mut StatusBanner {
        &mut self.banner
    }

    pub fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    pub fn completion(&self) -> &CompletionStore {
        &self.completion
    }

    /// The current view together with its mutable completion state.
    pub fn view_and_completion(&mut self) -> (Option<&ProgramView>, &mut CompletionStore) {
        (self.program.as_ref().map(|p| &p.view), &mut self.completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::RepsKind;
    use crate::loader::{FileSource, HttpSource, TextSource};
    use crate::status::Severity;
    use httpmock::prelude::*;

    const SAMPLE: &str = "activityDay,activityOrderNr,activity,warmup,setsMin,setsMax,repsMin,repsMax,repsUnit\n\
Day 1,2,Squat,0,3,3,8,8,repetitions\n\
Day 1,1,Jump Rope,1,1,1,60,60,seconds\n";

    fn text(body: &str) -> TextSource {
        TextSource {
            name: "gym.csv".into(),
            text: body.into(),
        }
    }

    #[test]
    fn begin_shows_loading_banner() {
        let mut orch = Orchestrator::default();
        assert!(orch.begin());
        let status = orch.banner().current().unwrap();
        assert_eq!(status.message, LOADING_MESSAGE);
        assert_eq!(status.severity, Severity::Info);
        assert!(!orch.begin());
    }

    #[test]
    fn end_to_end_over_http() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path("/gym.csv");
            then.status(200).body(SAMPLE);
        });

        let mut orch = Orchestrator::default();
        orch.run(&HttpSource::new(server.base_url(), "gym.csv"));
        m.assert();

        assert!(orch.banner().current().is_none());
        assert!(!orch.is_loading());
        let view = &orch.program().unwrap().view;
        let names: Vec<&str> = view.days[0].exercises.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Jump Rope", "Squat"]);
        let rope = &view.days[0].exercises[0];
        assert!(rope.warmup);
        assert_eq!(rope.details.reps_kind.label(), "Duration");
        assert_eq!(rope.details.reps, "60 seconds");
        let squat = &view.days[0].exercises[1];
        assert_eq!(squat.details.reps_kind, RepsKind::Reps);
        assert_eq!(squat.details.reps, "8");
    }

    #[test]
    fn not_found_shows_remediation_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/gym.csv");
            then.status(404);
        });

        let mut orch = Orchestrator::default();
        orch.run(&HttpSource::new(server.base_url(), "gym.csv"));

        let status = orch.banner().current().unwrap();
        assert_eq!(status.severity, Severity::Error);
        assert_eq!(status.message, remediation_message("gym.csv"));
        assert!(orch.program().is_none());
        assert!(!orch.is_loading());
    }

    #[test]
    fn bom_prefixed_program_groups_by_day() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/gym.csv");
            then.status(200)
                .body(b"\xef\xbb\xbfactivityDay,activityOrderNr,activity\nDay 1,1,Squat".as_slice());
        });

        let program = load_program(&HttpSource::new(server.base_url(), "gym.csv")).unwrap();
        let days: Vec<&str> = program.view.days.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(days, vec!["Day 1"]);
    }

    #[test]
    fn missing_local_file_shows_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut orch = Orchestrator::default();
        orch.run(&FileSource::new(dir.path().join("week1.csv")));

        let status = orch.banner().current().unwrap();
        assert_eq!(status.severity, Severity::Error);
        assert!(status.message.starts_with("Could not read week1.csv from disk"));
        assert!(!status.message.contains("http.server"));
        assert!(orch.program().is_none());
    }

    #[test]
    fn reload_resets_completion() {
        let mut orch = Orchestrator::default();
        orch.run(&text(SAMPLE));
        let (view, store) = orch.view_and_completion();
        let id = view.unwrap().days[0].exercises[0].id.clone();
        store.toggle(&id);
        assert_eq!(orch.completion().completed_count(), 1);

        orch.run(&text(SAMPLE));
        assert_eq!(orch.completion().completed_count(), 0);
    }

    #[test]
    fn failed_reload_keeps_previous_program() {
        let mut orch = Orchestrator::default();
        orch.run(&text(SAMPLE));
        assert!(orch.begin());
        orch.finish(
            "gym.csv",
            Err(LoadError::Status {
                resource: "gym.csv".into(),
                status: 500,
                status_text: "Internal Server Error".into(),
            }),
        );
        assert_eq!(orch.program().unwrap().view.exercise_count(), 2);
        assert_eq!(
            orch.banner().current().unwrap().severity,
            Severity::Error
        );
    }

    #[test]
    fn load_program_keeps_parsed_records() {
        let program = load_program(&text(SAMPLE)).unwrap();
        assert_eq!(program.resource, "gym.csv");
        assert_eq!(program.records.len(), 2);
        assert_eq!(program.records[0].activity(), "Squat");
    }
}
