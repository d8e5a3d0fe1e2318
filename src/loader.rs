use std::io::Read;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";
pub const DEFAULT_DATA_FILE: &str = "gym.csv";

/// Determine the origin the program file is fetched from.
///
/// If the `GYM_PROGRAM_URL` environment variable is set, its value takes
/// precedence over the base URL stored in the application settings.
pub fn resolve_base_url(settings_url: &str) -> String {
    std::env::var("GYM_PROGRAM_URL").unwrap_or_else(|_| settings_url.to_string())
}

/// Decode a program body as UTF-8, replacing invalid bytes and dropping a
/// leading byte-order mark.
pub fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(text.as_ref()).to_string()
}

/// Join a resource name onto a base URL.
pub fn resource_url(base: &str, name: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{name}")
    } else {
        format!("{base}/{name}")
    }
}

#[derive(Debug)]
pub enum LoadError {
    Status {
        resource: String,
        status: u16,
        status_text: String,
    },
    Transport {
        resource: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    Read {
        resource: String,
        source: std::io::Error,
    },
    File {
        resource: String,
        source: std::io::Error,
    },
}

impl LoadError {
    pub fn resource(&self) -> &str {
        match self {
            LoadError::Status { resource, .. }
            | LoadError::Transport { resource, .. }
            | LoadError::Read { resource, .. }
            | LoadError::File { resource, .. } => resource,
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Status {
                resource,
                status,
                status_text,
            } => write!(f, "Failed to load {resource}: {status} {status_text}"),
            LoadError::Transport { resource, source } => {
                write!(f, "Failed to load {resource}: {source}")
            }
            LoadError::Read { resource, source } => {
                write!(f, "Failed to read {resource}: {source}")
            }
            LoadError::File { resource, source } => {
                write!(f, "Failed to open {resource}: {source}")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Status { .. } => None,
            LoadError::Transport { source, .. } => Some(&**source),
            LoadError::Read { source, .. } | LoadError::File { source, .. } => Some(source),
        }
    }
}

/// Somewhere the program text can be read from.
pub trait ProgramSource {
    /// Name used in status messages and logs.
    fn resource(&self) -> String;

    fn fetch(&self) -> Result<String, LoadError>;
}

/// Fetches the program over HTTP from the configured origin.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    name: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            name: name.into(),
        }
    }

    pub fn url(&self) -> String {
        resource_url(&self.base_url, &self.name)
    }
}

impl ProgramSource for HttpSource {
    fn resource(&self) -> String {
        self.name.clone()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        let url = self.url();
        log::info!("Fetching program from {url}");
        let response = ureq::get(&url)
            .set("Cache-Control", "no-store")
            .set("Pragma", "no-cache")
            .call();
        match response {
            Ok(r) => {
                let mut body = Vec::new();
                r.into_reader()
                    .read_to_end(&mut body)
                    .map_err(|e| LoadError::Read {
                        resource: self.name.clone(),
                        source: e,
                    })?;
                Ok(decode_text(&body))
            }
            Err(ureq::Error::Status(status, r)) => Err(LoadError::Status {
                resource: self.name.clone(),
                status,
                status_text: r.status_text().to_string(),
            }),
            Err(e) => Err(LoadError::Transport {
                resource: self.name.clone(),
                source: Box::new(e),
            }),
        }
    }
}

/// Reads the program from a CSV file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProgramSource for FileSource {
    fn resource(&self) -> String {
        self.path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn fetch(&self) -> Result<String, LoadError> {
        log::info!("Reading program from {}", self.path.display());
        let bytes = std::fs::read(&self.path).map_err(|e| LoadError::File {
            resource: self.resource(),
            source: e,
        })?;
        Ok(decode_text(&bytes))
    }
}

/// An already loaded program text, e.g. from a dropped file.
#[derive(Debug, Clone)]
pub struct TextSource {
    pub name: String,
    pub text: String,
}

impl ProgramSource for TextSource {
    fn resource(&self) -> String {
        self.name.clone()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        Ok(self.text.clone())
    }
}
