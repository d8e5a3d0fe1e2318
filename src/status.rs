pub const LOADING_MESSAGE: &str = "Loading program…";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

impl Severity {
    /// Banner `(background, foreground)` colors as RGB.
    pub fn colors(self) -> ([u8; 3], [u8; 3]) {
        match self {
            Severity::Info => ([0xee, 0xf2, 0xff], [0x37, 0x30, 0xa3]),
            Severity::Error => ([0xff, 0xe6, 0xe6], [0x99, 0x1b, 0x1b]),
        }
    }

    pub fn css(self) -> String {
        let (bg, fg) = self.colors();
        format!(
            "margin:0 0 1rem 0;padding:0.75rem 1rem;border-radius:12px;font-weight:600;\
background:#{:02x}{:02x}{:02x};color:#{:02x}{:02x}{:02x}",
            bg[0], bg[1], bg[2], fg[0], fg[1], fg[2]
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub severity: Severity,
}

/// Single-slot status message shown above the workouts.
#[derive(Debug, Clone, Default)]
pub struct StatusBanner {
    current: Option<Status>,
}

impl StatusBanner {
    /// Replace the banner. An empty message removes it.
    pub fn set(&mut self, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        self.current = if message.is_empty() {
            None
        } else {
            Some(Status { message, severity })
        };
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.set(message, Severity::Info);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.set(message, Severity::Error);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Status> {
        self.current.as_ref()
    }
}

/// Message shown when the program file cannot be loaded.
pub fn remediation_message(resource: &str) -> String {
    format!(
        "Could not load {resource}. If you opened the program file directly from disk, \
serve its folder over http:// and point the viewer at that server instead. \
Example: python3 -m http.server 8000 then set the base URL to http://localhost:8000/."
    )
}

/// Message shown when a program file opened from disk cannot be read.
pub fn local_file_message(resource: &str, reason: &dyn std::fmt::Display) -> String {
    format!("Could not read {resource} from disk ({reason}). Check the file and open it again.")
}
