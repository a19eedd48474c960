//! # Status Line Model
//!
//! Encapsulates the state shown in the bottom status bar that is not owned
//! by a controller: transient messages and the active profile.

/// Status line model containing all status bar display state
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    /// Temporary status message to display
    status_message: Option<String>,

    /// Profile name and the API it points at
    profile_name: String,
    base_url: String,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_profile_info(&mut self, profile_name: String, base_url: String) {
        self.profile_name = profile_name;
        self.base_url = base_url;
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
