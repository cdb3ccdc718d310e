//! UI models that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test the
//! notice handling and header inventory on the host.

use physprac::error::{LoadError, NavError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// User-visible messages shown above the mounted view, newest last.
#[derive(Debug, Clone, Default)]
pub struct NoticeQueue {
    notices: Vec<Notice>,
    next_id: u64,
}

impl NoticeQueue {
    /// Oldest notices are dropped beyond this.
    pub const MAX_VISIBLE: usize = 4;

    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.notices.push(Notice {
            id,
            level,
            message: message.into(),
        });
        if self.notices.len() > Self::MAX_VISIBLE {
            let excess = self.notices.len() - Self::MAX_VISIBLE;
            self.notices.drain(..excess);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        self.notices.len() != before
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Stale loads are expected during quick navigation and are not shown.
    pub fn push_load_error(&mut self, err: &LoadError) -> Option<u64> {
        match err {
            LoadError::Stale { .. } => None,
            LoadError::ViewLoadFailed { .. } => Some(self.push(
                NoticeLevel::Error,
                format!("Could not open that page. {err}"),
            )),
        }
    }

    pub fn push_nav_error(&mut self, err: &NavError) -> u64 {
        self.push(NoticeLevel::Error, err.to_string())
    }
}

/// Global actions in the header, available from every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Home,
    About,
}

impl HeaderAction {
    pub fn label(self) -> &'static str {
        match self {
            HeaderAction::Home => "Courses",
            HeaderAction::About => "About",
        }
    }

    pub fn element_id(self) -> &'static str {
        match self {
            HeaderAction::Home => "home-button",
            HeaderAction::About => "about-button",
        }
    }

    pub fn all() -> &'static [HeaderAction] {
        &[HeaderAction::Home, HeaderAction::About]
    }
}
