use std::cell::RefCell;

/// Display durations, in milliseconds. Zero keeps the notice up until dismissed.
pub const STICKY: u64 = 0;
pub const SKIP_NOTICE_MS: u64 = 2000;
pub const NOT_A_NOTE_NOTICE_MS: u64 = 1000;
pub const FAILURE_NOTICE_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A message for the user, shown by whatever the host uses for toasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: MessageLevel,
    pub message: String,
    pub duration_ms: u64,
}

impl Notice {
    pub fn new(level: MessageLevel, message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            level,
            message: message.into(),
            duration_ms,
        }
    }

    pub fn info(message: impl Into<String>, duration_ms: u64) -> Self {
        Self::new(MessageLevel::Info, message, duration_ms)
    }

    pub fn success(message: impl Into<String>, duration_ms: u64) -> Self {
        Self::new(MessageLevel::Success, message, duration_ms)
    }

    pub fn warning(message: impl Into<String>, duration_ms: u64) -> Self {
        Self::new(MessageLevel::Warning, message, duration_ms)
    }

    pub fn error(message: impl Into<String>, duration_ms: u64) -> Self {
        Self::new(MessageLevel::Error, message, duration_ms)
    }
}

/// Fire-and-forget notification sink.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Keeps every notice, for tests and for hosts that show them later.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.notices.borrow_mut().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}
