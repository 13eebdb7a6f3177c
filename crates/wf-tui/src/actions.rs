/// Every state change in the console is expressed as an Action sent through the
/// Dispatcher. Stores reduce them, Effects react to them.
use wf_core::Route;
use wf_core::models::LogLine;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ===== Navigation =====
    /// Show another page
    Navigate(Route),

    /// Back to the dashboard
    NavigateBack,

    /// Move keyboard focus
    FocusPanel(PanelId),

    // ===== Dashboard shell =====
    /// Make a worker the selected one (also closes the drawer sidebar)
    SelectWorker(String),

    /// Open or close the sidebar drawer on narrow terminals
    ToggleSidebar,

    /// Open or close the log panel between the sm and xl breakpoints
    ToggleLogPanel,

    ToggleHelp,

    ToggleDiagnostics,

    // ===== Log panel =====
    /// Reader scrolled the log panel by this many rows (negative is up)
    ScrollLogs(isize),

    /// The "↓ latest" control
    JumpToLatest,

    /// New lines arrived on the log feed
    LogLinesAppended(Vec<LogLine>),

    /// Animation frame
    Tick,

    // ===== Detail pages =====
    /// Scroll the current detail page by this many rows
    ScrollPage(isize),

    /// Start an OFFLINE worker or stop an IDLE one
    ToggleWorkerStatus(String),

    /// Remove a worker; the page redirects after a short delay
    DeleteWorker(String),

    /// Add a STARTING worker to the fleet
    SpawnWorker,

    /// Drop the stored token pair
    SignOut,

    /// Token pair was cleared
    SignedOut,

    // ===== Feedback =====
    /// Transient error line in the footer
    ShowError(String),

    ClearError,

    Quit,
}

/// Focusable regions of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelId {
    Sidebar,
    LiveView,
    LogPanel,
}

impl PanelId {
    pub fn next(self) -> Self {
        match self {
            Self::Sidebar => Self::LiveView,
            Self::LiveView => Self::LogPanel,
            Self::LogPanel => Self::Sidebar,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::Sidebar => Self::LogPanel,
            Self::LiveView => Self::Sidebar,
            Self::LogPanel => Self::LiveView,
        }
    }
}
