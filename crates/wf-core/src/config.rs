/// This config file lists out all the default values for the main Worker Factory env configs.
/// All can be overridden by an ENV var of the same name, read through `get_wf_setting!`.
/// These should only be primitive types
///

/// base URL that relative API paths are joined onto
pub static WF_API_BASE_URL: &'static str = "http://127.0.0.1:8000";

/// location of the persisted token pair. Blank means the platform config dir
pub static WF_TOKEN_FILE: &'static str = "";

/// maximum number of workers an operator may run at once
pub static WF_MAX_WORKERS: usize = 3;

/// interval between UI ticks (input polling and scroll animation)
pub static WF_TUI_TICK_MS: usize = 16;

/// interval at which the mock log feed replays the next line
pub static WF_MOCK_FEED_INTERVAL_MS: usize = 1500;

/// rows from the bottom of the log panel that still count as "at the bottom"
pub static WF_LOG_BOTTOM_THRESHOLD_ROWS: usize = 2;

/// delay between deleting a worker and returning to the dashboard
pub static WF_DELETE_REDIRECT_MS: usize = 800;

/// terminal width (columns) from which the log panel can be toggled on
pub static WF_TUI_SM_WIDTH: usize = 60;

/// terminal width from which the sidebar is docked instead of a drawer
pub static WF_TUI_LG_WIDTH: usize = 100;

/// terminal width from which the log panel is always shown
pub static WF_TUI_XL_WIDTH: usize = 140;
