/// Each store owns one slice of the console state and is reduced on the event loop
pub mod app_logs_store;
pub mod fleet_store;
pub mod log_panel_store;
pub mod ui_store;

pub use app_logs_store::AppLogsStore;
pub use fleet_store::FleetStore;
pub use log_panel_store::LogPanelStore;
pub use ui_store::UIStore;
