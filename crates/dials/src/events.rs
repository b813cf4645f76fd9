/// Events raised off the GTK main loop by background services.
#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigReload,
}
