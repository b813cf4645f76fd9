use crate::events::AppEvent;
use async_channel::Sender;
use std::path::PathBuf;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the config watcher on its own tokio runtime. Dial state stays on the GTK thread;
/// this side only ever sends events.
pub fn start_background_services(tx: Sender<AppEvent>, config_path: Option<PathBuf>) {
    let Some(config_path) = config_path else {
        log::warn!("No config path to watch, live reload disabled");
        return;
    };

    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(crate::config::run_async_watcher(tx, config_path));
    });
}
