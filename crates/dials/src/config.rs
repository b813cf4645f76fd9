use crate::events::AppEvent;
use async_channel::Sender;
use dialkit::config::{self, WidgetConfig};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// An explicit path must load; otherwise the user config or the bundled demo is used.
pub fn load(path: Option<&Path>) -> anyhow::Result<WidgetConfig> {
    match path {
        Some(path) => Ok(config::load_config_from(path)?),
        None => Ok(config::load_or_default()),
    }
}

/// The file whose changes trigger a reload.
pub fn watched_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| config::get_config_path().ok())
}

/// Editors often save with a burst of events (truncate, write, rename). Events arriving
/// within this window after the first one collapse into a single reload.
const RELOAD_DEBOUNCE: Duration = Duration::from_millis(200);

/// Whether `event` changes the file at `config_path`.
fn touches_config(event: &Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Watches the directory holding `config_path` and sends one `ConfigReload` per burst of
/// changes to that file. Returns when the receiving side is gone.
pub async fn run_async_watcher(tx: Sender<AppEvent>, config_path: PathBuf) {
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        log::warn!("Config path {} has no parent to watch", config_path.display());
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }
    log::debug!("Watching {} for changes", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                log::error!("Watch error: {}", e);
                continue;
            }
        };
        if !touches_config(&event, &config_path) {
            continue;
        }

        tokio::time::sleep(RELOAD_DEBOUNCE).await;
        let collapsed = std::iter::from_fn(|| bridge_rx.try_recv().ok()).count();
        log::debug!("Config changed ({} follow-up events collapsed)", collapsed);

        if tx.send(AppEvent::ConfigReload).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};

    #[test]
    fn test_only_changes_to_config_file_count() {
        let config = Path::new("/tmp/dials/config.toml");

        let modify = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(config.to_path_buf());
        assert!(touches_config(&modify, config));

        let create = Event::new(EventKind::Create(CreateKind::File)).add_path(config.to_path_buf());
        assert!(touches_config(&create, config));

        let access = Event::new(EventKind::Access(AccessKind::Any)).add_path(config.to_path_buf());
        assert!(!touches_config(&access, config));

        let sibling =
            Event::new(EventKind::Modify(ModifyKind::Any)).add_path("/tmp/dials/other.toml".into());
        assert!(!touches_config(&sibling, config));
    }

    #[tokio::test]
    async fn test_burst_of_writes_reloads_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let (tx, rx) = async_channel::unbounded();
        let watcher = tokio::spawn(run_async_watcher(tx, path.clone()));

        // let the watcher register before writing
        tokio::time::sleep(Duration::from_millis(100)).await;
        fs_err::write(&path, "size = 300\n").unwrap();
        fs_err::write(&path, "size = 310\n").unwrap();

        let first = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(matches!(first, Ok(Ok(AppEvent::ConfigReload))));
        tokio::time::sleep(RELOAD_DEBOUNCE * 2).await;
        assert!(rx.try_recv().is_err());

        drop(rx);
        watcher.abort();
    }
}
