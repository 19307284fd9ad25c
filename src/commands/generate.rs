//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::path::Path;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::Site;

/// Quiet period after the last change before a rebuild
const REBUILD_DEBOUNCE: Duration = Duration::from_millis(500);

/// Collapses a burst of change events into one rebuild once the burst
/// has been quiet for the debounce window.
#[derive(Debug)]
struct Debounce {
    window: Duration,
    last_change: Option<Instant>,
}

impl Debounce {
    fn new(window: Duration) -> Self {
        Self {
            window,
            last_change: None,
        }
    }

    fn record(&mut self, at: Instant) {
        self.last_change = Some(at);
    }

    /// True once per burst, when the window has passed since its last change
    fn take_ready(&mut self, now: Instant) -> bool {
        match self.last_change {
            Some(at) if now.duration_since(at) >= self.window => {
                self.last_change = None;
                true
            }
            _ => false,
        }
    }
}

/// Generate the static site
pub fn run(site: &Site) -> Result<()> {
    let start = Instant::now();

    let posts = ContentLoader::new(site).load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    Generator::new(site).generate(&posts)?;

    tracing::info!(
        "Generated {} cards in {:.2}s",
        posts.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Watch for file changes and regenerate.
///
/// Blocks until the watcher shuts down.
pub fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    if site.source_dir.exists() {
        watcher.watch(&site.source_dir, notify::RecursiveMode::Recursive)?;
    }

    let config_path = site.config_path();
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut debounce = Debounce::new(REBUILD_DEBOUNCE);

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                if event.paths.iter().any(|p| is_relevant_change(p)) {
                    debounce.record(Instant::now());
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if debounce.take_ready(Instant::now()) {
            tracing::info!("File changed, regenerating...");
            // Reload so config edits take effect
            let result = Site::new(&site.base_dir).and_then(|fresh| run(&fresh));
            if let Err(e) = result {
                tracing::error!("Generation failed: {}", e);
            }
        }
    }

    Ok(())
}

/// Editor swap files and VCS internals never trigger a rebuild
fn is_relevant_change(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}
