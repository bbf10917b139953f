//! Browser lifecycle management for extraction runs
//!
//! Every extraction run owns one browser instance for its whole lifetime.
//! Instances are never pooled or shared across runs; each gets a unique
//! profile directory so concurrent runs in one process cannot contend on
//! Chrome's profile lock.

use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::JoinHandle;
use tracing::info;

use super::{BrowserError, BrowserResult};
use crate::BrowserConfig;

// Distinguishes profile directories of concurrent runs within one process.
static RUN_SEQ: AtomicU64 = AtomicU64::new(0);

/// Wrapper for Browser and its event handler task
///
/// Ensures handler is properly cleaned up when browser is dropped.
/// Handler MUST be aborted to prevent it running indefinitely after
/// browser is closed.
pub struct BrowserWrapper {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserWrapper {
    /// Launch a browser instance dedicated to one extraction run.
    ///
    /// The profile directory is unique per run; `shutdown()` removes it
    /// once Chrome has exited and released its file handles.
    pub async fn launch(config: &BrowserConfig) -> BrowserResult<Self> {
        let run_id = RUN_SEQ.fetch_add(1, Ordering::Relaxed);
        let user_data_dir =
            std::env::temp_dir().join(format!("jobharvest_{}_{}", std::process::id(), run_id));

        info!("Launching browser for extraction run {}", run_id);
        let (browser, handler) =
            crate::browser_setup::launch_browser(config, user_data_dir.clone())
                .await
                .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        Ok(Self {
            browser,
            handler,
            user_data_dir: Some(user_data_dir),
        })
    }

    /// Open a fresh page and apply the configured user agent.
    pub async fn open_page(&self, config: &BrowserConfig) -> BrowserResult<Page> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::PageCreationFailed(e.to_string()))?;

        page.set_user_agent(config.user_agent.as_str())
            .await
            .map_err(|e| BrowserError::PageCreationFailed(e.to_string()))?;

        Ok(page)
    }

    /// Release the browser: close, wait for process exit, remove profile dir.
    ///
    /// Consumes the wrapper so a run can only release its browser once.
    /// Both `close()` AND `wait()` are required: `Drop` only aborts the
    /// handler task and would leave the Chrome process as a zombie.
    pub async fn shutdown(mut self) {
        info!("Shutting down browser");

        if let Err(e) = self.browser.close().await {
            tracing::warn!("Failed to close browser cleanly: {}", e);
        }

        if let Err(e) = self.browser.wait().await {
            tracing::warn!("Failed to wait for browser exit: {}", e);
        }

        self.cleanup_temp_dir();
    }

    /// Clean up temp directory (blocking operation)
    ///
    /// MUST be called AFTER `browser.wait()` completes to ensure Chrome
    /// has released all file handles. Windows will fail to remove locked files.
    fn cleanup_temp_dir(&mut self) {
        if let Some(path) = self.user_data_dir.take() {
            info!("Cleaning up temp directory: {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path) {
                tracing::warn!(
                    "Failed to clean up temp directory {}: {}. Manual cleanup may be required.",
                    path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for BrowserWrapper {
    fn drop(&mut self) {
        self.handler.abort();
        // Browser::drop() kills the Chrome process if shutdown() never ran.

        if self.user_data_dir.is_some() {
            tracing::warn!(
                "BrowserWrapper dropped without explicit shutdown. \
                Temp directory will be orphaned: {}.",
                self.user_data_dir.as_ref().unwrap().display()
            );
        }
    }
}
