use crate::infrastructure::browser::ProfilePage;
use chrono::Local;
use std::path::Path;
use tracing::{info, warn};

const ARTIFACT_DIR: &str = "debug";

/// Dump page HTML and a screenshot for a degraded run. Strictly
/// best-effort: every failure is logged and swallowed so the caller's
/// result shape is never affected by diagnostics.
pub async fn dump_debug_artifacts(page: &dyn ProfilePage, prefix: &str) {
    if let Err(e) = tokio::fs::create_dir_all(ARTIFACT_DIR).await {
        warn!("failed to create {} directory: {}", ARTIFACT_DIR, e);
        return;
    }

    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let base = Path::new(ARTIFACT_DIR).join(format!("{}_{}", prefix, stamp));

    match page.page_source().await {
        Ok(html) => {
            let path = base.with_extension("html");
            match tokio::fs::write(&path, html).await {
                Ok(()) => info!("saved HTML to {}", path.display()),
                Err(e) => warn!("failed to save HTML: {}", e),
            }
        }
        Err(e) => warn!("failed to read page source: {}", e),
    }

    let shot = base.with_extension("png");
    match page.save_screenshot(&shot.to_string_lossy()).await {
        Ok(()) => info!("saved screenshot to {}", shot.display()),
        Err(e) => warn!("failed to save screenshot: {}", e),
    }
}
