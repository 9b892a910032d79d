//! Persistence of generated artifacts.

use std::path::Path;

use futures::future::try_join_all;
use tokio::fs;

use crate::generate::Artifacts;

/// Write every artifact into `dir`, creating it when absent.
///
/// The artifact set is complete before this is called; files are written
/// concurrently and the first failure is returned.
pub async fn write_artifacts<P: AsRef<Path>>(dir: P, artifacts: &Artifacts) -> crate::Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).await?;

    try_join_all(artifacts.iter().map(|(name, content)| {
        let path = dir.join(name);
        async move {
            fs::write(&path, content).await?;
            log::debug!("wrote {}", path.display());
            Ok::<_, crate::Error>(())
        }
    }))
    .await?;

    log::info!("wrote {} files to {}", artifacts.len(), dir.display());
    Ok(())
}
