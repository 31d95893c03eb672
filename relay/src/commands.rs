//! Entry points behind the binary's modes.

use crate::client::RelayClient;
use crate::config::{LabelArgs, UpstreamArgs};
use crate::web::{AppState, app};
use anyhow::{Context, Result};
use labeler::{
    BatchEntry, Filter, ImageFile, LabelService, Labeler, collect_images, render_overlay_svg,
    run_batch,
};
use std::{fs, net::SocketAddr, path::Path};
use tracing::{info, warn};

/// Bind `addr` and serve the relay until the process exits.
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    if state.vision.is_none() {
        warn!("MOONDREAM_API_KEY is not set; /auto-label requests will fail");
    }
    let addr: SocketAddr = addr.parse().with_context(|| format!("invalid address {addr}"))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("auto-labeler running on http://{addr}");
    axum::serve(listener, app(state).into_make_service()).await?;
    Ok(())
}

/// Label every image under `args.paths`, one at a time.
pub async fn label(args: &LabelArgs, upstream: &UpstreamArgs) -> Result<Vec<BatchEntry>> {
    let images = collect_images(&args.paths)?;
    info!(count = images.len(), "collected images");

    let service: Box<dyn LabelService> = match &args.server {
        Some(url) => Box::new(RelayClient::new(url)),
        None => {
            let vision = upstream
                .vision_client()
                .context("MOONDREAM_API_KEY not configured")?;
            Box::new(Labeler::new(vision))
        }
    };

    let entries = run_batch(service.as_ref(), &images, &args.prompt).await;
    let failed = entries.iter().filter(|e| !e.success).count();
    info!(succeeded = entries.len() - failed, failed, "batch finished");

    if let Some(dir) = &args.overlay_dir {
        write_overlays(dir, &images, &entries)?;
    }
    Ok(entries)
}

/// Write one SVG per image that has boxes, sized from the image header.
pub fn write_overlays(dir: &Path, images: &[ImageFile], entries: &[BatchEntry]) -> Result<usize> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut written = 0;
    for (file, entry) in images.iter().zip(entries) {
        let Some(result) = entry.data.as_ref().filter(|r| !r.objects.is_empty()) else {
            continue;
        };
        let (width, height) = match image::image_dimensions(&file.path) {
            Ok(dims) => dims,
            Err(err) => {
                warn!(name = %file.name, %err, "cannot read image size; skipping overlay");
                continue;
            }
        };
        let svg = render_overlay_svg(&file.data, width, height, &result.objects, &Filter::All);
        let stem = file
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.name.clone());
        let target = dir.join(format!("{stem}.svg"));
        fs::write(&target, svg).with_context(|| format!("writing {}", target.display()))?;
        written += 1;
    }
    info!(written, dir = %dir.display(), "wrote overlays");
    Ok(written)
}
