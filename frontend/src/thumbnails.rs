//! Sidebar thumbnails: page 1 of each document, fitted into a fixed box.
//!
//! A thumbnail render never fails towards its caller. The batch renders every
//! document in the list independently, so one broken file only costs its own
//! card a placeholder.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

use crate::error::ManagerError;
use crate::pdf::{PdfDocument, PdfEngine, PdfPage, Surface};

/// Text painted into a card whose document could not be rendered.
pub const PREVIEW_ERROR: &str = "Preview error";

/// Delay between the start of two consecutive renders of a batch.
pub const STAGGER_MS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbBox {
    pub width: f64,
    pub height: f64,
}

pub const THUMB_BOX: ThumbBox = ThumbBox {
    width: 160.0,
    height: 208.0,
};

/// Largest scale at which a `page_width` × `page_height` page fits in `bounds`
/// without changing its aspect ratio.
pub fn fit_scale(bounds: ThumbBox, page_width: f64, page_height: f64) -> f64 {
    (bounds.width / page_width).min(bounds.height / page_height)
}

pub fn stagger_delay(index: usize) -> u32 {
    (index as u32).saturating_mul(STAGGER_MS)
}

/// Renders page 1 of `file_id` into `surface`, or the error placeholder if
/// anything along the way fails.
pub async fn render_thumbnail<E: PdfEngine>(
    engine: &E,
    surface: &E::Surface,
    file_id: &str,
    bounds: ThumbBox,
) {
    surface.clear();
    if let Err(err) = try_render(engine, surface, file_id, bounds).await {
        log::debug!("thumbnail for {} failed: {}", file_id, err);
        surface.clear();
        surface.paint_placeholder(PREVIEW_ERROR);
    }
}

async fn try_render<E: PdfEngine>(
    engine: &E,
    surface: &E::Surface,
    file_id: &str,
    bounds: ThumbBox,
) -> Result<(), ManagerError> {
    let document = engine.open(file_id).await?;
    let result = render_first_page(&document, surface, bounds).await;
    document.destroy().await;
    result
}

async fn render_first_page<D: PdfDocument>(
    document: &D,
    surface: &D::Surface,
    bounds: ThumbBox,
) -> Result<(), ManagerError> {
    let page = document.page(1).await?;
    let natural = page.viewport(1.0)?;
    let viewport = page.viewport(fit_scale(bounds, natural.width, natural.height))?;
    let (width, height) = viewport.pixel_size();
    surface.resize(width, height);
    page.render(surface, viewport).await
}

/// Starts one render per `(file, surface)` pair, each delayed by its position
/// in the batch. Returns immediately.
pub fn schedule_batch<E>(engine: Rc<E>, targets: Vec<(String, E::Surface)>)
where
    E: PdfEngine + 'static,
    E::Surface: 'static,
{
    for (index, (file_id, surface)) in targets.into_iter().enumerate() {
        let engine = engine.clone();
        spawn_local(async move {
            TimeoutFuture::new(stagger_delay(index)).await;
            render_thumbnail(engine.as_ref(), &surface, &file_id, THUMB_BOX).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockEngine, MockSurface, SurfaceOp};
    use futures::executor::block_on;

    #[test]
    fn fit_scale_keeps_aspect_ratio() {
        // A4 portrait is height-bound in the 160x208 box.
        let scale = fit_scale(THUMB_BOX, 595.0, 842.0);
        assert!((scale - 208.0 / 842.0).abs() < 1e-12);
        // Landscape pages are width-bound.
        let scale = fit_scale(THUMB_BOX, 842.0, 595.0);
        assert!((scale - 160.0 / 842.0).abs() < 1e-12);
    }

    #[test]
    fn stagger_grows_with_position() {
        assert_eq!(stagger_delay(0), 0);
        assert_eq!(stagger_delay(1), 12);
        assert_eq!(stagger_delay(10), 120);
    }

    #[test]
    fn renders_first_page_at_fitted_size_and_releases_document() {
        let engine = MockEngine::new().with_document("a.pdf", 3, (595.0, 842.0));
        let surface = MockSurface::default();

        block_on(render_thumbnail(&engine, &surface, "a.pdf", THUMB_BOX));

        assert_eq!(
            surface.ops(),
            vec![
                SurfaceOp::Clear,
                SurfaceOp::Resize(147, 208),
                SurfaceOp::Render { page: 1, width: 147, height: 208 },
            ]
        );
        assert_eq!(engine.destroyed(), vec!["a.pdf".to_string()]);
    }

    #[test]
    fn open_failure_paints_placeholder_instead_of_failing() {
        let engine = MockEngine::new();
        let surface = MockSurface::default();

        block_on(render_thumbnail(&engine, &surface, "missing.pdf", THUMB_BOX));

        assert_eq!(
            surface.ops(),
            vec![
                SurfaceOp::Clear,
                SurfaceOp::Clear,
                SurfaceOp::Placeholder(PREVIEW_ERROR.to_string()),
            ]
        );
    }

    #[test]
    fn render_failure_still_releases_document() {
        let engine = MockEngine::new()
            .with_document("broken.pdf", 1, (595.0, 842.0))
            .failing_render("broken.pdf");
        let surface = MockSurface::default();

        block_on(render_thumbnail(&engine, &surface, "broken.pdf", THUMB_BOX));

        assert_eq!(engine.destroyed(), vec!["broken.pdf".to_string()]);
        assert_eq!(
            surface.ops().last(),
            Some(&SurfaceOp::Placeholder(PREVIEW_ERROR.to_string()))
        );
    }
}
