//! Seams between the page logic and the PDF rendering library.
//!
//! The viewer and the thumbnail renderer are written against these traits;
//! `pdfjs` provides the browser implementation on top of pdf.js, the tests
//! provide counting mocks.

pub mod pdfjs;

use crate::error::ManagerError;

/// A page laid out at a given scale, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Canvas size needed to hold the page at this scale.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width.round().max(0.0) as u32,
            self.height.round().max(0.0) as u32,
        )
    }
}

/// Something a page can be rasterized into.
pub trait Surface {
    fn resize(&self, width: u32, height: u32);

    fn clear(&self);

    /// Replaces the content with a flat box and a short line of text.
    fn paint_placeholder(&self, text: &str);
}

#[allow(async_fn_in_trait)]
pub trait PdfEngine {
    type Surface: Surface;
    type Document: PdfDocument<Surface = Self::Surface>;

    /// Fetches and decodes the working copy of `file_id`. Every call fetches
    /// the bytes again.
    async fn open(&self, file_id: &str) -> Result<Self::Document, ManagerError>;
}

/// A decoded document. Must be released with `destroy` once it stops being
/// used; dropping it alone leaves the library's worker-side copy alive.
#[allow(async_fn_in_trait)]
pub trait PdfDocument {
    type Surface: Surface;
    type Page: PdfPage<Surface = Self::Surface>;

    fn page_count(&self) -> u32;

    /// `number` is one-based.
    async fn page(&self, number: u32) -> Result<Self::Page, ManagerError>;

    async fn destroy(&self);
}

#[allow(async_fn_in_trait)]
pub trait PdfPage {
    type Surface: Surface;

    fn viewport(&self, scale: f64) -> Result<Viewport, ManagerError>;

    /// Rasterizes into `surface`, which the caller has already sized to
    /// `viewport.pixel_size()`.
    async fn render(&self, surface: &Self::Surface, viewport: Viewport)
        -> Result<(), ManagerError>;
}

/// URL of the working copy of `file_id`. `cache_bust` keeps the browser from
/// serving a copy fetched before a rotation.
pub fn view_url(file_id: &str, cache_bust: u64) -> String {
    format!("/view/{}?t={}", urlencoding::encode(file_id), cache_bust)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_url_is_encoded_and_busted() {
        assert_eq!(
            view_url("relatório 1.pdf", 1700000000000),
            "/view/relat%C3%B3rio%201.pdf?t=1700000000000"
        );
    }

    #[test]
    fn pixel_size_rounds_to_nearest() {
        let viewport = Viewport {
            scale: 1.5,
            width: 892.5,
            height: 1262.4,
        };
        assert_eq!(viewport.pixel_size(), (893, 1262));
    }
}
