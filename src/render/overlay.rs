use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::{debug, warn};

use super::palette::{self, PaletteRangeError};
use crate::detection::Detection;
use crate::labels::LabelCatalog;

const STROKE_WIDTH: u32 = 2;
const LABEL_FONT_SIZE: f32 = 15.0;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Palette(#[from] PaletteRangeError),

    #[error("failed to load label font: {0}")]
    Font(String),
}

/// One planned box: everything the drawing pass needs, in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// 1-based position in the unfiltered detection list.
    pub rank: usize,
    pub color: Rgb<u8>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label: String,
}

/// Compute the overlay plan for a detection list against an image of the
/// given dimensions.
///
/// Detections at or below the threshold are dropped (strict greater-than).
/// Ranks and colors come from the original list order and class index, never
/// from the filtered order. Inverted boxes are kept in the plan with their
/// raw negative sizes; the drawing pass skips them.
pub fn plan(
    detections: &[Detection],
    threshold_percent: u8,
    catalog: &LabelCatalog,
    dims: (u32, u32),
) -> Result<Vec<Annotation>, PaletteRangeError> {
    let threshold = threshold_percent as f32 / 100.0;
    let (width, height) = (dims.0 as f32, dims.1 as f32);

    let mut annotations = Vec::new();
    for (index, det) in detections.iter().enumerate() {
        if det.confidence <= threshold {
            continue;
        }

        let color = palette::color_for(det.class_index)?;

        let x = det.x_min * width;
        let y = det.y_min * height;
        let box_width = det.x_max * width - x;
        let box_height = det.y_max * height - y;

        let confidence_pct = ((det.confidence as f64) * 10000.0).round() / 100.0;
        let label = format!(
            "ID:{}-{} - {}%",
            index + 1,
            catalog.label_for(det.class_index),
            confidence_pct
        );

        annotations.push(Annotation {
            rank: index + 1,
            color,
            x,
            y,
            width: box_width,
            height: box_height,
            label,
        });
    }

    Ok(annotations)
}

/// The drawing half of the renderer. Holds the label font; without one,
/// boxes are still drawn and label text is skipped.
pub struct Overlay {
    font: Option<FontVec>,
}

impl Overlay {
    /// A renderer that draws box outlines only.
    pub fn boxes_only() -> Self {
        Overlay { font: None }
    }

    /// A renderer with label text, using a TTF file on disk.
    pub fn from_font_file(path: &str) -> Result<Self, RenderError> {
        let data = std::fs::read(path).map_err(|e| RenderError::Font(format!("{path}: {e}")))?;
        let font = FontVec::try_from_vec(data).map_err(|e| RenderError::Font(e.to_string()))?;
        Ok(Overlay { font: Some(font) })
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Produce an annotated copy of the base image. The base is never
    /// mutated; every call redraws the full overlay from scratch.
    pub fn render(
        &self,
        base: &RgbImage,
        detections: &[Detection],
        threshold_percent: u8,
        catalog: &LabelCatalog,
    ) -> Result<RgbImage, RenderError> {
        let mut canvas = base.clone();
        let annotations = plan(detections, threshold_percent, catalog, canvas.dimensions())?;

        for ann in &annotations {
            if ann.width <= 0.0 || ann.height <= 0.0 {
                warn!(
                    "skipping degenerate box for detection {} ({}x{})",
                    ann.rank, ann.width, ann.height
                );
                continue;
            }

            let x = ann.x.round() as i32;
            let y = ann.y.round() as i32;
            let w = (ann.width.round() as u32).max(1);
            let h = (ann.height.round() as u32).max(1);

            for inset in 0..STROKE_WIDTH {
                if w > 2 * inset && h > 2 * inset {
                    let rect = Rect::at(x + inset as i32, y + inset as i32)
                        .of_size(w - 2 * inset, h - 2 * inset);
                    draw_hollow_rect_mut(&mut canvas, rect, ann.color);
                }
            }

            match &self.font {
                Some(font) => {
                    let text_y = (ann.y - 2.0 - LABEL_FONT_SIZE).round().max(0.0) as i32;
                    draw_text_mut(
                        &mut canvas,
                        ann.color,
                        x,
                        text_y,
                        PxScale::from(LABEL_FONT_SIZE),
                        font,
                        &ann.label,
                    );
                }
                None => debug!("no label font loaded, drawing box only"),
            }
        }

        Ok(canvas)
    }
}
