//! The display-side state machine. What the browser kept in scattered
//! globals lives here as a single [`RenderState`] value, replaced wholesale
//! by explicit commands; event handlers become [`Command`]s and every update
//! reports whether the overlay must be redrawn.

use image::RgbImage;
use tracing::warn;

use crate::detection::Detection;
use crate::labels::LabelCatalog;
use crate::render::{Overlay, RenderError};

/// Transient display state: the original (unscaled) submitted image, the
/// current detection list, and the confidence threshold in integer percent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderState {
    pub image: Option<RgbImage>,
    pub detections: Vec<Detection>,
    pub threshold_percent: u8,
}

#[derive(Debug, Clone)]
pub enum Command {
    /// A new image was chosen; any previous predictions are stale.
    SelectImage(RgbImage),
    SetThreshold(u8),
    /// An inference round trip resolved. Overlapping submissions are not
    /// sequenced; the last list applied wins.
    ApplyPredictions(Vec<Detection>),
    AddClass(String),
    RemoveClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    Required,
    Skip,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    state: RenderState,
    catalog: LabelCatalog,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn catalog(&self) -> &LabelCatalog {
        &self.catalog
    }

    /// Apply a command, producing the replacement session and a redraw
    /// instruction.
    pub fn apply(mut self, command: Command) -> (Self, Redraw) {
        let redraw = match command {
            Command::SelectImage(image) => {
                let prev = std::mem::take(&mut self.state);
                self.state = RenderState {
                    image: Some(image),
                    detections: Vec::new(),
                    threshold_percent: prev.threshold_percent,
                };
                Redraw::Skip
            }
            Command::SetThreshold(pct) => {
                let prev = std::mem::take(&mut self.state);
                self.state = RenderState {
                    threshold_percent: pct.min(100),
                    ..prev
                };
                if self.state.detections.is_empty() {
                    Redraw::Skip
                } else {
                    Redraw::Required
                }
            }
            Command::ApplyPredictions(detections) => {
                let prev = std::mem::take(&mut self.state);
                self.state = RenderState {
                    detections,
                    ..prev
                };
                if self.state.image.is_some() {
                    Redraw::Required
                } else {
                    Redraw::Skip
                }
            }
            Command::AddClass(label) => {
                if let Err(e) = self.catalog.push(label) {
                    warn!("{e}");
                }
                Redraw::Skip
            }
            Command::RemoveClass => {
                self.catalog.pop();
                Redraw::Skip
            }
        };

        (self, redraw)
    }

    /// Render the current state through the overlay renderer. `None` until
    /// an image has been selected.
    pub fn render(&self, overlay: &Overlay) -> Option<Result<RgbImage, RenderError>> {
        let image = self.state.image.as_ref()?;
        Some(overlay.render(
            image,
            &self.state.detections,
            self.state.threshold_percent,
            &self.catalog,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn frame() -> RgbImage {
        RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]))
    }

    fn detections() -> Vec<Detection> {
        vec![Detection::new(0, 0.9, [0.1, 0.1, 0.5, 0.5])]
    }

    #[test]
    fn selecting_an_image_clears_stale_predictions() {
        let (session, _) = Session::new().apply(Command::ApplyPredictions(detections()));
        let (session, redraw) = session.apply(Command::SelectImage(frame()));
        assert_eq!(redraw, Redraw::Skip);
        assert!(session.state().detections.is_empty());
        assert!(session.state().image.is_some());
    }

    #[test]
    fn threshold_change_redraws_only_with_predictions() {
        let (session, redraw) = Session::new().apply(Command::SetThreshold(60));
        assert_eq!(redraw, Redraw::Skip);
        assert_eq!(session.state().threshold_percent, 60);

        let (session, _) = session.apply(Command::SelectImage(frame()));
        let (session, _) = session.apply(Command::ApplyPredictions(detections()));
        let (session, redraw) = session.apply(Command::SetThreshold(30));
        assert_eq!(redraw, Redraw::Required);
        assert_eq!(session.state().threshold_percent, 30);
    }

    #[test]
    fn predictions_redraw_only_with_an_image() {
        let (session, redraw) = Session::new().apply(Command::ApplyPredictions(detections()));
        assert_eq!(redraw, Redraw::Skip);

        let (session, _) = session.apply(Command::SelectImage(frame()));
        let (_, redraw) = session.apply(Command::ApplyPredictions(detections()));
        assert_eq!(redraw, Redraw::Required);
    }

    #[test]
    fn last_applied_predictions_win() {
        let first = detections();
        let second = vec![Detection::new(1, 0.4, [0.0, 0.0, 1.0, 1.0])];

        let (session, _) = Session::new().apply(Command::SelectImage(frame()));
        let (session, _) = session.apply(Command::ApplyPredictions(first));
        let (session, _) = session.apply(Command::ApplyPredictions(second.clone()));
        assert_eq!(session.state().detections, second);
    }

    #[test]
    fn catalog_editing_is_capped_not_fatal() {
        let mut session = Session::new();
        for i in 0..12 {
            session = session.apply(Command::AddClass(format!("class-{i}"))).0;
        }
        assert_eq!(session.catalog().len(), crate::labels::MAX_CLASSES);

        let (session, _) = session.apply(Command::RemoveClass);
        assert_eq!(session.catalog().len(), crate::labels::MAX_CLASSES - 1);
    }

    #[test]
    fn renders_nothing_until_an_image_is_selected() {
        let overlay = Overlay::boxes_only();
        let session = Session::new();
        assert!(session.render(&overlay).is_none());

        let (session, _) = session.apply(Command::SelectImage(frame()));
        let rendered = session.render(&overlay).unwrap().unwrap();
        assert_eq!(rendered.dimensions(), (10, 10));
    }
}
