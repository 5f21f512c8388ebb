//! The detection data model and its wire form.
//!
//! The gateway speaks fixed-position six-element arrays, not keyed objects:
//! `[class index, confidence, x_min, y_min, x_max, y_max]`, with the box in
//! image-normalized coordinates and the far corner given absolutely (not as a
//! width/height delta).

use serde::{Deserialize, Serialize};

/// One predicted object instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDetection", into = "RawDetection")]
pub struct Detection {
    /// Index into a user-defined label list.
    pub class_index: u32,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl Detection {
    pub fn new(class_index: u32, confidence: f32, bbox: [f32; 4]) -> Self {
        Detection {
            class_index,
            confidence,
            x_min: bbox[0],
            y_min: bbox[1],
            x_max: bbox[2],
            y_max: bbox[3],
        }
    }
}

/// The positional tuple as it appears on the wire. Everything is a float
/// there, including the class index.
#[derive(Clone, Serialize, Deserialize)]
struct RawDetection(f64, f64, f64, f64, f64, f64);

impl From<RawDetection> for Detection {
    fn from(raw: RawDetection) -> Detection {
        Detection {
            class_index: raw.0 as u32,
            confidence: raw.1 as f32,
            x_min: raw.2 as f32,
            y_min: raw.3 as f32,
            x_max: raw.4 as f32,
            y_max: raw.5 as f32,
        }
    }
}

impl From<Detection> for RawDetection {
    fn from(d: Detection) -> RawDetection {
        RawDetection(
            d.class_index as f64,
            d.confidence as f64,
            d.x_min as f64,
            d.y_min as f64,
            d.x_max as f64,
            d.y_max as f64,
        )
    }
}
