//! Offline overlay rendering: draw a predictions file onto an image and
//! write the annotated copy next to it.

use inferscope::detection::Detection;
use inferscope::labels::LabelCatalog;
use inferscope::render::Overlay;
use inferscope::settings::Settings;
use std::{env, process};
use tracing::warn;

const USAGE: &str = "usage: ./annotate <image> <predictions json> <threshold percent> [label ...]";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() - 1 < 3 {
        println!("{USAGE}");
        process::exit(1);
    }

    let image_path = &args[1];
    let predictions_path = &args[2];
    let threshold: u8 = args[3].parse().expect("invalid threshold percent");
    let catalog: LabelCatalog = args[4..].iter().cloned().collect();

    let base = image::open(image_path)?.to_rgb8();
    let predictions: Vec<Detection> =
        serde_json::from_str(&std::fs::read_to_string(predictions_path)?)?;

    let settings = Settings::load(None).expect("invalid configuration");
    let overlay = match settings.font_path.as_deref() {
        Some(path) => Overlay::from_font_file(path)?,
        None => {
            warn!("no font configured, drawing boxes without label text");
            Overlay::boxes_only()
        }
    };

    let annotated = overlay.render(&base, &predictions, threshold, &catalog)?;

    let out_path = format!("{image_path}.annotated.png");
    annotated.save(&out_path)?;
    println!("wrote {out_path}");

    Ok(())
}
