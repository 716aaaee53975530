//! Local preview tool: renders the controller to PNG files + atlas.
//! No X11 needed; runs on macOS/Linux/Windows.
//!
//! Usage: cargo run --bin preview [-- --out DIR]
//!
//! Each scenario drives the controller with touches at region centers, so
//! the pressed highlights come from the real touch -> button mapping.
//!
//! Outputs:
//!   preview-output/landscape-*.png  — 844x390 scenarios
//!   preview-output/portrait-*.png   — 390x844 scenarios
//!   preview-output/atlas.png        — single tiled overview

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{error, info};

use onscreen_controller::buttons::{Button, Region};
use onscreen_controller::config::ControllerConfig;
use onscreen_controller::controller::{ButtonHandlers, OnscreenController};
use onscreen_controller::geometry::Rect;
use onscreen_controller::renderer::Renderer;
use onscreen_controller::touch::Touch;

const ORIENTATIONS: [(&str, u32, u32); 2] = [("landscape", 844, 390), ("portrait", 390, 844)];

const SCENARIOS: [(&str, &[Region]); 6] = [
    ("idle", &[]),
    ("up", &[Region::Up]),
    ("up-right-a", &[Region::UpRight, Region::A]),
    ("down-left-b", &[Region::DownLeft, Region::B]),
    ("select-start", &[Region::Select, Region::Start]),
    ("dead-zone", &[Region::Center]),
];

/// Opaque backdrop the transparent overlay is composited onto.
const BACKDROP: [u8; 3] = [40, 44, 52];

struct Frame {
    rgba: Vec<u8>,
    width: u32,
    height: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let out = std::env::args()
        .skip_while(|a| a != "--out")
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("preview-output"));

    if let Err(e) = run(&out) {
        error!("Preview failed: {e}");
        std::process::exit(1);
    }
}

fn run(out: &Path) -> Result<(), String> {
    let (config, _) = ControllerConfig::find_and_load();
    let renderer = Renderer::new(&config.style);
    std::fs::create_dir_all(out).map_err(|e| format!("create {}: {e}", out.display()))?;

    let mut frames = Vec::new();
    for (orientation, w, h) in ORIENTATIONS {
        let log: Rc<RefCell<Vec<(Button, bool)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let handlers = ButtonHandlers::from_fn(move |button, pressed| sink.borrow_mut().push((button, pressed)));
        let mut controller = OnscreenController::with_config(handlers, config.layout.clone());
        controller.layout_changed(Rect::new(0.0, 0.0, w as f32, h as f32));

        for (name, regions) in SCENARIOS {
            let touches: Vec<Touch> = regions
                .iter()
                .enumerate()
                .filter_map(|(i, r)| {
                    let c = controller.region_frames().get(*r)?.center();
                    Some(Touch::new(i as u64, c.x, c.y))
                })
                .collect();

            log.borrow_mut().clear();
            controller.touches_began(&touches);
            let pressed: Vec<&str> = log.borrow().iter().filter(|(_, on)| *on).map(|(b, _)| b.name()).collect();
            info!("{orientation}/{name}: {} callbacks, pressed {:?}", log.borrow().len(), pressed);

            let Some(layout) = controller.layout() else {
                return Err("controller has no layout".to_string());
            };
            let argb = renderer.render(layout, &controller.button_states());
            let frame = Frame { rgba: composite_over_backdrop(&argb), width: w, height: h };
            save_rgba_png(&out.join(format!("{orientation}-{name}.png")), &frame)?;
            frames.push(frame);

            controller.touches_ended(&touches);
        }
    }

    let atlas = build_atlas(&frames, 3, 8);
    let atlas_path = out.join("atlas.png");
    save_rgba_png(&atlas_path, &atlas)?;
    println!("atlas: {} ({}x{}, {} frames)", atlas_path.display(), atlas.width, atlas.height, frames.len());
    println!("individual frames in {}/", out.display());
    Ok(())
}

/// Composite the ARGB overlay over an opaque backdrop, as RGBA bytes.
fn composite_over_backdrop(argb: &[u32]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(argb.len() * 4);
    for &px in argb {
        let a = (px >> 24) & 0xFF;
        let inv = 255 - a;
        // Renderer output is premultiplied.
        let channel = |shift: u32, bg: u8| (((px >> shift) & 0xFF) + bg as u32 * inv / 255).min(255) as u8;
        rgba.push(channel(16, BACKDROP[0]));
        rgba.push(channel(8, BACKDROP[1]));
        rgba.push(channel(0, BACKDROP[2]));
        rgba.push(255);
    }
    rgba
}

/// Tile frames left to right, top to bottom, each in a cell sized to the
/// largest frame.
fn build_atlas(frames: &[Frame], cols: u32, pad: u32) -> Frame {
    let cell_w = frames.iter().map(|f| f.width).max().unwrap_or(0);
    let cell_h = frames.iter().map(|f| f.height).max().unwrap_or(0);
    let rows = (frames.len() as u32).div_ceil(cols);
    let width = cols * (cell_w + pad) + pad;
    let height = rows * (cell_h + pad) + pad;

    let mut rgba = vec![0u8; (width * height * 4) as usize];
    for px in rgba.chunks_exact_mut(4) {
        px.copy_from_slice(&[20, 20, 28, 255]);
    }

    for (idx, frame) in frames.iter().enumerate() {
        let ox = pad + (idx as u32 % cols) * (cell_w + pad);
        let oy = pad + (idx as u32 / cols) * (cell_h + pad);
        for y in 0..frame.height {
            let src = (y * frame.width * 4) as usize;
            let dst = (((oy + y) * width + ox) * 4) as usize;
            let len = (frame.width * 4) as usize;
            rgba[dst..dst + len].copy_from_slice(&frame.rgba[src..src + len]);
        }
    }

    Frame { rgba, width, height }
}

fn save_rgba_png(path: &Path, frame: &Frame) -> Result<(), String> {
    let file = std::fs::File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
    let buf = std::io::BufWriter::new(file);
    let mut encoder = png::Encoder::new(buf, frame.width, frame.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().map_err(|e| format!("png header: {e}"))?;
    writer.write_image_data(&frame.rgba).map_err(|e| format!("png data: {e}"))
}
