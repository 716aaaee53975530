//! onscreen-controller: desktop simulator for the touch controller overlay.
//!
//! Opens an X11 window, feeds pointer buttons in as touches (one touch per
//! mouse button) and logs every button callback. Relayouts on resize and
//! reloads the config file when it changes on disk.

mod watcher;
mod window;

use std::sync::mpsc;
use std::time::{Duration, Instant};

use log::{error, info, warn};

use onscreen_controller::config::ControllerConfig;
use onscreen_controller::controller::{ButtonHandlers, OnscreenController};
use onscreen_controller::geometry::Rect;
use onscreen_controller::renderer::Renderer;
use onscreen_controller::touch::Touch;

use window::{ControllerWindow, WindowEvent};

const DEFAULT_WIDTH: u16 = 844;
const DEFAULT_HEIGHT: u16 = 390;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (width, height) = parse_size(std::env::args().skip(1).collect());
    let (config, config_path) = ControllerConfig::find_and_load();

    let mut win = match ControllerWindow::new(width, height, "onscreen-controller") {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create X11 window: {e}");
            std::process::exit(1);
        }
    };
    info!("Simulator window created ({width}x{height})");

    // Config reload signals from the watcher thread
    let (reload_tx, reload_rx) = mpsc::channel::<()>();
    if let Some(path) = config_path.clone() {
        std::thread::spawn(move || {
            if let Err(e) = watcher::watch_config(&path, reload_tx) {
                warn!("Config watcher stopped: {e}");
            }
        });
    }

    let handlers = ButtonHandlers::from_fn(|button, pressed| {
        log::debug!("{}: {}", button.name(), pressed);
    });
    let mut controller = OnscreenController::with_config(handlers, config.layout.clone());
    controller.layout_changed(Rect::new(0.0, 0.0, width as f32, height as f32));

    let mut renderer = Renderer::new(&config.style);
    let mut held: Vec<u8> = Vec::new();
    let mut last_pressed = controller.button_states();
    let mut dirty = true;
    let frame_duration = Duration::from_millis(16);

    loop {
        let frame_start = Instant::now();

        if reload_rx.try_recv().is_ok() {
            if let Some(path) = &config_path {
                match ControllerConfig::load(path) {
                    Ok(config) => {
                        info!("Reloaded {}", path.display());
                        controller.set_layout_config(config.layout);
                        renderer = Renderer::new(&config.style);
                        dirty = true;
                    }
                    Err(e) => warn!("Keeping previous config: {e}"),
                }
            }
        }

        for event in win.poll_events() {
            match event {
                WindowEvent::PointerDown { button, x, y } => {
                    if !held.contains(&button) {
                        held.push(button);
                    }
                    controller.touches_began(&[Touch::new(button as u64, x, y)]);
                }
                WindowEvent::PointerMove { x, y } => {
                    let touches: Vec<Touch> = held.iter().map(|b| Touch::new(*b as u64, x, y)).collect();
                    controller.touches_moved(&touches);
                }
                WindowEvent::PointerUp { button, x, y } => {
                    held.retain(|b| *b != button);
                    controller.touches_ended(&[Touch::new(button as u64, x, y)]);
                }
                WindowEvent::InputLost => {
                    if !held.is_empty() {
                        info!("Input lost, releasing {} held touches", held.len());
                        held.clear();
                        controller.touches_reset();
                    }
                }
                WindowEvent::Resized { width, height } => {
                    controller.layout_changed(Rect::new(0.0, 0.0, width as f32, height as f32));
                    dirty = true;
                }
                WindowEvent::Expose => dirty = true,
                WindowEvent::CloseRequested => {
                    info!("Window closed");
                    return;
                }
            }
        }

        let states = controller.button_states();
        if states != last_pressed {
            info!("Pressed: {:?}", states.pressed().map(|b| b.name()).collect::<Vec<_>>());
            last_pressed = states;
            dirty = true;
        }

        if dirty {
            if let Some(layout) = controller.layout() {
                let (w, h) = win.size();
                let pixels = renderer.render(layout, &states);
                if pixels.len() == w as usize * h as usize {
                    win.update_pixels(&pixels, w, h);
                }
            }
            dirty = false;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            std::thread::sleep(frame_duration - elapsed);
        }
    }
}

/// `[WIDTH HEIGHT]`, falling back to the defaults on anything unparsable.
fn parse_size(args: Vec<String>) -> (u16, u16) {
    match args.as_slice() {
        [w, h, ..] => match (w.parse(), h.parse()) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
            _ => {
                warn!("Invalid size {w}x{h}, using {DEFAULT_WIDTH}x{DEFAULT_HEIGHT}");
                (DEFAULT_WIDTH, DEFAULT_HEIGHT)
            }
        },
        _ => (DEFAULT_WIDTH, DEFAULT_HEIGHT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_from_args() {
        assert_eq!(parse_size(vec!["390".into(), "844".into()]), (390, 844));
        assert_eq!(parse_size(vec![]), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert_eq!(parse_size(vec!["0".into(), "10".into()]), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert_eq!(parse_size(vec!["wide".into(), "10".into()]), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
    }
}
