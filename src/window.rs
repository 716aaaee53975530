//! X11 window for the desktop simulator.
//! Uses a 32-bit ARGB visual when available so the transparent background of
//! the controller shows through, and reports pointer buttons as touches.

use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

use log::debug;

/// Input the simulator cares about, already in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    PointerDown { button: u8, x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { button: u8, x: f32, y: f32 },
    Resized { width: u16, height: u16 },
    /// Focus went elsewhere or another client grabbed the pointer; held
    /// buttons will not see their release.
    InputLost,
    Expose,
    CloseRequested,
}

pub struct ControllerWindow {
    conn: RustConnection,
    window: Window,
    gc: Gcontext,
    depth: u8,
    wm_delete: Atom,
    width: u16,
    height: u16,
}

impl ControllerWindow {
    pub fn new(width: u16, height: u16, title: &str) -> Result<Self, String> {
        let (conn, screen_num) = RustConnection::connect(None).map_err(|e| format!("X11 connect: {e}"))?;
        let screen = &conn.setup().roots[screen_num];

        let (visual, depth) = find_argb_visual(screen).unwrap_or((screen.root_visual, screen.root_depth));

        let colormap = conn.generate_id().map_err(|e| e.to_string())?;
        conn.create_colormap(ColormapAlloc::NONE, colormap, screen.root, visual)
            .map_err(|e| e.to_string())?;

        let window = conn.generate_id().map_err(|e| e.to_string())?;
        let values = CreateWindowAux::new()
            .background_pixel(0)
            .border_pixel(0)
            .colormap(colormap)
            .event_mask(
                EventMask::EXPOSURE
                    | EventMask::STRUCTURE_NOTIFY
                    | EventMask::BUTTON_PRESS
                    | EventMask::BUTTON_RELEASE
                    | EventMask::BUTTON_MOTION
                    | EventMask::LEAVE_WINDOW
                    | EventMask::FOCUS_CHANGE,
            );

        conn.create_window(depth, window, screen.root, 0, 0, width, height, 0, WindowClass::INPUT_OUTPUT, visual, &values)
            .map_err(|e| format!("create_window: {e}"))?;

        conn.change_property8(PropMode::REPLACE, window, AtomEnum::WM_NAME, AtomEnum::STRING, title.as_bytes())
            .map_err(|e| e.to_string())?;

        let wm_protocols = intern_atom(&conn, "WM_PROTOCOLS")?;
        let wm_delete = intern_atom(&conn, "WM_DELETE_WINDOW")?;
        conn.change_property32(PropMode::REPLACE, window, wm_protocols, AtomEnum::ATOM, &[wm_delete])
            .map_err(|e| e.to_string())?;

        let gc = conn.generate_id().map_err(|e| e.to_string())?;
        conn.create_gc(gc, window, &CreateGCAux::new()).map_err(|e| e.to_string())?;
        conn.map_window(window).map_err(|e| e.to_string())?;
        conn.flush().map_err(|e| e.to_string())?;

        debug!("Window created: {width}x{height}, depth={depth}");

        Ok(ControllerWindow { conn, window, gc, depth, wm_delete, width, height })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Blit an ARGB buffer of exactly `width * height` pixels.
    pub fn update_pixels(&self, pixels: &[u32], width: u16, height: u16) {
        let mut data = Vec::with_capacity(pixels.len() * 4);
        for &px in pixels {
            data.push((px & 0xFF) as u8);
            data.push(((px >> 8) & 0xFF) as u8);
            data.push(((px >> 16) & 0xFF) as u8);
            data.push(((px >> 24) & 0xFF) as u8);
        }

        let _ = self.conn.put_image(ImageFormat::Z_PIXMAP, self.window, self.gc, width, height, 0, 0, 0, self.depth, &data);
        let _ = self.conn.flush();
    }

    /// Drain pending X11 events without blocking.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.conn.poll_for_event() {
            match event {
                Event::ButtonPress(e) => events.push(WindowEvent::PointerDown {
                    button: e.detail,
                    x: e.event_x as f32,
                    y: e.event_y as f32,
                }),
                Event::ButtonRelease(e) => events.push(WindowEvent::PointerUp {
                    button: e.detail,
                    x: e.event_x as f32,
                    y: e.event_y as f32,
                }),
                Event::MotionNotify(e) => events.push(WindowEvent::PointerMove {
                    x: e.event_x as f32,
                    y: e.event_y as f32,
                }),
                Event::ConfigureNotify(e) if e.width != self.width || e.height != self.height => {
                    self.width = e.width;
                    self.height = e.height;
                    events.push(WindowEvent::Resized { width: e.width, height: e.height });
                }
                Event::LeaveNotify(e) if e.mode == NotifyMode::GRAB => events.push(WindowEvent::InputLost),
                Event::FocusOut(e) if e.mode == NotifyMode::NORMAL => events.push(WindowEvent::InputLost),
                Event::Expose(_) => events.push(WindowEvent::Expose),
                Event::ClientMessage(e) if e.format == 32 && e.data.as_data32()[0] == self.wm_delete => {
                    events.push(WindowEvent::CloseRequested);
                }
                _ => {}
            }
        }
        events
    }
}

fn find_argb_visual(screen: &Screen) -> Option<(Visualid, u8)> {
    for depth_info in &screen.allowed_depths {
        if depth_info.depth == 32 {
            for visual in &depth_info.visuals {
                if visual.class == VisualClass::TRUE_COLOR {
                    return Some((visual.visual_id, 32));
                }
            }
        }
    }
    None
}

fn intern_atom(conn: &RustConnection, name: &str) -> Result<Atom, String> {
    conn.intern_atom(false, name.as_bytes())
        .map_err(|e| e.to_string())?
        .reply()
        .map(|r| r.atom)
        .map_err(|e| e.to_string())
}
