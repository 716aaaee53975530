//! Virtual on-screen game controller for touch devices.
//!
//! A D-pad, Select/Start and B/A laid out in one row, with multi-touch
//! tracking that turns finger positions into per-button pressed callbacks.
//! The simulator binary (X11) and the preview binary (PNG) sit on top.

pub mod buttons;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod layout;
pub mod mapper;
pub mod renderer;
pub mod shape;
pub mod style;
pub mod touch;
