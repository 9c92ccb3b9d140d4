//! Render targets.
//!
//! A layout describes each frame as a short list of [`DrawCommand`]s; a
//! [`RenderTarget`] turns them into something visible (or just records them).

use std::fmt::Write as _;

use serde::Serialize;

use crate::style;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear { width: f64, height: f64, color: &'static str },
    Line { from: (f64, f64), to: (f64, f64), color: &'static str, width: f64 },
    Circle { center: (f64, f64), radius: f64, color: &'static str },
    Label { at: (f64, f64), text: String, color: &'static str },
}

pub trait RenderTarget: Send {
    fn draw(&mut self, command: DrawCommand);

    /// Called once after the last command of a frame.
    fn end_frame(&mut self) {}
}

// ── FrameRecorder ─────────────────────────────────────────────────────────────

/// Keeps the commands of the last complete frame and counts everything.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pending: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames: u64,
    draw_calls: u64,
}

impl FrameRecorder {
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }

    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }
}

impl RenderTarget for FrameRecorder {
    fn draw(&mut self, command: DrawCommand) {
        self.draw_calls += 1;
        self.pending.push(command);
    }

    fn end_frame(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames += 1;
    }
}

// ── SvgCanvas ─────────────────────────────────────────────────────────────────

/// Renders each frame to a standalone SVG document.
#[derive(Debug, Default)]
pub struct SvgCanvas {
    body: String,
    size: (f64, f64),
    document: Option<String>,
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently completed frame, if any.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl RenderTarget for SvgCanvas {
    fn draw(&mut self, command: DrawCommand) {
        // write! into a String cannot fail
        let _ = match command {
            DrawCommand::Clear { width, height, color } => {
                self.body.clear();
                self.size = (width, height);
                writeln!(self.body, r#"  <rect width="{width}" height="{height}" fill="{color}"/>"#)
            }
            DrawCommand::Line { from, to, color, width } => writeln!(
                self.body,
                r#"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{color}" stroke-width="{width}"/>"#,
                from.0, from.1, to.0, to.1
            ),
            DrawCommand::Circle { center, radius, color } => writeln!(
                self.body,
                r#"  <circle cx="{:.1}" cy="{:.1}" r="{radius}" fill="{color}"/>"#,
                center.0, center.1
            ),
            DrawCommand::Label { at, text, color } => writeln!(
                self.body,
                r#"  <text x="{:.1}" y="{:.1}" fill="{color}" font-family="Roboto, sans-serif" font-size="{}" text-anchor="middle">{}</text>"#,
                at.0,
                at.1,
                style::LABEL_FONT_SIZE,
                escape(&text)
            ),
        };
    }

    fn end_frame(&mut self) {
        let (width, height) = self.size;
        self.document = Some(format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n{}</svg>\n",
            std::mem::take(&mut self.body)
        ));
    }
}
