//! Host toolkit integration seams.
//!
//! The control never extends a host container type; it paints through a
//! [`Surface`] trait object and reads the clipboard through [`Clipboard`].
//! The host-integration layer adapts these calls to whatever primitives the
//! toolkit actually provides (a rich-text/markdown renderer for the fenced
//! block, plain labels for the gutter and language tag, a bordered container
//! for the focus indicator).

/// Text style handed to the fenced-code rendering primitive. The primitive's
/// internals (highlighting, layout) are opaque to the control.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeStyle {
    pub theme: String,
    pub font: String,
    pub font_size: u16,
    pub letter_spacing: f32,
}

/// Style for plain-text labels (line numbers, language tag).
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub font: String,
    pub font_size: u16,
    pub color: String,
}

/// Paint target provided by the host. Each method repaints exactly one visual
/// region; the control only calls the methods for regions enabled in its
/// configuration, so a disabled region is never touched (and never cleared).
pub trait Surface {
    /// Repaint the highlighted code region from a fenced code string.
    fn paint_code(&mut self, fenced: &str, style: &CodeStyle);
    /// Repaint the line-number gutter, one label per entry, top to bottom.
    fn paint_line_numbers(&mut self, labels: &[String], style: &LabelStyle);
    /// Repaint the language tag above the code region.
    fn paint_language(&mut self, label: &str, style: &LabelStyle);
    /// Show the focus border in the given color, or clear it with `None`.
    fn set_focus_border(&mut self, color: Option<&str>);
}

/// Clipboard read primitive. Returns `None` when the host has no clipboard
/// or it holds no text.
pub trait Clipboard {
    fn read_text(&mut self) -> Option<String>;
}

/// Clipboard for hosts without one; every read yields nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn read_text(&mut self) -> Option<String> {
        None
    }
}

/// Fixed-content clipboard, useful for tests and the demo host.
#[derive(Debug, Default, Clone)]
pub struct StaticClipboard {
    text: String,
}

impl StaticClipboard {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Clipboard for StaticClipboard {
    fn read_text(&mut self) -> Option<String> {
        if self.text.is_empty() {
            None
        } else {
            Some(self.text.clone())
        }
    }
}
