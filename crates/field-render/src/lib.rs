//! Render-state composition.
//!
//! A [`RenderFrame`] is a pure function of buffer text + configuration and is
//! recomputed after every mutation, never stored. The control hands its
//! strings to the host primitives; nothing here paints.

use field_config::EditorConfig;

/// Everything the host needs to repaint the enabled regions. Regions disabled
/// in the config come out as `None` and must be left untouched by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    /// Fenced code string for the highlighting primitive.
    pub code_block: String,
    /// Gutter labels, present only when line numbers are enabled.
    pub line_numbers: Option<Vec<String>>,
    /// Uppercased language tag, present only when the label is enabled.
    pub language_label: Option<String>,
}

impl RenderFrame {
    /// Compose the frame for the given text under the given configuration.
    pub fn compose(text: &str, cfg: &EditorConfig) -> Self {
        let frame = Self {
            code_block: fence(text, &cfg.language),
            line_numbers: cfg.show_line_numbers.then(|| line_labels(text)),
            language_label: cfg
                .show_language_text
                .then(|| cfg.language.to_uppercase()),
        };
        tracing::trace!(
            target: "field.render",
            code_len = frame.code_block.len(),
            lines = frame.line_numbers.as_ref().map(Vec::len),
            "frame_composed"
        );
        frame
    }
}

/// Wrap raw text in a fenced code block for the rendering primitive. Literal
/// backticks are escaped so they cannot terminate the fence, and empty text
/// becomes a single space so the rendered block never collapses to zero
/// width.
pub fn fence(text: &str, language: &str) -> String {
    let body = if text.is_empty() {
        " ".to_string()
    } else {
        text.replace('`', "\\`")
    };
    format!("```{language}\n{body}\n```")
}

/// Gutter labels `1..=(lineCount + 1)` where lineCount is the number of
/// newline-separated segments. This over-generates one label beyond the last
/// line; the original control behaves this way and the extra label is kept
/// until product intent says otherwise.
pub fn line_labels(text: &str) -> Vec<String> {
    let line_count = text.split('\n').count();
    (1..=line_count + 1).map(|n| n.to_string()).collect()
}
