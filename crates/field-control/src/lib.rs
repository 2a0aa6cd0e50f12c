//! The code field control: input dispatch, focus, and render synchronization.
//!
//! [`CodeField`] owns the logical state (buffer, caps flag, focus flag) and
//! composes host primitives through the `field-host` traits instead of
//! extending a host container. One external event (key press or click) is
//! processed to completion at a time: classification routes to the navigation
//! helpers, the buffer primitives, or the key translator, and every buffer
//! mutation repaints the enabled regions and notifies change listeners before
//! the handler returns.
//!
//! Lifecycle is explicit: the host calls [`CodeField::mount`] when the
//! control enters the tree (triggering the initial paint) and
//! [`CodeField::unmount`] when it leaves; no ambient page-level hooks are
//! mutated. Events delivered while unmounted or unfocused are ignored.

pub mod key_translator;

use field_config::EditorConfig;
use field_events::{EventListeners, KeyEvent};
use field_host::{Clipboard, CodeStyle, LabelStyle, Surface};
use field_render::RenderFrame;
use field_text::{Buffer, motion};
use tracing::{debug, trace};

/// Editable code control composed from host primitives.
pub struct CodeField {
    buffer: Buffer,
    config: EditorConfig,
    caps: bool,
    focused: bool,
    mounted: bool,
    listeners: EventListeners,
    surface: Box<dyn Surface>,
    clipboard: Box<dyn Clipboard>,
}

impl CodeField {
    /// Build the control. The cursor starts at the end of the initial text
    /// and the control comes up unmounted and unfocused.
    pub fn new(
        config: EditorConfig,
        surface: Box<dyn Surface>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let buffer = Buffer::from_str(&config.text);
        Self {
            buffer,
            config,
            caps: false,
            focused: false,
            mounted: false,
            listeners: EventListeners::new(),
            surface,
            clipboard,
        }
    }

    /// Current buffer contents.
    pub fn text(&self) -> String {
        self.buffer.content()
    }

    /// Current type point.
    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_caps(&self) -> bool {
        self.caps
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Subscribe to focus changes. Several listeners may be registered; all
    /// run in registration order.
    pub fn on_focus(&mut self, listener: impl FnMut(bool) + 'static) {
        self.listeners.on_focus(listener);
    }

    /// Subscribe to text changes. Fired once per successful insertion or
    /// deletion with the current text, so a paste of N characters notifies N
    /// times.
    pub fn on_change(&mut self, listener: impl FnMut(&str) + 'static) {
        self.listeners.on_change(listener);
    }

    /// The control entered the host tree: start processing events and paint
    /// the initial frame.
    pub fn mount(&mut self) {
        self.mounted = true;
        debug!(target: "field.lifecycle", "mounted");
        self.sync_render();
    }

    /// The control left the host tree: drop focus (without notifying, the
    /// control is gone) and stop processing events.
    pub fn unmount(&mut self) {
        self.focused = false;
        self.mounted = false;
        debug!(target: "field.lifecycle", "unmounted");
    }

    /// Host click notification: toggle focus.
    pub fn handle_click(&mut self) {
        if !self.mounted {
            return;
        }
        let target = !self.focused;
        self.set_focus(target);
    }

    /// Process one keyboard event. Ignored entirely unless mounted and
    /// focused.
    pub fn handle_key(&mut self, event: &KeyEvent) {
        if !self.mounted || !self.focused {
            trace!(target: "field.input", key = %event, "ignored_inactive");
            return;
        }
        trace!(target: "field.input", key = %event, caps = self.caps, "dispatch");
        match event.label.as_str() {
            "Backspace" => {
                if event.ctrl() {
                    self.delete_word();
                } else {
                    self.delete_letter();
                }
            }
            "Escape" => self.set_focus(false),
            "Caps Lock" => {
                self.caps = !self.caps;
                trace!(target: "field.input", caps = self.caps, "caps_toggled");
            }
            "Arrow Left" => {
                if event.ctrl() {
                    motion::word_left(&mut self.buffer);
                } else {
                    motion::left(&mut self.buffer);
                }
            }
            "Tab" => {
                let pad = " ".repeat(self.config.tab_spacing);
                self.type_word(&pad);
            }
            "Arrow Right" => {
                if event.ctrl() {
                    motion::word_right(&mut self.buffer);
                } else {
                    motion::right(&mut self.buffer);
                }
            }
            "Arrow Up" => motion::up(&mut self.buffer),
            "Arrow Down" => motion::down(&mut self.buffer),
            "V" if event.ctrl() => {
                if self.config.allow_pasting {
                    if let Some(text) = self.clipboard.read_text() {
                        self.type_word(&text);
                    }
                } else {
                    trace!(target: "field.input", "paste_disabled");
                }
            }
            label => {
                if let Some(c) =
                    key_translator::translate(label, event.shift(), self.caps, &self.config.shift_map)
                {
                    self.type_letter(c);
                }
            }
        }
    }

    fn set_focus(&mut self, focus: bool) {
        self.focused = focus;
        debug!(target: "field.focus", focused = focus, "focus_changed");
        self.listeners.emit_focus(focus);
        if self.config.show_focus_border {
            let color = focus.then_some(self.config.focus_border_color.as_str());
            self.surface.set_focus_border(color);
        }
    }

    fn type_letter(&mut self, c: char) {
        let letter = c.to_string();
        if self.buffer.insert_letter(&letter) {
            self.sync_render();
            self.notify_change();
        }
    }

    /// Insert a multi-character string one character at a time; each
    /// character paints and notifies individually.
    fn type_word(&mut self, word: &str) {
        for c in word.chars() {
            self.type_letter(c);
        }
    }

    fn delete_letter(&mut self) {
        if self.buffer.remove_letter() {
            self.sync_render();
            self.notify_change();
        }
    }

    /// Delete from the cursor back to, but not past, the previous word
    /// boundary; with no space before the cursor this clears back to the
    /// start of the buffer.
    fn delete_word(&mut self) {
        let boundary = motion::prev_word_boundary(&self.buffer);
        while self.buffer.cursor() > boundary {
            self.delete_letter();
        }
    }

    fn notify_change(&mut self) {
        let text = self.buffer.content();
        self.listeners.emit_change(&text);
    }

    /// Recompute the render state and repaint every region enabled in the
    /// config. Disabled regions are never touched.
    fn sync_render(&mut self) {
        let frame = RenderFrame::compose(&self.buffer.content(), &self.config);
        let code_style = CodeStyle {
            theme: self.config.code_theme.clone(),
            font: self.config.font.clone(),
            font_size: self.config.font_size,
            letter_spacing: self.config.letter_spacing,
        };
        self.surface.paint_code(&frame.code_block, &code_style);
        if let Some(labels) = &frame.line_numbers {
            let style = LabelStyle {
                font: self.config.font.clone(),
                font_size: self.config.font_size,
                color: self.config.line_number_text_color.clone(),
            };
            self.surface.paint_line_numbers(labels, &style);
        }
        if let Some(label) = &frame.language_label {
            let style = LabelStyle {
                font: self.config.font.clone(),
                font_size: self.config.font_size,
                color: self.config.language_text_color.clone(),
            };
            self.surface.paint_language(label, &style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_host::{NoClipboard, StaticClipboard};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Paint {
        Code(String),
        Lines(Vec<String>),
        Language(String),
        Border(Option<String>),
    }

    #[derive(Clone, Default)]
    struct MockSurface {
        ops: Rc<RefCell<Vec<Paint>>>,
    }

    impl MockSurface {
        fn new() -> (Self, Rc<RefCell<Vec<Paint>>>) {
            let surface = Self::default();
            let ops = Rc::clone(&surface.ops);
            (surface, ops)
        }
    }

    impl Surface for MockSurface {
        fn paint_code(&mut self, fenced: &str, _style: &CodeStyle) {
            self.ops.borrow_mut().push(Paint::Code(fenced.to_string()));
        }
        fn paint_line_numbers(&mut self, labels: &[String], _style: &LabelStyle) {
            self.ops.borrow_mut().push(Paint::Lines(labels.to_vec()));
        }
        fn paint_language(&mut self, label: &str, _style: &LabelStyle) {
            self.ops.borrow_mut().push(Paint::Language(label.to_string()));
        }
        fn set_focus_border(&mut self, color: Option<&str>) {
            self.ops
                .borrow_mut()
                .push(Paint::Border(color.map(str::to_string)));
        }
    }

    fn config_with(text: &str) -> EditorConfig {
        EditorConfig {
            text: text.to_string(),
            ..EditorConfig::default()
        }
    }

    fn field(text: &str) -> (CodeField, Rc<RefCell<Vec<Paint>>>) {
        let (surface, ops) = MockSurface::new();
        let mut field = CodeField::new(config_with(text), Box::new(surface), Box::new(NoClipboard));
        field.mount();
        (field, ops)
    }

    fn focused_field(text: &str) -> (CodeField, Rc<RefCell<Vec<Paint>>>) {
        let (mut field, ops) = field(text);
        field.handle_click();
        (field, ops)
    }

    fn key(label: &str) -> KeyEvent {
        KeyEvent::plain(label)
    }

    fn ctrl(label: &str) -> KeyEvent {
        KeyEvent::with_ctrl(label)
    }

    #[test]
    fn mount_paints_initial_frame() {
        let (_field, ops) = field("a\nb");
        let ops = ops.borrow();
        assert!(matches!(&ops[0], Paint::Code(code) if code == "```python\na\nb\n```"));
        assert!(matches!(&ops[1], Paint::Lines(labels) if labels == &["1", "2", "3"]));
        assert!(matches!(&ops[2], Paint::Language(label) if label == "PYTHON"));
    }

    #[test]
    fn unfocused_control_ignores_all_keys() {
        let (mut field, _ops) = field("abc");
        for label in ["a", "Backspace", "Tab", "Arrow Left", "Enter"] {
            field.handle_key(&key(label));
        }
        field.handle_key(&ctrl("V"));
        assert_eq!(field.text(), "abc");
        assert_eq!(field.cursor(), 3);
        assert!(!field.is_focused());
    }

    #[test]
    fn click_toggles_focus_and_border() {
        let (mut field, ops) = field("x");
        let focus_log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&focus_log);
        field.on_focus(move |focused| sink.borrow_mut().push(focused));

        field.handle_click();
        assert!(field.is_focused());
        field.handle_click();
        assert!(!field.is_focused());
        assert_eq!(*focus_log.borrow(), vec![true, false]);

        let borders: Vec<_> = ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Paint::Border(color) => Some(color.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(borders, vec![Some("blue400".to_string()), None]);
    }

    #[test]
    fn focus_border_suppressed_when_disabled() {
        let (surface, ops) = MockSurface::new();
        let mut config = config_with("x");
        config.show_focus_border = false;
        let mut field = CodeField::new(config, Box::new(surface), Box::new(NoClipboard));
        field.mount();
        field.handle_click();
        assert!(field.is_focused());
        field.handle_key(&key("Escape"));
        // The border region is disabled, so it is never touched at all.
        assert!(
            ops.borrow()
                .iter()
                .all(|op| !matches!(op, Paint::Border(_)))
        );
    }

    #[test]
    fn escape_unfocuses_and_notifies() {
        let (mut field, _ops) = focused_field("x");
        let focus_log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&focus_log);
        field.on_focus(move |focused| sink.borrow_mut().push(focused));
        field.handle_key(&key("Escape"));
        assert!(!field.is_focused());
        assert_eq!(*focus_log.borrow(), vec![false]);
        // Subsequent keys are ignored again.
        field.handle_key(&key("a"));
        assert_eq!(field.text(), "x");
    }

    #[test]
    fn typing_inserts_translated_characters() {
        let (mut field, _ops) = focused_field("");
        field.handle_key(&key("A"));
        field.handle_key(&KeyEvent::with_shift("1"));
        field.handle_key(&key("Enter"));
        assert_eq!(field.text(), "a!\n");
        assert_eq!(field.cursor(), 3);
    }

    #[test]
    fn caps_lock_persists_across_events() {
        let (mut field, _ops) = focused_field("");
        field.handle_key(&key("Caps Lock"));
        assert!(field.is_caps());
        field.handle_key(&key("a"));
        field.handle_key(&key("Caps Lock"));
        field.handle_key(&key("a"));
        assert_eq!(field.text(), "Aa");
    }

    #[test]
    fn named_keys_without_mapping_are_ignored() {
        let (mut field, _ops) = focused_field("x");
        field.handle_key(&key("F5"));
        field.handle_key(&key("Shift"));
        assert_eq!(field.text(), "x");
    }

    #[test]
    fn backspace_deletes_before_cursor_and_noops_at_start() {
        let (mut field, _ops) = focused_field("ab");
        field.handle_key(&key("Backspace"));
        assert_eq!(field.text(), "a");
        field.handle_key(&key("Backspace"));
        field.handle_key(&key("Backspace"));
        assert_eq!(field.text(), "");
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn ctrl_backspace_deletes_back_to_word_boundary() {
        let (mut field, _ops) = focused_field("hello world");
        field.handle_key(&ctrl("Backspace"));
        assert_eq!(field.text(), "hello ");
        assert_eq!(field.cursor(), 6);
        // No space left before the cursor: clears to the start.
        field.handle_key(&ctrl("Backspace"));
        assert_eq!(field.text(), "");
    }

    #[test]
    fn tab_inserts_configured_spacing_one_char_at_a_time() {
        let (mut field, _ops) = focused_field("");
        let changes = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&changes);
        field.on_change(move |_| *sink.borrow_mut() += 1);
        field.handle_key(&key("Tab"));
        assert_eq!(field.text(), "    ");
        assert_eq!(*changes.borrow(), 4);
    }

    #[test]
    fn arrows_move_cursor_without_repainting() {
        let (mut field, ops) = focused_field("ab\ncd");
        let painted = ops.borrow().len();
        field.handle_key(&key("Arrow Left"));
        assert_eq!(field.cursor(), 4);
        field.handle_key(&key("Arrow Up"));
        assert_eq!(field.cursor(), 2);
        field.handle_key(&key("Arrow Down"));
        assert_eq!(field.cursor(), 2); // already on the newline offset
        field.handle_key(&key("Arrow Right"));
        assert_eq!(field.cursor(), 3);
        assert_eq!(ops.borrow().len(), painted);
    }

    #[test]
    fn ctrl_arrows_use_word_boundaries() {
        let (mut field, _ops) = focused_field("hello world");
        field.handle_key(&ctrl("Arrow Left"));
        assert_eq!(field.cursor(), 6);
        field.handle_key(&ctrl("Arrow Left"));
        assert_eq!(field.cursor(), 0);
        field.handle_key(&ctrl("Arrow Right"));
        assert_eq!(field.cursor(), 5); // onto the space
    }

    #[test]
    fn paste_inserts_clipboard_character_by_character() {
        let (surface, _ops) = MockSurface::new();
        let mut field = CodeField::new(
            config_with(""),
            Box::new(surface),
            Box::new(StaticClipboard::new("ab\nc")),
        );
        field.mount();
        field.handle_click();
        let changes = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&changes);
        field.on_change(move |_| *sink.borrow_mut() += 1);
        field.handle_key(&ctrl("V"));
        assert_eq!(field.text(), "ab\nc");
        assert_eq!(*changes.borrow(), 4);
    }

    #[test]
    fn paste_respects_allow_pasting_flag() {
        let (surface, _ops) = MockSurface::new();
        let mut config = config_with("");
        config.allow_pasting = false;
        let mut field = CodeField::new(
            config,
            Box::new(surface),
            Box::new(StaticClipboard::new("nope")),
        );
        field.mount();
        field.handle_click();
        field.handle_key(&ctrl("V"));
        assert_eq!(field.text(), "");
    }

    #[test]
    fn plain_v_types_the_letter() {
        let (mut field, _ops) = focused_field("");
        field.handle_key(&key("V"));
        assert_eq!(field.text(), "v");
    }

    #[test]
    fn disabled_regions_are_never_painted() {
        let (surface, ops) = MockSurface::new();
        let mut config = config_with("one\ntwo");
        config.show_line_numbers = false;
        config.show_language_text = false;
        let mut field = CodeField::new(config, Box::new(surface), Box::new(NoClipboard));
        field.mount();
        field.handle_click();
        field.handle_key(&key("x"));
        assert!(
            ops.borrow()
                .iter()
                .all(|op| !matches!(op, Paint::Lines(_) | Paint::Language(_)))
        );
    }

    #[test]
    fn change_listener_receives_text_after_each_mutation() {
        let (mut field, _ops) = focused_field("a");
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        field.on_change(move |text| sink.borrow_mut().push(text.to_string()));
        field.handle_key(&key("b"));
        field.handle_key(&key("Backspace"));
        assert_eq!(*log.borrow(), vec!["ab".to_string(), "a".to_string()]);
    }

    #[test]
    fn unmount_drops_focus_silently_and_stops_processing() {
        let (mut field, _ops) = focused_field("x");
        let focus_log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&focus_log);
        field.on_focus(move |focused| sink.borrow_mut().push(focused));
        field.unmount();
        assert!(!field.is_focused());
        assert!(focus_log.borrow().is_empty());
        field.handle_key(&key("a"));
        field.handle_click();
        assert_eq!(field.text(), "x");
        assert!(!field.is_focused());
    }

    #[test]
    fn cursor_stays_clamped_through_arbitrary_event_mix() {
        let (mut field, _ops) = focused_field("seed text");
        let script = [
            key("Backspace"),
            ctrl("Backspace"),
            key("Arrow Left"),
            key("a"),
            key("Arrow Down"),
            key("Enter"),
            ctrl("Arrow Right"),
            key("Backspace"),
        ];
        for event in &script {
            field.handle_key(event);
            assert!(field.cursor() <= field.text().chars().count());
        }
    }
}
