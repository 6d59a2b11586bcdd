use serde::{Deserialize, Serialize};

/// Selection inside the focused container, as char offsets into its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Formatting ancestors of the selection anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattingContext {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    /// Set when the anchor sits inside a link.
    pub link_href: Option<String>,
}

/// Host capability: where the caret is and what surrounds it.
///
/// A browser DOM, a native text view or a terminal field can all provide
/// these facts; nothing here mutates the document.
pub trait TextSelectionProbe {
    /// Current range, or `None` when nothing is selected.
    fn selection(&self) -> Option<SelectionRange>;
    /// Full visible text of the nearest editable container, if any.
    fn container_text(&self) -> Option<&str>;
    fn formatting(&self) -> FormattingContext;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPosition {
    pub offset: usize,
    pub at_start: bool,
    pub at_end: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub is_collapsed: bool,
    pub is_bold: bool,
    pub is_italic: bool,
    pub is_code: bool,
    pub is_link: bool,
    pub link_href: Option<String>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            is_collapsed: true,
            is_bold: false,
            is_italic: false,
            is_code: false,
            is_link: false,
            link_href: None,
        }
    }
}

/// Caret offset measured from the start of the container.
///
/// No selection or no container yields `{0, false, false}`.
pub fn cursor_position(probe: &dyn TextSelectionProbe) -> CursorPosition {
    let (Some(range), Some(text)) = (probe.selection(), probe.container_text()) else {
        return CursorPosition::default();
    };

    let len = text.chars().count();
    let offset = range.start.min(len);
    CursorPosition {
        offset,
        at_start: offset == 0,
        at_end: offset == len,
    }
}

/// Computed on demand; never cached.
pub fn selection_state(probe: &dyn TextSelectionProbe) -> SelectionState {
    let Some(range) = probe.selection() else {
        return SelectionState::default();
    };

    let fmt = probe.formatting();
    SelectionState {
        is_collapsed: range.is_collapsed(),
        is_bold: fmt.bold,
        is_italic: fmt.italic,
        is_code: fmt.code,
        is_link: fmt.link_href.is_some(),
        link_href: fmt.link_href,
    }
}

/// In-memory text field with a selection, for hosts without a native one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainTextField {
    text: String,
    selection: Option<SelectionRange>,
    formatting: FormattingContext,
}

impl PlainTextField {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: None,
            formatting: FormattingContext::default(),
        }
    }

    /// Place a collapsed caret at `offset` (clamped to the text length).
    pub fn with_caret(mut self, offset: usize) -> Self {
        self.set_caret(offset);
        self
    }

    pub fn with_selection(mut self, start: usize, end: usize) -> Self {
        self.select(start, end);
        self
    }

    pub fn with_formatting(mut self, formatting: FormattingContext) -> Self {
        self.formatting = formatting;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn set_caret(&mut self, offset: usize) {
        let offset = offset.min(self.char_len());
        self.selection = Some(SelectionRange::caret(offset));
    }

    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.char_len();
        let (a, b) = (start.min(len), end.min(len));
        self.selection = Some(SelectionRange {
            start: a.min(b),
            end: a.max(b),
        });
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn formatting_mut(&mut self) -> &mut FormattingContext {
        &mut self.formatting
    }

    /// Replace the selection (or insert at the caret) and leave the caret
    /// after the inserted text. Without a selection, appends.
    pub fn replace_selection(&mut self, insert: &str) {
        let len = self.char_len();
        let range = self.selection.unwrap_or(SelectionRange::caret(len));
        let start = byte_offset(&self.text, range.start);
        let end = byte_offset(&self.text, range.end);
        self.text.replace_range(start..end, insert);
        self.selection = Some(SelectionRange::caret(range.start + insert.chars().count()));
    }

    /// Set the whole text, clamping any selection into range.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        if let Some(range) = self.selection {
            self.select(range.start, range.end);
        }
    }
}

impl TextSelectionProbe for PlainTextField {
    fn selection(&self) -> Option<SelectionRange> {
        self.selection
    }

    fn container_text(&self) -> Option<&str> {
        Some(&self.text)
    }

    fn formatting(&self) -> FormattingContext {
        self.formatting.clone()
    }
}

/// Byte index of the `chars`-th char (or the end of `s`).
pub(crate) fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}
