use blockdoc_core::{BlockId, BlockType, EditorState, SequentialIds};
use blockdoc_engine::apply_mutation_with;
use blockdoc_input::{
    capture_text_input, handle_text_block_key, ConvertPreset, Key, KeyInput, PlainTextField,
};

struct Harness {
    state: EditorState,
    ids: SequentialIds,
}

impl Harness {
    fn new() -> Self {
        let mut ids = SequentialIds::new("k");
        let state = EditorState::new_with(&mut ids);
        Self { state, ids }
    }

    fn active(&self) -> BlockId {
        self.state
            .active_block_id()
            .cloned()
            .unwrap_or_else(|| self.state.blocks()[0].id.clone())
    }

    fn field(&self) -> PlainTextField {
        let id = self.active();
        let text = self.state.get(&id).map(|b| b.plain_text()).unwrap_or_default();
        PlainTextField::new(text)
    }

    fn type_text(&mut self, text: &str) {
        let id = self.active();
        let mut field = self.field();
        field.set_caret(usize::MAX);
        field.replace_selection(text);
        let m = capture_text_input(&id, field.text());
        self.state = apply_mutation_with(&self.state, &m, &mut self.ids);
    }

    fn press(&mut self, key: Key, caret: usize) -> bool {
        let id = self.active();
        let field = self.field().with_caret(caret);
        let out = handle_text_block_key(&id, &KeyInput::plain(key), &field);
        if let Some(m) = out.mutation {
            self.state = apply_mutation_with(&self.state, &m, &mut self.ids);
        }
        out.prevent_default
    }
}

#[test]
fn typing_enter_and_backspace_round_trip() {
    let mut h = Harness::new();
    h.type_text("First line");
    assert!(h.press(Key::Enter, 10));
    assert_eq!(h.state.len(), 2);
    assert_eq!(h.active(), "k2");

    // Backspace in the fresh empty block merges it away.
    assert!(h.press(Key::Backspace, 0));
    assert_eq!(h.state.len(), 1);
    assert_eq!(h.state.blocks()[0].plain_text(), "First line");
    assert_eq!(h.active(), "k1");
}

#[test]
fn arrows_walk_between_blocks() {
    let mut h = Harness::new();
    h.type_text("one");
    h.press(Key::Enter, 3);
    h.type_text("two");

    assert!(h.press(Key::ArrowUp, 0));
    assert_eq!(h.active(), "k1");
    assert!(!h.press(Key::ArrowDown, 1));
    assert!(h.press(Key::ArrowDown, 3));
    assert_eq!(h.active(), "k2");
}

#[test]
fn toolbar_conversion_then_typing_keeps_type() {
    let mut h = Harness::new();
    h.type_text("Title");
    let focus = blockdoc_engine::Mutation::FocusBlock { block_id: h.active() };
    h.state = apply_mutation_with(&h.state, &focus, &mut h.ids);

    let m = ConvertPreset::Heading1.convert_active(&h.state).unwrap();
    h.state = apply_mutation_with(&h.state, &m, &mut h.ids);
    h.type_text("!");

    let block = &h.state.blocks()[0];
    assert_eq!(block.block_type(), BlockType::Heading);
    assert_eq!(block.plain_text(), "Title!");
}
