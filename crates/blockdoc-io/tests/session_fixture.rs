use std::path::Path;

use anyhow::Result;
use blockdoc_io::prelude::*;

fn read_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {name} at {}: {e}", path.display()))
}

#[test]
fn load_edit_save_cycle() -> Result<()> {
    let mut session = EditorSession::with_ids(Box::new(SequentialIds::new("b")));
    session.hydrate_json(&read_fixture("document.json"))?;

    // Ids restart on load: the seven fixture blocks are b1..b7.
    assert_eq!(session.blocks().len(), 7);
    assert_eq!(session.blocks()[0].id, "b1");
    assert_eq!(session.blocks()[6].id, "b7");
    assert_eq!(session.blocks()[0].block_type(), BlockType::Heading);
    assert!(!session.is_dirty());

    let quote = session.blocks()[4].id.clone();
    let heading = session.blocks()[0].id.clone();
    session.dispatch(&Mutation::MoveBlockUp { block_id: quote.clone() })?;
    session.dispatch(&Mutation::MergeWithPrevious { block_id: quote })?;
    assert_eq!(session.blocks().len(), 7, "quotes never merge");

    session.dispatch(&Mutation::FocusNextBlock { block_id: heading })?;
    assert!(session.is_dirty());

    let saved = session.save()?;
    assert_eq!(saved.len(), 7);
    assert!(matches!(saved[3], PersistedBlock::Blockquote { .. }));
    assert!(!session.is_dirty());
    Ok(())
}

#[test]
fn unsupported_content_cannot_be_opened() {
    let mut session = EditorSession::new();
    let err = session
        .hydrate_json(&read_fixture("unsupported-variant.json"))
        .unwrap_err();

    match &err {
        SessionError::Load(inner) => assert_eq!(inner.code, CodecErrorCode::UnsupportedVariant),
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(err.user_message(), "Content not found or failed to load.");
}

#[test]
fn edit_script_fixture_targets_loaded_ids() -> Result<()> {
    let mut session = EditorSession::with_ids(Box::new(SequentialIds::new("b")))
        .with_options(MutationOptions::strict());
    session.hydrate_json(&read_fixture("document.json"))?;

    let script: EditScript = serde_json::from_str(&read_fixture("edit-script.json"))?;
    for op in &script.ops {
        session.dispatch(op)?;
    }

    let ids: Vec<&str> = session.blocks().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["b8", "b1", "b2", "b3", "b4", "b5", "b6", "b7"]);
    assert_eq!(session.blocks()[0].plain_text(), "Added by script");
    assert_eq!(session.blocks()[2].block_type(), BlockType::Blockquote);
    Ok(())
}
