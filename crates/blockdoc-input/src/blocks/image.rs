use blockdoc_core::{Block, BlockAttrs, BlockId, BlockKind, ImageAttrs};
use blockdoc_engine::{BlockUpdate, Mutation};

/// The image edit form: URL, alt text and caption.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageForm {
    pub src: String,
    pub alt: String,
    pub caption: String,
}

impl ImageForm {
    /// Prefill from an image block; other block types give an empty form.
    pub fn from_block(block: &Block) -> Self {
        match &block.kind {
            BlockKind::Image { attrs } => Self {
                src: attrs.src.clone().unwrap_or_default(),
                alt: attrs.alt.clone().unwrap_or_default(),
                caption: attrs.caption.clone().unwrap_or_default(),
            },
            _ => Self::default(),
        }
    }

    /// A block without a source opens straight into the form.
    pub fn starts_editing(block: &Block) -> bool {
        Self::from_block(block).src.is_empty()
    }

    /// Submit the form. Attrs are replaced, so title and dimensions are
    /// dropped.
    pub fn save(&self, block_id: &BlockId) -> Mutation {
        Mutation::UpdateBlock {
            block_id: block_id.clone(),
            update: BlockUpdate::attrs(BlockAttrs::Image(ImageAttrs {
                src: Some(self.src.clone()),
                alt: Some(self.alt.clone()),
                caption: Some(self.caption.clone()),
                ..ImageAttrs::default()
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_replaces_attrs_wholesale() {
        let block = Block::new(
            BlockId::new("i1"),
            BlockKind::Image {
                attrs: ImageAttrs {
                    src: Some("/old.png".into()),
                    title: Some("Old".into()),
                    width: Some(640.0),
                    ..ImageAttrs::default()
                },
            },
        );
        assert!(!ImageForm::starts_editing(&block));

        let mut form = ImageForm::from_block(&block);
        form.src = "/new.png".into();
        form.caption = "Fresh".into();

        let Mutation::UpdateBlock { update, .. } = form.save(&block.id) else {
            panic!("expected update_block");
        };
        assert_eq!(
            update.attrs,
            Some(BlockAttrs::Image(ImageAttrs {
                src: Some("/new.png".into()),
                alt: Some(String::new()),
                caption: Some("Fresh".into()),
                ..ImageAttrs::default()
            }))
        );
    }

    #[test]
    fn blank_image_opens_form() {
        let block = Block::new(
            BlockId::new("i2"),
            BlockKind::Image {
                attrs: ImageAttrs {
                    src: Some(String::new()),
                    ..ImageAttrs::default()
                },
            },
        );
        assert!(ImageForm::starts_editing(&block));
    }
}
