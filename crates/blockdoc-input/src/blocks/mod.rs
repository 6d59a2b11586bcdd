//! Input contracts of blocks that manage their own form fields instead of
//! the per-character text contract.

pub mod code;
pub mod image;
pub mod list;

pub use code::{edit_code_field, handle_code_block_key, CodeField, CODE_LANGUAGES};
pub use image::ImageForm;
pub use list::{add_list_item, edit_list_item, handle_list_item_key, list_items, remove_list_item};
