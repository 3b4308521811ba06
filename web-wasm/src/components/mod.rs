pub mod header;
pub mod image_preview;
pub mod image_uploader;
pub mod prompt_input;
pub mod transformation_panel;
