//! Photo Studio Common Library
//!
//! CLI・デスクトップ・Web(WASM)で共有される編集コア

pub mod catalog;
pub mod editor;
pub mod error;
pub mod export;
pub mod expression;
pub mod filter;
pub mod image_data;
pub mod preview;
pub mod prompt;
pub mod render;
pub mod session;
pub mod upload;

pub use catalog::{FilterEntry, TransformationPanel, FILTER_CATALOG, PROCESSING_FLASH_MS};
pub use editor::PhotoEditor;
pub use error::{Error, Result};
pub use export::{download_file_name, Download};
pub use expression::{FilterExpression, FilterOp};
pub use filter::{filter_style, filter_style_for_id, FilterType};
pub use image_data::EncodedImage;
pub use preview::{CompareToggle, ImagePreview, PointerEvent};
pub use prompt::{DisabledBackend, PromptInput, TransformBackend, TransformOutcome, SUGGESTIONS};
pub use render::RenderSurface;
pub use session::{Phase, Session};
pub use upload::{ImageUploader, UploadFile};
