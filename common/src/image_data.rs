//! 埋め込み可能な画像表現
//!
//! アップロードされたファイルのバイト列と MIME タイプを保持する。
//! セッション間で共有されるため `Arc` で持ち、複製は参照カウントのみ。
//! シリアライズ時は `data:<mime>;base64,<payload>` 形式の文字列になる。

use crate::error::{Error, Result};
use crate::upload::{is_image_mime, UploadFile};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::DynamicImage;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    mime: String,
    bytes: Arc<[u8]>,
}

impl EncodedImage {
    pub fn new(mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// アップロードファイルを読み込み、画像としてデコードできることを確認する
    pub fn read(file: &UploadFile) -> Result<Self> {
        if !is_image_mime(&file.mime) {
            return Err(Error::UnsupportedMime(file.mime.clone()));
        }
        let encoded = Self::new(file.mime.clone(), file.bytes.clone());
        let decoded = encoded.decode()?;
        log::debug!(
            "read {} ({}, {} bytes, {}x{})",
            file.name,
            file.mime,
            file.bytes.len(),
            decoded.width(),
            decoded.height()
        );
        Ok(encoded)
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn decode(&self) -> Result<DynamicImage> {
        Ok(image::load_from_memory(&self.bytes)?)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    pub fn from_data_url(url: &str) -> Result<Self> {
        let invalid = || Error::DataUrl(url.chars().take(64).collect());
        let rest = url.strip_prefix("data:").ok_or_else(invalid)?;
        let (meta, payload) = rest.split_once(',').ok_or_else(invalid)?;
        let mime = meta.strip_suffix(";base64").ok_or_else(invalid)?;
        let bytes = STANDARD.decode(payload).map_err(|_| invalid())?;
        Ok(Self::new(mime, bytes))
    }
}

impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Serialize for EncodedImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_url())
    }
}

impl<'de> Deserialize<'de> for EncodedImage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let url = String::deserialize(deserializer)?;
        Self::from_data_url(&url).map_err(serde::de::Error::custom)
    }
}
