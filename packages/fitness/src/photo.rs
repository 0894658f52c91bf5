//! Photo handling for diary entries and avatars: picked image bytes, storage
//! paths and file extensions, JPEG re-encoding before upload.

use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("not a base64 data URI")]
    NotDataUri,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// An image chosen by the user, before upload.
#[derive(Clone, PartialEq)]
pub struct PickedPhoto {
    pub bytes: Vec<u8>,
    pub mime_type: Option<String>,
    /// Where the picker found it (file path or `data:` URI).
    pub uri: Option<String>,
}

impl std::fmt::Debug for PickedPhoto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickedPhoto")
            .field("bytes", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .field("uri", &self.uri)
            .finish()
    }
}

impl PickedPhoto {
    pub fn new(bytes: Vec<u8>, mime_type: Option<String>, uri: Option<String>) -> Self {
        Self {
            bytes,
            mime_type,
            uri,
        }
    }

    /// Build from a `data:<mime>;base64,<payload>` URI.
    pub fn from_data_uri(uri: &str) -> Result<Self, PhotoError> {
        let rest = uri.strip_prefix("data:").ok_or(PhotoError::NotDataUri)?;
        let (header, payload) = rest.split_once(',').ok_or(PhotoError::NotDataUri)?;
        let mime = header.strip_suffix(";base64").ok_or(PhotoError::NotDataUri)?;
        let bytes = general_purpose::STANDARD.decode(payload.trim())?;
        Ok(Self {
            bytes,
            mime_type: (!mime.is_empty()).then(|| mime.to_string()),
            uri: None,
        })
    }

    /// Build from a file on disk; the MIME type is guessed from the suffix.
    pub fn from_path(path: &std::path::Path, bytes: Vec<u8>) -> Self {
        let uri = path.to_string_lossy().into_owned();
        let mime_type = extension_from_uri(&uri).map(|ext| content_type(ext).to_string());
        Self {
            bytes,
            mime_type,
            uri: Some(uri),
        }
    }

    /// Inline `data:` URI for previewing the photo before it is uploaded.
    pub fn data_uri(&self) -> String {
        let mime = self.mime_type.as_deref().unwrap_or("image/jpeg");
        format!("data:{mime};base64,{}", general_purpose::STANDARD.encode(&self.bytes))
    }

    /// Extension for the avatar object: MIME type first, then the URI suffix.
    pub fn avatar_extension(&self) -> &'static str {
        if let Some(mime) = self.mime_type.as_deref() {
            return extension_for_mime(Some(mime));
        }
        self.uri
            .as_deref()
            .and_then(extension_from_uri)
            .unwrap_or("jpg")
    }
}

/// File extension for an image MIME type, `jpg` unless png, gif or webp.
pub fn extension_for_mime(mime: Option<&str>) -> &'static str {
    match mime.unwrap_or("image/jpeg") {
        m if m.contains("png") => "png",
        m if m.contains("gif") => "gif",
        m if m.contains("webp") => "webp",
        _ => "jpg",
    }
}

/// Known image extension at the end of a path or URL.
pub fn extension_from_uri(uri: &str) -> Option<&'static str> {
    let path = uri.split(['?', '#']).next().unwrap_or(uri);
    let (_, ext) = path.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "jpg" => Some("jpg"),
        "jpeg" => Some("jpeg"),
        "png" => Some("png"),
        "gif" => Some("gif"),
        "webp" => Some("webp"),
        _ => None,
    }
}

pub fn content_type(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "image/jpeg",
    }
}

/// `<user>/<millis>.<ext>` inside the diary photo bucket.
pub fn diary_photo_path(user_id: Uuid, millis: i64, ext: &str) -> String {
    format!("{user_id}/{millis}.{ext}")
}

/// `<user>/avatar.<ext>` inside the avatar bucket.
pub fn avatar_path(user_id: Uuid, ext: &str) -> String {
    format!("{user_id}/avatar.{ext}")
}

/// Storage path of a previously uploaded diary photo, given its public URL.
pub fn stored_photo_path(user_id: Uuid, public_url: &str) -> Option<String> {
    let path = public_url.split(['?', '#']).next()?;
    let file_name = path.rsplit('/').next().filter(|f| !f.is_empty())?;
    Some(format!("{user_id}/{file_name}"))
}

/// Bytes ready to upload.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub extension: &'static str,
}

/// Shrink to at most `max_width` pixels wide and re-encode as JPEG.
pub fn compress_jpeg(bytes: &[u8], max_width: u32, quality: u8) -> Result<Vec<u8>, PhotoError> {
    let img = image::load_from_memory(bytes)?;
    let img = if img.width() > max_width {
        img.resize(max_width, u32::MAX, FilterType::Triangle)
    } else {
        img
    };
    let rgb = img.to_rgb8();
    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100)).encode_image(&rgb)?;
    Ok(out.into_inner())
}

/// Compress a diary photo, keeping the original bytes when that fails.
pub fn prepare_diary_photo(photo: &PickedPhoto, max_width: u32, quality: u8) -> UploadImage {
    match compress_jpeg(&photo.bytes, max_width, quality) {
        Ok(bytes) => UploadImage {
            bytes,
            content_type: "image/jpeg",
            extension: "jpg",
        },
        Err(e) => {
            tracing::warn!("photo compression failed, uploading original: {e}");
            let extension = extension_for_mime(photo.mime_type.as_deref());
            UploadImage {
                bytes: photo.bytes.clone(),
                content_type: content_type(extension),
                extension,
            }
        }
    }
}
