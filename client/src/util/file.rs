//! Bill file validation and encoding for the upload flow.

#[cfg(test)]
#[path = "file_test.rs"]
mod file_test;

use base64::Engine;

/// Files at or above this size are rejected.
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

pub const ALLOWED_MIME_TYPES: &[&str] = &["application/pdf", "image/jpeg", "image/png", "image/jpg"];

/// `accept` attribute for the file input.
pub const ACCEPT_ATTR: &str = ".pdf,.jpg,.jpeg,.png";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileError {
    #[error("Please upload a PDF, JPEG, or PNG file")]
    UnsupportedType(String),
    #[error("File size must be less than 10MB")]
    TooLarge(u64),
    #[error("Could not read the selected file: {0}")]
    Read(String),
}

/// Format tag sent as `file_format`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Pdf,
    Image,
    Unknown,
}

impl FileFormat {
    #[must_use]
    pub fn from_mime(mime: &str) -> Self {
        if mime == "application/pdf" {
            Self::Pdf
        } else if mime.starts_with("image/") {
            Self::Image
        } else {
            Self::Unknown
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Unknown => "unknown",
        }
    }
}

/// Metadata of an accepted file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub format: FileFormat,
}

/// Check type, then size.
///
/// # Errors
///
/// [`FileError::UnsupportedType`] or [`FileError::TooLarge`].
pub fn validate(name: &str, mime: &str, size: u64) -> Result<SelectedFile, FileError> {
    if !ALLOWED_MIME_TYPES.contains(&mime) {
        return Err(FileError::UnsupportedType(mime.to_owned()));
    }
    if size >= MAX_FILE_BYTES {
        return Err(FileError::TooLarge(size));
    }
    Ok(SelectedFile {
        name: name.to_owned(),
        mime: mime.to_owned(),
        size,
        format: FileFormat::from_mime(mime),
    })
}

/// `doc_<epoch-ms>_<suffix>`.
#[must_use]
pub fn doc_id(now_ms: u64, suffix: &str) -> String {
    format!("doc_{now_ms}_{suffix}")
}

/// Fresh document id with a random 9-character base-36 suffix.
#[must_use]
pub fn generate_doc_id() -> String {
    doc_id(super::storage::now_ms(), &base36_suffix(uuid::Uuid::new_v4().as_u128(), 9))
}

/// Lowest `len` base-36 digits of `value`, zero-padded.
#[must_use]
pub fn base36_suffix(mut value: u128, len: usize) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = vec![b'0'; len];
    for slot in out.iter_mut().rev() {
        *slot = DIGITS[(value % 36) as usize];
        value /= 36;
    }
    String::from_utf8(out).unwrap_or_default()
}

/// Human-readable size: `0 Bytes`, `512 Bytes`, `1.5 KB`, `2.25 MB`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }
    let mut unit = 0;
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

/// Standard base64 without a data-URL prefix.
#[must_use]
pub fn encode_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Read a browser `File` and return its base64 content.
///
/// # Errors
///
/// [`FileError::Read`] when the browser refuses to hand over the bytes.
#[cfg(feature = "hydrate")]
pub async fn read_base64(file: &web_sys::File) -> Result<String, FileError> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| FileError::Read(format!("{e:?}")))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(encode_base64(&bytes))
}
