//! Reads attachment files from disk for complaint creation.

use std::io;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};

use crate::domain::Attachment;

/// Load `path` as an attachment, naming it after the file.
///
/// The MIME type is declared for the types the create form suggests (images,
/// PDF, Word); anything else is sent without one.
///
/// # Errors
///
/// Returns an error when the path has no file name or cannot be read.
pub fn read_attachment(path: &Path) -> io::Result<Attachment> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("attachment path '{}' is not a file", path.display()),
        )
    })?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        io::Error::new(
            error.kind(),
            format!("open attachment directory '{}': {error}", parent.display()),
        )
    })?;
    let bytes = directory.read(file_name).map_err(|error| {
        io::Error::new(
            error.kind(),
            format!("read attachment '{}': {error}", path.display()),
        )
    })?;

    let attachment = Attachment::new(file_name.to_string_lossy().into_owned(), bytes);
    Ok(match content_type_for(path) {
        Some(content_type) => attachment.with_content_type(content_type),
        None => attachment,
    })
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let content_type = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => return None,
    };
    Some(content_type)
}
