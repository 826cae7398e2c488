//! Client-side checks applied to files before they are uploaded.

/// Extensions the service accepts for uploads (compared case-insensitively)
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Check whether a file name ends in an allowed image extension.
///
/// A plain case-insensitive suffix match on `.jpg`, `.jpeg` or `.png`:
/// `photo.png.txt` is rejected, while `archive.tar.PNG` and a bare `.png` are
/// accepted.
pub fn is_allowed_image(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    ALLOWED_IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.strip_suffix(ext).is_some_and(|rest| rest.ends_with('.')))
}

/// MIME type sent with the multipart part for an allowed image name
pub fn image_mime_type(file_name: &str) -> &'static str {
    if file_name.to_ascii_lowercase().ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    }
}
