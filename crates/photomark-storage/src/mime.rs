//! Content-type inference from object key suffixes.
//!
//! Used as a fallback when the underlying store does not record a
//! content-type (local filesystem, or S3 objects written without one).

pub(crate) fn infer(key: &str) -> &'static str {
    match key.rsplit('.').next() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer() {
        assert_eq!(infer("a/b/photo.jpg"), "image/jpeg");
        assert_eq!(infer("photo.jpeg"), "image/jpeg");
        assert_eq!(infer("icon.png"), "image/png");
        assert_eq!(infer("notes.txt"), "application/octet-stream");
        assert_eq!(infer("no-extension"), "application/octet-stream");
    }
}
