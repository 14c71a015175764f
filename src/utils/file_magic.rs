/// 验证文件内容的魔术字节是否与扩展名匹配
///
/// # Arguments
/// * `data` - 文件内容的前几个字节
/// * `extension` - 文件扩展名（不含点号，如 "png"）
///
/// # Returns
/// * `true` - 魔术字节与扩展名一致
/// * `false` - 不一致，或者是不支持的类型
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_ascii_lowercase().as_str() {
        "png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        "jpg" | "jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        "gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        "webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",
        "pdf" => data.starts_with(b"%PDF"),
        _ => false,
    }
}

/// 根据扩展名推断 Content-Type，用于本地文件的访问
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, "png"));
        assert!(validate_magic_bytes(&png_header, "PNG"));
        assert!(!validate_magic_bytes(&png_header, "jpg"));
    }

    #[test]
    fn test_jpeg_magic() {
        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0];
        assert!(validate_magic_bytes(&jpeg_header, "jpg"));
        assert!(validate_magic_bytes(&jpeg_header, "jpeg"));
        assert!(!validate_magic_bytes(&jpeg_header, "png"));
    }

    #[test]
    fn test_pdf_magic() {
        assert!(validate_magic_bytes(b"%PDF-1.4", "pdf"));
        assert!(!validate_magic_bytes(b"%PDF-1.4", "gif"));
    }

    #[test]
    fn test_renamed_text_file_rejected() {
        assert!(!validate_magic_bytes(b"just some text", "png"));
        assert!(!validate_magic_bytes(&[], "png"));
    }

    #[test]
    fn test_unknown_extension() {
        let data = [0x4D, 0x5A, 0x90, 0x00];
        assert!(!validate_magic_bytes(&data, "exe"));
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type_for_extension("PDF"), "application/pdf");
        assert_eq!(content_type_for_extension("jpeg"), "image/jpeg");
        assert_eq!(content_type_for_extension("bin"), "application/octet-stream");
    }
}
