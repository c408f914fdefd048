use super::*;

const MB: u64 = 1024 * 1024;

#[test]
fn accepts_supported_types_under_limit() {
    for mime in ALLOWED_MIME_TYPES {
        assert!(validate("bill", mime, 2 * MB).is_ok(), "{mime}");
    }
    assert!(validate("bill.pdf", "application/pdf", MAX_FILE_BYTES - 1).is_ok());
}

#[test]
fn rejects_other_types_with_reason() {
    let err = validate("bill.docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document", MB).unwrap_err();
    assert_eq!(err.to_string(), "Please upload a PDF, JPEG, or PNG file");
    assert!(validate("bill.gif", "image/gif", MB).is_err());
    assert!(validate("bill", "", MB).is_err());
}

#[test]
fn rejects_ten_megabytes_and_above() {
    let err = validate("scan.png", "image/png", MAX_FILE_BYTES).unwrap_err();
    assert_eq!(err, FileError::TooLarge(MAX_FILE_BYTES));
    assert_eq!(err.to_string(), "File size must be less than 10MB");
}

#[test]
fn type_is_checked_before_size() {
    assert!(matches!(validate("x.zip", "application/zip", 50 * MB), Err(FileError::UnsupportedType(_))));
}

#[test]
fn format_follows_mime() {
    assert_eq!(validate("a.pdf", "application/pdf", 1).unwrap().format, FileFormat::Pdf);
    assert_eq!(validate("a.jpg", "image/jpg", 1).unwrap().format.as_str(), "image");
    assert_eq!(FileFormat::from_mime("text/plain"), FileFormat::Unknown);
}

#[test]
fn doc_id_layout() {
    assert_eq!(doc_id(1_700_000_000_000, "k3j9x0a1b"), "doc_1700000000000_k3j9x0a1b");
    let generated = generate_doc_id();
    let parts: Vec<&str> = generated.split('_').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "doc");
    assert!(parts[1].parse::<u64>().is_ok());
    assert_eq!(parts[2].len(), 9);
    assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
}

#[test]
fn base36_suffix_pads_and_truncates() {
    assert_eq!(base36_suffix(0, 4), "0000");
    assert_eq!(base36_suffix(35, 2), "0z");
    assert_eq!(base36_suffix(36 * 36 + 1, 2), "01");
}

#[test]
fn file_sizes_are_human_readable() {
    assert_eq!(format_file_size(0), "0 Bytes");
    assert_eq!(format_file_size(512), "512 Bytes");
    assert_eq!(format_file_size(1024), "1 KB");
    assert_eq!(format_file_size(1536), "1.5 KB");
    assert_eq!(format_file_size(2_359_296), "2.25 MB");
    assert_eq!(format_file_size(3 * 1024 * MB), "3 GB");
}

#[test]
fn base64_has_no_prefix() {
    assert_eq!(encode_base64(b"%PDF-1.7"), "JVBERi0xLjc=");
}
