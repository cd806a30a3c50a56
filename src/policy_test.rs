use super::*;

fn doc(name: &str, size: u64) -> SourceFile {
    SourceFile::metadata_only(name, "application/vnd.ms-excel", size)
}

// =============================================================
// DocumentPolicy
// =============================================================

#[test]
fn spreadsheet_defaults() {
    let policy = DocumentPolicy::spreadsheet();
    assert_eq!(policy.allowed_extensions(), [".xls", ".xlsx"]);
    assert_eq!(policy.max_bytes(), 5 * 1024 * 1024);
}

#[test]
fn accepts_allowed_extension_within_limit() {
    let policy = DocumentPolicy::spreadsheet();
    assert_eq!(policy.evaluate(&doc("budget.xlsx", 3 * 1024 * 1024)), Verdict::Accept { preview: false });
    assert_eq!(policy.evaluate(&doc("legacy.xls", 10)), Verdict::Accept { preview: false });
}

#[test]
fn extension_match_is_case_insensitive() {
    let policy = DocumentPolicy::spreadsheet();
    assert_eq!(policy.evaluate(&doc("BUDGET.XLSX", 10)), Verdict::Accept { preview: false });
    assert_eq!(policy.evaluate(&doc("Mixed.XlS", 10)), Verdict::Accept { preview: false });
}

#[test]
fn rejects_other_extensions() {
    let policy = DocumentPolicy::spreadsheet();
    for name in ["notes.txt", "budget.xlsx.pdf", "sheet.csv", "noext"] {
        match policy.evaluate(&doc(name, 10)) {
            Verdict::Reject(IntakeError::UnsupportedFormat { allowed, .. }) => {
                assert_eq!(allowed, vec![".xls".to_owned(), ".xlsx".to_owned()]);
            }
            other => panic!("{name}: expected UnsupportedFormat, got {other:?}"),
        }
    }
}

#[test]
fn unsupported_format_reports_found_extension() {
    let policy = DocumentPolicy::spreadsheet();
    let Verdict::Reject(IntakeError::UnsupportedFormat { found, .. }) = policy.evaluate(&doc("photo.PNG", 10)) else {
        panic!("expected rejection");
    };
    assert_eq!(found.as_deref(), Some(".png"));
}

#[test]
fn format_is_checked_before_size() {
    let policy = DocumentPolicy::spreadsheet();
    let verdict = policy.evaluate(&doc("huge.pdf", 100 * 1024 * 1024));
    assert!(matches!(verdict, Verdict::Reject(IntakeError::UnsupportedFormat { .. })));
}

#[test]
fn limit_is_inclusive() {
    let policy = DocumentPolicy::spreadsheet();
    assert_eq!(policy.evaluate(&doc("edge.xlsx", 5 * 1024 * 1024)), Verdict::Accept { preview: false });
    assert_eq!(
        policy.evaluate(&doc("edge.xlsx", 5 * 1024 * 1024 + 1)),
        Verdict::Reject(IntakeError::SizeExceeded { limit: 5 * 1024 * 1024, actual: 5 * 1024 * 1024 + 1 })
    );
}

#[test]
fn custom_extensions_are_normalized() {
    let policy = DocumentPolicy::new(["CSV", ".Tsv", "  ", ""], 100);
    assert_eq!(policy.allowed_extensions(), [".csv", ".tsv"]);
    assert_eq!(policy.evaluate(&doc("data.csv", 100)), Verdict::Accept { preview: false });
}

// =============================================================
// ImagePolicy
// =============================================================

#[test]
fn image_accepts_any_image_mime_with_preview() {
    let policy = ImagePolicy::new();
    for mime in ["image/png", "image/jpeg", "image/webp", "image/svg+xml"] {
        let file = SourceFile::metadata_only("whatever.bin", mime, 10);
        assert_eq!(policy.evaluate(&file), Verdict::Accept { preview: true });
    }
}

#[test]
fn image_ignores_non_images_silently() {
    let policy = ImagePolicy::new();
    for mime in ["application/pdf", "text/plain", "", "video/mp4"] {
        let file = SourceFile::metadata_only("avatar.png", mime, 10);
        assert_eq!(policy.evaluate(&file), Verdict::Ignore);
    }
}

#[test]
fn image_has_no_size_limit_by_default() {
    let file = SourceFile::metadata_only("huge.png", "image/png", 50 * 1024 * 1024);
    assert_eq!(ImagePolicy::new().evaluate(&file), Verdict::Accept { preview: true });
}

#[test]
fn image_size_limit_is_opt_in() {
    let policy = ImagePolicy::new().with_max_bytes(DEFAULT_MAX_BYTES);
    let file = SourceFile::metadata_only("huge.png", "image/png", DEFAULT_MAX_BYTES + 1);
    assert!(matches!(policy.evaluate(&file), Verdict::Reject(IntakeError::SizeExceeded { .. })));
}

// =============================================================
// normalize_extension
// =============================================================

#[test]
fn normalize_extension_cases() {
    assert_eq!(normalize_extension("XLSX").as_deref(), Some(".xlsx"));
    assert_eq!(normalize_extension(" .Xls ").as_deref(), Some(".xls"));
    assert_eq!(normalize_extension("."), None);
    assert_eq!(normalize_extension(""), None);
}
