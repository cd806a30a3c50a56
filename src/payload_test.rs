use super::*;

fn sheet(name: &str) -> SourceFile {
    SourceFile::metadata_only(name, "", 10)
}

#[test]
fn new_payload_is_empty() {
    let payload = SubmissionPayload::new("file");
    assert!(payload.is_empty());
    assert_eq!(payload.field(), "file");
    assert_eq!(payload.file(), None);
}

#[test]
fn stage_replaces_previous_file() {
    let mut payload = SubmissionPayload::new("file");
    payload.stage(sheet("a.xlsx"));
    payload.stage(sheet("b.xlsx"));
    assert_eq!(payload.file().map(|f| f.name.as_str()), Some("b.xlsx"));
}

#[test]
fn clear_empties_and_is_idempotent() {
    let mut payload = SubmissionPayload::new("file");
    payload.stage(sheet("a.xlsx"));
    payload.clear();
    assert!(payload.is_empty());
    payload.clear();
    assert!(payload.is_empty());
}

#[test]
fn take_returns_field_and_file() {
    let mut payload = SubmissionPayload::new("avatar");
    payload.stage(sheet("me.png"));
    let (field, file) = payload.take().unwrap();
    assert_eq!(field, "avatar");
    assert_eq!(file.name, "me.png");
    assert!(payload.is_empty());
    assert!(payload.take().is_none());
}
