#![no_main]

use libfuzzer_sys::fuzz_target;
use mythoras_layout::{LAYOUT_DOCUMENT_SCHEMA_VERSION, LayoutDocument, validate_panels};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(migrated) = LayoutDocument::from_json_str(raw) else {
        return;
    };

    // Anything accepted is current and valid, and survives a re-encode.
    let document = migrated.document;
    assert_eq!(document.schema_version, LAYOUT_DOCUMENT_SCHEMA_VERSION);
    for name in document.names() {
        let panels = document.get(name).unwrap_or_default();
        assert!(validate_panels(name, panels).is_ok());
    }
    let encoded = document.to_json_string().expect("valid document encodes");
    let reparsed = LayoutDocument::from_json_str(&encoded).expect("encoded document reloads");
    assert_eq!(reparsed.document, document);
    assert!(reparsed.warnings.is_empty());
});
