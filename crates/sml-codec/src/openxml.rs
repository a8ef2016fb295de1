//! Namespace URIs and small QName helpers shared by the codec.

pub const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
pub const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const NS_SHARED_TYPES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/sharedTypes";
pub const NS_SPREADSHEET_DRAWING: &str =
    "http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing";

/// `prefix:local`, or just `local` for an empty prefix.
pub fn prefixed_tag(prefix: &str, local: &str) -> String {
    if prefix.is_empty() {
        local.to_string()
    } else {
        format!("{prefix}:{local}")
    }
}

/// `xmlns` or `xmlns:prefix`.
pub fn xmlns_attribute(prefix: &str) -> String {
    if prefix.is_empty() {
        "xmlns".to_string()
    } else {
        format!("xmlns:{prefix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_tags_and_declarations() {
        assert_eq!(prefixed_tag("", "location"), "location");
        assert_eq!(prefixed_tag("x", "location"), "x:location");
        assert_eq!(xmlns_attribute(""), "xmlns");
        assert_eq!(xmlns_attribute("r"), "xmlns:r");
    }
}
