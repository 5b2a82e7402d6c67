//! Names derived from a document's display identifier.
//!
//! A display id is usually a path (`src/main/java/Test.java`), but it is only
//! a label. Composition needs three things from it:
//! - an image filename: `Test.png` (final segment, extension dropped)
//! - a display name for the hover label: `Test.java` (final segment)
//! - a relative `src` for the `<img>` tag: `images/Test.png`
//!
//! Documents without a display id get `image_<index>.png` and the `unnamed`
//! label.

use std::path::Path;

pub const IMAGES_DIR: &str = "images";
pub const IMAGE_EXTENSION: &str = "png";
pub const UNNAMED_PREFIX: &str = "image_";
pub const UNNAMED_DISPLAY_NAME: &str = "unnamed";

/// PNG filename for the entry at `index`.
///
/// Two entries whose ids share a final stem map to the same file; the later
/// write replaces the earlier one.
pub fn image_filename(display_id: Option<&str>, index: usize) -> String {
    let stem = display_id
        .and_then(|id| Path::new(id).file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("{UNNAMED_PREFIX}{index}"));
    format!("{stem}.{IMAGE_EXTENSION}")
}

/// Short label shown on hover: the last path segment.
pub fn display_name(display_id: Option<&str>) -> String {
    display_id
        .and_then(|id| Path::new(id).file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNNAMED_DISPLAY_NAME.to_string())
}

/// Relative URL of an image from the page, with URL-significant characters escaped.
pub fn image_href(filename: &str) -> String {
    let mut href = String::with_capacity(IMAGES_DIR.len() + 1 + filename.len());
    href.push_str(IMAGES_DIR);
    href.push('/');
    for c in filename.chars() {
        match c {
            '%' => href.push_str("%25"),
            '#' => href.push_str("%23"),
            '?' => href.push_str("%3F"),
            ' ' => href.push_str("%20"),
            _ => href.push(c),
        }
    }
    href
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_from_nested_path() {
        assert_eq!(image_filename(Some("src/main/java/Test.java"), 0), "Test.png");
    }

    #[test]
    fn filename_without_extension() {
        assert_eq!(image_filename(Some("bin/Makefile"), 3), "Makefile.png");
    }

    #[test]
    fn filename_keeps_special_characters() {
        assert_eq!(image_filename(Some("src/Test#1.java"), 0), "Test#1.png");
    }

    #[test]
    fn filename_only_strips_last_extension() {
        assert_eq!(image_filename(Some("web/app.test.ts"), 0), "app.test.png");
    }

    #[test]
    fn unnamed_uses_index() {
        assert_eq!(image_filename(None, 0), "image_0.png");
        assert_eq!(image_filename(None, 12), "image_12.png");
    }

    #[test]
    fn empty_id_falls_back_to_index() {
        assert_eq!(image_filename(Some(""), 4), "image_4.png");
    }

    #[test]
    fn display_name_is_last_segment() {
        assert_eq!(display_name(Some("src/main/java/Test.java")), "Test.java");
        assert_eq!(display_name(Some("README")), "README");
    }

    #[test]
    fn display_name_placeholder() {
        assert_eq!(display_name(None), "unnamed");
    }

    #[test]
    fn href_escapes_fragment_and_query() {
        assert_eq!(image_href("Test.png"), "images/Test.png");
        assert_eq!(image_href("Test#1.png"), "images/Test%231.png");
        assert_eq!(image_href("a b?.png"), "images/a%20b%3F.png");
        assert_eq!(image_href("100%.png"), "images/100%25.png");
    }
}
