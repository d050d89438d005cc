//! Video link helpers

use regex::Regex;

/// Pull the video id out of a watch, short or embed link.
pub fn extract_video_id(link: &str) -> Option<String> {
    let re = Regex::new(r"(?:v=|be/|embed/)([\w-]+)").ok()?;
    re.captures(link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_common_link_forms() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/a-b_c").as_deref(),
            Some("a-b_c")
        );
    }

    #[test]
    fn rejects_links_without_id() {
        assert_eq!(extract_video_id("https://example.com/about"), None);
        assert_eq!(extract_video_id(""), None);
    }
}
