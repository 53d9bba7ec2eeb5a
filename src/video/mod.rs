use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::SummarizerError;

/// Canonical 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Resolve a video ID from a URL or a bare identifier.
    ///
    /// Accepted URL forms: `youtube.com/watch?v=ID`, `youtu.be/ID`,
    /// `youtube.com/embed/ID`, `youtube.com/v/ID`, `youtube.com/shorts/ID`,
    /// with or without `www.`/`m.` prefixes. Extra query parameters and
    /// fragments are ignored.
    pub fn parse(input: &str) -> Result<Self, SummarizerError> {
        let input = input.trim();

        if is_bare_id(input) {
            return Ok(Self(input.to_string()));
        }

        extract_from_url(input)
            .filter(|candidate| is_bare_id(candidate))
            .map(Self)
            .ok_or_else(|| SummarizerError::InvalidVideoId(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VideoId {
    type Err = SummarizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Check for a bare 11-character video ID.
fn is_bare_id(input: &str) -> bool {
    input.len() == 11
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Pull the ID candidate out of a YouTube URL, if the input is one.
fn extract_from_url(input: &str) -> Option<String> {
    // Tolerate URLs pasted without a scheme
    let normalized = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&normalized).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    let host = url.host_str()?.trim_start_matches("www.");

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    match host {
        "youtu.be" => segments.next().map(str::to_string),
        "youtube.com" | "m.youtube.com" | "music.youtube.com" => {
            match segments.next() {
                Some("watch") => url
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned()),
                Some("embed") | Some("v") | Some("shorts") | Some("live") => {
                    segments.next().map(str::to_string)
                }
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_watch_url() {
        let id = VideoId::parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_parse_watch_url_with_extra_params() {
        let id = VideoId::parse("https://youtube.com/watch?t=42&v=dQw4w9WgXcQ&list=PL123").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_parse_short_url() {
        let id = VideoId::parse("https://youtu.be/dQw4w9WgXcQ?t=30").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_parse_embed_and_v_urls() {
        assert_eq!(
            VideoId::parse("https://www.youtube.com/embed/dQw4w9WgXcQ")
                .unwrap()
                .as_str(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            VideoId::parse("https://youtube.com/v/dQw4w9WgXcQ")
                .unwrap()
                .as_str(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_parse_shorts_url() {
        let id = VideoId::parse("https://www.youtube.com/shorts/dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_parse_mobile_url() {
        let id = VideoId::parse("https://m.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_parse_url_without_scheme() {
        let id = VideoId::parse("youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_parse_bare_id() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_reject_invalid_input() {
        assert!(VideoId::parse("not a video").is_err());
        assert!(VideoId::parse("https://vimeo.com/12345").is_err());
        assert!(VideoId::parse("https://youtube.com/watch?list=PL123").is_err());
        assert!(VideoId::parse("tooshort").is_err());
        assert!(VideoId::parse("").is_err());
    }

    #[test]
    fn test_reject_malformed_id_in_url() {
        // ID-like path segment with the wrong length
        assert!(VideoId::parse("https://youtu.be/abc").is_err());
    }

    #[test]
    fn test_watch_url() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        assert_eq!(id.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }
}
