//! Shareable links, share text and URI component encoding

use crate::model::{format_number, AnalysisResult};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const SHARED_FRAGMENT: &str = "#shared-analysis";
const LINKEDIN_SHARE_URL: &str = "https://www.linkedin.com/sharing/share-offsite/?url=";

/// Summary carried by a shareable link. The link never carries the full
/// analysis, so this is only used for a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedAnalysis {
    pub score: String,
    pub skills: String,
    pub file_name: String,
}

impl SharedAnalysis {
    pub fn toast_message(&self) -> String {
        format!(
            "Viewing shared analysis for {}: {}% ATS score",
            self.file_name, self.score
        )
    }
}

/// `<origin>/#shared-analysis?score=<n>&skills=<n>&fileName=<encoded>`
pub fn build_shareable_link(origin: &str, result: &AnalysisResult, file_name: &str) -> String {
    format!(
        "{}/{}?score={}&skills={}&fileName={}",
        origin.trim_end_matches('/'),
        SHARED_FRAGMENT,
        format_number(result.ats_score.total_score),
        result.analysis_summary.total_skills,
        encode_uri_component(file_name)
    )
}

/// Read a shareable link back. Returns `None` unless the fragment is a
/// shared-analysis fragment carrying a score, a skill count and a file name.
pub fn parse_shared_link(url: &str) -> Option<SharedAnalysis> {
    let (_, fragment) = url.split_once('#')?;
    let fragment = format!("#{}", fragment);
    if !fragment.contains(SHARED_FRAGMENT) {
        return None;
    }

    let query = fragment.split('?').nth(1).unwrap_or("");
    let mut score = None;
    let mut skills = None;
    let mut file_name = None;

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = decode_query_value(value);
        // First occurrence wins
        let slot = match key {
            "score" => &mut score,
            "skills" => &mut skills,
            "fileName" => &mut file_name,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    let nonempty = |v: Option<String>| v.filter(|s| !s.is_empty());
    Some(SharedAnalysis {
        score: nonempty(score)?,
        skills: nonempty(skills)?,
        file_name: nonempty(file_name)?,
    })
}

pub fn share_title(file_name: &str) -> String {
    format!("Resume Analysis Results - {}", file_name)
}

pub fn share_text(result: &AnalysisResult) -> String {
    format!(
        "Check out this resume analysis: {}% ATS score with {} skills identified.",
        format_number(result.ats_score.total_score),
        result.analysis_summary.total_skills
    )
}

pub fn linkedin_share_url(shareable_link: &str) -> String {
    format!("{}{}", LINKEDIN_SHARE_URL, encode_uri_component(shareable_link))
}

/// Characters `encodeURIComponent` leaves alone besides ASCII alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`,
/// operating on UTF-8 bytes.
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Inverse of `encode_uri_component`. Malformed escapes are kept literally
/// and invalid UTF-8 is replaced.
pub fn decode_uri_component(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

fn decode_query_value(value: &str) -> String {
    decode_uri_component(&value.replace('+', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: f64, skills: u32) -> AnalysisResult {
        let mut result = AnalysisResult::placeholder();
        result.ats_score.total_score = score;
        result.analysis_summary.total_skills = skills;
        result
    }

    #[test]
    fn test_encode_matches_uri_component_rules() {
        assert_eq!(encode_uri_component("my cv (final).pdf"), "my%20cv%20(final).pdf");
        assert_eq!(encode_uri_component("a&b=c/d?"), "a%26b%3Dc%2Fd%3F");
        assert_eq!(encode_uri_component("résumé"), "r%C3%A9sum%C3%A9");
        assert_eq!(encode_uri_component("it's~*!"), "it's~*!");
    }

    #[test]
    fn test_decode_reverses_encode() {
        let original = "Jane Doe – CV & notes 100%.docx";
        assert_eq!(decode_uri_component(&encode_uri_component(original)), original);
        assert_eq!(decode_uri_component("50%"), "50%");
        assert_eq!(decode_uri_component("%zz"), "%zz");
    }

    #[test]
    fn test_reserved_characters_are_escaped() {
        assert_eq!(encode_uri_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(
            encode_uri_component("#$&+,/:;=?@[]"),
            "%23%24%26%2B%2C%2F%3A%3B%3D%3F%40%5B%5D"
        );
        assert_eq!(decode_query_value("my+cv%2B1.pdf"), "my cv+1.pdf");
    }

    #[test]
    fn test_build_shareable_link() {
        let link = build_shareable_link("http://localhost:3000/", &result(82.0, 14), "my cv.pdf");
        assert_eq!(
            link,
            "http://localhost:3000/#shared-analysis?score=82&skills=14&fileName=my%20cv.pdf"
        );
    }

    #[test]
    fn test_parse_shared_link_round_trip() {
        let link = build_shareable_link("https://app.test", &result(91.5, 3), "résumé & co.pdf");
        let shared = parse_shared_link(&link).unwrap();
        assert_eq!(shared.score, "91.5");
        assert_eq!(shared.skills, "3");
        assert_eq!(shared.file_name, "résumé & co.pdf");
        assert_eq!(
            shared.toast_message(),
            "Viewing shared analysis for résumé & co.pdf: 91.5% ATS score"
        );
    }

    #[test]
    fn test_parse_rejects_incomplete_links() {
        assert!(parse_shared_link("https://app.test/").is_none());
        assert!(parse_shared_link("https://app.test/#other?score=1&skills=2&fileName=a").is_none());
        assert!(parse_shared_link("https://app.test/#shared-analysis?score=1&skills=2").is_none());
        assert!(parse_shared_link("https://app.test/#shared-analysis?score=&skills=2&fileName=a").is_none());
    }

    #[test]
    fn test_share_text_and_linkedin() {
        let r = result(82.0, 14);
        assert_eq!(
            share_text(&r),
            "Check out this resume analysis: 82% ATS score with 14 skills identified."
        );
        assert_eq!(
            linkedin_share_url("http://h/#shared-analysis?score=1"),
            "https://www.linkedin.com/sharing/share-offsite/?url=http%3A%2F%2Fh%2F%23shared-analysis%3Fscore%3D1"
        );
    }
}
