use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::types::TopicSegment;

static TIME_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*-\s*(\d+(?:\.\d+)?)").expect("valid pattern"));

/// Parse a topic listing into time-bounded segments, one topic per line.
///
/// Lines without a `start - end` pair are skipped with a warning. Output
/// preserves line order; no sorting, dedup, or overlap correction is done.
pub fn parse_topics(topics_text: &str) -> Vec<TopicSegment> {
    let mut segments = Vec::new();

    for line in topics_text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some(caps) = TIME_RANGE.captures(line) else {
            warn!("no time range in topic line: {line}");
            continue;
        };
        let (Ok(start), Ok(end)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) else {
            warn!("invalid timestamp format: {line}");
            continue;
        };
        if start >= end {
            warn!("empty time range in topic line: {line}");
            continue;
        }
        segments.push(TopicSegment { start, end });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_matching_lines_in_order() {
        let text = "- Introduction: 0.0 - 30.5\n- Main Discussion: 30.5 - 120.0\n- Conclusion: 120.0 - 150.0";
        let segments = parse_topics(text);
        assert_eq!(
            segments,
            vec![
                TopicSegment { start: 0.0, end: 30.5 },
                TopicSegment { start: 30.5, end: 120.0 },
                TopicSegment { start: 120.0, end: 150.0 },
            ]
        );
    }

    #[test]
    fn accepts_integers_and_mixed_spacing() {
        let segments = parse_topics("Intro: 0 - 10\nBody: 10-40.5");
        assert_eq!(
            segments,
            vec![
                TopicSegment { start: 0.0, end: 10.0 },
                TopicSegment { start: 10.0, end: 40.5 },
            ]
        );
    }

    #[test]
    fn skips_lines_without_a_pair() {
        let text = "Some prose without numbers\n- Body: 10.0 - 40.0\nAnother stray line";
        let segments = parse_topics(text);
        assert_eq!(segments, vec![TopicSegment { start: 10.0, end: 40.0 }]);
    }

    #[test]
    fn skips_inverted_and_empty_ranges() {
        let segments = parse_topics("- A: 40.0 - 10.0\n- B: 5.0 - 5.0\n- C: 50.0 - 60.0");
        assert_eq!(segments, vec![TopicSegment { start: 50.0, end: 60.0 }]);
    }

    #[test]
    fn malformed_line_does_not_disturb_neighbors() {
        let segments = parse_topics("- A: 0.0 - 10.0\n- garbage -\n- B: 10.0 - 20.0");
        assert_eq!(
            segments,
            vec![
                TopicSegment { start: 0.0, end: 10.0 },
                TopicSegment { start: 10.0, end: 20.0 },
            ]
        );
    }

    #[test]
    fn empty_input_yields_no_segments() {
        assert!(parse_topics("").is_empty());
        assert!(parse_topics("no timestamps anywhere").is_empty());
    }
}
