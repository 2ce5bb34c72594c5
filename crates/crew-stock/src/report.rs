//! Pull the trend call and fear/greed scores out of a finished newsletter

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

// "trend ... up", "prediction: sideways", "outlook is downward"
static TREND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:trend|prediction|outlook|direction)\b[^.\n]{0,80}?\b(upward|downward|up|down|sideways)\b",
    )
    .expect("Invalid trend regex")
});

// "fear/greed score: 72"; a scale hint such as "(0-100)" is skipped
static SCORE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)fear\s*/\s*greed(?:\s+score)?(?:\(\s*\d{1,3}\s*(?:-|–|to)\s*\d{1,3}\s*\)|[^0-9\n]){0,40}?(\d{1,3})\b",
    )
    .expect("Invalid score regex")
});

static ASSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z]{2,6}(?:[.-][A-Z]{1,4})?)\b").expect("Invalid asset regex")
});

/// Direction of a trend call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Sideways,
}

impl Trend {
    fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "up" | "upward" => Some(Self::Up),
            "down" | "downward" => Some(Self::Down),
            "sideways" => Some(Self::Sideways),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Sideways => "sideways",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fear/greed score, 0 extreme fear to 100 extreme greed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetScore {
    /// Ticker-like token found on the same line, if any
    pub asset: Option<String>,
    pub score: u8,
}

/// What could be read from a newsletter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportHighlights {
    /// The last trend call in the text, which is the concluding prediction
    pub trend: Option<Trend>,
    pub scores: Vec<AssetScore>,
}

/// Best-effort extraction; missing pieces are left empty
pub fn extract(markdown: &str) -> ReportHighlights {
    let trend = TREND_REGEX
        .captures_iter(markdown)
        .filter_map(|caps| Trend::from_word(&caps[1]))
        .last();

    let scores = markdown
        .lines()
        .flat_map(|line| {
            SCORE_REGEX.captures_iter(line).filter_map(move |caps| {
                let score: u8 = caps[1].parse().ok().filter(|s| *s <= 100)?;
                let asset = ASSET_REGEX
                    .captures_iter(line)
                    .map(|c| c[1].to_string())
                    .find(|token| !matches!(token.as_str(), "FEAR" | "GREED" | "SCORE"));
                Some(AssetScore { asset, score })
            })
        })
        .collect();

    ReportHighlights { trend, scores }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEWSLETTER: &str = "\
# AAPL Weekly

- Price trend over the year: up
- AAPL fear/greed score: 72
- BTC fear/greed score: 55

## Introduction
Apple keeps setting up new highs.

## Main part
**AAPL** - Strong earnings. Fear/Greed Score: 72
**BTC** - Calm week. Fear/Greed Score: 55

## Summary
Our concrete prediction for the near future is sideways.
";

    #[test]
    fn test_extract_newsletter() {
        let highlights = extract(NEWSLETTER);
        assert_eq!(highlights.trend, Some(Trend::Sideways));
        assert_eq!(highlights.scores.len(), 4);
        assert_eq!(highlights.scores[0].asset.as_deref(), Some("AAPL"));
        assert_eq!(highlights.scores[0].score, 72);
        assert_eq!(highlights.scores[3].asset.as_deref(), Some("BTC"));
        assert_eq!(highlights.scores[3].score, 55);
    }

    #[test]
    fn test_out_of_range_score_ignored() {
        let highlights = extract("TSLA fear/greed score: 250");
        assert!(highlights.scores.is_empty());
    }

    #[test]
    fn test_scale_hint_is_not_a_score() {
        let highlights = extract(
            "AAPL Fear/Greed Score (0-100): 72\nBTC fear/greed (0 – 100) score is 55\nTSLA fear/greed score (0 to 100): 40",
        );
        let scores: Vec<u8> = highlights.scores.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![72, 55, 40]);
        assert_eq!(highlights.scores[0].asset.as_deref(), Some("AAPL"));
        assert_eq!(highlights.scores[1].asset.as_deref(), Some("BTC"));
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(extract("No numbers here."), ReportHighlights::default());
    }

    #[test]
    fn test_trend_words() {
        assert_eq!(extract("The outlook is Downward.").trend, Some(Trend::Down));
        assert_eq!(Trend::Up.to_string(), "up");
        assert_eq!(serde_json::to_value(Trend::Sideways).unwrap(), "sideways");
    }
}
