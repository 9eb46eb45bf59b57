use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trigger substrings for classification. Matching is case-insensitive and
/// substring-based: a trigger inside a longer word still counts.
const POSITIVE_TRIGGERS: &[&str] = &["хорош", "люблю"];
const NEGATIVE_TRIGGERS: &[&str] = &["плохо", "ненавиж"];

/// Sentiment label assigned to a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(format!(
                "invalid sentiment '{other}': expected one of positive, negative, neutral"
            )),
        }
    }
}

/// Classify review text by trigger-word containment.
///
/// Positive triggers are checked before negative ones, so text containing
/// both kinds is classified positive.
pub fn classify(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();

    if POSITIVE_TRIGGERS.iter().any(|word| lowered.contains(word)) {
        return Sentiment::Positive;
    }
    if NEGATIVE_TRIGGERS.iter().any(|word| lowered.contains(word)) {
        return Sentiment::Negative;
    }
    Sentiment::Neutral
}
