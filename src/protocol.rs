//! Wire structs for the puzzle backend (serde ready).
//! Keep this small and stable so the client and the generator service can
//! evolve independently.

use serde::{Deserialize, Serialize};

use crate::domain::Puzzle;

/// Payload of `GET /api/generate-puzzle`. Everything is optional at the wire
/// level; `into_puzzle` decides what is actually required.
#[derive(Debug, Deserialize)]
pub struct PuzzleIn {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub phrase: Option<String>,
    #[serde(default)]
    pub words: Option<Vec<String>>,
    #[serde(default, rename = "emojis_list")]
    pub emojis_list: Option<Vec<String>>,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl PuzzleIn {
    /// Validate the wire payload into a domain puzzle. A missing or empty
    /// `phrase`/`emojis_list` is a hard error; missing `words` fall back to
    /// whitespace-tokenizing the phrase.
    pub fn into_puzzle(self) -> Result<Puzzle, String> {
        let phrase = match self.phrase {
            Some(p) if !p.trim().is_empty() => p,
            _ => return Err("missing field: phrase".into()),
        };
        let emojis = match self.emojis_list {
            Some(e) if !e.is_empty() => e,
            _ => return Err("missing field: emojis_list".into()),
        };
        let words = match self.words {
            Some(w) if !w.is_empty() => w,
            _ => phrase.split_whitespace().map(str::to_string).collect(),
        };
        Ok(Puzzle {
            category: self.category.unwrap_or_else(|| "Unknown".into()),
            phrase,
            words,
            emojis,
            explanation: self.explanation.filter(|e| !e.trim().is_empty()),
        })
    }
}

/// Error body the backend may attach to a non-2xx response.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /api/log-puzzle-result`.
#[derive(Clone, Debug, Serialize)]
pub struct RoundReport {
    pub category: String,
    pub phrase: String,
    #[serde(rename = "emojisList")]
    pub emojis_list: Vec<String>,
    /// "yes" or "no"; the sink predates booleans.
    #[serde(rename = "solvedCorrectly")]
    pub solved_correctly: String,
    #[serde(rename = "letterHintsUsed")]
    pub letter_hints_used: u32,
    #[serde(rename = "puzzleScore")]
    pub puzzle_score: u32,
    #[serde(rename = "totalScoreAtEnd")]
    pub total_score_at_end: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> PuzzleIn {
        serde_json::from_str(
            r#"{
                "category": "Sayings",
                "phrase": "time flies",
                "words": ["time", "flies"],
                "emojis_list": ["⏰", "🪰"],
                "explanation": "Time passes quickly."
            }"#,
        )
        .expect("parse")
    }

    #[test]
    fn full_payload_round_trips_into_a_puzzle() {
        let p = full_payload().into_puzzle().expect("puzzle");
        assert_eq!(p.phrase, "time flies");
        assert_eq!(p.words, vec!["time", "flies"]);
        assert_eq!(p.emojis.len(), 2);
        assert_eq!(p.explanation.as_deref(), Some("Time passes quickly."));
    }

    #[test]
    fn missing_phrase_or_emojis_is_rejected() {
        let no_phrase: PuzzleIn =
            serde_json::from_str(r#"{"emojis_list": ["⏰"]}"#).expect("parse");
        assert!(no_phrase.into_puzzle().is_err());

        let no_emojis: PuzzleIn =
            serde_json::from_str(r#"{"phrase": "time flies"}"#).expect("parse");
        assert!(no_emojis.into_puzzle().is_err());
    }

    #[test]
    fn missing_words_fall_back_to_tokenizing_the_phrase() {
        let raw: PuzzleIn = serde_json::from_str(
            r#"{"phrase": "piece of cake", "emojis_list": ["🍰"]}"#,
        )
        .expect("parse");
        let p = raw.into_puzzle().expect("puzzle");
        assert_eq!(p.words, vec!["piece", "of", "cake"]);
        assert_eq!(p.category, "Unknown");
    }

    #[test]
    fn round_report_serializes_with_wire_field_names() {
        let report = RoundReport {
            category: "Sayings".into(),
            phrase: "time flies".into(),
            emojis_list: vec!["⏰".into()],
            solved_correctly: "yes".into(),
            letter_hints_used: 1,
            puzzle_score: 70,
            total_score_at_end: 120,
        };
        let json = serde_json::to_value(&report).expect("json");
        assert_eq!(json["solvedCorrectly"], "yes");
        assert_eq!(json["letterHintsUsed"], 1);
        assert_eq!(json["puzzleScore"], 70);
        assert_eq!(json["totalScoreAtEnd"], 120);
        assert!(json.get("emojisList").is_some());
    }
}
