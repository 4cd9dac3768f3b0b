//! Chirp body validation and profanity filtering.

use std::str::FromStr;

/// Longest accepted chirp body, in characters.
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Words masked out of chirp bodies.
pub const BLOCKED_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// How blocked words are masked once detected.
///
/// Detection ignores ASCII case. `ExactCase` keeps the historical
/// behaviour of masking only the lower-case spelling, so "Kerfuffle" is
/// detected but survives. `AnyCase` masks every spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CensorMode {
    #[default]
    ExactCase,
    AnyCase,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown censor mode '{0}' (expected 'exact' or 'any')")]
pub struct ParseCensorModeError(String);

impl FromStr for CensorMode {
    type Err = ParseCensorModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::ExactCase),
            "any" => Ok(Self::AnyCase),
            _ => Err(ParseCensorModeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChirpError {
    #[error("Chirp is too long")]
    TooLong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedChirp {
    pub body: String,
    /// A blocked word was found in some ASCII casing, whether or not it was masked.
    pub flagged: bool,
}

/// Enforce the length limit and mask blocked words.
pub fn clean_chirp(body: &str, mode: CensorMode) -> Result<CleanedChirp, ChirpError> {
    if body.chars().count() > MAX_CHIRP_LENGTH {
        return Err(ChirpError::TooLong);
    }

    // ASCII folding, the same rule the `AnyCase` replacer uses
    let lowered = body.to_ascii_lowercase();
    let flagged = BLOCKED_WORDS.iter().any(|word| lowered.contains(word));
    if !flagged {
        return Ok(CleanedChirp {
            body: body.to_string(),
            flagged,
        });
    }

    let mut cleaned = body.to_string();
    for word in BLOCKED_WORDS {
        let mask = "*".repeat(word.len());
        cleaned = match mode {
            CensorMode::ExactCase => cleaned.replace(word, &mask),
            CensorMode::AnyCase => replace_ignore_ascii_case(&cleaned, word, &mask),
        };
    }

    Ok(CleanedChirp {
        body: cleaned,
        flagged,
    })
}

/// `word` must be ASCII, so every match starts and ends on a char boundary.
fn replace_ignore_ascii_case(haystack: &str, word: &str, mask: &str) -> String {
    let bytes = haystack.as_bytes();
    let needle = word.as_bytes();

    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    let mut i = 0;
    while i + needle.len() <= bytes.len() {
        if bytes[i..i + needle.len()].eq_ignore_ascii_case(needle) {
            out.push_str(&haystack[last..i]);
            out.push_str(mask);
            i += needle.len();
            last = i;
        } else {
            i += 1;
        }
    }
    out.push_str(&haystack[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_body_passes_through() {
        let longest = "x".repeat(MAX_CHIRP_LENGTH);
        let inputs = [
            "",
            "I had something interesting for breakfast",
            "The fornix is a brain structure",
            "kerfuf fle sharber t forn ax",
            "émoji ✨ and ünïcode are fine",
            longest.as_str(),
        ];
        for input in inputs {
            let cleaned = clean_chirp(input, CensorMode::ExactCase).unwrap();
            assert_eq!(cleaned.body, input);
            assert!(!cleaned.flagged);
        }
    }

    #[test]
    fn masks_lower_case_words() {
        let cleaned = clean_chirp("This is a kerfuffle opinion", CensorMode::ExactCase).unwrap();
        assert_eq!(cleaned.body, "This is a ********* opinion");
        assert!(cleaned.flagged);

        let cleaned =
            clean_chirp("sharbert and fornax, then sharbert again", CensorMode::ExactCase).unwrap();
        assert_eq!(cleaned.body, "******** and ******, then ******** again");
    }

    #[test]
    fn masks_inside_longer_words() {
        let cleaned = clean_chirp("kerfuffles", CensorMode::ExactCase).unwrap();
        assert_eq!(cleaned.body, "*********s");
    }

    #[test]
    fn exact_case_detects_but_keeps_other_casing() {
        let cleaned = clean_chirp("What a Kerfuffle and a kerfuffle", CensorMode::ExactCase).unwrap();
        assert_eq!(cleaned.body, "What a Kerfuffle and a *********");
        assert!(cleaned.flagged);

        let cleaned = clean_chirp("SHARBERT!", CensorMode::ExactCase).unwrap();
        assert_eq!(cleaned.body, "SHARBERT!");
        assert!(cleaned.flagged);
    }

    #[test]
    fn any_case_masks_every_casing() {
        let cleaned = clean_chirp("What a Kerfuffle and a kerfuffle", CensorMode::AnyCase).unwrap();
        assert_eq!(cleaned.body, "What a ********* and a *********");

        let cleaned = clean_chirp("ünï FoRnAx ✨", CensorMode::AnyCase).unwrap();
        assert_eq!(cleaned.body, "ünï ****** ✨");
    }

    #[test]
    fn any_case_masks_whatever_it_flags() {
        let inputs = [
            "\u{212A}ERFUFFLE",
            "KERFUFFLE",
            "sHaRbErT and FORNAX",
            "ﬁne fornaX ✨ Kerfuffle",
            "nothing here",
        ];
        for input in inputs {
            let cleaned = clean_chirp(input, CensorMode::AnyCase).unwrap();
            let remaining = cleaned.body.to_ascii_lowercase();
            for word in BLOCKED_WORDS {
                assert!(!remaining.contains(word), "{input:?} -> {:?}", cleaned.body);
            }
            if !cleaned.flagged {
                assert_eq!(cleaned.body, input);
            }
        }
    }

    #[test]
    fn non_ascii_lookalikes_are_not_flagged() {
        // Kelvin sign folds to 'k' under Unicode rules but is not an ASCII letter
        let input = "\u{212A}ERFUFFLE";
        for mode in [CensorMode::ExactCase, CensorMode::AnyCase] {
            let cleaned = clean_chirp(input, mode).unwrap();
            assert!(!cleaned.flagged);
            assert_eq!(cleaned.body, input);
        }
    }

    #[test]
    fn too_long_is_rejected_regardless_of_content() {
        let plain = "a".repeat(MAX_CHIRP_LENGTH + 1);
        assert_eq!(clean_chirp(&plain, CensorMode::ExactCase), Err(ChirpError::TooLong));

        let profane = "kerfuffle ".repeat(15);
        assert!(profane.chars().count() > MAX_CHIRP_LENGTH);
        assert_eq!(clean_chirp(&profane, CensorMode::AnyCase), Err(ChirpError::TooLong));
        assert_eq!(ChirpError::TooLong.to_string(), "Chirp is too long");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let exactly = "é".repeat(MAX_CHIRP_LENGTH);
        assert!(exactly.len() > MAX_CHIRP_LENGTH);
        assert_eq!(clean_chirp(&exactly, CensorMode::ExactCase).unwrap().body, exactly);

        let over = "é".repeat(MAX_CHIRP_LENGTH + 1);
        assert_eq!(clean_chirp(&over, CensorMode::ExactCase), Err(ChirpError::TooLong));
    }

    #[test]
    fn parse_censor_mode() {
        assert_eq!("exact".parse::<CensorMode>().unwrap(), CensorMode::ExactCase);
        assert_eq!(" ANY ".parse::<CensorMode>().unwrap(), CensorMode::AnyCase);
        assert!("strict".parse::<CensorMode>().is_err());
    }
}
