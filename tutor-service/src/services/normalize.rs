//! Recover structured JSON from loosely-structured model output.
//!
//! Models are asked for raw JSON but routinely wrap it in prose or markdown
//! fences. Normalization first tries a direct parse, then falls back to the
//! substring spanning the first opening bracket through the last closing
//! bracket of the expected shape.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Bracket pair delimiting the JSON shape a task expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Array,
    Object,
}

impl JsonShape {
    fn brackets(self) -> (char, char) {
        match self {
            JsonShape::Array => ('[', ']'),
            JsonShape::Object => ('{', '}'),
        }
    }
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("could not extract structured data from model output")]
    NoStructuredData,
}

/// Parse completion text expected to encode JSON of the given shape.
///
/// The fallback slice is the greedy outer match: nested or multiple JSON
/// blobs in one response are not disambiguated. That mirrors the contract
/// callers already depend on; a balanced-bracket scan would change which
/// inputs parse.
pub fn parse_structured<T: DeserializeOwned>(
    text: &str,
    shape: JsonShape,
) -> Result<T, NormalizeError> {
    let trimmed = text.trim();

    if let Ok(value) = serde_json::from_str::<T>(trimmed) {
        return Ok(value);
    }

    let candidate = extract_candidate(trimmed, shape).ok_or(NormalizeError::NoStructuredData)?;
    serde_json::from_str(candidate).map_err(|_| NormalizeError::NoStructuredData)
}

/// Greedy slice from the first opening bracket to the last closing bracket.
fn extract_candidate(text: &str, shape: JsonShape) -> Option<&str> {
    let (open, close) = shape.brackets();
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
