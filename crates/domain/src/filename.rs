use std::fmt::{Display, Formatter};

/// Name used when a client filename sanitizes to nothing.
pub const FALLBACK_FILENAME: &str = "unnamed_upload";

/// Longest stored filename, matching the common filesystem `NAME_MAX`.
pub const MAX_FILENAME_BYTES: usize = 255;

/// A client-supplied filename reduced to a flat, filesystem-safe key.
///
/// The value only contains `[A-Za-z0-9_.-]`, never starts or ends with `.`
/// or `_`, and is never empty, so it cannot name a directory, a parent
/// directory or a hidden file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafeFilename(String);

impl SafeFilename {
    /// Sanitizes a raw client filename. Applying it twice is a no-op.
    #[must_use]
    pub fn sanitize(raw: &str) -> Self {
        let spaced: String = raw
            .chars()
            .filter(char::is_ascii)
            .map(|character| match character {
                '/' | '\\' => ' ',
                other => other,
            })
            .collect();

        let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

        let filtered: String = joined
            .chars()
            .filter(|character| {
                character.is_ascii_alphanumeric() || matches!(character, '_' | '.' | '-')
            })
            .collect();

        let trimmed = filtered.trim_matches(is_edge_character);
        // Only ASCII remains, so any byte index is a char boundary.
        let truncated = &trimmed[..trimmed.len().min(MAX_FILENAME_BYTES)];
        let truncated = truncated.trim_end_matches(is_edge_character);

        if truncated.is_empty() {
            return Self(FALLBACK_FILENAME.to_owned());
        }

        Self(truncated.to_owned())
    }

    /// Returns the sanitized name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for SafeFilename {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<SafeFilename> for String {
    fn from(value: SafeFilename) -> Self {
        value.0
    }
}

fn is_edge_character(character: char) -> bool {
    matches!(character, '.' | '_')
}
