//! Title validation for todos.
//!
//! Titles are trimmed first and validated second:
//! - The trimmed title must not be empty
//! - The trimmed title must be at most [`MAX_TITLE_CHARS`] characters (not bytes)
//!
//! The repository trusts its callers to have validated titles. It still trims,
//! since trimming changes the stored bytes.

use thiserror::Error;

pub const MAX_TITLE_CHARS: usize = 500;

/// Trims `title` and checks it against the title rules.
///
/// # Examples
/// ```
/// use todoapp::validation::validate_title;
///
/// assert_eq!(validate_title("  Buy milk ").unwrap(), "Buy milk");
/// assert!(validate_title("   ").is_err());
/// assert!(validate_title(&"x".repeat(501)).is_err());
/// ```
pub fn validate_title(title: &str) -> Result<String, TitleError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TitleError::Empty);
    }

    let chars = trimmed.chars().count();
    if chars > MAX_TITLE_CHARS {
        return Err(TitleError::TooLong {
            max: MAX_TITLE_CHARS,
            actual: chars,
        });
    }

    Ok(trimmed.to_string())
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TitleError {
    #[error("title cannot be empty")]
    Empty,
    #[error("title must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(validate_title(" \t\n "), Err(TitleError::Empty));
    }

    #[test]
    fn limit_counts_characters_after_trim() {
        let padded = format!("  {}  ", "é".repeat(MAX_TITLE_CHARS));
        assert_eq!(validate_title(&padded).unwrap().chars().count(), 500);

        let over = "é".repeat(MAX_TITLE_CHARS + 1);
        assert_eq!(
            validate_title(&over),
            Err(TitleError::TooLong {
                max: 500,
                actual: 501
            })
        );
    }
}
