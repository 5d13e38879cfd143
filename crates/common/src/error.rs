//! Common error types.

use thiserror::Error;

/// Main error type for the player engine.
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("Player surface has not been created")]
    NotAttached,

    #[error("Player surface already exists")]
    AlreadyAttached,

    #[error("Invalid media source: {0}")]
    InvalidSource(#[from] url::ParseError),
}

pub type PlayerResult<T> = Result<T, PlayerError>;

impl PlayerError {
    /// Check if the error is the not-attached guard.
    pub fn is_not_attached(&self) -> bool {
        matches!(self, PlayerError::NotAttached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlayerError::NotAttached;
        assert_eq!(err.to_string(), "Player surface has not been created");
        assert!(err.is_not_attached());
    }

    #[test]
    fn test_url_parse_conversion() {
        let result: PlayerResult<url::Url> =
            url::Url::parse("not a url").map_err(PlayerError::from);
        assert!(matches!(result, Err(PlayerError::InvalidSource(_))));
    }
}
