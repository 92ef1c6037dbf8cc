use std::time::Duration;

use tracing::{debug, instrument};

use crate::config::OpponentConfig;
use crate::error::OpponentError;

/// Source of moves for the automated side.
pub trait Opponent: Send + Sync {
    /// Suggest the next column given every column played so far.
    fn suggest_move(&self, history: &[usize]) -> Result<usize, OpponentError>;

    /// Return the opponent's display name.
    fn name(&self) -> &str;
}

/// Client for the remote move service.
///
/// The service takes the game so far as `?moves=[c0,c1,...]` and answers with
/// the same array with its own move appended.
pub struct HttpOpponent {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
}

impl HttpOpponent {
    pub fn new(config: &OpponentConfig) -> Result<Self, OpponentError> {
        let mut builder =
            reqwest::blocking::Client::builder().timeout(Duration::from_millis(config.timeout_ms));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        let base_url = reqwest::Url::parse(&config.base_url).map_err(|_| {
            OpponentError::InvalidUrl {
                url: config.base_url.clone(),
            }
        })?;
        Ok(HttpOpponent { client, base_url })
    }

    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }
}

impl Opponent for HttpOpponent {
    #[instrument(skip(self), fields(moves = history.len()))]
    fn suggest_move(&self, history: &[usize]) -> Result<usize, OpponentError> {
        let moves = encode_moves(history);
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[("moves", moves.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(OpponentError::Status(status));
        }
        let body = response.text()?;
        debug!(%body, "opponent responded");
        parse_suggestion(&body)
    }

    fn name(&self) -> &str {
        "Remote"
    }
}

/// Serialize a move history as a JSON integer array.
pub fn encode_moves(history: &[usize]) -> String {
    serde_json::to_string(history).expect("a list of integers serializes")
}

/// Pick the suggested column out of a response body: the last element of a
/// JSON integer array.
pub fn parse_suggestion(body: &str) -> Result<usize, OpponentError> {
    let moves: Vec<usize> = serde_json::from_str(body.trim())?;
    moves.last().copied().ok_or(OpponentError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_moves() {
        assert_eq!(encode_moves(&[]), "[]");
        assert_eq!(encode_moves(&[0, 1, 0, 2]), "[0,1,0,2]");
    }

    #[test]
    fn test_parse_takes_last_element() {
        assert_eq!(parse_suggestion("[0,1,0,2,3]").unwrap(), 3);
        assert_eq!(parse_suggestion(" [2]\n").unwrap(), 2);
    }

    #[test]
    fn test_parse_rejects_empty_array() {
        assert!(matches!(
            parse_suggestion("[]"),
            Err(OpponentError::EmptyResponse)
        ));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(
            parse_suggestion("{\"move\": 1}"),
            Err(OpponentError::Parse(_))
        ));
        assert!(matches!(
            parse_suggestion("[1, -2]"),
            Err(OpponentError::Parse(_))
        ));
        assert!(matches!(
            parse_suggestion("Internal Server Error"),
            Err(OpponentError::Parse(_))
        ));
    }

    #[test]
    fn test_new_rejects_bad_url() {
        let config = OpponentConfig {
            base_url: "::nope".into(),
            timeout_ms: 100,
            use_system_proxy: false,
        };
        assert!(matches!(
            HttpOpponent::new(&config),
            Err(OpponentError::InvalidUrl { .. })
        ));
    }
}
