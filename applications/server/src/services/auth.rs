/// Static bearer token check for inbound requests
use crate::error::{Result, ServerError};

#[derive(Clone)]
pub struct ApiTokenAuth {
    token: String,
}

impl std::fmt::Debug for ApiTokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiTokenAuth").finish_non_exhaustive()
    }
}

impl ApiTokenAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Check an `Authorization` header value of the form `Bearer <token>`.
    pub fn verify_header(&self, header: Option<&str>) -> Result<()> {
        let header =
            header.ok_or_else(|| ServerError::Auth("Missing Authorization header".to_string()))?;

        let mut parts = header.split(' ');
        let (Some("Bearer"), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ServerError::Auth("Invalid token".to_string()));
        };

        if self.verify_token(token) {
            Ok(())
        } else {
            Err(ServerError::Auth("Invalid token".to_string()))
        }
    }

    /// Compare without stopping at the first differing byte.
    pub fn verify_token(&self, token: &str) -> bool {
        let expected = self.token.as_bytes();
        let given = token.as_bytes();

        let diff = expected
            .iter()
            .zip(given)
            .fold(expected.len() ^ given.len(), |acc, (a, b)| {
                acc | usize::from(a ^ b)
            });
        diff == 0
    }
}
