//! Unique token allocation.

use std::sync::Arc;

use serde_json::json;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::token_generator::{RandomTokenGenerator, TokenGenerator};

pub const DEFAULT_TOKEN_LENGTH: usize = 5;
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Token length and collision retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSettings {
    pub length: usize,
    pub max_attempts: usize,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            length: DEFAULT_TOKEN_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Produces tokens not yet used by any stored link.
///
/// The check is a plain existence read; two concurrent callers may still be
/// handed the same token, in which case the unique constraint turns the
/// second insert into [`AppError::Conflict`].
pub struct TokenService<L: LinkRepository> {
    link_repository: Arc<L>,
    generator: Arc<dyn TokenGenerator>,
    max_attempts: usize,
}

impl<L: LinkRepository> TokenService<L> {
    /// Creates a service backed by an OS-seeded [`RandomTokenGenerator`].
    pub fn new(link_repository: Arc<L>, settings: TokenSettings) -> Self {
        Self::with_generator(
            link_repository,
            Arc::new(RandomTokenGenerator::from_os_rng(settings.length)),
            settings.max_attempts,
        )
    }

    pub fn with_generator(
        link_repository: Arc<L>,
        generator: Arc<dyn TokenGenerator>,
        max_attempts: usize,
    ) -> Self {
        Self {
            link_repository,
            generator,
            max_attempts,
        }
    }

    /// Generates a token and checks it against stored links, retrying on
    /// collision.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] once `max_attempts` candidates have all
    /// collided, or on database errors.
    pub async fn generate_unique_token(&self) -> Result<String, AppError> {
        for attempt in 1..=self.max_attempts {
            let token = self.generator.generate();

            if self.link_repository.find_by_token(&token).await?.is_none() {
                return Ok(token);
            }

            tracing::debug!(attempt, "generated token collided with an existing link");
        }

        tracing::error!(
            max_attempts = self.max_attempts,
            "failed to generate a unique token"
        );

        Err(AppError::internal(
            "Failed to generate unique token",
            json!({ "reason": "Too many collisions", "attempts": self.max_attempts }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Link;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;
    use std::sync::Mutex;

    /// Replays a fixed list of tokens, then repeats the last one.
    struct ScriptedGenerator {
        tokens: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(tokens: &[&str]) -> Self {
            let mut tokens: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
            tokens.reverse();
            Self {
                tokens: Mutex::new(tokens),
            }
        }
    }

    impl TokenGenerator for ScriptedGenerator {
        fn generate(&self) -> String {
            let mut tokens = self.tokens.lock().unwrap();
            if tokens.len() > 1 {
                tokens.pop().unwrap()
            } else {
                tokens[0].clone()
            }
        }
    }

    fn create_test_link(token: &str) -> Link {
        Link::new(
            1,
            "Existing".to_string(),
            "https://example.com".to_string(),
            token.to_string(),
            Utc::now(),
            Utc::now(),
            1,
        )
    }

    #[tokio::test]
    async fn test_first_free_token_is_returned() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_token()
            .withf(|token| token == "abcde")
            .times(1)
            .returning(|_| Ok(None));

        let service = TokenService::with_generator(
            Arc::new(mock_link_repo),
            Arc::new(ScriptedGenerator::new(&["abcde"])),
            DEFAULT_MAX_ATTEMPTS,
        );

        assert_eq!(service.generate_unique_token().await.unwrap(), "abcde");
    }

    #[tokio::test]
    async fn test_collision_is_retried() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_token()
            .withf(|token| token == "taken")
            .times(2)
            .returning(|token| Ok(Some(create_test_link(token))));

        mock_link_repo
            .expect_find_by_token()
            .withf(|token| token == "fresh")
            .times(1)
            .returning(|_| Ok(None));

        let service = TokenService::with_generator(
            Arc::new(mock_link_repo),
            Arc::new(ScriptedGenerator::new(&["taken", "taken", "fresh"])),
            DEFAULT_MAX_ATTEMPTS,
        );

        assert_eq!(service.generate_unique_token().await.unwrap(), "fresh");
    }

    #[tokio::test]
    async fn test_exhaustion_after_exactly_max_attempts() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_token()
            .times(DEFAULT_MAX_ATTEMPTS)
            .returning(|token| Ok(Some(create_test_link(token))));

        let service = TokenService::with_generator(
            Arc::new(mock_link_repo),
            Arc::new(ScriptedGenerator::new(&["always"])),
            DEFAULT_MAX_ATTEMPTS,
        );

        let result = service.generate_unique_token().await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_repository_error_is_propagated() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_by_token()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = TokenService::with_generator(
            Arc::new(mock_link_repo),
            Arc::new(ScriptedGenerator::new(&["abcde"])),
            DEFAULT_MAX_ATTEMPTS,
        );

        assert!(service.generate_unique_token().await.is_err());
    }

    #[tokio::test]
    async fn test_default_settings_produce_five_char_tokens() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_find_by_token()
            .times(1)
            .returning(|_| Ok(None));

        let service = TokenService::new(Arc::new(mock_link_repo), TokenSettings::default());
        let token = service.generate_unique_token().await.unwrap();

        assert_eq!(token.len(), DEFAULT_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
