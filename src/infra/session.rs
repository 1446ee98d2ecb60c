//! Bearer-token session shared between the HTTP transport and the UI.

use std::sync::Arc;

use tokio::sync::RwLock;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct SessionTokens {
    access: Option<String>,
    refresh: Option<String>,
}

/// Cloneable handle to the current credentials. Every clone sees the same tokens, so the
/// transport can refresh or clear them and the UI observes the result.
#[derive(Clone, Debug, Default)]
pub struct Session {
    tokens: Arc<RwLock<SessionTokens>>,
}

impl Session {
    pub fn new(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(SessionTokens {
                access: normalize(access_token),
                refresh: normalize(refresh_token),
            })),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.tokens.read().await.access.clone()
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.tokens.read().await.refresh.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.read().await.access.is_some()
    }

    pub async fn set_tokens(&self, access_token: Option<String>, refresh_token: Option<String>) {
        let mut tokens = self.tokens.write().await;
        tokens.access = normalize(access_token);
        tokens.refresh = normalize(refresh_token);
    }

    pub async fn clear(&self) {
        *self.tokens.write().await = SessionTokens::default();
    }
}

fn normalize(token: Option<String>) -> Option<String> {
    token
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_tokens() {
        let session = Session::new(Some("abc".into()), Some("r-1".into()));
        let other = session.clone();

        other.set_tokens(Some("def".into()), None).await;
        assert_eq!(session.access_token().await.as_deref(), Some("def"));
        assert_eq!(session.refresh_token().await, None);

        session.clear().await;
        assert!(!other.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_blank_tokens_are_ignored() {
        let session = Session::new(Some("   ".into()), Some(String::new()));
        assert!(!session.is_authenticated().await);
        assert_eq!(session.refresh_token().await, None);
    }
}
