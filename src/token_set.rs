use safina::sync::{Receiver, SyncSender, sync_channel};

/// A token.  If the token came from a [`TokenSet`], dropping the token puts
/// it back in the set.
pub struct Token(SyncSender<()>);
impl Token {
    /// Makes a new token that is not part of a set.  This is useful for testing.
    #[must_use]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let (sender, _receiver) = sync_channel(1);
        Self(sender)
    }
}
impl Drop for Token {
    fn drop(&mut self) {
        let _ = self.0.try_send(());
    }
}

/// A set of tokens.  You can get a token from the set.
/// Dropping the token returns it to the set.
/// When the set is empty, you must wait for a token to be returned.
///
/// The accept loop uses this to limit the number of connections the server
/// handles at one time.
pub struct TokenSet(SyncSender<()>, Receiver<()>);
impl TokenSet {
    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub fn new(size: usize) -> Self {
        let (sender, receiver) = sync_channel(size);
        for _ in 0..size {
            sender.try_send(()).unwrap();
        }
        Self(sender, receiver)
    }

    #[allow(clippy::missing_panics_doc)]
    pub async fn async_wait_token(&mut self) -> Token {
        self.1.async_recv().await.unwrap();
        Token(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{Token, TokenSet};
    use futures_lite::future::block_on;

    #[test]
    fn dropping_a_token_returns_it_to_the_set() {
        let mut set = TokenSet::new(1);
        let token = block_on(set.async_wait_token());
        drop(token);
        let _token2 = block_on(set.async_wait_token());
    }

    #[test]
    fn standalone_token_can_be_dropped() {
        let token = Token::new();
        drop(token);
    }
}
