//! Debouncing wrapper for key sources.

use super::{KeySource, KeypadError};
use keypad_tictactoe_core::KeyCoord;
use tracing::{instrument, trace};

/// Suppresses repeated reads of a key that is still held.
///
/// A key is reported once when it first appears. Further reads of the same
/// key are swallowed until a read returns no key, which re-arms the filter.
/// A different key is reported immediately.
pub struct Debounced<S> {
    inner: S,
    last: Option<KeyCoord>,
}

impl<S: KeySource> Debounced<S> {
    /// Wraps a raw key source.
    pub fn new(inner: S) -> Self {
        Self { inner, last: None }
    }

    /// Returns the wrapped source.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[async_trait::async_trait]
impl<S: KeySource> KeySource for Debounced<S> {
    #[instrument(skip(self))]
    async fn read_key(&mut self) -> Result<Option<KeyCoord>, KeypadError> {
        let current = self.inner.read_key().await?;
        let previous = std::mem::replace(&mut self.last, current);

        match current {
            Some(key) if previous == Some(key) => {
                trace!(%key, "Key still held");
                Ok(None)
            }
            other => Ok(other),
        }
    }

    fn release(&mut self) {
        self.inner.release();
    }
}
