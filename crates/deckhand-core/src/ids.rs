// SPDX-License-Identifier: AGPL-3.0
// Deckhand Core - Identifier tokens
//
// Ids are millisecond timestamps rendered as decimal strings.

use std::sync::atomic::{AtomicI64, Ordering};

/// Issues strictly increasing timestamp-based tokens
#[derive(Debug, Default)]
pub struct TokenGenerator {
    last: AtomicI64,
}

impl TokenGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next token, never equal to one issued before by this generator
    pub fn next_token(&self) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return candidate.to_string(),
                Err(actual) => prev = actual,
            }
        }
    }
}
