//! Test utilities shared by unit tests and the `tests/` suites.
//!
//! Compiled for `cfg(test)` and when the `test-support` feature is enabled.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryStore;
use crate::outbound::token::{JwtTokenService, TokenSecret, TokenSettings};

/// Clock whose current instant is set by the test.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use jobboard::test_support::MutableClock;
/// use mockable::Clock;
///
/// let start = Utc::now();
/// let clock = MutableClock::new(start);
/// clock.advance_seconds(30);
/// assert_eq!((clock.utc() - start).num_seconds(), 30);
/// ```
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Secret used by [`memory_state`]; long enough for release-mode checks.
pub const TEST_TOKEN_SECRET: &[u8] = b"jobboard-test-secret-0123456789abcdef";

/// Token lifetime used by [`memory_state`].
pub const TEST_TOKEN_TTL_SECS: u64 = 3_600;

/// In-memory wiring of every port, with handles for assertions.
pub struct MemoryHarness {
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<MutableClock>,
    pub state: HttpState,
}

/// Build [`HttpState`] over a fresh [`InMemoryStore`] and a [`MutableClock`]
/// fixed at 2025-01-01T12:00:00Z.
///
/// # Examples
/// ```
/// use jobboard::test_support::memory_state;
///
/// let harness = memory_state();
/// assert_eq!(harness.store.application_count(), 0);
/// ```
pub fn memory_state() -> MemoryHarness {
    let start = Utc
        .with_ymd_and_hms(2025, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    let clock = Arc::new(MutableClock::new(start));
    let store = Arc::new(InMemoryStore::new());
    let settings = TokenSettings::new(
        TokenSecret::from_bytes(TEST_TOKEN_SECRET.to_vec()),
        TEST_TOKEN_TTL_SECS,
    );
    let shared_clock: Arc<dyn Clock> = clock.clone();
    let tokens = Arc::new(JwtTokenService::new(&settings, Arc::clone(&shared_clock)));
    let state = HttpState::from_repositories(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
        tokens,
        shared_clock,
    );
    MemoryHarness {
        store,
        clock,
        state,
    }
}
