//! Room ownership: token generation and the token-to-game table.

use derive_more::{Display, Error};
use derive_new::new;
use duel_tictactoe::{Game, RoomToken};
use rand::Rng;
use std::collections::HashMap;
use std::ops::RangeInclusive;
use tracing::{debug, info, instrument, warn};

/// Default random bytes per room token (10 hex characters).
pub const DEFAULT_TOKEN_BYTES: usize = 5;

/// Allowed random bytes per room token.
pub const TOKEN_BYTES_RANGE: RangeInclusive<usize> = 4..=32;

/// Default number of draws before giving up on a unique token.
pub const DEFAULT_MAX_TOKEN_ATTEMPTS: usize = 16;

/// Produces candidate room tokens.
///
/// Implemented for [`RandomTokens`] and for any `FnMut() -> RoomToken`, so
/// tests can script the sequence of candidates.
pub trait TokenSource: Send {
    /// Returns the next candidate. Uniqueness is checked by the registry.
    fn next_token(&mut self) -> RoomToken;
}

/// Random tokens rendered as lowercase hex.
#[derive(Debug, Clone, Copy, new)]
pub struct RandomTokens {
    bytes: usize,
}

impl TokenSource for RandomTokens {
    fn next_token(&mut self) -> RoomToken {
        let mut buf = vec![0u8; self.bytes];
        rand::rng().fill(buf.as_mut_slice());
        buf.iter()
            .map(|byte| format!("{byte:02x}"))
            .collect::<String>()
            .into()
    }
}

impl<F> TokenSource for F
where
    F: FnMut() -> RoomToken + Send,
{
    fn next_token(&mut self) -> RoomToken {
        self()
    }
}

/// Room creation failed because no unique token could be drawn.
#[derive(Debug, Clone, Display, Error)]
#[display("Registry error: {} at {}:{}", message, file, line)]
pub struct RegistryError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RegistryError {
    /// Creates a new registry error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Owns every live room's [`Game`], keyed by token.
pub struct RoomRegistry {
    rooms: HashMap<RoomToken, Game>,
    tokens: Box<dyn TokenSource>,
    max_token_attempts: usize,
}

impl std::fmt::Debug for RoomRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomRegistry")
            .field("rooms", &self.rooms.len())
            .field("max_token_attempts", &self.max_token_attempts)
            .finish_non_exhaustive()
    }
}

impl RoomRegistry {
    /// Creates a registry drawing `token_bytes` random bytes per token.
    ///
    /// `token_bytes` is clamped to [`TOKEN_BYTES_RANGE`] and
    /// `max_token_attempts` to at least 1.
    #[instrument]
    pub fn new(token_bytes: usize, max_token_attempts: usize) -> Self {
        let bytes = token_bytes.clamp(*TOKEN_BYTES_RANGE.start(), *TOKEN_BYTES_RANGE.end());
        if bytes != token_bytes {
            warn!(requested = token_bytes, used = bytes, "Room token length clamped");
        }
        Self::with_token_source(RandomTokens::new(bytes), max_token_attempts)
    }

    /// Creates a registry with a custom token source.
    pub fn with_token_source(
        tokens: impl TokenSource + 'static,
        max_token_attempts: usize,
    ) -> Self {
        Self {
            rooms: HashMap::new(),
            tokens: Box::new(tokens),
            max_token_attempts: max_token_attempts.max(1),
        }
    }

    /// Creates a room with a fresh game and returns its token.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if every candidate token collided with a
    /// live room.
    #[instrument(skip(self), fields(rooms = self.rooms.len()))]
    pub fn create_room(&mut self) -> Result<RoomToken, RegistryError> {
        for attempt in 1..=self.max_token_attempts {
            let token = self.tokens.next_token();
            if self.rooms.contains_key(&token) {
                warn!(%token, attempt, "Room token collision, drawing again");
                continue;
            }
            self.rooms.insert(token.clone(), Game::new(token.clone()));
            info!(%token, "Room created");
            return Ok(token);
        }
        Err(RegistryError::new(format!(
            "No unique room token after {} attempts",
            self.max_token_attempts
        )))
    }

    /// The game for `token`, if the room exists.
    pub fn get(&self, token: &RoomToken) -> Option<&Game> {
        self.rooms.get(token)
    }

    /// Mutable access to the game for `token`.
    pub fn get_mut(&mut self, token: &RoomToken) -> Option<&mut Game> {
        self.rooms.get_mut(token)
    }

    /// True when `token` names a live room.
    pub fn contains(&self, token: &RoomToken) -> bool {
        self.rooms.contains_key(token)
    }

    /// Removes a room, returning its game.
    #[instrument(skip(self))]
    pub fn destroy(&mut self, token: &RoomToken) -> Option<Game> {
        let game = self.rooms.remove(token);
        match &game {
            Some(_) => info!("Room destroyed"),
            None => debug!("Room already gone"),
        }
        game
    }

    /// Number of live rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// True when no rooms exist.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_BYTES, DEFAULT_MAX_TOKEN_ATTEMPTS)
    }
}
