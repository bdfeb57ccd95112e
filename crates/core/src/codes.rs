// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Human-readable record codes.
//!
//! Appointments get `APT` and tickets `WSH`, followed by six uppercase
//! alphanumeric characters.

use std::sync::atomic::{AtomicU64, Ordering};

pub const APPOINTMENT_CODE_PREFIX: &str = "APT";
pub const TICKET_CODE_PREFIX: &str = "WSH";

/// Number of characters after the prefix.
pub const CODE_SUFFIX_LENGTH: usize = 6;

const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Produces codes for new appointments and tickets.
pub trait CodeGenerator: Send + Sync {
    fn appointment_code(&self) -> String;
    fn ticket_code(&self) -> String;
}

/// Random codes for production use.
///
/// Uniqueness is enforced by the store; a collision surfaces as a conflict
/// rather than being retried.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl RandomCodeGenerator {
    fn suffix() -> String {
        let mut value: u64 = rand::random::<u64>();
        let mut suffix: String = String::with_capacity(CODE_SUFFIX_LENGTH);
        for _ in 0..CODE_SUFFIX_LENGTH {
            let index: usize = usize::try_from(value % 36).unwrap_or(0);
            suffix.push(char::from(ALPHABET[index]));
            value /= 36;
        }
        suffix
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn appointment_code(&self) -> String {
        format!("{APPOINTMENT_CODE_PREFIX}{}", Self::suffix())
    }

    fn ticket_code(&self) -> String {
        format!("{TICKET_CODE_PREFIX}{}", Self::suffix())
    }
}

/// Deterministic codes (`APT000001`, `WSH000002`, ...) sharing one counter.
#[derive(Debug)]
pub struct SequentialCodeGenerator {
    next: AtomicU64,
}

impl SequentialCodeGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    fn bump(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for SequentialCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for SequentialCodeGenerator {
    fn appointment_code(&self) -> String {
        format!("{APPOINTMENT_CODE_PREFIX}{:06}", self.bump())
    }

    fn ticket_code(&self) -> String {
        format!("{TICKET_CODE_PREFIX}{:06}", self.bump())
    }
}

/// Returns true if `code` has the given prefix and a valid suffix.
#[must_use]
pub fn is_well_formed(code: &str, prefix: &str) -> bool {
    code.strip_prefix(prefix).is_some_and(|suffix| {
        suffix.len() == CODE_SUFFIX_LENGTH
            && suffix
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    })
}
