use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::CellCount;

/// Anonymous identifiers are drawn from `0..ANONYMOUS_UID_RANGE`.
pub const ANONYMOUS_UID_RANGE: u32 = 1_000_000_000;

/// Who a round's seed is attributed to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserIdentity {
    Known(String),
    Anonymous(u32),
}

impl UserIdentity {
    /// Uses `user` when the host has one, otherwise draws an anonymous id.
    pub fn resolve<R: Rng + ?Sized>(user: Option<&str>, rng: &mut R) -> Self {
        match user.map(str::trim).filter(|user| !user.is_empty()) {
            Some(user) => Self::Known(user.to_string()),
            None => Self::anonymous(rng),
        }
    }

    pub fn anonymous<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let uid = rng.random_range(0..ANONYMOUS_UID_RANGE);
        log::debug!("no user id available, using anonymous uid {uid}");
        Self::Anonymous(uid)
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(user) => f.write_str(user),
            Self::Anonymous(uid) => write!(f, "{uid}"),
        }
    }
}

/// Builds the seed string shown to the player as the round's fairness proof.
///
/// Stake is printed in its shortest round-trip form, so `1.0` renders as `1`.
pub fn derive_seed(
    identity: &UserIdentity,
    timestamp_ms: u64,
    mine_count: CellCount,
    stake: f64,
) -> String {
    format!("uid:{identity}|t:{timestamp_ms}|b:{mine_count}|s:{stake}")
}
