#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave and advice generation capability for Waypoint Defence.
//!
//! An [`Oracle`] accepts requests tagged with a [`Ticket`] and answers them
//! asynchronously through [`Oracle::poll`]. The offline implementation answers
//! from the deterministic generator on the next poll; the live implementation
//! asks a remote text-generation service on a background thread and falls
//! back to the deterministic generator on any failure. Callers never block.

mod config;
mod gemini;
mod live;
mod offline;

use crossbeam_channel::{unbounded, Receiver, Sender};
use thiserror::Error;
use waypoint_defence_core::{TowerKind, WavePlan};

pub use config::OracleConfig;
pub use live::LiveOracle;
pub use offline::OfflineOracle;

/// Correlates an oracle reply with the request that caused it.
///
/// The generation changes whenever the game restarts, so replies issued for a
/// previous game can be recognised and ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket {
    /// Restart counter at the time of the request.
    pub generation: u64,
    /// Wave number the request belongs to.
    pub wave: u32,
}

impl Ticket {
    /// Creates a new ticket.
    #[must_use]
    pub const fn new(generation: u64, wave: u32) -> Self {
        Self { generation, wave }
    }
}

/// Parameters of a wave composition request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveRequest {
    /// Wave number, starting at one.
    pub wave: u32,
    /// Difficulty multiplier for the wave.
    pub difficulty: f32,
}

/// Parameters of a tactical advice request.
#[derive(Clone, Debug, PartialEq)]
pub struct AdviceRequest {
    /// Wave about to start.
    pub wave: u32,
    /// Money the player holds.
    pub money: u32,
    /// Lives the base has left.
    pub lives: u32,
    /// Number of towers built per kind.
    pub towers: Vec<(TowerKind, usize)>,
}

/// Where a wave plan came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanSource {
    /// Produced by the remote text-generation service.
    Live,
    /// Produced by the deterministic generator.
    Fallback,
}

/// Answer delivered by an oracle.
#[derive(Clone, Debug, PartialEq)]
pub enum OracleReply {
    /// Answer to a wave request.
    Wave {
        /// Ticket of the originating request.
        ticket: Ticket,
        /// Generated wave plan.
        plan: WavePlan,
        /// Origin of the plan.
        source: PlanSource,
    },
    /// Answer to an advice request.
    Advice {
        /// Ticket of the originating request.
        ticket: Ticket,
        /// One sentence of advice.
        text: String,
    },
}

impl OracleReply {
    /// Ticket of the originating request.
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        match self {
            Self::Wave { ticket, .. } | Self::Advice { ticket, .. } => *ticket,
        }
    }
}

/// Failures talking to the remote text-generation service.
///
/// These never reach the player; every one of them resolves to the
/// deterministic fallback.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The request body could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
    /// The HTTP exchange failed before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("service responded with status {status}: {status_text}")]
    Status {
        /// Numeric HTTP status.
        status: u16,
        /// Reason phrase reported with the status.
        status_text: String,
    },
    /// The response did not contain any generated text.
    #[error("response carried no generated text")]
    MissingText,
    /// The generated text did not match the requested schema.
    #[error("malformed payload: {0}")]
    Malformed(#[source] serde_json::Error),
    /// The generated plan had no usable spawn groups.
    #[error("generated plan contained no usable spawn groups")]
    EmptyPlan,
}

/// Capability that produces wave plans and advice without blocking the caller.
pub trait Oracle {
    /// Reports whether requests reach the remote service.
    fn is_live(&self) -> bool;

    /// Requests a wave plan; exactly one [`OracleReply::Wave`] follows.
    fn request_wave(&mut self, ticket: Ticket, request: WaveRequest);

    /// Requests advice; exactly one [`OracleReply::Advice`] follows.
    fn request_advice(&mut self, ticket: Ticket, request: AdviceRequest);

    /// Appends every reply that arrived since the last poll.
    fn poll(&mut self, out: &mut Vec<OracleReply>);
}

/// Picks the live oracle when a credential is available and not forced offline.
#[must_use]
pub fn select_oracle(config: &OracleConfig, force_offline: bool) -> Box<dyn Oracle> {
    if force_offline {
        tracing::info!("oracle forced offline");
        return Box::new(OfflineOracle::new());
    }

    match config.credential() {
        Some(api_key) => {
            tracing::info!(model = %config.model, "using live oracle");
            Box::new(LiveOracle::new(config, api_key))
        }
        None => {
            tracing::info!(
                env = %config.api_key_env,
                "no oracle credential found, using offline generator"
            );
            Box::new(OfflineOracle::new())
        }
    }
}

/// Pair of channel ends shared by both oracle implementations.
#[derive(Debug)]
pub(crate) struct ReplyChannel {
    sender: Sender<OracleReply>,
    receiver: Receiver<OracleReply>,
}

impl ReplyChannel {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    pub(crate) fn sender(&self) -> Sender<OracleReply> {
        self.sender.clone()
    }

    pub(crate) fn send(&self, reply: OracleReply) {
        let _ = self.sender.send(reply);
    }

    pub(crate) fn drain_into(&self, out: &mut Vec<OracleReply>) {
        while let Ok(reply) = self.receiver.try_recv() {
            out.push(reply);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_selects_offline() {
        let config = OracleConfig {
            api_key: None,
            api_key_env: "WAYPOINT_DEFENCE_TEST_UNSET_KEY".to_owned(),
            ..OracleConfig::default()
        };

        assert!(!select_oracle(&config, false).is_live());
    }

    #[test]
    fn forced_offline_wins_over_credential() {
        let config = OracleConfig {
            api_key: Some("secret".to_owned()),
            ..OracleConfig::default()
        };

        assert!(!select_oracle(&config, true).is_live());
        assert!(select_oracle(&config, false).is_live());
    }
}
