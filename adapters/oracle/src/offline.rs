use waypoint_defence_system_wave_generation::{fallback_advice, fallback_plan};

use crate::{
    AdviceRequest, Oracle, OracleReply, PlanSource, ReplyChannel, Ticket, WaveRequest,
};

/// Oracle answering every request from the deterministic generator.
#[derive(Debug)]
pub struct OfflineOracle {
    channel: ReplyChannel,
}

impl OfflineOracle {
    /// Creates an offline oracle with an empty reply queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            channel: ReplyChannel::new(),
        }
    }
}

impl Default for OfflineOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl Oracle for OfflineOracle {
    fn is_live(&self) -> bool {
        false
    }

    fn request_wave(&mut self, ticket: Ticket, request: WaveRequest) {
        let plan = fallback_plan(request.wave, request.difficulty);
        self.channel.send(OracleReply::Wave {
            ticket,
            plan,
            source: PlanSource::Fallback,
        });
    }

    fn request_advice(&mut self, ticket: Ticket, request: AdviceRequest) {
        self.channel.send(OracleReply::Advice {
            ticket,
            text: fallback_advice(request.wave).to_owned(),
        });
    }

    fn poll(&mut self, out: &mut Vec<OracleReply>) {
        self.channel.drain_into(out);
    }
}
