use waypoint_defence_system_wave_generation::{fallback_advice, fallback_plan};

use crate::{
    gemini, AdviceRequest, Oracle, OracleConfig, OracleReply, PlanSource, ReplyChannel, Ticket,
    WaveRequest,
};

/// Oracle backed by the remote `generateContent` service.
///
/// Each request runs on a background thread owned by `ehttp`; its outcome,
/// live or fallback, is posted to a channel drained by [`Oracle::poll`].
#[derive(Debug)]
pub struct LiveOracle {
    url: String,
    api_key: String,
    channel: ReplyChannel,
}

impl LiveOracle {
    /// Creates a live oracle for the configured model using `api_key`.
    #[must_use]
    pub fn new(config: &OracleConfig, api_key: String) -> Self {
        Self {
            url: config.generate_url(),
            api_key,
            channel: ReplyChannel::new(),
        }
    }
}

impl Oracle for LiveOracle {
    fn is_live(&self) -> bool {
        true
    }

    fn request_wave(&mut self, ticket: Ticket, request: WaveRequest) {
        let body = gemini::wave_body(&request);
        let http = match gemini::build_request(self.url.clone(), &self.api_key, &body) {
            Ok(http) => http,
            Err(error) => {
                tracing::warn!(%error, wave = ticket.wave, "wave request not sent, using fallback");
                self.channel.send(fallback_wave(ticket, request));
                return;
            }
        };

        tracing::debug!(wave = ticket.wave, "requesting wave plan");
        let sender = self.channel.sender();
        ehttp::fetch(http, move |result| {
            let reply = match gemini::response_bytes(result)
                .and_then(|bytes| gemini::parse_wave(&bytes))
            {
                Ok(plan) => OracleReply::Wave {
                    ticket,
                    plan,
                    source: PlanSource::Live,
                },
                Err(error) => {
                    tracing::warn!(
                        %error,
                        wave = ticket.wave,
                        "wave generation failed, using fallback"
                    );
                    fallback_wave(ticket, request)
                }
            };
            let _ = sender.send(reply);
        });
    }

    fn request_advice(&mut self, ticket: Ticket, request: AdviceRequest) {
        let body = gemini::advice_body(&request);
        let wave = request.wave;
        let http = match gemini::build_request(self.url.clone(), &self.api_key, &body) {
            Ok(http) => http,
            Err(error) => {
                tracing::warn!(%error, wave, "advice request not sent, using canned advice");
                self.channel.send(fallback_advice_reply(ticket, wave));
                return;
            }
        };

        let sender = self.channel.sender();
        ehttp::fetch(http, move |result| {
            let reply = match gemini::response_bytes(result)
                .and_then(|bytes| gemini::parse_advice(&bytes))
            {
                Ok(text) => OracleReply::Advice { ticket, text },
                Err(error) => {
                    tracing::warn!(%error, wave, "advice generation failed, using canned advice");
                    fallback_advice_reply(ticket, wave)
                }
            };
            let _ = sender.send(reply);
        });
    }

    fn poll(&mut self, out: &mut Vec<OracleReply>) {
        self.channel.drain_into(out);
    }
}

fn fallback_wave(ticket: Ticket, request: WaveRequest) -> OracleReply {
    OracleReply::Wave {
        ticket,
        plan: fallback_plan(request.wave, request.difficulty),
        source: PlanSource::Fallback,
    }
}

fn fallback_advice_reply(ticket: Ticket, wave: u32) -> OracleReply {
    OracleReply::Advice {
        ticket,
        text: fallback_advice(wave).to_owned(),
    }
}
