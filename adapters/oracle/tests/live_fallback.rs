use std::time::{Duration, Instant};

use waypoint_defence_oracle::{
    AdviceRequest, LiveOracle, Oracle, OracleConfig, OracleReply, PlanSource, Ticket,
    WaveRequest,
};

fn unreachable_config() -> OracleConfig {
    OracleConfig {
        endpoint: "http://127.0.0.1:9/v1beta".to_owned(),
        ..OracleConfig::default()
    }
}

fn wait_for_replies(oracle: &mut dyn Oracle, expected: usize) -> Vec<OracleReply> {
    let deadline = Instant::now() + Duration::from_secs(20);
    let mut replies = Vec::new();
    while replies.len() < expected && Instant::now() < deadline {
        oracle.poll(&mut replies);
        std::thread::sleep(Duration::from_millis(10));
    }
    replies
}

#[test]
fn unreachable_service_falls_back_to_the_deterministic_generator() {
    let mut oracle = LiveOracle::new(&unreachable_config(), "test-key".to_owned());
    let ticket = Ticket::new(3, 10);

    oracle.request_wave(
        ticket,
        WaveRequest {
            wave: 10,
            difficulty: 2.35,
        },
    );
    oracle.request_advice(
        ticket,
        AdviceRequest {
            wave: 10,
            money: 40,
            lives: 12,
            towers: Vec::new(),
        },
    );

    let replies = wait_for_replies(&mut oracle, 2);

    assert_eq!(replies.len(), 2, "both requests must resolve");
    for reply in &replies {
        assert_eq!(reply.ticket(), ticket);
        match reply {
            OracleReply::Wave { plan, source, .. } => {
                assert_eq!(*source, PlanSource::Fallback);
                assert!(plan.briefing.contains("offline"));
            }
            OracleReply::Advice { text, .. } => assert!(!text.is_empty()),
        }
    }
}
