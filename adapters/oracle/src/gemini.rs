//! Request and response shapes of the `generateContent` endpoint.

use serde::Deserialize;
use serde_json::{json, Value};
use waypoint_defence_core::{EnemyKind, WavePlan};
use waypoint_defence_system_wave_generation::{sanitize_plan, COUNT_RANGE, INTERVAL_RANGE};

use crate::{AdviceRequest, OracleError, WaveRequest};

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AdvicePayload {
    advice: String,
}

pub(crate) fn wave_body(request: &WaveRequest) -> Value {
    let kinds: Vec<&str> = EnemyKind::ALL.iter().map(|kind| kind.name()).collect();
    let prompt = format!(
        "You design waves for a tower defense game. Produce wave {wave} at difficulty \
         multiplier {difficulty:.2}. Enemy types: basic (30 hp, average speed), fast \
         (15 hp, quick), tank (120 hp, slow), boss (500 hp, very slow; at most one boss \
         group, only on every tenth wave). Use {min_count} to {max_count} enemies per \
         group and spawn intervals of {min_interval} to {max_interval} frames at 60 \
         frames per second. Write a two sentence briefing for the player.",
        wave = request.wave,
        difficulty = request.difficulty,
        min_count = COUNT_RANGE.start(),
        max_count = COUNT_RANGE.end(),
        min_interval = INTERVAL_RANGE.start(),
        max_interval = INTERVAL_RANGE.end(),
    );

    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "briefing": { "type": "STRING" },
                    "groups": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "enemyType": { "type": "STRING", "enum": kinds },
                                "count": { "type": "INTEGER" },
                                "spawnInterval": { "type": "INTEGER" },
                                "hpMultiplier": { "type": "NUMBER" }
                            },
                            "required": ["enemyType", "count", "spawnInterval", "hpMultiplier"]
                        }
                    }
                },
                "required": ["briefing", "groups"]
            }
        }
    })
}

pub(crate) fn advice_body(request: &AdviceRequest) -> Value {
    let towers = if request.towers.is_empty() {
        "no towers".to_owned()
    } else {
        request
            .towers
            .iter()
            .map(|(kind, count)| format!("{count} {}", kind.name()))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let prompt = format!(
        "You are a terse tactical advisor in a tower defense game. Wave {wave} is about \
         to start. The player has {money} money, {lives} lives and {towers}. Give exactly \
         one sentence of advice.",
        wave = request.wave,
        money = request.money,
        lives = request.lives,
    );

    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": { "advice": { "type": "STRING" } },
                "required": ["advice"]
            }
        }
    })
}

pub(crate) fn build_request(
    url: String,
    api_key: &str,
    body: &Value,
) -> Result<ehttp::Request, OracleError> {
    let bytes = serde_json::to_vec(body).map_err(OracleError::Encode)?;
    let mut request = ehttp::Request::get(url);
    request.method = "POST".to_owned();
    request.body = bytes;
    request.headers = ehttp::Headers::new(&[
        ("Content-Type", "application/json"),
        ("Accept", "application/json"),
        ("x-goog-api-key", api_key),
    ]);
    Ok(request)
}

pub(crate) fn response_bytes(
    result: Result<ehttp::Response, String>,
) -> Result<Vec<u8>, OracleError> {
    let response = result.map_err(OracleError::Transport)?;
    if !response.ok {
        return Err(OracleError::Status {
            status: response.status,
            status_text: response.status_text,
        });
    }
    Ok(response.bytes)
}

/// Extracts the first generated text part from a `generateContent` response.
pub(crate) fn generated_text(bytes: &[u8]) -> Result<String, OracleError> {
    let response: GenerateResponse =
        serde_json::from_slice(bytes).map_err(OracleError::Malformed)?;
    response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .find_map(|part| part.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or(OracleError::MissingText)
}

pub(crate) fn parse_wave(bytes: &[u8]) -> Result<WavePlan, OracleError> {
    let text = generated_text(bytes)?;
    let plan: WavePlan = serde_json::from_str(&text).map_err(OracleError::Malformed)?;
    sanitize_plan(plan).ok_or(OracleError::EmptyPlan)
}

pub(crate) fn parse_advice(bytes: &[u8]) -> Result<String, OracleError> {
    let text = generated_text(bytes)?;
    let payload: AdvicePayload = serde_json::from_str(&text).map_err(OracleError::Malformed)?;
    let advice = payload.advice.trim();
    if advice.is_empty() {
        return Err(OracleError::MissingText);
    }
    Ok(advice.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_defence_core::{SpawnGroup, TowerKind};

    fn envelope(text: &str) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
        }))
        .expect("fixture encodes")
    }

    #[test]
    fn wave_payload_is_parsed_and_clamped() {
        let bytes = envelope(
            r#"{"briefing":"Tanks ahead.","groups":[
                {"enemyType":"tank","count":4,"spawnInterval":5,"hpMultiplier":1.2},
                {"enemyType":"basic","count":8,"spawnInterval":45,"hpMultiplier":1.0}
            ]}"#,
        );

        let plan = parse_wave(&bytes).expect("payload is valid");

        assert_eq!(plan.briefing, "Tanks ahead.");
        assert_eq!(
            plan.groups,
            vec![
                SpawnGroup::new(EnemyKind::Tank, 4, 10, 1.2),
                SpawnGroup::new(EnemyKind::Basic, 8, 45, 1.0),
            ]
        );
    }

    #[test]
    fn unknown_enemy_types_reject_the_whole_plan() {
        let bytes = envelope(
            r#"{"briefing":"?","groups":[{"enemyType":"dragon","count":1,"spawnInterval":30,"hpMultiplier":1.0}]}"#,
        );

        assert!(matches!(parse_wave(&bytes), Err(OracleError::Malformed(_))));
    }

    #[test]
    fn empty_group_lists_are_rejected() {
        let bytes = envelope(r#"{"briefing":"Nothing.","groups":[]}"#);

        assert!(matches!(parse_wave(&bytes), Err(OracleError::EmptyPlan)));
    }

    #[test]
    fn responses_without_candidates_carry_no_text() {
        let bytes = br#"{"candidates":[]}"#;

        assert!(matches!(
            generated_text(bytes),
            Err(OracleError::MissingText)
        ));
    }

    #[test]
    fn advice_is_trimmed() {
        let bytes = envelope(r#"{"advice":"  Build a Frost tower at the first corner.  "}"#);

        assert_eq!(
            parse_advice(&bytes).expect("advice parses"),
            "Build a Frost tower at the first corner."
        );
    }

    #[test]
    fn transport_failures_are_reported() {
        assert!(matches!(
            response_bytes(Err("connection refused".to_owned())),
            Err(OracleError::Transport(_))
        ));
    }

    #[test]
    fn advice_prompt_lists_tower_counts() {
        let body = advice_body(&AdviceRequest {
            wave: 3,
            money: 75,
            lives: 18,
            towers: vec![(TowerKind::Blaster, 2), (TowerKind::Frost, 1)],
        });

        let prompt = body["contents"][0]["parts"][0]["text"]
            .as_str()
            .expect("prompt is a string");
        assert!(prompt.contains("2 Blaster, 1 Frost"));
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn wave_schema_enumerates_enemy_names() {
        let body = wave_body(&WaveRequest {
            wave: 2,
            difficulty: 1.15,
        });

        let names = &body["generationConfig"]["responseSchema"]["properties"]["groups"]["items"]
            ["properties"]["enemyType"]["enum"];
        assert_eq!(names, &json!(["basic", "fast", "tank", "boss"]));
    }
}
