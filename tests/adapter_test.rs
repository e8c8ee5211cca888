//! Headless driver tests - full transcripts through `run_headless`

use serde_json::Value;

use blockfall::adapter::{run_headless, HeadlessSummary};
use blockfall::core::Session;
use blockfall::types::SessionPhase;

fn drive(session: &mut Session, lines: &[&str]) -> (HeadlessSummary, Vec<Value>) {
    let mut input = lines.join("\n");
    input.push('\n');
    let mut out = Vec::new();
    let summary = run_headless(session, input.as_bytes(), &mut out).unwrap();
    let replies = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    (summary, replies)
}

#[test]
fn full_game_over_transcript() {
    let mut session = Session::new(404);
    let mut lines = vec![r#"{"type":"command","seq":0,"actions":["start"]}"#.to_string()];
    for seq in 1..=200 {
        lines.push(format!(
            r#"{{"type":"command","seq":{},"actions":["hardDrop"]}}"#,
            seq
        ));
    }
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let (summary, replies) = drive(&mut session, &refs);

    assert_eq!(summary.phase, SessionPhase::GameOver);
    let last = replies.last().unwrap();
    assert_eq!(last["phase"], "game_over");
    assert_eq!(last["final_score"], last["score"]);

    // Exactly one observation reports the top-out.
    let topped: Vec<_> = replies
        .iter()
        .filter(|r| r["last_event"]["topped_out"] == true)
        .collect();
    assert_eq!(topped.len(), 1);
}

#[test]
fn same_seed_same_transcript() {
    let script = [
        r#"{"type":"command","seq":1,"actions":["start","moveLeft","rotate","softDrop"]}"#,
        r#"{"type":"tick","seq":2,"elapsed_ms":1000}"#,
        r#"{"type":"command","seq":3,"actions":["hardDrop","moveRight","hardDrop"]}"#,
        r#"{"type":"observe","seq":4}"#,
    ];
    let (_, a) = drive(&mut Session::new(7), &script);
    let (_, b) = drive(&mut Session::new(7), &script);
    assert_eq!(a, b);
}

#[test]
fn pause_blocks_moves_until_resumed() {
    let mut session = Session::new(12);
    let (_, replies) = drive(
        &mut session,
        &[
            r#"{"type":"command","seq":1,"actions":["start","pause"]}"#,
            r#"{"type":"command","seq":2,"actions":["moveLeft","moveLeft"]}"#,
            r#"{"type":"tick","seq":3,"elapsed_ms":5000}"#,
            r#"{"type":"command","seq":4,"actions":["pause","moveLeft"]}"#,
        ],
    );

    assert_eq!(replies[1]["phase"], "paused");
    assert_eq!(replies[2]["current"], replies[1]["current"]);
    assert_eq!(replies[3]["current"], replies[1]["current"]);
    assert_eq!(replies[4]["phase"], "running");
    assert_eq!(
        replies[4]["current"]["x"].as_i64().unwrap(),
        replies[1]["current"]["x"].as_i64().unwrap() - 1
    );
}

#[test]
fn restart_bumps_episode() {
    let mut session = Session::new(12);
    let (summary, replies) = drive(
        &mut session,
        &[
            r#"{"type":"command","seq":1,"actions":["start","softDrop"]}"#,
            r#"{"type":"command","seq":2,"actions":["restart"]}"#,
        ],
    );
    assert_eq!(replies[1]["score"], 1);
    assert_eq!(replies[1]["episode_id"], 0);
    assert_eq!(replies[2]["score"], 0);
    assert_eq!(replies[2]["episode_id"], 1);
    assert_eq!(summary.episode_id, 1);
}

#[test]
fn observation_board_uses_color_tags() {
    let mut session = Session::new(3);
    let (_, replies) = drive(
        &mut session,
        &[r#"{"type":"command","seq":1,"actions":["start","hardDrop"]}"#],
    );
    let cells = replies[1]["board"]["cells"].as_array().unwrap();
    let tags: Vec<&str> = cells
        .iter()
        .flat_map(|row| row.as_array().unwrap())
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(tags.len(), 4);
    for tag in tags {
        assert!(tag.starts_with('#') && tag.len() == 7, "bad tag {}", tag);
    }
}
