//! Protocol module - JSON message types for the headless driver
//!
//! One JSON object per line. Every message carries a `type` tag; inbound
//! messages carry a client-chosen `seq` that replies echo back.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use arrayvec::ArrayVec;
use serde_json::error::Category;

use crate::core::{GameSnapshot, Piece};
use crate::types::{
    Color, GameAction, LockEvent, PieceKind, SessionPhase, BOARD_HEIGHT, BOARD_WIDTH,
};

pub const PROTOCOL_VERSION: &str = "1.0.0";

/// Upper bound on actions in one command message.
pub const MAX_ACTIONS: usize = 32;

// ============== Driver -> Game Messages ==============

/// Action name as sent on the wire (`moveLeft`, `hardDrop`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionName(pub GameAction);

impl<'de> Deserialize<'de> for ActionName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = Cow::<'de, str>::deserialize(deserializer)?;
        GameAction::from_str(&s)
            .map(ActionName)
            .ok_or_else(|| serde::de::Error::custom(format_args!("unknown action {:?}", s)))
    }
}

impl Serialize for ActionName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionList(pub ArrayVec<ActionName, MAX_ACTIONS>);

impl ActionList {
    pub fn iter(&self) -> impl Iterator<Item = GameAction> + '_ {
        self.0.iter().map(|a| a.0)
    }
}

impl<'de> Deserialize<'de> for ActionList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct V;
        impl<'de> serde::de::Visitor<'de> for V {
            type Value = ActionList;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "an array of at most {} action names", MAX_ACTIONS)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut out = ArrayVec::<ActionName, MAX_ACTIONS>::new();
                while let Some(a) = seq.next_element::<ActionName>()? {
                    out.try_push(a)
                        .map_err(|_| serde::de::Error::custom("too many actions"))?;
                }
                Ok(ActionList(out))
            }
        }

        deserializer.deserialize_seq(V)
    }
}

/// Apply actions in order
#[derive(Debug, Clone, Deserialize)]
pub struct CommandMessage {
    pub seq: u64,
    pub actions: ActionList,
}

/// Advance the session clock
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TickMessage {
    pub seq: u64,
    pub elapsed_ms: u32,
}

/// Request an observation without changing anything
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ObserveMessage {
    pub seq: u64,
}

/// End the run
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct QuitMessage {
    pub seq: u64,
}

/// Parsed incoming message
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum InboundMessage {
    #[serde(rename = "command")]
    Command(CommandMessage),
    #[serde(rename = "tick")]
    Tick(TickMessage),
    #[serde(rename = "observe")]
    Observe(ObserveMessage),
    #[serde(rename = "quit")]
    Quit(QuitMessage),
}

impl InboundMessage {
    pub fn seq(&self) -> u64 {
        match self {
            InboundMessage::Command(m) => m.seq,
            InboundMessage::Tick(m) => m.seq,
            InboundMessage::Observe(m) => m.seq,
            InboundMessage::Quit(m) => m.seq,
        }
    }
}

// ============== Game -> Driver Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WelcomeType {
    #[serde(rename = "welcome")]
    Welcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    /// Not a JSON document
    #[serde(rename = "invalid_json")]
    InvalidJson,
    /// JSON, but not a message this driver understands
    #[serde(rename = "invalid_command")]
    InvalidCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardSize {
    pub width: u8,
    pub height: u8,
}

/// Sent once, before any observation
#[derive(Debug, Clone, Serialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: WelcomeType,
    pub protocol_version: &'static str,
    pub board: BoardSize,
    pub seed: u64,
}

/// Error reply to a line that could not be accepted
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
    pub code: ErrorCode,
    pub message: String,
}

/// Color tag serialized as `#rrggbb` without heap allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorTag(pub Color);

impl Serialize for ColorTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        let mut buf = [b'#'; 7];
        let mut v = self.0.hex();
        for i in 0..6 {
            buf[6 - i] = HEX[(v & 0x0f) as usize];
            v >>= 4;
        }
        // Only ASCII was written.
        let s = std::str::from_utf8(&buf).map_err(<S::Error as serde::ser::Error>::custom)?;
        serializer.serialize_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhaseTag(pub SessionPhase);

impl Serialize for PhaseTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindTag(pub PieceKind);

impl Serialize for KindTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub width: u8,
    pub height: u8,
    /// Row-major, top row first; `null` for empty cells.
    pub cells: [[Option<ColorTag>; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
}

#[derive(Debug, Clone, Serialize)]
pub struct PieceView {
    pub kind: KindTag,
    pub color: ColorTag,
    pub x: i8,
    pub y: i8,
    pub shape: Vec<Vec<u8>>,
}

impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: KindTag(piece.kind),
            color: ColorTag(piece.color),
            x: piece.x,
            y: piece.y,
            shape: piece.shape.to_rows(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LastEvent {
    pub lines_cleared: u32,
    pub points: u32,
    pub topped_out: bool,
}

impl From<LockEvent> for LastEvent {
    fn from(value: LockEvent) -> Self {
        Self {
            lines_cleared: value.lines_cleared,
            points: value.points,
            topped_out: value.topped_out,
        }
    }
}

/// Full session state, sent after every accepted message
#[derive(Debug, Clone, Serialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub phase: PhaseTag,
    pub episode_id: u32,
    pub board: BoardView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<PieceView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PieceView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ghost_y: Option<i8>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event: Option<LastEvent>,
}

// ============== Message Parsing ==============

/// Why a line was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub seq: Option<u64>,
    pub code: ErrorCode,
    pub message: String,
}

/// Parse one inbound line.
///
/// Malformed JSON maps to `invalid_json`; well-formed JSON with an unknown
/// type, missing fields, unknown actions or too many actions maps to
/// `invalid_command`. The `seq` is recovered when the line has one.
pub fn parse_message(line: &str) -> Result<InboundMessage, ParseError> {
    serde_json::from_str::<InboundMessage>(line).map_err(|e| {
        let code = match e.classify() {
            Category::Syntax | Category::Eof => ErrorCode::InvalidJson,
            Category::Data | Category::Io => ErrorCode::InvalidCommand,
        };

        #[derive(Deserialize)]
        struct SeqOnly {
            seq: Option<u64>,
        }
        let seq = serde_json::from_str::<SeqOnly>(line)
            .ok()
            .and_then(|s| s.seq);

        ParseError {
            seq,
            code,
            message: e.to_string(),
        }
    })
}

// ============== Utility Functions ==============

pub fn create_welcome(seed: u64) -> WelcomeMessage {
    WelcomeMessage {
        msg_type: WelcomeType::Welcome,
        protocol_version: PROTOCOL_VERSION,
        board: BoardSize {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
        },
        seed,
    }
}

pub fn create_error(seq: Option<u64>, code: ErrorCode, message: impl Into<String>) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        code,
        message: message.into(),
    }
}

pub fn create_observation(
    seq: u64,
    snap: &GameSnapshot,
    last_event: Option<LockEvent>,
) -> ObservationMessage {
    let mut cells = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    for (out_row, row) in cells.iter_mut().zip(snap.board.iter()) {
        for (out, cell) in out_row.iter_mut().zip(row.iter()) {
            *out = cell.map(ColorTag);
        }
    }

    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        phase: PhaseTag(snap.phase),
        episode_id: snap.episode_id,
        board: BoardView {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells,
        },
        current: snap.current.as_ref().map(PieceView::from),
        next: snap.next.as_ref().map(PieceView::from),
        ghost_y: snap.ghost_y,
        score: snap.score,
        level: snap.level,
        lines: snap.lines,
        drop_interval_ms: snap.drop_interval_ms,
        final_score: snap.final_score,
        last_event: last_event.map(LastEvent::from),
    }
}
