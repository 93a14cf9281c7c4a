//! Request/response bridge between a front end and the repositories.
//!
//! A request names a channel `<verb>-<game>-score-data` and carries an
//! optional JSON payload; the answer is `{"ok": ...}` or `{"error": "..."}`.
//! `Bridge::serve` speaks this as line-delimited JSON.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};
use tracing::{debug, warn};

use crate::board::{BoardEvent, BoardState};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::game::{ChartKey, GameKind, ScoreQuery};
use crate::repository::GameRepository;
use crate::store::{SqliteStore, Store};

const CHANNEL_SUFFIX: &str = "-score-data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Verb {
    Fetch,
    Insert,
    Update,
    Remove,
}

/// Parsed channel name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Channel {
    pub verb: Verb,
    pub game: GameKind,
}

impl Channel {
    pub fn new(verb: Verb, game: GameKind) -> Self {
        Self { verb, game }
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || Error::UnknownChannel(s.to_string());
        let (verb, game) = s
            .strip_suffix(CHANNEL_SUFFIX)
            .and_then(|rest| rest.split_once('-'))
            .ok_or_else(unknown)?;
        Ok(Self {
            verb: verb.parse().map_err(|_| unknown())?,
            game: game.parse().map_err(|_| unknown())?,
        })
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb: &'static str = self.verb.into();
        write!(f, "{}-{}{}", verb, self.game, CHANNEL_SUFFIX)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeRequest {
    pub channel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl BridgeRequest {
    pub fn new(channel: Channel, payload: Option<serde_json::Value>) -> Self {
        Self {
            channel: channel.to_string(),
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeResponse {
    Ok(serde_json::Value),
    Error(String),
}

impl BridgeResponse {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

/// Both games' repositories behind one dispatcher
pub struct Bridge<S> {
    arcaea: GameRepository<S>,
    chunithm: GameRepository<S>,
}

impl Bridge<SqliteStore> {
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self::new(
            GameRepository::open(config, GameKind::Arcaea)?,
            GameRepository::open(config, GameKind::Chunithm)?,
        ))
    }
}

impl<S: Store> Bridge<S> {
    pub fn new(arcaea: GameRepository<S>, chunithm: GameRepository<S>) -> Self {
        Self { arcaea, chunithm }
    }

    pub fn repository(&self, game: GameKind) -> &GameRepository<S> {
        match game {
            GameKind::Arcaea => &self.arcaea,
            GameKind::Chunithm => &self.chunithm,
        }
    }

    /// Run the repository call a request names
    pub fn dispatch(&self, request: &BridgeRequest) -> Result<BoardEvent> {
        let channel: Channel = request.channel.parse()?;
        let game = channel.game;
        let repository = self.repository(game);
        debug!(%channel, "Dispatching request");

        let event = match channel.verb {
            Verb::Fetch => BoardEvent::Initialized {
                game,
                records: repository.fetch_all()?,
            },
            Verb::Insert => BoardEvent::Inserted {
                game,
                record: repository.insert(&payload::<ScoreQuery>(request)?)?,
            },
            Verb::Update => BoardEvent::Updated {
                game,
                record: repository.update(&payload::<ScoreQuery>(request)?)?,
            },
            Verb::Remove => BoardEvent::Removed {
                game,
                record: repository.remove(&payload::<ChartKey>(request)?)?,
            },
        };
        Ok(event)
    }

    pub fn handle(&self, request: &BridgeRequest) -> BridgeResponse {
        match self.dispatch(request).and_then(|event| event_body(&event)) {
            Ok(body) => BridgeResponse::Ok(body),
            Err(e) => {
                warn!("{} failed: {}", request.channel, e);
                BridgeResponse::Error(e.to_string())
            }
        }
    }

    /// Answer one request per input line until EOF, keeping a `BoardState`
    /// in step with every successful call.
    ///
    /// Malformed lines get an error response; blank lines are skipped.
    pub fn serve<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<BoardState> {
        let mut state = BoardState::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<BridgeRequest>(&line) {
                Ok(request) => match self.dispatch(&request) {
                    Ok(event) => {
                        let response = match event_body(&event) {
                            Ok(body) => BridgeResponse::Ok(body),
                            Err(e) => BridgeResponse::Error(e.to_string()),
                        };
                        state = match state.clone().apply(event) {
                            Ok(next) => next,
                            Err(e) => {
                                warn!("Board state left unchanged: {}", e);
                                state
                            }
                        };
                        response
                    }
                    Err(e) => {
                        warn!("{} failed: {}", request.channel, e);
                        BridgeResponse::Error(e.to_string())
                    }
                },
                Err(e) => BridgeResponse::Error(Error::from(e).to_string()),
            };

            serde_json::to_writer(&mut writer, &response)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }

        Ok(state)
    }
}

fn payload<T: serde::de::DeserializeOwned>(request: &BridgeRequest) -> Result<T> {
    let value = request
        .payload
        .clone()
        .ok_or_else(|| Error::Parse(format!("{}: missing payload", request.channel)))?;
    Ok(serde_json::from_value(value)?)
}

/// The data a front end receives: the list for a fetch, the row otherwise
fn event_body(event: &BoardEvent) -> Result<serde_json::Value> {
    let body = match event {
        BoardEvent::Initialized { records, .. } => serde_json::to_value(records)?,
        BoardEvent::Inserted { record, .. }
        | BoardEvent::Updated { record, .. }
        | BoardEvent::Removed { record, .. } => serde_json::to_value(record)?,
    };
    Ok(body)
}
