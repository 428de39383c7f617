#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use maze_crawler_core::DifficultyId;
use serde::{Deserialize, Serialize};

const SNAPSHOT_DOMAIN: &str = "crawl";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded run payload.
pub(crate) const RUN_CODE_HEADER: &str = "crawl:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Everything needed to reproduce a run: grid configuration, floor,
/// difficulty, and the session seed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct RunSnapshot {
    /// Number of tile columns contained in the grid.
    pub columns: u32,
    /// Number of tile rows contained in the grid.
    pub rows: u32,
    /// Length of a single tile edge expressed in world units.
    pub tile_length: f32,
    /// One-based floor number the run starts on.
    pub floor: u32,
    /// Difficulty selected for the session.
    pub difficulty: DifficultyId,
    /// Session seed every floor derives from.
    pub seed: u64,
}

impl RunSnapshot {
    /// Encodes the snapshot into a single-line string suitable for
    /// clipboard transfer.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = SerializableSnapshot {
            tile_length: self.tile_length,
            floor: self.floor,
            difficulty: self.difficulty,
            seed: self.seed,
        };
        let json = serde_json::to_vec(&payload).expect("run snapshot serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{RUN_CODE_HEADER}:{}x{}:{encoded}", self.columns, self.rows)
    }

    /// Decodes a snapshot from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, RunCodeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(RunCodeError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(RunCodeError::MissingPrefix)?;
        let version = parts.next().ok_or(RunCodeError::MissingVersion)?;
        let dimensions = parts.next().ok_or(RunCodeError::MissingDimensions)?;
        let payload = parts.next().ok_or(RunCodeError::MissingPayload)?;

        if domain != SNAPSHOT_DOMAIN {
            return Err(RunCodeError::InvalidPrefix(domain.to_owned()));
        }
        if version != SNAPSHOT_VERSION {
            return Err(RunCodeError::UnsupportedVersion(version.to_owned()));
        }

        let (columns, rows) = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(RunCodeError::InvalidEncoding)?;
        let decoded: SerializableSnapshot =
            serde_json::from_slice(&bytes).map_err(RunCodeError::InvalidPayload)?;

        Ok(Self {
            columns,
            rows,
            tile_length: decoded.tile_length,
            floor: decoded.floor,
            difficulty: decoded.difficulty,
            seed: decoded.seed,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
struct SerializableSnapshot {
    tile_length: f32,
    floor: u32,
    difficulty: DifficultyId,
    seed: u64,
}

/// Errors that can occur while decoding run-code strings.
#[derive(Debug)]
pub(crate) enum RunCodeError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded run.
    MissingPrefix,
    /// The encoded run did not contain a version segment.
    MissingVersion,
    /// The encoded run did not include grid dimensions.
    MissingDimensions,
    /// The encoded run did not include the payload segment.
    MissingPayload,
    /// The encoded run used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded run used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed from the encoded run.
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for RunCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "run code was empty"),
            Self::MissingPrefix => write!(f, "run code is missing the prefix"),
            Self::MissingVersion => write!(f, "run code is missing the version"),
            Self::MissingDimensions => write!(f, "run code is missing the grid dimensions"),
            Self::MissingPayload => write!(f, "run code is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "run code prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "run code version '{version}' is not supported")
            }
            Self::InvalidDimensions(dimensions) => {
                write!(f, "could not parse grid dimensions '{dimensions}'")
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode run payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse run payload: {error}")
            }
        }
    }
}

impl Error for RunCodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), RunCodeError> {
    let (columns, rows) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| RunCodeError::InvalidDimensions(dimensions.to_owned()))?;

    let columns = columns
        .trim()
        .parse::<u32>()
        .map_err(|_| RunCodeError::InvalidDimensions(dimensions.to_owned()))?;
    let rows = rows
        .trim()
        .parse::<u32>()
        .map_err(|_| RunCodeError::InvalidDimensions(dimensions.to_owned()))?;

    if columns == 0 || rows == 0 {
        return Err(RunCodeError::InvalidDimensions(dimensions.to_owned()));
    }

    Ok((columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_default_run() {
        let snapshot = RunSnapshot {
            columns: 20,
            rows: 20,
            tile_length: 64.0,
            floor: 3,
            difficulty: DifficultyId::Hard,
            seed: 0xdead_beef,
        };

        let encoded = snapshot.encode();
        assert!(encoded.starts_with(&format!("{RUN_CODE_HEADER}:20x20:")));

        let decoded = RunSnapshot::decode(&encoded).expect("run code decodes");
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn rejects_foreign_prefixes() {
        let error = RunSnapshot::decode("maze:v1:20x20:e30").expect_err("prefix must be rejected");
        assert!(matches!(error, RunCodeError::InvalidPrefix(prefix) if prefix == "maze"));
    }

    #[test]
    fn rejects_unsupported_versions() {
        let error = RunSnapshot::decode("crawl:v9:20x20:e30").expect_err("version must be rejected");
        assert!(matches!(error, RunCodeError::UnsupportedVersion(version) if version == "v9"));
    }

    #[test]
    fn rejects_garbage_dimensions() {
        let error =
            RunSnapshot::decode("crawl:v1:20by20:e30").expect_err("dimensions must be rejected");
        assert!(matches!(error, RunCodeError::InvalidDimensions(_)));
    }

    #[test]
    fn rejects_empty_codes() {
        assert!(matches!(
            RunSnapshot::decode("   "),
            Err(RunCodeError::EmptyPayload)
        ));
    }
}
