//! Single-line transfer strings for sharing a game record.
//!
//! Format: `deadgrid:v1:<W>x<H>:<base64 JSON record>`.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use dead_grid_system_replay::GameRecord;

const TRANSFER_DOMAIN: &str = "deadgrid";
const TRANSFER_VERSION: &str = "v1";

/// Identifier prefix emitted before the dimensions and payload.
pub(crate) const TRANSFER_HEADER: &str = "deadgrid:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Errors that can occur while encoding or decoding transfer strings.
#[derive(Debug, thiserror::Error)]
pub(crate) enum TransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("transfer string was empty")]
    EmptyPayload,
    /// The string ended before the named segment.
    #[error("transfer string is missing the {0}")]
    MissingSegment(&'static str),
    /// The string used an unexpected prefix segment.
    #[error("transfer prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The string used an unsupported version identifier.
    #[error("transfer version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed.
    #[error("could not parse grid dimensions '{0}'")]
    InvalidDimensions(String),
    /// The header dimensions disagree with the recorded grid.
    #[error("header declares {declared:?} but the recorded grid is {actual:?}")]
    DimensionMismatch {
        /// Width and height named in the header.
        declared: (u32, u32),
        /// Width and height of the decoded grid.
        actual: (u32, u32),
    },
    /// The base64 payload could not be decoded.
    #[error("could not decode transfer payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The payload was not a valid game record.
    #[error("could not parse transfer payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}

/// Encodes a record into a single line suitable for copy and paste.
pub(crate) fn encode(record: &GameRecord) -> Result<String, TransferError> {
    let (columns, rows) = grid_dimensions(record);
    let json = serde_json::to_vec(record).map_err(TransferError::InvalidPayload)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    Ok(format!("{TRANSFER_HEADER}:{columns}x{rows}:{encoded}"))
}

/// Decodes a record from its transfer string.
pub(crate) fn decode(value: &str) -> Result<GameRecord, TransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TransferError::EmptyPayload);
    }

    let mut parts = trimmed.split(FIELD_DELIMITER);
    let domain = parts.next().ok_or(TransferError::MissingSegment("prefix"))?;
    let version = parts
        .next()
        .ok_or(TransferError::MissingSegment("version"))?;
    let dimensions = parts
        .next()
        .ok_or(TransferError::MissingSegment("grid dimensions"))?;
    let payload = parts
        .next()
        .ok_or(TransferError::MissingSegment("payload"))?;

    if domain != TRANSFER_DOMAIN {
        return Err(TransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != TRANSFER_VERSION {
        return Err(TransferError::UnsupportedVersion(version.to_owned()));
    }

    let declared = parse_dimensions(dimensions)?;
    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(TransferError::InvalidEncoding)?;
    let record: GameRecord =
        serde_json::from_slice(&bytes).map_err(TransferError::InvalidPayload)?;

    let actual = grid_dimensions(&record);
    if actual != declared {
        return Err(TransferError::DimensionMismatch { declared, actual });
    }

    Ok(record)
}

fn grid_dimensions(record: &GameRecord) -> (u32, u32) {
    let columns = record.grid.first().map_or(0, Vec::len);
    (
        u32::try_from(columns).unwrap_or(u32::MAX),
        u32::try_from(record.grid.len()).unwrap_or(u32::MAX),
    )
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), TransferError> {
    let invalid = || TransferError::InvalidDimensions(dimensions.to_owned());
    let (columns, rows) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;

    let columns = columns.trim().parse::<u32>().map_err(|_| invalid())?;
    let rows = rows.trim().parse::<u32>().map_err(|_| invalid())?;

    if columns == 0 || rows == 0 {
        return Err(invalid());
    }

    Ok((columns, rows))
}
