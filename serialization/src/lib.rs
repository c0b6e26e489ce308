mod flatten;

use formula_tree::{
    document::Document,
    formula::{FormulaLine, InvalidContent},
    settings::LayoutSettings,
};
use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

pub use flatten::{flatten_document, flatten_line};

pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub enum SerializedDataType {
    JsonFormula,
}

#[derive(Deserialize, Serialize)]
struct SerializedData<T> {
    version: u32,
    data: T,
}

#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("Could not serialize as JSON")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported format version {0}")]
    UnsupportedVersion(u32),
    #[error("Could not detect the data format")]
    UnknownFormat,
    #[error("Character {0:?} is not allowed in a formula")]
    InvalidSymbol(char),
    #[error("Function without a name")]
    EmptyFunctionName,
}

impl From<InvalidContent> for SerializationError {
    fn from(value: InvalidContent) -> Self {
        match value {
            InvalidContent::Character(value) => SerializationError::InvalidSymbol(value),
            InvalidContent::EmptyFunctionName => SerializationError::EmptyFunctionName,
        }
    }
}

pub fn serialize_lines(
    lines: &[FormulaLine],
    data_type: SerializedDataType,
) -> Result<String, SerializationError> {
    let data = &SerializedData {
        version: CURRENT_VERSION,
        data: lines,
    };
    match data_type {
        SerializedDataType::JsonFormula => Ok(serde_json::to_string(data)?),
    }
}

pub fn deserialize_lines(
    data: &str,
    data_type: Option<SerializedDataType>,
) -> Result<Vec<FormulaLine>, SerializationError> {
    let data_type = match data_type {
        Some(data_type) => data_type,
        None => detect_data_type(data)?,
    };
    match data_type {
        SerializedDataType::JsonFormula => {
            let data: SerializedData<Vec<FormulaLine>> = serde_json::from_str(data)?;
            check_version(data.version)?;
            check_content(&data.data)?;
            Ok(data.data)
        }
    }
}

/// Saves every base line of the document
pub fn serialize_document(document: &Document) -> Result<String, SerializationError> {
    serialize_lines(&document.to_formula(), SerializedDataType::JsonFormula)
}

pub fn deserialize_document(
    data: &str,
    settings: LayoutSettings,
) -> Result<Document, SerializationError> {
    let lines = deserialize_lines(data, None)?;
    Ok(Document::from_formula(settings, &lines))
}

/// Reads settings from JSON. Missing fields get their default values.
pub fn load_settings<T: DeserializeOwned>(data: &str) -> Result<T, SerializationError> {
    Ok(serde_json::from_str(data)?)
}

fn detect_data_type(data: &str) -> Result<SerializedDataType, SerializationError> {
    let value: serde_json::Value =
        serde_json::from_str(data).map_err(|_| SerializationError::UnknownFormat)?;
    let is_envelope = value.get("version").map_or(false, |v| v.is_u64())
        && value.get("data").map_or(false, |v| v.is_array());
    if is_envelope {
        Ok(SerializedDataType::JsonFormula)
    } else {
        Err(SerializationError::UnknownFormat)
    }
}

fn check_version(version: u32) -> Result<(), SerializationError> {
    if version == 0 || version > CURRENT_VERSION {
        warn!("Refusing to load data with version {}", version);
        return Err(SerializationError::UnsupportedVersion(version));
    }
    Ok(())
}

fn check_content(lines: &[FormulaLine]) -> Result<(), SerializationError> {
    match lines.iter().find_map(FormulaLine::find_invalid) {
        Some(invalid) => {
            warn!("Refusing to load invalid content {:?}", invalid);
            Err(invalid.into())
        }
        None => Ok(()),
    }
}
