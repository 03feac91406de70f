use include_dir::{include_dir, Dir};
use serde::de::DeserializeOwned;

use crate::error::DataError;

static DATA_DIR: Dir = include_dir!("src/data");

/// Deserialize a JSON file bundled from `src/data`.
pub fn embedded<T: DeserializeOwned>(file_name: &str) -> Result<T, DataError> {
    let contents = DATA_DIR
        .get_file(file_name)
        .and_then(|f| f.contents_utf8())
        .ok_or_else(|| DataError::Missing(file_name.to_string()))?;

    serde_json::from_str(contents).map_err(|source| DataError::Invalid {
        name: file_name.to_string(),
        source,
    })
}
