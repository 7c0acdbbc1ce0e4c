use crate::spatial::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
    #[serde(rename = "contestJurisdiction")]
    pub contest_jurisdiction: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    pub date: Option<String>,
    pub jurisdiction: Option<String>,
    pub candidates: Vec<JSValue>,
    pub voters: usize,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "xColumnIndex")]
    _x_column_index: Option<JSValue>,
    #[serde(rename = "yColumnIndex")]
    _y_column_index: Option<JSValue>,
    #[serde(rename = "hasHeaders")]
    pub has_headers: Option<bool>,
}

impl FileSource {
    /// A CSV source with the default columns.
    pub fn csv(file_path: &str) -> FileSource {
        FileSource {
            provider: "csv".to_string(),
            file_path: file_path.to_string(),
            _x_column_index: None,
            _y_column_index: None,
            has_headers: None,
        }
    }

    /// The column of the x coordinate, starting at 0.
    pub fn x_column_index(&self) -> SResult<usize> {
        column_index(&self._x_column_index, 1)
    }

    /// The column of the y coordinate, starting at 0.
    pub fn y_column_index(&self) -> SResult<usize> {
        column_index(&self._y_column_index, 2)
    }
}

// Column indexes are written starting at 1 in the configuration.
fn column_index(x: &Option<JSValue>, default: usize) -> SResult<usize> {
    let idx = if x.is_some() { read_js_int(x)? } else { default };
    ensure!(idx >= 1, ParsingJsonNumberSnafu {});
    Ok(idx - 1)
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioCandidate {
    pub id: Option<u32>,
    pub x: f64,
    pub y: f64,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioVoter {
    pub x: f64,
    pub y: f64,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    pub candidates: Vec<ScenarioCandidate>,
    pub voters: Option<Vec<ScenarioVoter>>,
    #[serde(rename = "voterFileSources")]
    pub voter_file_sources: Option<Vec<FileSource>>,
}

pub fn read_config(path: &str) -> SResult<ScenarioConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
}

pub fn read_summary(path: &str) -> SResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read content: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

fn read_js_int(x: &Option<JSValue>) -> SResult<usize> {
    match x {
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {}),
        Some(JSValue::String(s)) => s.parse::<usize>().ok().context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}
