//! Parameters file: CSV-like, one line per agent (spec §6).
//!
//! Read at UI boot, written back on submit. Round-trips byte-equivalent semantic content.

use crate::error::{Error, Result};

/// One agent's row in the parameters file.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentParams {
    pub name: String,
    pub init_x: f64,
    pub init_y: f64,
    pub init_z: f64,
    pub takeoff_z: f64,
    pub connectivity: Vec<String>,
    pub offset_x: f64,
    pub offset_y: f64,
    pub manual: bool,
    pub enabled: bool,
}

fn parse_bool(field: &str) -> Result<bool> {
    match field.trim() {
        "1" | "true" | "True" => Ok(true),
        "0" | "false" | "False" => Ok(false),
        other => Err(Error::ConversionError(format!(
            "invalid boolean field: {}",
            other
        ))),
    }
}

fn parse_f64(field: &str) -> Result<f64> {
    field
        .trim()
        .parse()
        .map_err(|_| Error::ConversionError(format!("invalid numeric field: {}", field)))
}

/// Parses one parameters-file line into an [AgentParams].
pub fn parse_line(line: &str) -> Result<AgentParams> {
    let fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();
    if fields.len() != 10 {
        return Err(Error::ConversionError(format!(
            "expected 10 fields, got {}",
            fields.len()
        )));
    }
    let connectivity = if fields[5].is_empty() {
        Vec::new()
    } else {
        fields[5].split(';').map(|s| s.to_string()).collect()
    };
    Ok(AgentParams {
        name: fields[0].to_string(),
        init_x: parse_f64(fields[1])?,
        init_y: parse_f64(fields[2])?,
        init_z: parse_f64(fields[3])?,
        takeoff_z: parse_f64(fields[4])?,
        connectivity,
        offset_x: parse_f64(fields[6])?,
        offset_y: parse_f64(fields[7])?,
        manual: parse_bool(fields[8])?,
        enabled: parse_bool(fields[9])?,
    })
}

/// Parses a whole parameters file, one [AgentParams] per non-empty line.
pub fn parse(contents: &str) -> Result<Vec<AgentParams>> {
    contents.lines().filter(|l| !l.trim().is_empty()).map(parse_line).collect()
}

/// Serializes one [AgentParams] back to its line form.
pub fn format_line(params: &AgentParams) -> String {
    format!(
        "{}, {}, {}, {}, {}, {}, {}, {}, {}, {}",
        params.name,
        params.init_x,
        params.init_y,
        params.init_z,
        params.takeoff_z,
        params.connectivity.join(";"),
        params.offset_x,
        params.offset_y,
        params.manual as u8,
        params.enabled as u8,
    )
}

/// Serializes a whole list of rows back to parameters-file form.
pub fn format(rows: &[AgentParams]) -> String {
    rows.iter()
        .map(format_line)
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}
