//! Telemetry file: one CSV row per tick per agent (spec §6).
//!
//! Fields not produced by the current mode's control law are written as the literal
//! string `None`, matching the source format.

/// One telemetry row. Commanded fields are optional since not every mode produces all of
/// them (e.g. the position-setpoint modes never produce an attitude/thrust command).
#[derive(Debug, Clone, Copy, Default)]
pub struct TelemetryRow {
    pub name_index: usize,
    pub timestamp_us: u64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw_deg: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub vx_c: Option<f64>,
    pub vy_c: Option<f64>,
    pub vz_c: Option<f64>,
    pub roll_c: Option<f64>,
    pub pitch_c: Option<f64>,
    pub yaw_rate_c: Option<f64>,
    pub thrust_c: Option<f64>,
}

fn field(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "None".to_string(),
    }
}

/// Formats one row as a CSV line. `name` is the agent's name, passed separately so the
/// row itself need not own a string.
pub fn format_row(name: &str, row: &TelemetryRow) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
        name,
        row.timestamp_us,
        row.x,
        row.y,
        row.z,
        row.yaw_deg,
        row.vx,
        row.vy,
        row.vz,
        field(row.vx_c),
        field(row.vy_c),
        field(row.vz_c),
        field(row.roll_c),
        field(row.pitch_c),
        field(row.yaw_rate_c),
        field(row.thrust_c),
    )
}

/// A single-writer, per-row-flush CSV telemetry writer.
pub struct TelemetryWriter<W: std::io::Write> {
    out: W,
}

impl<W: std::io::Write> TelemetryWriter<W> {
    pub fn new(out: W) -> Self {
        TelemetryWriter { out }
    }

    pub fn write_row(&mut self, name: &str, row: &TelemetryRow) -> std::io::Result<()> {
        writeln!(self.out, "{}", format_row(name, row))?;
        self.out.flush()
    }
}
