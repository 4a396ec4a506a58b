use std::array::TryFromSliceError;

/// [Result] alias for return types of the crate API
pub type Result<T> = std::result::Result<T, Error>;

/// Error enum type
///
/// Variants mirror the failure kinds of the control loop. Most are fatal for a single
/// agent (the agent is stopped and dropped from the swarm); a few are fatal for the
/// whole run.
#[derive(Debug)]
pub enum Error {
    /// Agent failed its pre-flight battery check. The agent is disabled, others continue.
    LowBattery(String),
    /// Agent has no tracker marker at pre-flight time. The agent is disabled, others continue.
    TrackerAbsent(String),
    /// Number of markers in the first tracker frame does not match the number of agents.
    /// Fatal for the whole swarm.
    MarkerCountMismatch { markers: usize, agents: usize },
    /// A position sample arrived with a timestamp not strictly greater than the last
    /// accepted one. Fatal for that agent.
    DuplicateTimestamp(String),
    /// Attitude or position envelope was violated. Fatal for that agent.
    EnvelopeViolation(String),
    /// The agent's marker id is missing from a tracker frame. Fatal for that agent.
    TrackingLost(String),
    /// A control law raised an exception. The agent is demoted to Standby, the error is
    /// latched and reported at shutdown.
    ControlLawFault(String),
    /// A new tracker frame arrived while the previous tick was still being dispatched.
    RealtimeOverrun,
    /// Battery dropped below threshold while the agent was flying; forces a landing.
    LowBatteryInFlight(String),
    /// Value conversion error. The String contains the reason.
    ConversionError(String),
    /// Vehicle link error. The String contains the reason.
    LinkError(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::LowBattery(name) => write!(f, "agent {} failed pre-flight battery check", name),
            Error::TrackerAbsent(name) => write!(f, "agent {} has no tracker marker", name),
            Error::MarkerCountMismatch { markers, agents } => write!(
                f,
                "marker count mismatch: {} markers for {} agents",
                markers, agents
            ),
            Error::DuplicateTimestamp(name) => {
                write!(f, "agent {} received a non-monotonic timestamp", name)
            }
            Error::EnvelopeViolation(name) => {
                write!(f, "agent {} violated its safety envelope", name)
            }
            Error::TrackingLost(name) => write!(f, "agent {} lost its tracker marker", name),
            Error::ControlLawFault(reason) => write!(f, "control law fault: {}", reason),
            Error::RealtimeOverrun => write!(f, "real-time tick overrun"),
            Error::LowBatteryInFlight(name) => write!(
                f,
                "agent {} battery dropped below threshold in flight",
                name
            ),
            Error::ConversionError(reason) => write!(f, "conversion error: {}", reason),
            Error::LinkError(reason) => write!(f, "vehicle link error: {}", reason),
        }
    }
}

impl std::error::Error for Error {}

impl From<TryFromSliceError> for Error {
    fn from(e: TryFromSliceError) -> Self {
        Self::ConversionError(format!("{:?}", e))
    }
}
