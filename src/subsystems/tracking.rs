//! Marker-to-agent tracking and identity maintenance (spec §4.1).

use std::collections::HashMap;

use crate::agent::Agent;
use crate::error::{Error, Result};
use crate::marker::Frame;

/// Maximum distance, in meters, between a marker and an agent's declared initial position
/// for the initial assignment to accept it. Beyond this the marker-to-agent match is
/// considered ambiguous and the agent is stopped rather than flown on a possibly wrong
/// marker.
pub const MAX_INITIAL_ASSIGNMENT_DISTANCE_M: f64 = 0.50;

/// Resolves tracker markers to named agents and maintains that assignment frame to frame.
#[derive(Debug, Default)]
pub struct TrackerMatcher;

impl TrackerMatcher {
    pub fn new() -> Self {
        TrackerMatcher
    }

    /// Initial nearest-neighbor assignment of the first frame's markers to agents, by 3D
    /// Euclidean distance to each agent's declared initial position.
    ///
    /// Fails the whole swarm if the marker count does not match the agent count. Ties are
    /// broken by input order: the first marker encountered wins.
    ///
    /// Returns the names of agents whose nearest marker was farther than
    /// [MAX_INITIAL_ASSIGNMENT_DISTANCE_M]; callers should stop those agents.
    pub fn initial_assignment(
        &self,
        frame: &Frame,
        agents: &mut HashMap<String, Agent>,
    ) -> Result<Vec<String>> {
        if frame.markers.len() != agents.len() {
            return Err(Error::MarkerCountMismatch {
                markers: frame.markers.len(),
                agents: agents.len(),
            });
        }

        let mut taken_markers: Vec<u32> = Vec::new();
        let mut ambiguous = Vec::new();

        let mut names: Vec<String> = agents.keys().cloned().collect();
        names.sort();
        for name in names {
            let initial = agents[&name].config.initial_position;
            let mut best: Option<(u32, f64)> = None;
            for marker in &frame.markers {
                if taken_markers.contains(&marker.id) {
                    continue;
                }
                let d = marker.position_m().distance(&initial);
                if best.map(|(_, bd)| d < bd).unwrap_or(true) {
                    best = Some((marker.id, d));
                }
            }
            if let Some((marker_id, distance)) = best {
                taken_markers.push(marker_id);
                let agent = agents.get_mut(&name).unwrap();
                agent.live.marker_id = Some(marker_id);
                if distance > MAX_INITIAL_ASSIGNMENT_DISTANCE_M {
                    ambiguous.push(name);
                }
            }
        }

        Ok(ambiguous)
    }

    /// Per-frame tracking update: for each enabled agent, looks up its stored marker id
    /// in `frame` and updates position/velocity, or reports the agent as tracking-lost.
    ///
    /// Returns the names of agents that lost tracking this frame; the caller transitions
    /// them to `NotFlying` and drops them from the swarm.
    pub fn track_frame(&self, frame: &Frame, agents: &mut HashMap<String, Agent>) -> Vec<String> {
        let mut lost = Vec::new();
        for (name, agent) in agents.iter_mut() {
            if !agent.config.enabled {
                continue;
            }
            let marker_id = match agent.live.marker_id {
                Some(id) => id,
                None => continue,
            };
            match frame.find(marker_id) {
                Some(marker) => {
                    let ok = agent.update_position(frame.timestamp_us, marker_id, marker.position_m());
                    if !ok {
                        agent.fail(format!(
                            "{}",
                            Error::DuplicateTimestamp(name.clone())
                        ));
                        lost.push(name.clone());
                    }
                }
                None => {
                    agent.fail(format!("{}", Error::TrackingLost(name.clone())));
                    lost.push(name.clone());
                }
            }
        }
        lost
    }
}
