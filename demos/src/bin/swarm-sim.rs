// -*- coding: utf-8 -*-
//
//     ||          ____  _ __
//  +------+      / __ )(_) /_______________ _____  ___
//  | 0xBC |     / __  / / __/ ___/ ___/ __ `/_  / / _ \
//  +------+    / /_/ / / /_/ /__/ /  / /_/ / / /_/  __/
//   ||  ||    /_____/_/\__/\___/_/   \__,_/ /___/\___/
//
//  Copyright (C) 2025 Bitcraze AB
//
//  This program is free software; you can redistribute it and/or
//  modify it under the terms of the GNU General Public License
//  as published by the Free Software Foundation; either version 2
//  of the License, or (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//  You should have received a copy of the GNU General Public License
//  along with this program. If not, see <https://www.gnu.org/licenses/>.

// Demo that flies three simulated vehicles through takeoff, standby and land using a
// synthetic tracker feed instead of a real motion-capture system.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use swarm_core::agent::{Agent, AgentConfig};
use swarm_core::error::Result;
use swarm_core::geometry::Point3;
use swarm_core::link::VehicleLink;
use swarm_core::marker::{Frame, Marker};
use swarm_core::subsystems::avoidance::Bounds;
use swarm_core::swarm::Swarm;

struct LoggingLink {
    name: String,
}

#[async_trait]
impl VehicleLink for LoggingLink {
    async fn send_position_setpoint(&self, x: f64, y: f64, z: f64, yaw_deg: f64) -> Result<()> {
        println!("{}: position setpoint ({:.2}, {:.2}, {:.2}) yaw={:.1}", self.name, x, y, z, yaw_deg);
        Ok(())
    }

    async fn send_velocity_world_setpoint(
        &self,
        vx: f64,
        vy: f64,
        vz: f64,
        yaw_rate_deg_per_s: f64,
    ) -> Result<()> {
        println!(
            "{}: velocity setpoint ({:.2}, {:.2}, {:.2}) yaw_rate={:.1}",
            self.name, vx, vy, vz, yaw_rate_deg_per_s
        );
        Ok(())
    }

    async fn send_setpoint(
        &self,
        roll_deg: f64,
        pitch_deg: f64,
        yaw_rate_deg_per_s: f64,
        thrust: u16,
    ) -> Result<()> {
        println!(
            "{}: attitude setpoint roll={:.1} pitch={:.1} yaw_rate={:.1} thrust={}",
            self.name, roll_deg, pitch_deg, yaw_rate_deg_per_s, thrust
        );
        Ok(())
    }

    async fn send_stop_setpoint(&self) -> Result<()> {
        println!("{}: stop", self.name);
        Ok(())
    }

    async fn send_extpos(&self, _x: f64, _y: f64, _z: f64) -> Result<()> {
        Ok(())
    }
}

fn agent_config(name: &str, x: f64, y: f64) -> AgentConfig {
    AgentConfig {
        name: name.to_string(),
        link_address: format!("sim://{}", name),
        max_roll_deg: 20.0,
        max_pitch_deg: 20.0,
        position_min: Point3::new(-2.0, -2.0, 0.0),
        position_max: Point3::new(2.0, 2.0, 2.0),
        takeoff_height: 0.5,
        initial_position: Point3::new(x, y, 0.0),
        consensus_connectivity: HashSet::new(),
        xy_formation_offset: (0.0, 0.0),
        peers_to_avoid: HashSet::new(),
        manual: false,
        enabled: true,
    }
}

/// Builds a synthetic frame whose markers sit at each agent's current live position,
/// standing in for the real tracker transport.
fn synthetic_frame(swarm: &Swarm, names: &[&str], timestamp_us: u64) -> Frame {
    let markers = names
        .iter()
        .enumerate()
        .map(|(id, name)| {
            let position = swarm.agent(name).map(|a| a.live.position).unwrap_or_default();
            Marker::new(id as u32, position.x * 1000.0, position.y * 1000.0, position.z * 1000.0)
        })
        .collect();
    Frame::new(timestamp_us, markers)
}

#[tokio::main]
async fn main() -> Result<()> {
    let bounds = Bounds {
        x_min: -2.0,
        x_max: 2.0,
        y_min: -2.0,
        y_max: 2.0,
    };
    let mut swarm = Swarm::new(bounds);

    let names = ["cf1", "cf2", "cf3"];
    let positions = [(-0.5, 0.0), (0.0, 0.0), (0.5, 0.0)];

    for (name, (x, y)) in names.iter().zip(positions.iter()) {
        let mut agent = Agent::new(agent_config(name, *x, *y));
        agent.battery_ok = true;
        agent.position_ok = true;
        let link: Arc<dyn VehicleLink> = Arc::new(LoggingLink { name: name.to_string() });
        swarm.add_agent(agent, link)?;
    }

    // First frame performs the initial marker assignment; mark every agent ready.
    let initial = synthetic_frame(&swarm, &names, 1);
    swarm.dispatch_tick(&initial, 0.05).await?;

    for name in &names {
        swarm.command_takeoff(name);
    }

    let mut timestamp_us = 2u64;
    for tick in 0..20u32 {
        let frame = synthetic_frame(&swarm, &names, timestamp_us);
        swarm.dispatch_tick(&frame, 0.05).await?;
        timestamp_us += 50_000;

        if tick == 10 {
            for name in &names {
                swarm.command_land(name);
            }
        }
        sleep(Duration::from_millis(10)).await;
    }

    Ok(())
}
