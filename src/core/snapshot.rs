use super::model::Model;
use super::types::{LoadId, ResourceId, SimulationTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSnapshot {
    pub id: LoadId,
    pub procedure: usize,
    /// Last confirmed step, None before the first one
    pub step: Option<usize>,
    pub held_tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub id: ResourceId,
    pub tag: String,
    pub occupied_by: Option<LoadId>,
    pub pending: Vec<LoadId>,
}

/// Read-only view of the model at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: SimulationTime,
    pub loads: Vec<LoadSnapshot>,
    pub resources: Vec<ResourceSnapshot>,
}

impl Snapshot {
    pub fn capture(model: &Model, time: SimulationTime) -> Self {
        let loads = model
            .progress()
            .iter()
            .map(|(id, position)| LoadSnapshot {
                id,
                procedure: position.procedure,
                step: position.step,
                held_tags: model
                    .ledger()
                    .held_by(id)
                    .filter_map(|res| model.resource(res).map(|r| r.tag.clone()))
                    .collect(),
            })
            .collect();

        let resources = model
            .scenario()
            .resources
            .iter()
            .map(|res| ResourceSnapshot {
                id: res.id,
                tag: res.tag.clone(),
                occupied_by: model.ledger().holder(res.id),
                pending: model.pending().waiting_on(res.id).collect(),
            })
            .collect();

        Self {
            time,
            loads,
            resources,
        }
    }

    pub fn load(&self, id: LoadId) -> Option<&LoadSnapshot> {
        self.loads.iter().find(|l| l.id == id)
    }

    pub fn resource(&self, id: ResourceId) -> Option<&ResourceSnapshot> {
        self.resources.iter().find(|r| r.id == id)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.time)?;
        for load in &self.loads {
            let step = load.step.map_or(-1, |s| s as i64);
            write!(f, "Id: {}\tP_Idx: {}\tS_Idx: {}\t", load.id, load.procedure, step)?;
            for tag in &load.held_tags {
                write!(f, "{} ", tag)?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;
        for res in &self.resources {
            let occupied = res
                .occupied_by
                .map_or_else(|| "null".to_string(), |l| l.to_string());
            write!(f, "Id: {}\tOccupied: {}\tPending: ", res.id, occupied)?;
            for load in &res.pending {
                write!(f, "{} ", load)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
