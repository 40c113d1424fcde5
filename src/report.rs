//! Final report of a scenario run.

use std::fmt::Write as _;

use itc_core::Stamp;
use serde::Serialize;

use crate::config::{OutputConfig, OutputFormat, Relation};
use crate::scenario::Scenario;

/// Everything printed after a successful run.
#[derive(Debug, Serialize)]
pub struct Report {
    /// Number of steps applied.
    pub steps: usize,
    /// Number of messages that went through the wire encoding.
    pub messages: usize,
    /// Final replicas, sorted by name.
    pub replicas: Vec<ReplicaReport>,
    /// Relation of every pair of replicas, if requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<RelationReport>,
}

/// The final state of one replica.
#[derive(Debug, Serialize)]
pub struct ReplicaReport {
    pub name: String,
    pub stamp: Stamp,
    pub anonymous: bool,
    /// Hex-encoded wire form, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

/// The causal relation of one replica to another.
#[derive(Debug, Serialize)]
pub struct RelationReport {
    pub left: String,
    pub right: String,
    pub relation: Relation,
}

impl Report {
    /// Builds the report for a finished scenario.
    pub fn build(scenario: &Scenario, output: &OutputConfig) -> Self {
        let replicas: Vec<ReplicaReport> = scenario
            .replicas()
            .iter()
            .map(|(name, stamp)| ReplicaReport {
                name: name.clone(),
                stamp: stamp.clone(),
                anonymous: stamp.is_anonymous(),
                encoding: output.encoding.then(|| hex::encode(stamp.marshal())),
            })
            .collect();

        let mut relations = Vec::new();
        if output.relations {
            for (i, left) in replicas.iter().enumerate() {
                for right in &replicas[i + 1..] {
                    relations.push(RelationReport {
                        left: left.name.clone(),
                        right: right.name.clone(),
                        relation: Relation::between(&left.stamp, &right.stamp),
                    });
                }
            }
        }

        Self {
            steps: scenario.steps_run(),
            messages: scenario.messages(),
            replicas,
            relations,
        }
    }

    /// Renders the report in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} replicas after {} steps ({} messages)",
            self.replicas.len(),
            self.steps,
            self.messages
        );
        for replica in &self.replicas {
            let _ = write!(out, "{} = {}", replica.name, replica.stamp);
            if let Some(encoding) = &replica.encoding {
                let _ = write!(out, " [{encoding}]");
            }
            if replica.anonymous {
                out.push_str(" (anonymous)");
            }
            out.push('\n');
        }
        for relation in &self.relations {
            let _ = writeln!(
                out,
                "{} {} {}",
                relation.left, relation.relation, relation.right
            );
        }
        out
    }
}
