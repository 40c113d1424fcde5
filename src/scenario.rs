//! Scenario execution.
//!
//! A [`Scenario`] owns one stamp per live replica and applies steps to them
//! in order. Stamps are kept in a `BTreeMap` so reports list replicas in a
//! stable order.

use std::collections::BTreeMap;

use itc_core::Stamp;
use tracing::{debug, info};

use crate::config::{Config, Relation, Step};
use crate::error::SimError;
use crate::telemetry::spans;

/// The replicas of a running scenario.
#[derive(Debug, Default)]
pub struct Scenario {
    replicas: BTreeMap<String, Stamp>,
    steps_run: usize,
    messages: usize,
}

impl Scenario {
    /// Creates the initial replicas described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, SimError> {
        let mut replicas = BTreeMap::new();
        for replica in &config.replicas {
            let stamp = replica
                .initial_stamp()
                .map_err(|source| SimError::InitialStamp {
                    replica: replica.name.clone(),
                    source,
                })?;
            debug!(replica = %replica.name, %stamp, "created replica");
            replicas.insert(replica.name.clone(), stamp);
        }
        Ok(Self {
            replicas,
            ..Self::default()
        })
    }

    /// Final stamps by replica name.
    pub fn replicas(&self) -> &BTreeMap<String, Stamp> {
        &self.replicas
    }

    /// Number of steps applied so far.
    pub fn steps_run(&self) -> usize {
        self.steps_run
    }

    /// Number of messages sent through the wire encoding.
    pub fn messages(&self) -> usize {
        self.messages
    }

    /// Applies `steps` in order, stopping at the first failure.
    pub fn run(&mut self, steps: &[Step]) -> Result<(), SimError> {
        for (index, step) in steps.iter().enumerate() {
            let number = index + 1;
            let span = spans::step(number, step.op());
            let _enter = span.enter();
            self.apply(number, step)?;
            self.steps_run += 1;
        }
        info!(
            steps = self.steps_run,
            messages = self.messages,
            replicas = self.replicas.len(),
            "scenario finished"
        );
        Ok(())
    }

    fn apply(&mut self, step: usize, op: &Step) -> Result<(), SimError> {
        match op {
            Step::Fork { replica, into } => {
                let forked = self.get_mut(step, replica)?.fork();
                debug!(%replica, %into, stamp = %forked, "forked");
                self.replicas.insert(into.clone(), forked);
            }
            Step::Event { replica } => {
                let stamp = self.get_mut(step, replica)?;
                stamp.event();
                debug!(%replica, %stamp, "event");
            }
            Step::Join { replica, from } => {
                let other = self.take(step, from)?;
                let stamp = self.get_mut(step, replica)?;
                stamp.join(other);
                debug!(%replica, %from, %stamp, "joined");
            }
            Step::Send { from, to } => {
                let bytes = self.get_mut(step, from)?.send().marshal();
                let message = Stamp::unmarshal(&bytes).map_err(|source| SimError::Decode {
                    step,
                    from: from.clone(),
                    source,
                })?;
                let stamp = self.get_mut(step, to)?;
                stamp.receive(message);
                self.messages += 1;
                debug!(%from, %to, bytes = bytes.len(), "delivered message");
            }
            Step::Sync { replica, with } => {
                let mut other = self.take(step, with)?;
                let stamp = self.get_mut(step, replica)?;
                stamp.sync(&mut other);
                debug!(%replica, %with, %stamp, "synchronized");
                self.replicas.insert(with.clone(), other);
            }
            Step::Expect { replica, stamp } => {
                let actual = self.get(step, replica)?.to_string();
                let expected = stamp
                    .parse::<Stamp>()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|_| stamp.clone());
                if actual != expected {
                    return Err(SimError::ExpectationFailed {
                        step,
                        replica: replica.clone(),
                        expected,
                        actual,
                    });
                }
            }
            Step::Check {
                left,
                right,
                relation,
            } => {
                let actual = Relation::between(self.get(step, left)?, self.get(step, right)?);
                if actual != *relation {
                    return Err(SimError::RelationMismatch {
                        step,
                        left: left.clone(),
                        right: right.clone(),
                        expected: *relation,
                        actual,
                    });
                }
            }
        }
        Ok(())
    }

    fn get(&self, step: usize, name: &str) -> Result<&Stamp, SimError> {
        self.replicas
            .get(name)
            .ok_or_else(|| unknown(step, name))
    }

    fn get_mut(&mut self, step: usize, name: &str) -> Result<&mut Stamp, SimError> {
        self.replicas
            .get_mut(name)
            .ok_or_else(|| unknown(step, name))
    }

    fn take(&mut self, step: usize, name: &str) -> Result<Stamp, SimError> {
        self.replicas
            .remove(name)
            .ok_or_else(|| unknown(step, name))
    }
}

fn unknown(step: usize, name: &str) -> SimError {
    SimError::UnknownReplica {
        step,
        replica: name.to_string(),
    }
}
