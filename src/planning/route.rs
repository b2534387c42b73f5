use tracing::debug;

use crate::{
    network::{Id, Network},
    planning::Error,
};

#[derive(Debug, Clone)]
struct Plan {
    train: Id,
    stops: Vec<Id>,
}

/// Interactive route planning: collect stops for one train, then confirm.
#[derive(Debug, Clone, Default)]
pub struct RoutePlanner {
    plan: Option<Plan>,
}

impl RoutePlanner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_active(&self) -> bool {
        self.plan.is_some()
    }

    pub fn train(&self) -> Option<&Id> {
        self.plan.as_ref().map(|plan| &plan.train)
    }

    pub fn stops(&self) -> &[Id] {
        self.plan
            .as_ref()
            .map(|plan| plan.stops.as_slice())
            .unwrap_or_default()
    }

    /// Starts planning for `train`, discarding any plan already in progress.
    pub fn begin(&mut self, train: &str) {
        self.plan = Some(Plan {
            train: train.into(),
            stops: Vec::new(),
        });
    }

    /// Appends a stop. Returns `false` when it is already part of the plan.
    pub fn add_stop(&mut self, stop: &str) -> Result<bool, Error> {
        let plan = self.plan.as_mut().ok_or(Error::NotActive)?;
        if plan.stops.iter().any(|planned| **planned == *stop) {
            return Ok(false);
        }
        plan.stops.push(stop.into());
        Ok(true)
    }

    pub fn remove_last_stop(&mut self) -> Option<Id> {
        self.plan.as_mut()?.stops.pop()
    }

    pub fn clear(&mut self) {
        if let Some(plan) = self.plan.as_mut() {
            plan.stops.clear();
        }
    }

    pub fn cancel(&mut self) {
        self.plan = None;
    }

    /// Whether the collected stops would be accepted by [`RoutePlanner::confirm`].
    pub fn is_valid(&self, network: &Network) -> bool {
        network.validate_route(self.stops())
    }

    /// Starts the train on the planned route and closes the session.
    ///
    /// An invalid plan is rejected and stays open so stops can be fixed.
    pub fn confirm(&mut self, network: &mut Network) -> Result<(), Error> {
        let plan = self.plan.as_ref().ok_or(Error::NotActive)?;
        if !network.validate_route(plan.stops.as_slice()) {
            return Err(Error::InvalidRoute);
        }
        network.start_train(&plan.train, plan.stops.clone())?;
        debug!("Confirmed a {} stop route for train {}", plan.stops.len(), plan.train);
        self.plan = None;
        Ok(())
    }
}
