use tracing::debug;

use crate::{
    network::{Id, Network, RailwayKind, RailwaySpec, railway_cost},
    planning::Error,
    shared::{
        geo::{Coordinate, Distance, path_length},
        smoothing::smooth_path,
    },
};

/// What the railway being drawn would look like and cost if finished now.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub path: Vec<Coordinate>,
    pub length: Distance,
    pub cost: i64,
}

#[derive(Debug, Clone)]
struct Draft {
    start: Id,
    waypoints: Vec<Coordinate>,
}

/// Interactive railway drawing: pick a start stop, click waypoints, pick an end stop.
///
/// Nothing touches the network until [`RailwayDrawing::finish`]; cancelling
/// simply drops the waypoints.
#[derive(Debug, Clone)]
pub struct RailwayDrawing {
    kind: RailwayKind,
    draft: Option<Draft>,
}

impl Default for RailwayDrawing {
    fn default() -> Self {
        Self::new(RailwayKind::Cargo)
    }
}

impl RailwayDrawing {
    pub fn new(kind: RailwayKind) -> Self {
        Self { kind, draft: None }
    }

    pub fn is_active(&self) -> bool {
        self.draft.is_some()
    }

    pub fn start(&self) -> Option<&Id> {
        self.draft.as_ref().map(|draft| &draft.start)
    }

    pub fn waypoints(&self) -> &[Coordinate] {
        self.draft
            .as_ref()
            .map(|draft| draft.waypoints.as_slice())
            .unwrap_or_default()
    }

    pub fn set_kind(&mut self, kind: RailwayKind) {
        self.kind = kind;
    }

    /// Starts drawing from a building or junction, whose position becomes the first waypoint.
    pub fn begin(&mut self, network: &Network, start: &str) -> Result<(), Error> {
        if self.is_active() {
            return Err(Error::AlreadyActive);
        }
        let stop = network
            .stop(start)
            .ok_or_else(|| crate::network::Error::UnknownStop(start.into()))?;
        self.draft = Some(Draft {
            start: start.into(),
            waypoints: vec![stop.position()],
        });
        debug!("Started drawing a railway from {start}");
        Ok(())
    }

    pub fn add_point(&mut self, point: Coordinate) -> Result<(), Error> {
        let draft = self.draft.as_mut().ok_or(Error::NotActive)?;
        draft.waypoints.push(point);
        Ok(())
    }

    /// Smoothed geometry, length and price of the current waypoints.
    pub fn preview(&self, network: &Network) -> Option<Preview> {
        let waypoints = self.waypoints();
        let path = if waypoints.len() > 2 {
            smooth_path(waypoints, network.config().preview_segments)
        } else {
            waypoints.to_vec()
        };
        if path.len() < 2 {
            return None;
        }
        let length = path_length(&path);
        Some(Preview {
            cost: railway_cost(length, self.kind),
            length,
            path,
        })
    }

    /// Ends the drawing at `end` and builds the railway.
    ///
    /// The session closes whatever the outcome, so a railway the player
    /// cannot afford is cancelled rather than left half drawn.
    pub fn finish(&mut self, network: &mut Network, end: &str) -> Result<Id, Error> {
        let mut draft = self.draft.take().ok_or(Error::NotActive)?;
        if *draft.start == *end {
            return Err(crate::network::Error::SameEndpoints.into());
        }
        let end_position = network
            .stop(end)
            .ok_or_else(|| crate::network::Error::UnknownStop(end.into()))?
            .position();
        draft.waypoints.push(end_position);
        let id = network.add_railway(RailwaySpec::new(
            draft.start,
            end,
            draft.waypoints,
            self.kind,
        ))?;
        Ok(id)
    }

    pub fn cancel(&mut self) {
        if self.draft.take().is_some() {
            debug!("Cancelled railway drawing");
        }
    }
}
