use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::{haversine_nm, Coordinate};
use crate::graph::RoutingGraph;
use crate::registry::{Registry, WaypointId};
use crate::weather::{WeatherSnapshot, WeatherThresholds};

/// Optimization objective for a route request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationMode {
    /// Add a penalty derived from the live weather snapshot to the heuristic.
    Weather,
    /// Weighted A*: the heuristic is inflated by 1.2, so the returned path
    /// is at most 1.2 times the optimal cost but found with fewer expansions.
    Fuel,
    /// Heuristic scaled by 0.8; stays admissible and returns an optimal path.
    Time,
    /// Plain great-circle heuristic.
    #[default]
    Balanced,
}

impl OptimizationMode {
    /// Multiplier applied to the great-circle heuristic.
    pub fn heuristic_factor(&self) -> f64 {
        match self {
            OptimizationMode::Fuel => 1.2,
            OptimizationMode::Time => 0.8,
            OptimizationMode::Weather | OptimizationMode::Balanced => 1.0,
        }
    }

    /// Parse a mode name; anything unrecognised is treated as `balanced`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "weather" => OptimizationMode::Weather,
            "fuel" => OptimizationMode::Fuel,
            "time" => OptimizationMode::Time,
            _ => OptimizationMode::Balanced,
        }
    }

    pub fn all() -> [OptimizationMode; 4] {
        [
            OptimizationMode::Weather,
            OptimizationMode::Fuel,
            OptimizationMode::Time,
            OptimizationMode::Balanced,
        ]
    }
}

impl fmt::Display for OptimizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            OptimizationMode::Weather => "weather",
            OptimizationMode::Fuel => "fuel",
            OptimizationMode::Time => "time",
            OptimizationMode::Balanced => "balanced",
        };
        f.write_str(value)
    }
}

/// Scales the cost of traversing an edge.
///
/// Multipliers must be at least 1.0 so the great-circle heuristic stays a
/// lower bound on the remaining cost.
pub trait EdgeWeighting: Send + Sync {
    fn multiplier(&self, from: &Coordinate, to: &Coordinate) -> f64;
}

/// Constraints applied during pathfinding.
#[derive(Debug, Default, Clone)]
pub struct PathConstraints {
    /// Waypoints that must not be expanded. The start and goal are exempt.
    pub avoided: HashSet<WaypointId>,
}

impl PathConstraints {
    fn allows(&self, target: WaypointId) -> bool {
        !self.avoided.contains(&target)
    }
}

/// Cooperative cancellation token shared between a caller and running searches.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

/// Deadline and cancellation checked on every frontier pop.
#[derive(Debug, Clone, Default)]
pub struct SearchBudget {
    deadline: Option<Instant>,
    cancel: Option<CancelFlag>,
}

impl SearchBudget {
    /// No deadline and no cancellation.
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Copy of this budget whose deadline is no later than `deadline`.
    pub fn tightened(&self, deadline: Instant) -> Self {
        let mut budget = self.clone();
        budget.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        budget
    }

    /// Fail with `SearchCancelled` or `SearchTimedOut` once the budget is spent.
    pub fn check(&self) -> Result<()> {
        if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
            return Err(Error::SearchCancelled);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(Error::SearchTimedOut);
        }
        Ok(())
    }
}

/// Everything that shapes a single A* search.
#[derive(Clone, Copy)]
pub struct SearchQuery<'a> {
    pub mode: OptimizationMode,
    pub weather: Option<&'a WeatherSnapshot>,
    pub thresholds: WeatherThresholds,
    pub constraints: &'a PathConstraints,
    pub weighting: Option<&'a dyn EdgeWeighting>,
}

impl<'a> SearchQuery<'a> {
    pub fn new(mode: OptimizationMode, constraints: &'a PathConstraints) -> Self {
        Self {
            mode,
            weather: None,
            thresholds: WeatherThresholds::default(),
            constraints,
            weighting: None,
        }
    }

    pub fn with_weather(
        mut self,
        weather: Option<&'a WeatherSnapshot>,
        thresholds: WeatherThresholds,
    ) -> Self {
        self.weather = weather;
        self.thresholds = thresholds;
        self
    }

    pub fn with_weighting(mut self, weighting: &'a dyn EdgeWeighting) -> Self {
        self.weighting = Some(weighting);
        self
    }

    fn heuristic(&self, from: &Coordinate, goal: &Coordinate) -> f64 {
        let base = haversine_nm(from, goal) * self.mode.heuristic_factor();
        match (self.mode, self.weather) {
            (OptimizationMode::Weather, Some(snapshot)) => base + self.thresholds.penalty(snapshot),
            _ => base,
        }
    }

    fn edge_cost(&self, distance: f64, from: &Coordinate, to: &Coordinate) -> f64 {
        match self.weighting {
            Some(weighting) => distance * weighting.multiplier(from, to).max(1.0),
            None => distance,
        }
    }
}

/// Run A* search from `start` to `goal`.
///
/// `g(n)` is the accumulated (optionally weighted) edge distance and the
/// heuristic is the great-circle distance to the goal adjusted by the query's
/// mode. Entries with equal priority pop in insertion order. Returns the node
/// path ordered start to goal.
pub fn find_route_a_star(
    graph: &RoutingGraph,
    registry: &Registry,
    start: WaypointId,
    goal: WaypointId,
    query: &SearchQuery<'_>,
    budget: &SearchBudget,
) -> Result<Vec<WaypointId>> {
    let not_found = || Error::NoPathFound {
        start: registry.label(start),
        goal: registry.label(goal),
    };
    let (Some(start_waypoint), Some(goal_waypoint)) = (registry.get(start), registry.get(goal))
    else {
        return Err(not_found());
    };
    if start == goal {
        return Ok(vec![start]);
    }

    let goal_position = goal_waypoint.position;
    let mut g_score: HashMap<WaypointId, f64> = HashMap::new();
    let mut parents: HashMap<WaypointId, Option<WaypointId>> = HashMap::new();
    let mut queue = BinaryHeap::new();
    let mut sequence = 0u64;
    let mut expanded = 0usize;

    g_score.insert(start, 0.0);
    parents.insert(start, None);
    let start_estimate = query.heuristic(&start_waypoint.position, &goal_position);
    queue.push(AStarEntry::new(start, 0.0, start_estimate, sequence));

    while let Some(entry) = queue.pop() {
        budget.check()?;

        let current_score = match g_score.get(&entry.node) {
            Some(score) if *score < entry.cost.0 => continue,
            Some(score) => *score,
            None => continue,
        };

        if entry.node == goal {
            debug!(
                start = %start_waypoint.id,
                goal = %goal_waypoint.id,
                mode = %query.mode,
                cost = current_score,
                expanded,
                "A* reached goal"
            );
            return Ok(reconstruct_path(&parents, start, goal));
        }
        expanded += 1;

        let Some(current) = registry.get(entry.node) else {
            continue;
        };
        for edge in graph.neighbours(entry.node) {
            let next = edge.target;
            if next != goal && !query.constraints.allows(next) {
                continue;
            }
            let Some(target) = registry.get(next) else {
                continue;
            };

            let tentative_g =
                current_score + query.edge_cost(edge.distance, &current.position, &target.position);
            if tentative_g < *g_score.get(&next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next, tentative_g);
                parents.insert(next, Some(entry.node));
                sequence += 1;
                let heuristic = query.heuristic(&target.position, &goal_position);
                queue.push(AStarEntry::new(next, tentative_g, heuristic, sequence));
            }
        }
    }

    debug!(
        start = %start_waypoint.id,
        goal = %goal_waypoint.id,
        expanded,
        "A* frontier exhausted"
    );
    Err(not_found())
}

fn reconstruct_path(
    parents: &HashMap<WaypointId, Option<WaypointId>>,
    start: WaypointId,
    goal: WaypointId,
) -> Vec<WaypointId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

/// Total ordering for `f64` priorities.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct FloatOrd(pub(crate) f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry {
    node: WaypointId,
    cost: FloatOrd,
    estimate: FloatOrd,
    sequence: u64,
}

impl AStarEntry {
    fn new(node: WaypointId, cost: f64, heuristic: f64, sequence: u64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
            sequence,
        }
    }
}

impl Ord for AStarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by estimate,
        // with earlier insertions first among equals.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for AStarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
