//! Force simulation
//!
//! Each tick cools `alpha`, pulls every node toward its target on the primary
//! axis and toward the centerline on the secondary axis, applies a weak
//! pairwise charge, integrates velocities, then pushes overlapping circles
//! apart. Nodes are processed in input order and coincident circles separate
//! along the secondary axis, so identical input yields identical output.

use crate::config::{Axis, SimulationConfig};
use crate::error::{LayoutError, LayoutResult};
use crate::generation::GenerationTicket;
use crate::node::{NodeInput, PositionedNode, SimulationNode};
use perf::{FrameBudget, PerfTimer};

/// Overlap below this is treated as touching
const OVERLAP_EPSILON: f64 = 1e-6;

/// Upper bound on relaxation passes when settling the final layout
const MAX_SETTLE_PASSES: usize = 1000;

/// Squared distance below which charge is softened
const CHARGE_DISTANCE_MIN2: f64 = 1.0;

/// State of a simulation after a frame of work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// More ticks remain
    Running,
    /// Movement fell below the convergence threshold or alpha cooled
    Converged,
    /// The iteration cap was reached
    Exhausted,
    /// A newer generation replaced this run
    Superseded,
}

impl StepOutcome {
    pub fn is_finished(self) -> bool {
        self != StepOutcome::Running
    }
}

/// An in-progress force layout
#[derive(Debug, Clone)]
pub struct Simulation {
    nodes: Vec<SimulationNode>,
    config: SimulationConfig,
    alpha: f64,
    ticks: usize,
    outcome: StepOutcome,
    ticket: Option<GenerationTicket>,
}

impl Simulation {
    /// Prepare a simulation.
    ///
    /// Nodes without a finite target are left out entirely. Every remaining
    /// node starts on its target, on the centerline, at rest.
    pub fn new(inputs: &[NodeInput], config: SimulationConfig) -> LayoutResult<Self> {
        config.validate()?;

        let mut nodes = Vec::with_capacity(inputs.len());
        for input in inputs {
            if !(input.radius.is_finite() && input.radius >= 0.0) {
                return Err(LayoutError::InvalidRadius {
                    id: input.id.clone(),
                    radius: input.radius,
                });
            }
            let Some(target) = input.target.filter(|t| t.is_finite()) else {
                continue;
            };
            nodes.push(SimulationNode {
                id: input.id.clone(),
                target,
                primary: target,
                secondary: config.centerline,
                velocity_primary: 0.0,
                velocity_secondary: 0.0,
                radius: input.radius,
            });
        }

        let excluded = inputs.len() - nodes.len();
        if excluded > 0 {
            tracing::debug!(excluded, "nodes without a target left out of the simulation");
        }

        let outcome = if nodes.is_empty() {
            StepOutcome::Converged
        } else if config.max_iterations == 0 {
            StepOutcome::Exhausted
        } else {
            StepOutcome::Running
        };

        Ok(Self {
            nodes,
            config,
            alpha: 1.0,
            ticks: 0,
            outcome,
            ticket: None,
        })
    }

    /// Tie this run to a generation; it stops once the ticket goes stale
    pub fn with_ticket(mut self, ticket: GenerationTicket) -> Self {
        self.ticket = Some(ticket);
        self
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn outcome(&self) -> StepOutcome {
        self.outcome
    }

    pub fn nodes(&self) -> &[SimulationNode] {
        &self.nodes
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn is_superseded(&self) -> bool {
        self.ticket.as_ref().is_some_and(|t| !t.is_current())
    }

    /// Run ticks until the frame budget is spent or the run finishes
    pub fn step_frame(&mut self, budget: &FrameBudget) -> StepOutcome {
        if self.outcome.is_finished() {
            return self.outcome;
        }

        let mut frame = budget.start_frame();
        while frame.tick() {
            if self.is_superseded() {
                self.outcome = StepOutcome::Superseded;
                break;
            }
            let displacement = self.tick();
            if let Some(done) = self.finished_after(displacement) {
                self.outcome = done;
                break;
            }
        }
        frame.finish("simulation_frame");

        if self.outcome.is_finished() {
            tracing::debug!(
                ticks = self.ticks,
                alpha = self.alpha,
                outcome = ?self.outcome,
                nodes = self.nodes.len(),
                "simulation finished"
            );
        }
        self.outcome
    }

    fn finished_after(&self, displacement: f64) -> Option<StepOutcome> {
        let threshold = self.config.convergence_threshold;
        if (threshold > 0.0 && displacement < threshold) || self.alpha < self.config.alpha_min {
            Some(StepOutcome::Converged)
        } else if self.ticks >= self.config.max_iterations {
            Some(StepOutcome::Exhausted)
        } else {
            None
        }
    }

    /// Advance one tick, returning the total distance moved by all nodes
    pub fn tick(&mut self) -> f64 {
        let config = self.config;
        self.alpha -= self.alpha * config.alpha_decay;
        let alpha = self.alpha;

        for node in &mut self.nodes {
            node.velocity_primary += (node.target - node.primary) * config.pull_strength * alpha;
            node.velocity_secondary +=
                (config.centerline - node.secondary) * config.center_strength * alpha;
        }

        if config.charge_strength != 0.0 {
            self.apply_charge(config.charge_strength * alpha);
        }

        let before: Vec<(f64, f64)> = self.nodes.iter().map(|n| (n.primary, n.secondary)).collect();

        let keep = 1.0 - config.velocity_decay;
        for node in &mut self.nodes {
            node.velocity_primary *= keep;
            node.velocity_secondary *= keep;
            node.primary += node.velocity_primary;
            node.secondary += node.velocity_secondary;
        }

        for _ in 0..config.collision_iterations {
            self.resolve_collisions();
        }

        self.ticks += 1;
        self.nodes
            .iter()
            .zip(before)
            .map(|(n, (p, s))| (n.primary - p).hypot(n.secondary - s))
            .sum()
    }

    fn apply_charge(&mut self, strength: f64) {
        let n = self.nodes.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = pair_mut(&mut self.nodes, i, j);
                let dp = b.primary - a.primary;
                let ds = b.secondary - a.secondary;
                let l2 = dp * dp + ds * ds;
                if l2 == 0.0 {
                    continue;
                }
                let w = strength / l2.max(CHARGE_DISTANCE_MIN2);
                a.velocity_primary += dp * w;
                a.velocity_secondary += ds * w;
                b.velocity_primary -= dp * w;
                b.velocity_secondary -= ds * w;
            }
        }
    }

    /// One relaxation pass over overlapping pairs; returns how many were separated.
    ///
    /// Pairs are visited in primary-coordinate order so the inner loop stops
    /// once nodes are too far apart on the primary axis to touch.
    fn resolve_collisions(&mut self) -> usize {
        let padding = self.config.collision_padding;
        let max_radius = self.nodes.iter().map(|n| n.radius).fold(0.0, f64::max);

        let mut order: Vec<usize> = (0..self.nodes.len()).collect();
        order.sort_by(|&a, &b| {
            self.nodes[a]
                .primary
                .total_cmp(&self.nodes[b].primary)
                .then(a.cmp(&b))
        });

        let mut separated = 0;
        for (k, &i) in order.iter().enumerate() {
            for &j in &order[k + 1..] {
                let reach = self.nodes[i].radius + max_radius + padding;
                if self.nodes[j].primary - self.nodes[i].primary > reach {
                    break;
                }
                if separate(&mut self.nodes, i, j, padding) {
                    separated += 1;
                }
            }
        }
        separated
    }

    /// Relax until no pair overlaps, bounded by a pass cap
    fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_PASSES {
            if self.resolve_collisions() == 0 {
                return;
            }
        }
        tracing::warn!(
            nodes = self.nodes.len(),
            "overlap remains after {} settling passes",
            MAX_SETTLE_PASSES
        );
    }

    /// Current positions in chart coordinates, in input order
    pub fn positions(&self) -> Vec<PositionedNode> {
        self.nodes
            .iter()
            .map(|n| {
                let (x, y) = match self.config.primary_axis {
                    Axis::X => (n.primary, n.secondary),
                    Axis::Y => (n.secondary, n.primary),
                };
                PositionedNode {
                    id: n.id.clone(),
                    x,
                    y,
                    radius: n.radius,
                }
            })
            .collect()
    }

    /// Settle remaining overlap and return final positions.
    ///
    /// Fails with [`LayoutError::Superseded`] when a newer generation exists.
    pub fn finish(mut self) -> LayoutResult<Vec<PositionedNode>> {
        if let Some(ticket) = &self.ticket {
            if !ticket.is_current() {
                return Err(LayoutError::Superseded {
                    generation: ticket.generation(),
                });
            }
        }
        self.settle();
        Ok(self.positions())
    }

    /// Run to completion synchronously, bounded by `max_iterations`
    pub fn run(mut self) -> LayoutResult<Vec<PositionedNode>> {
        let _timer = PerfTimer::simulation("force_simulation");
        self.step_frame(&FrameBudget::ticks(usize::MAX));
        self.finish()
    }
}

fn pair_mut(nodes: &mut [SimulationNode], i: usize, j: usize) -> (&mut SimulationNode, &mut SimulationNode) {
    debug_assert!(i != j);
    if i < j {
        let (head, tail) = nodes.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = nodes.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

/// Push `i` and `j` apart if they overlap. Smaller circles move further.
fn separate(nodes: &mut [SimulationNode], i: usize, j: usize, padding: f64) -> bool {
    let (a, b) = pair_mut(nodes, i, j);
    let min_distance = a.radius + b.radius + padding;
    let dp = b.primary - a.primary;
    let ds = b.secondary - a.secondary;
    let distance = dp.hypot(ds);
    if min_distance - distance <= OVERLAP_EPSILON {
        return false;
    }

    // Coincident centers: split along the secondary axis, earlier node downward
    let (up, us) = if distance > f64::EPSILON {
        (dp / distance, ds / distance)
    } else {
        (0.0, 1.0)
    };

    let ra2 = a.radius * a.radius;
    let rb2 = b.radius * b.radius;
    let share_a = if ra2 + rb2 > 0.0 { rb2 / (ra2 + rb2) } else { 0.5 };
    let shift = min_distance - distance;

    a.primary -= up * shift * share_a;
    a.secondary -= us * shift * share_a;
    b.primary += up * shift * (1.0 - share_a);
    b.secondary += us * shift * (1.0 - share_a);
    true
}

/// Lay out circles around their targets without overlap.
///
/// An empty input returns immediately without starting a simulation.
pub fn simulate(inputs: &[NodeInput], config: SimulationConfig) -> LayoutResult<Vec<PositionedNode>> {
    if inputs.is_empty() {
        return Ok(Vec::new());
    }
    Simulation::new(inputs, config)?.run()
}

/// Pack circles around a common center.
///
/// Every circle targets the same primary coordinate, so the primary pull and
/// the centerline pull together draw the set into a compact cluster.
pub fn pack_circles<I, S>(
    circles: I,
    center: (f64, f64),
    config: SimulationConfig,
) -> LayoutResult<Vec<PositionedNode>>
where
    I: IntoIterator<Item = (S, f64)>,
    S: Into<String>,
{
    let config = config.with_primary_axis(Axis::X).with_centerline(center.1);
    let inputs: Vec<NodeInput> = circles
        .into_iter()
        .map(|(id, radius)| NodeInput::new(id, Some(center.0), radius))
        .collect();
    simulate(&inputs, config)
}
