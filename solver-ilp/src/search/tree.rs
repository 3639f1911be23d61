//! Branch-and-bound driver.

use std::time::Instant;

use super::{
    BoundTracker, FeasibilityHeuristic, FirstFractional, Frontier, RoundingHeuristic, SearchNode,
    Termination, VariableSelector,
};
use crate::error::{IlpError, IlpResult};
use crate::model::{IlpSolution, IlpStatus, IncumbentTracker, IntegerProgram, SearchStats};
use crate::oracle::{
    ConstraintSystem, Relaxation, RelaxationBackend, RelaxationStatus, SimplexBackend,
};
use crate::settings::IlpSettings;

/// Branch-and-bound driver.
///
/// Solves the root relaxation, resolves the infeasible/unbounded/integral
/// root cases, and otherwise explores the frontier until a termination
/// condition fires. Strategies are injected at construction.
pub struct BranchAndBound<B, V = FirstFractional, H = RoundingHeuristic> {
    /// LP relaxation oracle.
    backend: B,

    /// Branching variable selector.
    selector: V,

    /// Incumbent seeding heuristic.
    heuristic: H,

    /// Settings.
    settings: IlpSettings,
}

impl BranchAndBound<SimplexBackend> {
    /// Simplex backend, first-fractional branching, seeded rounding.
    pub fn with_defaults(settings: IlpSettings) -> Self {
        Self {
            backend: SimplexBackend::new(settings.lp_settings.clone()),
            selector: FirstFractional,
            heuristic: RoundingHeuristic::seeded(settings.seed),
            settings,
        }
    }
}

impl<B, V, H> BranchAndBound<B, V, H>
where
    B: RelaxationBackend,
    V: VariableSelector,
    H: FeasibilityHeuristic,
{
    /// Create a driver from explicit strategies.
    pub fn new(backend: B, selector: V, heuristic: H, settings: IlpSettings) -> Self {
        Self {
            backend,
            selector,
            heuristic,
            settings,
        }
    }

    /// Replace the relaxation backend.
    pub fn with_backend<B2: RelaxationBackend>(self, backend: B2) -> BranchAndBound<B2, V, H> {
        BranchAndBound {
            backend,
            selector: self.selector,
            heuristic: self.heuristic,
            settings: self.settings,
        }
    }

    /// Replace the branching variable selector.
    pub fn with_selector<V2: VariableSelector>(self, selector: V2) -> BranchAndBound<B, V2, H> {
        BranchAndBound {
            backend: self.backend,
            selector,
            heuristic: self.heuristic,
            settings: self.settings,
        }
    }

    /// Replace the feasibility heuristic.
    pub fn with_heuristic<H2: FeasibilityHeuristic>(self, heuristic: H2) -> BranchAndBound<B, V, H2> {
        BranchAndBound {
            backend: self.backend,
            selector: self.selector,
            heuristic,
            settings: self.settings,
        }
    }

    /// Settings in use.
    pub fn settings(&self) -> &IlpSettings {
        &self.settings
    }

    /// The relaxation backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Solve the integer program.
    ///
    /// The heuristic is reset first, so repeated calls give identical records.
    pub fn solve(&mut self, prob: &IntegerProgram) -> IlpResult<IlpSolution> {
        self.heuristic.reset();
        self.solve_program(prob, true)
    }

    /// Root dispatch. `allow_probe` is false inside the zero-objective probe,
    /// which bounds the recursion depth at one.
    fn solve_program(&mut self, prob: &IntegerProgram, allow_probe: bool) -> IlpResult<IlpSolution> {
        let root = self.backend.solve(&ConstraintSystem::root(prob))?;

        match root.status {
            RelaxationStatus::Optimal => {}
            RelaxationStatus::Infeasible => {
                log::info!("Root relaxation infeasible");
                return Ok(IlpSolution::infeasible(0));
            }
            RelaxationStatus::Unbounded => {
                if !allow_probe {
                    return Err(IlpError::InternalError(
                        "relaxation with constant objective reported unbounded".to_string(),
                    ));
                }
                log::info!("Root relaxation unbounded, probing feasibility with zero objective");

                let probe = self.solve_program(&prob.with_zero_objective(), false)?;
                if probe.status == IlpStatus::Infeasible {
                    return Ok(IlpSolution::infeasible(0));
                }
                return Ok(IlpSolution::unbounded(probe.stats.iterations));
            }
            status => {
                return Err(IlpError::UnknownOracleState(format!(
                    "root relaxation returned {:?}; reconsider the problem formulation",
                    status
                )));
            }
        }

        if IntegerProgram::is_integral(&root.x, self.settings.int_feas_tol) {
            let x = snap_to_integers(&root.x);
            let obj = prob.objective(&x);
            log::info!("Root relaxation integral: obj={:.6}", obj);
            return Ok(IlpSolution::integral_root(x, obj));
        }

        self.explore(prob, root)
    }

    /// The exploration loop over the frontier.
    fn explore(&mut self, prob: &IntegerProgram, root: Relaxation) -> IlpResult<IlpSolution> {
        let start = Instant::now();
        let tol = self.settings.int_feas_tol;

        let mut bounds = BoundTracker::new(root.obj_val, &self.settings);
        let mut incumbent = IncumbentTracker::new();

        if let Some(point) = self.heuristic.find_feasible(prob, &root.x) {
            let obj = prob.objective(&point);
            incumbent.update(&point, obj);
            bounds.raise_lower_bound(obj);
            log::info!("Heuristic incumbent: obj={:.6}", obj);
        }
        bounds.record();

        let mut frontier = Frontier::new(self.settings.node_selection);
        frontier.push(SearchNode::root().with_relaxation(root.obj_val, root.x));

        let mut next_node_id = 1;
        let mut nodes_explored = 0u64;
        let mut nodes_pruned = 0u64;

        let termination = loop {
            if let Some(reason) = bounds.check_termination(frontier.is_empty()) {
                break reason;
            }

            let parent = frontier.pop().ok_or_else(|| {
                IlpError::InternalError("selected from an empty frontier".to_string())
            })?;
            nodes_explored += 1;

            let decision = self.selector.decide(&parent.vertex, tol).ok_or_else(|| {
                IlpError::InternalError(format!("node {} has an integral vertex", parent.id))
            })?;

            for change in [decision.down_branch, decision.up_branch] {
                let child = parent.child(next_node_id, change);
                next_node_id += 1;

                let relax = self
                    .backend
                    .solve(&ConstraintSystem::with_bounds(prob, &child.bound_changes))?;

                match relax.status {
                    RelaxationStatus::Optimal if relax.obj_val > bounds.lower_bound => {
                        if IntegerProgram::is_integral(&relax.x, tol) {
                            let x = snap_to_integers(&relax.x);
                            let obj = prob.objective(&x);
                            if incumbent.update(&x, obj) {
                                bounds.raise_lower_bound(obj);
                                log::info!(
                                    "New incumbent: obj={:.6} at node {} (depth {})",
                                    obj,
                                    child.id,
                                    child.depth
                                );
                            }
                        } else {
                            frontier.push(child.with_relaxation(relax.obj_val, relax.x));
                        }
                    }
                    RelaxationStatus::Optimal | RelaxationStatus::Infeasible => {
                        nodes_pruned += 1;
                        log::debug!("Pruned node {} ({:?})", child.id, relax.status);
                    }
                    RelaxationStatus::Unbounded => {
                        nodes_pruned += 1;
                        log::warn!(
                            "Node {} relaxation unbounded below a bounded root; discarded",
                            child.id
                        );
                    }
                    status => {
                        return Err(IlpError::UnknownOracleState(format!(
                            "relaxation of node {} returned {:?}",
                            child.id, status
                        )));
                    }
                }
            }

            bounds.refresh(&frontier);
            bounds.record();
            bounds.count_iteration();

            self.log_progress(&bounds, frontier.len(), start);
        };

        log::info!(
            "Search finished: {:?} after {} iterations ({} nodes explored, {} pruned, {:.1}ms)",
            termination,
            bounds.iterations,
            nodes_explored,
            nodes_pruned,
            start.elapsed().as_secs_f64() * 1000.0,
        );

        self.finalize(termination, bounds, incumbent, nodes_explored, nodes_pruned)
    }

    /// Build the final solution record.
    fn finalize(
        &self,
        termination: Termination,
        bounds: BoundTracker,
        incumbent: IncumbentTracker,
        nodes_explored: u64,
        nodes_pruned: u64,
    ) -> IlpResult<IlpSolution> {
        let iterations = bounds.iterations;

        let Some(x) = incumbent.solution else {
            let mut sol = IlpSolution::infeasible(iterations);
            sol.stats.nodes_explored = nodes_explored;
            sol.stats.nodes_pruned = nodes_pruned;
            return Ok(sol);
        };

        let gap = bounds.gap();
        let (lower_bounds, upper_bounds) = bounds.into_trajectories();

        Ok(IlpSolution {
            status: termination.status(),
            x: Some(x),
            obj_val: Some(incumbent.obj_val),
            stats: SearchStats {
                iterations,
                gap,
                lower_bounds,
                upper_bounds,
                nodes_explored,
                nodes_pruned,
                incumbent_updates: incumbent.update_count,
            },
        })
    }

    /// Log progress (if verbose).
    fn log_progress(&self, bounds: &BoundTracker, open: usize, start: Instant) {
        if !self.settings.verbose {
            return;
        }

        if bounds.iterations % self.settings.log_freq.max(1) != 0 {
            return;
        }

        log::info!(
            "Iter: {} ({} open) | Lower: {:.6} | Upper: {:.6} | Gap: {} | Time: {:.1}s",
            bounds.iterations,
            open,
            bounds.lower_bound,
            bounds.upper_bound,
            bounds
                .gap()
                .map(|g| format!("{:.2}%", g * 100.0))
                .unwrap_or_else(|| "-".to_string()),
            start.elapsed().as_secs_f64(),
        );
    }
}

/// Round an integral vertex to exact integers.
fn snap_to_integers(x: &[f64]) -> Vec<f64> {
    x.iter().map(|v| v.round()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::NoHeuristic;

    /// Backend replaying a fixed status for every call.
    struct FixedStatus {
        status: RelaxationStatus,
        calls: usize,
    }

    impl RelaxationBackend for FixedStatus {
        fn solve(&mut self, _system: &ConstraintSystem<'_>) -> IlpResult<Relaxation> {
            self.calls += 1;
            Ok(Relaxation::without_solution(self.status))
        }
    }

    fn tiny() -> IntegerProgram {
        IntegerProgram::from_dense(&[vec![1.0]], vec![1.5], vec![1.0]).unwrap()
    }

    fn driver(status: RelaxationStatus) -> BranchAndBound<FixedStatus, FirstFractional, NoHeuristic> {
        BranchAndBound::new(
            FixedStatus { status, calls: 0 },
            FirstFractional,
            NoHeuristic,
            IlpSettings::default(),
        )
    }

    #[test]
    fn test_unknown_root_status_is_fatal() {
        for status in [RelaxationStatus::IterationLimit, RelaxationStatus::NumericalError] {
            let mut bnb = driver(status);
            let err = bnb.solve(&tiny()).unwrap_err();
            assert!(matches!(err, IlpError::UnknownOracleState(_)));
            assert_eq!(bnb.backend().calls, 1);
        }
    }

    #[test]
    fn test_unbounded_probe_depth_is_one() {
        // An oracle claiming unbounded even for the zero objective must not
        // trigger a second probe
        let mut bnb = driver(RelaxationStatus::Unbounded);
        let err = bnb.solve(&tiny()).unwrap_err();

        assert!(matches!(err, IlpError::InternalError(_)));
        assert_eq!(bnb.backend().calls, 2);
    }

    #[test]
    fn test_infeasible_root() {
        let mut bnb = driver(RelaxationStatus::Infeasible);
        let sol = bnb.solve(&tiny()).unwrap();

        assert_eq!(sol.status, IlpStatus::Infeasible);
        assert_eq!(sol.stats.iterations, 0);
        assert!(sol.x.is_none());
    }

    /// Fractional root, then a fixed status for every child.
    struct FractionalRoot {
        child_status: RelaxationStatus,
        calls: usize,
    }

    impl RelaxationBackend for FractionalRoot {
        fn solve(&mut self, system: &ConstraintSystem<'_>) -> IlpResult<Relaxation> {
            self.calls += 1;
            if system.bounds.is_empty() {
                Ok(Relaxation::optimal(1.5, vec![1.5]))
            } else {
                Ok(Relaxation::without_solution(self.child_status))
            }
        }
    }

    #[test]
    fn test_unknown_child_status_is_fatal() {
        let mut bnb = BranchAndBound::new(
            FractionalRoot {
                child_status: RelaxationStatus::NumericalError,
                calls: 0,
            },
            FirstFractional,
            NoHeuristic,
            IlpSettings::default(),
        );
        let err = bnb.solve(&tiny()).unwrap_err();
        assert!(matches!(err, IlpError::UnknownOracleState(_)));
    }

    #[test]
    fn test_unbounded_child_is_discarded() {
        let mut bnb = BranchAndBound::new(
            FractionalRoot {
                child_status: RelaxationStatus::Unbounded,
                calls: 0,
            },
            FirstFractional,
            NoHeuristic,
            IlpSettings::default(),
        );
        let sol = bnb.solve(&tiny()).unwrap();

        // Both children discarded, no incumbent
        assert_eq!(sol.status, IlpStatus::Infeasible);
        assert_eq!(sol.stats.iterations, 2);
        assert_eq!(sol.stats.nodes_pruned, 2);
        assert_eq!(bnb.backend().calls, 3);
    }

    #[test]
    fn test_builders_swap_strategies() {
        let bnb = BranchAndBound::with_defaults(IlpSettings::default())
            .with_heuristic(NoHeuristic)
            .with_backend(FixedStatus {
                status: RelaxationStatus::Infeasible,
                calls: 0,
            });
        assert_eq!(bnb.settings().max_iter, 10_000);
    }

    #[test]
    fn test_snap_to_integers() {
        assert_eq!(snap_to_integers(&[1.9999999, 3.0000001, 0.0]), vec![2.0, 3.0, 0.0]);
    }
}
