//! Configuration settings for the ILP solver.

use solver_lp::SolverSettings;

/// Node selection strategy for the B&B frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeSelection {
    /// Open node with the greatest relaxation objective (first one on ties).
    #[default]
    BestFirst,

    /// Most recently inserted open node.
    DepthFirst,

    /// Earliest inserted open node.
    BreadthFirst,
}

/// ILP solver settings.
#[derive(Debug, Clone)]
pub struct IlpSettings {
    // === Termination criteria ===
    /// Maximum iteration count. Each explored node adds 2.
    pub max_iter: u64,

    /// Relative optimality gap tolerance.
    /// Stop when |upper - lower| / |lower| <= opt_gap.
    pub opt_gap: f64,

    /// Absolute optimality gap tolerance.
    pub abs_gap_tol: f64,

    /// Integer feasibility tolerance.
    /// A coordinate is considered integer if |x - round(x)| <= int_feas_tol.
    pub int_feas_tol: f64,

    // === Search strategy ===
    /// Node selection strategy.
    pub node_selection: NodeSelection,

    /// Seed of the randomized rounding heuristic.
    pub seed: u64,

    // === Relaxation ===
    /// Settings for the simplex relaxation backend.
    pub lp_settings: SolverSettings,

    // === Output ===
    /// Log progress information.
    pub verbose: bool,

    /// Log frequency (every N iterations).
    pub log_freq: u64,
}

impl Default for IlpSettings {
    fn default() -> Self {
        Self {
            // Termination
            max_iter: 10_000,
            opt_gap: 1e-4,
            abs_gap_tol: 0.01,
            int_feas_tol: 1e-6,

            // Search
            node_selection: NodeSelection::default(),
            seed: 0,

            // Relaxation
            lp_settings: SolverSettings::default(),

            // Output
            verbose: false,
            log_freq: 100,
        }
    }
}

impl IlpSettings {
    /// Create settings with verbose output enabled.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            log_freq: 2,
            ..Self::default()
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: u64) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set relative optimality gap tolerance.
    pub fn with_opt_gap(mut self, gap: f64) -> Self {
        self.opt_gap = gap;
        self
    }

    /// Set node selection strategy.
    pub fn with_node_selection(mut self, selection: NodeSelection) -> Self {
        self.node_selection = selection;
        self
    }

    /// Set the rounding heuristic seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
