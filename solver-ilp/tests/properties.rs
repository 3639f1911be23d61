//! Search properties checked against brute-force enumeration.

use solver_ilp::{
    solve_ilp, BranchAndBound, FirstFractional, IlpSettings, IlpSolution, IlpStatus,
    IntegerProgram, NodeSelection, RoundingHeuristic, SimplexBackend, VariableSelector,
};

const TOL: f64 = 1e-6;

struct Instance {
    name: &'static str,
    a: Vec<Vec<f64>>,
    b: Vec<f64>,
    c: Vec<f64>,
    /// Every feasible integer point has coordinates in 0..=box_size.
    box_size: u32,
}

impl Instance {
    fn program(&self) -> IntegerProgram {
        IntegerProgram::from_dense(&self.a, self.b.clone(), self.c.clone()).expect("valid problem")
    }

    /// Best objective over all integer points in the box, None if none is feasible.
    fn brute_force(&self) -> Option<f64> {
        let n = self.c.len();
        let mut point = vec![0u32; n];
        let mut best: Option<f64> = None;

        loop {
            let x: Vec<f64> = point.iter().map(|&v| v as f64).collect();
            let feasible = self.a.iter().zip(&self.b).all(|(row, &bi)| {
                row.iter().zip(&x).map(|(aij, xj)| aij * xj).sum::<f64>() <= bi + 1e-9
            });
            if feasible {
                let obj: f64 = self.c.iter().zip(&x).map(|(ci, xi)| ci * xi).sum();
                best = Some(best.map_or(obj, |b| b.max(obj)));
            }

            // Odometer increment
            let mut k = 0;
            loop {
                if k == n {
                    return best;
                }
                if point[k] < self.box_size {
                    point[k] += 1;
                    break;
                }
                point[k] = 0;
                k += 1;
            }
        }
    }
}

fn instances() -> Vec<Instance> {
    vec![
        Instance {
            name: "textbook",
            a: vec![vec![6.0, 4.0], vec![1.0, 2.0]],
            b: vec![24.0, 6.0],
            c: vec![5.0, 4.0],
            box_size: 6,
        },
        Instance {
            name: "three_vars",
            a: vec![
                vec![1.0, 1.0, 2.0],
                vec![2.0, 0.0, 1.0],
                vec![0.0, 1.0, 3.0],
            ],
            b: vec![4.5, 5.3, 6.7],
            c: vec![3.0, 2.0, 4.0],
            box_size: 5,
        },
        Instance {
            name: "mixed_signs",
            a: vec![vec![-1.0, 1.0], vec![1.0, 1.0], vec![1.0, 0.0]],
            b: vec![0.5, 3.7, 2.2],
            c: vec![1.0, 1.0],
            box_size: 4,
        },
        Instance {
            name: "negative_cost",
            a: vec![vec![1.0, -1.0], vec![1.0, 0.0], vec![0.0, 1.0]],
            b: vec![1.5, 3.6, 10.0],
            c: vec![2.0, -1.0],
            box_size: 10,
        },
        Instance {
            name: "knapsack",
            a: vec![
                vec![5.0, 7.0, 4.0, 3.0],
                vec![1.0, 0.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0, 0.0],
                vec![0.0, 0.0, 1.0, 0.0],
                vec![0.0, 0.0, 0.0, 1.0],
            ],
            b: vec![14.0, 1.0, 1.0, 1.0, 1.0],
            c: vec![8.0, 11.0, 6.0, 4.0],
            box_size: 1,
        },
        Instance {
            name: "equality_like",
            a: vec![vec![2.0, 2.0], vec![-2.0, -2.0], vec![1.0, 0.0], vec![0.0, 1.0]],
            b: vec![7.0, -5.0, 3.0, 3.0],
            c: vec![1.0, 2.0],
            box_size: 3,
        },
        Instance {
            name: "empty_lattice",
            a: vec![vec![2.0, 0.0], vec![-2.0, 0.0], vec![0.0, 1.0]],
            b: vec![3.0, -2.2, 2.0],
            c: vec![1.0, 1.0],
            box_size: 2,
        },
    ]
}

fn check_against_enumeration(inst: &Instance, sol: &IlpSolution) {
    match inst.brute_force() {
        Some(best) => {
            assert_eq!(sol.status, IlpStatus::Optimal, "{}", inst.name);
            let obj = sol.obj_val.expect("optimal carries an objective");
            assert!((obj - best).abs() < TOL, "{}: got {}, expected {}", inst.name, obj, best);

            let x = sol.x.as_ref().expect("optimal carries a point");
            let prob = inst.program();
            assert!(IntegerProgram::is_integral(x, 0.0), "{}", inst.name);
            assert!(prob.satisfies_constraints(x, 1e-9), "{}", inst.name);
            assert!((prob.objective(x) - obj).abs() < TOL, "{}", inst.name);
        }
        None => {
            assert_eq!(sol.status, IlpStatus::Infeasible, "{}", inst.name);
            assert!(sol.x.is_none(), "{}", inst.name);
        }
    }
}

#[test]
fn test_matches_enumeration() {
    for inst in instances() {
        let sol = solve_ilp(&inst.program(), &IlpSettings::default()).expect("Solve failed");
        check_against_enumeration(&inst, &sol);
    }
}

#[test]
fn test_node_selections_agree() {
    for selection in [
        NodeSelection::BestFirst,
        NodeSelection::DepthFirst,
        NodeSelection::BreadthFirst,
    ] {
        let settings = IlpSettings::default().with_node_selection(selection);
        for inst in instances() {
            let sol = solve_ilp(&inst.program(), &settings).expect("Solve failed");
            check_against_enumeration(&inst, &sol);
        }
    }
}

#[test]
fn test_seeds_agree() {
    for seed in [1, 7, 12345] {
        let settings = IlpSettings::default().with_seed(seed);
        for inst in instances() {
            let sol = solve_ilp(&inst.program(), &settings).expect("Solve failed");
            check_against_enumeration(&inst, &sol);
        }
    }
}

#[test]
fn test_deterministic() {
    let settings = IlpSettings::default().with_seed(42);
    for inst in instances() {
        let prob = inst.program();
        let first = solve_ilp(&prob, &settings).expect("Solve failed");
        let second = solve_ilp(&prob, &settings).expect("Solve failed");
        assert_eq!(first, second, "{}", inst.name);
    }
}

#[test]
fn test_bound_trajectories() {
    for inst in instances() {
        let sol = solve_ilp(&inst.program(), &IlpSettings::default()).expect("Solve failed");
        let stats = &sol.stats;

        assert_eq!(stats.lower_bounds.len(), stats.upper_bounds.len(), "{}", inst.name);

        for (lo, up) in stats.lower_bounds.iter().zip(&stats.upper_bounds) {
            assert!(*lo <= up + TOL, "{}: lower {} above upper {}", inst.name, lo, up);
        }
        for w in stats.lower_bounds.windows(2) {
            assert!(w[0] <= w[1], "{}: lower bound decreased", inst.name);
        }
        for w in stats.upper_bounds.windows(2) {
            assert!(w[1] <= w[0] + TOL, "{}: upper bound increased", inst.name);
        }

        if let (Some(obj), Some(last)) = (sol.obj_val, stats.lower_bounds.last()) {
            assert_eq!(obj, *last, "{}", inst.name);
        }
        // One pair after root seeding plus one per iteration
        if sol.status.has_solution() && stats.iterations > 0 {
            assert_eq!(
                stats.lower_bounds.len() as u64,
                stats.iterations / 2 + 1,
                "{}",
                inst.name
            );
        }
    }
}

/// Branch on the last fractional coordinate instead of the first.
struct LastFractional;

impl VariableSelector for LastFractional {
    fn select(&self, x: &[f64], tol: f64) -> Option<usize> {
        x.iter().rposition(|&v| IntegerProgram::fractionality(v) > tol)
    }
}

#[test]
fn test_custom_branching_rule() {
    for inst in instances() {
        let settings = IlpSettings::default();
        let mut bnb = BranchAndBound::new(
            SimplexBackend::new(settings.lp_settings.clone()),
            LastFractional,
            RoundingHeuristic::seeded(settings.seed),
            settings,
        );
        let sol = bnb.solve(&inst.program()).expect("Solve failed");
        check_against_enumeration(&inst, &sol);
    }
}

#[test]
fn test_driver_matches_entry_point() {
    let settings = IlpSettings::default();
    for inst in instances() {
        let prob = inst.program();
        let mut bnb = BranchAndBound::new(
            SimplexBackend::new(settings.lp_settings.clone()),
            FirstFractional,
            RoundingHeuristic::seeded(settings.seed),
            settings.clone(),
        );
        let direct = bnb.solve(&prob).expect("Solve failed");
        let wrapped = solve_ilp(&prob, &settings).expect("Solve failed");
        assert_eq!(direct, wrapped, "{}", inst.name);
    }
}

#[test]
fn test_driver_reusable() {
    let settings = IlpSettings::default().with_seed(5);
    let mut bnb = BranchAndBound::with_defaults(settings.clone());

    for inst in instances() {
        let prob = inst.program();
        let first = bnb.solve(&prob).expect("Solve failed");
        let second = bnb.solve(&prob).expect("Solve failed");
        let fresh = solve_ilp(&prob, &settings).expect("Solve failed");

        assert_eq!(first, second, "{}", inst.name);
        assert_eq!(first, fresh, "{}", inst.name);
    }
}
