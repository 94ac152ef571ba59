/*!
Configuration of a context.

All configuration of a context is contained within a [Config] struct, read once at solver construction.
Some structures clone parts of the configuration --- notably the [cubifier](crate::cubifier) takes a copy of [CubifierConfig] when built.

Each option is wrapped in a [ConfigOption], which pairs the value with its name and permitted range, so the CLI can validate and report option updates uniformly.
*/

mod config_option;
pub use config_option::ConfigOption;

/// An activity, for atoms or clauses.
pub type Activity = f64;

/// A probability of choosing positive polarity.
pub type PolarityLean = f64;

/// The primary configuration structure.
#[derive(Clone)]
pub struct Config {
    /// Schedule restarts on the luby sequence, rather than polynomially.
    pub luby_restarts: ConfigOption<bool>,

    /// The conflict budget of the first restart interval.
    pub restart_first: ConfigOption<u32>,

    /// The base of the restart schedule: budgets are `restart_first · restart_base^luby(r)` on the luby schedule and `restart_first · r^restart_base` otherwise.
    pub restart_base: ConfigOption<f64>,

    /// The probability of assigning positive polarity to an atom when freely deciding on the atom.
    pub polarity_lean: ConfigOption<PolarityLean>,

    /// The probability of deciding on a random atom, rather than the most active atom.
    pub random_decision_bias: ConfigOption<f64>,

    /// Default to the last set value of an atom when deciding on the atom, otherwise lean on [polarity_lean](Config::polarity_lean).
    pub phase_saving: ConfigOption<bool>,

    /// Enable pure-literal preprocessing before the solve loop.
    pub preprocessing: ConfigOption<bool>,

    /// The amount added to an atom's activity when bumped.
    pub atom_bump: ConfigOption<Activity>,

    /// After a conflict, atom activity additions are scaled by the inverse of this factor.
    pub atom_decay: ConfigOption<Activity>,

    /// The amount added to an addition clause's activity when used.
    pub clause_bump: ConfigOption<Activity>,

    /// After a conflict, clause activity additions are scaled by the inverse of this factor.
    pub clause_decay: ConfigOption<Activity>,

    /// Reduce the addition clause store every `reduction_interval` conflicts (zero to disable).
    pub reduction_interval: ConfigOption<u64>,

    /// A global limit on conflicts, checked by [within_budget](crate::context::GenericContext::within_budget).
    pub conflict_limit: ConfigOption<u64>,

    /// A global limit on propagations, checked by [within_budget](crate::context::GenericContext::within_budget).
    pub propagation_limit: ConfigOption<u64>,

    /// Configuration of the cubifier.
    pub cubifier: CubifierConfig,
}

/// Configuration of the cubifier.
#[derive(Clone)]
pub struct CubifierConfig {
    /// Only search inside cubes at least `k_t` times as dense as the mean density seen so far.
    pub k_t: ConfigOption<f64>,

    /// Multiplier adjusting the propagation budget of the cubification phase relative to the preceding search phase.
    pub k_c: ConfigOption<f64>,

    /// Only cubify clauses whose root cube is this size or smaller.
    pub max_cubify: ConfigOption<usize>,

    /// Search inside cubes even before cubification has been exhausted.
    pub always_search: ConfigOption<bool>,

    /// A bound on the number of cubes held in the cube queue.
    pub cube_budget: ConfigOption<usize>,
}

impl Default for Config {
    /// The default context is (roughly) configured to provide quick, deterministic results on a library of tests.
    fn default() -> Self {
        Config {
            luby_restarts: ConfigOption {
                name: "luby",
                min: false,
                max: true,
                value: true,
            },

            restart_first: ConfigOption {
                name: "restart_first",
                min: 1,
                max: u32::MAX,
                value: 100,
            },

            restart_base: ConfigOption {
                name: "restart_base",
                min: 1.0,
                max: f64::MAX,
                value: 2.0,
            },

            polarity_lean: ConfigOption {
                name: "polarity_lean",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            random_decision_bias: ConfigOption {
                name: "random_decision_bias",
                min: 0.0,
                max: 1.0,
                value: 0.0,
            },

            phase_saving: ConfigOption {
                name: "phase_saving",
                min: false,
                max: true,
                value: true,
            },

            preprocessing: ConfigOption {
                name: "preprocessing",
                min: false,
                max: true,
                value: false,
            },

            atom_bump: ConfigOption {
                name: "atom_bump",
                min: 0.0,
                max: (2.0 as Activity).powi(512),
                value: 1.0,
            },

            atom_decay: ConfigOption {
                name: "atom_decay",
                min: 0.0,
                max: 1.0,
                value: 0.95,
            },

            clause_bump: ConfigOption {
                name: "clause_bump",
                min: 0.0,
                max: (2.0 as Activity).powi(512),
                value: 1.0,
            },

            clause_decay: ConfigOption {
                name: "clause_decay",
                min: 0.0,
                max: 1.0,
                value: 0.999,
            },

            reduction_interval: ConfigOption {
                name: "reduction_interval",
                min: 0,
                max: u64::MAX,
                value: 2000,
            },

            conflict_limit: ConfigOption {
                name: "conflict_limit",
                min: 0,
                max: u64::MAX,
                value: u64::MAX,
            },

            propagation_limit: ConfigOption {
                name: "propagation_limit",
                min: 0,
                max: u64::MAX,
                value: u64::MAX,
            },

            cubifier: CubifierConfig::default(),
        }
    }
}

impl Default for CubifierConfig {
    fn default() -> Self {
        CubifierConfig {
            k_t: ConfigOption {
                name: "k_t",
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
                value: 10.0,
            },

            k_c: ConfigOption {
                name: "k_c",
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
                value: 2.0,
            },

            max_cubify: ConfigOption {
                name: "max_cubify",
                min: 2,
                max: i32::MAX as usize,
                value: 6,
            },

            always_search: ConfigOption {
                name: "always_search",
                min: false,
                max: true,
                value: false,
            },

            cube_budget: ConfigOption {
                name: "cube_budget",
                min: 1,
                max: usize::MAX,
                value: 1_000_000,
            },
        }
    }
}
