//! The PBD substep kernel.
//!
//! One substep runs these stages in a fixed order:
//!
//! ```text
//! predict                       v += dt*g*w; v *= exp(-dt*drag); p = x + dt*v
//! for n in 0..solver_iterations
//!     solve_tethers             (LRA only)
//!     solve_links(n)
//!     resolve_collisions
//! finalize                      v = (p - x)/dt; x = p
//! ```
//!
//! Every correction is scaled by the vertex's inverse mass, so pinned
//! vertices (`w = 0`) never move. The [`ExecutionStrategy`] in the config
//! only changes how elements inside a stage are walked.
//!
//! [`ExecutionStrategy`]: crate::strategy::ExecutionStrategy

use glam::Vec3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::constraints::Link;
use crate::state::SolverState;

/// Counters collected over one substep.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SubstepStats {
    /// Collision projections applied (summed over iterations).
    pub contacts: u32,
    /// Deepest penetration removed (meters).
    pub max_penetration: f32,
    /// Tether corrections applied (summed over iterations).
    pub tether_corrections: u32,
}

impl SubstepStats {
    /// Folds another set of counters into this one.
    pub fn merge(&mut self, other: SubstepStats) {
        self.contacts += other.contacts;
        self.max_penetration = self.max_penetration.max(other.max_penetration);
        self.tether_corrections += other.tether_corrections;
    }
}

/// Result of one collision pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactStats {
    /// Number of vertices pushed out.
    pub count: u32,
    /// Deepest penetration removed.
    pub max_penetration: f32,
}

/// Advances `state` by one substep of length `dt`.
pub fn substep(state: &mut SolverState, dt: f32) -> SubstepStats {
    let mut stats = SubstepStats::default();

    predict(state, dt);

    for n in 0..state.config.solver_iterations {
        if state.attachments.is_some() {
            stats.tether_corrections += solve_tethers(state);
        }
        solve_links(state, n);
        let contacts = resolve_collisions(state);
        stats.contacts += contacts.count;
        stats.max_penetration = stats.max_penetration.max(contacts.max_penetration);
    }

    finalize(state, dt);
    stats
}

/// Applies gravity and drag to velocities, then predicts positions.
pub fn predict(state: &mut SolverState, dt: f32) {
    let gravity = state.config.gravity_vec3();
    let drag = (-dt * state.config.drag_damping).exp();
    let SolverState {
        positions,
        predicted,
        velocities,
        inv_mass,
        config,
        ..
    } = state;

    let kernel = |((p, v), (x, &w)): ((&mut Vec3, &mut Vec3), (&Vec3, &f32))| {
        *v += dt * gravity * w;
        *v *= drag;
        *p = *x + dt * *v;
    };

    #[cfg(feature = "parallel")]
    if config.execution.uses_threads() {
        predicted
            .par_iter_mut()
            .zip(velocities.par_iter_mut())
            .zip(positions.par_iter().zip(inv_mass.par_iter()))
            .for_each(kernel);
        return;
    }
    let _ = config;

    predicted
        .iter_mut()
        .zip(velocities.iter_mut())
        .zip(positions.iter().zip(inv_mass.iter()))
        .for_each(kernel);
}

/// Pulls over-stretched vertices back toward their attachment anchors.
///
/// Returns the number of tether corrections applied. No-op without
/// attachments.
pub fn solve_tethers(state: &mut SolverState) -> u32 {
    let SolverState {
        predicted,
        inv_mass,
        attachments,
        config,
        ..
    } = state;
    let Some(attachments) = attachments.as_ref() else {
        return 0;
    };
    if attachments.is_empty() {
        return 0;
    }

    let eps = config.inv_mass_epsilon;
    let give = config.tether_give;
    let influence = config.lra_stiffness;

    let kernel = |(i, (p, &w)): (usize, (&mut Vec3, &f32))| -> u32 {
        if w > eps {
            attachments.project(i, p, w, give, influence)
        } else {
            0
        }
    };

    #[cfg(feature = "parallel")]
    if config.execution.uses_threads() {
        return predicted
            .par_iter_mut()
            .zip(inv_mass.par_iter())
            .enumerate()
            .map(kernel)
            .sum();
    }

    predicted
        .iter_mut()
        .zip(inv_mass.iter())
        .enumerate()
        .map(kernel)
        .sum()
}

/// Projects every link toward its rest length for relaxation iteration `n`.
pub fn solve_links(state: &mut SolverState, iteration: u32) {
    if state.config.execution.is_parallel() {
        solve_links_jacobi(state, iteration);
    } else {
        solve_links_gauss_seidel(state, iteration);
    }
}

/// Sequential sweep: each link sees the corrections of the links before it.
fn solve_links_gauss_seidel(state: &mut SolverState, iteration: u32) {
    let SolverState {
        predicted,
        inv_mass,
        links,
        config,
        ..
    } = state;
    let eps = config.inv_mass_epsilon;

    for link in links.iter() {
        let [a, b] = link.endpoints;
        let (a, b) = (a.index(), b.index());
        let kp = link.compensated_stiffness(iteration);
        let (dp0, dp1) =
            link.correction(predicted[a], predicted[b], inv_mass[a], inv_mass[b], kp, eps);
        predicted[a] += dp0;
        predicted[b] += dp1;
    }
}

/// Snapshot schedule: every link reads the same predicted positions, the
/// corrections are summed per vertex in link order and averaged by the
/// vertex's link count.
fn solve_links_jacobi(state: &mut SolverState, iteration: u32) {
    let SolverState {
        predicted,
        inv_mass,
        links,
        link_degree,
        link_delta,
        config,
        ..
    } = state;
    let eps = config.inv_mass_epsilon;

    let snapshot: &[Vec3] = &predicted[..];
    let kernel = |link: &Link| {
        let [a, b] = link.endpoints;
        let (a, b) = (a.index(), b.index());
        let kp = link.compensated_stiffness(iteration);
        link.correction(snapshot[a], snapshot[b], inv_mass[a], inv_mass[b], kp, eps)
    };

    #[cfg(feature = "parallel")]
    let corrections: Vec<(Vec3, Vec3)> = if config.execution.uses_threads() {
        links.par_iter().map(kernel).collect()
    } else {
        links.iter().map(kernel).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let corrections: Vec<(Vec3, Vec3)> = links.iter().map(kernel).collect();

    link_delta.fill(Vec3::ZERO);
    for (link, (dp0, dp1)) in links.iter().zip(corrections) {
        let [a, b] = link.endpoints;
        link_delta[a.index()] += dp0;
        link_delta[b.index()] += dp1;
    }

    for ((p, delta), &degree) in predicted.iter_mut().zip(link_delta.iter()).zip(link_degree.iter()) {
        if degree > 0 {
            *p += *delta / degree as f32;
        }
    }
}

/// Pushes every movable vertex inside the sphere out to its surface.
pub fn resolve_collisions(state: &mut SolverState) -> ContactStats {
    let SolverState {
        predicted,
        inv_mass,
        collider,
        config,
        ..
    } = state;
    let eps = config.inv_mass_epsilon;
    let collider = *collider;

    let kernel = |(p, &w): (&mut Vec3, &f32)| -> Option<f32> {
        if w > eps {
            collider.project(p)
        } else {
            None
        }
    };
    let fold = |acc: ContactStats, depth: f32| ContactStats {
        count: acc.count + 1,
        max_penetration: acc.max_penetration.max(depth),
    };

    #[cfg(feature = "parallel")]
    if config.execution.uses_threads() {
        return predicted
            .par_iter_mut()
            .zip(inv_mass.par_iter())
            .filter_map(kernel)
            .fold(ContactStats::default, fold)
            .reduce(ContactStats::default, |a, b| ContactStats {
                count: a.count + b.count,
                max_penetration: a.max_penetration.max(b.max_penetration),
            });
    }

    predicted
        .iter_mut()
        .zip(inv_mass.iter())
        .filter_map(kernel)
        .fold(ContactStats::default(), fold)
}

/// Derives velocities from the total displacement and commits positions.
pub fn finalize(state: &mut SolverState, dt: f32) {
    let inv_dt = 1.0 / dt;
    let SolverState {
        positions,
        predicted,
        velocities,
        config,
        ..
    } = state;

    let kernel = |((x, v), p): ((&mut Vec3, &mut Vec3), &Vec3)| {
        *v = (*p - *x) * inv_dt;
        *x = *p;
    };

    #[cfg(feature = "parallel")]
    if config.execution.uses_threads() {
        positions
            .par_iter_mut()
            .zip(velocities.par_iter_mut())
            .zip(predicted.par_iter())
            .for_each(kernel);
        return;
    }
    let _ = config;

    positions
        .iter_mut()
        .zip(velocities.iter_mut())
        .zip(predicted.iter())
        .for_each(kernel);
}
