//! High-level solver façade built on top of the low-level estimators.
//!
//! [`Solver`] bundles a domain and optional walk observers into a reusable
//! handle. It exposes ergonomic entry points for sampling and estimating the
//! Laplace solution with Dirichlet data.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::boundary::BoundaryDirichlet;
use crate::domain::Domain;
use crate::estimators::{estimate_laplace_dirichlet, wos_laplace_dirichlet};
use crate::math::Vec2;
use crate::observer::{ObserverList, WalkObserver, WalkOutcome};
use crate::params::WalkBudget;
use crate::rng::Rng;

/// Builder for [`Solver`], capturing shared configuration before freezing the solver.
pub struct SolverBuilder<'a, D>
where
    D: Domain,
{
    domain: &'a D,
    observers: Vec<Box<dyn WalkObserver + 'a>>,
}

impl<'a, D> SolverBuilder<'a, D>
where
    D: Domain,
{
    /// Begin constructing a solver for `domain`.
    pub fn new(domain: &'a D) -> Self {
        Self {
            domain,
            observers: Vec::new(),
        }
    }

    /// Register an observer that will receive walk events.
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: WalkObserver + 'a,
    {
        self.observers.push(Box::new(observer));
        self
    }

    /// Finalise the builder and produce a solver handle.
    pub fn build(self) -> Solver<'a, D> {
        Solver {
            domain: self.domain,
            observers: self.observers,
        }
    }
}

/// High-level entry point that bundles a domain and shared observers.
pub struct Solver<'a, D>
where
    D: Domain,
{
    domain: &'a D,
    observers: Vec<Box<dyn WalkObserver + 'a>>,
}

impl<'a, D> Solver<'a, D>
where
    D: Domain,
{
    /// Start constructing a solver for the given domain.
    pub fn builder(domain: &'a D) -> SolverBuilder<'a, D> {
        SolverBuilder::new(domain)
    }

    #[inline]
    fn observer_list(&self) -> ObserverList<'_> {
        ObserverList::new(
            self.observers
                .iter()
                .map(|obs| obs.as_ref() as &dyn WalkObserver),
        )
    }

    /// Attach an additional observer at runtime.
    pub fn add_observer<O>(&mut self, observer: O)
    where
        O: WalkObserver + 'a,
    {
        self.observers.push(Box::new(observer));
    }

    /// Run a single walk from `query` and return the sample with metadata.
    pub fn sample_laplace_dirichlet<G>(
        &self,
        g: &G,
        budget: WalkBudget,
        rng: &mut Rng,
        query: Vec2,
    ) -> WalkOutcome
    where
        G: BoundaryDirichlet,
    {
        let observers = self.observer_list();
        wos_laplace_dirichlet(self.domain, g, budget, rng, query, &observers)
    }

    /// Estimate the Laplace solution at `query` as the mean of `num_paths` walks.
    pub fn estimate_laplace_dirichlet<G>(
        &self,
        g: &G,
        budget: WalkBudget,
        num_paths: u32,
        rng: &mut Rng,
        query: Vec2,
    ) -> f32
    where
        G: BoundaryDirichlet,
    {
        let observers = self.observer_list();
        estimate_laplace_dirichlet(self.domain, g, budget, num_paths, rng, query, &observers)
    }
}
