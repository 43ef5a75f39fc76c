//! Depth-first orderings over needs and reverse-needs edges.

// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 3: Internal module imports
use super::error::ResolveError;
use crate::spec::{normalize, ServiceSpec, SpecError};

/// Traversal mark per node. Unseen nodes have no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Visited,
}

/// Which edge direction a traversal follows.
enum Edges<'a> {
    /// spec → its needs
    Needs,
    /// spec → the specs in `universe` that need it
    NeededBy(&'a [ServiceSpec]),
}

impl Edges<'_> {
    fn children(&self, spec: &ServiceSpec) -> Result<Vec<ServiceSpec>, ResolveError> {
        match self {
            Edges::Needs => Ok(direct_needs(spec)?),
            Edges::NeededBy(universe) => Ok(direct_needed_by(spec, universe)?),
        }
    }
}

/// Canonical direct needs of a single spec.
///
/// Prefers the argument-matching `needs_with` form when the spec carries
/// start arguments and the service answers it, falling back to the
/// zero-argument form. A service that declares neither has no needs.
/// Returned elements are re-normalized.
///
/// # Errors
///
/// Returns [`SpecError`] when a declared need does not normalize.
pub fn direct_needs(spec: &ServiceSpec) -> Result<Vec<ServiceSpec>, SpecError> {
    let inputs = if spec.args().is_empty() {
        spec.service().needs()
    } else {
        spec.service()
            .needs_with(spec.args())
            .unwrap_or_else(|| spec.service().needs())
    };

    inputs.into_iter().map(normalize).collect()
}

/// Specs in `universe` whose direct needs contain `spec`, in universe order.
///
/// # Errors
///
/// Returns [`SpecError`] when a declared need of a universe member does not
/// normalize.
pub fn direct_needed_by(
    spec: &ServiceSpec,
    universe: &[ServiceSpec],
) -> Result<Vec<ServiceSpec>, SpecError> {
    let mut out = Vec::new();
    for candidate in universe {
        if direct_needs(candidate)?.contains(spec) {
            out.push(candidate.clone());
        }
    }
    Ok(out)
}

/// All transitive needs of `spec`, including `spec` itself, in start order.
///
/// For every pair `(a, b)` with `a` before `b` in the output, `b` has no
/// path to `a` along needs edges: dependencies always precede their
/// dependents. Children are visited in the order the service declares
/// them, so the output is stable with respect to that order.
///
/// # Errors
///
/// Returns [`ResolveError::CyclicDependency`] when the subgraph reachable
/// from `spec` contains a cycle.
///
/// # Examples
///
/// ```rust
/// use servsys_coord::resolver::dependencies;
/// use servsys_coord::spec::{Service, ServiceSpec, SpecInput};
///
/// struct Store;
/// impl Service for Store {
///     fn name(&self) -> &'static str {
///         "store"
///     }
/// }
///
/// struct Api;
/// impl Service for Api {
///     fn name(&self) -> &'static str {
///         "api"
///     }
///
///     fn needs(&self) -> Vec<SpecInput> {
///         vec![SpecInput::service(Store)]
///     }
/// }
///
/// let order = dependencies(&ServiceSpec::new(Api)).unwrap();
/// let ids: Vec<_> = order.iter().map(|s| s.id().as_str()).collect();
/// assert_eq!(ids, ["store", "api"]);
/// ```
pub fn dependencies(spec: &ServiceSpec) -> Result<Vec<ServiceSpec>, ResolveError> {
    walk(spec, &Edges::Needs)
}

/// All transitive dependents of `spec` within `universe`, in stop order.
///
/// The symmetric traversal with edges reversed: the output lists dependents
/// deepest-first and ends with `spec` itself, so iterating it front to back
/// stops every dependent before anything it still needs.
///
/// # Errors
///
/// Returns [`ResolveError::CyclicDependency`] when the traversed subgraph
/// contains a cycle.
pub fn dependents(
    spec: &ServiceSpec,
    universe: &[ServiceSpec],
) -> Result<Vec<ServiceSpec>, ResolveError> {
    walk(spec, &Edges::NeededBy(universe))
}

fn walk(spec: &ServiceSpec, edges: &Edges<'_>) -> Result<Vec<ServiceSpec>, ResolveError> {
    let mut marks = HashMap::new();
    let mut out = Vec::new();
    visit(spec.clone(), edges, &mut marks, &mut out)?;
    Ok(out)
}

fn visit(
    spec: ServiceSpec,
    edges: &Edges<'_>,
    marks: &mut HashMap<ServiceSpec, Mark>,
    out: &mut Vec<ServiceSpec>,
) -> Result<(), ResolveError> {
    match marks.get(&spec) {
        Some(Mark::Visited) => return Ok(()),
        Some(Mark::Visiting) => return Err(ResolveError::cyclic(spec.id().clone())),
        None => {}
    }

    marks.insert(spec.clone(), Mark::Visiting);
    for child in edges.children(&spec)? {
        visit(child, edges, marks, out)?;
    }
    marks.insert(spec.clone(), Mark::Visited);
    out.push(spec);

    Ok(())
}
