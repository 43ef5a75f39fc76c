//! Shared fixtures for the integration tests.
//!
//! Two service graphs are used throughout:
//!
//! - the resolver graph `a → {b, c}`, `c → {b, d}`, `d → {e}`, plus the
//!   mutually-dependent pair `f ↔ g`;
//! - the runtime trio `loop → {sequence, log}` with two leaf services.
//!
//! `Parametric` models a service whose needs arrive through its start
//! arguments.

#![allow(dead_code)] // Not every test binary uses every fixture.

use std::time::Duration;

use servsys_coord::coordinator::{CoordinatorHandle, ServiceStatus};
use servsys_coord::spec::{Service, ServiceSpec, SpecInput, StartArg};

// ============================================================================
// Resolver graph: a → {b, c}, c → {b, d}, d → {e}
// ============================================================================

pub struct SvcA;
pub struct SvcB;
pub struct SvcC;
pub struct SvcD;
pub struct SvcE;
pub struct SvcF;
pub struct SvcG;

impl Service for SvcA {
    fn name(&self) -> &'static str {
        "a"
    }

    fn needs(&self) -> Vec<SpecInput> {
        vec![SpecInput::service(SvcB), SpecInput::service(SvcC)]
    }
}

impl Service for SvcB {
    fn name(&self) -> &'static str {
        "b"
    }
}

impl Service for SvcC {
    fn name(&self) -> &'static str {
        "c"
    }

    fn needs(&self) -> Vec<SpecInput> {
        vec![SpecInput::service(SvcB), SpecInput::service(SvcD)]
    }
}

impl Service for SvcD {
    fn name(&self) -> &'static str {
        "d"
    }

    fn needs(&self) -> Vec<SpecInput> {
        vec![SpecInput::service(SvcE)]
    }
}

impl Service for SvcE {
    fn name(&self) -> &'static str {
        "e"
    }
}

impl Service for SvcF {
    fn name(&self) -> &'static str {
        "f"
    }

    fn needs(&self) -> Vec<SpecInput> {
        vec![SpecInput::service(SvcG)]
    }
}

impl Service for SvcG {
    fn name(&self) -> &'static str {
        "g"
    }

    fn needs(&self) -> Vec<SpecInput> {
        vec![SpecInput::service(SvcF)]
    }
}

// ============================================================================
// Runtime trio: loop → {sequence, log}
// ============================================================================

pub struct SequenceSvc;
pub struct LogSvc;
pub struct LoopSvc;

impl Service for SequenceSvc {
    fn name(&self) -> &'static str {
        "sequence"
    }
}

impl Service for LogSvc {
    fn name(&self) -> &'static str {
        "log"
    }
}

impl Service for LoopSvc {
    fn name(&self) -> &'static str {
        "loop"
    }

    fn needs(&self) -> Vec<SpecInput> {
        vec![SpecInput::service(SequenceSvc), SpecInput::service(LogSvc)]
    }
}

// ============================================================================
// Parametric service: needs are carried in the start arguments
// ============================================================================

pub struct Parametric;

impl Service for Parametric {
    fn name(&self) -> &'static str {
        "h"
    }

    fn needs_with(&self, args: &[StartArg]) -> Option<Vec<SpecInput>> {
        match args {
            [StartArg::Specs(specs)] => Some(specs.iter().cloned().map(SpecInput::from).collect()),
            _ => None,
        }
    }
}

/// Builds the parametric spec carrying the given needs.
pub fn parametric(needs: Vec<ServiceSpec>) -> ServiceSpec {
    ServiceSpec::new(Parametric).with_arg(needs)
}

// ============================================================================
// Helpers
// ============================================================================

/// Polls `status` until it reads `expected`, failing after ~1s.
pub async fn wait_for_status(
    coordinator: &CoordinatorHandle,
    spec: &ServiceSpec,
    expected: ServiceStatus,
) {
    for _ in 0..200 {
        let status = coordinator
            .status(spec.clone())
            .await
            .expect("status query failed");
        if status == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("'{}' never reached {expected:?}", spec.id());
}

/// Ids of the given specs, in order.
pub fn ids(specs: &[ServiceSpec]) -> Vec<&str> {
    specs.iter().map(|s| s.id().as_str()).collect()
}
