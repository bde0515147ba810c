// crates/rill-docs-engine/src/pool.rs
// ============================================================================
// Module: Worker Pool
// Description: Bounded parallel execution over indexed tasks.
// Purpose: Validate and generate across functions using available cores.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Validation and generation for distinct functions are mutually independent,
//! so the engine fans them out over a small pool of scoped threads. Workers
//! share nothing mutable: each task writes into its own result slot, and the
//! caller reassembles results in task order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::mpsc;
use std::thread;

use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Upper bound on worker threads regardless of core count.
const MAX_WORKERS: usize = 8;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Internal pool failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum PoolError {
    /// A task produced no result; a worker died without reporting.
    #[error("missing result for task {0}")]
    MissingResult(usize),
}

// ============================================================================
// SECTION: Pool
// ============================================================================

/// Runs `job` for every index in `0..count` and returns results in index
/// order.
///
/// Workers stride over the index space, so ordering of execution is
/// arbitrary while ordering of results is fixed.
pub(crate) fn run_indexed<T, F>(count: usize, job: F) -> Result<Vec<T>, PoolError>
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    if count == 0 {
        return Ok(Vec::new());
    }
    let workers = thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(4)
        .min(MAX_WORKERS)
        .min(count)
        .max(1);

    let (sender, receiver) = mpsc::channel();
    thread::scope(|scope| {
        for worker in 0 .. workers {
            let sender = sender.clone();
            let job = &job;
            scope.spawn(move || {
                let mut index = worker;
                while index < count {
                    if sender.send((index, job(index))).is_err() {
                        return;
                    }
                    index += workers;
                }
            });
        }
        drop(sender);

        let mut slots: Vec<Option<T>> = (0 .. count).map(|_| None).collect();
        for (index, value) in receiver {
            if let Some(slot) = slots.get_mut(index) {
                *slot = Some(value);
            }
        }
        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or(PoolError::MissingResult(index)))
            .collect()
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
