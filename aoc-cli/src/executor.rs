//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::ExecutorError;
use crate::input::InputStore;
use aoc_solver::{DynSolver, SolverRegistry, Verdict};
use chrono::TimeDelta;
use itertools::Itertools;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::sync::mpsc::Sender;

/// Result from a single solver execution
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    /// Shared so one input or parse failure can be reported on every part
    pub answer: Result<String, Arc<ExecutorError>>,
    pub verdict: Verdict,
    pub solve_duration: TimeDelta,
    /// Time spent parsing the input this answer was computed from
    pub parse_duration: Option<TimeDelta>,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: Arc<ExecutorError>) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            verdict: Verdict::Unchecked,
            solve_duration: TimeDelta::zero(),
            parse_duration: None,
        }
    }
}

/// Work item representing a solver to execute
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    shared: SharedConfig,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker thread needs, borrowed across the pool
struct SharedConfig {
    registry: SolverRegistry,
    store: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            shared: SharedConfig {
                registry,
                store: InputStore::new(config.inputs_dir.clone(), config.example),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.shared;
        cfg.registry
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(cfg.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Year/day pairs whose input file is missing
    pub fn missing_inputs(&self, work_items: &[WorkItem]) -> Vec<(u16, u8)> {
        work_items
            .iter()
            .filter(|w| !self.shared.store.contains(w.year, w.day))
            .map(|w| (w.year, w.day))
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ExecutorError> {
        let work_items = self.collect_work_items();
        info!(
            "executing {} solver(s) on {} thread(s), parallelized by {:?}",
            work_items.len(),
            self.thread_pool.current_num_threads(),
            self.shared.parallelize_by
        );

        match self.shared.parallelize_by {
            ParallelizeBy::Sequential => work_items
                .iter()
                .filter_map(|work| run_work_item(work, &tx, &self.shared).err())
                .reduce(ExecutorError::combine)
                .map_or(Ok(()), Err),
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part differs from Day inside run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => {
                self.execute_parallel_grouped(work_items.into_iter().map(|w| vec![w]).collect(), &tx)
            }
        }
    }

    /// Run each group on the pool; items within a group run in order
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ExecutorError> {
        let shared = &self.shared;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map_with(tx.clone(), |tx, items| {
                    items
                        .iter()
                        .filter_map(|work| run_work_item(work, tx, shared).err())
                        .reduce(ExecutorError::combine)
                })
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(e1), e2) => Some(ExecutorError::combine_opt(e2, e1)),
                    (None, e2) => e2,
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }
}

/// Parts to run given the `--part` filter and the solver's part count
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ExecutorError> {
    tx.send(result).map_err(|_| ExecutorError::ChannelSend)
}

/// Send the same failure once per part
fn send_failure(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    error: ExecutorError,
) -> Result<(), ExecutorError> {
    warn!("{}/{:02}: {}", work.year, work.day, error);
    let error = Arc::new(error);
    for part in work.parts.clone() {
        send(tx, SolverResult::failed(work.year, work.day, part, Arc::clone(&error)))?;
    }
    Ok(())
}

/// Read the input for one year/day and solve its selected parts
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    shared: &SharedConfig,
) -> Result<(), ExecutorError> {
    let (year, day) = (work.year, work.day);

    let input = match shared.store.read_input(year, day) {
        Ok(input) => input,
        Err(source) => {
            return send_failure(work, tx, ExecutorError::InputRead { year, day, source });
        }
    };

    if matches!(shared.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, shared)
    } else {
        run_parts_sequential(work, &input, tx, shared)
    }
}

/// Parse once, then solve every part in order
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    shared: &SharedConfig,
) -> Result<(), ExecutorError> {
    let (year, day) = (work.year, work.day);
    let mut solver = match shared.registry.create_solver(year, day, input) {
        Ok(solver) => solver,
        Err(e) => return send_failure(work, tx, e.into()),
    };
    debug!("{}/{:02}: parsed in {}", year, day, solver.parse_duration());

    for part in work.parts.clone() {
        send(tx, solve_part(&mut *solver, part, &shared.store))?;
    }
    Ok(())
}

/// Solve parts concurrently, each from its own parse of the input
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    shared: &SharedConfig,
) -> Result<(), ExecutorError> {
    let (year, day) = (work.year, work.day);

    let results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match shared.registry.create_solver(year, day, input) {
            Ok(mut solver) => solve_part(&mut *solver, part, &shared.store),
            Err(e) => SolverResult::failed(year, day, part, Arc::new(e.into())),
        })
        .collect();

    results.into_iter().try_for_each(|result| send(tx, result))
}

fn solve_part(solver: &mut dyn DynSolver, part: u8, store: &InputStore) -> SolverResult {
    let (year, day) = (solver.year(), solver.day());

    let expected = store
        .expected_answer(year, day, part)
        .unwrap_or_else(|e| {
            warn!("{}/{:02} part {}: ignoring expected answer: {}", year, day, part, e);
            None
        });

    match solver.solve_checked(part, expected.as_deref()) {
        Ok(result) => {
            debug!(
                "{}/{:02} part {}: {} ({:?})",
                year, day, part, result.answer, result.verdict
            );
            SolverResult {
                year,
                day,
                part,
                solve_duration: result.duration(),
                parse_duration: Some(solver.parse_duration()),
                answer: Ok(result.answer),
                verdict: result.verdict,
            }
        }
        Err(e) => SolverResult::failed(
            year,
            day,
            part,
            Arc::new(ExecutorError::Solver(e.into())),
        ),
    }
}
