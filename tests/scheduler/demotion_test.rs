/*!
 * Demotion Tests
 * Quantum exhaustion, renewal at the bottom level, and voluntary yields
 */

use mlfq_kernel::scheduler::SchedState;
use mlfq_kernel::{Kernel, Pid, ProcessState, QueueLevel, TickOutcome, MAX_LEVEL};
use pretty_assertions::assert_eq;

fn kernel() -> Kernel {
    Kernel::builder().with_process_capacity(8).build().unwrap()
}

/// Spawn one process, put it on CPU 0, and move it to `level`
fn running_at(kernel: &Kernel, level: QueueLevel) -> Pid {
    let pid = kernel.spawn("hog").unwrap();
    assert_eq!(kernel.schedule(0).unwrap(), Some(pid));
    let slot = kernel.table().find(pid).unwrap();
    kernel.table().lock(slot).sched = SchedState::with_level(level);
    pid
}

#[test]
fn test_quantum_exhaustion_demotes_exactly_one_level() {
    for level in 0..MAX_LEVEL {
        let kernel = kernel();
        let pid = running_at(&kernel, level);
        let quantum = kernel.config().quantum(level);

        for used in 1..quantum {
            assert_eq!(kernel.cpu_tick(0).unwrap(), TickOutcome::Continue);
            assert_eq!(kernel.process_info(pid).unwrap().ticks_at_level, used);
        }
        assert_eq!(kernel.stats().total_demotions, 0);

        assert_eq!(
            kernel.cpu_tick(0).unwrap(),
            TickOutcome::Demoted {
                from: level,
                to: level + 1
            }
        );
        let info = kernel.process_info(pid).unwrap();
        assert_eq!(info.queue_level, level + 1);
        assert_eq!(info.ticks_at_level, 0);
        assert_eq!(kernel.stats().total_demotions, 1);
    }
}

#[test]
fn test_bottom_level_renews_without_demotion() {
    let kernel = kernel();
    let pid = running_at(&kernel, MAX_LEVEL);
    let quantum = kernel.config().quantum(MAX_LEVEL);

    for _ in 1..quantum {
        kernel.cpu_tick(0).unwrap();
    }
    assert_eq!(kernel.cpu_tick(0).unwrap(), TickOutcome::Renewed);

    let info = kernel.process_info(pid).unwrap();
    assert_eq!(info.queue_level, MAX_LEVEL);
    assert_eq!(info.ticks_at_level, 0);
    assert_eq!(kernel.stats().total_demotions, 0);
}

#[test]
fn test_renewal_yields_cpu_to_peer() {
    let kernel = kernel();
    let first = running_at(&kernel, MAX_LEVEL);
    let second = kernel.spawn("peer").unwrap();
    let slot = kernel.table().find(second).unwrap();
    kernel.table().lock(slot).sched = SchedState::with_level(MAX_LEVEL);

    for _ in 0..kernel.config().quantum(MAX_LEVEL) {
        kernel.cpu_tick(0).unwrap();
    }

    assert_eq!(kernel.current(0).unwrap(), Some(second));
    assert_eq!(
        kernel.process_info(first).unwrap().state,
        ProcessState::Runnable
    );
}

#[test]
fn test_yield_preserves_level_and_partial_ticks() {
    let kernel = kernel();
    let pid = running_at(&kernel, 2);

    kernel.cpu_tick(0).unwrap();
    kernel.cpu_tick(0).unwrap();
    kernel.yield_cpu(0).unwrap();

    let info = kernel.process_info(pid).unwrap();
    assert_eq!(info.queue_level, 2);
    assert_eq!(info.ticks_at_level, 2);
    assert_eq!(kernel.stats().total_demotions, 0);
}

#[test]
fn test_sleep_preserves_level_and_partial_ticks() {
    let kernel = kernel();
    let pid = running_at(&kernel, 1);

    kernel.cpu_tick(0).unwrap();
    kernel.sleep_current(0).unwrap();
    kernel.wakeup(pid).unwrap();

    let info = kernel.process_info(pid).unwrap();
    assert_eq!(info.state, ProcessState::Runnable);
    assert_eq!(info.queue_level, 1);
    assert_eq!(info.ticks_at_level, 1);
}

#[test]
fn test_partial_ticks_accumulate_across_runs() {
    let kernel = kernel();
    let pid = running_at(&kernel, 2);
    let quantum = kernel.config().quantum(2);

    // One tick per run, yielding in between: the quantum is still consumed
    for _ in 1..quantum {
        kernel.cpu_tick(0).unwrap();
        kernel.yield_cpu(0).unwrap();
        kernel.schedule(0).unwrap();
    }
    assert_eq!(
        kernel.cpu_tick(0).unwrap(),
        TickOutcome::Demoted { from: 2, to: 3 }
    );
    assert_eq!(kernel.process_info(pid).unwrap().queue_level, 3);
}

#[test]
fn test_level_never_exceeds_bottom() {
    let kernel = kernel();
    let pid = kernel.spawn("hog").unwrap();

    // Long enough to reach the bottom, short of the first periodic boost
    kernel.run_ticks(90);

    let info = kernel.process_info(pid).unwrap();
    assert_eq!(info.queue_level, MAX_LEVEL);
    assert!(info.ticks_at_level < kernel.config().quantum(MAX_LEVEL));
    assert_eq!(kernel.stats().total_demotions, MAX_LEVEL as u64);
}
