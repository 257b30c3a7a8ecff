/*!
 * Fairness Tests
 * Level priority, round-robin within a level, and starvation freedom
 */

use mlfq_kernel::scheduler::SchedState;
use mlfq_kernel::{Kernel, Mlfq, Pid, ProcessState, ProcessTable, MAX_LEVEL};
use pretty_assertions::assert_eq;
use std::collections::{HashMap, HashSet};

fn table_at_level(count: usize, level: usize) -> ProcessTable {
    let table = ProcessTable::new(16);
    for i in 0..count {
        let (slot, _) = table.allocate(&format!("p{i}")).unwrap();
        table.lock(slot).sched = SchedState::with_level(level);
    }
    table
}

#[test]
fn test_each_peer_dispatched_within_n_dispatches() {
    for level in 0..=MAX_LEVEL {
        let n = 5;
        let mlfq = Mlfq::default();
        let table = table_at_level(n, level);

        let mut window = Vec::new();
        for _ in 0..n * 4 {
            let dispatch = mlfq.select(&table).unwrap();
            assert_eq!(dispatch.level, level);
            window.push(dispatch.pid);
            table
                .transition(dispatch.slot, ProcessState::Running, ProcessState::Runnable)
                .unwrap();
        }

        for chunk in window.windows(n) {
            let distinct: HashSet<Pid> = chunk.iter().copied().collect();
            assert_eq!(distinct.len(), n, "window {chunk:?} at level {level}");
        }
    }
}

#[test]
fn test_higher_level_always_preferred() {
    let mlfq = Mlfq::default();
    let table = ProcessTable::new(8);
    let (low, _) = table.allocate("batch").unwrap();
    table.lock(low).sched = SchedState::with_level(MAX_LEVEL);
    let (high, _) = table.allocate("shell").unwrap();

    for _ in 0..10 {
        let dispatch = mlfq.select(&table).unwrap();
        assert_eq!(dispatch.slot, high);
        table
            .transition(high, ProcessState::Running, ProcessState::Runnable)
            .unwrap();
    }
    assert_eq!(table.lock(low).sched.lifetime_schedule_count(), 0);
}

#[test]
fn test_no_starvation_under_cpu_hogs() {
    let kernel = Kernel::builder().with_process_capacity(8).build().unwrap();
    let pids: Vec<_> = (0..4)
        .map(|i| kernel.spawn(&format!("hog{i}")).unwrap())
        .collect();
    let interval = kernel.config().boost_interval;

    let mut last_at_top: HashMap<Pid, u64> = pids.iter().map(|&pid| (pid, 0)).collect();
    for _ in 0..1_000 {
        let now = kernel.tick();
        for info in kernel.processes() {
            let last = last_at_top.get_mut(&info.pid).unwrap();
            if info.queue_level == 0 {
                *last = now;
            }
            assert!(
                now - *last <= interval,
                "pid {} away from level 0 for {} ticks",
                info.pid,
                now - *last
            );
        }
    }
}

#[test]
fn test_hogs_share_cpu_evenly() {
    let kernel = Kernel::builder().with_process_capacity(8).build().unwrap();
    let pids: Vec<_> = (0..3)
        .map(|i| kernel.spawn(&format!("hog{i}")).unwrap())
        .collect();

    kernel.run_ticks(600);

    let counts: Vec<u64> = pids
        .iter()
        .map(|&pid| kernel.process_info(pid).unwrap().lifetime_schedule_count)
        .collect();
    let min = *counts.iter().min().unwrap();
    let max = *counts.iter().max().unwrap();
    assert!(max - min <= max / 5, "uneven dispatch counts {counts:?}");
}
