/*!
 * Scheduler Invariant Tests
 * Random operation sequences against a two-CPU kernel
 */

use mlfq_kernel::{BoostTarget, Kernel, MlfqConfig, ProcessState, MAX_LEVEL};
use proptest::prelude::*;

const NCPU: usize = 2;

#[derive(Debug, Clone)]
enum Op {
    Tick,
    Spawn,
    Yield(usize),
    Sleep(usize),
    WakeAll,
    Exit(usize),
    Kill(u32),
    Boost(u32),
    ReapAll,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => Just(Op::Tick),
        2 => Just(Op::Spawn),
        2 => (0..NCPU).prop_map(Op::Yield),
        1 => (0..NCPU).prop_map(Op::Sleep),
        1 => Just(Op::WakeAll),
        1 => (0..NCPU).prop_map(Op::Exit),
        1 => (1..12u32).prop_map(Op::Kill),
        1 => (0..12u32).prop_map(Op::Boost),
        1 => Just(Op::ReapAll),
    ]
}

fn apply(kernel: &Kernel, op: &Op) {
    // Failures (idle CPU, unknown pid, full table) are part of the exercise
    match *op {
        Op::Tick => {
            kernel.tick();
        }
        Op::Spawn => {
            let _ = kernel.spawn("worker");
        }
        Op::Yield(cpu) => {
            let _ = kernel.yield_cpu(cpu);
        }
        Op::Sleep(cpu) => {
            let _ = kernel.sleep_current(cpu);
        }
        Op::WakeAll => {
            for info in kernel.processes() {
                if info.state == ProcessState::Sleeping {
                    let _ = kernel.wakeup(info.pid);
                }
            }
        }
        Op::Exit(cpu) => {
            let _ = kernel.exit_current(cpu);
        }
        Op::Kill(pid) => {
            let _ = kernel.kill(pid);
        }
        Op::Boost(pid) => {
            let _ = kernel.boost(BoostTarget::from(pid));
        }
        Op::ReapAll => {
            for info in kernel.processes() {
                if info.state == ProcessState::Zombie {
                    let _ = kernel.reap(info.pid);
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_random_operations_keep_invariants(ops in prop::collection::vec(op(), 1..300)) {
        let kernel = Kernel::builder()
            .with_cpus(NCPU)
            .with_process_capacity(8)
            .with_mlfq(MlfqConfig::new([1, 2, 4, 8], 25).unwrap())
            .build()
            .unwrap();

        for op in &ops {
            apply(&kernel, op);

            let stats = kernel.stats();
            prop_assert!(stats.is_consistent(), "{:?} after {:?}", stats, op);

            let infos = kernel.processes();
            for info in &infos {
                prop_assert!(info.queue_level <= MAX_LEVEL);
                prop_assert!(info.ticks_at_level < kernel.config().quantum(info.queue_level));
            }

            let running = infos.iter().filter(|info| info.state == ProcessState::Running).count();
            let busy = (0..NCPU)
                .filter(|&cpu| kernel.current(cpu).unwrap().is_some())
                .count();
            prop_assert_eq!(running, busy);
        }

        // One periodic boost per elapsed interval, plus every system-wide manual boost
        let manual = ops.iter().filter(|op| matches!(op, Op::Boost(0))).count() as u64;
        let periodic = kernel.ticks() / 25;
        prop_assert_eq!(kernel.stats().total_boosts, periodic + manual);
    }
}
