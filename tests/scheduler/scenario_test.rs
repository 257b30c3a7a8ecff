/*!
 * End-to-End Scenario
 * One CPU-bound process under the default configuration, from creation to the first boost
 */

use mlfq_kernel::{Kernel, ProcessState, MAX_LEVEL};
use pretty_assertions::assert_eq;

#[test]
fn test_cpu_bound_process_sinks_then_boosts() {
    let kernel = Kernel::builder().build().unwrap();
    assert_eq!(kernel.config().quantum_table, [1, 2, 4, 8]);
    assert_eq!(kernel.config().boost_interval, 100);

    let pid = kernel.spawn("cruncher").unwrap();

    // (tick, expected level, expected total demotions)
    let demotions = [(1, 1, 1), (3, 2, 2), (7, 3, 3)];
    let mut expected_level = 0;
    let mut expected_demotions = 0;

    for tick in 1..100u64 {
        assert_eq!(kernel.tick(), tick);

        if let Some(&(_, level, total)) = demotions.iter().find(|&&(at, _, _)| at == tick) {
            expected_level = level;
            expected_demotions = total;
        }

        let info = kernel.process_info(pid).unwrap();
        assert_eq!(info.state, ProcessState::Running, "tick {tick}");
        assert_eq!(info.queue_level, expected_level, "tick {tick}");
        assert_eq!(kernel.stats().total_demotions, expected_demotions, "tick {tick}");

        if tick >= 7 {
            // Bottom level: the window restarts every 8 ticks
            assert_eq!(info.ticks_at_level, (tick - 7) % 8, "tick {tick}");
        }
    }
    assert_eq!(kernel.stats().total_boosts, 0);

    assert_eq!(kernel.tick(), 100);
    let info = kernel.process_info(pid).unwrap();
    assert_eq!(info.queue_level, 0);
    assert_eq!(info.ticks_at_level, 0);

    let stats = kernel.stats();
    assert_eq!(stats.total_boosts, 1);
    assert_eq!(stats.total_demotions, MAX_LEVEL as u64);
    // Initial dispatch, one per demotion, one per bottom-level renewal (ticks 15, 23, ..., 95)
    assert_eq!(stats.total_schedules, 15);
    assert_eq!(stats.level_schedule_count, [1, 1, 1, 12]);
    assert_eq!(info.lifetime_schedule_count, 15);
}

#[test]
fn test_scenario_continues_after_boost() {
    let kernel = Kernel::builder().build().unwrap();
    let pid = kernel.spawn("cruncher").unwrap();

    kernel.run_ticks(101);
    // First tick after the boost exhausts the level-0 quantum again
    assert_eq!(kernel.process_info(pid).unwrap().queue_level, 1);
    assert_eq!(kernel.stats().total_demotions, 4);

    kernel.run_ticks(99);
    assert_eq!(kernel.stats().total_boosts, 2);
    assert_eq!(kernel.process_info(pid).unwrap().queue_level, 0);
}
