/*!
 * Boost Tests
 * Periodic boost timing and the two manual boost forms
 */

use mlfq_kernel::scheduler::SchedState;
use mlfq_kernel::{BoostTarget, Kernel, KernelError, MlfqConfig, Pid, ProcessError, MAX_LEVEL};
use pretty_assertions::assert_eq;

fn kernel_with_interval(interval: u64) -> Kernel {
    Kernel::builder()
        .with_process_capacity(8)
        .with_mlfq(MlfqConfig::new([1, 2, 4, 8], interval).unwrap())
        .build()
        .unwrap()
}

fn set_level(kernel: &Kernel, pid: Pid, level: usize) {
    let slot = kernel.table().find(pid).unwrap();
    kernel.table().lock(slot).sched = SchedState::with_level(level);
}

fn levels(kernel: &Kernel) -> Vec<(usize, u64)> {
    kernel
        .processes()
        .iter()
        .map(|info| (info.queue_level, info.ticks_at_level))
        .collect()
}

#[test]
fn test_periodic_boost_resets_everyone_and_counts_once() {
    let kernel = kernel_with_interval(100);
    for i in 0..5 {
        kernel.spawn(&format!("p{i}")).unwrap();
    }

    kernel.run_ticks(99);
    assert_eq!(kernel.stats().total_boosts, 0);
    assert!(levels(&kernel).iter().any(|&(level, _)| level > 0));

    kernel.tick();
    assert_eq!(kernel.stats().total_boosts, 1);
    assert!(levels(&kernel).iter().all(|&level| level == (0, 0)));
}

#[test]
fn test_periodic_boost_repeats_every_interval() {
    let kernel = kernel_with_interval(10);
    kernel.spawn("hog").unwrap();

    kernel.run_ticks(35);
    assert_eq!(kernel.stats().total_boosts, 3);
    assert_eq!(kernel.mlfq().boost_timer().last_boost_tick(), 30);
}

#[test]
fn test_boost_all_counts_once_and_keeps_timer() {
    let kernel = kernel_with_interval(100);
    let pids: Vec<_> = (0..3).map(|i| kernel.spawn(&format!("p{i}")).unwrap()).collect();
    for (i, &pid) in pids.iter().enumerate() {
        set_level(&kernel, pid, i + 1);
    }

    kernel.run_ticks(40);
    kernel.boost(BoostTarget::All).unwrap();

    assert_eq!(kernel.stats().total_boosts, 1);
    assert!(levels(&kernel).iter().all(|&(level, _)| level == 0));
    assert_eq!(kernel.mlfq().boost_timer().last_boost_tick(), 0);

    // The periodic timer still fires on its own schedule
    kernel.run_ticks(60);
    assert_eq!(kernel.ticks(), 100);
    assert_eq!(kernel.stats().total_boosts, 2);
}

#[test]
fn test_boost_all_on_empty_table() {
    let kernel = kernel_with_interval(100);
    kernel.boost(BoostTarget::All).unwrap();
    assert_eq!(kernel.stats().total_boosts, 1);
}

#[test]
fn test_single_boost_touches_only_target() {
    let kernel = kernel_with_interval(100);
    let target = kernel.spawn("target").unwrap();
    let bystander = kernel.spawn("bystander").unwrap();
    set_level(&kernel, target, MAX_LEVEL);
    set_level(&kernel, bystander, 2);

    kernel.boost(BoostTarget::Process(target)).unwrap();

    assert_eq!(kernel.process_info(target).unwrap().queue_level, 0);
    assert_eq!(kernel.process_info(bystander).unwrap().queue_level, 2);
    assert_eq!(kernel.stats().total_boosts, 0);
}

#[test]
fn test_single_boost_unknown_pid_changes_nothing() {
    let kernel = kernel_with_interval(100);
    let pid = kernel.spawn("p").unwrap();
    set_level(&kernel, pid, 2);
    let before = (levels(&kernel), kernel.stats());

    assert!(matches!(
        kernel.boost(BoostTarget::Process(pid + 100)),
        Err(KernelError::Process(ProcessError::NotFound(_)))
    ));
    assert_eq!((levels(&kernel), kernel.stats()), before);
}

#[test]
fn test_boost_zombie_is_harmless() {
    let kernel = kernel_with_interval(100);
    let pid = kernel.spawn("short").unwrap();
    kernel.cpu_tick(0).unwrap();
    kernel.exit_current(0).unwrap();

    kernel.boost(BoostTarget::Process(pid)).unwrap();
    kernel.boost(BoostTarget::All).unwrap();
    kernel.reap(pid).unwrap();
    assert_eq!(kernel.processes(), vec![]);
}

#[test]
fn test_pid_zero_means_everyone() {
    assert_eq!(BoostTarget::from(0), BoostTarget::All);
    assert_eq!(BoostTarget::from(7), BoostTarget::Process(7));
}
