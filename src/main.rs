/*!
 * MLFQ Kernel - Demo Entry Point
 *
 * Boots a kernel, starts the timer, and runs a mixed workload:
 * - CPU-bound processes that burn whole quanta and sink to the bottom level
 * - interactive processes that are boosted back to the top through boostproc
 *
 * Finishes by reaping exited processes and printing the statistics report as JSON.
 */

use mlfq_kernel::{
    init_tracing, AddressSpace, Kernel, MlfqConfig, ProcessState, Syscall, TimerTask, NLEVELS,
};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const CPU_BOUND: usize = 3;
const INTERACTIVE: usize = 3;
const RUN_FOR: Duration = Duration::from_millis(500);
const TICK_PERIOD: Duration = Duration::from_millis(1);
const FOCUS_PERIOD: Duration = Duration::from_millis(20);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let mlfq = MlfqConfig::from_env()?;
    let kernel = Arc::new(
        Kernel::builder()
            .with_cpus(2)
            .with_mlfq(mlfq)
            .build()?,
    );

    let crunchers = (0..CPU_BOUND)
        .map(|i| kernel.spawn(&format!("cruncher-{i}")))
        .collect::<Result<Vec<_>, _>>()?;
    let cruncher = crunchers.first().copied();
    let interactive = (0..INTERACTIVE)
        .map(|i| kernel.spawn(&format!("editor-{i}")))
        .collect::<Result<Vec<_>, _>>()?;

    let timer = TimerTask::spawn(Arc::clone(&kernel), TICK_PERIOD);

    // A "window manager" keeps the interactive processes responsive and retires one cruncher
    let wm_kernel = Arc::clone(&kernel);
    let wm_task = tokio::spawn(async move {
        let mut mem = AddressSpace::new(0x1000, 64);
        let mut focus = tokio::time::interval(FOCUS_PERIOD);
        let deadline = tokio::time::Instant::now() + RUN_FOR;
        let mut killed = false;

        while tokio::time::Instant::now() < deadline {
            focus.tick().await;
            for &pid in &interactive {
                wm_kernel.handle_syscall(0, Syscall::BoostProc { pid }, &mut mem);
            }
            if !killed && deadline.saturating_duration_since(tokio::time::Instant::now()) < RUN_FOR / 2 {
                if let Some(victim) = cruncher {
                    info!(pid = victim, "retiring cruncher");
                    let _ = wm_kernel.kill(victim);
                }
                killed = true;
            }
        }
    });

    wm_task.await?;
    timer.shutdown().await;

    // Query the statistics the way a user program would
    let mut mem = AddressSpace::new(0x1000, 256);
    let ret = kernel.handle_syscall(0, Syscall::GetSchedulerStats { addr: 0x1000 }, &mut mem);
    info!(ret, "getschedulerstats");

    for info in kernel.processes() {
        if info.state == ProcessState::Zombie {
            kernel.reap(info.pid)?;
            info!(pid = info.pid, name = %info.name, "reaped");
            continue;
        }
        info!(
            pid = info.pid,
            name = %info.name,
            level = info.queue_level,
            schedules = info.lifetime_schedule_count,
            "process"
        );
    }

    let stats = kernel.stats();
    let report = stats.report();
    for level in 0..NLEVELS {
        info!(
            level,
            schedules = stats.level_schedule_count[level],
            share_percent = report.level_share_percent[level],
            "level"
        );
    }
    info!(ticks = kernel.ticks(), health = ?report.health, "run complete");
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
