/*!
 * Timer Task
 * Background task delivering timer interrupts to the kernel
 *
 * Each period is one global tick: every CPU charges its running process
 * and the periodic boost check runs. The task can be paused, re-timed, or
 * fired manually through its handle.
 */

use crate::kernel::Kernel;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, trace, warn};

/// Control messages for the timer task
#[derive(Debug, Clone)]
pub enum TimerCommand {
    /// Change the interrupt period
    SetPeriod(Duration),
    /// Stop delivering ticks
    Pause,
    /// Resume delivering ticks
    Resume,
    /// Deliver one tick now, even while paused
    Trigger,
    /// Stop the task
    Shutdown,
}

/// Handle to the timer background task
pub struct TimerTask {
    command_tx: mpsc::UnboundedSender<TimerCommand>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TimerTask {
    /// Spawn the timer on the current tokio runtime
    pub fn spawn(kernel: Arc<Kernel>, period: Duration) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            run_timer_loop(kernel, period, command_rx).await;
        });

        info!(period_us = period.as_micros() as u64, "timer task spawned");

        Self {
            command_tx,
            handle: Some(handle),
        }
    }

    pub fn set_period(&self, period: Duration) {
        let _ = self.command_tx.send(TimerCommand::SetPeriod(period));
    }

    pub fn pause(&self) {
        let _ = self.command_tx.send(TimerCommand::Pause);
    }

    pub fn resume(&self) {
        let _ = self.command_tx.send(TimerCommand::Resume);
    }

    pub fn trigger(&self) {
        let _ = self.command_tx.send(TimerCommand::Trigger);
    }

    /// Stop the task and wait for it to finish
    pub async fn shutdown(mut self) {
        let _ = self.command_tx.send(TimerCommand::Shutdown);

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "timer task shutdown error");
            } else {
                info!("timer task shutdown complete");
            }
        }
    }
}

fn interval(period: Duration) -> tokio::time::Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    interval
}

async fn run_timer_loop(
    kernel: Arc<Kernel>,
    period: Duration,
    mut command_rx: mpsc::UnboundedReceiver<TimerCommand>,
) {
    let mut active = true;
    let mut ticker = interval(period);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if active {
                    let now = kernel.tick();
                    trace!(tick = now, "timer interrupt");
                }
            }

            cmd = command_rx.recv() => {
                match cmd {
                    Some(TimerCommand::SetPeriod(period)) => {
                        info!(period_us = period.as_micros() as u64, "timer period updated");
                        ticker = interval(period);
                    }
                    Some(TimerCommand::Pause) => {
                        info!("timer paused");
                        active = false;
                    }
                    Some(TimerCommand::Resume) => {
                        info!("timer resumed");
                        active = true;
                    }
                    Some(TimerCommand::Trigger) => {
                        let now = kernel.tick();
                        trace!(tick = now, "manual timer interrupt");
                    }
                    Some(TimerCommand::Shutdown) | None => {
                        info!("timer task shutting down");
                        break;
                    }
                }
            }
        }
    }
}

impl Drop for TimerTask {
    fn drop(&mut self) {
        if self.handle.is_some() {
            let _ = self.command_tx.send(TimerCommand::Shutdown);
        }
    }
}
