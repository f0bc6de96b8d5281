use std::sync::Arc;

use cfg::Cfg;
use clap::Parser;
use pqueue::test::stress::{StressTestConfig, run_stress_test};
use pqueue::{ChanneledQueue, NaiveQueue, PriorityQueue};

pub mod cfg;

fn main() {
    let cfg = cfg::Cfg::parse();
    println!("Running configuration:\n{cfg:#?}");

    let res = match cfg.implementation {
        cfg::Implementation::Naive => run_naive(cfg),
        cfg::Implementation::Locked => run_locked(cfg),
        cfg::Implementation::Channeled => run_channeled(cfg),
    };
    if let Err(e) = res {
        eprintln!("Error: {e:?}");
    }
}

fn run_naive(cfg: Cfg) -> anyhow::Result<()> {
    let queue = Arc::new(NaiveQueue::new(queue_capacity(&cfg)?));
    let results = run_stress_test(queue, stress_config(&cfg));
    results.print_summary();

    Ok(())
}

fn run_locked(cfg: Cfg) -> anyhow::Result<()> {
    let queue = Arc::new(PriorityQueue::with_capacity(queue_capacity(&cfg)?));
    let results = run_stress_test(queue, stress_config(&cfg));
    results.print_summary();

    Ok(())
}

fn run_channeled(cfg: Cfg) -> anyhow::Result<()> {
    let queue = Arc::new(ChanneledQueue::new(queue_capacity(&cfg)?));
    let results = run_stress_test(queue, stress_config(&cfg));
    results.print_summary();

    Ok(())
}

fn queue_capacity(cfg: &Cfg) -> anyhow::Result<usize> {
    cfg.job_num
        .checked_mul(cfg.producer_num)
        .ok_or_else(|| anyhow::anyhow!("Overflow while calculating queue capacity"))
}

fn stress_config(cfg: &Cfg) -> StressTestConfig {
    StressTestConfig {
        num_producers: cfg.producer_num,
        num_jobs: cfg.job_num,
        num_consumers: cfg.consumer_num,
        payload_size_range: (256, 1_024),
        drain_interval_ms: cfg.drain_interval_ms,
        drain_batch_size: cfg.drain_batch_size,
        priority_level_range: (1, 64),
        run_duration_seconds: cfg.run_duration_seconds,
    }
}
