// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `chime clock` - Run the ticker with display and log observers

use crate::config::Config;
use crate::observers::{DisplayClock, LogClock};
use anyhow::{Context, Result};
use chime_core::{Subscriber, SystemClock, Ticker};
use clap::Args;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub struct ClockArgs {
    /// Stop after this many ticks (default: run until interrupted)
    #[arg(long)]
    pub ticks: Option<usize>,

    /// Milliseconds between clock reads
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Milliseconds per tick bucket
    #[arg(long)]
    pub resolution_ms: Option<u64>,

    /// Also append each tick to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Do not print ticks to stdout
    #[arg(short, long)]
    pub quiet: bool,
}

impl ClockArgs {
    /// Apply flag overrides on top of the loaded config
    pub fn merge(&self, mut config: Config) -> Result<Config> {
        if let Some(ticks) = self.ticks {
            config.clock.ticks = Some(ticks);
        }
        if let Some(interval_ms) = self.interval_ms {
            config.clock.interval_ms = interval_ms;
        }
        if let Some(resolution_ms) = self.resolution_ms {
            config.clock.resolution_ms = resolution_ms;
        }
        if let Some(path) = &self.log_file {
            config.log.file = Some(path.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn clock(args: ClockArgs, config: Config) -> Result<()> {
    let config = args.merge(config)?;

    let mut ticker = Ticker::with_resolution(SystemClock, config.clock.resolution());
    let second_change = ticker.events().second_change();

    if !args.quiet {
        second_change.subscribe_named("display", Subscriber::from_handler(DisplayClock));
    }
    if let Some(path) = &config.log.file {
        let log = LogClock::open(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        second_change.subscribe_named("log", Subscriber::from_handler(log));
    }

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    let fired = ticker.run_while(config.clock.ticks, config.clock.interval(), || {
        running.load(Ordering::SeqCst)
    })?;

    if !args.quiet {
        println!("Stopped after {} ticks", fired);
    }
    Ok(())
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
