// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subscribers the `clock` command attaches to the ticker

use chime_core::{Handler, HandlerResult, Tick};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// Prints each tick to stdout
#[derive(Debug, Default)]
pub struct DisplayClock;

impl DisplayClock {
    pub fn line(tick: &Tick) -> String {
        format!("Current Time: {}", tick.at.format(TIME_FORMAT))
    }
}

impl Handler<Tick> for DisplayClock {
    fn call(&self, tick: &Tick) -> HandlerResult {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", Self::line(tick))?;
        stdout.flush()?;
        Ok(())
    }
}

/// Appends each tick to a log file
#[derive(Debug)]
pub struct LogClock {
    path: PathBuf,
    file: Mutex<File>,
}

impl LogClock {
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn line(tick: &Tick) -> String {
        format!("Logging to file: {}", tick.at.format(TIME_FORMAT))
    }
}

impl Handler<Tick> for LogClock {
    fn call(&self, tick: &Tick) -> HandlerResult {
        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(file, "{}", Self::line(tick))?;
        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "observers_tests.rs"]
mod tests;
