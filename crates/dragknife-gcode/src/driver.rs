//! Stream driver
//!
//! Feeds a G-code stream line by line through the motion engine:
//! - classifies and tokenizes every line
//! - re-creates the engine with freshly resolved parameters when G20/G21
//!   changes the unit system
//! - resolves modal motion for lines that only carry axis words
//! - writes raw lines and generated commands to the output

use std::borrow::Cow;
use std::fmt;
use std::io::{BufRead, Write};

use dragknife_core::{MeasurementSystem, Result};
use tracing::{info, warn};

use crate::engine::{EngineStats, MotionEngine};
use crate::{classify, parse_block, MaterialSetup, MotionCode, OutputFilter, OutputOp};

/// What happened during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Input lines read
    pub lines: usize,
    /// Unit system changes (each one restarts the engine)
    pub unit_switches: usize,
    /// Lines passed through because a word could not be parsed
    pub malformed_lines: usize,
    /// Totals over every engine instance of the run
    pub engine: EngineStats,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines, {} rotations, {} lifts, {} skipped, {} dropped parameters, \
             {} unexpected codes, {} unit switches, {} malformed lines",
            self.lines,
            self.engine.rotations,
            self.engine.lifts,
            self.engine.skipped,
            self.engine.dropped_parameters,
            self.engine.unexpected_codes,
            self.unit_switches,
            self.malformed_lines
        )
    }
}

/// Line-by-line driver owning the active motion engine
#[derive(Debug)]
pub struct StreamDriver {
    setup: MaterialSetup,
    filter: OutputFilter,
    units: MeasurementSystem,
    engine: MotionEngine,
    modal: Option<MotionCode>,
    summary: RunSummary,
}

impl StreamDriver {
    /// Create a driver; the stream starts in metric units
    pub fn new(setup: MaterialSetup, filter: OutputFilter) -> Result<Self> {
        let units = MeasurementSystem::default();
        let engine = MotionEngine::new(setup.resolve(units), filter)?;
        Ok(Self {
            setup,
            filter,
            units,
            engine,
            modal: None,
            summary: RunSummary::default(),
        })
    }

    /// Unit system currently in force
    pub fn units(&self) -> MeasurementSystem {
        self.units
    }

    /// The engine for the current unit régime
    pub fn engine(&self) -> &MotionEngine {
        &self.engine
    }

    fn switch_units(&mut self, units: MeasurementSystem) -> Result<()> {
        info!("switching to {} units ({})", units, units.gcode());
        self.summary.unit_switches += 1;
        self.summary.engine += self.engine.stats();
        self.engine = MotionEngine::new(self.setup.resolve(units), self.filter)?;
        self.units = units;
        Ok(())
    }

    /// Transform one input line into zero or more output lines
    pub fn process_line(&mut self, line: &str) -> Result<Vec<String>> {
        self.summary.lines += 1;
        let line = classify(line);
        let block = match parse_block(&line.code) {
            Ok(block) => block,
            Err(e) => {
                warn!("passing line through unchanged ({}): {}", e, line.raw);
                self.summary.malformed_lines += 1;
                return Ok(vec![line.raw]);
            }
        };

        match block.units {
            Some(units) if units != self.units => self.switch_units(units)?,
            _ => {}
        }
        if block.cancel_motion {
            self.modal = None;
        }
        if let Some(motion) = &block.motion {
            self.modal = Some(motion.clone());
        }

        let motion = if block.non_motion {
            None
        } else if block.motion.is_some() {
            block.motion.clone()
        } else if block.has_axis_words() {
            self.modal.clone()
        } else {
            None
        };

        let Some(motion) = motion else {
            return Ok(vec![line.raw]);
        };
        let ops = self.engine.process(&motion, &block, &line.code)?;
        Ok(ops
            .into_iter()
            .map(|op| match op {
                OutputOp::RawLine => line.raw.clone(),
                OutputOp::Motion(text) => text,
            })
            .collect())
    }

    /// Close the run and report totals
    pub fn finish(mut self) -> RunSummary {
        self.summary.engine += self.engine.stats();
        self.summary
    }

    /// Transform a whole stream
    ///
    /// Bytes that are not valid UTF-8 are replaced and the line is processed
    /// as usual. Stops at the first contract violation; what was already
    /// written to `output` must then be discarded by the caller.
    pub fn run<R: BufRead, W: Write>(mut self, mut input: R, mut output: W) -> Result<RunSummary> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if let Cow::Owned(_) = line {
                warn!("replacing invalid UTF-8 in line {}", self.summary.lines + 1);
            }
            for out in self.process_line(&line)? {
                writeln!(output, "{}", out)?;
            }
        }
        output.flush()?;
        let summary = self.finish();
        info!("{}", summary);
        Ok(summary)
    }
}

/// Transform G-code held in memory
pub fn transform_str(
    setup: MaterialSetup,
    filter: OutputFilter,
    input: &str,
) -> Result<(String, RunSummary)> {
    let mut output = Vec::new();
    let summary = StreamDriver::new(setup, filter)?.run(input.as_bytes(), &mut output)?;
    let text = String::from_utf8(output).map_err(|e| dragknife_core::Error::other(e.to_string()))?;
    Ok((text, summary))
}
