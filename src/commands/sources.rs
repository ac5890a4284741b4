//! Independent sources and their waveforms.

use std::fmt;

use super::write_opt;
use crate::spice::format_number;

/// Time-domain specification of an independent source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    /// `DC <level>`
    Dc(f64),
    /// `SIN(<offset> <amplitude> <freq> <delay> <damping> <phase>)`
    Sine {
        offset: f64,
        amplitude: f64,
        frequency: f64,
        delay: f64,
        damping: f64,
        phase: f64,
    },
    /// `PULSE(<initial> <pulsed> <delay> 1n 1n <width> <period>)`
    Pulse {
        initial: f64,
        pulsed: f64,
        delay: f64,
        width: f64,
        period: f64,
    },
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Waveform::Dc(level) => write!(f, "DC {}", format_number(level)),
            Waveform::Sine {
                offset,
                amplitude,
                frequency,
                delay,
                damping,
                phase,
            } => write!(
                f,
                "SIN({} {} {} {} {} {})",
                format_number(offset),
                format_number(amplitude),
                format_number(frequency),
                format_number(delay),
                format_number(damping),
                format_number(phase)
            ),
            // Edges are fixed at 1ns
            Waveform::Pulse {
                initial,
                pulsed,
                delay,
                width,
                period,
            } => write!(
                f,
                "PULSE({} {} {} 1n 1n {} {})",
                format_number(initial),
                format_number(pulsed),
                format_number(delay),
                format_number(width),
                format_number(period)
            ),
        }
    }
}

/// `V<name> <n+> <n-> [<value>] [AC <mag> [<phase>]]`
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageSourceCommand {
    pub name: String,
    pub positive_node: String,
    pub negative_node: String,
    pub value: Option<String>,
    pub ac_magnitude: Option<String>,
    pub ac_phase: Option<String>,
}

impl VoltageSourceCommand {
    pub fn new(
        name: impl Into<String>,
        positive_node: impl Into<String>,
        negative_node: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            positive_node: positive_node.into(),
            negative_node: negative_node.into(),
            value: None,
            ac_magnitude: None,
            ac_phase: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_waveform(self, waveform: Waveform) -> Self {
        self.with_value(waveform.to_string())
    }

    pub fn with_ac(mut self, magnitude: impl Into<String>, phase: Option<String>) -> Self {
        self.ac_magnitude = Some(magnitude.into());
        self.ac_phase = phase;
        self
    }
}

impl fmt::Display for VoltageSourceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{} {} {}", self.name, self.positive_node, self.negative_node)?;
        write_source_tail(f, &self.value, &self.ac_magnitude, &self.ac_phase)
    }
}

/// `I<name> <n+> <n-> [<value>] [AC <mag> [<phase>]]`
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSourceCommand {
    pub name: String,
    pub positive_node: String,
    pub negative_node: String,
    pub value: Option<String>,
    pub ac_magnitude: Option<String>,
    pub ac_phase: Option<String>,
}

impl CurrentSourceCommand {
    pub fn new(
        name: impl Into<String>,
        positive_node: impl Into<String>,
        negative_node: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            positive_node: positive_node.into(),
            negative_node: negative_node.into(),
            value: None,
            ac_magnitude: None,
            ac_phase: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_waveform(self, waveform: Waveform) -> Self {
        self.with_value(waveform.to_string())
    }

    pub fn with_ac(mut self, magnitude: impl Into<String>, phase: Option<String>) -> Self {
        self.ac_magnitude = Some(magnitude.into());
        self.ac_phase = phase;
        self
    }
}

impl fmt::Display for CurrentSourceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I{} {} {}", self.name, self.positive_node, self.negative_node)?;
        write_source_tail(f, &self.value, &self.ac_magnitude, &self.ac_phase)
    }
}

fn write_source_tail(
    f: &mut fmt::Formatter<'_>,
    value: &Option<String>,
    ac_magnitude: &Option<String>,
    ac_phase: &Option<String>,
) -> fmt::Result {
    write_opt(f, value)?;
    if let Some(magnitude) = ac_magnitude.as_deref().filter(|m| !m.is_empty()) {
        write!(f, " AC {}", magnitude)?;
        write_opt(f, ac_phase)?;
    }
    Ok(())
}
