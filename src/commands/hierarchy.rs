//! Transmission lines and subcircuit instances.

use std::fmt;

/// Timing of a lossless transmission line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineTiming {
    /// `TD=<delay>`
    Delay(String),
    /// `F=<freq> [NL=<normalized length>]`
    Frequency {
        frequency: String,
        normalized_length: Option<String>,
    },
}

/// `T<name> <a+> <a-> <b+> <b-> Z0=<z> [TD=<t> | F=<f> [NL=<l>]]`
#[derive(Debug, Clone, PartialEq)]
pub struct TransmissionLineCommand {
    pub name: String,
    pub a_positive: String,
    pub a_negative: String,
    pub b_positive: String,
    pub b_negative: String,
    pub impedance: String,
    pub timing: Option<LineTiming>,
}

impl TransmissionLineCommand {
    pub fn new(
        name: impl Into<String>,
        port_a: (impl Into<String>, impl Into<String>),
        port_b: (impl Into<String>, impl Into<String>),
        impedance: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            a_positive: port_a.0.into(),
            a_negative: port_a.1.into(),
            b_positive: port_b.0.into(),
            b_negative: port_b.1.into(),
            impedance: impedance.into(),
            timing: None,
        }
    }

    pub fn with_timing(mut self, timing: LineTiming) -> Self {
        self.timing = Some(timing);
        self
    }
}

impl fmt::Display for TransmissionLineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T{} {} {} {} {} Z0={}",
            self.name,
            self.a_positive,
            self.a_negative,
            self.b_positive,
            self.b_negative,
            self.impedance
        )?;
        match &self.timing {
            Some(LineTiming::Delay(delay)) => write!(f, " TD={}", delay),
            Some(LineTiming::Frequency {
                frequency,
                normalized_length,
            }) => {
                write!(f, " F={}", frequency)?;
                if let Some(nl) = normalized_length {
                    write!(f, " NL={}", nl)?;
                }
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// `X<name> <nodes>... <subcircuit>`
#[derive(Debug, Clone, PartialEq)]
pub struct SubcircuitCallCommand {
    pub name: String,
    pub nodes: Vec<String>,
    pub subcircuit_name: String,
}

impl SubcircuitCallCommand {
    pub fn new(
        name: impl Into<String>,
        nodes: Vec<String>,
        subcircuit_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            nodes,
            subcircuit_name: subcircuit_name.into(),
        }
    }
}

impl fmt::Display for SubcircuitCallCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X{}", self.name)?;
        for node in &self.nodes {
            write!(f, " {}", node)?;
        }
        write!(f, " {}", self.subcircuit_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transmission_line_delay() {
        let t = TransmissionLineCommand::new("1", ("a", "0"), ("b", "0"), "50")
            .with_timing(LineTiming::Delay("10n".into()));
        assert_eq!(t.to_string(), "T1 a 0 b 0 Z0=50 TD=10n");
    }

    #[test]
    fn test_transmission_line_frequency() {
        let t = TransmissionLineCommand::new("1", ("a", "0"), ("b", "0"), "75").with_timing(
            LineTiming::Frequency {
                frequency: "1MEG".into(),
                normalized_length: Some("0.25".into()),
            },
        );
        assert_eq!(t.to_string(), "T1 a 0 b 0 Z0=75 F=1MEG NL=0.25");
        let bare = TransmissionLineCommand::new("2", ("a", "0"), ("b", "0"), "75");
        assert_eq!(bare.to_string(), "T2 a 0 b 0 Z0=75");
    }

    #[test]
    fn test_subcircuit_call() {
        let x = SubcircuitCallCommand::new(
            "U1",
            vec!["N1".into(), "N2".into(), "N3".into(), "N4".into(), "N5".into()],
            "GENERIC_OPAMP",
        );
        assert_eq!(x.to_string(), "XU1 N1 N2 N3 N4 N5 GENERIC_OPAMP");
    }
}
