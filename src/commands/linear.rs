//! Linear passive elements: resistor, capacitor, inductor, inductor coupling.

use std::fmt;

use super::{write_opt, write_param};

/// `R<name> <n+> <n-> [<model>] <value>`
#[derive(Debug, Clone, PartialEq)]
pub struct ResistorCommand {
    pub name: String,
    pub positive_node: String,
    pub negative_node: String,
    pub model: Option<String>,
    pub value: String,
}

impl ResistorCommand {
    pub fn new(
        name: impl Into<String>,
        positive_node: impl Into<String>,
        negative_node: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            positive_node: positive_node.into(),
            negative_node: negative_node.into(),
            model: None,
            value: value.into(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

impl fmt::Display for ResistorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{} {} {}", self.name, self.positive_node, self.negative_node)?;
        write_opt(f, &self.model)?;
        write!(f, " {}", self.value)
    }
}

/// `C<name> <n+> <n-> [<model>] <value> [IC=<v>]`
#[derive(Debug, Clone, PartialEq)]
pub struct CapacitorCommand {
    pub name: String,
    pub positive_node: String,
    pub negative_node: String,
    pub model: Option<String>,
    pub value: String,
    /// Initial voltage across the capacitor
    pub initial_condition: Option<String>,
}

impl CapacitorCommand {
    pub fn new(
        name: impl Into<String>,
        positive_node: impl Into<String>,
        negative_node: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            positive_node: positive_node.into(),
            negative_node: negative_node.into(),
            model: None,
            value: value.into(),
            initial_condition: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_initial_condition(mut self, ic: impl Into<String>) -> Self {
        self.initial_condition = Some(ic.into());
        self
    }
}

impl fmt::Display for CapacitorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{} {} {}", self.name, self.positive_node, self.negative_node)?;
        write_opt(f, &self.model)?;
        write!(f, " {}", self.value)?;
        write_param(f, "IC", &self.initial_condition)
    }
}

/// `L<name> <n+> <n-> [<model>] <value> [IC=<i>]`
#[derive(Debug, Clone, PartialEq)]
pub struct InductorCommand {
    pub name: String,
    pub positive_node: String,
    pub negative_node: String,
    pub model: Option<String>,
    pub value: String,
    /// Initial current through the inductor
    pub initial_condition: Option<String>,
}

impl InductorCommand {
    pub fn new(
        name: impl Into<String>,
        positive_node: impl Into<String>,
        negative_node: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            positive_node: positive_node.into(),
            negative_node: negative_node.into(),
            model: None,
            value: value.into(),
            initial_condition: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_initial_condition(mut self, ic: impl Into<String>) -> Self {
        self.initial_condition = Some(ic.into());
        self
    }
}

impl fmt::Display for InductorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{} {} {}", self.name, self.positive_node, self.negative_node)?;
        write_opt(f, &self.model)?;
        write!(f, " {}", self.value)?;
        write_param(f, "IC", &self.initial_condition)
    }
}

/// `K<name> <L1> <L2>... <coupling>`
#[derive(Debug, Clone, PartialEq)]
pub struct InductorCouplingCommand {
    pub name: String,
    /// Names of the coupled inductors, prefix included (`L1`)
    pub inductors: Vec<String>,
    pub coupling: String,
}

impl InductorCouplingCommand {
    pub fn new(
        name: impl Into<String>,
        inductors: Vec<String>,
        coupling: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            inductors,
            coupling: coupling.into(),
        }
    }
}

impl fmt::Display for InductorCouplingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "K{}", self.name)?;
        for inductor in &self.inductors {
            write!(f, " {}", inductor)?;
        }
        write!(f, " {}", self.coupling)
    }
}
