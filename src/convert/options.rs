//! Conversion configuration.

use crate::circuit::FloatingPortPolicy;

/// Title line written at the top of every converted deck.
pub const DEFAULT_TITLE: &str = "* Circuit JSON to SPICE Netlist";

/// How `simple_mosfet` components are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MosfetModel {
    /// Voltage-controlled switch gated by gate/source
    #[default]
    Switch,
    /// A real `M` element with a level-1 `.MODEL`, substrate tied to source
    Level1,
}

/// Configuration for a circuit JSON to SPICE conversion.
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// First line of the deck
    pub title: String,
    /// Node assigned to ports that no trace touches
    pub floating_ports: FloatingPortPolicy,
    pub mosfet_model: MosfetModel,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            floating_ports: FloatingPortPolicy::default(),
            mosfet_model: MosfetModel::default(),
        }
    }
}

impl ConversionOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title line.
    ///
    /// SPICE treats the first line as a comment whatever it holds, so no `*`
    /// is added.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_floating_ports(mut self, policy: FloatingPortPolicy) -> Self {
        self.floating_ports = policy;
        self
    }

    pub fn with_mosfet_model(mut self, model: MosfetModel) -> Self {
        self.mosfet_model = model;
        self
    }
}
