//! Semiconductor elements: diode, BJT, MOSFET, JFET.

use std::fmt;

use super::{write_opt, write_param};

/// `D<name> <anode> <cathode> <model> [<area>]`
#[derive(Debug, Clone, PartialEq)]
pub struct DiodeCommand {
    pub name: String,
    pub positive_node: String,
    pub negative_node: String,
    pub model: String,
    pub area: Option<String>,
}

impl DiodeCommand {
    pub fn new(
        name: impl Into<String>,
        positive_node: impl Into<String>,
        negative_node: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            positive_node: positive_node.into(),
            negative_node: negative_node.into(),
            model: model.into(),
            area: None,
        }
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }
}

impl fmt::Display for DiodeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "D{} {} {} {}",
            self.name, self.positive_node, self.negative_node, self.model
        )?;
        write_opt(f, &self.area)
    }
}

/// `Q<name> <c> <b> <e> [<substrate>] <model> [<area>]`
#[derive(Debug, Clone, PartialEq)]
pub struct BjtCommand {
    pub name: String,
    pub collector: String,
    pub base: String,
    pub emitter: String,
    pub substrate: Option<String>,
    pub model: String,
    pub area: Option<String>,
}

impl BjtCommand {
    pub fn new(
        name: impl Into<String>,
        collector: impl Into<String>,
        base: impl Into<String>,
        emitter: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            collector: collector.into(),
            base: base.into(),
            emitter: emitter.into(),
            substrate: None,
            model: model.into(),
            area: None,
        }
    }

    pub fn with_substrate(mut self, substrate: impl Into<String>) -> Self {
        self.substrate = Some(substrate.into());
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }
}

impl fmt::Display for BjtCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{} {} {} {}", self.name, self.collector, self.base, self.emitter)?;
        write_opt(f, &self.substrate)?;
        write!(f, " {}", self.model)?;
        write_opt(f, &self.area)
    }
}

/// Optional MOSFET geometry, each rendered as `KEY=<value>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MosfetGeometry {
    pub length: Option<String>,
    pub width: Option<String>,
    pub drain_area: Option<String>,
    pub source_area: Option<String>,
    pub drain_perimeter: Option<String>,
    pub source_perimeter: Option<String>,
    pub drain_squares: Option<String>,
    pub source_squares: Option<String>,
}

/// `M<name> <d> <g> <s> <b> <model> [L= W= AD= AS= PD= PS= NRD= NRS=]`
#[derive(Debug, Clone, PartialEq)]
pub struct MosfetCommand {
    pub name: String,
    pub drain: String,
    pub gate: String,
    pub source: String,
    pub substrate: String,
    pub model: String,
    pub geometry: MosfetGeometry,
}

impl MosfetCommand {
    pub fn new(
        name: impl Into<String>,
        drain: impl Into<String>,
        gate: impl Into<String>,
        source: impl Into<String>,
        substrate: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            drain: drain.into(),
            gate: gate.into(),
            source: source.into(),
            substrate: substrate.into(),
            model: model.into(),
            geometry: MosfetGeometry::default(),
        }
    }

    pub fn with_geometry(mut self, geometry: MosfetGeometry) -> Self {
        self.geometry = geometry;
        self
    }
}

impl fmt::Display for MosfetCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "M{} {} {} {} {} {}",
            self.name, self.drain, self.gate, self.source, self.substrate, self.model
        )?;
        let g = &self.geometry;
        write_param(f, "L", &g.length)?;
        write_param(f, "W", &g.width)?;
        write_param(f, "AD", &g.drain_area)?;
        write_param(f, "AS", &g.source_area)?;
        write_param(f, "PD", &g.drain_perimeter)?;
        write_param(f, "PS", &g.source_perimeter)?;
        write_param(f, "NRD", &g.drain_squares)?;
        write_param(f, "NRS", &g.source_squares)
    }
}

/// `J<name> <d> <g> <s> <model> [<area>]`
#[derive(Debug, Clone, PartialEq)]
pub struct JfetCommand {
    pub name: String,
    pub drain: String,
    pub gate: String,
    pub source: String,
    pub model: String,
    pub area: Option<String>,
}

impl JfetCommand {
    pub fn new(
        name: impl Into<String>,
        drain: impl Into<String>,
        gate: impl Into<String>,
        source: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            drain: drain.into(),
            gate: gate.into(),
            source: source.into(),
            model: model.into(),
            area: None,
        }
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }
}

impl fmt::Display for JfetCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "J{} {} {} {} {}",
            self.name, self.drain, self.gate, self.source, self.model
        )?;
        write_opt(f, &self.area)
    }
}
