//! The SPICE netlist accumulator and its serializer.
//!
//! A [`SpiceNetlist`] only grows during conversion. Rendering emits sections
//! in a fixed order that simulators depend on:
//!
//! 1. title line
//! 2. model definitions (insertion order)
//! 3. element lines (insertion order)
//! 4. subcircuit definition blocks
//! 5. print statements
//! 6. `.control` / `.endc` block, only when control lines exist
//! 7. the transient command, unless some earlier line already starts with `.tran`
//! 8. `.END`

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;

use crate::commands::ElementCommand;

/// One element of the output deck.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiceComponent {
    pub name: String,
    pub command: ElementCommand,
    /// Every node the element touches
    pub nodes: Vec<String>,
}

impl SpiceComponent {
    pub fn new(
        name: impl Into<String>,
        command: impl Into<ElementCommand>,
        nodes: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            nodes,
        }
    }

    pub fn to_spice_string(&self) -> String {
        self.command.to_string()
    }
}

/// A `.SUBCKT` definition block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpiceSubcircuit {
    pub name: String,
    pub pins: Vec<String>,
    pub body: Vec<String>,
}

impl SpiceSubcircuit {
    /// A subcircuit with no body; renders a placeholder comment.
    pub fn new(name: impl Into<String>, pins: Vec<String>) -> Self {
        Self {
            name: name.into(),
            pins,
            body: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: Vec<String>) -> Self {
        self.body = body;
        self
    }

    /// Block lines, starting with a blank separator line.
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![String::new(), self.header()];
        if self.body.is_empty() {
            lines.push(format!(
                "* Placeholder for {}. No definition found in circuit JSON.",
                self.name
            ));
        } else {
            lines.extend(self.body.iter().cloned());
        }
        lines.push(format!(".ENDS {}", self.name));
        lines
    }

    fn header(&self) -> String {
        let mut header = format!(".SUBCKT {}", self.name);
        for pin in &self.pins {
            header.push(' ');
            header.push_str(pin);
        }
        header
    }

    pub fn to_spice_string(&self) -> String {
        self.lines().join("\n")
    }
}

/// A single change to a netlist, as produced by directive processors.
#[derive(Debug, Clone, PartialEq)]
pub enum NetlistMutation {
    AddComponent(SpiceComponent),
    /// Registered only if no model of that name exists yet
    AddModel { name: String, definition: String },
    AddSubcircuit(SpiceSubcircuit),
    AddPrintStatement(String),
    SetTranCommand(String),
    AddControl(String),
}

/// A complete SPICE deck under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiceNetlist {
    pub title: String,
    components: Vec<SpiceComponent>,
    nodes: BTreeSet<String>,
    models: IndexMap<String, String>,
    subcircuits: Vec<SpiceSubcircuit>,
    print_statements: Vec<String>,
    tran_command: Option<String>,
    controls: Vec<String>,
}

impl SpiceNetlist {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            components: Vec::new(),
            nodes: BTreeSet::new(),
            models: IndexMap::new(),
            subcircuits: Vec::new(),
            print_statements: Vec::new(),
            tran_command: None,
            controls: Vec::new(),
        }
    }

    /// Append an element and record the nodes it touches.
    pub fn add_component(&mut self, component: SpiceComponent) {
        self.nodes.extend(component.nodes.iter().cloned());
        self.components.push(component);
    }

    /// Register a model definition. The first definition of a name wins.
    ///
    /// Returns `false` when a model of that name already existed.
    pub fn add_model(&mut self, name: impl Into<String>, definition: impl Into<String>) -> bool {
        let name = name.into();
        if self.models.contains_key(&name) {
            return false;
        }
        self.models.insert(name, definition.into());
        true
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Add a subcircuit definition unless one with the same name exists.
    pub fn add_subcircuit(&mut self, subcircuit: SpiceSubcircuit) -> bool {
        if self.subcircuits.iter().any(|s| s.name == subcircuit.name) {
            return false;
        }
        self.subcircuits.push(subcircuit);
        true
    }

    pub fn add_print_statement(&mut self, statement: impl Into<String>) {
        self.print_statements.push(statement.into());
    }

    /// Set the transient analysis line, replacing any previous one.
    pub fn set_tran_command(&mut self, command: impl Into<String>) {
        self.tran_command = Some(command.into());
    }

    /// Add a raw line to the `.control` block.
    pub fn add_control(&mut self, line: impl Into<String>) {
        self.controls.push(line.into());
    }

    pub fn apply(&mut self, mutation: NetlistMutation) {
        match mutation {
            NetlistMutation::AddComponent(component) => self.add_component(component),
            NetlistMutation::AddModel { name, definition } => {
                self.add_model(name, definition);
            }
            NetlistMutation::AddSubcircuit(subcircuit) => {
                self.add_subcircuit(subcircuit);
            }
            NetlistMutation::AddPrintStatement(statement) => self.add_print_statement(statement),
            NetlistMutation::SetTranCommand(command) => self.set_tran_command(command),
            NetlistMutation::AddControl(line) => self.add_control(line),
        }
    }

    pub fn components(&self) -> &[SpiceComponent] {
        &self.components
    }

    /// Every node referenced by some element.
    pub fn nodes(&self) -> &BTreeSet<String> {
        &self.nodes
    }

    /// Model definitions in insertion order.
    pub fn models(&self) -> impl Iterator<Item = (&str, &str)> {
        self.models.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn subcircuits(&self) -> &[SpiceSubcircuit] {
        &self.subcircuits
    }

    pub fn print_statements(&self) -> &[String] {
        &self.print_statements
    }

    pub fn tran_command(&self) -> Option<&str> {
        self.tran_command.as_deref()
    }

    pub fn controls(&self) -> &[String] {
        &self.controls
    }

    /// Render the deck. Lines are joined with `\n`, with no trailing newline.
    pub fn to_spice_string(&self) -> String {
        let mut lines: Vec<String> = vec![self.title.clone()];

        lines.extend(self.models.values().cloned());
        lines.extend(self.components.iter().map(SpiceComponent::to_spice_string));
        for subcircuit in &self.subcircuits {
            lines.push(subcircuit.to_spice_string());
        }
        lines.extend(self.print_statements.iter().cloned());

        if !self.controls.is_empty() {
            lines.push(".control".to_string());
            lines.extend(self.controls.iter().cloned());
            lines.push(".endc".to_string());
        }

        if let Some(tran) = &self.tran_command {
            let already_present = lines
                .iter()
                .any(|l| l.trim().to_lowercase().starts_with(".tran"));
            if !already_present {
                lines.push(tran.clone());
            }
        }

        lines.push(".END".to_string());
        lines.join("\n")
    }
}

impl fmt::Display for SpiceNetlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_spice_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{ResistorCommand, VoltageSourceCommand};

    fn resistor(name: &str, a: &str, b: &str) -> SpiceComponent {
        SpiceComponent::new(
            name,
            ResistorCommand::new(name, a, b, "1K"),
            vec![a.to_string(), b.to_string()],
        )
    }

    #[test]
    fn test_empty_netlist() {
        let netlist = SpiceNetlist::new("* test");
        assert_eq!(netlist.to_spice_string(), "* test\n.END");
    }

    #[test]
    fn test_section_order() {
        let mut netlist = SpiceNetlist::new("* test");
        netlist.add_component(resistor("R1", "N1", "0"));
        netlist.add_model("D", ".MODEL D D");
        netlist.add_subcircuit(SpiceSubcircuit::new("AMP", vec!["a".into(), "b".into()]));
        netlist.add_print_statement(".PRINT TRAN V(N1)");
        netlist.add_control("run");
        netlist.set_tran_command(".tran 0.001 0.1 UIC");

        let expected = [
            "* test",
            ".MODEL D D",
            "RR1 N1 0 1K",
            "",
            ".SUBCKT AMP a b",
            "* Placeholder for AMP. No definition found in circuit JSON.",
            ".ENDS AMP",
            ".PRINT TRAN V(N1)",
            ".control",
            "run",
            ".endc",
            ".tran 0.001 0.1 UIC",
            ".END",
        ]
        .join("\n");
        assert_eq!(netlist.to_spice_string(), expected);
    }

    #[test]
    fn test_model_first_writer_wins() {
        let mut netlist = SpiceNetlist::new("* test");
        assert!(netlist.add_model("SW1", ".MODEL SW1 SW(Ron=1)"));
        assert!(!netlist.add_model("SW1", ".MODEL SW1 SW(Ron=2)"));
        assert_eq!(netlist.models().count(), 1);
        assert!(netlist.to_spice_string().contains("Ron=1"));
    }

    #[test]
    fn test_subcircuit_dedup_and_body() {
        let mut netlist = SpiceNetlist::new("* test");
        let body = vec!["R1 a b 1k".to_string()];
        let subcircuit = SpiceSubcircuit::new("F", vec!["a".into(), "b".into()]).with_body(body);
        assert!(netlist.add_subcircuit(subcircuit));
        assert!(!netlist.add_subcircuit(SpiceSubcircuit::new("F", vec![])));
        assert_eq!(
            netlist.subcircuits()[0].to_spice_string(),
            "\n.SUBCKT F a b\nR1 a b 1k\n.ENDS F"
        );
    }

    #[test]
    fn test_tran_suppressed_when_control_has_tran() {
        let mut netlist = SpiceNetlist::new("* test");
        netlist.add_control("  .TRAN 1m 10m");
        netlist.set_tran_command(".tran 0.001 0.01 UIC");
        let out = netlist.to_spice_string();
        assert!(!out.contains(".tran 0.001"));
        assert!(out.ends_with(".endc\n.END"));
    }

    #[test]
    fn test_nodes_collected() {
        let mut netlist = SpiceNetlist::new("* test");
        netlist.apply(NetlistMutation::AddComponent(resistor("R1", "N1", "0")));
        netlist.apply(NetlistMutation::AddComponent(SpiceComponent::new(
            "V1",
            VoltageSourceCommand::new("V1", "N2", "0").with_value("DC 5"),
            vec!["N2".into(), "0".into()],
        )));
        let nodes: Vec<&str> = netlist.nodes().iter().map(String::as_str).collect();
        assert_eq!(nodes, vec!["0", "N1", "N2"]);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut netlist = SpiceNetlist::new("* test");
        netlist.add_component(resistor("R1", "N1", "0"));
        assert_eq!(netlist.to_spice_string(), netlist.to_spice_string());
        assert_eq!(netlist.to_string(), netlist.to_spice_string());
    }
}
