//! Matching component ports to device terminals.
//!
//! A terminal role (`anode`, `gate`, ...) is resolved by trying each
//! [`RoleRule`] in order across all of the component's ports; the first rule
//! that matches any port decides. A port whose name is the role therefore
//! beats an earlier port that merely carries the role as a hint.

use crate::circuit::SourcePort;

/// One way a port can claim a terminal role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRule {
    /// Port name equals the role, ignoring ASCII case
    ExactName,
    /// Role is listed verbatim in the port's hints
    Hint,
}

impl RoleRule {
    pub const PRIORITY: [RoleRule; 2] = [RoleRule::ExactName, RoleRule::Hint];

    pub fn matches(&self, port: &SourcePort, role: &str) -> bool {
        match self {
            RoleRule::ExactName => port
                .name
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(role)),
            RoleRule::Hint => port.hints().iter().any(|hint| hint == role),
        }
    }
}

/// The port playing `role`, if any.
pub fn find_port_by_role<'a>(ports: &[&'a SourcePort], role: &str) -> Option<&'a SourcePort> {
    RoleRule::PRIORITY
        .iter()
        .find_map(|rule| ports.iter().copied().find(|port| rule.matches(port, role)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(id: &str, name: &str, hints: &[&str]) -> SourcePort {
        SourcePort {
            source_port_id: id.to_string(),
            source_component_id: Some("D1".to_string()),
            name: Some(name.to_string()),
            port_hints: Some(hints.iter().map(|h| h.to_string()).collect()),
            pin_number: None,
        }
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let a = port("p1", "Anode", &[]);
        let ports = [&a];
        let found = find_port_by_role(&ports, "anode").map(|p| p.source_port_id.as_str());
        assert_eq!(found, Some("p1"));
    }

    #[test]
    fn test_hint_match() {
        let a = port("p1", "pin1", &["anode", "pos"]);
        let c = port("p2", "pin2", &["cathode"]);
        let ports = [&a, &c];
        let found = find_port_by_role(&ports, "cathode").map(|p| p.source_port_id.as_str());
        assert_eq!(found, Some("p2"));
    }

    #[test]
    fn test_name_beats_earlier_hint() {
        let hinted = port("p1", "pin1", &["gate"]);
        let named = port("p2", "gate", &[]);
        let ports = [&hinted, &named];
        let found = find_port_by_role(&ports, "gate").map(|p| p.source_port_id.as_str());
        assert_eq!(found, Some("p2"));
    }

    #[test]
    fn test_no_match() {
        let a = port("p1", "pin1", &["Anode"]);
        let ports = [&a];
        assert!(find_port_by_role(&ports, "anode").is_none());
    }
}
