//! Voltage-controlled switch.

use std::fmt;

/// `S<name> <n+> <n-> <nc+> <nc-> <model>`
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCommand {
    pub name: String,
    pub positive_node: String,
    pub negative_node: String,
    pub positive_control: String,
    pub negative_control: String,
    pub model: String,
}

impl SwitchCommand {
    pub fn new(
        name: impl Into<String>,
        positive_node: impl Into<String>,
        negative_node: impl Into<String>,
        positive_control: impl Into<String>,
        negative_control: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            positive_node: positive_node.into(),
            negative_node: negative_node.into(),
            positive_control: positive_control.into(),
            negative_control: negative_control.into(),
            model: model.into(),
        }
    }
}

impl fmt::Display for SwitchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S{} {} {} {} {} {}",
            self.name,
            self.positive_node,
            self.negative_node,
            self.positive_control,
            self.negative_control,
            self.model
        )
    }
}
