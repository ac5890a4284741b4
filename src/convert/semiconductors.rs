//! Diodes, MOSFETs and bipolar transistors.

use tracing::debug;

use super::{find_port_by_role, ConversionContext, MosfetModel};
use crate::circuit::{ChannelType, MosfetMode, SourceComponent, SourcePort, TransistorType};
use crate::commands::{BjtCommand, DiodeCommand, MosfetCommand, SwitchCommand};
use crate::error::{NetspiceError, Result};
use crate::netlist::SpiceComponent;

const DIODE_MODEL: &str = "D";

pub(crate) fn diode(
    ctx: &mut ConversionContext<'_>,
    component: &SourceComponent,
    ports: &[&SourcePort],
) -> Option<SpiceComponent> {
    let Some(name) = component.display_name() else {
        debug!(component = %component.source_component_id, "skipping unnamed diode");
        return None;
    };
    let anode = ctx.node_of(find_port_by_role(ports, "anode"));
    let cathode = ctx.node_of(find_port_by_role(ports, "cathode"));

    ctx.netlist
        .add_model(DIODE_MODEL, format!(".MODEL {} D", DIODE_MODEL));

    let command = DiodeCommand::new(name, anode.clone(), cathode.clone(), DIODE_MODEL);
    Some(SpiceComponent::new(name, command, vec![anode, cathode]))
}

/// Missing terminals resolve to ground.
pub(crate) fn mosfet(
    ctx: &mut ConversionContext<'_>,
    component: &SourceComponent,
    ports: &[&SourcePort],
    channel: ChannelType,
    mode: MosfetMode,
) -> Option<SpiceComponent> {
    let Some(name) = component.display_name() else {
        debug!(component = %component.source_component_id, "skipping unnamed mosfet");
        return None;
    };
    let drain = ctx.node_of(find_port_by_role(ports, "drain"));
    let gate = ctx.node_of(find_port_by_role(ports, "gate"));
    let source = ctx.node_of(find_port_by_role(ports, "source"));
    let nodes = vec![drain.clone(), gate.clone(), source.clone()];

    match ctx.options.mosfet_model {
        MosfetModel::Switch => {
            let model = format!("SW_{}_{}", channel.model_type(), mode.as_upper());
            // Depletion devices conduct at zero gate drive
            let threshold = match mode {
                MosfetMode::Enhancement => 1,
                MosfetMode::Depletion => -1,
            };
            ctx.netlist.add_model(
                model.clone(),
                format!(".MODEL {} SW(Ron=0.1 Roff=1e9 Vt={} Vh=0.1)", model, threshold),
            );
            // A p-channel device turns on as the gate falls below the source
            let (control_pos, control_neg) = match channel {
                ChannelType::N => (gate, source.clone()),
                ChannelType::P => (source.clone(), gate),
            };
            let command = SwitchCommand::new(name, drain, source, control_pos, control_neg, model);
            Some(SpiceComponent::new(name, command, nodes))
        }
        MosfetModel::Level1 => {
            let model_type = channel.model_type();
            let model = format!("{}_{}", model_type, mode.as_upper());
            let definition = match mode {
                MosfetMode::Enhancement => {
                    let vto = match channel {
                        ChannelType::N => 1,
                        ChannelType::P => -1,
                    };
                    format!(".MODEL {} {} (VTO={} KP=0.1)", model, model_type, vto)
                }
                MosfetMode::Depletion => format!(".MODEL {} {} (KP=0.1)", model, model_type),
            };
            ctx.netlist.add_model(model.clone(), definition);
            // Substrate tied to source
            let command = MosfetCommand::new(name, drain, gate, source.clone(), source, model);
            Some(SpiceComponent::new(name, command, nodes))
        }
    }
}

/// Unlike the other multi-terminal kinds, a transistor missing any of its
/// collector, base or emitter ports fails the whole conversion.
pub(crate) fn transistor(
    ctx: &mut ConversionContext<'_>,
    component: &SourceComponent,
    ports: &[&SourcePort],
    polarity: TransistorType,
) -> Result<Option<SpiceComponent>> {
    let Some(name) = component.display_name() else {
        debug!(component = %component.source_component_id, "skipping unnamed transistor");
        return Ok(None);
    };

    let (Some(collector), Some(base), Some(emitter)) = (
        find_port_by_role(ports, "collector"),
        find_port_by_role(ports, "base"),
        find_port_by_role(ports, "emitter"),
    ) else {
        return Err(NetspiceError::missing_transistor_ports(name));
    };

    let collector = ctx.node_of(Some(collector));
    let base = ctx.node_of(Some(base));
    let emitter = ctx.node_of(Some(emitter));

    let model = polarity.model_type();
    ctx.netlist.add_model(model, format!(".MODEL {} {}", model, model));

    let nodes = vec![collector.clone(), base.clone(), emitter.clone()];
    let command = BjtCommand::new(name, collector, base, emitter, model);
    Ok(Some(SpiceComponent::new(name, command, nodes)))
}
