use strum::{Display, EnumIter, IntoEnumIterator};

use crate::store::WizardState;

/// Ordered wizard steps. A step is enterable only when every step before it
/// is satisfied; there is no terminal state beyond the last step, completion
/// being signaled by a successful export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum WizardStep {
    Network,
    Contract,
    Function,
    Fields,
    Execution,
    Export,
}

impl WizardStep {
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<WizardStep> {
        WizardStep::iter().find(|step| step.index() == index)
    }
}

/// Whether the step's own answer is present in the state. The export step
/// carries no answer of its own.
pub fn is_step_satisfied(state: &WizardState, step: WizardStep) -> bool {
    match step {
        WizardStep::Network => {
            state.selected_network_config_id.is_some() && state.selected_ecosystem.is_some()
        }
        WizardStep::Contract => {
            state.contract_schema.is_some() && state.contract_address.is_some()
        }
        WizardStep::Function => state.selected_function.is_some(),
        WizardStep::Fields => state.form_config.is_some(),
        WizardStep::Execution => state.is_execution_step_valid,
        WizardStep::Export => true,
    }
}

/// Monotonic validity chain: step N is enterable iff steps 0..N are each
/// satisfied.
pub fn can_enter(state: &WizardState, step: WizardStep) -> bool {
    WizardStep::iter().take_while(|s| *s < step).all(|s| is_step_satisfied(state, s))
}

pub fn first_unsatisfied_step(state: &WizardState) -> Option<WizardStep> {
    WizardStep::iter().filter(|s| *s < WizardStep::Export).find(|s| !is_step_satisfied(state, *s))
}

pub fn is_exportable(state: &WizardState) -> bool {
    first_unsatisfied_step(state).is_none()
}
