use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use kit::types::forms::FormConfig;
use kit::types::schema::ContractSchema;
use kit::types::Ecosystem;

use crate::errors::BuilderError;

/// Single source of truth for the multi-step wizard. One instance is created
/// by the composition root and threaded by reference to whichever component
/// needs it; there is no global store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WizardState {
    pub selected_network_config_id: Option<String>,
    pub selected_ecosystem: Option<Ecosystem>,
    pub current_step_index: usize,
    pub contract_schema: Option<ContractSchema>,
    pub contract_address: Option<String>,
    pub selected_function: Option<String>,
    pub form_config: Option<FormConfig>,
    pub is_execution_step_valid: bool,
}

/// A shallow top-level merge against `WizardState`: fields left unset keep
/// their current value, fields set to `None` are cleared.
#[derive(Clone, Debug, Default)]
pub struct WizardStatePatch {
    selected_network_config_id: Option<Option<String>>,
    selected_ecosystem: Option<Option<Ecosystem>>,
    current_step_index: Option<usize>,
    contract_schema: Option<Option<ContractSchema>>,
    contract_address: Option<Option<String>>,
    selected_function: Option<Option<String>>,
    form_config: Option<Option<FormConfig>>,
    is_execution_step_valid: Option<bool>,
}

impl WizardStatePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn network_config_id(mut self, id: Option<String>) -> Self {
        self.selected_network_config_id = Some(id);
        self
    }

    pub fn ecosystem(mut self, ecosystem: Option<Ecosystem>) -> Self {
        self.selected_ecosystem = Some(ecosystem);
        self
    }

    pub fn step_index(mut self, index: usize) -> Self {
        self.current_step_index = Some(index);
        self
    }

    pub fn contract_schema(mut self, schema: Option<ContractSchema>) -> Self {
        self.contract_schema = Some(schema);
        self
    }

    pub fn contract_address(mut self, address: Option<String>) -> Self {
        self.contract_address = Some(address);
        self
    }

    pub fn selected_function(mut self, function_id: Option<String>) -> Self {
        self.selected_function = Some(function_id);
        self
    }

    pub fn form_config(mut self, config: Option<FormConfig>) -> Self {
        self.form_config = Some(config);
        self
    }

    pub fn execution_step_valid(mut self, valid: bool) -> Self {
        self.is_execution_step_valid = Some(valid);
        self
    }

    fn apply(self, state: &mut WizardState) {
        if let Some(id) = self.selected_network_config_id {
            state.selected_network_config_id = id;
        }
        if let Some(ecosystem) = self.selected_ecosystem {
            state.selected_ecosystem = ecosystem;
        }
        if let Some(index) = self.current_step_index {
            state.current_step_index = index;
        }
        if let Some(schema) = self.contract_schema {
            state.contract_schema = schema;
        }
        if let Some(address) = self.contract_address {
            state.contract_address = address;
        }
        if let Some(function_id) = self.selected_function {
            state.selected_function = function_id;
        }
        if let Some(config) = self.form_config {
            state.form_config = config;
        }
        if let Some(valid) = self.is_execution_step_valid {
            state.is_execution_step_valid = valid;
        }
    }
}

/// Upstream answer whose change invalidates everything downstream of it.
/// Each tier's clearing is a strict superset of the tier below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResetScope {
    Network,
    Contract,
    Function,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = std::sync::Arc<dyn Fn() + Send + Sync>;

pub struct WizardStore {
    state: Mutex<WizardState>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_subscription_id: AtomicU64,
}

impl WizardStore {
    pub fn new() -> Self {
        WizardStore {
            state: Mutex::new(WizardState::default()),
            listeners: Mutex::new(Vec::new()),
            next_subscription_id: AtomicU64::new(0),
        }
    }

    fn state_lock(&self) -> MutexGuard<'_, WizardState> {
        self.state.lock().expect("wizard state lock poisoned")
    }

    fn listeners_lock(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Listener)>> {
        self.listeners.lock().expect("wizard listener registry poisoned")
    }

    /// Read-only snapshot of the current state.
    pub fn get_state(&self) -> WizardState {
        self.state_lock().clone()
    }

    /// One-time seeding before any subscriber exists. Does not notify.
    pub fn set_initial_state(&self, patch: WizardStatePatch) {
        debug_assert!(
            self.listeners_lock().is_empty(),
            "initial state must be seeded before subscribers register"
        );
        patch.apply(&mut self.state_lock());
    }

    /// Registers a callback invoked after every state change. Listeners
    /// re-read state through `get_state`; no payload is passed.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription_id.fetch_add(1, Ordering::SeqCst));
        self.listeners_lock().push((id, std::sync::Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners_lock().retain(|(registered, _)| *registered != id);
    }

    /// Compute-then-merge-then-notify. The updater sees a consistent
    /// snapshot; the merge is applied atomically with respect to other
    /// mutations; subscribers run after every lock is released, so they can
    /// freely call back into the store.
    pub fn update_state<F>(&self, updater: F)
    where
        F: FnOnce(&WizardState) -> WizardStatePatch,
    {
        {
            let mut state = self.state_lock();
            let patch = updater(&state);
            patch.apply(&mut state);
        }
        self.notify_subscribers();
    }

    /// Discards downstream answers that a changed upstream answer made
    /// stale. `Network` implies the `Contract` clearing, which implies the
    /// `Function` clearing.
    pub fn reset_downstream_steps(&self, from: ResetScope) {
        self.update_state(|_| reset_patch(from));
    }

    pub fn select_network(&self, network_config_id: &str, ecosystem: Ecosystem) {
        self.update_state(|_| {
            reset_patch(ResetScope::Network)
                .network_config_id(Some(network_config_id.to_string()))
                .ecosystem(Some(ecosystem))
        });
    }

    pub fn set_contract(&self, schema: ContractSchema, address: &str) {
        self.update_state(|_| {
            reset_patch(ResetScope::Contract)
                .contract_schema(Some(schema))
                .contract_address(Some(address.to_string()))
        });
    }

    /// Fails fast when the function id is not present in the currently
    /// loaded schema, keeping the store free of dangling references.
    pub fn select_function(&self, function_id: &str) -> Result<(), BuilderError> {
        {
            let state = self.state_lock();
            let Some(schema) = state.contract_schema.as_ref() else {
                return Err(BuilderError::ConfigurationInvalid(
                    "cannot select a function before a contract schema is loaded".into(),
                ));
            };
            if !schema.has_function(function_id) {
                return Err(BuilderError::ConfigurationInvalid(format!(
                    "function '{}' is not present in the loaded contract schema",
                    function_id
                )));
            }
        }
        self.update_state(|_| {
            reset_patch(ResetScope::Function).selected_function(Some(function_id.to_string()))
        });
        Ok(())
    }

    /// Accepts a finalized form configuration, re-checking the schema
    /// reference invariants it must uphold.
    pub fn set_form_config(&self, config: FormConfig) -> Result<(), BuilderError> {
        {
            let state = self.state_lock();
            let Some(schema) = state.contract_schema.as_ref() else {
                return Err(BuilderError::ConfigurationInvalid(
                    "cannot accept a form configuration before a contract schema is loaded".into(),
                ));
            };
            if !schema.has_function(&config.function_id) {
                return Err(BuilderError::ConfigurationInvalid(format!(
                    "form configuration references function '{}', absent from the loaded schema",
                    config.function_id
                )));
            }
            if let Some(selected) = state.selected_function.as_ref() {
                if selected != &config.function_id {
                    return Err(BuilderError::ConfigurationInvalid(format!(
                        "form configuration targets '{}' but the selected function is '{}'",
                        config.function_id, selected
                    )));
                }
            }
        }
        self.update_state(|_| WizardStatePatch::new().form_config(Some(config)));
        Ok(())
    }

    pub fn set_execution_validity(&self, valid: bool) {
        self.update_state(|_| WizardStatePatch::new().execution_step_valid(valid));
    }

    fn notify_subscribers(&self) {
        // Snapshot before iterating: a listener may subscribe or unsubscribe
        // during the cycle without affecting this iteration. A listener
        // removed mid-cycle may still be invoked once for the cycle that was
        // already in flight.
        let snapshot: Vec<Listener> =
            self.listeners_lock().iter().map(|(_, listener)| listener.clone()).collect();
        for listener in snapshot {
            listener();
        }
    }
}

impl Default for WizardStore {
    fn default() -> Self {
        Self::new()
    }
}

fn reset_patch(from: ResetScope) -> WizardStatePatch {
    // Function-tier clearing applies to every scope; the wider scopes add
    // their own tiers on top.
    let mut patch = WizardStatePatch::new().form_config(None).execution_step_valid(false);
    if from <= ResetScope::Contract {
        patch = patch.selected_function(None);
    }
    if from == ResetScope::Network {
        patch = patch.contract_schema(None).contract_address(None);
    }
    patch
}

/// Monotonic request ids guarding against the stale-response race on
/// superseded asynchronous loads: tag each load with `begin()`, and discard
/// any response whose id is no longer `is_current` when it resolves.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestId(u64);

impl RequestTracker {
    pub fn new() -> Self {
        RequestTracker { latest: AtomicU64::new(0) }
    }

    pub fn begin(&self) -> RequestId {
        RequestId(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        self.latest.load(Ordering::SeqCst) == id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kit::types::schema::{ContractFunction, FunctionParameter};
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    fn schema_with(function_ids: &[&str]) -> ContractSchema {
        let mut schema = ContractSchema::new(Ecosystem::Evm);
        schema.functions = function_ids
            .iter()
            .map(|id| ContractFunction {
                id: id.to_string(),
                name: id.to_string(),
                signature: None,
                inputs: vec![FunctionParameter::new("value", "uint256")],
                outputs: vec![],
                modifies_state: true,
                payable: false,
            })
            .collect();
        schema
    }

    fn populated_store() -> WizardStore {
        let store = WizardStore::new();
        store.select_network("ethereum-mainnet", Ecosystem::Evm);
        store.set_contract(schema_with(&["transfer", "approve"]), "0xdead");
        store.select_function("transfer").unwrap();
        store.update_state(|state| {
            let config = kit::types::forms::default_form_config(
                state.contract_schema.as_ref().unwrap(),
                "transfer",
                "0xdead",
            )
            .unwrap();
            WizardStatePatch::new().form_config(Some(config)).execution_step_valid(true)
        });
        store
    }

    #[test]
    fn update_sequences_merge_shallowly_last_write_wins() {
        let store = WizardStore::new();
        store.update_state(|_| {
            WizardStatePatch::new()
                .network_config_id(Some("a".into()))
                .ecosystem(Some(Ecosystem::Evm))
        });
        store.update_state(|_| WizardStatePatch::new().network_config_id(Some("b".into())));
        store.update_state(|_| WizardStatePatch::new().step_index(2));

        let state = store.get_state();
        assert_eq!(state.selected_network_config_id.as_deref(), Some("b"));
        assert_eq!(state.selected_ecosystem, Some(Ecosystem::Evm));
        assert_eq!(state.current_step_index, 2);
    }

    #[test]
    fn updater_sees_current_snapshot() {
        let store = WizardStore::new();
        store.update_state(|_| WizardStatePatch::new().step_index(1));
        store.update_state(|state| WizardStatePatch::new().step_index(state.current_step_index + 1));
        assert_eq!(store.get_state().current_step_index, 2);
    }

    #[test]
    fn network_reset_clears_every_downstream_tier() {
        let store = populated_store();
        store.reset_downstream_steps(ResetScope::Network);
        let state = store.get_state();
        assert!(state.contract_schema.is_none());
        assert!(state.contract_address.is_none());
        assert!(state.selected_function.is_none());
        assert!(state.form_config.is_none());
        assert!(!state.is_execution_step_valid);
        // the network answer itself survives
        assert_eq!(state.selected_network_config_id.as_deref(), Some("ethereum-mainnet"));
    }

    #[test]
    fn contract_reset_preserves_schema_but_clears_selection() {
        let store = populated_store();
        store.reset_downstream_steps(ResetScope::Contract);
        let state = store.get_state();
        assert!(state.contract_schema.is_some());
        assert!(state.contract_address.is_some());
        assert!(state.selected_function.is_none());
        assert!(state.form_config.is_none());
        assert!(!state.is_execution_step_valid);
    }

    #[test]
    fn function_reset_touches_only_the_function_tier() {
        let store = populated_store();
        store.reset_downstream_steps(ResetScope::Function);
        let state = store.get_state();
        assert!(state.contract_schema.is_some());
        assert!(state.contract_address.is_some());
        assert_eq!(state.selected_function.as_deref(), Some("transfer"));
        assert!(state.form_config.is_none());
        assert!(!state.is_execution_step_valid);
    }

    #[test]
    fn every_subscriber_fires_exactly_once_per_update() {
        let store = WizardStore::new();
        let counters: Vec<Arc<AtomicUsize>> =
            (0..3).map(|_| Arc::new(AtomicUsize::new(0))).collect();
        for counter in counters.iter() {
            let counter = counter.clone();
            store.subscribe(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        store.update_state(|_| WizardStatePatch::new().step_index(1));
        for counter in counters.iter() {
            assert_eq!(counter.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn seeding_does_not_notify() {
        let store = Arc::new(WizardStore::new());
        store.set_initial_state(WizardStatePatch::new().step_index(3));
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_in_listener = fired.clone();
        store.subscribe(move || {
            fired_in_listener.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(store.get_state().current_step_index, 3);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unsubscribe_during_notification_does_not_panic() {
        let store = Arc::new(WizardStore::new());
        let own_id: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));
        let fired = Arc::new(AtomicUsize::new(0));

        let store_in_listener = store.clone();
        let own_id_in_listener = own_id.clone();
        let fired_in_listener = fired.clone();
        let id = store.subscribe(move || {
            fired_in_listener.fetch_add(1, Ordering::SeqCst);
            if let Some(id) = own_id_in_listener.lock().unwrap().take() {
                store_in_listener.unsubscribe(id);
            }
        });
        *own_id.lock().unwrap() = Some(id);

        store.update_state(|_| WizardStatePatch::new().step_index(1));
        store.update_state(|_| WizardStatePatch::new().step_index(2));
        // fired once, then removed itself; the second update skipped it
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listener_can_read_state_reentrantly() {
        let store = Arc::new(WizardStore::new());
        let observed = Arc::new(Mutex::new(Vec::new()));
        let store_in_listener = store.clone();
        let observed_in_listener = observed.clone();
        store.subscribe(move || {
            observed_in_listener
                .lock()
                .unwrap()
                .push(store_in_listener.get_state().current_step_index);
        });
        store.update_state(|_| WizardStatePatch::new().step_index(7));
        assert_eq!(*observed.lock().unwrap(), vec![7]);
    }

    #[test]
    fn selecting_an_unknown_function_fails_fast() {
        let store = WizardStore::new();
        store.set_contract(schema_with(&["approve"]), "0xdead");
        let err = store.select_function("transfer").unwrap_err();
        assert!(matches!(err, BuilderError::ConfigurationInvalid(_)));
        assert!(store.get_state().selected_function.is_none());
    }

    #[test]
    fn changing_contract_clears_schema_derived_answers() {
        let store = populated_store();
        store.set_contract(schema_with(&["mint"]), "0xbeef");
        let state = store.get_state();
        assert!(state.selected_function.is_none());
        assert!(state.form_config.is_none());
        assert_eq!(state.contract_address.as_deref(), Some("0xbeef"));
    }

    #[test]
    fn form_config_must_match_selected_function() {
        let store = populated_store();
        let config = kit::types::forms::default_form_config(
            &schema_with(&["transfer", "approve"]),
            "approve",
            "0xdead",
        )
        .unwrap();
        let err = store.set_form_config(config).unwrap_err();
        assert!(matches!(err, BuilderError::ConfigurationInvalid(_)));
    }

    #[test]
    fn stale_responses_are_detectable() {
        let tracker = RequestTracker::new();
        let first = tracker.begin();
        assert!(tracker.is_current(first));
        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }
}
