use super::Ecosystem;

/// Normalized, chain-agnostic view of a contract's callable surface, produced
/// by an adapter from a raw definition (ABI, IDL, ...). Everything downstream
/// of the contract step operates on this representation only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ContractSchema {
    pub ecosystem: Ecosystem,
    pub name: Option<String>,
    pub functions: Vec<ContractFunction>,
    pub events: Vec<ContractEvent>,
}

impl ContractSchema {
    pub fn new(ecosystem: Ecosystem) -> Self {
        ContractSchema { ecosystem, name: None, functions: vec![], events: vec![] }
    }

    pub fn get_function(&self, function_id: &str) -> Option<&ContractFunction> {
        self.functions.iter().find(|f| f.id == function_id)
    }

    pub fn has_function(&self, function_id: &str) -> bool {
        self.get_function(function_id).is_some()
    }

    /// Functions that submit a transaction, i.e. the ones a form is
    /// typically generated for.
    pub fn writable_functions(&self) -> impl Iterator<Item = &ContractFunction> {
        self.functions.iter().filter(|f| f.modifies_state)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ContractFunction {
    /// Unique within the schema. Adapters use the plain name, falling back to
    /// the full signature when the name is overloaded.
    pub id: String,
    pub name: String,
    pub signature: Option<String>,
    pub inputs: Vec<FunctionParameter>,
    pub outputs: Vec<FunctionParameter>,
    pub modifies_state: bool,
    pub payable: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FunctionParameter {
    pub name: String,
    /// Canonical chain-level type name ("address", "uint256", "pubkey", ...).
    pub type_name: String,
    /// Tuple/struct members, empty for scalar types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<FunctionParameter>,
}

impl FunctionParameter {
    pub fn new(name: &str, type_name: &str) -> Self {
        FunctionParameter {
            name: name.to_string(),
            type_name: type_name.to_string(),
            components: vec![],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ContractEvent {
    pub name: String,
    pub inputs: Vec<FunctionParameter>,
}
