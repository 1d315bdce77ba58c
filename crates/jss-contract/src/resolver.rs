use jss_schema::{ResolvedSchema, Schema, SchemaRegistry};

use crate::contract::CallContract;

/// Collect one line per schema reference in `contract` that `registry`
/// does not know: parameters first, in declaration order, then the result.
///
/// An empty list means every reference resolves.
pub fn resolve_references(contract: &CallContract, registry: &SchemaRegistry) -> Vec<String> {
    let parameter_refs = contract
        .parameters()
        .iter()
        .filter_map(|param| param.schema().as_reference().map(|name| (name, param.name())));
    let result_ref = contract
        .returns()
        .and_then(Schema::as_reference)
        .map(|name| (name, contract.result_location()));

    parameter_refs
        .chain(result_ref)
        .filter(|(reference, _)| !registry.has(reference))
        .map(|(reference, location)| {
            format!("Unknown schema reference \"{reference}\" for \"{location}\"")
        })
        .collect()
}

/// Every schema of a contract, compiled once before any value is checked.
#[derive(Debug)]
pub(crate) struct ResolvedContract {
    /// One entry per parameter, in declaration order.
    pub(crate) parameters: Vec<ResolvedSchema>,
    pub(crate) returns: Option<ResolvedSchema>,
}

/// Resolve every schema in `contract`, collecting one line per schema that
/// fails to compile.
pub(crate) fn resolve_schemas(
    contract: &CallContract,
    registry: &SchemaRegistry,
) -> Result<ResolvedContract, Vec<String>> {
    let mut problems = Vec::new();
    let mut resolve = |schema: &Schema, location: &str| match registry.resolve(schema) {
        Ok(resolved) => Some(resolved),
        Err(err) => {
            problems.push(format!("Invalid schema for \"{location}\": {err}"));
            None
        }
    };

    let parameters: Vec<Option<ResolvedSchema>> = contract
        .parameters()
        .iter()
        .map(|param| resolve(param.schema(), param.name()))
        .collect();
    let returns = contract
        .returns()
        .map(|schema| resolve(schema, contract.result_location()));

    if !problems.is_empty() {
        return Err(problems);
    }
    Ok(ResolvedContract {
        parameters: parameters.into_iter().flatten().collect(),
        returns: returns.flatten(),
    })
}
