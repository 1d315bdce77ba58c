use std::panic::Location;
use std::sync::Arc;

use futures_core::future::BoxFuture;
use jss_schema::{ConfigError, RegistryConfig, ResolvedSchema, Schema, SchemaRegistry};
use serde_json::Value;
use tracing::debug;

use crate::contract::{result_modifier, CallContract};
use crate::error::{CallError, CallErrorKind, Result};
use crate::params::ParameterSet;
use crate::resolver::{resolve_references, resolve_schemas};
use crate::returned::{BoxError, Returned};

const EXPECTED_PENDING: &str = "return value should be Promise";
const UNEXPECTED_PENDING: &str = "return value should not be a Promise. If a Promise is desired then define a resolve-style schema instead of a return-style schema";

type Origin = &'static Location<'static>;

/// Outcome of [`CallValidator::invoke`].
pub enum Invocation {
    /// A synchronous contract finished.
    Settled(Result<Option<Value>>),
    /// An asynchronous contract; the future fails or yields the checked
    /// resolved value.
    Pending(BoxFuture<'static, Result<Option<Value>>>),
}

impl Invocation {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Wait for the outcome, whichever mode produced it.
    pub async fn outcome(self) -> Result<Option<Value>> {
        match self {
            Self::Settled(result) => result,
            Self::Pending(future) => future.await,
        }
    }
}

impl std::fmt::Debug for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Settled(result) => f.debug_tuple("Settled").field(result).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Runs functions under call contracts checked against a shared registry.
///
/// Cheap to clone; clones share the same read-only registry.
#[derive(Clone)]
pub struct CallValidator {
    registry: Arc<SchemaRegistry>,
}

impl CallValidator {
    pub fn new(registry: SchemaRegistry) -> Self {
        Self::from_shared(Arc::new(registry))
    }

    pub fn from_shared(registry: Arc<SchemaRegistry>) -> Self {
        Self { registry }
    }

    /// Build a validator over `additional` named schemas plus the built-ins.
    pub fn build(additional: &Value) -> std::result::Result<Self, ConfigError> {
        Self::build_with_config(additional, RegistryConfig::default())
    }

    pub fn build_with_config(
        additional: &Value,
        config: RegistryConfig,
    ) -> std::result::Result<Self, ConfigError> {
        SchemaRegistry::build_with_config(additional, config).map(Self::new)
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Run `f` under a synchronous contract.
    ///
    /// `returns: None` requires `f` to produce no value.
    #[track_caller]
    pub fn call<F>(
        &self,
        parameters: ParameterSet,
        returns: Option<Schema>,
        f: F,
    ) -> Result<Option<Value>>
    where
        F: FnOnce() -> std::result::Result<Returned, BoxError>,
    {
        let origin = Location::caller();
        self.run_sync(CallContract::returning(parameters, returns), f, origin)
    }

    /// Run `f` under an asynchronous contract.
    ///
    /// Arguments are checked and `f` is called before this returns; the
    /// future only awaits and checks the resolved value.
    #[track_caller]
    pub fn call_async<F>(
        &self,
        parameters: ParameterSet,
        returns: Option<Schema>,
        f: F,
    ) -> BoxFuture<'static, Result<Option<Value>>>
    where
        F: FnOnce() -> std::result::Result<Returned, BoxError>,
    {
        let origin = Location::caller();
        self.run_async(CallContract::resolving(parameters, returns), f, origin)
    }

    /// Run `f` under `contract`, in whichever mode it declares.
    #[track_caller]
    pub fn invoke<F>(&self, contract: CallContract, f: F) -> Invocation
    where
        F: FnOnce() -> std::result::Result<Returned, BoxError>,
    {
        let origin = Location::caller();
        if contract.is_async() {
            Invocation::Pending(self.run_async(contract, f, origin))
        } else {
            Invocation::Settled(self.run_sync(contract, f, origin))
        }
    }

    fn run_sync<F>(&self, contract: CallContract, f: F, origin: Origin) -> Result<Option<Value>>
    where
        F: FnOnce() -> std::result::Result<Returned, BoxError>,
    {
        let returns = self.check_arguments(&contract, origin)?;

        match f().map_err(|err| wrapped(err, origin))? {
            Returned::Ready(value) => check_result(returns.as_ref(), false, value, origin),
            // Dropping an unpolled future discards it without running it.
            Returned::Pending(_) => Err(fail(
                CallErrorKind::ResultShape,
                vec![UNEXPECTED_PENDING.to_string()],
                origin,
            )),
        }
    }

    fn run_async<F>(
        &self,
        contract: CallContract,
        f: F,
        origin: Origin,
    ) -> BoxFuture<'static, Result<Option<Value>>>
    where
        F: FnOnce() -> std::result::Result<Returned, BoxError>,
    {
        let returns = match self.check_arguments(&contract, origin) {
            Ok(returns) => returns,
            Err(err) => return Box::pin(std::future::ready(Err(err))),
        };

        let pending = match f() {
            Ok(Returned::Pending(pending)) => pending,
            Ok(Returned::Ready(_)) => {
                let err = fail(
                    CallErrorKind::ResultShape,
                    vec![EXPECTED_PENDING.to_string()],
                    origin,
                );
                return Box::pin(std::future::ready(Err(err)));
            }
            Err(err) => return Box::pin(std::future::ready(Err(wrapped(err, origin)))),
        };

        Box::pin(async move {
            let resolved = pending.await.map_err(|err| wrapped(err, origin))?;
            check_result(returns.as_ref(), true, resolved, origin)
        })
    }

    /// Resolve every reference, compile every schema, then check every
    /// argument. Each stage reports all of its problems at once. Yields the
    /// compiled result schema.
    fn check_arguments(
        &self,
        contract: &CallContract,
        origin: Origin,
    ) -> Result<Option<ResolvedSchema>> {
        let unresolved = resolve_references(contract, &self.registry);
        if !unresolved.is_empty() {
            return Err(fail(CallErrorKind::ReferenceResolution, unresolved, origin));
        }

        let resolved = resolve_schemas(contract, &self.registry)
            .map_err(|problems| fail(CallErrorKind::InvalidSchema, problems, origin))?;

        let invalid: Vec<String> = contract
            .parameters()
            .iter()
            .zip(&resolved.parameters)
            .filter_map(|(param, schema)| schema.check(param.value(), param.label()))
            .collect();
        if !invalid.is_empty() {
            return Err(fail(CallErrorKind::ParameterValidation, invalid, origin));
        }

        Ok(resolved.returns)
    }
}

impl std::fmt::Debug for CallValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallValidator")
            .field("registry", &self.registry)
            .finish()
    }
}

fn check_result(
    returns: Option<&ResolvedSchema>,
    is_async: bool,
    produced: Option<Value>,
    origin: Origin,
) -> Result<Option<Value>> {
    let modifier = result_modifier(is_async);

    let failure = match (returns, &produced) {
        (None, None) => None,
        (None, Some(_)) => Some(format!("{modifier} should be undefined")),
        (Some(schema), None) => schema.check_absent(modifier),
        (Some(schema), Some(value)) => schema.check(value, modifier),
    };

    match failure {
        Some(line) => Err(fail(CallErrorKind::ResultValidation, vec![line], origin)),
        None => Ok(produced),
    }
}

fn fail(kind: CallErrorKind, lines: Vec<String>, origin: Origin) -> CallError {
    debug!(?kind, problems = lines.len(), %origin, "checked call failed");
    CallError::new(kind, lines, origin)
}

fn wrapped(err: BoxError, origin: Origin) -> CallError {
    debug!(error = %err, %origin, "wrapped function failed");
    CallError::wrapped(err, origin)
}
