use jss_schema::Schema;

use crate::params::ParameterSet;

/// Per-call options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// The wrapped function hands back a pending value whose resolved
    /// value is checked.
    pub is_async: bool,
}

/// The declared schemas and mode of one checked call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallContract {
    parameters: ParameterSet,
    returns: Option<Schema>,
    is_async: bool,
}

impl CallContract {
    /// Declare a contract.
    ///
    /// `returns: None` declares that the call produces no value at all.
    pub fn new(parameters: ParameterSet, returns: Option<Schema>, options: CallOptions) -> Self {
        Self {
            parameters,
            returns,
            is_async: options.is_async,
        }
    }

    /// A contract whose function returns its value directly.
    pub fn returning(parameters: ParameterSet, returns: Option<Schema>) -> Self {
        Self::new(parameters, returns, CallOptions { is_async: false })
    }

    /// A contract whose function returns a pending value.
    pub fn resolving(parameters: ParameterSet, returns: Option<Schema>) -> Self {
        Self::new(parameters, returns, CallOptions { is_async: true })
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    pub fn returns(&self) -> Option<&Schema> {
        self.returns.as_ref()
    }

    pub fn is_async(&self) -> bool {
        self.is_async
    }

    /// Name of the result position in reference errors.
    pub(crate) fn result_location(&self) -> &'static str {
        if self.is_async {
            "resolve"
        } else {
            "return"
        }
    }
}

/// Label for the produced value in result errors.
pub(crate) fn result_modifier(is_async: bool) -> &'static str {
    if is_async {
        "resolved value"
    } else {
        "return value"
    }
}
