//! Engine-level error types

use crate::gameobject::ComponentId;
use thiserror::Error;

/// Errors produced by the component layer and the wrapped native backends.
///
/// Three classes of failure exist:
///
/// - Configuration errors (`MissingField`, `InvalidField`, `ConfigParse`,
///   `UnregisteredKind`) abort construction of the GameObject being built.
/// - Invariant violations (`DuplicateComponent`, `MissingSibling`) are
///   programming or scene-data errors reported to the caller.
/// - `NativeCall` failures are recoverable: the rejected operation is a
///   no-op and the frame continues.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A required configuration field was absent from the record passed to `awake`
    #[error("missing required config field `{field}`")]
    MissingField {
        /// Name of the absent field
        field: String,
    },

    /// A configuration field was present but had the wrong type or an invalid value
    #[error("invalid config field `{field}`: expected {expected}")]
    InvalidField {
        /// Name of the offending field
        field: String,
        /// What the field should have contained
        expected: &'static str,
    },

    /// A configuration record could not be parsed from text
    #[error("failed to parse config record: {0}")]
    ConfigParse(String),

    /// No factory is registered for the requested component kind
    #[error("no factory registered for component kind {0:?}")]
    UnregisteredKind(ComponentId),

    /// A component of this kind already exists on the GameObject
    #[error("GameObject `{owner}` already has a {kind:?} component")]
    DuplicateComponent {
        /// Name of the owning GameObject
        owner: String,
        /// Kind that was added twice
        kind: ComponentId,
    },

    /// A required sibling component was absent at lookup time
    #[error("GameObject `{owner}` has no {kind:?} component required by a sibling")]
    MissingSibling {
        /// Name of the owning GameObject
        owner: String,
        /// Kind of the absent sibling
        kind: ComponentId,
    },

    /// A wrapped-engine call rejected its parameters
    #[error("native call rejected: {0}")]
    NativeCall(String),
}

impl EngineError {
    /// Shorthand for a [`EngineError::NativeCall`] failure
    pub fn native(what: impl Into<String>) -> Self {
        Self::NativeCall(what.into())
    }

    /// Whether this error is recoverable within the current frame
    ///
    /// Native-call rejections are no-ops by contract; everything else aborts
    /// the construction or operation that produced it.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NativeCall(_))
    }
}
