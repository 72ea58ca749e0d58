//! Scalar coercions and type-dispatch helpers for the dynamic schema.

mod event_kind;
mod scalars;

pub use event_kind::{EVENT_TYPE_DISCRIMINATOR, EventKind};
pub use scalars::{ParseFn, ScalarCoercion, SerializeFn, standard_coercions, workaround_coercions};
