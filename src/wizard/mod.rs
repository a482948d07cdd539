//! Schema-driven multi-step entry wizard.
//!
//! A declarative field schema drives a sequential flow: each step collects one
//! field into a flat [`buffer::EditBuffer`], the session state machine owns
//! navigation and progress, and a single commit pass reshapes the flat answers
//! into the nested [`crate::domain::Property`] record before persistence.

pub mod buffer;
pub mod commit;
pub mod engine;
pub mod gate;
pub mod path;
pub mod preview;
pub mod schema;
pub mod session;

pub use buffer::{EditBuffer, FieldValue};
pub use commit::CommitError;
pub use engine::{WizardEngine, WizardInteraction, WizardOutcome};
pub use gate::{GateResponse, OwnerGate};
pub use preview::{FileSource, LocalPreviews, PreviewProvider};
pub use schema::{property_schema, FieldDescriptor, FieldKind, FormSchema, SchemaError};
pub use session::{FieldInput, StepResponse, WizardMode, WizardPhase, WizardSession};
