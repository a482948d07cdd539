//! Wizard session state machine.
//!
//! One session owns one in-flight entry: the flat buffer, the current step,
//! and the resolved owner id. Transitions happen on discrete user events and
//! every commit failure is caught here and turned into a single visible
//! reason; nothing escapes to the caller as a panic or stray error.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::{domain::Property, identity::Identity, storage::PropertyStore};

use super::buffer::{EditBuffer, FieldValue};
use super::commit::{self, CommitError};
use super::preview::{FileSource, LocalPreviews, PreviewProvider};
use super::schema::{FieldDescriptor, FieldKind, FormSchema};

/// Whether the session creates a new record or rewrites an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardMode {
    Create,
    Edit { id: Uuid },
}

/// Lifecycle of one wizard session.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardPhase {
    /// The gate has not resolved an owner yet; stepping is not available.
    AwaitingOwner,
    Stepping { index: usize },
    /// A commit attempt is in flight; navigation is suspended.
    Committing,
    Done { id: Uuid },
    /// Commit failed; the buffer and step position survive so the user can
    /// revise or resubmit. There is no automatic retry.
    Failed { reason: String },
}

/// Raw input for the current step, applied by field kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// Text, numeric, or time entry as typed.
    Text(String),
    /// A select choice; the empty string clears the field.
    Select(String),
    /// A file selection. The whole previous selection is replaced.
    Files(Vec<FileSource>),
    /// One checkbox option flipped in or out of the collected set.
    Toggle(String),
}

/// How the engine reacts to an interaction response at one step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepResponse {
    Submit(FieldInput),
    /// Several inputs for one step, applied in order (checkbox toggles).
    SubmitMany(Vec<FieldInput>),
    Next,
    Previous,
    Cancel,
}

pub struct WizardSession<'a> {
    schema: &'a FormSchema,
    mode: WizardMode,
    owner_id: Option<Uuid>,
    buffer: EditBuffer,
    index: usize,
    phase: WizardPhase,
    previews: Box<dyn PreviewProvider>,
    acquired: BTreeMap<String, Vec<String>>,
}

impl<'a> WizardSession<'a> {
    /// Starts a create-mode session. The first step stays locked until
    /// [`WizardSession::resolve_owner`] supplies a client id.
    pub fn create(schema: &'a FormSchema) -> Self {
        Self {
            schema,
            mode: WizardMode::Create,
            owner_id: None,
            buffer: EditBuffer::new(),
            index: 0,
            phase: WizardPhase::AwaitingOwner,
            previews: Box::new(LocalPreviews::new()),
            acquired: BTreeMap::new(),
        }
    }

    /// Starts an edit-mode session. The gate is bypassed: the owner comes
    /// from the record, and the buffer is pre-populated wholesale with
    /// UI-friendly coercions (booleans as `Yes`/`No`, cleaning flags as the
    /// list of set names).
    pub fn edit(schema: &'a FormSchema, property: &Property) -> Self {
        Self {
            schema,
            mode: WizardMode::Edit { id: property.id },
            owner_id: Some(property.client_id),
            buffer: prefill(property),
            index: 0,
            phase: WizardPhase::Stepping { index: 0 },
            previews: Box::new(LocalPreviews::new()),
            acquired: BTreeMap::new(),
        }
    }

    pub fn with_previews(mut self, previews: Box<dyn PreviewProvider>) -> Self {
        self.previews = previews;
        self
    }

    #[cfg(test)]
    pub(crate) fn stepping_without_owner(schema: &'a FormSchema) -> Self {
        let mut session = Self::create(schema);
        session.phase = WizardPhase::Stepping { index: 0 };
        session
    }

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    pub fn phase(&self) -> &WizardPhase {
        &self.phase
    }

    pub fn step_index(&self) -> usize {
        self.index
    }

    pub fn owner_id(&self) -> Option<Uuid> {
        self.owner_id
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    /// Completion percentage shown over the step sequence.
    pub fn progress(&self) -> f64 {
        if matches!(self.phase, WizardPhase::AwaitingOwner) {
            return 0.0;
        }
        ((self.index + 1) as f64 / self.schema.len() as f64) * 100.0
    }

    pub fn current_field(&self) -> Option<&'a FieldDescriptor> {
        self.schema.field_at(self.index)
    }

    /// Value collected for the current field, with the time default
    /// substituted when the step was never touched.
    pub fn current_value(&self) -> Option<FieldValue> {
        let field = self.current_field()?;
        match self.buffer.get(field.id) {
            Some(value) => Some(value.clone()),
            None if field.kind == FieldKind::Time => Some(FieldValue::text(
                commit::DEFAULT_EMERGENCY_RESPONSE_TIME,
            )),
            None => None,
        }
    }

    /// Resolves the gate with the selected client and unlocks step 0.
    pub fn resolve_owner(&mut self, client_id: Uuid) {
        if !matches!(self.phase, WizardPhase::AwaitingOwner) {
            tracing::warn!("owner already resolved; ignoring");
            return;
        }
        self.owner_id = Some(client_id);
        self.enter_step(0);
    }

    /// Applies raw input to the current step. Never fails: ill-typed input is
    /// coerced (numbers store the NaN sentinel) or dropped with a log line.
    pub fn apply_input(&mut self, input: FieldInput) {
        if !matches!(self.phase, WizardPhase::Stepping { .. }) {
            tracing::warn!("input outside a stepping phase is ignored");
            return;
        }
        let schema = self.schema;
        let Some(field) = schema.field_at(self.index) else {
            return;
        };
        match (field.kind, input) {
            (FieldKind::Text, FieldInput::Text(raw)) => {
                self.buffer = self.buffer.with_value(field.id, FieldValue::Text(raw));
            }
            (FieldKind::Number, FieldInput::Text(raw)) => {
                self.buffer = self
                    .buffer
                    .with_value(field.id, FieldValue::Number(coerce_number(&raw)));
            }
            (FieldKind::Time, FieldInput::Text(raw)) => {
                if raw.trim().is_empty() {
                    self.buffer = self.buffer.without(field.id);
                } else {
                    self.buffer = self.buffer.with_value(field.id, FieldValue::Text(raw));
                }
            }
            (FieldKind::Select, FieldInput::Select(choice)) => {
                if choice.is_empty() {
                    self.buffer = self.buffer.without(field.id);
                } else if field.options.iter().any(|option| option == &choice) {
                    self.buffer = self.buffer.with_value(field.id, FieldValue::Text(choice));
                } else {
                    tracing::warn!(field = field.id, %choice, "choice outside options ignored");
                }
            }
            (FieldKind::File, FieldInput::Files(sources)) => {
                self.apply_files(field, sources);
            }
            (FieldKind::CheckboxGroup, FieldInput::Toggle(option)) => {
                self.apply_toggle(field, option);
            }
            (kind, other) => {
                tracing::warn!(field = field.id, ?kind, input = ?other, "mismatched input ignored");
            }
        }
    }

    /// Advances one step; at the last step this enters the commit phase. A
    /// failed session advances straight back into commit (resubmission).
    /// Advancing never checks field validity.
    pub fn next(&mut self) {
        match self.phase {
            WizardPhase::Stepping { .. } => {
                if self.index + 1 < self.schema.len() {
                    self.enter_step(self.index + 1);
                } else {
                    self.phase = WizardPhase::Committing;
                }
            }
            WizardPhase::Failed { .. } => {
                self.phase = WizardPhase::Committing;
            }
            _ => {}
        }
    }

    /// Steps back; a no-op at step 0. From a failed commit this reopens the
    /// final step for revision.
    pub fn previous(&mut self) {
        match self.phase {
            WizardPhase::Stepping { .. } => {
                if self.index > 0 {
                    self.enter_step(self.index - 1);
                }
            }
            WizardPhase::Failed { .. } => {
                self.enter_step(self.index);
            }
            _ => {}
        }
    }

    /// Runs the commit transform and dispatches exactly one persistence call.
    /// All failures are converted into [`WizardPhase::Failed`]; the buffer and
    /// step position are preserved.
    pub fn commit(&mut self, store: &mut dyn PropertyStore, identity: &dyn Identity) -> &WizardPhase {
        if !matches!(self.phase, WizardPhase::Committing) {
            tracing::warn!("commit requested outside the committing phase");
            return &self.phase;
        }
        match self.try_commit(store, identity) {
            Ok(id) => {
                tracing::info!(%id, "property saved");
                self.phase = WizardPhase::Done { id };
            }
            Err(err) => {
                tracing::warn!(%err, "commit failed");
                self.phase = WizardPhase::Failed {
                    reason: err.to_string(),
                };
            }
        }
        &self.phase
    }

    fn try_commit(
        &self,
        store: &mut dyn PropertyStore,
        identity: &dyn Identity,
    ) -> Result<Uuid, CommitError> {
        let user = identity.current_user().ok_or_else(|| {
            CommitError::Validation("You must be logged in to manage properties".into())
        })?;
        let owner = self
            .owner_id
            .ok_or_else(|| CommitError::Validation("Please select a property owner".into()))?;

        let record_id = match self.mode {
            WizardMode::Create => Uuid::new_v4(),
            WizardMode::Edit { id } => id,
        };
        let record = commit::build_record(&self.buffer, owner, user.id, record_id)?;

        match self.mode {
            WizardMode::Create => Ok(store.create(record)?),
            WizardMode::Edit { id } => {
                store.update(id, record)?;
                Ok(id)
            }
        }
    }

    fn enter_step(&mut self, index: usize) {
        self.index = index;
        self.phase = WizardPhase::Stepping { index };
    }

    fn apply_files(&mut self, field: &FieldDescriptor, sources: Vec<FileSource>) {
        let mut accepted: Vec<FileSource> = sources
            .into_iter()
            .filter(|source| accept_matches(field.accept, &source.media_type))
            .collect();
        if !field.multiple {
            accepted.truncate(1);
        }

        // Last selection wins: superseded previews are revoked, not leaked.
        if let Some(old) = self.acquired.remove(field.id) {
            for handle in old {
                self.previews.release(&handle);
            }
        }

        let handles: Vec<String> = accepted
            .iter()
            .map(|source| self.previews.acquire(source))
            .collect();
        self.acquired.insert(field.id.to_string(), handles.clone());
        self.buffer = self.buffer.with_value(field.id, FieldValue::List(handles));
    }

    fn apply_toggle(&mut self, field: &FieldDescriptor, option: String) {
        if !field.options.iter().any(|candidate| candidate == &option) {
            tracing::warn!(field = field.id, %option, "toggle outside options ignored");
            return;
        }
        let mut selected = self
            .buffer
            .get(field.id)
            .and_then(FieldValue::as_list)
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        if let Some(position) = selected.iter().position(|entry| entry == &option) {
            selected.remove(position);
        } else {
            selected.push(option);
        }
        self.buffer = self.buffer.with_value(field.id, FieldValue::List(selected));
    }
}

impl Drop for WizardSession<'_> {
    fn drop(&mut self) {
        for handles in std::mem::take(&mut self.acquired).into_values() {
            for handle in handles {
                self.previews.release(&handle);
            }
        }
    }
}

fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        0.0
    } else {
        trimmed.parse().unwrap_or(f64::NAN)
    }
}

fn accept_matches(pattern: Option<&str>, media_type: &str) -> bool {
    match pattern {
        None => true,
        Some("*/*") => true,
        Some(pattern) => match pattern.strip_suffix("/*") {
            Some(prefix) => media_type
                .split_once('/')
                .is_some_and(|(kind, _)| kind == prefix),
            None => pattern == media_type,
        },
    }
}

/// Edit-mode pre-population: stored booleans render as the literal `Yes`/`No`
/// choices and the cleaning struct renders as the list of set flag names.
fn prefill(property: &Property) -> EditBuffer {
    let mut buffer = EditBuffer::new()
        .with_value("name", FieldValue::text(&property.name))
        .with_value("type", FieldValue::text(&property.property_type))
        .with_value("address", FieldValue::text(&property.address))
        .with_value("surface", FieldValue::Number(property.surface))
        .with_value("floor", FieldValue::Number(property.floor as f64))
        .with_value("door", FieldValue::text(&property.door))
        .with_value("doorSlams", choice(property.door_slams))
        .with_value(
            "emergencyResponseTime",
            FieldValue::text(&property.emergency_response_time),
        )
        .with_value("deposit", FieldValue::Number(property.deposit))
        .with_value("elevator", choice(property.elevator))
        .with_value("furnished", choice(property.furnished))
        .with_value("wifiName", FieldValue::text(&property.wifi_name))
        .with_value("wifiPassword", FieldValue::text(&property.wifi_password))
        .with_value("keys.total", FieldValue::Number(property.keys.total as f64))
        .with_value(
            "keys.available",
            FieldValue::Number(property.keys.available as f64),
        )
        .with_value(
            "keys.lockSystem",
            FieldValue::text(&property.keys.lock_system),
        )
        .with_value(
            "keys.keyImages",
            FieldValue::List(property.keys.key_images.clone()),
        )
        .with_value("cleaning", FieldValue::List(set_flags(&property.cleaning)));
    if let Some(number) = &property.building_number {
        buffer = buffer.with_value("buildingNumber", FieldValue::text(number));
    }
    buffer
}

fn choice(value: bool) -> FieldValue {
    FieldValue::text(if value { "Yes" } else { "No" })
}

fn set_flags(cleaning: &crate::domain::CleaningEquipment) -> Vec<String> {
    let flags = [
        ("mop", cleaning.mop),
        ("broom", cleaning.broom),
        ("dustpan", cleaning.dustpan),
        ("vacuumCleaner", cleaning.vacuum_cleaner),
    ];
    flags
        .into_iter()
        .filter(|(_, set)| *set)
        .map(|(name, _)| name.to_string())
        .collect()
}
