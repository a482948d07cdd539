//! Drives a [`WizardSession`] against an interaction surface.
//!
//! The engine owns the loop; interactions only answer questions. The CLI
//! provides a dialoguer-backed implementation, tests provide scripted queues.

use uuid::Uuid;

use crate::{
    domain::Property, i18n::Translator, identity::Identity, storage::PropertyStore,
};

use super::buffer::FieldValue;
use super::gate::{GateResponse, OwnerGate};
use super::schema::{FieldDescriptor, FormSchema};
use super::session::{StepResponse, WizardPhase, WizardSession};

/// Data handed to the interaction when rendering one step.
pub struct StepContext<'a> {
    pub field: &'a FieldDescriptor,
    /// Prompt resolved through the translator.
    pub prompt: &'static str,
    pub current: Option<FieldValue>,
    pub index: usize,
    pub total: usize,
    pub progress: f64,
}

/// Labels for the owner-selection gate, resolved through the translator.
pub struct GatePrompts {
    pub title: &'static str,
    pub create_new: &'static str,
}

/// What the user chose to do after a failed commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Resubmit as-is.
    Retry,
    /// Reopen the final step for revision.
    Revise,
    Abandon,
}

/// Terminal result of a wizard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    Saved(Uuid),
    Abandoned,
    /// The gate chose "create a new client"; the caller redirects to the
    /// client-creation flow and this session is gone.
    RedirectToClientCreation,
}

/// Interaction surface used by the engine. Implementations render prompts and
/// collect answers; they never own wizard state.
pub trait WizardInteraction {
    fn choose_owner(&mut self, gate: &OwnerGate, prompts: &GatePrompts) -> GateResponse;

    fn prompt_step(&mut self, context: &StepContext<'_>) -> StepResponse;

    fn on_failure(&mut self, reason: &str) -> RetryDecision;
}

pub struct WizardEngine<'a> {
    schema: &'a FormSchema,
    translator: Translator,
}

impl<'a> WizardEngine<'a> {
    pub fn new(schema: &'a FormSchema, translator: Translator) -> Self {
        Self { schema, translator }
    }

    /// Runs the create flow: gate first, then the step sequence.
    pub fn run_create<I: WizardInteraction>(
        &self,
        gate: &OwnerGate,
        store: &mut dyn PropertyStore,
        identity: &dyn Identity,
        interaction: &mut I,
    ) -> WizardOutcome {
        let mut session = WizardSession::create(self.schema);
        let prompts = GatePrompts {
            title: self.translator.t("properties.form.selectOwner"),
            create_new: self.translator.t("properties.form.createNewClient"),
        };
        match interaction.choose_owner(gate, &prompts) {
            GateResponse::Selected(client_id) => session.resolve_owner(client_id),
            GateResponse::CreateNew => return WizardOutcome::RedirectToClientCreation,
            GateResponse::Cancelled => return WizardOutcome::Abandoned,
        }
        self.drive(session, store, identity, interaction)
    }

    /// Runs the edit flow; the gate is bypassed entirely.
    pub fn run_edit<I: WizardInteraction>(
        &self,
        property: &Property,
        store: &mut dyn PropertyStore,
        identity: &dyn Identity,
        interaction: &mut I,
    ) -> WizardOutcome {
        let session = WizardSession::edit(self.schema, property);
        self.drive(session, store, identity, interaction)
    }

    fn drive<I: WizardInteraction>(
        &self,
        mut session: WizardSession<'_>,
        store: &mut dyn PropertyStore,
        identity: &dyn Identity,
        interaction: &mut I,
    ) -> WizardOutcome {
        loop {
            match session.phase().clone() {
                WizardPhase::Stepping { index } => {
                    let Some(field) = session.current_field() else {
                        return WizardOutcome::Abandoned;
                    };
                    let context = StepContext {
                        field,
                        prompt: self.translator.t(field.prompt_key),
                        current: session.current_value(),
                        index,
                        total: self.schema.len(),
                        progress: session.progress(),
                    };
                    match interaction.prompt_step(&context) {
                        StepResponse::Submit(input) => {
                            session.apply_input(input);
                            session.next();
                        }
                        StepResponse::SubmitMany(inputs) => {
                            for input in inputs {
                                session.apply_input(input);
                            }
                            session.next();
                        }
                        StepResponse::Next => session.next(),
                        StepResponse::Previous => session.previous(),
                        StepResponse::Cancel => return WizardOutcome::Abandoned,
                    }
                }
                WizardPhase::Committing => {
                    session.commit(store, identity);
                }
                WizardPhase::Done { id } => return WizardOutcome::Saved(id),
                WizardPhase::Failed { reason } => match interaction.on_failure(&reason) {
                    RetryDecision::Retry => session.next(),
                    RetryDecision::Revise => session.previous(),
                    RetryDecision::Abandon => return WizardOutcome::Abandoned,
                },
                // The run entry points resolve the gate before driving.
                WizardPhase::AwaitingOwner => return WizardOutcome::Abandoned,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use crate::domain::Client;
    use crate::errors::CoreError;
    use crate::i18n::Language;
    use crate::identity::{ProfileIdentity, User};
    use crate::storage::Result as StorageResult;
    use crate::wizard::schema::property_schema;
    use crate::wizard::session::FieldInput;

    #[derive(Default)]
    struct MemoryStore {
        records: Vec<Property>,
    }

    impl PropertyStore for MemoryStore {
        fn list_by_owner(&self, owner_id: Uuid) -> StorageResult<Vec<Property>> {
            Ok(self
                .records
                .iter()
                .filter(|record| record.user_id == owner_id)
                .cloned()
                .collect())
        }

        fn get(&self, id: Uuid) -> StorageResult<Property> {
            self.records
                .iter()
                .find(|record| record.id == id)
                .cloned()
                .ok_or_else(|| CoreError::NotFound(format!("property `{id}`")))
        }

        fn create(&mut self, property: Property) -> StorageResult<Uuid> {
            let id = property.id;
            self.records.push(property);
            Ok(id)
        }

        fn update(&mut self, id: Uuid, property: Property) -> StorageResult<()> {
            let slot = self
                .records
                .iter_mut()
                .find(|record| record.id == id)
                .ok_or_else(|| CoreError::NotFound(format!("property `{id}`")))?;
            *slot = property;
            Ok(())
        }

        fn delete(&mut self, id: Uuid) -> StorageResult<()> {
            let before = self.records.len();
            self.records.retain(|record| record.id != id);
            if self.records.len() == before {
                return Err(CoreError::NotFound(format!("property `{id}`")));
            }
            Ok(())
        }
    }

    struct ScriptedInteraction {
        gate: GateResponse,
        steps: VecDeque<StepResponse>,
        failures: VecDeque<RetryDecision>,
        prompts_seen: Vec<&'static str>,
    }

    impl ScriptedInteraction {
        fn new(gate: GateResponse, steps: Vec<StepResponse>) -> Self {
            Self {
                gate,
                steps: steps.into(),
                failures: VecDeque::new(),
                prompts_seen: Vec::new(),
            }
        }
    }

    impl WizardInteraction for ScriptedInteraction {
        fn choose_owner(&mut self, _gate: &OwnerGate, _prompts: &GatePrompts) -> GateResponse {
            self.gate
        }

        fn prompt_step(&mut self, context: &StepContext<'_>) -> StepResponse {
            self.prompts_seen.push(context.prompt);
            self.steps.pop_front().unwrap_or(StepResponse::Next)
        }

        fn on_failure(&mut self, _reason: &str) -> RetryDecision {
            self.failures.pop_front().unwrap_or(RetryDecision::Abandon)
        }
    }

    fn engine(schema: &FormSchema) -> WizardEngine<'_> {
        WizardEngine::new(schema, Translator::new(Language::En))
    }

    #[test]
    fn create_flow_saves_a_record_with_the_selected_owner() {
        let schema = property_schema();
        let mut store = MemoryStore::default();
        let identity = ProfileIdentity::signed_in(User::new("admin@example.com"));
        let client = Client::new("Acme Rentals");
        let gate = OwnerGate::from_clients(vec![client.clone()]);

        let mut steps = vec![
            StepResponse::Submit(FieldInput::Text("Villa Rosa".into())),
            StepResponse::Submit(FieldInput::Select("Villa".into())),
        ];
        steps.extend(std::iter::repeat(StepResponse::Next).take(16));
        steps.push(StepResponse::SubmitMany(vec![
            FieldInput::Toggle("vacuumCleaner".into()),
            FieldInput::Toggle("mop".into()),
        ]));
        let mut interaction =
            ScriptedInteraction::new(GateResponse::Selected(client.id), steps);

        let outcome = engine(&schema).run_create(&gate, &mut store, &identity, &mut interaction);

        let WizardOutcome::Saved(id) = outcome else {
            panic!("expected a saved record, got {outcome:?}");
        };
        let saved = store.get(id).expect("record persisted");
        assert_eq!(saved.name, "Villa Rosa");
        assert_eq!(saved.property_type, "Villa");
        assert_eq!(saved.client_id, client.id);
        assert!(saved.cleaning.mop && saved.cleaning.vacuum_cleaner);
        assert!(!saved.cleaning.broom && !saved.cleaning.dustpan);
        assert_eq!(
            interaction.prompts_seen.first().copied(),
            Some("What is the property name?")
        );
    }

    #[test]
    fn create_new_client_abandons_the_session() {
        let schema = property_schema();
        let mut store = MemoryStore::default();
        let identity = ProfileIdentity::signed_in(User::new("admin@example.com"));
        let gate = OwnerGate::from_clients(vec![Client::new("Acme Rentals")]);
        let mut interaction = ScriptedInteraction::new(GateResponse::CreateNew, Vec::new());

        let outcome = engine(&schema).run_create(&gate, &mut store, &identity, &mut interaction);

        assert_eq!(outcome, WizardOutcome::RedirectToClientCreation);
        assert!(store.records.is_empty());
    }

    #[test]
    fn failure_then_abandon_leaves_no_record() {
        let schema = property_schema();
        let mut store = MemoryStore::default();
        // No signed-in user: the commit precondition fails.
        let identity = ProfileIdentity::default();
        let gate = OwnerGate::from_clients(vec![Client::new("Acme Rentals")]);
        let client_id = gate.choices()[0].id;
        let steps = std::iter::repeat(StepResponse::Next).take(19).collect();
        let mut interaction =
            ScriptedInteraction::new(GateResponse::Selected(client_id), steps);

        let outcome = engine(&schema).run_create(&gate, &mut store, &identity, &mut interaction);

        assert_eq!(outcome, WizardOutcome::Abandoned);
        assert!(store.records.is_empty());
    }

    #[test]
    fn back_navigation_rewrites_an_earlier_answer() {
        let schema = property_schema();
        let mut store = MemoryStore::default();
        let identity = ProfileIdentity::signed_in(User::new("admin@example.com"));
        let gate = OwnerGate::from_clients(vec![Client::new("Acme Rentals")]);
        let client_id = gate.choices()[0].id;

        let mut steps = vec![
            StepResponse::Submit(FieldInput::Text("Draft name".into())),
            StepResponse::Previous,
            StepResponse::Submit(FieldInput::Text("Final name".into())),
        ];
        steps.extend(std::iter::repeat(StepResponse::Next).take(18));
        let mut interaction =
            ScriptedInteraction::new(GateResponse::Selected(client_id), steps);

        let outcome = engine(&schema).run_create(&gate, &mut store, &identity, &mut interaction);

        let WizardOutcome::Saved(id) = outcome else {
            panic!("expected a saved record, got {outcome:?}");
        };
        assert_eq!(store.get(id).expect("record").name, "Final name");
    }
}
