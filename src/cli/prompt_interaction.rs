//! Dialoguer-backed implementation of the wizard interaction surface.
//!
//! Text-style prompts understand `:back` and `:cancel` commands; menus carry
//! explicit back/cancel entries. Any prompt failure is treated as a cancel so
//! a broken terminal never strands the session.

use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};

use crate::cli::output;
use crate::domain::common::Displayable;
use crate::wizard::{
    engine::{GatePrompts, RetryDecision, StepContext, WizardInteraction},
    FieldKind, FieldInput, FieldValue, FileSource, GateResponse, OwnerGate, StepResponse,
};

const BACK_COMMAND: &str = ":back";
const CANCEL_COMMAND: &str = ":cancel";

pub struct PromptInteraction {
    theme: ColorfulTheme,
}

impl PromptInteraction {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn print_step_header(&self, context: &StepContext<'_>) {
        println!();
        output::section(format!(
            "Step {} of {} ({:.0}%)",
            context.index + 1,
            context.total,
            context.progress
        ));
        output::info(context.prompt);
    }

    fn prompt_text(&self, context: &StepContext<'_>) -> StepResponse {
        let initial = match &context.current {
            Some(FieldValue::Text(value)) => value.clone(),
            Some(FieldValue::Number(value)) if !value.is_nan() => value.to_string(),
            _ => String::new(),
        };
        output::info(format!(
            "Press Enter to keep the current value. Type {BACK_COMMAND} or {CANCEL_COMMAND} to navigate."
        ));
        let result = Input::<String>::with_theme(&self.theme)
            .with_prompt("Your answer")
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text();
        match result {
            Ok(raw) if raw.trim() == BACK_COMMAND => StepResponse::Previous,
            Ok(raw) if raw.trim() == CANCEL_COMMAND => StepResponse::Cancel,
            Ok(raw) if raw.trim().is_empty() => StepResponse::Next,
            Ok(raw) => StepResponse::Submit(FieldInput::Text(raw)),
            Err(_) => StepResponse::Cancel,
        }
    }

    fn prompt_select(&self, context: &StepContext<'_>) -> StepResponse {
        let mut items: Vec<String> = context.field.options.clone();
        items.push("← Back".into());
        items.push("Cancel".into());

        let default = context
            .current
            .as_ref()
            .and_then(|value| value.as_text())
            .and_then(|current| {
                context
                    .field
                    .options
                    .iter()
                    .position(|option| option == current)
            })
            .unwrap_or(0);

        let result = Select::with_theme(&self.theme)
            .with_prompt("Select an option")
            .items(&items)
            .default(default)
            .interact_opt();
        match result {
            Ok(Some(index)) if index < context.field.options.len() => {
                StepResponse::Submit(FieldInput::Select(items[index].clone()))
            }
            Ok(Some(index)) if index == context.field.options.len() => StepResponse::Previous,
            Ok(Some(_)) | Ok(None) => StepResponse::Cancel,
            Err(_) => StepResponse::Cancel,
        }
    }

    fn prompt_files(&self, context: &StepContext<'_>) -> StepResponse {
        let hint = match context.field.accept {
            Some(pattern) => format!("Comma-separated file names ({pattern})"),
            None => "Comma-separated file names".to_string(),
        };
        output::info(format!(
            "Press Enter to keep the current selection. Type {BACK_COMMAND} or {CANCEL_COMMAND} to navigate."
        ));
        let result = Input::<String>::with_theme(&self.theme)
            .with_prompt(hint)
            .allow_empty(true)
            .interact_text();
        match result {
            Ok(raw) if raw.trim() == BACK_COMMAND => StepResponse::Previous,
            Ok(raw) if raw.trim() == CANCEL_COMMAND => StepResponse::Cancel,
            Ok(raw) if raw.trim().is_empty() => StepResponse::Next,
            Ok(raw) => {
                let sources: Vec<FileSource> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(|name| FileSource::new(name, media_type_for(name)))
                    .collect();
                StepResponse::Submit(FieldInput::Files(sources))
            }
            Err(_) => StepResponse::Cancel,
        }
    }

    fn prompt_checkboxes(&self, context: &StepContext<'_>) -> StepResponse {
        let selected: Vec<String> = context
            .current
            .as_ref()
            .and_then(|value| value.as_list())
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        let defaults: Vec<bool> = context
            .field
            .options
            .iter()
            .map(|option| selected.iter().any(|entry| entry == option))
            .collect();

        let result = MultiSelect::with_theme(&self.theme)
            .with_prompt("Toggle with Space, confirm with Enter")
            .items(&context.field.options)
            .defaults(&defaults)
            .interact_opt();
        match result {
            Ok(Some(indices)) => {
                let wanted: Vec<&String> = indices
                    .iter()
                    .filter_map(|&index| context.field.options.get(index))
                    .collect();
                let mut toggles = Vec::new();
                for entry in &selected {
                    if !wanted.iter().any(|option| *option == entry) {
                        toggles.push(FieldInput::Toggle(entry.clone()));
                    }
                }
                for option in wanted {
                    if !selected.iter().any(|entry| entry == option) {
                        toggles.push(FieldInput::Toggle(option.clone()));
                    }
                }
                StepResponse::SubmitMany(toggles)
            }
            Ok(None) | Err(_) => StepResponse::Cancel,
        }
    }
}

impl Default for PromptInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardInteraction for PromptInteraction {
    fn choose_owner(&mut self, gate: &OwnerGate, prompts: &GatePrompts) -> GateResponse {
        let mut items: Vec<String> = gate
            .choices()
            .iter()
            .map(|client| client.display_label())
            .collect();
        items.push(prompts.create_new.to_string());
        items.push("Cancel".into());

        let result = Select::with_theme(&self.theme)
            .with_prompt(prompts.title)
            .items(&items)
            .default(0)
            .interact_opt();
        match result {
            Ok(Some(index)) if index < gate.choices().len() => {
                GateResponse::Selected(gate.choices()[index].id)
            }
            Ok(Some(index)) if index == gate.choices().len() => GateResponse::CreateNew,
            Ok(Some(_)) | Ok(None) => GateResponse::Cancelled,
            Err(_) => GateResponse::Cancelled,
        }
    }

    fn prompt_step(&mut self, context: &StepContext<'_>) -> StepResponse {
        self.print_step_header(context);
        match context.field.kind {
            FieldKind::Text | FieldKind::Number | FieldKind::Time => self.prompt_text(context),
            FieldKind::Select => self.prompt_select(context),
            FieldKind::File => self.prompt_files(context),
            FieldKind::CheckboxGroup => self.prompt_checkboxes(context),
        }
    }

    fn on_failure(&mut self, reason: &str) -> RetryDecision {
        output::error(reason);
        let items = ["Try again", "Revise the last answer", "Abandon"];
        let result = Select::with_theme(&self.theme)
            .with_prompt("The record was not saved")
            .items(&items)
            .default(0)
            .interact_opt();
        match result {
            Ok(Some(0)) => RetryDecision::Retry,
            Ok(Some(1)) => RetryDecision::Revise,
            _ => RetryDecision::Abandon,
        }
    }
}

fn media_type_for(name: &str) -> &'static str {
    match name.rsplit('.').next().map(str::to_ascii_lowercase).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_covers_common_image_extensions() {
        assert_eq!(media_type_for("front.JPG"), "image/jpeg");
        assert_eq!(media_type_for("plan.png"), "image/png");
        assert_eq!(media_type_for("notes.pdf"), "application/pdf");
        assert_eq!(media_type_for("unknown"), "application/octet-stream");
    }
}
