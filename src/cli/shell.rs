//! Interactive admin shell: property CRUD, client management, language and
//! profile settings, with the entry wizard wired in for create/edit.

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::{
    cli::{output, prompt_interaction::PromptInteraction},
    config::{Config, ConfigManager},
    core::services::{ClientService, PropertyService, ServiceError},
    domain::common::Displayable,
    domain::Client,
    errors::CoreError,
    i18n::{Language, Translator},
    identity::{ProfileIdentity, User},
    storage::{ClientDirectory, JsonStorage},
    utils::build_info,
    wizard::{property_schema, OwnerGate, WizardEngine, WizardOutcome},
};

pub fn run() -> Result<(), CoreError> {
    crate::init();
    banner();

    let config_manager = ConfigManager::new()?;
    let mut config = config_manager.load()?;
    let mut storage = JsonStorage::new_default()?;
    let schema = property_schema();
    let theme = ColorfulTheme::default();

    loop {
        let items = [
            "List properties",
            "New property",
            "Edit property",
            "Delete property",
            "List clients",
            "Add client",
            "Language",
            "Profile",
            "Quit",
        ];
        let choice = Select::with_theme(&theme)
            .with_prompt("property_core")
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(interact_err)?;

        let result = match choice {
            Some(0) => list_properties(&storage, &config),
            Some(1) => new_property(&mut storage, &config, &schema, &theme),
            Some(2) => edit_property(&mut storage, &config, &schema, &theme),
            Some(3) => delete_property(&mut storage, &config, &theme),
            Some(4) => list_clients(&storage),
            Some(5) => add_client(&mut storage, &theme),
            Some(6) => choose_language(&config_manager, &mut config, &theme),
            Some(7) => set_profile(&config_manager, &mut config, &theme),
            Some(8) | None => break,
            Some(_) => Ok(()),
        };
        if let Err(err) = result {
            output::error(err);
        }
    }

    Ok(())
}

fn banner() {
    let build = build_info::current();
    output::section(format!(
        "Property Core {} ({} {})",
        build.version, build.git_hash, build.profile
    ));
}

fn signed_in_user(config: &Config) -> Result<User, CoreError> {
    config
        .profile
        .clone()
        .ok_or_else(|| CoreError::Storage("set up a profile first".into()))
}

fn list_properties(storage: &JsonStorage, config: &Config) -> Result<(), CoreError> {
    let user = signed_in_user(config)?;
    let properties =
        PropertyService::list(storage, user.id).map_err(service_err)?;
    if properties.is_empty() {
        output::info("No properties yet.");
        return Ok(());
    }
    output::section("Properties");
    for property in &properties {
        output::info(format!("  {}", property.display_label()));
    }
    Ok(())
}

fn new_property(
    storage: &mut JsonStorage,
    config: &Config,
    schema: &crate::wizard::FormSchema,
    theme: &ColorfulTheme,
) -> Result<(), CoreError> {
    let translator = Translator::new(config.language);
    let identity = ProfileIdentity::new(config.profile.clone());
    let gate = OwnerGate::load(storage)?;
    if gate.is_empty() {
        output::warning("No clients on file; create one first.");
        return add_client(storage, theme);
    }

    let engine = WizardEngine::new(schema, translator);
    let mut interaction = PromptInteraction::new();
    match engine.run_create(&gate, storage, &identity, &mut interaction) {
        WizardOutcome::Saved(id) => {
            output::success(format!("Property saved ({id})."));
        }
        WizardOutcome::Abandoned => output::info("Property creation cancelled."),
        WizardOutcome::RedirectToClientCreation => {
            add_client(storage, theme)?;
        }
    }
    Ok(())
}

fn edit_property(
    storage: &mut JsonStorage,
    config: &Config,
    schema: &crate::wizard::FormSchema,
    theme: &ColorfulTheme,
) -> Result<(), CoreError> {
    let user = signed_in_user(config)?;
    let translator = Translator::new(config.language);
    let identity = ProfileIdentity::new(config.profile.clone());

    let Some(property) = pick_property(storage, user, theme)? else {
        return Ok(());
    };
    // Re-read by id: the record may have vanished between listing and pick.
    let property = PropertyService::get(storage, property.id).map_err(service_err)?;

    let engine = WizardEngine::new(schema, translator);
    let mut interaction = PromptInteraction::new();
    match engine.run_edit(&property, storage, &identity, &mut interaction) {
        WizardOutcome::Saved(id) => output::success(format!("Property updated ({id}).")),
        WizardOutcome::Abandoned => output::info("Property edit cancelled."),
        WizardOutcome::RedirectToClientCreation => {}
    }
    Ok(())
}

fn delete_property(
    storage: &mut JsonStorage,
    config: &Config,
    theme: &ColorfulTheme,
) -> Result<(), CoreError> {
    let user = signed_in_user(config)?;
    let Some(property) = pick_property(storage, user, theme)? else {
        return Ok(());
    };
    let confirmed = Confirm::with_theme(theme)
        .with_prompt(format!("Delete `{}`?", property.name))
        .default(false)
        .interact()
        .map_err(interact_err)?;
    if confirmed {
        PropertyService::remove(storage, property.id).map_err(service_err)?;
        output::success("Property deleted.");
    }
    Ok(())
}

fn pick_property(
    storage: &JsonStorage,
    user: User,
    theme: &ColorfulTheme,
) -> Result<Option<crate::domain::Property>, CoreError> {
    let properties = PropertyService::list(storage, user.id).map_err(service_err)?;
    if properties.is_empty() {
        output::info("No properties yet.");
        return Ok(None);
    }
    let labels: Vec<String> = properties
        .iter()
        .map(Displayable::display_label)
        .collect();
    let choice = Select::with_theme(theme)
        .with_prompt("Pick a property")
        .items(&labels)
        .default(0)
        .interact_opt()
        .map_err(interact_err)?;
    Ok(choice.map(|index| properties[index].clone()))
}

fn list_clients(storage: &JsonStorage) -> Result<(), CoreError> {
    let clients = ClientService::list(storage as &dyn ClientDirectory).map_err(service_err)?;
    if clients.is_empty() {
        output::info("No clients yet.");
        return Ok(());
    }
    output::section("Clients");
    for client in &clients {
        output::info(format!("  {}", client.display_label()));
    }
    Ok(())
}

fn add_client(storage: &mut JsonStorage, theme: &ColorfulTheme) -> Result<(), CoreError> {
    let name: String = Input::with_theme(theme)
        .with_prompt("Client name")
        .interact_text()
        .map_err(interact_err)?;
    let email: String = Input::with_theme(theme)
        .with_prompt("Email (optional)")
        .allow_empty(true)
        .interact_text()
        .map_err(interact_err)?;

    let mut client = Client::new(name);
    if !email.trim().is_empty() {
        client = client.with_email(email.trim());
    }
    let id = ClientService::add(storage, client).map_err(service_err)?;
    output::success(format!("Client saved ({id})."));
    Ok(())
}

fn choose_language(
    config_manager: &ConfigManager,
    config: &mut Config,
    theme: &ColorfulTheme,
) -> Result<(), CoreError> {
    let labels: Vec<&str> = Language::ALL.iter().map(|lang| lang.label()).collect();
    let current = Language::ALL
        .iter()
        .position(|lang| *lang == config.language)
        .unwrap_or(0);
    let choice = Select::with_theme(theme)
        .with_prompt("Language")
        .items(&labels)
        .default(current)
        .interact_opt()
        .map_err(interact_err)?;
    if let Some(index) = choice {
        config.language = Language::ALL[index];
        config_manager.save(config)?;
        output::success(format!("Language set to {}.", config.language.label()));
    }
    Ok(())
}

fn set_profile(
    config_manager: &ConfigManager,
    config: &mut Config,
    theme: &ColorfulTheme,
) -> Result<(), CoreError> {
    let email: String = Input::with_theme(theme)
        .with_prompt("Account email")
        .interact_text()
        .map_err(interact_err)?;
    config.profile = Some(User::new(email.trim()));
    config_manager.save(config)?;
    output::success("Profile stored.");
    Ok(())
}

fn interact_err(err: dialoguer::Error) -> CoreError {
    CoreError::Storage(err.to_string())
}

fn service_err(err: ServiceError) -> CoreError {
    match err {
        ServiceError::Core(core) => core,
        ServiceError::Invalid(message) => CoreError::Storage(message),
    }
}
