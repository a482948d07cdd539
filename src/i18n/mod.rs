//! Dictionary-backed localization.
//!
//! The wizard and CLI never hardcode user-facing strings; they resolve keys
//! through a [`Translator`] passed in explicitly, so tests can stub lookups
//! without any global state.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Fr,
    En,
    Es,
    It,
}

impl Default for Language {
    fn default() -> Self {
        Language::Fr
    }
}

impl Language {
    pub const ALL: [Language; 4] = [Language::Fr, Language::En, Language::Es, Language::It];

    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::Es => "es",
            Language::It => "it",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::Fr => "Français",
            Language::En => "English",
            Language::Es => "Español",
            Language::It => "Italiano",
        }
    }

    fn index(self) -> usize {
        match self {
            Language::Fr => 0,
            Language::En => 1,
            Language::Es => 2,
            Language::It => 3,
        }
    }
}

/// Resolves translation keys for one language. Unknown keys fall back to the
/// key itself so a missing entry degrades visibly instead of panicking.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        match dictionary().get(key) {
            Some(entries) => entries[self.language.index()],
            None => key,
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

// Entries are [fr, en, es, it].
type Entry = [&'static str; 4];

static DICTIONARY: Lazy<HashMap<&'static str, Entry>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (key, entry) in DEFAULT_TRANSLATIONS {
        map.insert(*key, *entry);
    }
    map
});

fn dictionary() -> &'static HashMap<&'static str, Entry> {
    &DICTIONARY
}

const DEFAULT_TRANSLATIONS: &[(&str, Entry)] = &[
    (
        "properties.form.name",
        [
            "Quel est le nom de la propriété ?",
            "What is the property name?",
            "¿Cuál es el nombre de la propiedad?",
            "Qual è il nome della proprietà?",
        ],
    ),
    (
        "properties.form.type",
        [
            "Quel type de propriété est-ce ?",
            "What type of property is it?",
            "¿Qué tipo de propiedad es?",
            "Che tipo di proprietà è?",
        ],
    ),
    (
        "properties.form.buildingNumber",
        [
            "Quel est le numéro du bâtiment ? (le cas échéant)",
            "What is the building number? (if applicable)",
            "¿Cuál es el número del edificio? (si procede)",
            "Qual è il numero dell'edificio? (se applicabile)",
        ],
    ),
    (
        "properties.form.address",
        [
            "Quelle est l'adresse complète ?",
            "What is the complete address?",
            "¿Cuál es la dirección completa?",
            "Qual è l'indirizzo completo?",
        ],
    ),
    (
        "properties.form.surface",
        [
            "Quelle est la surface en m² ?",
            "What is the surface area in m²?",
            "¿Cuál es la superficie en m²?",
            "Qual è la superficie in m²?",
        ],
    ),
    (
        "properties.form.floor",
        [
            "À quel étage se trouve la propriété ?",
            "Which floor is the property on?",
            "¿En qué piso está la propiedad?",
            "A quale piano si trova la proprietà?",
        ],
    ),
    (
        "properties.form.door",
        [
            "Quel est le numéro de porte ?",
            "What is the door number?",
            "¿Cuál es el número de puerta?",
            "Qual è il numero della porta?",
        ],
    ),
    (
        "properties.form.doorSlams",
        [
            "La porte claque-t-elle ?",
            "Does the door slam shut?",
            "¿Se cierra la puerta de golpe?",
            "La porta sbatte?",
        ],
    ),
    (
        "properties.form.emergencyResponseTime",
        [
            "Quel est le délai d'intervention d'urgence du propriétaire ?",
            "What is the emergency response time for the property owner?",
            "¿Cuál es el tiempo de respuesta de emergencia del propietario?",
            "Qual è il tempo di risposta di emergenza del proprietario?",
        ],
    ),
    (
        "properties.form.deposit",
        [
            "Quel est le montant de la caution (en €) ?",
            "What is the deposit amount (in €)?",
            "¿Cuál es el importe del depósito (en €)?",
            "Qual è l'importo del deposito (in €)?",
        ],
    ),
    (
        "properties.form.elevator",
        [
            "Y a-t-il un ascenseur dans le bâtiment ?",
            "Is there an elevator in the building?",
            "¿Hay ascensor en el edificio?",
            "C'è un ascensore nell'edificio?",
        ],
    ),
    (
        "properties.form.furnished",
        [
            "La propriété est-elle meublée ?",
            "Is the property furnished?",
            "¿Está amueblada la propiedad?",
            "La proprietà è arredata?",
        ],
    ),
    (
        "properties.form.wifiName",
        [
            "Quel est le nom du réseau WiFi ?",
            "What is the WiFi network name?",
            "¿Cuál es el nombre de la red WiFi?",
            "Qual è il nome della rete WiFi?",
        ],
    ),
    (
        "properties.form.wifiPassword",
        [
            "Quel est le mot de passe WiFi ?",
            "What is the WiFi password?",
            "¿Cuál es la contraseña del WiFi?",
            "Qual è la password del WiFi?",
        ],
    ),
    (
        "properties.form.keys.total",
        [
            "Combien de clés y a-t-il au total ?",
            "How many keys are there in total?",
            "¿Cuántas llaves hay en total?",
            "Quante chiavi ci sono in totale?",
        ],
    ),
    (
        "properties.form.keys.available",
        [
            "Combien de clés sont actuellement disponibles ?",
            "How many keys are currently available?",
            "¿Cuántas llaves están disponibles actualmente?",
            "Quante chiavi sono attualmente disponibili?",
        ],
    ),
    (
        "properties.form.keys.lockSystem",
        [
            "Quel type de système de verrouillage est installé ?",
            "What type of lock system is installed?",
            "¿Qué tipo de cerradura está instalada?",
            "Che tipo di serratura è installata?",
        ],
    ),
    (
        "properties.form.keys.keyImages",
        [
            "Téléchargez des photos de toutes les clés",
            "Upload photos of all keys",
            "Suba fotos de todas las llaves",
            "Carica le foto di tutte le chiavi",
        ],
    ),
    (
        "properties.form.cleaning",
        [
            "Quel équipement de ménage est disponible ?",
            "Which cleaning equipment is available?",
            "¿Qué equipo de limpieza está disponible?",
            "Quale attrezzatura per le pulizie è disponibile?",
        ],
    ),
    (
        "properties.form.next",
        ["Suivant", "Next", "Siguiente", "Avanti"],
    ),
    (
        "properties.form.previous",
        ["Précédent", "Previous", "Anterior", "Indietro"],
    ),
    ("properties.form.create", ["Créer", "Create", "Crear", "Crea"]),
    (
        "properties.form.update",
        ["Mettre à jour", "Update", "Actualizar", "Aggiorna"],
    ),
    (
        "properties.form.newProperty",
        [
            "Nouvelle propriété",
            "New Property",
            "Nueva propiedad",
            "Nuova proprietà",
        ],
    ),
    (
        "properties.form.editProperty",
        [
            "Modifier la propriété",
            "Edit Property",
            "Editar propiedad",
            "Modifica proprietà",
        ],
    ),
    (
        "properties.form.selectOwner",
        [
            "Sélectionnez un propriétaire",
            "Select a property owner",
            "Seleccione un propietario",
            "Seleziona un proprietario",
        ],
    ),
    (
        "properties.form.createNewClient",
        [
            "Créer un nouveau client",
            "Create a new client",
            "Crear un nuevo cliente",
            "Crea un nuovo cliente",
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_key_in_selected_language() {
        let translator = Translator::new(Language::En);
        assert_eq!(
            translator.t("properties.form.name"),
            "What is the property name?"
        );
        let translator = Translator::new(Language::Es);
        assert_eq!(
            translator.t("properties.form.name"),
            "¿Cuál es el nombre de la propiedad?"
        );
    }

    #[test]
    fn unknown_key_falls_back_to_the_key() {
        let translator = Translator::new(Language::It);
        assert_eq!(translator.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn default_language_is_french() {
        let translator = Translator::default();
        assert_eq!(translator.language(), Language::Fr);
        assert_eq!(
            translator.t("properties.form.next"),
            "Suivant"
        );
    }
}
