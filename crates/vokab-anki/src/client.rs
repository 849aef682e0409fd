use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::package::Note;
use crate::template::NoteModel;

#[derive(Clone)]
pub struct AnkiConnectClient {
    base_url: String,
    client: reqwest::Client,
}

impl AnkiConnectClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Check if AnkiConnect is available
    pub async fn check_connection(&self) -> Result<u32> {
        let response: AnkiResponse<u32> = self.invoke("version", json!({})).await?;
        response.into_result()
    }

    /// Get list of deck names
    pub async fn deck_names(&self) -> Result<Vec<String>> {
        let response: AnkiResponse<Vec<String>> = self.invoke("deckNames", json!({})).await?;
        response.into_result()
    }

    /// Get list of model (note type) names
    pub async fn model_names(&self) -> Result<Vec<String>> {
        let response: AnkiResponse<Vec<String>> = self.invoke("modelNames", json!({})).await?;
        response.into_result()
    }

    pub async fn create_deck(&self, deck: &str) -> Result<u64> {
        let response: AnkiResponse<u64> = self
            .invoke("createDeck", json!({ "deck": deck }))
            .await?;
        response.into_result()
    }

    pub async fn create_model(&self, model: &NoteModel) -> Result<()> {
        let response: AnkiResponse<Value> = self
            .invoke("createModel", create_model_params(model))
            .await?;
        response.into_result().map(|_| ())
    }

    /// Add notes in one request. Returns the new note ids; `None` marks a
    /// note Anki refused, usually a duplicate.
    pub async fn add_notes(
        &self,
        deck: &str,
        model: &NoteModel,
        notes: &[Note],
    ) -> Result<Vec<Option<u64>>> {
        let response: AnkiResponse<Vec<Option<u64>>> = self
            .invoke("addNotes", add_notes_params(deck, model, notes))
            .await?;
        response.into_result()
    }

    /// Invoke an AnkiConnect API action
    async fn invoke<T>(&self, action: &str, params: Value) -> Result<AnkiResponse<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let request = AnkiRequest {
            action: action.to_string(),
            version: 6,
            params,
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to AnkiConnect")?;

        response
            .json::<AnkiResponse<T>>()
            .await
            .context("Failed to parse AnkiConnect response")
    }
}

fn create_model_params(model: &NoteModel) -> Value {
    json!({
        "modelName": model.name,
        "inOrderFields": model.fields,
        "css": model.css,
        "isCloze": false,
        "cardTemplates": [{
            "Name": model.card_name,
            "Front": model.front_template,
            "Back": model.back_template
        }]
    })
}

fn add_notes_params(deck: &str, model: &NoteModel, notes: &[Note]) -> Value {
    let notes: Vec<Value> = notes
        .iter()
        .map(|note| {
            let fields: Map<String, Value> = model
                .fields
                .iter()
                .zip(&note.fields)
                .map(|(name, value)| (name.clone(), Value::String(value.clone())))
                .collect();

            json!({
                "deckName": deck,
                "modelName": model.name,
                "fields": fields,
                "options": { "allowDuplicate": false },
                "tags": ["vokab"]
            })
        })
        .collect();

    json!({ "notes": notes })
}

#[derive(Serialize)]
struct AnkiRequest {
    action: String,
    version: u32,
    params: Value,
}

#[derive(Deserialize)]
struct AnkiResponse<T> {
    result: Option<T>,
    error: Option<String>,
}

impl<T> AnkiResponse<T> {
    fn into_result(self) -> Result<T> {
        if let Some(error) = self.error {
            anyhow::bail!("AnkiConnect error: {}", error);
        }

        self.result
            .context("AnkiConnect returned null result")
    }
}
