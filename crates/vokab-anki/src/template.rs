use serde::{Deserialize, Serialize};

pub const FIELDS: [&str; 3] = ["Word", "Translation", "Sentence"];

const CARD_NAME: &str = "Card 1";

const FRONT: &str = r#"
<div class="card">
  <div class="word">{{Word}}</div>
</div>
"#;

const BACK: &str = r#"
<div class="card">
  <div class="word">{{FrontSide}}</div>
  <hr id="answer">
  <div class="translation">{{Translation}}</div>
  <div class="sentence"><i>{{Sentence}}</i></div>
</div>
"#;

const CSS: &str = r#"
.card {
    display: flex;
    flex-direction: column;
    justify-content: center;
    align-items: center;
    height: 100%;
    font-family: Arial, sans-serif;
}
.word {
    font-size: 48px;
    font-weight: bold;
    color: white;
}
.translation {
    font-size: 32px;
    color: white;
}
.sentence {
    font-size: 24px;
    color: white;
}
"#;

/// Anki note type: fields plus a single card template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteModel {
    pub id: i64,
    pub name: String,
    pub fields: Vec<String>,
    pub card_name: String,
    pub front_template: String,
    pub back_template: String,
    pub css: String,
}

impl NoteModel {
    /// Word / Translation / Sentence model named after the deck
    pub fn vocabulary(deck_name: &str, id: i64) -> Self {
        Self {
            id,
            name: format!("{} Model", deck_name),
            fields: FIELDS.iter().map(|f| f.to_string()).collect(),
            card_name: CARD_NAME.to_string(),
            front_template: FRONT.to_string(),
            back_template: BACK.to_string(),
            css: CSS.to_string(),
        }
    }
}
