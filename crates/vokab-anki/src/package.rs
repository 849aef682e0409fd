//! `.apkg` writer.
//!
//! An Anki package is a zip holding `collection.anki2`, an SQLite collection in
//! the legacy schema (version 11), and a `media` map, empty here.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use serde_json::{Map, Value, json};

use crate::ids::{deck_id, field_checksum, model_id, note_guid};
use crate::template::NoteModel;

const SCHEMA: &str = r#"
CREATE TABLE col (
    id integer primary key, crt integer not null, mod integer not null,
    scm integer not null, ver integer not null, dty integer not null,
    usn integer not null, ls integer not null, conf text not null,
    models text not null, decks text not null, dconf text not null,
    tags text not null
);
CREATE TABLE notes (
    id integer primary key, guid text not null, mid integer not null,
    mod integer not null, usn integer not null, tags text not null,
    flds text not null, sfld integer not null, csum integer not null,
    flags integer not null, data text not null
);
CREATE TABLE cards (
    id integer primary key, nid integer not null, did integer not null,
    ord integer not null, mod integer not null, usn integer not null,
    type integer not null, queue integer not null, due integer not null,
    ivl integer not null, factor integer not null, reps integer not null,
    lapses integer not null, left integer not null, odue integer not null,
    odid integer not null, flags integer not null, data text not null
);
CREATE TABLE revlog (
    id integer primary key, cid integer not null, usn integer not null,
    ease integer not null, ivl integer not null, lastIvl integer not null,
    factor integer not null, time integer not null, type integer not null
);
CREATE TABLE graves (
    usn integer not null, oid integer not null, type integer not null
);
CREATE INDEX ix_notes_usn on notes (usn);
CREATE INDEX ix_cards_usn on cards (usn);
CREATE INDEX ix_revlog_usn on revlog (usn);
CREATE INDEX ix_cards_nid on cards (nid);
CREATE INDEX ix_cards_sched on cards (did, queue, due);
CREATE INDEX ix_revlog_cid on revlog (cid);
CREATE INDEX ix_notes_csum on notes (csum);
"#;

const COLLECTION_VERSION: i64 = 11;
const FIELD_SEPARATOR: &str = "\u{1f}";
const DEFAULT_DECK_ID: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub fields: Vec<String>,
}

impl Note {
    pub fn new(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// The first field sorts the browser and feeds the checksum
    pub fn sort_field(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or_default()
    }

    pub fn guid(&self) -> String {
        note_guid(&self.fields)
    }
}

#[derive(Debug, Clone)]
pub struct Deck {
    pub id: i64,
    pub name: String,
    pub model: NoteModel,
    pub notes: Vec<Note>,
}

impl Deck {
    /// Deck and model ids are derived from the name
    pub fn new(name: &str) -> Self {
        Self {
            id: deck_id(name),
            name: name.to_string(),
            model: NoteModel::vocabulary(name, model_id(name)),
            notes: Vec::new(),
        }
    }

    pub fn add_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Write the deck as a standalone package, overwriting `path`
    pub fn write_package(&self, path: &Path) -> Result<()> {
        let workdir = tempfile::tempdir().context("Failed to create temp dir")?;
        let db_path = workdir.path().join("collection.anki2");

        {
            let mut conn = Connection::open(&db_path).context("Failed to create collection")?;
            self.write_collection(&mut conn)?;
        }

        let collection = fs::read(&db_path).context("Failed to read collection")?;
        write_zip(path, &collection)
            .with_context(|| format!("Failed to write package {}", path.display()))
    }

    fn write_collection(&self, conn: &mut Connection) -> Result<()> {
        let now_ms = now_millis();
        let now = now_ms / 1000;

        let tx = conn.transaction()?;
        tx.execute_batch(SCHEMA)?;

        tx.execute(
            "INSERT INTO col VALUES (NULL, ?1, ?2, ?3, ?4, 0, 0, 0, ?5, ?6, ?7, ?8, '{}')",
            params![
                now,
                now_ms,
                now_ms,
                COLLECTION_VERSION,
                self.conf_json().to_string(),
                self.models_json(now).to_string(),
                self.decks_json(now).to_string(),
                dconf_json().to_string(),
            ],
        )?;

        let card_id_base = now_ms + self.notes.len() as i64;
        for (index, note) in self.notes.iter().enumerate() {
            let note_id = now_ms + index as i64;

            tx.execute(
                "INSERT INTO notes VALUES (?1, ?2, ?3, ?4, -1, '', ?5, ?6, ?7, 0, '')",
                params![
                    note_id,
                    note.guid(),
                    self.model.id,
                    now,
                    note.fields.join(FIELD_SEPARATOR),
                    note.sort_field(),
                    field_checksum(note.sort_field()),
                ],
            )?;

            tx.execute(
                "INSERT INTO cards VALUES (?1, ?2, ?3, 0, ?4, -1, 0, 0, ?5, 0, 0, 0, 0, 0, 0, 0, 0, '')",
                params![card_id_base + index as i64, note_id, self.id, now, index as i64],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn conf_json(&self) -> Value {
        json!({
            "activeDecks": [DEFAULT_DECK_ID],
            "addToCur": true,
            "collapseTime": 1200,
            "curDeck": DEFAULT_DECK_ID,
            "curModel": self.model.id.to_string(),
            "dueCounts": true,
            "estTimes": true,
            "newBury": true,
            "newSpread": 0,
            "nextPos": 1,
            "sortBackwards": false,
            "sortType": "noteFld",
            "timeLim": 0
        })
    }

    fn models_json(&self, now: i64) -> Value {
        let model = &self.model;
        let fields: Vec<Value> = model
            .fields
            .iter()
            .enumerate()
            .map(|(ord, name)| {
                json!({
                    "font": "Liberation Sans",
                    "media": [],
                    "name": name,
                    "ord": ord,
                    "rtl": false,
                    "size": 20,
                    "sticky": false
                })
            })
            .collect();

        let mut models = Map::new();
        models.insert(
            model.id.to_string(),
            json!({
                "css": model.css,
                "did": self.id,
                "flds": fields,
                "id": model.id,
                "latexPost": "\\end{document}",
                "latexPre": "\\documentclass[12pt]{article}\n\\special{papersize=3in,5in}\n\\usepackage[utf8]{inputenc}\n\\usepackage{amssymb,amsmath}\n\\pagestyle{empty}\n\\setlength{\\parindent}{0in}\n\\begin{document}\n",
                "mod": now,
                "name": model.name,
                "req": [[0, "any", [0]]],
                "sortf": 0,
                "tags": [],
                "tmpls": [{
                    "afmt": model.back_template,
                    "bafmt": "",
                    "bqfmt": "",
                    "did": null,
                    "name": model.card_name,
                    "ord": 0,
                    "qfmt": model.front_template
                }],
                "type": 0,
                "usn": -1,
                "vers": []
            }),
        );
        Value::Object(models)
    }

    fn decks_json(&self, now: i64) -> Value {
        let mut decks = Map::new();
        decks.insert(DEFAULT_DECK_ID.to_string(), deck_json(DEFAULT_DECK_ID, "Default", now));
        decks.insert(self.id.to_string(), deck_json(self.id, &self.name, now));
        Value::Object(decks)
    }
}

fn deck_json(id: i64, name: &str, now: i64) -> Value {
    json!({
        "collapsed": false,
        "conf": 1,
        "desc": "",
        "dyn": 0,
        "extendNew": 10,
        "extendRev": 50,
        "id": id,
        "lrnToday": [0, 0],
        "mod": now,
        "name": name,
        "newToday": [0, 0],
        "revToday": [0, 0],
        "timeToday": [0, 0],
        "usn": -1
    })
}

fn dconf_json() -> Value {
    json!({
        "1": {
            "autoplay": true,
            "id": 1,
            "lapse": {
                "delays": [10],
                "leechAction": 0,
                "leechFails": 8,
                "minInt": 1,
                "mult": 0
            },
            "maxTaken": 60,
            "mod": 0,
            "name": "Default",
            "new": {
                "bury": true,
                "delays": [1, 10],
                "initialFactor": 2500,
                "ints": [1, 4, 7],
                "order": 1,
                "perDay": 20,
                "separate": true
            },
            "replayq": true,
            "rev": {
                "bury": true,
                "ease4": 1.3,
                "fuzz": 0.05,
                "ivlFct": 1,
                "maxIvl": 36500,
                "minSpace": 1,
                "perDay": 100
            },
            "timer": 0,
            "usn": 0
        }
    })
}

fn write_zip(path: &Path, collection: &[u8]) -> Result<()> {
    let mut zip = zip::ZipWriter::new(File::create(path)?);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("collection.anki2", options)?;
    zip.write_all(collection)?;
    zip.start_file("media", options)?;
    zip.write_all(b"{}")?;
    zip.finish()?;
    Ok(())
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    /// Unpack the collection from a package and open it
    fn open_collection(package: &Path) -> (tempfile::TempDir, Connection) {
        let mut archive = zip::ZipArchive::new(File::open(package).unwrap()).unwrap();
        let mut bytes = Vec::new();
        archive
            .by_name("collection.anki2")
            .unwrap()
            .read_to_end(&mut bytes)
            .unwrap();

        let mut media = String::new();
        archive.by_name("media").unwrap().read_to_string(&mut media).unwrap();
        assert_eq!(media, "{}");

        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("collection.anki2");
        fs::write(&db, bytes).unwrap();
        let conn = Connection::open(&db).unwrap();
        (dir, conn)
    }

    fn sample_deck() -> Deck {
        let mut deck = Deck::new("space");
        deck.add_note(Note::new(["cat", "кот", "The cat sat."]));
        deck.add_note(Note::new(["x", "y", "z"]));
        deck
    }

    #[test]
    fn test_package_contains_notes_and_cards() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("space.apkg");
        let deck = sample_deck();
        deck.write_package(&path).unwrap();

        let (_tmp, conn) = open_collection(&path);
        let notes: i64 = conn.query_row("SELECT COUNT(*) FROM notes", [], |r| r.get(0)).unwrap();
        let cards: i64 = conn
            .query_row("SELECT COUNT(*) FROM cards WHERE did = ?1", [deck.id], |r| r.get(0))
            .unwrap();
        assert_eq!(notes, 2);
        assert_eq!(cards, 2);

        let (flds, sfld, mid): (String, String, i64) = conn
            .query_row(
                "SELECT flds, sfld, mid FROM notes ORDER BY id LIMIT 1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(flds, "cat\u{1f}кот\u{1f}The cat sat.");
        assert_eq!(sfld, "cat");
        assert_eq!(mid, deck.model.id);
    }

    #[test]
    fn test_collection_json_describes_deck_and_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("space.apkg");
        let deck = sample_deck();
        deck.write_package(&path).unwrap();

        let (_tmp, conn) = open_collection(&path);
        let (models, decks, ver): (String, String, i64) = conn
            .query_row("SELECT models, decks, ver FROM col", [], |r| {
                Ok((r.get(0)?, r.get(1)?, r.get(2)?))
            })
            .unwrap();
        assert_eq!(ver, 11);

        let models: Value = serde_json::from_str(&models).unwrap();
        let model = &models[deck.model.id.to_string()];
        assert_eq!(model["name"], "space Model");
        assert_eq!(model["flds"].as_array().unwrap().len(), 3);
        assert_eq!(model["flds"][2]["name"], "Sentence");

        let decks: Value = serde_json::from_str(&decks).unwrap();
        assert_eq!(decks[deck.id.to_string()]["name"], "space");
    }

    #[test]
    fn test_same_name_same_ids_and_guids() {
        let first = sample_deck();
        let second = sample_deck();
        assert_eq!(first.id, second.id);
        assert_eq!(first.model.id, second.model.id);
        assert_eq!(first.notes[0].guid(), second.notes[0].guid());
    }
}
