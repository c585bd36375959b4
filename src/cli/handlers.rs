use std::env;
use std::io::{self, Read};

use super::render::{empty_message, format_detail, format_summary};
use crate::config::{Config, DIR_ENV};
use crate::entity::SortOrder;
use crate::error::{NoteError, Result};
use crate::session::Session;
use crate::storage::FileStorage;
use crate::store::NoteStore;

fn open_session(config: &Config) -> Result<Session<FileStorage>> {
    let storage = FileStorage::open(&config.data_dir)?;
    let store = NoteStore::open_with_key(storage, config.storage_key.clone());
    Ok(Session::new(store))
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}

pub fn handle_init(config: &Config) -> Result<()> {
    // init targets the working directory, not a discovered ancestor
    let config = if env::var_os(DIR_ENV).is_some_and(|d| !d.is_empty()) {
        config.clone()
    } else {
        Config {
            storage_key: config.storage_key.clone(),
            ..Config::at(&env::current_dir()?)
        }
    };

    let storage = FileStorage::init(&config.data_dir)?;
    NoteStore::open_with_key(storage, config.storage_key).persist()?;

    println!("Initialized notepin in {}", config.data_dir.display());
    Ok(())
}

pub fn handle_add(
    config: &Config,
    title: String,
    content: Option<String>,
    stdin: bool,
    tags: String,
    pin: bool,
    json: bool,
) -> Result<()> {
    let mut session = open_session(config)?;

    let mut form = session.request_create();
    form.title = title;
    form.content = if stdin {
        read_stdin()?
    } else {
        content.unwrap_or_default()
    };
    form.tags = tags;
    form.pinned = pin;

    session.submit(&form)?;

    // the newly created note is always last in collection order
    let note = session
        .store()
        .notes()
        .last()
        .ok_or_else(|| NoteError::Storage("Failed to retrieve created note".to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        println!("Created note {} - {}", note.short_id(), note.title);
    }

    Ok(())
}

pub fn handle_edit(
    config: &Config,
    id: String,
    title: Option<String>,
    content: Option<String>,
    stdin: bool,
    tags: Option<String>,
    pin: bool,
    unpin: bool,
    json: bool,
) -> Result<()> {
    let mut session = open_session(config)?;
    let id = session.store().resolve(&id)?;

    let mut form = session.request_edit(&id)?;
    if let Some(title) = title {
        form.title = title;
    }
    if stdin {
        form.content = read_stdin()?;
    } else if let Some(content) = content {
        form.content = content;
    }
    if let Some(tags) = tags {
        form.tags = tags;
    }
    if pin {
        form.pinned = true;
    } else if unpin {
        form.pinned = false;
    }

    session.submit(&form)?;

    let updated = session.store().get(&id).ok_or_else(|| {
        NoteError::Storage("Failed to retrieve updated note".to_string())
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(updated)?);
    } else {
        println!("Updated note {} - {}", updated.short_id(), updated.title);
    }

    Ok(())
}

pub fn handle_delete(config: &Config, id: String, force: bool) -> Result<()> {
    let mut session = open_session(config)?;
    let id = session.store().resolve(&id)?;
    let note = session
        .store()
        .get(&id)
        .cloned()
        .ok_or_else(|| NoteError::NotFound(id.clone()))?;

    // Confirm deletion unless --force is used
    let confirmed = if force {
        true
    } else {
        eprintln!("Delete note {} - {}? [y/N] ", note.short_id(), note.title);

        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            input.trim().eq_ignore_ascii_case("y")
        } else {
            return Err(NoteError::Storage(
                "Use --force to delete in non-interactive mode".to_string(),
            ));
        }
    };

    session.request_delete(&id, confirmed)?;

    if confirmed {
        println!("Deleted note {} - {}", note.short_id(), note.title);
    } else {
        println!("Cancelled.");
    }

    Ok(())
}

pub fn handle_list(config: &Config, tag: Option<String>, sort: SortOrder, json: bool) -> Result<()> {
    let mut session = open_session(config)?;

    session.set_sort(sort);
    let notes = match tag.as_deref() {
        Some(tag) => session.set_filter(tag),
        None => session.render(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else if notes.is_empty() {
        println!("{}", empty_message(session.filter()));
    } else {
        println!("Notes ({}):\n", notes.len());
        for note in &notes {
            println!("{}", format_summary(note));
        }
    }

    Ok(())
}

pub fn handle_get(config: &Config, id: String, json: bool) -> Result<()> {
    let session = open_session(config)?;
    let id = session.store().resolve(&id)?;
    let note = session
        .store()
        .get(&id)
        .ok_or_else(|| NoteError::NotFound(id.clone()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        println!("{}", format_detail(note));
    }

    Ok(())
}
