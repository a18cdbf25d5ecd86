//! Author store handles.
//!
//! [`FileStore`] is the real backing; [`MemoryStore`] holds the same text in
//! memory and records backups and writes so callers can be tested without
//! touching disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::backup::write_backup;
use crate::ini::IniDocument;
use crate::state::{AUTHORS_SECTION, AuthorRoster, USER_SECTION, UserState};
use crate::{Result, StoreError};

/// Persisted identity and roster.
pub trait AuthorStore {
    /// Read the user state and roster. Missing sections come back empty.
    fn load(&mut self) -> Result<(UserState, AuthorRoster)>;

    /// Copy the current backing contents aside before a write.
    fn backup(&mut self) -> Result<()>;

    /// Write the user state and roster, keeping all other contents.
    fn save(&mut self, user: &UserState, authors: &AuthorRoster) -> Result<()>;
}

fn parse_with_sections(text: &str) -> Result<IniDocument> {
    let mut doc = IniDocument::parse(text)?;
    doc.add_section(USER_SECTION);
    doc.add_section(AUTHORS_SECTION);
    Ok(doc)
}

fn render(mut doc: IniDocument, user: &UserState, authors: &AuthorRoster) -> IniDocument {
    user.apply_to(&mut doc);
    authors.apply_to(&mut doc);
    doc
}

/// Store backed by an INI file on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    document: Option<IniDocument>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<IniDocument> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::Missing(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        parse_with_sections(&text)
    }
}

impl AuthorStore for FileStore {
    fn load(&mut self) -> Result<(UserState, AuthorRoster)> {
        let doc = self.read_document()?;
        debug!("Loaded author store from {}", self.path.display());

        let user = UserState::from_document(&doc);
        let authors = AuthorRoster::from_document(&doc);
        self.document = Some(doc);
        Ok((user, authors))
    }

    fn backup(&mut self) -> Result<()> {
        write_backup(&self.path).map(|_| ())
    }

    fn save(&mut self, user: &UserState, authors: &AuthorRoster) -> Result<()> {
        let doc = match self.document.take() {
            Some(doc) => doc,
            None => self.read_document()?,
        };
        let doc = render(doc, user, authors);

        fs::write(&self.path, doc.to_string())?;
        info!("Wrote author store to {}", self.path.display());
        self.document = Some(doc);
        Ok(())
    }
}

/// In-memory store holding the backing text directly.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: Option<String>,
    backup: Option<String>,
    loads: usize,
    writes: usize,
}

impl MemoryStore {
    /// A store with the given backing text.
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            ..Self::default()
        }
    }

    /// A store whose backing file does not exist.
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn backup_contents(&self) -> Option<&str> {
        self.backup.as_deref()
    }

    pub fn loads(&self) -> usize {
        self.loads
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    fn document(&self) -> Result<IniDocument> {
        match &self.contents {
            Some(text) => parse_with_sections(text),
            None => Err(StoreError::Missing(PathBuf::from("<memory>"))),
        }
    }
}

impl AuthorStore for MemoryStore {
    fn load(&mut self) -> Result<(UserState, AuthorRoster)> {
        let doc = self.document()?;
        self.loads += 1;
        Ok((
            UserState::from_document(&doc),
            AuthorRoster::from_document(&doc),
        ))
    }

    fn backup(&mut self) -> Result<()> {
        match &self.contents {
            Some(text) => {
                self.backup = Some(text.clone());
                Ok(())
            }
            None => Err(StoreError::Missing(PathBuf::from("<memory>"))),
        }
    }

    fn save(&mut self, user: &UserState, authors: &AuthorRoster) -> Result<()> {
        let doc = render(self.document()?, user, authors);
        self.contents = Some(doc.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::backup_path;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const CONFIG: &str = "[core]\n\tbare = false\n";

    fn store_in(temp_dir: &TempDir, contents: &str) -> FileStore {
        let path = temp_dir.path().join("config");
        fs::write(&path, contents).unwrap();
        FileStore::new(path)
    }

    #[test]
    fn test_missing_file_is_a_precondition_failure() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("config"));

        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Missing(ref p) if p.ends_with("config")));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_load_without_sections_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_in(&temp_dir, CONFIG);

        let (user, authors) = store.load().unwrap();
        assert_eq!(user, UserState::default());
        assert!(authors.is_empty());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), CONFIG);
    }

    #[test]
    fn test_save_keeps_foreign_sections() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_in(&temp_dir, CONFIG);

        let (mut user, mut authors) = store.load().unwrap();
        user.name = Some("Alice".to_string());
        user.email = Some("a@x.com".to_string());
        authors.insert_if_absent("Alice", "a@x.com");
        store.save(&user, &authors).unwrap();

        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "[core]\n\tbare = false\n\
             [user]\n\tname = Alice\n\temail = a@x.com\n\trememberminutes = 1.0\n\
             [authors]\n\tAlice = a@x.com\n"
        );

        let mut reopened = FileStore::new(store.path());
        let (user_again, authors_again) = reopened.load().unwrap();
        assert_eq!(user_again, user);
        assert_eq!(authors_again, authors);
    }

    #[test]
    fn test_backup_holds_contents_before_save() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_in(&temp_dir, CONFIG);

        let (mut user, authors) = store.load().unwrap();
        user.remember_minutes = 5.0;
        store.backup().unwrap();
        store.save(&user, &authors).unwrap();

        let backup = fs::read_to_string(backup_path(store.path())).unwrap();
        assert_eq!(backup, CONFIG);
        assert!(
            fs::read_to_string(store.path())
                .unwrap()
                .contains("rememberminutes = 5.0")
        );
    }

    #[test]
    fn test_memory_store_records_backups_and_writes() {
        let mut store = MemoryStore::new("[user]\n\tname = Old\n");
        let (mut user, authors) = store.load().unwrap();
        user.name = Some("New".to_string());

        store.backup().unwrap();
        store.save(&user, &authors).unwrap();

        assert_eq!(store.loads(), 1);
        assert_eq!(store.writes(), 1);
        assert_eq!(store.backup_contents(), Some("[user]\n\tname = Old\n"));
        assert_eq!(
            store.contents(),
            Some("[user]\n\tname = New\n\trememberminutes = 1.0\n[authors]\n")
        );
    }

    #[test]
    fn test_memory_store_missing() {
        let mut store = MemoryStore::missing();
        assert!(matches!(store.load(), Err(StoreError::Missing(_))));
        assert!(matches!(store.backup(), Err(StoreError::Missing(_))));
        assert_eq!(store.contents(), None);
    }
}
