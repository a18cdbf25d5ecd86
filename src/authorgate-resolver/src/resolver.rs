//! The author resolution state machine.

use authorgate_store::{AuthorRoster, AuthorStore, UserState};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::identity::Identity;
use crate::prompt::{OTHER_AUTHOR, PromptGateway};
use crate::{ResolveError, Result};

static SYSTEM_CLOCK: SystemClock = SystemClock;

/// How a run ended when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The remembered author is still valid; nothing was prompted or written.
    NotExpired,
    /// The author was reconfirmed without change.
    Unchanged(Identity),
    /// A different author was recorded. The commit must be redone.
    Changed {
        previous: Identity,
        current: Identity,
    },
}

impl Resolution {
    pub fn permits_commit(&self) -> bool {
        !matches!(self, Resolution::Changed { .. })
    }

    pub fn exit_code(&self) -> u8 {
        if self.permits_commit() { 0 } else { 1 }
    }
}

/// Resolves the commit author against an injected store and prompt surface.
pub struct Resolver<'a> {
    store: &'a mut dyn AuthorStore,
    prompts: &'a mut dyn PromptGateway,
    clock: &'a dyn Clock,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a mut dyn AuthorStore, prompts: &'a mut dyn PromptGateway) -> Self {
        Self {
            store,
            prompts,
            clock: &SYSTEM_CLOCK,
        }
    }

    pub fn with_clock(mut self, clock: &'a dyn Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Run one resolution.
    ///
    /// Errors leave the store untouched. A [`Resolution::Changed`] result
    /// has already been persisted.
    pub fn resolve(&mut self) -> Result<Resolution> {
        let (mut user, mut authors) = self.store.load()?;
        let now = self.clock.now();

        if !user.is_expired(now) {
            debug!(
                expires = user.expires_at(),
                now, "Commit author has not expired"
            );
            return Ok(Resolution::NotExpired);
        }

        let previous = Identity::from_parts(user.name.as_deref(), user.email.as_deref());
        debug!(previous = %previous, "Commit author expired, resolving");

        let current = self.resolve_identity(user.name.as_deref(), &mut authors)?;
        self.persist(&mut user, &authors, &current, now)?;

        if current == previous {
            info!(author = %current, "Commit author unchanged");
            Ok(Resolution::Unchanged(current))
        } else {
            info!(previous = %previous, current = %current, "Commit author changed");
            Ok(Resolution::Changed { previous, current })
        }
    }

    fn resolve_identity(
        &mut self,
        previous_name: Option<&str>,
        authors: &mut AuthorRoster,
    ) -> Result<Identity> {
        if let Some(identity) = self.choose_from_roster(previous_name, authors)? {
            return Ok(identity);
        }

        let entered = match self.prompts.enter_manually()? {
            Some(identity) if identity.has_name() => identity,
            _ => return Err(ResolveError::NoAuthorSelected),
        };

        if authors.insert_if_absent(&entered.name, &entered.email) {
            info!(author = %entered, "Added author to roster");
        }
        Ok(entered)
    }

    fn choose_from_roster(
        &mut self,
        previous_name: Option<&str>,
        authors: &AuthorRoster,
    ) -> Result<Option<Identity>> {
        if authors.is_empty() {
            return Ok(None);
        }

        // Nameless roster entries are never offered.
        let mut options: Vec<String> = authors
            .names()
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string)
            .collect();
        let default = previous_name
            .filter(|name| options.iter().any(|option| option == name))
            .or_else(|| options.first().map(String::as_str))
            .unwrap_or(OTHER_AUTHOR)
            .to_string();
        options.push(OTHER_AUTHOR.to_string());

        let Some(choice) = self.prompts.choose(&options, &default)? else {
            debug!("Author list dismissed");
            return Ok(None);
        };
        if choice == OTHER_AUTHOR {
            return Ok(None);
        }

        match authors.email_for(&choice) {
            Some(email) if !choice.trim().is_empty() => {
                Ok(Some(Identity::new(choice.as_str(), email)))
            }
            _ => {
                warn!(choice = %choice, "Chosen author is not a usable roster entry");
                Ok(None)
            }
        }
    }

    fn persist(
        &mut self,
        user: &mut UserState,
        authors: &AuthorRoster,
        current: &Identity,
        now: f64,
    ) -> Result<()> {
        user.name = Some(current.name.clone());
        user.email = Some(current.email.clone());

        if self.prompts.confirm_remember(user.remember_minutes)? {
            user.expires = Some(user.remember_until(now));
            debug!(
                expires = user.expires_at(),
                minutes = user.remember_minutes,
                "Remembering commit author"
            );
        }

        self.store.backup()?;
        self.store.save(user, authors)?;
        Ok(())
    }
}
