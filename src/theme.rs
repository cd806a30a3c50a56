//! Dark/light theme preference with write-through persistence.
//!
//! The preference is read once when the store is initialized: a stored
//! choice wins, otherwise the system preference is used. Every change the
//! user makes is written to storage before it takes effect. System
//! preference changes are followed only while the user has never chosen.
//! The view marks dark mode by putting [`DARK_CLASS`] on the document root;
//! light mode is the absence of that class.
//!
//! TRADE-OFFS
//! ==========
//! The installed global lives in a thread-local because the UI runs on one
//! thread and change listeners are plain `FnMut` closures. Anything off that
//! thread gets [`ThemeError::NotInstalled`].

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::observe::{Observers, SubscriptionId};

/// Class carried by the document root while the dark theme is active.
pub const DARK_CLASS: &str = "dark";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Class the document root should carry, if any.
    #[must_use]
    pub fn root_class(self) -> Option<&'static str> {
        match self {
            Self::Light => None,
            Self::Dark => Some(DARK_CLASS),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Where the user's explicit theme choice is kept between sessions.
pub trait PreferenceStorage {
    /// # Errors
    ///
    /// Returns [`ThemeError`] when the backing store cannot be read.
    fn load(&self) -> Result<Option<Theme>, ThemeError>;

    /// # Errors
    ///
    /// Returns [`ThemeError`] when the backing store cannot be written.
    fn store(&mut self, theme: Theme) -> Result<(), ThemeError>;
}

/// Storage that lives as long as the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    value: Option<Theme>,
}

impl MemoryStorage {
    #[must_use]
    pub fn with_value(theme: Theme) -> Self {
        Self { value: Some(theme) }
    }
}

impl PreferenceStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Theme>, ThemeError> {
        Ok(self.value)
    }

    fn store(&mut self, theme: Theme) -> Result<(), ThemeError> {
        self.value = Some(theme);
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct PreferenceFile {
    theme: Theme,
}

/// Storage backed by a small JSON file, e.g. `{"theme": "dark"}`.
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Theme>, ThemeError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let file: PreferenceFile = serde_json::from_str(&raw)?;
        Ok(Some(file.theme))
    }

    fn store(&mut self, theme: Theme) -> Result<(), ThemeError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&PreferenceFile { theme })?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

pub struct ThemeStore {
    storage: Box<dyn PreferenceStorage>,
    theme: Theme,
    user_chosen: bool,
    listeners: Observers<(), Theme>,
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("theme", &self.theme)
            .field("user_chosen", &self.user_chosen)
            .finish_non_exhaustive()
    }
}

impl ThemeStore {
    /// Read the stored preference, falling back to the system preference.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError`] when the storage cannot be read.
    pub fn init(storage: impl PreferenceStorage + 'static, system_prefers_dark: bool) -> Result<Self, ThemeError> {
        let stored = storage.load()?;
        let theme = stored.unwrap_or(Theme::from_dark(system_prefers_dark));
        tracing::debug!(theme = theme.as_str(), stored = stored.is_some(), "theme initialized");
        Ok(Self { storage: Box::new(storage), theme, user_chosen: stored.is_some(), listeners: Observers::new() })
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    /// Whether the current theme came from an explicit user choice.
    #[must_use]
    pub fn user_chosen(&self) -> bool {
        self.user_chosen
    }

    /// Class to put on the document root; `None` means remove [`DARK_CLASS`].
    #[must_use]
    pub fn root_class(&self) -> Option<&'static str> {
        self.theme.root_class()
    }

    /// Register a `theme-changed` listener. Listeners hear explicit user
    /// changes from [`Self::set`] and [`Self::toggle`], not system changes.
    pub fn on_change(&mut self, callback: impl FnMut(&Theme) + 'static) -> SubscriptionId {
        self.listeners.subscribe((), callback)
    }

    pub fn remove_listener(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Flip the theme and persist the choice.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError`] if the choice could not be persisted; the
    /// theme is left unchanged in that case.
    pub fn toggle(&mut self) -> Result<Theme, ThemeError> {
        let next = self.theme.toggled();
        self.set(next)?;
        Ok(next)
    }

    /// Persist and apply an explicit choice.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError`] if the choice could not be persisted.
    pub fn set(&mut self, theme: Theme) -> Result<(), ThemeError> {
        if let Err(err) = self.storage.store(theme) {
            tracing::warn!(error = %err, theme = theme.as_str(), "failed to persist theme preference");
            return Err(err);
        }
        self.user_chosen = true;
        self.theme = theme;
        self.listeners.notify(&[()], &theme);
        Ok(())
    }

    /// Follow a system preference change unless the user has chosen.
    /// Returns whether the theme was applied. Listeners are not notified.
    pub fn system_preference_changed(&mut self, prefers_dark: bool) -> bool {
        if self.user_chosen {
            return false;
        }
        self.theme = Theme::from_dark(prefers_dark);
        true
    }
}

thread_local! {
    static GLOBAL: RefCell<Option<ThemeStore>> = const { RefCell::new(None) };
}

/// Install the application's theme store. Only one may be installed.
///
/// # Errors
///
/// Returns [`ThemeError::AlreadyInstalled`] on a second call.
pub fn install_global(store: ThemeStore) -> Result<(), ThemeError> {
    GLOBAL.with(|cell| {
        let mut slot = cell.try_borrow_mut().map_err(|_| ThemeError::Busy)?;
        if slot.is_some() {
            return Err(ThemeError::AlreadyInstalled);
        }
        *slot = Some(store);
        Ok(())
    })
}

/// Run `f` against the installed theme store.
///
/// # Errors
///
/// Returns [`ThemeError::NotInstalled`] before [`install_global`], and
/// [`ThemeError::Busy`] when called from inside another `with_global`.
pub fn with_global<R>(f: impl FnOnce(&mut ThemeStore) -> R) -> Result<R, ThemeError> {
    GLOBAL.with(|cell| {
        let mut slot = cell.try_borrow_mut().map_err(|_| ThemeError::Busy)?;
        let store = slot.as_mut().ok_or(ThemeError::NotInstalled)?;
        Ok(f(store))
    })
}
