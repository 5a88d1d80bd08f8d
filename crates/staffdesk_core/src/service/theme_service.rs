//! Process-wide theme context.
//!
//! # Responsibility
//! - Hold the active theme and persist it to the `app-theme` slot.
//! - Mirror theme changes onto an attached presentation class list.
//!
//! # Invariants
//! - The persisted slot value is always one of `light|dark-theme`.
//! - An attached class list holds exactly the active theme class.

use crate::repo::slot_repo::{RepoResult, SlotRepository, THEME_SLOT};
use log::{info, warn};
use std::fmt::{Display, Formatter};

/// Supported themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Persisted name, also used as the presentation class.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark-theme",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark-theme" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation-side class list owned by the UI layer.
pub trait ClassListSink {
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
}

/// Theme context backed by a durable slot.
pub struct ThemeService<R: SlotRepository> {
    repo: R,
    theme: Theme,
    class_list: Option<Box<dyn ClassListSink>>,
}

impl<R: SlotRepository> ThemeService<R> {
    /// Loads the saved theme; absent or unknown values mean `light`.
    pub fn load(repo: R) -> RepoResult<Self> {
        let theme = match repo.read_slot(THEME_SLOT)? {
            None => Theme::default(),
            Some(raw) => Theme::parse(raw.trim()).unwrap_or_else(|| {
                warn!("event=theme_load module=theme status=degraded error_code=unknown_theme");
                Theme::default()
            }),
        };
        info!("event=theme_load module=theme status=ok theme={theme}");
        Ok(Self {
            repo,
            theme,
            class_list: None,
        })
    }

    pub fn get(&self) -> Theme {
        self.theme
    }

    pub fn is_light(&self) -> bool {
        self.theme == Theme::Light
    }

    /// Persists and applies `theme`.
    pub fn set(&mut self, theme: Theme) -> RepoResult<()> {
        self.repo.write_slot(THEME_SLOT, theme.as_str())?;

        let previous = std::mem::replace(&mut self.theme, theme);
        if let Some(sink) = self.class_list.as_mut() {
            sink.remove_class(previous.as_str());
            sink.add_class(theme.as_str());
        }
        info!("event=theme_set module=theme status=ok from={previous} to={theme}");
        Ok(())
    }

    /// Flips between light and dark; returns the new theme.
    pub fn toggle(&mut self) -> RepoResult<Theme> {
        let next = self.theme.toggled();
        self.set(next)?;
        Ok(next)
    }

    /// Attaches a class list and applies the current theme class to it.
    pub fn attach_class_list(&mut self, mut sink: Box<dyn ClassListSink>) {
        sink.add_class(self.theme.as_str());
        self.class_list = Some(sink);
    }
}

#[cfg(test)]
mod tests {
    use super::{ClassListSink, Theme, ThemeService};
    use crate::db::open_db_in_memory;
    use crate::repo::slot_repo::{SlotRepository, SqliteSlotRepository, THEME_SLOT};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct RecordingClassList {
        classes: Rc<RefCell<Vec<String>>>,
    }

    impl ClassListSink for RecordingClassList {
        fn add_class(&mut self, class: &str) {
            self.classes.borrow_mut().push(class.to_string());
        }

        fn remove_class(&mut self, class: &str) {
            self.classes.borrow_mut().retain(|existing| existing != class);
        }
    }

    #[test]
    fn defaults_to_light_when_slot_is_empty() {
        let conn = open_db_in_memory().unwrap();
        let service = ThemeService::load(SqliteSlotRepository::new(&conn)).unwrap();
        assert_eq!(service.get(), Theme::Light);
        assert!(service.is_light());
    }

    #[test]
    fn toggle_persists_and_reloads() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteSlotRepository::new(&conn);
        let mut service = ThemeService::load(repo).unwrap();

        assert_eq!(service.toggle().unwrap(), Theme::Dark);
        assert_eq!(repo.read_slot(THEME_SLOT).unwrap().as_deref(), Some("dark-theme"));

        let reloaded = ThemeService::load(repo).unwrap();
        assert_eq!(reloaded.get(), Theme::Dark);
    }

    #[test]
    fn unknown_saved_theme_falls_back_to_light() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteSlotRepository::new(&conn);
        repo.write_slot(THEME_SLOT, "solarized").unwrap();
        assert_eq!(ThemeService::load(repo).unwrap().get(), Theme::Light);
    }

    #[test]
    fn class_list_mirrors_active_theme() {
        let conn = open_db_in_memory().unwrap();
        let mut service = ThemeService::load(SqliteSlotRepository::new(&conn)).unwrap();
        let class_list = RecordingClassList::default();
        service.attach_class_list(Box::new(class_list.clone()));
        assert_eq!(*class_list.classes.borrow(), vec!["light".to_string()]);

        service.toggle().unwrap();
        assert_eq!(*class_list.classes.borrow(), vec!["dark-theme".to_string()]);

        service.set(Theme::Light).unwrap();
        assert_eq!(*class_list.classes.borrow(), vec!["light".to_string()]);
    }
}
