use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use web_sys::{Document, HtmlElement, Storage, Window};

use crate::config::Config;
use crate::dom;
use crate::error::StoreError;
use crate::storage::{self, PreferenceStore};

const DARK_CLASS: &str = "dark-mode";
const BODY_TRANSITION: &str = "background-color 0.3s ease, color 0.3s ease";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// Anything other than a stored `"dark"` is the light theme.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            Theme::Dark => "fas fa-sun",
            Theme::Light => "fas fa-moon",
        }
    }

    fn flipped(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// The dark-mode flag and where it is persisted.
pub struct ThemeState<S> {
    theme: Theme,
    key: String,
    store: S,
}

impl<S: PreferenceStore> ThemeState<S> {
    pub fn load(store: S, key: &str) -> Self {
        let theme = Theme::from_stored(store.read(key).as_deref());
        Self {
            theme,
            key: key.to_string(),
            store,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.flipped();
        self.store.write(&self.key, self.theme.as_str());
        self.theme
    }
}

pub struct ThemeController {
    document: Document,
    body: HtmlElement,
    state: RefCell<ThemeState<Option<Storage>>>,
}

impl ThemeController {
    fn new(window: &Window, document: &Document, config: &Config) -> Result<Self, StoreError> {
        let body = dom::body(document)?;
        let state = ThemeState::load(storage::local_storage(window), &config.theme_storage_key);
        Ok(Self {
            document: document.clone(),
            body,
            state: RefCell::new(state),
        })
    }

    pub fn theme(&self) -> Theme {
        self.state.borrow().theme()
    }

    pub fn toggle(&self) {
        let theme = self.state.borrow_mut().toggle();
        self.apply(theme);
        dom::set_style(&self.body, "transition", BODY_TRANSITION);
        log::info!("Theme switched to {}", theme.as_str());
    }

    fn apply(&self, theme: Theme) {
        dom::set_class(&self.body, DARK_CLASS, theme == Theme::Dark);
        if let Some(icon) = dom::by_id(&self.document, "themeIcon") {
            icon.set_class_name(theme.icon_class());
        }
    }
}

/// Applies the stored theme on mount and wires `#themeToggle`.
pub struct ThemeToggle {
    controller: Rc<ThemeController>,
    _click: Option<EventListener>,
}

impl ThemeToggle {
    pub fn mount(
        window: &Window,
        document: &Document,
        config: &Config,
    ) -> Result<Self, StoreError> {
        let controller = Rc::new(ThemeController::new(window, document, config)?);
        if controller.theme() == Theme::Dark {
            controller.apply(Theme::Dark);
        }

        let click = dom::by_id(document, "themeToggle").map(|button| {
            let controller = Rc::clone(&controller);
            EventListener::new(&button, "click", move |_| controller.toggle())
        });
        if click.is_none() {
            log::debug!("No #themeToggle on this page");
        }

        Ok(Self {
            controller,
            _click: click,
        })
    }

    pub fn controller(&self) -> Rc<ThemeController> {
        Rc::clone(&self.controller)
    }
}
