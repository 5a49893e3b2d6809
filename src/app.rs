use std::cell::RefCell;

use gloo_events::EventListener;
use web_sys::{Document, Window};

use crate::analytics::{Analytics, ErrorReporter};
use crate::components::{
    alerts::Alerts, count_up::CountUpStats, forms::FormValidation, live_chat::LiveChat,
    loading::LoadingScreen, media::BackgroundMusic, motion, navigation::Navigation,
    reveal::Reveal, scroll::ScrollEffects, service_worker::ServiceWorker,
    services::ServiceCards, testimonials::Testimonials, theme::ThemeToggle,
    tracking::TrackingWidget,
};
use crate::config::Config;
use crate::dom;
use crate::error::StoreError;
use crate::global;

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = RefCell::new(None);
}

/// Everything that lives for the whole page: the early hooks attached at
/// load and, once the DOM is ready, the mounted storefront.
struct Runtime {
    _reporter: ErrorReporter,
    _service_worker: Option<ServiceWorker>,
    _ready: Option<EventListener>,
    _storefront: Option<Storefront>,
}

/// Every page component, each owning its own listeners and timers.
/// Dropping it detaches all of them.
pub struct Storefront {
    _theme: ThemeToggle,
    _loading: Option<LoadingScreen>,
    _navigation: Navigation,
    _alerts: Alerts,
    _music: Option<BackgroundMusic>,
    _scroll: ScrollEffects,
    _reveal: Option<Reveal>,
    _count_up: Option<CountUpStats>,
    _testimonials: Option<Testimonials>,
    _services: ServiceCards,
    _live_chat: Option<LiveChat>,
    _tracking: Option<TrackingWidget>,
    _forms: FormValidation,
}

impl Storefront {
    pub fn mount(
        window: &Window,
        document: &Document,
        config: &Config,
        analytics: Analytics,
    ) -> Result<Self, StoreError> {
        let reduced_motion = motion::prefers_reduced_motion(window);
        let current_path = window.location().pathname().unwrap_or_default();

        let theme = ThemeToggle::mount(window, document, config)?;
        global::install(window, theme.controller(), analytics)?;

        let mut testimonials = Testimonials::mount(document, config);
        if reduced_motion {
            motion::apply_reduced_motion(document);
            if let Some(testimonials) = testimonials.as_mut() {
                testimonials.stop();
            }
        }

        let storefront = Self {
            _theme: theme,
            _loading: LoadingScreen::mount(document, config),
            _navigation: Navigation::mount(document, &current_path),
            _alerts: Alerts::mount(document, config),
            _music: BackgroundMusic::mount(document, config),
            _scroll: ScrollEffects::mount(window, document, config, !reduced_motion),
            _reveal: optional("reveal animations", Reveal::mount(window, document)),
            _count_up: optional("count-up stats", CountUpStats::mount(window, document, config)),
            _testimonials: testimonials,
            _services: ServiceCards::mount(document, config),
            _live_chat: LiveChat::mount(window, document, config),
            _tracking: TrackingWidget::mount(window, document, config),
            _forms: FormValidation::mount(document),
        };
        log::info!("Ntandostore initialized");
        Ok(storefront)
    }
}

/// Observer-backed components degrade to nothing instead of failing the
/// whole page.
fn optional<T>(what: &str, mounted: Result<Option<T>, StoreError>) -> Option<T> {
    mounted.unwrap_or_else(|err| {
        log::warn!("Skipping {}: {}", what, err);
        None
    })
}

/// Entry point: hooks that must exist from the start are attached now,
/// page components as soon as the DOM has been parsed.
pub fn start() -> Result<(), StoreError> {
    let window = dom::window()?;
    let document = dom::document(&window)?;
    let config = Config::from_document(&document);
    let analytics = Analytics::new(&window, &config);

    let runtime = Runtime {
        _reporter: ErrorReporter::attach(&window, analytics.clone()),
        _service_worker: ServiceWorker::mount(&window, &document, &config),
        _ready: None,
        _storefront: None,
    };
    RUNTIME.with(|slot| *slot.borrow_mut() = Some(runtime));

    if document.ready_state() == "loading" {
        let target = document.clone();
        let ready = EventListener::once(&target, "DOMContentLoaded", move |_| {
            mount_storefront(&window, &document, &config, analytics);
        });
        with_runtime(|runtime| runtime._ready = Some(ready));
    } else {
        mount_storefront(&window, &document, &config, analytics);
    }
    Ok(())
}

fn with_runtime(f: impl FnOnce(&mut Runtime)) {
    RUNTIME.with(|slot| {
        if let Some(runtime) = slot.borrow_mut().as_mut() {
            f(runtime);
        }
    });
}

fn mount_storefront(window: &Window, document: &Document, config: &Config, analytics: Analytics) {
    match Storefront::mount(window, document, config, analytics) {
        Ok(storefront) => with_runtime(|runtime| runtime._storefront = Some(storefront)),
        Err(err) => log::error!("Storefront failed to mount: {}", err),
    }
}
