use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Element, HtmlAudioElement};

use crate::config::Config;
use crate::dom;

const PLAYING_ICON: &str = r#"<i class="fas fa-volume-up"></i>"#;
const MUTED_ICON: &str = r#"<i class="fas fa-volume-mute"></i>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackAction {
    Play,
    Pause,
}

impl PlaybackAction {
    pub fn icon(self) -> &'static str {
        match self {
            PlaybackAction::Play => PLAYING_ICON,
            PlaybackAction::Pause => MUTED_ICON,
        }
    }
}

/// Whether background music is playing. Never persisted; every page load
/// starts stopped.
#[derive(Debug, Default)]
pub struct Playback {
    playing: bool,
}

impl Playback {
    pub fn toggle(&mut self) -> PlaybackAction {
        self.playing = !self.playing;
        if self.playing {
            PlaybackAction::Play
        } else {
            PlaybackAction::Pause
        }
    }

    /// The browser refused to start playback.
    pub fn rejected(&mut self) {
        self.playing = false;
    }
}

pub struct BackgroundMusic {
    _click: EventListener,
}

impl BackgroundMusic {
    pub fn mount(document: &Document, config: &Config) -> Option<Self> {
        let audio = dom::by_id(document, "bgMusic")?.dyn_into::<HtmlAudioElement>().ok()?;
        let toggle = dom::by_id(document, "musicToggle")?;
        audio.set_volume(config.music_volume);

        let playback = Rc::new(RefCell::new(Playback::default()));
        let button = toggle.clone();
        let click = EventListener::new(&button, "click", move |_| {
            let action = playback.borrow_mut().toggle();
            toggle.set_inner_html(action.icon());
            match action {
                PlaybackAction::Pause => {
                    if let Err(err) = audio.pause() {
                        gloo_console::log!("Audio pause failed:", err);
                    }
                }
                PlaybackAction::Play => start(&audio, &toggle, Rc::clone(&playback)),
            }
        });

        Some(Self { _click: click })
    }
}

fn start(audio: &HtmlAudioElement, toggle: &Element, playback: Rc<RefCell<Playback>>) {
    let promise = match audio.play() {
        Ok(promise) => promise,
        Err(err) => {
            gloo_console::log!("Audio play failed:", err);
            revert(toggle, &playback);
            return;
        }
    };
    let toggle = toggle.clone();
    spawn_local(async move {
        if let Err(err) = JsFuture::from(promise).await {
            gloo_console::log!("Audio play failed:", err);
            revert(&toggle, &playback);
        }
    });
}

fn revert(toggle: &Element, playback: &RefCell<Playback>) {
    playback.borrow_mut().rejected();
    toggle.set_inner_html(MUTED_ICON);
}
