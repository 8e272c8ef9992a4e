use log::{debug, warn};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlMediaElement;
use yew::NodeRef;

/// Playback controls over a `<audio>`/`<video>` node that may not be mounted.
/// Every operation quietly does nothing when the element is missing.
#[derive(Clone, PartialEq, Default)]
pub struct MediaHandle(NodeRef);

impl MediaHandle {
    pub fn node_ref(&self) -> NodeRef {
        self.0.clone()
    }

    fn element(&self) -> Option<HtmlMediaElement> {
        self.0.cast::<HtmlMediaElement>()
    }

    pub fn is_present(&self) -> bool {
        self.element().is_some()
    }

    pub fn play(&self) {
        let Some(media) = self.element() else {
            return;
        };
        match media.play() {
            Ok(promise) => spawn_local(async move {
                // Autoplay policies reject the promise; nothing to recover.
                if let Err(err) = JsFuture::from(promise).await {
                    debug!("Playback was refused: {:?}", err);
                }
            }),
            Err(err) => warn!("Could not start playback: {:?}", err),
        }
    }

    pub fn pause(&self) {
        if let Some(media) = self.element() {
            let _ = media.pause();
        }
    }

    /// Pauses and seeks back to the start.
    pub fn rewind(&self) {
        if let Some(media) = self.element() {
            let _ = media.pause();
            media.set_current_time(0.0);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.element().map_or(true, |media| media.paused())
    }

    pub fn toggle_play(&self) {
        if self.is_paused() {
            self.play();
        } else {
            self.pause();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.element().map_or(false, |media| media.muted())
    }

    pub fn set_muted(&self, muted: bool) {
        if let Some(media) = self.element() {
            media.set_muted(muted);
        }
    }
}
