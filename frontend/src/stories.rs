use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use web_sys::KeyboardEvent;
use yew::prelude::*;
use yew_hooks::{use_event_with_window, use_interval};

use crate::components::media::MediaHandle;
use crate::config::{self, StoryConfig, TYPING_INTERVAL_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryTransition {
    Stop(String),
    Start(String),
}

/// Which story is playing. All mutations return the transitions to apply, in
/// order, so a stop always precedes the start that replaces it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StoryPlayer {
    playing: Option<String>,
}

impl StoryPlayer {
    pub fn playing(&self) -> Option<&str> {
        self.playing.as_deref()
    }

    pub fn toggle(&mut self, id: &str) -> Vec<StoryTransition> {
        match self.playing.take() {
            Some(current) if current == id => vec![StoryTransition::Stop(current)],
            Some(current) => {
                self.playing = Some(id.to_string());
                vec![
                    StoryTransition::Stop(current),
                    StoryTransition::Start(id.to_string()),
                ]
            }
            None => {
                self.playing = Some(id.to_string());
                vec![StoryTransition::Start(id.to_string())]
            }
        }
    }

    pub fn stop_current(&mut self) -> Option<StoryTransition> {
        self.playing.take().map(StoryTransition::Stop)
    }

    /// Audio for `id` ran out. Ignored unless `id` is still the playing story.
    pub fn finished(&mut self, id: &str) -> Option<StoryTransition> {
        if self.playing() == Some(id) {
            self.stop_current()
        } else {
            None
        }
    }
}

pub fn typed_prefix(text: &str, shown: usize) -> String {
    text.chars().take(shown).collect()
}

#[derive(Properties, PartialEq)]
struct StoryCardProps {
    story: StoryConfig,
    playing: bool,
    audio: MediaHandle,
    on_toggle: Callback<()>,
    on_ended: Callback<()>,
}

#[function_component(StoryCard)]
fn story_card(props: &StoryCardProps) -> Html {
    let shown = use_state(|| 0usize);
    let total = props.story.transcript.chars().count();

    {
        let shown = shown.clone();
        use_effect_with_deps(
            move |_: &bool| {
                shown.set(0);
                || ()
            },
            props.playing,
        );
    }

    {
        let shown = shown.clone();
        let typing = props.playing && *shown < total;
        use_interval(
            move || {
                if *shown < total {
                    shown.set(*shown + 1);
                }
            },
            if typing { TYPING_INTERVAL_MS } else { 0 },
        );
    }

    let onclick = props.on_toggle.reform(|_: MouseEvent| ());
    let onended = props.on_ended.reform(|_: Event| ());
    let done = *shown >= total;

    html! {
        <div class={classes!("story-item", props.playing.then(|| "playing"))} data-story={props.story.id}>
            <div class="story-header">
                <button
                    type="button"
                    class={classes!("play-button", props.playing.then(|| "playing"))}
                    aria-label={if props.playing { "توقف" } else { "پخش" }}
                    {onclick}
                >
                    {
                        if props.playing {
                            html! {
                                <svg class="play-icon" width="20" height="20" viewBox="0 0 24 24" fill="currentColor">
                                    <rect x="6" y="4" width="4" height="16"></rect>
                                    <rect x="14" y="4" width="4" height="16"></rect>
                                </svg>
                            }
                        } else {
                            html! {
                                <svg class="play-icon" width="20" height="20" viewBox="0 0 24 24" fill="currentColor">
                                    <polygon points="5,3 19,12 5,21"></polygon>
                                </svg>
                            }
                        }
                    }
                </button>
                <div class="story-meta">
                    <strong>{ props.story.name }</strong>
                    <span>{ props.story.caption }</span>
                </div>
                <div class="audio-bars" aria-hidden="true">
                    <span class="audio-bar"></span>
                    <span class="audio-bar"></span>
                    <span class="audio-bar"></span>
                </div>
            </div>
            {
                if props.playing {
                    html! {
                        <div class="story-text">
                            <p>{ typed_prefix(props.story.transcript, *shown) }</p>
                            <span class={classes!("typing-cursor", done.then(|| "blinking"))}></span>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
            {
                if let Some(src) = props.story.audio_src {
                    html! {
                        <audio
                            ref={props.audio.node_ref()}
                            class="story-audio"
                            preload="none"
                            src={config::asset_url(src)}
                            {onended}
                        />
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StoryListProps {
    pub stories: Vec<StoryConfig>,
}

/// Narrated testimonials. Playback state lives in a single [`StoryPlayer`];
/// audio is stopped and started from the event handler itself, so a new story
/// never starts while the previous one's audio is still running.
#[function_component(StoryList)]
pub fn story_list(props: &StoryListProps) -> Html {
    let player = use_mut_ref(StoryPlayer::default);
    let playing = use_state(|| None::<String>);
    let handles = {
        let count = props.stories.len();
        use_state(move || (0..count).map(|_| MediaHandle::default()).collect::<Vec<_>>())
    };

    let apply: Rc<dyn Fn(Vec<StoryTransition>)> = {
        let stories = props.stories.clone();
        let handles = handles.clone();
        let player = player.clone();
        let playing = playing.clone();
        Rc::new(move |transitions: Vec<StoryTransition>| {
            let handle_for = |id: &str| {
                stories
                    .iter()
                    .position(|s| s.id == id)
                    .and_then(|i| handles.get(i))
            };
            for transition in &transitions {
                debug!("Story transition: {:?}", transition);
                match transition {
                    StoryTransition::Stop(id) => {
                        if let Some(handle) = handle_for(id.as_str()) {
                            handle.rewind();
                        }
                    }
                    StoryTransition::Start(id) => {
                        if let Some(handle) = handle_for(id.as_str()) {
                            handle.play();
                        }
                    }
                }
            }
            playing.set(player.borrow().playing().map(str::to_string));
        })
    };

    {
        let player = player.clone();
        let apply = apply.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                let stopped = player.borrow_mut().stop_current();
                apply(stopped.into_iter().collect());
            }
        });
    }

    html! {
        <section class="stories">
            <h2>{"روایت زائران"}</h2>
            { for props.stories.iter().zip(handles.iter()).map(|(story, handle)| {
                let id = story.id;
                let on_toggle = toggle_callback(&player, &apply, id);
                let on_ended = {
                    let player = player.clone();
                    let apply = apply.clone();
                    Callback::from(move |_: ()| {
                        let stopped = player.borrow_mut().finished(id);
                        apply(stopped.into_iter().collect());
                    })
                };
                html! {
                    <StoryCard
                        key={id}
                        story={story.clone()}
                        playing={playing.as_deref() == Some(id)}
                        audio={handle.clone()}
                        {on_toggle}
                        {on_ended}
                    />
                }
            }) }
        </section>
    }
}

fn toggle_callback(
    player: &Rc<RefCell<StoryPlayer>>,
    apply: &Rc<dyn Fn(Vec<StoryTransition>)>,
    id: &'static str,
) -> Callback<()> {
    let player = player.clone();
    let apply = apply.clone();
    Callback::from(move |_: ()| {
        let transitions = player.borrow_mut().toggle(id);
        apply(transitions);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_idle_player_starts_story() {
        let mut player = StoryPlayer::default();
        assert_eq!(player.toggle("a"), vec![StoryTransition::Start("a".into())]);
        assert_eq!(player.playing(), Some("a"));
    }

    #[test]
    fn toggling_playing_story_stops_it() {
        let mut player = StoryPlayer::default();
        player.toggle("a");
        assert_eq!(player.toggle("a"), vec![StoryTransition::Stop("a".into())]);
        assert_eq!(player.playing(), None);
    }

    #[test]
    fn starting_another_story_stops_current_first() {
        let mut player = StoryPlayer::default();
        player.toggle("a");
        assert_eq!(
            player.toggle("b"),
            vec![
                StoryTransition::Stop("a".into()),
                StoryTransition::Start("b".into()),
            ]
        );
        assert_eq!(player.playing(), Some("b"));
    }

    #[test]
    fn at_most_one_story_plays_across_toggles() {
        let mut player = StoryPlayer::default();
        let mut running: Vec<String> = Vec::new();
        for id in ["a", "b", "b", "c", "a", "a", "c"] {
            for t in player.toggle(id) {
                match t {
                    StoryTransition::Stop(id) => running.retain(|r| *r != id),
                    StoryTransition::Start(id) => running.push(id),
                }
                assert!(running.len() <= 1);
            }
            assert_eq!(running.first().map(String::as_str), player.playing());
        }
    }

    #[test]
    fn finished_only_stops_the_playing_story() {
        let mut player = StoryPlayer::default();
        player.toggle("a");
        player.toggle("b");
        assert_eq!(player.finished("a"), None);
        assert_eq!(player.playing(), Some("b"));
        assert_eq!(player.finished("b"), Some(StoryTransition::Stop("b".into())));
        assert_eq!(player.playing(), None);
    }

    #[test]
    fn escape_with_nothing_playing_is_noop() {
        let mut player = StoryPlayer::default();
        assert_eq!(player.stop_current(), None);
    }

    #[test]
    fn typed_prefix_counts_characters_not_bytes() {
        assert_eq!(typed_prefix("سلام", 2), "سل");
        assert_eq!(typed_prefix("hi", 10), "hi");
        assert_eq!(typed_prefix("abc", 0), "");
    }
}
