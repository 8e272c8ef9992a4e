use yew::prelude::*;

use super::media::MediaHandle;
use crate::config;

const UNMUTE_LABEL: &str = "فعال کردن صدا";
const MUTE_LABEL: &str = "قطع صدا";

/// Accessible label for the mute button, describing what a click will do.
pub fn mute_button_label(muted: bool) -> &'static str {
    if muted {
        UNMUTE_LABEL
    } else {
        MUTE_LABEL
    }
}

#[derive(Properties, PartialEq)]
pub struct HeroVideoProps {
    pub src: AttrValue,
    #[prop_or_default]
    pub poster: Option<AttrValue>,
    #[prop_or(true)]
    pub start_muted: bool,
}

#[function_component(HeroVideo)]
pub fn hero_video(props: &HeroVideoProps) -> Html {
    let media = use_state(MediaHandle::default);
    let paused = use_state(|| true);
    let muted = use_state(|| props.start_muted);

    // The `muted` attribute only seeds the element when it is parsed, not
    // when set after creation, so push the property once mounted.
    {
        let media = media.clone();
        use_effect_with_deps(
            move |start_muted: &bool| {
                media.set_muted(*start_muted);
                || ()
            },
            props.start_muted,
        );
    }

    let toggle_play = {
        let media = media.clone();
        Callback::from(move |_: ()| media.toggle_play())
    };

    let on_video_click = toggle_play.reform(|_: MouseEvent| ());
    let on_play_button = toggle_play.reform(|e: MouseEvent| e.stop_propagation());
    let on_keydown = {
        let toggle_play = toggle_play.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == " " {
                e.prevent_default();
                toggle_play.emit(());
            }
        })
    };

    let on_play = {
        let paused = paused.clone();
        Callback::from(move |_: Event| paused.set(false))
    };
    let on_pause = {
        let paused = paused.clone();
        Callback::from(move |_: Event| paused.set(true))
    };

    let on_mute = {
        let media = media.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if media.is_present() {
                media.set_muted(!media.is_muted());
            }
        })
    };

    // The element is the source of truth; follow it on every volume change
    let on_volume_change = {
        let media = media.clone();
        let muted = muted.clone();
        Callback::from(move |_: Event| {
            if media.is_present() {
                muted.set(media.is_muted());
            }
        })
    };

    html! {
        <div class="hero-video">
            <video
                ref={media.node_ref()}
                class="main-video"
                src={config::asset_url(&props.src)}
                poster={props.poster.clone()}
                muted={*muted}
                playsinline=true
                tabindex="0"
                onclick={on_video_click}
                onkeydown={on_keydown}
                onplay={on_play}
                onpause={on_pause}
                onvolumechange={on_volume_change}
            />
            <button
                type="button"
                class="play-button"
                style={if *paused { "display: flex;" } else { "display: none;" }}
                aria-label="پخش ویدیو"
                onclick={on_play_button}
            >
                <svg width="48" height="48" viewBox="0 0 24 24" fill="currentColor">
                    <polygon points="6,4 20,12 6,20"></polygon>
                </svg>
            </button>
            <button
                type="button"
                class="mute-button"
                aria-label={mute_button_label(*muted)}
                onclick={on_mute}
            >
                <svg class="volume-icon" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                    <polygon points="11 5 6 9 2 9 2 15 6 15 11 19 11 5"></polygon>
                    {
                        if *muted {
                            html! {
                                <>
                                    <line x1="23" y1="9" x2="17" y2="15"></line>
                                    <line x1="17" y1="9" x2="23" y2="15"></line>
                                </>
                            }
                        } else {
                            html! {
                                <path d="M19.07 4.93a10 10 0 0 1 0 14.14M15.54 8.46a5 5 0 0 1 0 7.07"></path>
                            }
                        }
                    }
                </svg>
            </button>
        </div>
    }
}
