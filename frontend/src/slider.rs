use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, Element, HtmlElement, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;

use crate::config::{self, SLIDER_SCROLL_DEBOUNCE_MS};
use crate::donation::digits::to_persian_digits;

const FALLBACK_CAPTION: &str = "ویدیو";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("manifest request failed: {0}")]
    Request(String),
    #[error("manifest unavailable (status {0})")]
    Status(u16),
    #[error("manifest is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("manifest is not a list")]
    NotAList,
    #[error("manifest lists no videos")]
    Empty,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestEntry {
    Path(String),
    Item { src: String },
}

impl ManifestEntry {
    fn into_src(self) -> String {
        match self {
            ManifestEntry::Path(src) | ManifestEntry::Item { src } => src,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoSlide {
    pub src: String,
    pub mime: &'static str,
    pub caption: String,
}

impl VideoSlide {
    pub fn new(src: impl Into<String>) -> Self {
        let src = src.into();
        Self {
            mime: guess_mime_type(&src),
            caption: caption_from_path(&src),
            src,
        }
    }
}

/// Reads a manifest body. Entries that are neither a path string nor an
/// object with a string `src` are skipped.
pub fn parse_manifest(body: &str) -> Result<Vec<VideoSlide>, ManifestError> {
    let Value::Array(items) = serde_json::from_str::<Value>(body)? else {
        return Err(ManifestError::NotAList);
    };
    let slides: Vec<VideoSlide> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<ManifestEntry>(item).ok())
        .map(ManifestEntry::into_src)
        .filter(|src| !src.trim().is_empty())
        .map(VideoSlide::new)
        .collect();
    if slides.is_empty() {
        return Err(ManifestError::Empty);
    }
    Ok(slides)
}

pub async fn fetch_manifest(url: &str) -> Result<Vec<VideoSlide>, ManifestError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| ManifestError::Request(e.to_string()))?;
    if !response.ok() {
        return Err(ManifestError::Status(response.status()));
    }
    let body = response
        .text()
        .await
        .map_err(|e| ManifestError::Request(e.to_string()))?;
    parse_manifest(&body)
}

pub fn guess_mime_type(src: &str) -> &'static str {
    let path = src.split('?').next().unwrap_or(src);
    let ext = path.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "webm" => "video/webm",
        "ogg" | "ogv" => "video/ogg",
        _ => "video/mp4",
    }
}

/// Human label from a media path: last segment, URL-decoded, extension
/// dropped, dash/underscore runs turned into spaces.
pub fn caption_from_path(path: &str) -> String {
    let segment = path.rsplit('/').next().unwrap_or(path);
    let Ok(decoded) = urlencoding::decode(segment) else {
        return FALLBACK_CAPTION.to_string();
    };
    let stem = match decoded.rfind('.') {
        Some(dot) if dot + 1 < decoded.len() => &decoded[..dot],
        _ => &decoded[..],
    };
    let caption = stem
        .split(|c: char| c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let caption = caption.trim();
    if caption.is_empty() {
        FALLBACK_CAPTION.to_string()
    } else {
        caption.to_string()
    }
}

/// Index of the slide whose left edge sits closest to the viewport's left
/// edge. Ties go to the earlier slide.
pub fn nearest_slide(viewport_left: f64, slide_lefts: &[f64]) -> Option<usize> {
    slide_lefts
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, left)| {
            let delta = (left - viewport_left).abs();
            match best {
                Some((_, best_delta)) if best_delta <= delta => best,
                _ => Some((i, delta)),
            }
        })
        .map(|(i, _)| i)
}

pub fn parse_px(value: &str) -> f64 {
    value.trim().trim_end_matches("px").trim().parse().unwrap_or(0.0)
}

fn active_slide(viewport: &NodeRef, track: &NodeRef) -> Option<usize> {
    let viewport = viewport.cast::<Element>()?;
    let track = track.cast::<Element>()?;
    let children = track.children();
    let lefts: Vec<f64> = (0..children.length())
        .filter_map(|i| children.item(i))
        .map(|slide| slide.get_bounding_client_rect().left())
        .collect();
    nearest_slide(viewport.get_bounding_client_rect().left(), &lefts)
}

fn scroll_to_slide(viewport: &NodeRef, track: &NodeRef, index: usize) -> Option<()> {
    let viewport = viewport.cast::<Element>()?;
    let track = track.cast::<Element>()?;
    let slide = track
        .children()
        .item(u32::try_from(index).ok()?)?
        .dyn_into::<HtmlElement>()
        .ok()?;
    let padding = window()?
        .get_computed_style(&track)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("padding-inline-start").ok())
        .map(|value| parse_px(&value))
        .unwrap_or(0.0);

    let mut options = ScrollToOptions::new();
    options.set_left(f64::from(slide.offset_left()) - padding);
    options.set_behavior(ScrollBehavior::Smooth);
    viewport.scroll_to_with_scroll_to_options(&options);
    Some(())
}

#[derive(Properties, PartialEq)]
pub struct VideoSliderProps {
    pub manifest_url: String,
    #[prop_or_default]
    pub fallback: Vec<&'static str>,
}

/// Horizontal video gallery with one dot per slide. The highlighted dot is
/// only ever written from measured slide positions, never from clicks.
#[function_component(VideoSlider)]
pub fn video_slider(props: &VideoSliderProps) -> Html {
    let slides = {
        let fallback = props.fallback.clone();
        use_state(move || {
            fallback
                .into_iter()
                .map(|src| VideoSlide::new(config::asset_url(src)))
                .collect::<Vec<_>>()
        })
    };
    let active = use_state(|| 0usize);
    let viewport_ref = use_node_ref();
    let track_ref = use_node_ref();
    let pending_scroll = use_mut_ref(|| None::<Timeout>);

    {
        let slides = slides.clone();
        use_effect_with_deps(
            move |url: &String| {
                let url = url.clone();
                spawn_local(async move {
                    match fetch_manifest(&url).await {
                        Ok(list) => {
                            info!("Loaded {} videos from manifest", list.len());
                            slides.set(list);
                        }
                        Err(err) => warn!("Keeping built-in slides: {}", err),
                    }
                });
                || ()
            },
            props.manifest_url.clone(),
        );
    }

    // Re-measure whenever the slide set changes
    {
        let viewport_ref = viewport_ref.clone();
        let track_ref = track_ref.clone();
        let active = active.setter();
        use_effect_with_deps(
            move |_: &Vec<VideoSlide>| {
                active.set(active_slide(&viewport_ref, &track_ref).unwrap_or(0));
                || ()
            },
            (*slides).clone(),
        );
    }

    {
        let pending_scroll = pending_scroll.clone();
        use_effect_with_deps(
            move |_: &()| {
                move || {
                    pending_scroll.borrow_mut().take();
                }
            },
            (),
        );
    }

    let onscroll = {
        let viewport_ref = viewport_ref.clone();
        let track_ref = track_ref.clone();
        let active = active.setter();
        let pending_scroll = pending_scroll.clone();
        Callback::from(move |_: Event| {
            let viewport_ref = viewport_ref.clone();
            let track_ref = track_ref.clone();
            let active = active.clone();
            // Replacing the pending timeout drops (cancels) the previous one
            *pending_scroll.borrow_mut() = Some(Timeout::new(SLIDER_SCROLL_DEBOUNCE_MS, move || {
                if let Some(index) = active_slide(&viewport_ref, &track_ref) {
                    active.set(index);
                }
            }));
        })
    };

    if slides.is_empty() {
        return html! {};
    }

    html! {
        <section class="video-slider">
            <div class="slider-viewport" dir="ltr" ref={viewport_ref.clone()} {onscroll}>
                <div class="slider-track" ref={track_ref.clone()}>
                    { for slides.iter().enumerate().map(|(i, slide)| html! {
                        <div class="slide" key={format!("{}:{}", i, slide.src)} aria-label={slide.caption.clone()}>
                            <div class="gallery-item">
                                <video class="gallery-image" preload="metadata" controls=true>
                                    <source src={slide.src.clone()} type={slide.mime} />
                                </video>
                                <div class="gallery-overlay"></div>
                                <div class="play-overlay">
                                    <div class="play-button-large">
                                        <div class="play-triangle"></div>
                                    </div>
                                </div>
                            </div>
                        </div>
                    }) }
                </div>
            </div>
            <div class="slider-dots">
                { for (0..slides.len()).map(|i| {
                    let viewport_ref = viewport_ref.clone();
                    let track_ref = track_ref.clone();
                    let onclick = Callback::from(move |_: MouseEvent| {
                        if scroll_to_slide(&viewport_ref, &track_ref, i).is_none() {
                            warn!("Slide {} is not mounted", i);
                        }
                    });
                    html! {
                        <button
                            type="button"
                            class={classes!("slider-dot", (*active == i).then(|| "active"))}
                            aria-label={format!("اسلاید {}", to_persian_digits(&(i + 1).to_string()))}
                            {onclick}
                        />
                    }
                }) }
            </div>
            <style>
                {r#"
                    .slider-viewport {
                        overflow-x: auto;
                        scroll-snap-type: x mandatory;
                        -webkit-overflow-scrolling: touch;
                        scrollbar-width: none;
                    }
                    .slider-viewport::-webkit-scrollbar {
                        display: none;
                    }
                    .slider-track {
                        display: flex;
                        gap: 1rem;
                        padding-inline-start: 1rem;
                    }
                    .slide {
                        flex: 0 0 80%;
                        scroll-snap-align: start;
                    }
                    .gallery-image {
                        width: 100%;
                        border-radius: 12px;
                    }
                    .slider-dots {
                        display: flex;
                        justify-content: center;
                        gap: 0.5rem;
                        margin-top: 0.75rem;
                    }
                    .slider-dot {
                        width: 10px;
                        height: 10px;
                        border-radius: 50%;
                        border: none;
                        background: #d1d5db;
                    }
                    .slider-dot.active {
                        background: #16a34a;
                    }
                "#}
            </style>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_accepts_strings_and_src_objects() {
        let slides = parse_manifest(
            r#"["a.mp4", {"src": "b.webm", "title": "x"}, {"title": "no src"}, 42, null, ""]"#,
        )
        .unwrap();
        let srcs: Vec<&str> = slides.iter().map(|s| s.src.as_str()).collect();
        assert_eq!(srcs, vec!["a.mp4", "b.webm"]);
        assert_eq!(slides[1].mime, "video/webm");
    }

    #[test]
    fn manifest_must_be_a_non_empty_list() {
        assert!(matches!(parse_manifest("[]"), Err(ManifestError::Empty)));
        assert!(matches!(parse_manifest(r#"[{"title":1}]"#), Err(ManifestError::Empty)));
        assert!(matches!(parse_manifest(r#"{"src":"a.mp4"}"#), Err(ManifestError::NotAList)));
        assert!(matches!(parse_manifest("not json"), Err(ManifestError::Json(_))));
    }

    #[test]
    fn mime_type_follows_extension() {
        assert_eq!(guess_mime_type("clip.MP4"), "video/mp4");
        assert_eq!(guess_mime_type("clip.webm?v=2"), "video/webm");
        assert_eq!(guess_mime_type("dir/clip.ogv"), "video/ogg");
        assert_eq!(guess_mime_type("clip.ogg"), "video/ogg");
        assert_eq!(guess_mime_type("clip.mov"), "video/mp4");
        assert_eq!(guess_mime_type("clip"), "video/mp4");
    }

    #[test]
    fn caption_is_derived_from_file_name() {
        assert_eq!(caption_from_path("assets/video/tea-station.mp4"), "tea station");
        assert_eq!(caption_from_path("assets/video/night__walk--2.webm"), "night walk 2");
        assert_eq!(caption_from_path("a/%D9%85%D9%88%DA%A9%D8%A8.mp4"), "موکب");
        assert_eq!(caption_from_path("assets/video/.mp4"), FALLBACK_CAPTION);
        assert_eq!(caption_from_path("assets/video/---.mp4"), FALLBACK_CAPTION);
    }

    #[test]
    fn nearest_slide_picks_smallest_distance() {
        assert_eq!(nearest_slide(0.0, &[]), None);
        assert_eq!(nearest_slide(10.0, &[400.0, 12.0, -300.0]), Some(1));
        assert_eq!(nearest_slide(0.0, &[-5.0, 5.0]), Some(0));
        assert_eq!(nearest_slide(100.0, &[700.0, 400.0, 90.0]), Some(2));
    }

    #[test]
    fn pixel_values_parse_leniently() {
        assert_eq!(parse_px("16px"), 16.0);
        assert_eq!(parse_px(" 8.5px "), 8.5);
        assert_eq!(parse_px(""), 0.0);
        assert_eq!(parse_px("auto"), 0.0);
    }
}
