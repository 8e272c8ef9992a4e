use yew::prelude::*;

use crate::components::hero_video::HeroVideo;
use crate::config::{self, PageConfig};
use crate::countdown::Countdown;
use crate::donation::panel::DonationPanel;
use crate::donation::payment::Processor;
use crate::slider::VideoSlider;
use crate::stories::StoryList;

#[derive(Properties, PartialEq)]
pub struct LandingProps {
    pub config: PageConfig,
}

#[function_component(Landing)]
pub fn landing(props: &LandingProps) -> Html {
    let config = &props.config;
    let processor = {
        let delay_ms = config.payment_delay_ms;
        use_state(move || Processor::simulated(delay_ms))
    };

    // Scroll to top only on initial mount
    use_effect_with_deps(
        move |_: &()| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    html! {
        <div class="landing-page" dir="rtl">
            <header class="hero">
                <HeroVideo src="assets/video/hero.mp4" poster={Some(AttrValue::from(config::asset_url("assets/hero-poster.jpg")))} />
                <div class="hero-content">
                    <h1>{"هدیه‌ای برای یک زائر"}</h1>
                    <p class="hero-subtitle">
                        {"هزینه سفر کسی را بده که سال‌هاست آرزوی این راه را دارد."}
                    </p>
                    <a href="#donate" class="hero-cta">{"همین حالا هدیه بده"}</a>
                </div>
            </header>

            <section class="deadline">
                <h2>{"تا بسته شدن کاروان"}</h2>
                <Countdown />
            </section>

            <DonationPanel
                primary_presets={config.primary_presets.clone()}
                extra_presets={config.extra_presets.clone()}
                phone_gate={config.phone_gate}
                processor={(*processor).clone()}
            />

            <StoryList stories={config.stories.clone()} />

            <VideoSlider
                manifest_url={config::asset_url(config.manifest_path)}
                fallback={config.fallback_slides.clone()}
            />

            <footer class="footer-cta">
                <p>{"هر هدیه، مستقیم خرج سفر و پذیرایی زائر می‌شود."}</p>
                <a href="#donate" class="hero-cta">{"انتخاب مبلغ"}</a>
            </footer>
            <style>
                {r#"
                    .landing-page {
                        font-family: Vazirmatn, Tahoma, sans-serif;
                        color: #111827;
                    }
                    .hero {
                        position: relative;
                        min-height: 70vh;
                        display: flex;
                        align-items: flex-end;
                    }
                    .hero-video {
                        position: absolute;
                        inset: 0;
                    }
                    .main-video {
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                    }
                    .hero-content {
                        position: relative;
                        padding: 2rem;
                        color: white;
                    }
                    .hero-cta {
                        display: inline-block;
                        padding: 0.75rem 1.5rem;
                        border-radius: 999px;
                        background: #16a34a;
                        color: white;
                        text-decoration: none;
                    }
                    .countdown {
                        display: flex;
                        justify-content: center;
                        gap: 1rem;
                    }
                    .countdown-value {
                        display: block;
                        font-size: 2rem;
                        font-variant-numeric: tabular-nums;
                    }
                    .story-text .typing-cursor.blinking {
                        animation: blink 1s infinite;
                    }
                    @keyframes blink {
                        50% { opacity: 0; }
                    }
                "#}
            </style>
        </div>
    }
}
