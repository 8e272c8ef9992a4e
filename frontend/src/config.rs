
#[cfg(debug_assertions)]
pub fn get_asset_base() -> &'static str {
    "http://localhost:8080"  // trunk serve
}

#[cfg(not(debug_assertions))]
pub fn get_asset_base() -> &'static str {
    ""  // Same origin in production
}

pub fn asset_url(path: &str) -> String {
    format!("{}/{}", get_asset_base(), path.trim_start_matches('/'))
}

// Upsell rules, all amounts in toman
pub const UPSELL_SMALL_INCREMENT: u64 = 100_000;
pub const UPSELL_LARGE_INCREMENT: u64 = 250_000;
pub const UPSELL_LARGE_FROM: u64 = 1_000_000;
pub const UPSELL_HIDDEN_FROM: u64 = 9_000_000;

pub const PAYMENT_DELAY_MS: u32 = 2_000;
pub const TYPING_INTERVAL_MS: u32 = 50;
pub const SLIDER_SCROLL_DEBOUNCE_MS: u32 = 50;
pub const TOAST_VISIBLE_MS: u32 = 3_000;
pub const TOAST_EXIT_MS: u32 = 300;

pub const COUNTDOWN_DAYS: i64 = 2;
pub const COUNTDOWN_HOURS: i64 = 3;
pub const COUNTDOWN_MINUTES: i64 = 20;

pub const VIDEO_MANIFEST_PATH: &str = "assets/video/videos.json";
pub const SERVICE_WORKER_PATH: &str = "/sw.js";

#[derive(Clone, PartialEq, Debug)]
pub struct StoryConfig {
    pub id: &'static str,
    pub name: &'static str,
    pub caption: &'static str,
    pub transcript: &'static str,
    pub audio_src: Option<&'static str>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct PageConfig {
    pub primary_presets: Vec<u64>,
    pub extra_presets: Vec<u64>,
    /// When off, the payment button skips the phone modal entirely.
    pub phone_gate: bool,
    pub payment_delay_ms: u32,
    pub manifest_path: &'static str,
    pub fallback_slides: Vec<&'static str>,
    pub stories: Vec<StoryConfig>,
    pub register_service_worker: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            primary_presets: vec![300_000, 500_000, 1_000_000, 2_000_000],
            extra_presets: vec![5_000_000, 9_000_000, 15_000_000],
            phone_gate: true,
            payment_delay_ms: PAYMENT_DELAY_MS,
            manifest_path: VIDEO_MANIFEST_PATH,
            fallback_slides: vec![
                "assets/video/arbaeen-walk.mp4",
                "assets/video/mokeb-night.mp4",
                "assets/video/tea-station.mp4",
            ],
            stories: vec![
                StoryConfig {
                    id: "hossein",
                    name: "حسین، ۶۷ ساله",
                    caption: "بیست سال آرزوی این سفر را داشتم",
                    transcript: "بیست سال هر سال می‌گفتم سال دیگر. امسال یک نفر که هیچ‌وقت ندیدمش هزینه راهم را داد. حالا اینجا هستم و برایش دعا می‌کنم.",
                    audio_src: Some("assets/audio/hossein.mp3"),
                },
                StoryConfig {
                    id: "maryam",
                    name: "مریم، ۴۲ ساله",
                    caption: "با دو فرزندم راهی شدم",
                    transcript: "فکر نمی‌کردم با دو بچه بتوانم بیایم. غذا و جای خواب بین راه فراهم بود و بچه‌ها هر شب با لبخند خوابیدند.",
                    audio_src: Some("assets/audio/maryam.mp3"),
                },
                StoryConfig {
                    id: "reza",
                    name: "رضا، ۲۳ ساله",
                    caption: "اولین سفرم بود",
                    transcript: "دانشجو هستم و پولی برای سفر نداشتم. کمک شما فقط هزینه سفر نبود، نشانه این بود که کسی به فکر ماست.",
                    audio_src: None,
                },
            ],
            register_service_worker: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_urls_share_one_base_with_or_without_leading_slash() {
        let expected = format!("{}/assets/hero-poster.jpg", get_asset_base());
        assert_eq!(asset_url("assets/hero-poster.jpg"), expected);
        assert_eq!(asset_url("/assets/hero-poster.jpg"), expected);
    }
}
