use yew::prelude::*;
use log::{error, info, Level};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{js_sys, window};

mod config;
mod countdown;
mod slider;
mod stories;
mod components {
    pub mod notification;
    pub mod media;
    pub mod hero_video;
}
mod donation {
    pub mod digits;
    pub mod phone;
    pub mod payment;
    pub mod state;
    pub mod panel;
}
mod pages {
    pub mod landing;
}

use components::notification::NotificationHost;
use config::{PageConfig, SERVICE_WORKER_PATH};
use pages::landing::Landing;

/// Registers the offline worker when the browser supports it. Failures are
/// logged and otherwise ignored.
fn register_service_worker() {
    let Some(window) = window() else {
        return;
    };
    let navigator = window.navigator();
    let supported = js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker"))
        .unwrap_or(false);
    if !supported {
        info!("Service workers not supported, skipping registration");
        return;
    }

    let promise = navigator.service_worker().register(SERVICE_WORKER_PATH);
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => info!("Service worker registered at {}", SERVICE_WORKER_PATH),
            Err(e) => error!("Service worker registration failed: {:?}", e),
        }
    });
}

#[function_component]
fn App() -> Html {
    let config = use_state(PageConfig::default);

    {
        let enabled = config.register_service_worker;
        use_effect_with_deps(
            move |enabled: &bool| {
                if *enabled {
                    register_service_worker();
                }
                || ()
            },
            enabled,
        );
    }

    html! {
        <NotificationHost>
            <Landing config={(*config).clone()} />
        </NotificationHost>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
