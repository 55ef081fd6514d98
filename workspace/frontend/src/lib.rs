use yew::prelude::*;

mod components;
pub mod api_client;
pub mod hooks;
pub mod settings;

use components::calculator::Calculator;

#[function_component(App)]
pub fn app() -> Html {
    html! { <Calculator /> }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Peak Business Calculator Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("Data base URL: {}", settings.data_base_url);
    log::debug!("Debug mode: {}", settings.debug_mode);

    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
