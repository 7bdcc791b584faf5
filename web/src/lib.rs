use clap::Parser;
use wasm_bindgen::prelude::*;

mod api;
mod game;

pub(crate) const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Options read from the page's URL fragment, e.g. `index.html#-vv&--api-base=http://localhost:5000`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Base URL of the scoring service
    #[arg(short, long, default_value = DEFAULT_API_BASE)]
    api_base: String,
}

impl Args {
    fn from_fragment(fragment: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(fragment.split(['#', '&']))
    }

    fn api_base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            verbose: clap_verbosity_flag::Verbosity::new(0, 0),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let (args, parse_error) = match Args::from_fragment(&location_hash) {
        Ok(args) => (args, None),
        Err(err) => (Args::default(), Some(err)),
    };
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    if let Some(err) = parse_error {
        log::warn!("ignoring URL fragment {:?}: {}", location_hash, err);
    }
    log::debug!("api base: {}", args.api_base());

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    let props = game::GameProps {
        api_base: args.api_base().to_string().into(),
    };
    yew::Renderer::<game::GameView>::with_root_and_props(root, props).render();
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn fragment_parses_in_the_browser_runtime() {
        let args = Args::from_fragment("#-q&-a=http://127.0.0.1:5000/").unwrap();
        assert_eq!(args.api_base(), "http://127.0.0.1:5000");
        assert_eq!(args.verbose.log_level(), None);
    }
}
