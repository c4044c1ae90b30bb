use dioxus::prelude::*;

mod components;
mod home;
mod stores;

use home::HomeView;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    HomeView,
}

fn app() -> Element {
    rsx! {
        Router::<Route> {}
    }
}

fn main() {
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        eprintln!("failed to start logger: {e}");
    }
    launch(app);
}
