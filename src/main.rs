fn main() {
    folio::config::load_env();
    folio::logging::init_tracing("folio=info");
    dioxus::launch(folio::ui::App);
}
