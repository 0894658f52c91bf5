use dioxus::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match ui::make_backend() {
        Ok(backend) => dioxus::LaunchBuilder::new().with_context(backend).launch(App),
        Err(e) => {
            tracing::error!("backend configuration failed: {e}");
            dioxus::LaunchBuilder::new()
                .with_context(ui::StartupError(e.to_string()))
                .launch(ui::StartupFailed)
        }
    }
}

#[component]
fn App() -> Element {
    rsx! {
        ui::AppShell {}
    }
}
