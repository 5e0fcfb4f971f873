// The core modules are driven by the wasm frontend; native builds only run the host and tests.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod config;
mod content;
mod counter;
mod environment;
mod error;
mod forms;
mod globe;
mod illustration;
mod lightbox;
mod reveal;
mod telemetry;
mod transition;
mod viewport;

#[cfg(not(target_arch = "wasm32"))]
mod backend;
#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    backend::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
