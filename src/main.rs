//! Host-side helper: `cargo run` builds the WASM package into `static/pkg`
//! and serves `static/` on a local HTTP server.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::process::{Command, Stdio};
    use std::{thread, time::Duration};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("building WASM package");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(status) if status.success() => {}
        Ok(status) => {
            log::error!("wasm-pack finished with {status}");
            std::process::exit(1);
        }
        Err(err) => {
            log::warn!("wasm-pack unavailable ({err}); serving whatever is already in static/pkg");
        }
    }

    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_owned());
    let server = Command::new("python3")
        .args(["-m", "http.server", &port, "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    match server {
        Ok(_) => log::info!("serving at http://127.0.0.1:{port}"),
        Err(err) => {
            log::error!("failed to start http server: {err}");
            std::process::exit(1);
        }
    }

    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

// The page entry point lives in the library when targeting wasm32.
#[cfg(target_arch = "wasm32")]
fn main() {}
