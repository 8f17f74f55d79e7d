use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::{Builder, Handle};

/// Starts the control socket and config watcher on a dedicated runtime and
/// returns its handle so the UI can schedule timers on it.
pub fn start_background_services(tx: Sender<AppEvent>) -> anyhow::Result<Handle> {
    let rt = Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("folio-worker")
        .enable_all()
        .build()?;
    let handle = rt.handle().clone();

    handle.spawn(crate::sys::server::run_server(tx.clone()));
    handle.spawn(crate::config::run_async_watcher(tx));

    thread::Builder::new()
        .name("folio-runtime".into())
        .spawn(move || rt.block_on(std::future::pending::<()>()))?;

    Ok(handle)
}
