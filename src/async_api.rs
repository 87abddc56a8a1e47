use crate::session::Session;
use crate::{import_texture, Error, Extraction, ImportConfig, Result, Texture};
use log::debug;
use tokio::task::{AbortHandle, JoinHandle};

/// Background texture importer.
///
/// Decoding runs on tokio's blocking pool so a UI task never stalls on a
/// large or slow file. Starting an import aborts whatever import is still in
/// flight and takes a fresh ticket from the session; a decode that finishes
/// after being superseded is reported as `Error::Superseded` and never
/// touches the session.
pub struct Importer {
    config: ImportConfig,
    in_flight: Option<AbortHandle>,
}

/// A started import. Await it with [`ImportTask::join`] and hand the
/// outcome to [`ImportTask::apply`].
pub struct ImportTask {
    ticket: u64,
    handle: JoinHandle<Result<Texture>>,
}

impl Importer {
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config,
            in_flight: None,
        }
    }

    /// Reset the session and start decoding `bytes` in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, session: &mut Session, bytes: Vec<u8>) -> ImportTask {
        if let Some(previous) = self.in_flight.take() {
            debug!("aborting in-flight import");
            previous.abort();
        }

        let ticket = session.begin_import();
        let config = self.config.clone();
        let handle = tokio::task::spawn_blocking(move || import_texture(&bytes, &config));
        self.in_flight = Some(handle.abort_handle());
        ImportTask { ticket, handle }
    }

    /// Start an import and wait for it, applying the result to `session`.
    pub async fn import(&mut self, session: &mut Session, bytes: Vec<u8>) -> Result<Extraction> {
        let task = self.start(session, bytes);
        let ticket = task.ticket;
        let outcome = task.join().await;
        session.finish_import(ticket, outcome).cloned()
    }
}

impl ImportTask {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// Wait for the decode. An aborted task yields `Error::Superseded`.
    pub async fn join(self) -> Result<Texture> {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => Err(Error::Superseded),
            Err(e) => Err(Error::DecodeError(format!("decode task failed: {}", e))),
        }
    }

    /// Wait for the decode and apply it to `session` if this import is still
    /// the current one.
    pub async fn apply(self, session: &mut Session) -> Result<Extraction> {
        let ticket = self.ticket;
        let outcome = self.join().await;
        session.finish_import(ticket, outcome).cloned()
    }
}
