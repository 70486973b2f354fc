//! # Scoped camera access
//!
//! [`CameraPanel`] owns at most one live stream. Acquisition is asynchronous,
//! so opening hands out a [`Ticket`] and the result is attached later; if the
//! panel was closed in between, the late stream is stopped on arrival. Closing
//! or dropping the panel stops every track it holds.

use std::future::Future;

/// Preferred camera. Scanning and return photos want the back camera.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FacingMode {
    #[default]
    Environment,
    User,
}

impl FacingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::User => "user",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CameraError {
    #[error("Kameratilgang Avslått")]
    PermissionDenied,
    #[error("Kamera ikke støttet")]
    Unsupported,
    #[error("Kamerafeil: {0}")]
    Bridge(String),
}

/// A live media stream.
pub trait CameraStream {
    /// Stops every track of the stream.
    fn stop(&mut self);
}

pub trait CameraDevice {
    type Stream: CameraStream;

    fn acquire(
        &self,
        facing: FacingMode,
    ) -> impl Future<Output = Result<Self::Stream, CameraError>>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraStatus {
    #[default]
    Hidden,
    Starting,
    Live,
    Denied,
    Unsupported,
}

impl CameraStatus {
    /// Panel is shown (starting, live or showing an alert).
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Persistent inline alert as `(title, body)`.
    pub fn alert(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Denied => Some((
                "Kameratilgang Nødvendig",
                "Fikk ikke tilgang til kamera. Vennligst sjekk tillatelser og prøv igjen, \
                 eller last opp en fil manuelt.",
            )),
            Self::Unsupported => Some((
                "Kamera ikke støttet",
                "Nettleseren din støtter ikke kameratilgang.",
            )),
            _ => None,
        }
    }
}

/// Proof that an acquisition was started by a particular `open`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct CameraPanel<S: CameraStream> {
    status: CameraStatus,
    stream: Option<S>,
    generation: u64,
}

impl<S: CameraStream> Default for CameraPanel<S> {
    fn default() -> Self {
        Self {
            status: CameraStatus::Hidden,
            stream: None,
            generation: 0,
        }
    }
}

impl<S: CameraStream> CameraPanel<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> CameraStatus {
        self.status
    }

    pub fn stream(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    /// Starts showing the panel. `None` if it is already starting or live.
    pub fn open(&mut self) -> Option<Ticket> {
        if matches!(self.status, CameraStatus::Starting | CameraStatus::Live) {
            return None;
        }
        self.generation += 1;
        self.status = CameraStatus::Starting;
        Some(Ticket(self.generation))
    }

    /// Hands the acquisition result to the panel.
    pub fn attach(&mut self, ticket: Ticket, result: Result<S, CameraError>) -> CameraStatus {
        if ticket.0 != self.generation || self.status != CameraStatus::Starting {
            if let Ok(mut late) = result {
                tracing::debug!("stopping camera stream for a closed panel");
                late.stop();
            }
            return self.status;
        }
        self.status = match result {
            Ok(stream) => {
                self.stream = Some(stream);
                CameraStatus::Live
            }
            Err(CameraError::Unsupported) => {
                tracing::warn!("camera not supported");
                CameraStatus::Unsupported
            }
            Err(err) => {
                tracing::warn!(error = %err, "camera access failed");
                CameraStatus::Denied
            }
        };
        self.status
    }

    /// Hides the panel and stops the stream. Closing twice is a no-op.
    pub fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
        if self.status != CameraStatus::Hidden {
            self.generation += 1;
            self.status = CameraStatus::Hidden;
        }
    }

    /// Open, acquire and attach in one go.
    pub async fn show<D>(&mut self, device: &D) -> CameraStatus
    where
        D: CameraDevice<Stream = S>,
    {
        let Some(ticket) = self.open() else {
            return self.status;
        };
        let result = device.acquire(FacingMode::Environment).await;
        self.attach(ticket, result)
    }
}

impl<S: CameraStream> Drop for CameraPanel<S> {
    fn drop(&mut self) {
        self.close();
    }
}
