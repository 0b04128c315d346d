//! Fullscreen presentation tracking.
//!
//! The flag only follows change notifications from the environment. A
//! request that is refused (no user gesture, browser policy) never flips it.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FullscreenRequest {
    Enter,
    Exit,
}

#[derive(Debug, Error)]
pub enum FullscreenError {
    #[error("fullscreen is not supported here")]
    Unsupported,
    #[error("fullscreen request rejected: {0}")]
    Rejected(String),
}

/// Environment able to enter or leave fullscreen. Returning `Ok` only means
/// the request was issued; confirmation arrives through
/// [`FullscreenState::on_change`].
pub trait FullscreenHost {
    fn request(&self, request: FullscreenRequest) -> Result<(), FullscreenError>;
}

#[derive(Debug, Default)]
pub struct FullscreenState {
    is_fullscreen: bool,
    pending: Option<FullscreenRequest>,
}

impl FullscreenState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    #[inline]
    pub fn pending(&self) -> Option<FullscreenRequest> {
        self.pending
    }

    pub fn next_request(&self) -> FullscreenRequest {
        if self.is_fullscreen {
            FullscreenRequest::Exit
        } else {
            FullscreenRequest::Enter
        }
    }

    /// Ask the host for the opposite of the tracked state.
    pub fn toggle<H: FullscreenHost + ?Sized>(&mut self, host: &H) -> FullscreenRequest {
        let req = self.next_request();
        self.pending = Some(req);
        if let Err(e) = host.request(req) {
            self.on_request_failed(&e);
        }
        req
    }

    /// Environment reported a transition (or a no-op repeat).
    pub fn on_change(&mut self, is_fullscreen: bool) {
        if self.is_fullscreen != is_fullscreen {
            log::info!("[fullscreen] {}", if is_fullscreen { "entered" } else { "exited" });
        }
        self.is_fullscreen = is_fullscreen;
        self.pending = None;
    }

    /// Document-wide notification: only fullscreen on `owner` itself counts,
    /// so several views on one page track their own state.
    pub fn on_owner_change<T: PartialEq + ?Sized>(&mut self, active: Option<&T>, owner: &T) {
        self.on_change(active == Some(owner));
    }

    pub fn on_request_failed(&mut self, err: &FullscreenError) {
        log::warn!(
            "[fullscreen] {:?} failed, staying {}: {}",
            self.pending.unwrap_or_else(|| self.next_request()),
            if self.is_fullscreen { "fullscreen" } else { "windowed" },
            err
        );
        self.pending = None;
    }
}
