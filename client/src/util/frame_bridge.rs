//! Message channel between the workspace and the preview frame.
//!
//! SYSTEM CONTEXT
//! ==============
//! The preview `<iframe>` is sandboxed without `allow-same-origin`, so the host
//! cannot reach into its document. Everything goes through `postMessage`:
//! `CodePreview` attaches its frame and forwards every message it receives
//! here; the document panel sends requests and awaits the matching reply.
//!
//! DESIGN
//! ======
//! Waiters are kept in an [`AckRegistry`] keyed by the request they wait on.
//! A reply settles every waiter it acknowledges; a waiter that is not settled
//! within the timeout is cancelled and resolves to [`BridgeError::Timeout`].
//! The browser side is single-threaded, so the registry and the attached
//! frame live in thread-locals.

#[cfg(test)]
#[path = "frame_bridge_test.rs"]
mod frame_bridge_test;

use preview::bridge::{BridgeError, FrameMessage, HostMessage, Screenshot};

/// Requests waiting for the frame to answer.
#[derive(Debug)]
pub struct AckRegistry<W> {
    pending: Vec<(u64, HostMessage, W)>,
    next_ticket: u64,
}

impl<W> Default for AckRegistry<W> {
    fn default() -> Self {
        Self { pending: Vec::new(), next_ticket: 0 }
    }
}

impl<W> AckRegistry<W> {
    /// Register `waiter` for the reply to `request`; returns a ticket for
    /// [`AckRegistry::cancel`].
    pub fn expect(&mut self, request: HostMessage, waiter: W) -> u64 {
        self.next_ticket += 1;
        self.pending.push((self.next_ticket, request, waiter));
        self.next_ticket
    }

    /// Remove and return every waiter `reply` acknowledges, oldest first.
    pub fn settle(&mut self, reply: &FrameMessage) -> Vec<W> {
        let (done, rest): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|(_, request, _)| reply.acknowledges(request));
        self.pending = rest;
        done.into_iter().map(|(_, _, waiter)| waiter).collect()
    }

    pub fn cancel(&mut self, ticket: u64) -> Option<W> {
        let index = self.pending.iter().position(|(t, _, _)| *t == ticket)?;
        Some(self.pending.remove(index).2)
    }

    /// Drop every waiter, e.g. when the frame is replaced.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Turn the reply to `CAPTURE_SCREENSHOT` into a decoded screenshot.
///
/// # Errors
///
/// `SCREENSHOT_FAILED` becomes [`BridgeError::CaptureFailed`]; undecodable
/// data URLs and unrelated replies are errors too.
pub fn screenshot_from(reply: FrameMessage) -> Result<Screenshot, BridgeError> {
    match reply {
        FrameMessage::ScreenshotCaptured { label, data_url } => Screenshot::from_data_url(&label, &data_url),
        FrameMessage::ScreenshotFailed { label, message } => Err(BridgeError::CaptureFailed { label, message }),
        other => Err(BridgeError::Malformed(format!("unexpected reply {other:?}"))),
    }
}

// =============================================================================
// BROWSER CHANNEL
// =============================================================================

#[cfg(feature = "hydrate")]
mod channel {
    use std::cell::RefCell;
    use std::time::Duration;

    use futures::channel::oneshot;
    use futures::future::{Either, select};
    use preview::bridge::{ACK_TIMEOUT, BridgeError, CaptureStep, FrameMessage, HostMessage, Screenshot};
    use wasm_bindgen::JsValue;

    use super::{AckRegistry, screenshot_from};

    /// Pause between a modal acknowledging it opened and its capture.
    const MODAL_SETTLE: Duration = Duration::from_millis(300);

    thread_local! {
        static FRAME: RefCell<Option<web_sys::HtmlIFrameElement>> = const { RefCell::new(None) };
        static PENDING: RefCell<AckRegistry<oneshot::Sender<FrameMessage>>> = RefCell::new(AckRegistry::default());
    }

    /// Make `frame` the target of host messages.
    pub fn attach(frame: web_sys::HtmlIFrameElement) {
        FRAME.with(|f| *f.borrow_mut() = Some(frame));
    }

    /// Forget the frame and fail every outstanding request.
    pub fn detach() {
        FRAME.with(|f| *f.borrow_mut() = None);
        PENDING.with(|p| p.borrow_mut().clear());
    }

    /// Whether `source` (a `MessageEvent.source`) is the attached frame.
    pub fn is_frame_source(source: &JsValue) -> bool {
        FRAME.with(|f| {
            f.borrow()
                .as_ref()
                .and_then(web_sys::HtmlIFrameElement::content_window)
                .is_some_and(|w| js_sys::Object::is(source, &w))
        })
    }

    /// Hand a reply from the frame to whoever waits for it.
    pub fn dispatch(reply: &FrameMessage) {
        let waiters = PENDING.with(|p| p.borrow_mut().settle(reply));
        for waiter in waiters {
            let _ = waiter.send(reply.clone());
        }
    }

    fn post(message: &HostMessage) -> Result<(), BridgeError> {
        let target = FRAME
            .with(|f| f.borrow().as_ref().and_then(web_sys::HtmlIFrameElement::content_window))
            .ok_or_else(|| BridgeError::Malformed("preview frame is not loaded".to_owned()))?;
        let payload =
            js_sys::JSON::parse(&message.to_json()).map_err(|e| BridgeError::Malformed(format!("{e:?}")))?;
        // Sandboxed frames have an opaque origin, so the target must be "*".
        target
            .post_message(&payload, "*")
            .map_err(|e| BridgeError::Malformed(format!("{e:?}")))
    }

    /// Post `message` and wait up to `timeout` for its acknowledgement.
    ///
    /// # Errors
    ///
    /// [`BridgeError::Timeout`] when the frame does not answer in time.
    pub async fn request(message: HostMessage, timeout: Duration) -> Result<FrameMessage, BridgeError> {
        let (tx, rx) = oneshot::channel();
        let ticket = PENDING.with(|p| p.borrow_mut().expect(message.clone(), tx));
        if let Err(e) = post(&message) {
            PENDING.with(|p| p.borrow_mut().cancel(ticket));
            return Err(e);
        }
        let sleep = Box::pin(gloo_timers::future::sleep(timeout));
        match select(rx, sleep).await {
            Either::Left((Ok(reply), _)) => Ok(reply),
            Either::Left((Err(_), _)) | Either::Right(_) => {
                PENDING.with(|p| p.borrow_mut().cancel(ticket));
                Err(BridgeError::Timeout(message.awaited()))
            }
        }
    }

    /// Run one capture step: open its modal if any, capture, close again.
    ///
    /// # Errors
    ///
    /// Any timeout or capture failure; the modal is still closed.
    pub async fn capture(step: &CaptureStep) -> Result<Screenshot, BridgeError> {
        let mut shot = Err(BridgeError::Timeout(step.label.clone()));
        for message in step.messages() {
            match message {
                HostMessage::OpenModal { .. } => {
                    request(message, ACK_TIMEOUT).await?;
                    gloo_timers::future::sleep(MODAL_SETTLE).await;
                }
                HostMessage::CaptureScreenshot { .. } => {
                    shot = request(message, ACK_TIMEOUT).await.and_then(screenshot_from);
                }
                HostMessage::CloseModal => {
                    if let Err(e) = request(message, ACK_TIMEOUT).await {
                        log::warn!("frame bridge: {e}");
                    }
                }
            }
        }
        shot
    }

    /// Capture every step in order. Failed steps are logged and skipped.
    pub async fn capture_all(plan: &[CaptureStep]) -> Vec<Screenshot> {
        let mut shots = Vec::with_capacity(plan.len());
        for step in plan {
            match capture(step).await {
                Ok(shot) => shots.push(shot),
                Err(e) => log::warn!("frame bridge: skipping {}: {e}", step.label),
            }
        }
        shots
    }
}

#[cfg(feature = "hydrate")]
pub use channel::{attach, capture, capture_all, detach, dispatch, is_frame_source, request};
