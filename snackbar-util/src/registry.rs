use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use crate::action::{ActionDescriptor, ActionFuture, ActionHandler, ButtonProps, KeepOpen};

/// Outcome of activating a rendered action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The action was pending; the click was swallowed.
    Ignored,
    /// The handler ran and the toast stays open.
    Stay,
    /// The handler ran and the toast should close.
    Close,
}

/// A clickable entry derived from a valid, deduplicated descriptor.
///
/// Clones share the pending flag, so a host can hand copies to its renderer
/// while the registry keeps control of disablement.
#[derive(Clone)]
pub struct RenderedAction {
    label: String,
    button: ButtonProps,
    keep_open: KeepOpen,
    disable_after_execute: bool,
    execute: ActionHandler,
    pending: Arc<AtomicBool>,
}

/// Build the rendered action list from caller-supplied descriptors.
///
/// Descriptors without a callable or a non-empty label are dropped quietly;
/// a label seen a second time is dropped with a diagnostic, so the first
/// occurrence is the one that renders and executes. Surviving order follows
/// first-occurrence input order.
pub fn render_actions(descriptors: &[ActionDescriptor]) -> Vec<RenderedAction> {
    let mut rendered: Vec<RenderedAction> = Vec::with_capacity(descriptors.len());

    for descriptor in descriptors {
        if !descriptor.is_renderable() {
            continue;
        }
        if rendered.iter().any(|a| a.label == descriptor.label) {
            warn!("Duplicate action label dropped: {}", descriptor.label);
            continue;
        }

        let Some(execute) = descriptor.execute.clone() else {
            continue;
        };

        rendered.push(RenderedAction {
            label: descriptor.label.clone(),
            button: descriptor.button.sanitized(),
            keep_open: descriptor.keep_open,
            disable_after_execute: descriptor
                .disable_after_execute
                .unwrap_or(descriptor.keep_open != KeepOpen::Always),
            execute,
            pending: Arc::new(AtomicBool::new(false)),
        });
    }

    rendered
}

impl RenderedAction {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Sanitized style/attribute overrides for the button.
    pub fn button(&self) -> &ButtonProps {
        &self.button
    }

    /// Whether the button is disabled because an execution is pending.
    pub fn is_disabled(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    pub fn keep_open(&self) -> KeepOpen {
        self.keep_open
    }

    /// Run the activation protocol.
    ///
    /// A pending action swallows the click. Otherwise the handler's
    /// synchronous portion runs inline; its future is awaited only under
    /// `KeepOpen::UntilResolved`, where the pending window spans until the
    /// result settles and the close decision is deferred to that point. A
    /// failing handler still releases the pending state and still reports
    /// `Close` — the error is logged, not swallowed into a deadlock.
    pub async fn activate(&self) -> Activation {
        if self.pending.load(Ordering::Acquire) {
            return Activation::Ignored;
        }
        if self.disable_after_execute && self.pending.swap(true, Ordering::AcqRel) {
            // Lost the race to a concurrent activation of the same action.
            return Activation::Ignored;
        }

        let fut = (self.execute)();

        match self.keep_open {
            KeepOpen::UntilResolved => {
                let result = fut.await;
                if self.disable_after_execute {
                    self.pending.store(false, Ordering::Release);
                }
                if let Err(err) = result {
                    warn!("Action '{}' failed: {}", self.label, err);
                }
                Activation::Close
            }
            KeepOpen::Always => {
                detach(self.label.clone(), fut);
                if self.disable_after_execute {
                    // The toast stays open, so the button comes back once the
                    // synchronous portion is done.
                    self.pending.store(false, Ordering::Release);
                }
                Activation::Stay
            }
            KeepOpen::Never => {
                detach(self.label.clone(), fut);
                Activation::Close
            }
        }
    }
}

impl std::fmt::Debug for RenderedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedAction")
            .field("label", &self.label)
            .field("keep_open", &self.keep_open)
            .field("disable_after_execute", &self.disable_after_execute)
            .field("disabled", &self.is_disabled())
            .finish()
    }
}

/// Let a fire-and-forget handler finish on its own; failures only get logged.
fn detach(label: String, fut: ActionFuture) {
    tokio::spawn(async move {
        if let Err(err) = fut.await {
            warn!("Action '{}' failed: {}", label, err);
        }
    });
}
