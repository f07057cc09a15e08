#![forbid(unsafe_code)]

//! Self-renewing `requestAnimationFrame` loop.
//!
//! Each frame requests the next one and parks its [`AnimationFrame`] handle
//! in a shared slot. Dropping the [`FrameLoop`] drops the slot, which
//! cancels the queued frame, and a frame already running finds the slot
//! gone and does not renew.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::render::{AnimationFrame, request_animation_frame};

type FrameSlot = RefCell<Option<AnimationFrame>>;

pub(crate) struct FrameLoop {
    _pending: Rc<FrameSlot>,
}

impl FrameLoop {
    /// Call `on_frame` with the DOM high-resolution timestamp once per
    /// animation frame until the loop is dropped.
    pub(crate) fn start(on_frame: impl FnMut(f64) + 'static) -> Self {
        let pending = Rc::new(RefCell::new(None));
        schedule(Rc::downgrade(&pending), on_frame);
        Self { _pending: pending }
    }
}

fn schedule<F>(slot: Weak<FrameSlot>, mut on_frame: F)
where
    F: FnMut(f64) + 'static,
{
    let Some(pending) = slot.upgrade() else {
        return;
    };
    let handle = request_animation_frame(move |timestamp| {
        on_frame(timestamp);
        schedule(slot, on_frame);
    });
    *pending.borrow_mut() = Some(handle);
}
