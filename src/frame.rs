use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use viz_core::{Cadence, HostError, RepeatingTask, TaskHost, TaskKind};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Browser scheduler: `setInterval` for timers, `requestAnimationFrame`
/// for display-synced loops.
#[derive(Clone)]
pub struct BrowserHost {
    window: web::Window,
}

/// Live browser task. Cancelling consumes it; dropping it without
/// cancelling leaks the JS registration, so owners cancel in `Drop`.
pub enum BrowserTask {
    Interval {
        id: i32,
        _closure: Closure<dyn FnMut()>,
    },
    Frame(Rc<FrameLoop>),
}

pub struct FrameLoop {
    request_id: Cell<i32>,
    cancelled: Cell<bool>,
    tick: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl BrowserHost {
    pub fn new(window: web::Window) -> Self {
        Self { window }
    }

    fn schedule_error(kind: TaskKind, e: wasm_bindgen::JsValue) -> HostError {
        HostError::Schedule {
            kind,
            detail: format!("{:?}", e),
        }
    }

    fn spawn_frame_loop(&self, mut task: RepeatingTask) -> Result<BrowserTask, HostError> {
        let frame_loop = Rc::new(FrameLoop {
            request_id: Cell::new(0),
            cancelled: Cell::new(false),
            tick: RefCell::new(None),
        });
        // the closure only holds a weak link so cancel can free it
        let weak: Weak<FrameLoop> = Rc::downgrade(&frame_loop);
        let window = self.window.clone();
        *frame_loop.tick.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            let Some(this) = weak.upgrade() else {
                return;
            };
            if this.cancelled.get() {
                return;
            }
            task(timestamp);
            if this.cancelled.get() {
                return;
            }
            let next = this
                .tick
                .borrow()
                .as_ref()
                .map(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()));
            match next {
                Some(Ok(id)) => this.request_id.set(id),
                Some(Err(e)) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
                None => {}
            }
        }) as Box<dyn FnMut(f64)>));

        let first = frame_loop
            .tick
            .borrow()
            .as_ref()
            .map(|cb| self.window.request_animation_frame(cb.as_ref().unchecked_ref()))
            .ok_or(HostError::Unavailable)?
            .map_err(|e| Self::schedule_error(TaskKind::AnimationFrame, e))?;
        frame_loop.request_id.set(first);
        Ok(BrowserTask::Frame(frame_loop))
    }
}

impl TaskHost for BrowserHost {
    type Handle = BrowserTask;

    fn spawn_repeating(&self, cadence: Cadence, mut task: RepeatingTask) -> Result<BrowserTask, HostError> {
        match cadence {
            Cadence::Interval(period) => {
                let closure = Closure::wrap(Box::new(move || task(instant::now())) as Box<dyn FnMut()>);
                let timeout = period.as_millis().min(i32::MAX as u128) as i32;
                let id = self
                    .window
                    .set_interval_with_callback_and_timeout_and_arguments_0(
                        closure.as_ref().unchecked_ref(),
                        timeout,
                    )
                    .map_err(|e| Self::schedule_error(TaskKind::Interval, e))?;
                Ok(BrowserTask::Interval { id, _closure: closure })
            }
            Cadence::AnimationFrame => self.spawn_frame_loop(task),
        }
    }

    fn cancel(&self, handle: BrowserTask) {
        match handle {
            BrowserTask::Interval { id, _closure } => {
                self.window.clear_interval_with_handle(id);
            }
            BrowserTask::Frame(frame_loop) => {
                frame_loop.cancelled.set(true);
                _ = self
                    .window
                    .cancel_animation_frame(frame_loop.request_id.get());
                // must not run from inside the frame callback itself
                frame_loop.tick.borrow_mut().take();
            }
        }
    }
}
