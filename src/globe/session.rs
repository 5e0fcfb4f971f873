use super::GlobeScene;

pub type FrameHandle = i32;

pub trait FrameScheduler {
    /// Schedules the next frame callback; `None` when the platform refused.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

pub trait SceneSurface {
    fn resize(&mut self, width: u32, height: u32);
    fn render(&mut self, scene: &GlobeScene);
    /// Releases every GPU resource. Called exactly once.
    fn dispose(&mut self);
}

pub trait ResizeHook {
    fn detach(&mut self);
}

/// Owns a live globe: the scene, its drawing surface and the frame loop.
/// Teardown runs on the first of `teardown()` or `Drop`.
pub struct GlobeSession<S: SceneSurface, F: FrameScheduler, R: ResizeHook> {
    scene: GlobeScene,
    surface: S,
    frames: F,
    resize_hook: Option<R>,
    pending_frame: Option<FrameHandle>,
    torn_down: bool,
}

impl<S: SceneSurface, F: FrameScheduler, R: ResizeHook> GlobeSession<S, F, R> {
    pub fn new(scene: GlobeScene, surface: S, frames: F) -> Self {
        Self {
            scene,
            surface,
            frames,
            resize_hook: None,
            pending_frame: None,
            torn_down: false,
        }
    }

    #[cfg(test)]
    fn scene(&self) -> &GlobeScene {
        &self.scene
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        !self.torn_down
    }

    pub fn attach_resize_hook(&mut self, hook: R) {
        if let Some(mut previous) = self.resize_hook.replace(hook) {
            previous.detach();
        }
    }

    pub fn start(&mut self, width: u32, height: u32) {
        if self.torn_down {
            return;
        }
        self.resize(width, height);
        self.surface.render(&self.scene);
        self.pending_frame = self.frames.request_frame();
    }

    pub fn on_frame(&mut self) {
        if self.torn_down {
            return;
        }
        self.pending_frame = None;
        self.scene.spin.advance();
        self.surface.render(&self.scene);
        self.pending_frame = self.frames.request_frame();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.torn_down {
            return;
        }
        self.scene.camera.set_viewport(width, height);
        self.surface.resize(width, height);
    }

    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        if let Some(handle) = self.pending_frame.take() {
            self.frames.cancel_frame(handle);
        }
        if let Some(mut hook) = self.resize_hook.take() {
            hook.detach();
        }
        self.surface.dispose();
    }
}

impl<S: SceneSurface, F: FrameScheduler, R: ResizeHook> Drop for GlobeSession<S, F, R> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::globe::{LOCATIONS, EARTH_SPIN_PER_FRAME};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Spy {
        renders: u32,
        resizes: Vec<(u32, u32)>,
        disposed: u32,
        requested: Vec<FrameHandle>,
        cancelled: Vec<FrameHandle>,
        resize_detached: u32,
    }

    struct SpySurface(Rc<RefCell<Spy>>);
    struct SpyFrames {
        spy: Rc<RefCell<Spy>>,
        next: FrameHandle,
    }
    struct SpyResize(Rc<RefCell<Spy>>);

    impl SceneSurface for SpySurface {
        fn resize(&mut self, width: u32, height: u32) {
            self.0.borrow_mut().resizes.push((width, height));
        }

        fn render(&mut self, _scene: &GlobeScene) {
            self.0.borrow_mut().renders += 1;
        }

        fn dispose(&mut self) {
            self.0.borrow_mut().disposed += 1;
        }
    }

    impl FrameScheduler for SpyFrames {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            self.next += 1;
            self.spy.borrow_mut().requested.push(self.next);
            Some(self.next)
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.spy.borrow_mut().cancelled.push(handle);
        }
    }

    impl ResizeHook for SpyResize {
        fn detach(&mut self) {
            self.0.borrow_mut().resize_detached += 1;
        }
    }

    fn session() -> (GlobeSession<SpySurface, SpyFrames, SpyResize>, Rc<RefCell<Spy>>) {
        let spy = Rc::new(RefCell::new(Spy::default()));
        let mut session = GlobeSession::new(
            GlobeScene::new(&LOCATIONS),
            SpySurface(Rc::clone(&spy)),
            SpyFrames { spy: Rc::clone(&spy), next: 0 },
        );
        session.attach_resize_hook(SpyResize(Rc::clone(&spy)));
        (session, spy)
    }

    #[test]
    fn every_frame_spins_renders_and_reschedules() {
        let (mut session, spy) = session();
        session.start(640, 480);
        session.on_frame();
        session.on_frame();

        let spy = spy.borrow();
        assert_eq!(spy.renders, 3);
        assert_eq!(spy.requested, vec![1, 2, 3]);
        assert!((session.scene().spin.earth - 2.0 * EARTH_SPIN_PER_FRAME).abs() < 1e-6);
    }

    #[test]
    fn teardown_cancels_pending_frame_and_stops_rendering() {
        let (mut session, spy) = session();
        session.start(640, 480);
        session.on_frame();
        session.teardown();

        // A frame callback the browser had already queued.
        session.on_frame();
        session.resize(100, 100);

        let spy = spy.borrow();
        assert_eq!(spy.cancelled, vec![2]);
        assert_eq!(spy.renders, 2);
        assert_eq!(spy.resize_detached, 1);
        assert_eq!(spy.disposed, 1);
        assert_eq!(spy.resizes, vec![(640, 480)]);
        assert!(!session.is_running());
    }

    #[test]
    fn drop_releases_resources_exactly_once() {
        let (mut session, spy) = session();
        session.start(300, 300);
        session.teardown();
        drop(session);

        let spy = spy.borrow();
        assert_eq!(spy.disposed, 1);
        assert_eq!(spy.cancelled.len(), 1);
        assert_eq!(spy.resize_detached, 1);
    }

    #[test]
    fn drop_without_explicit_teardown_still_disposes() {
        let (session, spy) = session();
        drop(session);

        let spy = spy.borrow();
        assert_eq!(spy.disposed, 1);
        assert_eq!(spy.resize_detached, 1);
        assert!(spy.cancelled.is_empty());
    }

    #[test]
    fn resize_updates_camera_aspect() {
        let (mut session, spy) = session();
        session.start(1000, 500);
        assert!((session.scene().camera.aspect - 2.0).abs() < 1e-6);
        session.resize(500, 500);
        assert!((session.scene().camera.aspect - 1.0).abs() < 1e-6);
        assert_eq!(spy.borrow().resizes, vec![(1000, 500), (500, 500)]);
    }

    #[test]
    fn replacing_resize_hook_detaches_previous() {
        let (mut session, spy) = session();
        session.attach_resize_hook(SpyResize(Rc::clone(&spy)));
        assert_eq!(spy.borrow().resize_detached, 1);
        session.teardown();
        assert_eq!(spy.borrow().resize_detached, 2);
    }
}
