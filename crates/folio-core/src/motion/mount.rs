use super::presets::Preset;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Page containers wait this long so the DOM settles before animating.
pub const CONTAINER_SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Opaque reference to a rendered node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeRef(pub String);

impl From<&str> for NodeRef {
    fn from(id: &str) -> Self {
        NodeRef(id.to_string())
    }
}

/// Whatever actually moves pixels.
pub trait AnimationDriver: Send + Sync {
    fn trigger(&self, preset: Preset, targets: &[NodeRef]);

    /// Drops scroll-driven listeners registered for `targets`.
    fn release_scroll_triggers(&self, targets: &[NodeRef]);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wrapper {
    Container,
    Card { delay: Duration },
    Form,
    TextReveal,
}

impl Wrapper {
    /// Card delayed by `secs`; negative or non-finite values mean no delay.
    pub fn card_with_delay_secs(secs: f64) -> Self {
        let delay = Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO);
        Wrapper::Card { delay }
    }

    pub fn preset(&self) -> Preset {
        match self {
            Wrapper::Container => Preset::PageEntrance,
            Wrapper::Card { .. } => Preset::Cards,
            Wrapper::Form => Preset::FormFields,
            Wrapper::TextReveal => Preset::TextReveal,
        }
    }

    pub fn delay(&self) -> Duration {
        match self {
            Wrapper::Container => CONTAINER_SETTLE_DELAY,
            Wrapper::Card { delay } => *delay,
            Wrapper::Form | Wrapper::TextReveal => Duration::ZERO,
        }
    }

    fn releases_on_cleanup(&self) -> bool {
        matches!(self, Wrapper::Container | Wrapper::TextReveal)
    }
}

/// A mounted wrapper. Dropping it counts as unmounting.
pub struct MountHandle {
    driver: Arc<dyn AnimationDriver>,
    wrapper: Wrapper,
    targets: Arc<[NodeRef]>,
    /// Submit buttons of a form; they get the hover preset.
    buttons: Arc<[NodeRef]>,
    enabled: bool,
    active: bool,
    cancelled: Arc<AtomicBool>,
    pending: Option<JoinHandle<()>>,
}

/// Mounts `wrapper` over `targets`. Zero-delay wrappers trigger before this
/// returns; delayed ones schedule a task on the current tokio runtime.
pub fn mount(
    driver: Arc<dyn AnimationDriver>,
    wrapper: Wrapper,
    targets: Vec<NodeRef>,
    enabled: bool,
) -> MountHandle {
    mount_with_buttons(driver, wrapper, targets, Vec::new(), enabled)
}

/// Mounts a form: `fields` get the form-field preset and `buttons` the
/// button hover preset.
pub fn mount_form(
    driver: Arc<dyn AnimationDriver>,
    fields: Vec<NodeRef>,
    buttons: Vec<NodeRef>,
    enabled: bool,
) -> MountHandle {
    mount_with_buttons(driver, Wrapper::Form, fields, buttons, enabled)
}

fn mount_with_buttons(
    driver: Arc<dyn AnimationDriver>,
    wrapper: Wrapper,
    targets: Vec<NodeRef>,
    buttons: Vec<NodeRef>,
    enabled: bool,
) -> MountHandle {
    let mut handle = MountHandle {
        driver,
        wrapper,
        targets: targets.into(),
        buttons: buttons.into(),
        enabled,
        active: false,
        cancelled: Arc::new(AtomicBool::new(false)),
        pending: None,
    };
    if enabled {
        handle.start();
    }
    handle
}

impl MountHandle {
    pub fn wrapper(&self) -> Wrapper {
        self.wrapper
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True while a delayed trigger has neither fired nor been cancelled.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map_or(false, |task| !task.is_finished())
    }

    /// Toggling off tears down like an unmount; toggling on starts afresh.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.stop();
        self.enabled = enabled;
        if enabled {
            self.start();
        }
    }

    pub fn unmount(mut self) {
        self.stop();
    }

    fn start(&mut self) {
        if self.targets.is_empty() && self.buttons.is_empty() {
            return;
        }
        self.active = true;

        let delay = self.wrapper.delay();
        let preset = self.wrapper.preset();
        if delay.is_zero() {
            fire(self.driver.as_ref(), preset, &self.targets, &self.buttons);
            return;
        }

        let cancelled = Arc::new(AtomicBool::new(false));
        self.cancelled = cancelled.clone();
        let driver = self.driver.clone();
        let targets = self.targets.clone();
        let buttons = self.buttons.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !cancelled.load(Ordering::SeqCst) {
                fire(driver.as_ref(), preset, &targets, &buttons);
            }
        }));
    }

    fn stop(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(task) = self.pending.take() {
            task.abort();
        }
        if self.active && self.wrapper.releases_on_cleanup() {
            self.driver.release_scroll_triggers(&self.targets);
        }
        self.active = false;
    }
}

fn fire(driver: &dyn AnimationDriver, preset: Preset, targets: &[NodeRef], buttons: &[NodeRef]) {
    if !targets.is_empty() {
        driver.trigger(preset, targets);
    }
    if !buttons.is_empty() {
        driver.trigger(Preset::ButtonHover, buttons);
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::time::sleep;

    #[derive(Default)]
    struct SpyDriver {
        triggers: Mutex<Vec<(Preset, Vec<NodeRef>)>>,
        releases: Mutex<Vec<Vec<NodeRef>>>,
    }

    impl SpyDriver {
        fn trigger_count(&self) -> usize {
            self.triggers.lock().unwrap().len()
        }

        fn release_count(&self) -> usize {
            self.releases.lock().unwrap().len()
        }
    }

    impl AnimationDriver for SpyDriver {
        fn trigger(&self, preset: Preset, targets: &[NodeRef]) {
            self.triggers
                .lock()
                .unwrap()
                .push((preset, targets.to_vec()));
        }

        fn release_scroll_triggers(&self, targets: &[NodeRef]) {
            self.releases.lock().unwrap().push(targets.to_vec());
        }
    }

    fn nodes() -> Vec<NodeRef> {
        vec![NodeRef::from("hero"), NodeRef::from("grid")]
    }

    #[tokio::test(start_paused = true)]
    async fn test_container_triggers_after_settle_delay() {
        let spy = Arc::new(SpyDriver::default());
        let handle = mount(spy.clone(), Wrapper::Container, nodes(), true);

        assert!(handle.is_pending());
        sleep(Duration::from_millis(40)).await;
        assert_eq!(spy.trigger_count(), 0);

        sleep(Duration::from_millis(20)).await;
        assert_eq!(spy.trigger_count(), 1);
        let (preset, targets) = spy.triggers.lock().unwrap()[0].clone();
        assert_eq!(preset, Preset::PageEntrance);
        assert_eq!(targets, nodes());

        handle.unmount();
        assert_eq!(spy.release_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_before_delay_never_triggers() {
        let spy = Arc::new(SpyDriver::default());
        let handle = mount(spy.clone(), Wrapper::Container, nodes(), true);

        sleep(Duration::from_millis(10)).await;
        handle.unmount();
        sleep(Duration::from_millis(500)).await;

        assert_eq!(spy.trigger_count(), 0);
        assert_eq!(spy.release_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_delayed_card_cancels_it() {
        let spy = Arc::new(SpyDriver::default());
        {
            let _card = mount(spy.clone(), Wrapper::card_with_delay_secs(0.3), nodes(), true);
            sleep(Duration::from_millis(100)).await;
        }
        sleep(Duration::from_secs(1)).await;

        assert_eq!(spy.trigger_count(), 0);
        assert_eq!(spy.release_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_wrapper_does_nothing_until_enabled() {
        let spy = Arc::new(SpyDriver::default());
        let mut handle = mount(spy.clone(), Wrapper::Container, nodes(), false);

        sleep(Duration::from_millis(100)).await;
        assert_eq!(spy.trigger_count(), 0);
        assert!(!handle.is_pending());

        handle.set_enabled(true);
        sleep(Duration::from_millis(60)).await;
        assert_eq!(spy.trigger_count(), 1);

        handle.set_enabled(false);
        assert_eq!(spy.release_count(), 1);

        drop(handle);
        assert_eq!(spy.release_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_off_cancels_pending_trigger() {
        let spy = Arc::new(SpyDriver::default());
        let mut handle = mount(spy.clone(), Wrapper::Container, nodes(), true);

        handle.set_enabled(false);
        assert!(!handle.is_pending());
        sleep(Duration::from_millis(200)).await;

        assert_eq!(spy.trigger_count(), 0);
        assert!(!handle.is_enabled());
    }

    #[tokio::test]
    async fn test_zero_delay_wrappers_trigger_immediately() {
        let spy = Arc::new(SpyDriver::default());
        let form = mount(spy.clone(), Wrapper::Form, nodes(), true);
        assert_eq!(spy.trigger_count(), 1);
        assert!(!form.is_pending());
        drop(form);
        assert_eq!(spy.release_count(), 0);

        let text = mount(spy.clone(), Wrapper::TextReveal, nodes(), true);
        assert_eq!(spy.triggers.lock().unwrap()[1].0, Preset::TextReveal);
        text.unmount();
        assert_eq!(spy.release_count(), 1);
    }

    #[tokio::test]
    async fn test_form_animates_fields_and_buttons() {
        let spy = Arc::new(SpyDriver::default());
        let form = mount_form(
            spy.clone(),
            vec![NodeRef::from("email"), NodeRef::from("message")],
            vec![NodeRef::from("submit")],
            true,
        );

        let triggers = spy.triggers.lock().unwrap().clone();
        assert_eq!(
            triggers,
            vec![
                (
                    Preset::FormFields,
                    vec![NodeRef::from("email"), NodeRef::from("message")]
                ),
                (Preset::ButtonHover, vec![NodeRef::from("submit")]),
            ]
        );
        form.unmount();
        assert_eq!(spy.release_count(), 0);

        let buttons_only = mount_form(spy.clone(), Vec::new(), vec![NodeRef::from("send")], true);
        assert_eq!(spy.trigger_count(), 3);
        assert_eq!(spy.triggers.lock().unwrap()[2].0, Preset::ButtonHover);
        drop(buttons_only);
    }

    #[tokio::test]
    async fn test_no_targets_means_no_work() {
        let spy = Arc::new(SpyDriver::default());
        let handle = mount(spy.clone(), Wrapper::TextReveal, Vec::new(), true);
        handle.unmount();

        assert_eq!(spy.trigger_count(), 0);
        assert_eq!(spy.release_count(), 0);
    }

    #[test]
    fn test_card_delay_conversion() {
        assert_eq!(
            Wrapper::card_with_delay_secs(0.25).delay(),
            Duration::from_millis(250)
        );
        assert_eq!(Wrapper::card_with_delay_secs(-1.0).delay(), Duration::ZERO);
        assert_eq!(Wrapper::card_with_delay_secs(f64::NAN).delay(), Duration::ZERO);
        assert_eq!(Wrapper::Form.preset(), Preset::FormFields);
    }
}
