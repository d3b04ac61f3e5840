//! An in-memory ratbagd used by the integration tests.
//!
//! `FakeRatbagd` implements the transport seam and behaves like a small
//! daemon: it holds a property table per object address, applies setter
//! calls to it, and broadcasts signals to subscribers.

#![allow(dead_code)]

use async_trait::async_trait;
use futures::channel::mpsc::{UnboundedSender, unbounded};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ratbagd::{
    CallArgs, ClientConfig, Context, ProxyHandle, RatbagdError, RawSignal, SignalStream, Transport,
};
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Structure, Value};

pub const ROOT: &str = "/org/freedesktop/ratbag1";
pub const DEVICE: &str = "/org/freedesktop/ratbag1/device/hidraw0";

pub const PROFILE_COUNT: usize = 3;
pub const RESOLUTION_COUNT: usize = 2;
pub const BUTTON_COUNT: usize = 3;
pub const LED_COUNT: usize = 1;

pub fn profile_path(p: usize) -> String {
    format!("{DEVICE}/p{p}")
}

pub fn resolution_path(p: usize, r: usize) -> String {
    format!("{DEVICE}/p{p}/r{r}")
}

pub fn button_path(p: usize, b: usize) -> String {
    format!("{DEVICE}/p{p}/b{b}")
}

pub fn led_path(p: usize, l: usize) -> String {
    format!("{DEVICE}/p{p}/l{l}")
}

pub fn object_path(p: &str) -> OwnedObjectPath {
    OwnedObjectPath::try_from(p.to_string()).unwrap()
}

/// A property value as stored by the fake daemon.
#[derive(Debug, Clone, PartialEq)]
pub enum Prop {
    U32(u32),
    Str(String),
    Paths(Vec<String>),
    U32s(Vec<u32>),
    Strs(Vec<String>),
    Rgb(u32, u32, u32),
}

impl Prop {
    pub fn to_value(&self) -> OwnedValue {
        let value = match self {
            Prop::U32(v) => Value::U32(*v),
            Prop::Str(s) => Value::from(s.clone()),
            Prop::Paths(paths) => Value::from(
                paths
                    .iter()
                    .map(|p| ObjectPath::try_from(p.clone()).unwrap())
                    .collect::<Vec<_>>(),
            ),
            Prop::U32s(v) => Value::from(v.clone()),
            Prop::Strs(v) => Value::from(v.clone()),
            Prop::Rgb(r, g, b) => Value::Structure(Structure::from((*r, *g, *b))),
        };
        OwnedValue::try_from(value).unwrap()
    }

    fn as_u32(&self) -> Option<u32> {
        match self {
            Prop::U32(v) => Some(*v),
            _ => None,
        }
    }

    fn as_paths(&self) -> Option<&[String]> {
        match self {
            Prop::Paths(p) => Some(p),
            _ => None,
        }
    }
}

pub fn path_value(p: &str) -> OwnedValue {
    OwnedValue::try_from(Value::from(ObjectPath::try_from(p.to_string()).unwrap())).unwrap()
}

/// A recorded method call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub path: String,
    pub method: String,
    pub args: CallArgs,
}

/// A recorded bind.
#[derive(Debug, Clone, PartialEq)]
pub struct Bind {
    pub service: String,
    pub path: String,
    pub interface: String,
}

#[derive(Default)]
struct State {
    objects: HashMap<String, HashMap<String, Prop>>,
    calls: Vec<Call>,
    binds: Vec<Bind>,
    subscribers: HashMap<String, Vec<UnboundedSender<RawSignal>>>,
}

#[derive(Clone)]
pub struct FakeRatbagd {
    state: Arc<Mutex<State>>,
    owned: Arc<AtomicBool>,
    stalled: Arc<AtomicBool>,
}

impl FakeRatbagd {
    /// A daemon with a manager and no devices.
    pub fn new() -> Self {
        let fake = Self {
            state: Arc::new(Mutex::new(State::default())),
            owned: Arc::new(AtomicBool::new(true)),
            stalled: Arc::new(AtomicBool::new(false)),
        };
        fake.set(ROOT, "Devices", Prop::Paths(Vec::new()));
        fake.set(
            ROOT,
            "Themes",
            Prop::Strs(vec!["default".into(), "gnome".into()]),
        );
        fake
    }

    /// A daemon with one mouse: three profiles of two resolutions, three
    /// buttons and one LED each. Profile 0 and resolution 0 are active,
    /// resolution 1 is the default.
    pub fn with_mouse() -> Self {
        let fake = Self::new();
        fake.set(ROOT, "Devices", Prop::Paths(vec![DEVICE.into()]));

        fake.set(DEVICE, "Id", Prop::Str("usb:046d:c539:0".into()));
        fake.set(DEVICE, "Name", Prop::Str("Logitech G403".into()));
        fake.set(DEVICE, "Capabilities", Prop::U32s(vec![1, 100, 101, 200, 201, 300, 301, 400]));
        fake.set(
            DEVICE,
            "Profiles",
            Prop::Paths((0..PROFILE_COUNT).map(profile_path).collect()),
        );
        fake.set(DEVICE, "ActiveProfile", Prop::U32(0));

        for p in 0..PROFILE_COUNT {
            let profile = profile_path(p);
            fake.set(&profile, "Index", Prop::U32(p as u32));
            fake.set(
                &profile,
                "Resolutions",
                Prop::Paths((0..RESOLUTION_COUNT).map(|r| resolution_path(p, r)).collect()),
            );
            fake.set(
                &profile,
                "Buttons",
                Prop::Paths((0..BUTTON_COUNT).map(|b| button_path(p, b)).collect()),
            );
            fake.set(
                &profile,
                "Leds",
                Prop::Paths((0..LED_COUNT).map(|l| led_path(p, l)).collect()),
            );
            fake.set(&profile, "ActiveResolution", Prop::U32(0));
            fake.set(&profile, "DefaultResolution", Prop::U32(1));

            for r in 0..RESOLUTION_COUNT {
                let res = resolution_path(p, r);
                let dpi = 800 * (r as u32 + 1);
                fake.set(&res, "Index", Prop::U32(r as u32));
                fake.set(&res, "Capabilities", Prop::U32s(vec![1]));
                fake.set(&res, "XResolution", Prop::U32(dpi));
                fake.set(&res, "YResolution", Prop::U32(dpi));
                fake.set(&res, "ReportRate", Prop::U32(1000));
                fake.set(&res, "Minimum", Prop::U32(200));
                fake.set(&res, "Maximum", Prop::U32(12000));
            }

            for b in 0..BUTTON_COUNT {
                let button = button_path(p, b);
                fake.set(&button, "Index", Prop::U32(b as u32));
                fake.set(&button, "Type", Prop::Str(["left", "right", "middle"][b].into()));
                fake.set(&button, "ActionType", Prop::U32(1));
                fake.set(&button, "ActionTypes", Prop::U32s(vec![0, 1, 2, 3]));
                fake.set(&button, "ButtonMapping", Prop::U32(b as u32 + 1));
                fake.set(&button, "SpecialMapping", Prop::Str(String::new()));
                fake.set(&button, "KeyMapping", Prop::U32s(vec![0]));
            }

            for l in 0..LED_COUNT {
                let led = led_path(p, l);
                fake.set(&led, "Index", Prop::U32(l as u32));
                fake.set(&led, "Type", Prop::Str("logo".into()));
                fake.set(&led, "Mode", Prop::U32(1));
                fake.set(&led, "Color", Prop::Rgb(0, 0, 255));
                fake.set(&led, "EffectRate", Prop::U32(1000));
                fake.set(&led, "Brightness", Prop::U32(255));
            }
        }
        fake
    }

    /// A context over this daemon with the default configuration.
    pub fn context(&self) -> Context {
        self.context_with(ClientConfig::default())
    }

    pub fn context_with(&self, config: ClientConfig) -> Context {
        Context::new(Arc::new(self.clone()), config)
    }

    /// Simulates the daemon exiting (or never having started).
    pub fn set_owned(&self, owned: bool) {
        self.owned.store(owned, Ordering::SeqCst);
    }

    /// Makes every subsequent call hang forever.
    pub fn stall_calls(&self) {
        self.stalled.store(true, Ordering::SeqCst);
    }

    pub fn set(&self, path: &str, name: &str, value: Prop) {
        let mut state = self.state.lock().unwrap();
        state
            .objects
            .entry(path.to_string())
            .or_default()
            .insert(name.to_string(), value);
    }

    pub fn get(&self, path: &str, name: &str) -> Option<Prop> {
        let state = self.state.lock().unwrap();
        state.objects.get(path)?.get(name).cloned()
    }

    pub fn remove(&self, path: &str, name: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(props) = state.objects.get_mut(path) {
            props.remove(name);
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn binds(&self) -> Vec<Bind> {
        self.state.lock().unwrap().binds.clone()
    }

    /// Sends `signal` to every subscriber of `path`.
    pub fn emit(&self, path: &str, name: &str, args: Vec<OwnedValue>) {
        let mut state = self.state.lock().unwrap();
        Self::broadcast(&mut state, path, name, || {
            args.iter().map(|a| a.try_clone().unwrap()).collect()
        });
    }

    pub fn subscriber_count(&self, path: &str) -> usize {
        let state = self.state.lock().unwrap();
        state.subscribers.get(path).map_or(0, Vec::len)
    }

    /// Ends every signal stream subscribed to `path`.
    pub fn close_signals(&self, path: &str) {
        let mut state = self.state.lock().unwrap();
        state.subscribers.remove(path);
    }

    fn broadcast(
        state: &mut State,
        path: &str,
        name: &str,
        args: impl Fn() -> Vec<OwnedValue>,
    ) {
        if let Some(subscribers) = state.subscribers.get_mut(path) {
            subscribers.retain(|tx| {
                let signal = RawSignal::new(name, args()).with_sender(":1.7");
                tx.unbounded_send(signal).is_ok()
            });
        }
    }

    /// Finds the object whose `list` property contains `child`.
    fn parent_of(state: &State, list: &str, child: &str) -> Option<String> {
        state.objects.iter().find_map(|(path, props)| {
            props
                .get(list)
                .and_then(Prop::as_paths)
                .filter(|children| children.iter().any(|c| c == child))
                .map(|_| path.clone())
        })
    }

    fn handle_call(
        &self,
        path: &str,
        method: &str,
        args: &CallArgs,
    ) -> ratbagd::Result<Option<OwnedValue>> {
        let mut guard = self.state.lock().unwrap();
        let state: &mut State = &mut guard;
        state.calls.push(Call {
            path: path.to_string(),
            method: method.to_string(),
            args: args.clone(),
        });

        let prop = |state: &State, name: &str| -> Option<Prop> {
            state.objects.get(path)?.get(name).cloned()
        };
        let set = |state: &mut State, name: &str, value: Prop| {
            state
                .objects
                .entry(path.to_string())
                .or_default()
                .insert(name.to_string(), value);
        };
        let ok = || -> ratbagd::Result<Option<OwnedValue>> { Ok(Some(OwnedValue::from(0u32))) };

        match (method, args) {
            ("Commit", CallArgs::Unit) => ok(),
            ("GetSvg", CallArgs::Str(theme)) => {
                let themes = match state.objects.get(ROOT).and_then(|p| p.get("Themes")) {
                    Some(Prop::Strs(t)) => t.clone(),
                    _ => Vec::new(),
                };
                let svg = if themes.contains(theme) {
                    format!("/usr/share/piper/svgs/{theme}/logitech-g403.svg")
                } else {
                    String::new()
                };
                Ok(Some(OwnedValue::try_from(Value::from(svg)).unwrap()))
            }
            ("GetProfileByIndex", CallArgs::U32(i)) | ("GetResolutionByIndex", CallArgs::U32(i)) => {
                let list = if method == "GetProfileByIndex" {
                    "Profiles"
                } else {
                    "Resolutions"
                };
                let children = prop(&*state, list)
                    .and_then(|p| p.as_paths().map(<[String]>::to_vec))
                    .unwrap_or_default();
                match children.get(*i as usize) {
                    Some(child) => Ok(Some(path_value(child))),
                    None => Err(RatbagdError::CallFailed {
                        method: method.to_string(),
                        reason: format!("no object at index {i}"),
                    }),
                }
            }
            ("SetActive", CallArgs::Unit) => {
                let index = prop(&*state, "Index").and_then(|p| p.as_u32()).unwrap_or(0);
                let Some(device) = Self::parent_of(state, "Profiles", path) else {
                    return ok();
                };
                state
                    .objects
                    .entry(device.clone())
                    .or_default()
                    .insert("ActiveProfile".into(), Prop::U32(index));
                let siblings = state.objects[&device]["Profiles"].as_paths().unwrap().to_vec();
                for sibling in siblings {
                    Self::broadcast(state, &sibling, "ActiveProfileChanged", || {
                        vec![OwnedValue::from(index)]
                    });
                }
                ok()
            }
            ("SetDefault", CallArgs::Unit) => {
                let index = prop(&*state, "Index").and_then(|p| p.as_u32()).unwrap_or(0);
                let Some(profile) = Self::parent_of(state, "Resolutions", path) else {
                    return ok();
                };
                state
                    .objects
                    .entry(profile.clone())
                    .or_default()
                    .insert("DefaultResolution".into(), Prop::U32(index));
                let siblings = state.objects[&profile]["Resolutions"].as_paths().unwrap().to_vec();
                for sibling in siblings {
                    Self::broadcast(state, &sibling, "DefaultResolutionChanged", || {
                        vec![OwnedValue::from(index)]
                    });
                }
                ok()
            }
            ("SetResolution", CallArgs::U32Pair(x, y)) => {
                let min = prop(&*state, "Minimum").and_then(|p| p.as_u32()).unwrap_or(0);
                let max = prop(&*state, "Maximum").and_then(|p| p.as_u32()).unwrap_or(u32::MAX);
                if !(min..=max).contains(x) || !(min..=max).contains(y) {
                    return Ok(Some(OwnedValue::from(-1002i32 as u32)));
                }
                set(state, "XResolution", Prop::U32(*x));
                set(state, "YResolution", Prop::U32(*y));
                ok()
            }
            ("SetReportRate", CallArgs::U32(rate)) => {
                set(state, "ReportRate", Prop::U32(*rate));
                ok()
            }
            ("SetButtonMapping", CallArgs::U32(button)) => {
                set(state, "ButtonMapping", Prop::U32(*button));
                set(state, "ActionType", Prop::U32(1));
                ok()
            }
            ("SetSpecialMapping", CallArgs::Str(special)) => {
                set(state, "SpecialMapping", Prop::Str(special.clone()));
                set(state, "ActionType", Prop::U32(2));
                ok()
            }
            ("SetKeyMapping", CallArgs::U32Array(keys)) => {
                set(state, "KeyMapping", Prop::U32s(keys.clone()));
                set(state, "ActionType", Prop::U32(3));
                ok()
            }
            ("Disable", CallArgs::Unit) => {
                set(state, "ActionType", Prop::U32(0));
                ok()
            }
            ("SetMode", CallArgs::U32(mode)) => {
                set(state, "Mode", Prop::U32(*mode));
                ok()
            }
            ("SetColor", CallArgs::Triple(r, g, b)) => {
                set(state, "Color", Prop::Rgb(*r, *g, *b));
                ok()
            }
            ("SetEffectRate", CallArgs::U32(rate)) => {
                set(state, "EffectRate", Prop::U32(*rate));
                ok()
            }
            ("SetBrightness", CallArgs::U32(level)) => {
                set(state, "Brightness", Prop::U32(*level));
                ok()
            }
            _ => Err(RatbagdError::CallFailed {
                method: method.to_string(),
                reason: "org.freedesktop.DBus.Error.UnknownMethod".into(),
            }),
        }
    }
}

#[async_trait]
impl Transport for FakeRatbagd {
    async fn bind(
        &self,
        service: &str,
        path: &OwnedObjectPath,
        interface: &str,
    ) -> ratbagd::Result<Arc<dyn ProxyHandle>> {
        self.state.lock().unwrap().binds.push(Bind {
            service: service.to_string(),
            path: path.to_string(),
            interface: interface.to_string(),
        });

        Ok(Arc::new(FakeHandle {
            fake: self.clone(),
            path: path.to_string(),
        }))
    }
}

struct FakeHandle {
    fake: FakeRatbagd,
    path: String,
}

#[async_trait]
impl ProxyHandle for FakeHandle {
    async fn has_owner(&self) -> bool {
        self.fake.owned.load(Ordering::SeqCst)
    }

    fn cached_property(&self, name: &str) -> Option<OwnedValue> {
        self.fake.get(&self.path, name).map(|p| p.to_value())
    }

    async fn call(&self, method: &str, args: &CallArgs) -> ratbagd::Result<Option<OwnedValue>> {
        if self.fake.stalled.load(Ordering::SeqCst) {
            futures::future::pending::<()>().await;
        }
        self.fake.handle_call(&self.path, method, args)
    }

    async fn subscribe(&self) -> ratbagd::Result<SignalStream> {
        let (tx, rx) = unbounded();
        let mut state = self.fake.state.lock().unwrap();
        state
            .subscribers
            .entry(self.path.clone())
            .or_default()
            .push(tx);
        Ok(Box::pin(rx))
    }
}

/// A short timeout for tests that expect calls to time out.
pub fn short_timeout() -> Duration {
    Duration::from_millis(50)
}
