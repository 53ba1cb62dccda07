#![allow(dead_code)]

use std::sync::Arc;

use bolton::{Implementation, Registry, RegistrySettings, Value};

#[derive(Debug)]
pub struct Animal {
    pub name: String,
}
impl Animal {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct Robot {
    pub serial: u32,
}

bolton::capability! {
    /// Repeats what it is given.
    pub Speak(dispatch = SpeakDispatch, instance = SpeakMethods) {
        fn echo(value: String) -> String;
    }
}

bolton::capability! {
    pub Describe(dispatch = DescribeDispatch, instance = DescribeMethods) {
        fn describe() -> String;
        fn shout(times: usize) -> String;
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn setup() -> Arc<Registry> {
    init_tracing();
    Arc::new(Registry::new())
}

pub fn setup_with(settings: RegistrySettings) -> Arc<Registry> {
    init_tracing();
    Arc::new(Registry::with_settings(settings))
}

/// An implementation of `describe` answering with a fixed label.
pub fn labelled(label: &'static str) -> Implementation {
    Implementation::new(label).method_any("describe", move |_, _| Ok(Value::new(label.to_string())))
}
