use super::*;
use crate::fake_sdk::{Call, FakeSdk};
use crate::sdk::EntitySpec;

struct Props {
    title: Option<String>,
    broken: bool,
}

impl PropertySet for Props {
    fn properties(&self) -> Result<PropertyList, ConfigError> {
        if self.broken {
            return Err(ConfigError::ConflictingPoiFilters);
        }
        Ok(vec![
            ("title", self.title.clone().map(PropertyValue::Text)),
            ("visible", Some(PropertyValue::Bool(true))),
        ])
    }
}

fn props(title: Option<&str>) -> Props {
    Props { title: title.map(str::to_owned), broken: false }
}

fn live(sdk: &FakeSdk) -> Handle {
    sdk.create_entity(None, EntitySpec::Marker { coordinate: crate::geo::Coordinate::new(0.0, 0.0) })
        .expect("fake marker")
}

#[test]
fn first_reconcile_writes_every_entry() {
    let sdk = FakeSdk::new();
    let h = live(&sdk);
    let mut sync = PropertySync::new();

    assert_eq!(sync.reconcile(&sdk, Some(h), &props(Some("a"))), Ok(2));
    assert_eq!(sdk.property(h, "title"), Some(PropertyValue::Text("a".into())));
}

#[test]
fn unchanged_entries_are_not_rewritten() {
    let sdk = FakeSdk::new();
    let h = live(&sdk);
    let mut sync = PropertySync::new();
    sync.reconcile(&sdk, Some(h), &props(Some("a"))).expect("reconcile");
    sdk.clear_calls();

    assert_eq!(sync.reconcile(&sdk, Some(h), &props(Some("b"))), Ok(1));
    assert_eq!(
        sdk.calls(),
        vec![Call::Set { handle: h, name: "title".into(), value: PropertyValue::Text("b".into()) }]
    );
}

#[test]
fn absent_value_clears_once() {
    let sdk = FakeSdk::new();
    let h = live(&sdk);
    let mut sync = PropertySync::new();
    sync.reconcile(&sdk, Some(h), &props(Some("a"))).expect("reconcile");
    sdk.clear_calls();

    sync.reconcile(&sdk, Some(h), &props(None)).expect("reconcile");
    sync.reconcile(&sdk, Some(h), &props(None)).expect("reconcile");

    assert_eq!(sdk.calls(), vec![Call::Clear { handle: h, name: "title".into() }]);
    assert_eq!(sdk.property(h, "title"), None);
}

#[test]
fn new_handle_resets_tracking() {
    let sdk = FakeSdk::new();
    let first = live(&sdk);
    let second = live(&sdk);
    let mut sync = PropertySync::new();
    sync.reconcile(&sdk, Some(first), &props(Some("a"))).expect("reconcile");

    assert_eq!(sync.reconcile(&sdk, Some(second), &props(Some("a"))), Ok(2));
    assert_eq!(sdk.property(second, "title"), Some(PropertyValue::Text("a".into())));
}

#[test]
fn missing_handle_is_a_no_op() {
    let sdk = FakeSdk::new();
    let mut sync = PropertySync::new();
    assert_eq!(sync.reconcile(&sdk, None, &props(Some("a"))), Ok(0));
    assert!(sdk.calls().is_empty());
}

#[test]
fn config_error_writes_nothing() {
    let sdk = FakeSdk::new();
    let h = live(&sdk);
    sdk.clear_calls();
    let mut sync = PropertySync::new();

    let result = sync.reconcile(&sdk, Some(h), &Props { title: None, broken: true });

    assert_eq!(result, Err(ConfigError::ConflictingPoiFilters));
    assert!(sdk.calls().is_empty());
}
