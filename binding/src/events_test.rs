#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::fake_sdk::FakeSdk;
use crate::sdk::{EntitySpec, PropertyValue};

fn recorder<T: 'static>() -> (Callback<T>, Rc<RefCell<Vec<T>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (Callback::new(move |v| sink.borrow_mut().push(v)), seen)
}

fn map(sdk: &FakeSdk) -> Handle {
    sdk.create_entity(None, EntitySpec::Map { container: "map", initial_region: None })
        .expect("fake map")
}

// --- binding state machine ---

#[test]
fn binds_only_when_handle_and_callback_present() {
    let sdk = FakeSdk::new();
    let h = map(&sdk);
    let (cb, _) = recorder::<()>();
    let mut binding = EventBinding::new(SELECT);

    binding.sync(&sdk, None, Some(&cb), unit);
    assert_eq!(sdk.total_listeners(), 0);
    binding.sync(&sdk, Some(h), None, unit);
    assert_eq!(sdk.total_listeners(), 0);
    binding.sync(&sdk, Some(h), Some(&cb), unit);
    assert_eq!(sdk.listener_count(h, SELECT), 1);
    assert!(binding.is_bound());
}

#[test]
fn same_callback_does_not_rebind() {
    let sdk = FakeSdk::new();
    let h = map(&sdk);
    let (cb, _) = recorder::<()>();
    let mut binding = EventBinding::new(SELECT);
    binding.sync(&sdk, Some(h), Some(&cb), unit);
    sdk.clear_calls();

    binding.sync(&sdk, Some(h), Some(&cb.clone()), unit);

    assert!(sdk.calls().is_empty());
}

#[test]
fn rebinding_callback_leaves_exactly_one_listener() {
    let sdk = FakeSdk::new();
    let h = map(&sdk);
    let (old, old_seen) = recorder::<()>();
    let (new, new_seen) = recorder::<()>();
    let mut binding = EventBinding::new(SELECT);

    binding.sync(&sdk, Some(h), Some(&old), unit);
    binding.sync(&sdk, Some(h), Some(&new), unit);
    sdk.emit(h, SELECT, &NativeEvent::default());

    assert_eq!(sdk.listener_count(h, SELECT), 1);
    assert!(old_seen.borrow().is_empty(), "stale closure must not fire");
    assert_eq!(new_seen.borrow().len(), 1);
}

#[test]
fn handle_change_moves_listener() {
    let sdk = FakeSdk::new();
    let a = map(&sdk);
    let b = map(&sdk);
    let (cb, _) = recorder::<()>();
    let mut binding = EventBinding::new(DESELECT);

    binding.sync(&sdk, Some(a), Some(&cb), unit);
    binding.sync(&sdk, Some(b), Some(&cb), unit);

    assert_eq!(sdk.listener_count(a, DESELECT), 0);
    assert_eq!(sdk.listener_count(b, DESELECT), 1);
}

#[test]
fn unbind_is_idempotent() {
    let sdk = FakeSdk::new();
    let h = map(&sdk);
    let (cb, _) = recorder::<()>();
    let mut binding = EventBinding::new(SELECT);
    binding.sync(&sdk, Some(h), Some(&cb), unit);

    binding.unbind(&sdk);
    binding.unbind(&sdk);

    assert_eq!(sdk.total_listeners(), 0);
    assert_eq!(sdk.count_calls(|c| matches!(c, crate::fake_sdk::Call::Unlisten { .. })), 1);
}

#[test]
fn untranslatable_event_is_dropped() {
    let sdk = FakeSdk::new();
    let h = map(&sdk);
    let (cb, seen) = recorder::<Coordinate>();
    let mut binding = EventBinding::new(DRAGGING);
    binding.sync(&sdk, Some(h), Some(&cb), event_coordinate);

    sdk.emit(h, DRAGGING, &NativeEvent::default());
    sdk.emit(
        h,
        DRAGGING,
        &NativeEvent { coordinate: Some(Coordinate::new(1.0, 2.0)), ..NativeEvent::default() },
    );

    assert_eq!(*seen.borrow(), vec![Coordinate::new(1.0, 2.0)]);
}

// --- payload mappers ---

#[test]
fn region_is_read_back_from_the_map() {
    let sdk = FakeSdk::new();
    let h = map(&sdk);
    let r = CoordinateRegion::new(Coordinate::new(1.0, 2.0), crate::geo::CoordinateSpan::new(0.5, 0.5));
    sdk.poke_property(h, "region", PropertyValue::Region(r));

    assert_eq!(region(&sdk, h, &NativeEvent::default()), Some(r));
}

#[test]
fn map_type_uses_reverse_table() {
    let sdk = FakeSdk::new();
    let h = map(&sdk);
    sdk.poke_property(h, "mapType", PropertyValue::Constant(MapType::Hybrid.to_sdk()));
    assert_eq!(map_type(&sdk, h, &NativeEvent::default()), Some(MapType::Hybrid));

    sdk.poke_property(h, "mapType", PropertyValue::Text("terrain".into()));
    assert_eq!(map_type(&sdk, h, &NativeEvent::default()), None);
}

#[test]
fn drag_end_reads_entity_coordinate() {
    let sdk = FakeSdk::new();
    let h = sdk
        .create_entity(None, EntitySpec::Marker { coordinate: Coordinate::new(0.0, 0.0) })
        .expect("marker");
    sdk.poke_property(h, "coordinate", PropertyValue::Coordinate(Coordinate::new(5.0, 6.0)));

    let event = NativeEvent { coordinate: Some(Coordinate::new(9.0, 9.0)), ..NativeEvent::default() };
    assert_eq!(entity_coordinate(&sdk, h, &event), Some(Coordinate::new(5.0, 6.0)));
    assert_eq!(event_coordinate(&sdk, h, &event), Some(Coordinate::new(9.0, 9.0)));
}

#[test]
fn interaction_converts_current_pointer() {
    let sdk = FakeSdk::new();
    let h = map(&sdk);
    let event = NativeEvent { point_on_page: Some(Point::new(20.0, 40.0)), ..NativeEvent::default() };

    let payload = interaction(&sdk, h, &event).expect("has a point");

    assert_eq!(payload.point_on_page, Point::new(20.0, 40.0));
    assert_eq!(payload.to_coordinates(), Some(Coordinate::new(4.0, 2.0)));
    sdk.destroy_entity(h);
    assert_eq!(payload.to_coordinates(), None);
}

#[test]
fn interaction_without_point_is_dropped() {
    let sdk = FakeSdk::new();
    let h = map(&sdk);
    assert!(interaction(&sdk, h, &NativeEvent::default()).is_none());
}

#[test]
fn user_location_requires_coordinate() {
    let event = NativeEvent {
        coordinate: Some(Coordinate::new(1.0, 1.0)),
        timestamp_ms: Some(1_000.0),
        floor_level: Some(2),
        ..NativeEvent::default()
    };
    let loc = user_location(&(), Handle::new(1), &event).expect("coordinate present");
    assert_eq!(loc.timestamp_ms, Some(1_000.0));
    assert_eq!(loc.floor_level, Some(2));
    assert!(user_location(&(), Handle::new(1), &NativeEvent::default()).is_none());
}

#[test]
fn user_location_error_codes() {
    let event = NativeEvent { code: Some(1), message: Some("denied".into()), ..NativeEvent::default() };
    let err = user_location_error(&(), Handle::new(1), &event).expect("code present");
    assert_eq!(err.code, UserLocationErrorCode::PermissionDenied);
    assert_eq!(err.message, "denied");

    assert_eq!(UserLocationErrorCode::from_code(4), UserLocationErrorCode::MapkitNotInitialized);
    assert_eq!(UserLocationErrorCode::from_code(9).code(), 9);
}
